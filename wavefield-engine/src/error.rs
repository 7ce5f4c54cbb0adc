// error.rs - Failure modes of the wave field and its host glue
//
// Geometry preconditions are checked up front so a degenerate surface
// never turns into NaN coordinates on the canvas.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("surface has no drawable area ({width}x{height})")]
    EmptySurface { width: f64, height: f64 },

    #[error("invalid field config: {0}")]
    InvalidConfig(String),

    #[error("grid of {cols}x{rows} points exceeds the {limit} point limit")]
    GridTooLarge { cols: f64, rows: f64, limit: usize },

    #[error("component is already attached")]
    AlreadyAttached,

    #[error("component is not attached")]
    NotAttached,

    #[error("host error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, FieldError>;
