// ============================================================================
// WAVE FIELD - Pointer-reactive line field for the landing page background
// ============================================================================
//
// field/      grid, pointer filter, noise and the per-frame physics
// surface     drawing + style sinks (canvas in the browser, recorder natively)
// component   attach/detach lifecycle over an abstract host
// page        menu -> carousel slide mapping
// web         wasm32 host and the exported JS classes

pub mod component;
pub mod config;
pub mod error;
pub mod field;
pub mod page;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use component::{Bounds, Component, FrameHandle, Host};
pub use config::FieldConfig;
pub use error::{FieldError, Result};
pub use field::WaveField;
pub use surface::{Recorder, StyleSink, Surface};
