// grid.rs - Columns of points spanning the oversized surface rectangle
//
// Structure-of-Arrays layout, column-major: index = col * rows + row.
// Rebuilt wholesale on attach and resize, never patched in place.

use crate::config::FieldConfig;
use crate::error::{FieldError, Result};

/// Upper bound on grid nodes; anything past this is a bad gap or size.
pub const MAX_POINTS: usize = 1 << 20;

/// Snapshot of one grid node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub base: (f64, f64),
    pub wave: (f64, f64),
    pub cursor: (f64, f64),
    pub velocity: (f64, f64),
}

pub struct Grid {
    cols: usize,
    rows: usize,

    // Base position (fixed)
    pub bx: Vec<f64>,
    pub by: Vec<f64>,

    // Noise displacement (recomputed every frame)
    pub wx: Vec<f64>,
    pub wy: Vec<f64>,

    // Cursor displacement + velocity (carried across frames)
    pub cx: Vec<f64>,
    pub cy: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
}

impl Grid {
    /// Lay out a grid centred on a `width` x `height` surface, overscanned
    /// by the configured margins so the wave never exposes an edge.
    pub fn new(width: f64, height: f64, config: &FieldConfig) -> Result<Self> {
        let ow = width + config.margin_x;
        let oh = height + config.margin_y;

        // Count in f64 first; casting an unbounded ratio to usize saturates
        let lines = (ow / config.x_gap).ceil();
        let points = (oh / config.y_gap).ceil();
        let (cols_f, rows_f) = (lines + 1.0, points + 1.0);
        if !(cols_f.is_finite() && rows_f.is_finite()) || cols_f * rows_f > MAX_POINTS as f64 {
            return Err(FieldError::GridTooLarge { cols: cols_f, rows: rows_f, limit: MAX_POINTS });
        }

        let total_lines = lines as usize;
        let total_points = points as usize;

        let x_start = (width - config.x_gap * total_lines as f64) / 2.0;
        let y_start = (height - config.y_gap * total_points as f64) / 2.0;

        let cols = total_lines + 1;
        let rows = total_points + 1;
        let n = cols * rows;

        let mut bx = Vec::with_capacity(n);
        let mut by = Vec::with_capacity(n);
        for i in 0..cols {
            for j in 0..rows {
                bx.push(x_start + config.x_gap * i as f64);
                by.push(y_start + config.y_gap * j as f64);
            }
        }

        Ok(Self {
            cols,
            rows,
            bx,
            by,
            wx: vec![0.0; n],
            wy: vec![0.0; n],
            cx: vec![0.0; n],
            cy: vec![0.0; n],
            vx: vec![0.0; n],
            vy: vec![0.0; n],
        })
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
    pub fn len(&self) -> usize { self.bx.len() }
    pub fn is_empty(&self) -> bool { self.bx.is_empty() }

    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        col * self.rows + row
    }

    pub fn point(&self, col: usize, row: usize) -> Point {
        let i = self.index(col, row);
        Point {
            base: (self.bx[i], self.by[i]),
            wave: (self.wx[i], self.wy[i]),
            cursor: (self.cx[i], self.cy[i]),
            velocity: (self.vx[i], self.vy[i]),
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.cols).flat_map(move |c| (0..self.rows).map(move |r| self.point(c, r)))
    }

    /// Column whose base x is closest to `x`.
    pub fn nearest_col(&self, x: f64) -> usize {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for c in 0..self.cols {
            let d = (self.bx[self.index(c, 0)] - x).abs();
            if d < best_d {
                best = c;
                best_d = d;
            }
        }
        best
    }

    /// Rendered position of a point, rounded to tenths. Column endpoints
    /// skip the cursor term so every line stays pinned at its ends.
    pub fn rendered(&self, col: usize, row: usize) -> (f64, f64) {
        let i = self.index(col, row);
        let anchor = row == 0 || row + 1 == self.rows;
        let (ox, oy) = if anchor { (0.0, 0.0) } else { (self.cx[i], self.cy[i]) };
        (
            round_tenth(self.bx[i] + self.wx[i] + ox),
            round_tenth(self.by[i] + self.wy[i] + oy),
        )
    }
}

// Halves round toward +inf, same as the browser's Math.round.
#[inline]
fn round_tenth(v: f64) -> f64 {
    (v * 10.0 + 0.5).floor() / 10.0
}
