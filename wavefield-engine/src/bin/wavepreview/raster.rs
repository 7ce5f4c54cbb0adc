// raster.rs - Software surface that strokes paths into an RGBA image
//
// One-pixel lines, DDA stepping. Enough to eyeball a frame.

use image::{Rgba, RgbaImage};
use wavefield_engine::Surface;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub struct Raster {
    pub img: RgbaImage,
    color: Rgba<u8>,
    pen: Option<(f64, f64)>,
    segments: Vec<((f64, f64), (f64, f64))>,
}

impl Raster {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            img: RgbaImage::from_pixel(w, h, BACKGROUND),
            color: Rgba([0, 0, 0, 255]),
            pen: None,
            segments: Vec::new(),
        }
    }

    fn plot(&mut self, x: f64, y: f64) {
        let (xi, yi) = (x.round() as i64, y.round() as i64);
        if xi >= 0 && yi >= 0 && (xi as u32) < self.img.width() && (yi as u32) < self.img.height() {
            self.img.put_pixel(xi as u32, yi as u32, self.color);
        }
    }

    fn line(&mut self, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        let (dx, dy) = ((x1 - x0) / steps as f64, (y1 - y0) / steps as f64);
        for i in 0..=steps {
            self.plot(x0 + dx * i as f64, y0 + dy * i as f64);
        }
    }
}

impl Surface for Raster {
    fn clear(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let x0 = x.max(0.0) as u32;
        let y0 = y.max(0.0) as u32;
        let x1 = ((x + w).max(0.0) as u32).min(self.img.width());
        let y1 = ((y + h).max(0.0) as u32).min(self.img.height());
        for py in y0..y1 {
            for px in x0..x1 {
                self.img.put_pixel(px, py, BACKGROUND);
            }
        }
    }

    fn set_stroke_color(&mut self, color: &str) {
        match parse_hex(color) {
            Some(c) => self.color = c,
            None => tracing::warn!("unsupported stroke color {color:?}, keeping previous"),
        }
    }

    fn begin_path(&mut self) {
        self.pen = None;
        self.segments.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.pen = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(from) = self.pen {
            self.segments.push((from, (x, y)));
        }
        self.pen = Some((x, y));
    }

    fn stroke(&mut self) {
        let segments = std::mem::take(&mut self.segments);
        for &(a, b) in &segments {
            self.line(a, b);
        }
        self.segments = segments;
    }
}

/// `#rgb` or `#rrggbb`.
fn parse_hex(s: &str) -> Option<Rgba<u8>> {
    let hex = s.strip_prefix('#')?;
    let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba([channel(0, 2)?, channel(2, 2)?, channel(4, 2)?, 255])),
        3 => {
            let r = channel(0, 1)?;
            let g = channel(1, 1)?;
            let b = channel(2, 1)?;
            Some(Rgba([r * 17, g * 17, b * 17, 255]))
        }
        _ => None,
    }
}
