// field/ - Animated wave field
//
// A grid of vertical lines drifting on a noise field, pushed around by a
// damped spring that reacts to pointer motion. Host independent: drawing
// goes through `Surface`, the CSS glow through `StyleSink`.

mod grid;
mod noise;
mod pointer;

pub use grid::{Grid, Point};
pub use noise::WaveNoise;
pub use pointer::PointerState;

use crate::config::FieldConfig;
use crate::error::{FieldError, Result};
use crate::surface::{StyleSink, Surface};

pub struct WaveField {
    config: FieldConfig,

    // Surface size
    width: f64,
    height: f64,

    grid: Grid,
    pointer: PointerState,
    noise: WaveNoise,
}

impl WaveField {
    pub fn new(width: f64, height: f64, config: FieldConfig, seed: u32) -> Result<Self> {
        config.validate()?;
        check_size(width, height)?;

        let grid = Grid::new(width, height, &config)?;
        log::debug!(
            "wave grid {}x{} for {}x{} surface (seed {})",
            grid.cols(), grid.rows(), width, height, seed
        );

        Ok(Self {
            width,
            height,
            grid,
            pointer: PointerState::new(),
            noise: WaveNoise::new(seed),
            config,
        })
    }

    /// Rebuild the grid for new surface bounds. All cursor offsets and
    /// velocities start over at zero.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        check_size(width, height)?;
        self.grid = Grid::new(width, height, &self.config)?;
        self.width = width;
        self.height = height;
        log::debug!("wave grid rebuilt {}x{}", self.grid.cols(), self.grid.rows());
        Ok(())
    }

    /// Raw pointer sample in surface-local coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.set_raw(x, y);
    }

    /// One full frame: physics, style properties, redraw.
    pub fn tick<S: Surface, T: StyleSink>(&mut self, time: f64, surface: &mut S, style: &mut T) {
        self.step(time);
        self.publish_style(style);
        self.render(surface);
    }

    /// Advance pointer filters and every point by one frame.
    pub fn step(&mut self, time: f64) {
        self.pointer.update(&self.config);

        let c = &self.config;
        let p = &self.pointer;
        let g = &mut self.grid;

        let l = p.radius(c);
        let (cos_a, sin_a) = (p.a.cos(), p.a.sin());
        let push = l * p.vs * c.impulse;

        for i in 0..g.len() {
            let bx = g.bx[i];
            let by = g.by[i];

            // Noise drift
            let nx = (bx + time * c.noise_speed_x) * c.noise_scale_x;
            let ny = (by + time * c.noise_speed_y) * c.noise_scale_y;
            let mv = self.noise.sample(nx, ny) * c.noise_amplitude;
            g.wx[i] = mv.cos() * c.wave_radius_x;
            g.wy[i] = mv.sin() * c.wave_radius_y;

            // Pointer impulse
            let d = (bx - p.sx).hypot(by - p.sy);
            if d < l {
                let s = 1.0 - d / l;
                let f = (d * c.ripple).cos() * s;
                g.vx[i] += cos_a * f * push;
                g.vy[i] += sin_a * f * push;
            }

            // Spring back to rest, damp, integrate
            g.vx[i] += (0.0 - g.cx[i]) * c.tension;
            g.vx[i] *= c.damping;
            g.cx[i] = (g.cx[i] + g.vx[i] * c.velocity_gain).clamp(-c.max_offset, c.max_offset);

            g.vy[i] += (0.0 - g.cy[i]) * c.tension;
            g.vy[i] *= c.damping;
            g.cy[i] = (g.cy[i] + g.vy[i] * c.velocity_gain).clamp(-c.max_offset, c.max_offset);
        }
    }

    /// Clear the surface and stroke one path per column.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.clear(0.0, 0.0, self.width, self.height);
        surface.set_stroke_color(&self.config.stroke_color);

        for col in 0..self.grid.cols() {
            surface.begin_path();
            let (x, y) = self.grid.rendered(col, 0);
            surface.move_to(x, y);
            for row in 1..self.grid.rows() {
                let (x, y) = self.grid.rendered(col, row);
                surface.line_to(x, y);
            }
            surface.stroke();
        }
    }

    /// Smoothed pointer as `--x` / `--y` pixel properties.
    pub fn publish_style<T: StyleSink>(&self, style: &mut T) {
        style.set_px("--x", self.pointer.sx);
        style.set_px("--y", self.pointer.sy);
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn pointer(&self) -> &PointerState { &self.pointer }
    pub fn config(&self) -> &FieldConfig { &self.config }
    pub fn size(&self) -> (f64, f64) { (self.width, self.height) }
    pub fn seed(&self) -> u32 { self.noise.seed() }
}

fn check_size(width: f64, height: f64) -> Result<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(FieldError::EmptySurface { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{NoStyle, Recorder};

    fn field(w: f64, h: f64) -> WaveField {
        WaveField::new(w, h, FieldConfig::default(), 1234).unwrap()
    }

    #[test]
    fn rejects_degenerate_surface() {
        for (w, h) in [(0.0, 100.0), (100.0, 0.0), (-5.0, 10.0), (f64::NAN, 10.0)] {
            let err = WaveField::new(w, h, FieldConfig::default(), 1).err();
            assert!(matches!(err, Some(FieldError::EmptySurface { .. })), "{w}x{h}");
        }
        let mut f = field(100.0, 100.0);
        assert!(f.resize(0.0, 0.0).is_err());
        assert_eq!(f.size(), (100.0, 100.0));
    }

    #[test]
    fn oversized_grid_is_an_error() {
        let config = FieldConfig::from_json(r#"{ "x_gap": 1e-300 }"#).unwrap();
        assert!(matches!(
            WaveField::new(300.0, 200.0, config, 1),
            Err(FieldError::GridTooLarge { .. })
        ));
        assert!(matches!(
            WaveField::new(1e300, 200.0, FieldConfig::default(), 1),
            Err(FieldError::GridTooLarge { .. })
        ));

        let mut f = field(300.0, 200.0);
        assert!(f.resize(1e300, 200.0).is_err());
        assert_eq!(f.size(), (300.0, 200.0));
    }

    #[test]
    fn no_pointer_leaves_cursor_at_rest() {
        let mut f = field(300.0, 200.0);
        for t in 0..20 {
            f.step(t as f64 * 16.0);
        }
        for p in f.grid().points() {
            assert_eq!(p.cursor, (0.0, 0.0));
        }
    }

    #[test]
    fn wave_offset_is_elliptical() {
        let mut f = field(300.0, 200.0);
        f.step(500.0);
        for p in f.grid().points() {
            let (wx, wy) = p.wave;
            let r = (wx / 32.0).powi(2) + (wy / 16.0).powi(2);
            assert!((r - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn pointer_sweep_pushes_nearby_points() {
        let mut f = field(400.0, 300.0);
        f.pointer_move(100.0, 150.0);
        f.step(0.0);
        f.pointer_move(160.0, 150.0);
        for t in 1..10 {
            f.step(t as f64 * 16.0);
        }

        let g = f.grid();
        let near = g.index(g.nearest_col(150.0), g.rows() / 2);
        assert!(g.cx[near] > 0.0, "pushed along +x, got {}", g.cx[near]);

        // Far outside the influence radius nothing moves
        let far = g.index(g.cols() - 1, 0);
        assert_eq!(g.cx[far], 0.0);
    }

    #[test]
    fn render_draws_one_polyline_per_column() {
        let mut f = field(300.0, 200.0);
        let mut r = Recorder::new();
        f.tick(0.0, &mut r, &mut NoStyle);

        let lines = r.polylines();
        assert_eq!(lines.len(), f.grid().cols());
        assert!(lines.iter().all(|l| l.len() == f.grid().rows()));
        assert_eq!(
            r.commands.first(),
            Some(&crate::surface::Command::Clear { x: 0.0, y: 0.0, w: 300.0, h: 200.0 })
        );
    }

    #[test]
    fn tick_publishes_smoothed_pointer() {
        let mut f = field(300.0, 200.0);
        let mut r = Recorder::new();
        f.pointer_move(80.0, 40.0);
        f.tick(0.0, &mut Recorder::new(), &mut r);
        assert_eq!(r.style("--x"), Some(80.0));
        assert_eq!(r.style("--y"), Some(40.0));
    }

    #[test]
    fn resize_resets_spring_state() {
        let mut f = field(300.0, 200.0);
        f.pointer_move(0.0, 100.0);
        f.step(0.0);
        f.pointer_move(300.0, 100.0);
        for t in 1..5 {
            f.step(t as f64 * 16.0);
        }
        assert!(f.grid().points().any(|p| p.cursor != (0.0, 0.0)));

        f.resize(320.0, 240.0).unwrap();
        assert_eq!(f.size(), (320.0, 240.0));
        for p in f.grid().points() {
            assert_eq!((p.cursor, p.velocity), ((0.0, 0.0), (0.0, 0.0)));
            assert_eq!(p.wave, (0.0, 0.0));
        }
    }
}
