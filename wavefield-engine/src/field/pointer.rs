// pointer.rs - Pointer tracking with a lagged position and speed
//
// Raw position arrives per input event; everything else advances once per
// frame with a fixed low-pass factor.

use crate::config::FieldConfig;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    // Raw, surface-local
    pub x: f64,
    pub y: f64,

    // Smoothed
    pub sx: f64,
    pub sy: f64,

    // Previous frame
    pub lx: f64,
    pub ly: f64,

    pub v: f64,  // raw speed, px per frame
    pub vs: f64, // smoothed speed, capped
    pub a: f64,  // motion angle, radians

    set: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the first input sample has been seen.
    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Record a raw sample. The first sample also seeds the smoothed
    /// position so the lagged pointer does not sweep in from the origin.
    ///
    /// The previous-frame position (`lx`, `ly`) is deliberately left at the
    /// origin, so the first frame after the first sample measures motion
    /// from (0, 0) and gives the field an initial push.
    pub fn set_raw(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;

        if !self.set {
            self.sx = x;
            self.sy = y;
            self.set = true;
        }
    }

    /// Advance the filters by one frame.
    pub fn update(&mut self, config: &FieldConfig) {
        let k = config.smoothing;

        self.sx += (self.x - self.sx) * k;
        self.sy += (self.y - self.sy) * k;

        let dx = self.x - self.lx;
        let dy = self.y - self.ly;
        let d = dx.hypot(dy);

        self.v = d;
        self.vs += (d - self.vs) * k;
        self.vs = self.vs.min(config.max_speed);

        self.lx = self.x;
        self.ly = self.y;

        self.a = dy.atan2(dx);
    }

    /// Influence radius for the current smoothed speed.
    #[inline]
    pub fn radius(&self, config: &FieldConfig) -> f64 {
        config.min_radius.max(self.vs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_measures_from_origin() {
        let mut p = PointerState::new();
        p.set_raw(30.0, 40.0);
        p.update(&FieldConfig::default());
        assert_eq!(p.v, 50.0);
        assert!((p.vs - 5.0).abs() < 1e-12);
    }

    #[test]
    fn first_sample_seeds_smoothed_position() {
        let mut p = PointerState::new();
        p.set_raw(50.0, 50.0);
        assert_eq!((p.sx, p.sy), (50.0, 50.0));
        assert!(p.is_set());

        p.update(&FieldConfig::default());
        assert_eq!((p.sx, p.sy), (50.0, 50.0));
        assert_eq!((p.lx, p.ly), (50.0, 50.0));

        // Second sample is filtered, not copied
        p.set_raw(150.0, 50.0);
        assert_eq!(p.sx, 50.0);
    }

    #[test]
    fn later_samples_are_smoothed() {
        let config = FieldConfig::default();
        let mut p = PointerState::new();
        p.set_raw(0.0, 0.0);
        p.set_raw(100.0, 0.0);
        assert_eq!(p.sx, 0.0);

        p.update(&config);
        assert!((p.sx - 10.0).abs() < 1e-12);
        assert_eq!(p.v, 100.0);
        assert!((p.vs - 10.0).abs() < 1e-12);
        assert_eq!(p.a, 0.0);
        assert_eq!(p.lx, 100.0);
    }

    #[test]
    fn speed_is_capped() {
        let config = FieldConfig::default();
        let mut p = PointerState::new();
        p.set_raw(0.0, 0.0);
        for i in 1..200 {
            let x = if i % 2 == 0 { 0.0 } else { 5000.0 };
            p.set_raw(x, 0.0);
            p.update(&config);
            assert!(p.vs <= config.max_speed);
        }
        assert_eq!(p.vs, config.max_speed);
    }

    #[test]
    fn radius_floor() {
        let config = FieldConfig::default();
        let mut p = PointerState::new();
        assert_eq!(p.radius(&config), 175.0);
        p.vs = 100.0;
        assert_eq!(p.radius(&config), 175.0);
    }

    #[test]
    fn angle_follows_raw_motion() {
        let config = FieldConfig::default();
        let mut p = PointerState::new();
        p.set_raw(10.0, 10.0);
        p.update(&config);
        p.set_raw(10.0, 30.0);
        p.update(&config);
        assert!((p.a - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
