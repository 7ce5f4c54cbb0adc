// config.rs - Tuning constants for the wave field
//
// Defaults reproduce the hand-tuned look at ~60 Hz. The per-frame factors
// are not scaled by elapsed time, so a faster display animates faster.

use serde::Deserialize;

use crate::error::{FieldError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    // Grid layout
    pub x_gap: f64,
    pub y_gap: f64,
    pub margin_x: f64, // total horizontal overscan
    pub margin_y: f64, // total vertical overscan

    // Noise drift
    pub noise_scale_x: f64,
    pub noise_scale_y: f64,
    pub noise_speed_x: f64,
    pub noise_speed_y: f64,
    pub noise_amplitude: f64,
    pub wave_radius_x: f64,
    pub wave_radius_y: f64,

    // Pointer filter
    pub smoothing: f64,
    pub max_speed: f64,

    // Cursor spring
    pub min_radius: f64,
    pub ripple: f64,
    pub impulse: f64,
    pub tension: f64,
    pub damping: f64,
    pub velocity_gain: f64,
    pub max_offset: f64,

    pub stroke_color: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            x_gap: 10.0,
            y_gap: 32.0,
            margin_x: 200.0,
            margin_y: 30.0,

            noise_scale_x: 0.002,
            noise_scale_y: 0.0015,
            noise_speed_x: 0.0125,
            noise_speed_y: 0.005,
            noise_amplitude: 12.0,
            wave_radius_x: 32.0,
            wave_radius_y: 16.0,

            smoothing: 0.1,
            max_speed: 100.0,

            min_radius: 175.0,
            ripple: 0.001,
            impulse: 0.00065,
            tension: 0.005,
            damping: 0.925,
            velocity_gain: 2.0,
            max_offset: 100.0,

            stroke_color: "#160000".to_string(),
        }
    }
}

impl FieldConfig {
    /// Parse a JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FieldConfig =
            serde_json::from_str(json).map_err(|e| FieldError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("x_gap", self.x_gap),
            ("y_gap", self.y_gap),
            ("min_radius", self.min_radius),
            ("max_offset", self.max_offset),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(FieldError::InvalidConfig(format!("{name} must be > 0, got {value}")));
            }
        }
        let unit = [
            ("smoothing", self.smoothing),
            ("damping", self.damping),
            ("tension", self.tension),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(FieldError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        let non_negative = [
            ("max_speed", self.max_speed),
            ("impulse", self.impulse),
            ("velocity_gain", self.velocity_gain),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FieldError::InvalidConfig(format!("{name} must be >= 0, got {value}")));
            }
        }
        if self.margin_x < 0.0 || self.margin_y < 0.0 {
            return Err(FieldError::InvalidConfig("margins must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FieldConfig::from_json(r##"{ "x_gap": 20, "stroke_color": "#fff" }"##).unwrap();
        assert_eq!(config.x_gap, 20.0);
        assert_eq!(config.stroke_color, "#fff");
        assert_eq!(config.y_gap, 32.0);
        assert_eq!(config.damping, 0.925);
    }

    #[test]
    fn zero_gap_is_rejected() {
        let err = FieldConfig::from_json(r#"{ "y_gap": 0 }"#).unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));
    }

    #[test]
    fn unstable_spring_is_rejected() {
        for json in [
            r#"{ "damping": -3 }"#,
            r#"{ "damping": 1.5 }"#,
            r#"{ "tension": 50 }"#,
            r#"{ "max_speed": -1 }"#,
            r#"{ "impulse": -0.1 }"#,
        ] {
            assert!(
                matches!(FieldConfig::from_json(json), Err(FieldError::InvalidConfig(_))),
                "{json} accepted"
            );
        }
        assert!(FieldConfig::from_json(r#"{ "damping": 1, "tension": 0, "max_speed": 0 }"#).is_ok());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            FieldConfig::from_json("{ nope"),
            Err(FieldError::InvalidConfig(_))
        ));
    }
}
