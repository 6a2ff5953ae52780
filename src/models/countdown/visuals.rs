use serde::{Deserialize, Serialize};

use super::CountdownError;

pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.5;
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Linear blend towards `target`; `t` is clamped to [0, 1].
    pub fn lerp(self, target: RgbaColor, t: f32) -> RgbaColor {
        let weight = t.clamp(0.0, 1.0);
        let mix = |start: u8, end: u8| -> u8 {
            let start_f = start as f32;
            let end_f = end as f32;
            ((start_f + (end_f - start_f) * weight).round()).clamp(0.0, 255.0) as u8
        };
        RgbaColor::new(
            mix(self.r, target.r),
            mix(self.g, target.g),
            mix(self.b, target.b),
            mix(self.a, target.a),
        )
    }

    /// Same colour with its alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> RgbaColor {
        let alpha = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        RgbaColor::new(self.r, self.g, self.b, alpha)
    }
}

impl Default for RgbaColor {
    fn default() -> Self {
        RgbaColor::new(0, 0, 0, 255)
    }
}

/// Threshold fractions shared by the engine's warning classification and
/// the ring's colour bands, plus the colour of each band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThresholdConfig {
    pub warning_threshold: f64,
    pub critical_threshold: f64,
    pub normal_color: RgbaColor,
    pub warning_color: RgbaColor,
    pub critical_color: RgbaColor,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            normal_color: default_normal_color(),
            warning_color: default_warning_color(),
            critical_color: default_critical_color(),
        }
    }
}

impl ThresholdConfig {
    pub fn with_levels(warning_threshold: f64, critical_threshold: f64) -> Self {
        Self {
            warning_threshold,
            critical_threshold,
            ..Self::default()
        }
    }

    /// Requires `0 < critical < warning <= 1`.
    pub fn validate(&self) -> Result<(), CountdownError> {
        for (name, value) in [
            ("warning", self.warning_threshold),
            ("critical", self.critical_threshold),
        ] {
            if value.is_nan() || value <= 0.0 || value > 1.0 {
                return Err(CountdownError::InvalidThreshold { name, value });
            }
        }

        if self.critical_threshold >= self.warning_threshold {
            return Err(CountdownError::ThresholdOrder {
                warning: self.warning_threshold,
                critical: self.critical_threshold,
            });
        }

        Ok(())
    }
}

/// Which way the progress sector sweeps from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl SweepDirection {
    pub fn sign(self) -> f32 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

/// Colours and stroke settings for the progress ring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProgressStyle {
    pub circle_color: RgbaColor,
    pub tick_color: RgbaColor,
    pub text_color: RgbaColor,
    /// Overrides every other fill colour rule when set
    pub fill_color: Option<RgbaColor>,
    pub enable_warning_colors: bool,
    pub thresholds: ThresholdConfig,
    pub stroke_width: f32,
    /// Falls back to a fifth of the ring size
    pub label_font_size: Option<f32>,
    pub glow_blur: f32,
}

impl Default for ProgressStyle {
    fn default() -> Self {
        Self {
            circle_color: RgbaColor::opaque(224, 224, 224),
            tick_color: RgbaColor::opaque(158, 158, 158),
            text_color: RgbaColor::opaque(33, 33, 33),
            fill_color: None,
            enable_warning_colors: true,
            thresholds: ThresholdConfig::default(),
            stroke_width: 8.0,
            label_font_size: None,
            glow_blur: 8.0,
        }
    }
}

const fn default_normal_color() -> RgbaColor {
    RgbaColor::opaque(76, 175, 80)
}

const fn default_warning_color() -> RgbaColor {
    RgbaColor::opaque(255, 152, 0)
}

const fn default_critical_color() -> RgbaColor {
    RgbaColor::opaque(244, 67, 54)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_valid() {
        assert!(ThresholdConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let err = ThresholdConfig::with_levels(0.2, 0.5).validate().unwrap_err();
        assert!(matches!(err, CountdownError::ThresholdOrder { .. }));
    }

    #[test]
    fn rejects_equal_thresholds() {
        assert!(ThresholdConfig::with_levels(0.4, 0.4).validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        assert_eq!(
            ThresholdConfig::with_levels(1.5, 0.2).validate(),
            Err(CountdownError::InvalidThreshold {
                name: "warning",
                value: 1.5
            })
        );
        assert!(ThresholdConfig::with_levels(0.5, 0.0).validate().is_err());
        assert!(ThresholdConfig::with_levels(0.5, f64::NAN).validate().is_err());
    }

    #[test]
    fn warning_threshold_of_one_is_allowed() {
        assert!(ThresholdConfig::with_levels(1.0, 0.3).validate().is_ok());
    }

    #[test]
    fn lerp_endpoints() {
        let a = RgbaColor::new(0, 100, 200, 255);
        let b = RgbaColor::new(200, 0, 100, 55);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), RgbaColor::new(100, 50, 150, 155));
    }

    #[test]
    fn with_opacity_scales_alpha() {
        let color = RgbaColor::new(10, 20, 30, 200);
        assert_eq!(color.with_opacity(0.5).a, 100);
        assert_eq!(color.with_opacity(2.0).a, 200);
    }
}
