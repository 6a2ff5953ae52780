//! Fill colour resolution for the progress ring.
//!
//! The colour bands are recomputed from the progress value and the same
//! threshold numbers the engine classifies with, so a ring fed a bare
//! progress value with no engine behind it still colours correctly.

use crate::models::countdown::{ProgressStyle, RgbaColor, ThresholdConfig};

/// Explicit fill colour first, then the plain normal colour when warning
/// colours are off, otherwise the threshold gradient.
pub fn resolve_fill_color(progress: f64, style: &ProgressStyle) -> RgbaColor {
    if let Some(color) = style.fill_color {
        return color;
    }
    if !style.enable_warning_colors {
        return style.thresholds.normal_color;
    }
    threshold_color(progress, &style.thresholds)
}

/// Piecewise-linear gradient over the critical, warning and normal stops.
pub fn threshold_color(progress: f64, thresholds: &ThresholdConfig) -> RgbaColor {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let critical = thresholds.critical_threshold;
    let warning = thresholds.warning_threshold;

    if progress <= critical {
        thresholds.critical_color
    } else if progress <= warning {
        let t = (progress - critical) / (warning - critical);
        thresholds
            .critical_color
            .lerp(thresholds.warning_color, t as f32)
    } else {
        let t = (progress - warning) / (1.0 - warning);
        thresholds.warning_color.lerp(thresholds.normal_color, t as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ProgressStyle {
        ProgressStyle::default()
    }

    #[test]
    fn override_wins() {
        let mut style = style();
        style.fill_color = Some(RgbaColor::opaque(9, 9, 9));
        style.enable_warning_colors = false;
        assert_eq!(resolve_fill_color(0.1, &style), RgbaColor::opaque(9, 9, 9));
    }

    #[test]
    fn disabled_warning_colors_use_normal() {
        let mut style = style();
        style.enable_warning_colors = false;
        assert_eq!(
            resolve_fill_color(0.05, &style),
            style.thresholds.normal_color
        );
    }

    #[test]
    fn stops_at_the_ends() {
        let thresholds = ThresholdConfig::default();
        assert_eq!(threshold_color(1.0, &thresholds), thresholds.normal_color);
        assert_eq!(threshold_color(0.0, &thresholds), thresholds.critical_color);
        assert_eq!(threshold_color(0.1, &thresholds), thresholds.critical_color);
    }

    #[test]
    fn bands_meet_at_the_thresholds() {
        let thresholds = ThresholdConfig::default();
        assert_eq!(threshold_color(0.5, &thresholds), thresholds.warning_color);
        assert_eq!(threshold_color(0.2, &thresholds), thresholds.critical_color);
    }

    #[test]
    fn midpoint_of_warning_band_blends() {
        let thresholds = ThresholdConfig {
            critical_color: RgbaColor::opaque(200, 0, 0),
            warning_color: RgbaColor::opaque(0, 200, 0),
            ..ThresholdConfig::default()
        };
        assert_eq!(
            threshold_color(0.35, &thresholds),
            RgbaColor::opaque(100, 100, 0)
        );
    }

    #[test]
    fn nan_progress_is_treated_as_empty() {
        let thresholds = ThresholdConfig::default();
        assert_eq!(
            threshold_color(f64::NAN, &thresholds),
            thresholds.critical_color
        );
    }
}
