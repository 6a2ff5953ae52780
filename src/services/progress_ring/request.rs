use serde::{Deserialize, Serialize};

use crate::models::countdown::{CountdownSnapshot, ProgressStyle, SweepDirection, WarningLevel};

/// Everything the ring needs for one frame. Built fresh by the host each
/// frame and discarded after rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Remaining fraction in [0, 1]; out-of-range values are clamped
    pub progress: f64,
    pub direction: SweepDirection,
    pub is_active: bool,
    /// Externally driven 0..1 oscillation feeding the glow opacity
    pub animation_value: f32,
    pub warning_level: WarningLevel,
    pub label: Option<String>,
    /// Edge length of the square the ring is drawn into
    pub size: f32,
    pub style: ProgressStyle,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            progress: 1.0,
            direction: SweepDirection::Clockwise,
            is_active: false,
            animation_value: 0.0,
            warning_level: WarningLevel::Normal,
            label: None,
            size: 200.0,
            style: ProgressStyle::default(),
        }
    }
}

impl RenderRequest {
    /// Request for a bare progress value, with no live countdown behind it.
    pub fn for_progress(progress: f64) -> Self {
        Self {
            progress,
            ..Self::default()
        }
    }

    /// Request mirroring a countdown, labelled with its formatted time.
    pub fn from_snapshot(snapshot: &CountdownSnapshot, style: ProgressStyle) -> Self {
        Self {
            progress: snapshot.progress,
            is_active: snapshot.is_active(),
            warning_level: snapshot.warning_level,
            label: Some(snapshot.formatted_time.clone()),
            style,
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: SweepDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_animation_value(mut self, animation_value: f32) -> Self {
        self.animation_value = animation_value;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Whether `next` needs a repaint after `previous`. Only the fields that
/// change frame to frame are compared; style and size changes are left to
/// the host.
pub fn should_repaint(previous: &RenderRequest, next: &RenderRequest) -> bool {
    previous.progress != next.progress
        || previous.is_active != next.is_active
        || previous.warning_level != next.warning_level
        || previous.animation_value != next.animation_value
        || previous.label != next.label
        || previous.direction != next.direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::countdown::{CountdownPhase, RgbaColor};

    #[test]
    fn identical_requests_skip_repaint() {
        let request = RenderRequest::for_progress(0.4).with_label("12");
        assert!(!should_repaint(&request, &request.clone()));
    }

    #[test]
    fn style_only_change_skips_repaint() {
        let previous = RenderRequest::for_progress(0.4);
        let mut next = previous.clone();
        next.style.circle_color = RgbaColor::opaque(1, 2, 3);
        next.size = 320.0;
        assert!(!should_repaint(&previous, &next));
    }

    #[test]
    fn each_compared_field_forces_repaint() {
        let base = RenderRequest::for_progress(0.4);
        let variants = [
            RenderRequest { progress: 0.39, ..base.clone() },
            RenderRequest { is_active: true, ..base.clone() },
            RenderRequest { warning_level: WarningLevel::Warning, ..base.clone() },
            RenderRequest { animation_value: 0.5, ..base.clone() },
            RenderRequest { label: Some("9".into()), ..base.clone() },
            RenderRequest { direction: SweepDirection::CounterClockwise, ..base.clone() },
        ];
        for next in &variants {
            assert!(should_repaint(&base, next), "{next:?}");
        }
    }

    #[test]
    fn from_snapshot_copies_countdown_state() {
        let snapshot = CountdownSnapshot {
            total_seconds: 150,
            remaining_seconds: 30,
            phase: CountdownPhase::Running,
            warning_level: WarningLevel::Critical,
            progress: 0.2,
            formatted_time: "00:30".to_string(),
        };
        let request = RenderRequest::from_snapshot(&snapshot, ProgressStyle::default());
        assert_eq!(request.progress, 0.2);
        assert!(request.is_active);
        assert_eq!(request.warning_level, WarningLevel::Critical);
        assert_eq!(request.label.as_deref(), Some("00:30"));
    }
}
