//! Countdown state types shared by the engine and the progress ring.
//!
//! The engine owns the mutable state; everything here is a plain value
//! that can be copied into a render request or handed to listeners.

mod visuals;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use visuals::{
    ProgressStyle, RgbaColor, SweepDirection, ThresholdConfig, DEFAULT_CRITICAL_THRESHOLD,
    DEFAULT_WARNING_THRESHOLD,
};

/// Urgency band derived from the remaining fraction of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WarningLevel {
    /// Progress above the warning threshold
    #[default]
    Normal,
    /// Progress at or below the warning threshold
    Warning,
    /// Progress at or below the critical threshold
    Critical,
}

impl WarningLevel {
    /// Classify a progress fraction. Boundary values belong to the more
    /// severe band.
    pub fn classify(progress: f64, thresholds: &ThresholdConfig) -> Self {
        if progress <= thresholds.critical_threshold {
            Self::Critical
        } else if progress <= thresholds.warning_threshold {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CountdownPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
    Expired,
}

/// Point-in-time view of a countdown, handed to listeners after every
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    pub phase: CountdownPhase,
    pub warning_level: WarningLevel,
    pub progress: f64,
    pub formatted_time: String,
}

impl CountdownSnapshot {
    pub fn is_active(&self) -> bool {
        self.phase == CountdownPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == CountdownPhase::Paused
    }
}

/// Configuration errors rejected when a countdown is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CountdownError {
    #[error("countdown duration must be positive, got {seconds}s")]
    NonPositiveDuration { seconds: i64 },
    #[error("countdown duration of {seconds}s is out of range")]
    DurationOutOfRange { seconds: i64 },
    #[error("{name} threshold must be in (0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("critical threshold {critical} must be below warning threshold {warning}")]
    ThresholdOrder { warning: f64, critical: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_inclusive_bounds() {
        let thresholds = ThresholdConfig::default();
        assert_eq!(WarningLevel::classify(1.0, &thresholds), WarningLevel::Normal);
        assert_eq!(WarningLevel::classify(0.51, &thresholds), WarningLevel::Normal);
        assert_eq!(WarningLevel::classify(0.5, &thresholds), WarningLevel::Warning);
        assert_eq!(WarningLevel::classify(0.21, &thresholds), WarningLevel::Warning);
        assert_eq!(WarningLevel::classify(0.2, &thresholds), WarningLevel::Critical);
        assert_eq!(WarningLevel::classify(0.0, &thresholds), WarningLevel::Critical);
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = CountdownError::ThresholdOrder {
            warning: 0.3,
            critical: 0.4,
        };
        assert_eq!(
            err.to_string(),
            "critical threshold 0.4 must be below warning threshold 0.3"
        );
    }
}
