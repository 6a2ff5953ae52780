use chrono::Duration;

/// Countdowns shorter than a minute show bare seconds; longer ones show
/// zero-padded `MM:SS`.
pub fn format_remaining(remaining: Duration, total: Duration) -> String {
    let seconds = remaining.num_seconds().max(0);
    if total.num_seconds() < 60 {
        seconds.to_string()
    } else {
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}
