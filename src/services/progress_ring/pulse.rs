/// Triangle wave in [0, 1] for the glow animation: rises from 0 to 1 over
/// half a period and falls back over the other half.
///
/// Hosts usually feed it the frame time, e.g. `ctx.input(|i| i.time)`.
pub fn pulse_phase(time_seconds: f64, period_seconds: f64) -> f32 {
    if period_seconds <= 0.0 || !time_seconds.is_finite() {
        return 0.0;
    }

    let cycle = (time_seconds / period_seconds).rem_euclid(1.0);
    let phase = if cycle < 0.5 {
        cycle * 2.0
    } else {
        2.0 - cycle * 2.0
    };
    phase as f32
}
