use std::fmt;
use std::time::{Duration as StdDuration, Instant};

use chrono::Duration;

use super::format::format_remaining;
use super::listeners::{CountdownCallbacks, ListenerId, ListenerRegistry};
use crate::models::countdown::{
    CountdownError, CountdownPhase, CountdownSnapshot, ThresholdConfig, WarningLevel,
};

/// Wall-clock cadence of the countdown tick.
pub const TICK_INTERVAL: StdDuration = StdDuration::from_secs(1);

/// Catching up more ticks than this in a single poll gets logged.
const LATE_TICK_WARN_COUNT: usize = 5;

/// Single-threaded countdown state machine.
///
/// The engine never spawns anything itself. It records the deadline of
/// the next tick and fires due ticks when the host calls [`poll`] (or
/// [`poll_at`] with its own clock). Clearing that deadline is how `pause`,
/// `stop` and `reset` cancel the tick, so no tick from an earlier period
/// can fire after they return.
///
/// [`poll`]: CountdownEngine::poll
/// [`poll_at`]: CountdownEngine::poll_at
pub struct CountdownEngine {
    total: Duration,
    remaining: Duration,
    phase: CountdownPhase,
    warning_level: WarningLevel,
    thresholds: ThresholdConfig,
    next_tick_at: Option<Instant>,
    callbacks: CountdownCallbacks,
    listeners: ListenerRegistry,
}

impl fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("total", &self.total)
            .field("remaining", &self.remaining)
            .field("phase", &self.phase)
            .field("warning_level", &self.warning_level)
            .field("next_tick_at", &self.next_tick_at)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CountdownEngine {
    /// Countdown with the default 0.5 / 0.2 thresholds.
    pub fn new(total: Duration) -> Result<Self, CountdownError> {
        Self::with_thresholds(total, ThresholdConfig::default())
    }

    pub fn with_levels(
        total: Duration,
        warning_threshold: f64,
        critical_threshold: f64,
    ) -> Result<Self, CountdownError> {
        Self::with_thresholds(
            total,
            ThresholdConfig::with_levels(warning_threshold, critical_threshold),
        )
    }

    pub fn with_thresholds(
        total: Duration,
        thresholds: ThresholdConfig,
    ) -> Result<Self, CountdownError> {
        validate_duration(total)?;
        thresholds.validate()?;

        Ok(Self {
            total,
            remaining: total,
            phase: CountdownPhase::Idle,
            warning_level: WarningLevel::Normal,
            thresholds,
            next_tick_at: None,
            callbacks: CountdownCallbacks::default(),
            listeners: ListenerRegistry::default(),
        })
    }

    // ── Readouts ───────────────────────────────────────────────────────

    pub fn total_duration(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn warning_level(&self) -> WarningLevel {
        self.warning_level
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Started and not stopped, paused or not.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, CountdownPhase::Running | CountdownPhase::Paused)
    }

    /// Running and not paused.
    pub fn is_active(&self) -> bool {
        self.phase == CountdownPhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == CountdownPhase::Paused
    }

    /// Remaining fraction of the total, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        let total = self.total.num_milliseconds() as f64;
        let remaining = self.remaining.num_milliseconds() as f64;
        (remaining / total).clamp(0.0, 1.0)
    }

    pub fn formatted_time(&self) -> String {
        format_remaining(self.remaining, self.total)
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            total_seconds: self.total.num_seconds(),
            remaining_seconds: self.remaining.num_seconds(),
            phase: self.phase,
            warning_level: self.warning_level,
            progress: self.progress(),
            formatted_time: self.formatted_time(),
        }
    }

    pub fn next_tick_at(&self) -> Option<Instant> {
        self.next_tick_at
    }

    /// How long a host may sleep before the next tick is due. `None` when
    /// no tick is scheduled.
    pub fn time_until_next_tick(&self, now: Instant) -> Option<StdDuration> {
        self.next_tick_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    // ── Callbacks and listeners ────────────────────────────────────────

    pub fn on_tick(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.on_tick = Some(Box::new(callback));
    }

    pub fn on_tick_with_time(&mut self, callback: impl FnMut(Duration) + 'static) {
        self.callbacks.on_tick_with_time = Some(Box::new(callback));
    }

    pub fn on_warning(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.on_warning = Some(Box::new(callback));
    }

    pub fn on_critical(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.on_critical = Some(Box::new(callback));
    }

    pub fn on_expired(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.on_expired = Some(Box::new(callback));
    }

    pub fn clear_callbacks(&mut self) {
        self.callbacks = CountdownCallbacks::default();
    }

    /// Attach an observer that receives a snapshot after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&CountdownSnapshot) + 'static) -> ListenerId {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Mutators ───────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Starts (or resumes) ticking, with the first tick one interval after
    /// `now`. No-op while already active or once nothing remains.
    pub fn start_at(&mut self, now: Instant) {
        if self.is_active() {
            return;
        }
        if self.remaining <= Duration::zero() {
            log::debug!("countdown start ignored: no time remaining");
            return;
        }

        log::debug!(
            "countdown {:?} -> Running with {}s remaining",
            self.phase,
            self.remaining.num_seconds()
        );
        self.phase = CountdownPhase::Running;
        self.next_tick_at = Some(now + TICK_INTERVAL);
        self.notify();
    }

    pub fn pause(&mut self) {
        if !self.is_active() {
            return;
        }

        log::debug!(
            "countdown paused with {}s remaining",
            self.remaining.num_seconds()
        );
        self.next_tick_at = None;
        self.phase = CountdownPhase::Paused;
        self.notify();
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn resume_at(&mut self, now: Instant) {
        if !self.is_paused() {
            return;
        }
        self.start_at(now);
    }

    /// Cancels the pending tick and leaves `remaining` where it is.
    pub fn stop(&mut self) {
        self.next_tick_at = None;
        if self.is_running() {
            log::debug!(
                "countdown stopped with {}s remaining",
                self.remaining.num_seconds()
            );
            self.phase = CountdownPhase::Stopped;
        }
        self.notify();
    }

    /// Back to idle with a full countdown, optionally with a new total.
    /// A non-positive new total is rejected and nothing changes.
    pub fn reset(&mut self, new_total: Option<Duration>) -> Result<(), CountdownError> {
        if let Some(total) = new_total {
            validate_duration(total)?;
            self.total = total;
        }

        log::debug!("countdown reset to {}s", self.total.num_seconds());
        self.next_tick_at = None;
        self.remaining = self.total;
        self.phase = CountdownPhase::Idle;
        self.warning_level = WarningLevel::Normal;
        self.notify();
        Ok(())
    }

    /// Adds time, capped at twice the total. Run state is untouched.
    pub fn add_time(&mut self, extra: Duration) {
        if extra <= Duration::zero() {
            return;
        }

        let ceiling = self.total.checked_mul(2).unwrap_or(Duration::MAX);
        self.remaining = self
            .remaining
            .checked_add(&extra)
            .map_or(ceiling, |remaining| remaining.min(ceiling));
        self.check_warning_level();
        self.notify();
    }

    /// Removes time; reaching zero expires the countdown immediately.
    pub fn subtract_time(&mut self, amount: Duration) {
        if amount <= Duration::zero() {
            return;
        }

        self.remaining = self
            .remaining
            .checked_sub(&amount)
            .unwrap_or_else(Duration::zero);
        if self.remaining <= Duration::zero() {
            self.remaining = Duration::zero();
            self.expire();
        } else {
            self.check_warning_level();
            self.notify();
        }
    }

    // ── Ticking ────────────────────────────────────────────────────────

    pub fn poll(&mut self) -> usize {
        self.poll_at(Instant::now())
    }

    /// Fires every tick whose deadline is at or before `now`, returning how
    /// many fired. Each tick is rescheduled from its own deadline so a late
    /// host catches up instead of drifting.
    pub fn poll_at(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.next_tick_at {
            if deadline > now {
                break;
            }
            self.next_tick_at = Some(deadline + TICK_INTERVAL);
            self.tick();
            fired += 1;
        }

        if fired > LATE_TICK_WARN_COUNT {
            log::warn!("countdown poll caught up {} late ticks", fired);
        }
        fired
    }

    fn tick(&mut self) {
        if self.remaining > Duration::zero() {
            self.remaining = (self.remaining - Duration::seconds(1)).max(Duration::zero());
            self.check_warning_level();
            self.callbacks.fire_tick(self.remaining);
            self.notify();
        } else {
            self.expire();
        }
    }

    fn expire(&mut self) {
        self.next_tick_at = None;
        let already_expired = self.phase == CountdownPhase::Expired;
        self.phase = CountdownPhase::Expired;
        if !already_expired {
            log::info!(
                "countdown of {}s expired",
                self.total.num_seconds()
            );
            CountdownCallbacks::fire(&mut self.callbacks.on_expired);
        }
        self.notify();
    }

    fn check_warning_level(&mut self) {
        let level = WarningLevel::classify(self.progress(), &self.thresholds);
        if level == self.warning_level {
            return;
        }

        log::debug!("countdown warning level {:?} -> {:?}", self.warning_level, level);
        self.warning_level = level;
        match level {
            WarningLevel::Warning => CountdownCallbacks::fire(&mut self.callbacks.on_warning),
            WarningLevel::Critical => CountdownCallbacks::fire(&mut self.callbacks.on_critical),
            WarningLevel::Normal => {}
        }
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.listeners.notify(&snapshot);
    }
}

/// Only logs a pending tick. The engine owns no timer, so there is nothing
/// to cancel here; a host that hands the engine to a [`TickDriver`] stops
/// ticking by dropping the driver.
///
/// [`TickDriver`]: super::TickDriver
impl Drop for CountdownEngine {
    fn drop(&mut self) {
        if self.next_tick_at.take().is_some() {
            log::debug!("countdown dropped with a tick pending");
        }
    }
}

fn validate_duration(total: Duration) -> Result<(), CountdownError> {
    if total.num_milliseconds() <= 0 {
        return Err(CountdownError::NonPositiveDuration {
            seconds: total.num_seconds(),
        });
    }
    Ok(())
}
