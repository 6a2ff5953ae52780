// Test fixtures - reusable countdowns and render requests
// Shared by the integration test files

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration as StdDuration, Instant};

use chrono::Duration;
use countdown_ring::models::countdown::WarningLevel;
use countdown_ring::services::countdown::CountdownEngine;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn after(start: Instant, seconds: u64) -> Instant {
    start + StdDuration::from_secs(seconds)
}

/// Everything the engine reported, recorded in firing order.
#[derive(Debug, Default)]
pub struct Recorded {
    pub ticks: Cell<u32>,
    pub tick_times: RefCell<Vec<i64>>,
    pub warnings: Cell<u32>,
    pub criticals: Cell<u32>,
    pub expirations: Cell<u32>,
    pub notifications: Cell<u32>,
    pub levels: RefCell<Vec<WarningLevel>>,
}

/// Sample countdowns for testing
pub mod engines {
    use super::*;

    /// Engine with every callback and one listener wired to a recorder.
    pub fn recorded(seconds: i64) -> (CountdownEngine, Rc<Recorded>) {
        recorded_with_levels(seconds, 0.5, 0.2)
    }

    pub fn recorded_with_levels(
        seconds: i64,
        warning: f64,
        critical: f64,
    ) -> (CountdownEngine, Rc<Recorded>) {
        init_logging();
        let recorded = Rc::new(Recorded::default());
        let mut engine = CountdownEngine::with_levels(Duration::seconds(seconds), warning, critical)
            .expect("valid fixture thresholds");

        let r = Rc::clone(&recorded);
        engine.on_tick(move || r.ticks.set(r.ticks.get() + 1));
        let r = Rc::clone(&recorded);
        engine.on_tick_with_time(move |remaining| {
            r.tick_times.borrow_mut().push(remaining.num_seconds())
        });
        let r = Rc::clone(&recorded);
        engine.on_warning(move || r.warnings.set(r.warnings.get() + 1));
        let r = Rc::clone(&recorded);
        engine.on_critical(move || r.criticals.set(r.criticals.get() + 1));
        let r = Rc::clone(&recorded);
        engine.on_expired(move || r.expirations.set(r.expirations.get() + 1));
        let r = Rc::clone(&recorded);
        engine.subscribe(move |snapshot| {
            r.notifications.set(r.notifications.get() + 1);
            r.levels.borrow_mut().push(snapshot.warning_level);
        });

        (engine, recorded)
    }
}
