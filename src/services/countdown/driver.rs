//! Tokio task that keeps a shared [`CountdownEngine`] ticking.
//!
//! Hosts built around an immediate-mode UI usually just call
//! [`CountdownEngine::poll`] each frame and use
//! [`CountdownEngine::time_until_next_tick`] to schedule the next repaint.
//! Hosts running on a tokio `LocalSet` can hand the engine to a driver
//! instead.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::engine::{CountdownEngine, TICK_INTERVAL};

/// Owns the background tick task; dropping it aborts the task.
///
/// Callbacks run while the driver holds a mutable borrow of the engine,
/// so they must not borrow the engine themselves.
#[derive(Debug)]
pub struct TickDriver {
    handle: JoinHandle<()>,
}

impl TickDriver {
    /// Spawn the tick loop on the current `LocalSet`.
    ///
    /// The loop sleeps until the engine's next tick deadline, or one tick
    /// interval while nothing is scheduled, then polls. It only holds a weak
    /// reference, so the task ends once the host drops its last handle to
    /// the engine.
    pub fn spawn_local(engine: &Rc<RefCell<CountdownEngine>>) -> Self {
        let engine = Rc::downgrade(engine);
        let handle = tokio::task::spawn_local(async move {
            while let Some(wait) = next_wait(&engine) {
                tokio::time::sleep(wait).await;

                let Some(engine) = engine.upgrade() else {
                    break;
                };
                let fired = engine.borrow_mut().poll_at(Instant::now().into_std());
                if fired > 0 {
                    log::trace!("tick driver fired {} tick(s)", fired);
                }
            }
            log::debug!("tick driver exiting: countdown released");
        });

        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

fn next_wait(engine: &Weak<RefCell<CountdownEngine>>) -> Option<std::time::Duration> {
    let engine = engine.upgrade()?;
    let wait = engine
        .borrow()
        .time_until_next_tick(Instant::now().into_std())
        .unwrap_or(TICK_INTERVAL);
    Some(wait)
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.handle.abort();
        log::debug!("tick driver released");
    }
}
