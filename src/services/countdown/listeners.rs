//! Callback slots and state-change listeners for [`CountdownEngine`].
//!
//! Callbacks are single optional slots owned by the host; listeners are
//! any number of passive observers that receive a snapshot after each
//! mutation.
//!
//! [`CountdownEngine`]: super::CountdownEngine

use chrono::Duration;

use crate::models::countdown::CountdownSnapshot;

type Callback = Box<dyn FnMut()>;
type TimeCallback = Box<dyn FnMut(Duration)>;
type Listener = Box<dyn FnMut(&CountdownSnapshot)>;

/// Handle returned by `subscribe`, used to detach a listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub(super) struct CountdownCallbacks {
    pub(super) on_tick: Option<Callback>,
    pub(super) on_tick_with_time: Option<TimeCallback>,
    pub(super) on_warning: Option<Callback>,
    pub(super) on_critical: Option<Callback>,
    pub(super) on_expired: Option<Callback>,
}

impl CountdownCallbacks {
    pub(super) fn fire(slot: &mut Option<Callback>) {
        if let Some(callback) = slot.as_mut() {
            callback();
        }
    }

    pub(super) fn fire_tick(&mut self, remaining: Duration) {
        Self::fire(&mut self.on_tick);
        if let Some(callback) = self.on_tick_with_time.as_mut() {
            callback(remaining);
        }
    }
}

#[derive(Default)]
pub(super) struct ListenerRegistry {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(super) fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(super) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(super) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners run in subscription order.
    pub(super) fn notify(&mut self, snapshot: &CountdownSnapshot) {
        for (_, listener) in &mut self.listeners {
            listener(snapshot);
        }
    }
}
