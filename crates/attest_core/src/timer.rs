//! Virtual-clock timer queue
//!
//! Every timed behavior (text rotation, typing, caret blink, the simulated
//! form submission) schedules onto a [`Scheduler`]. The host advances the
//! clock, either from real frame deltas or from a test, and due timers fire
//! in due-time order.
//!
//! Timers are scoped resources: scheduling returns a [`TimerGuard`] and
//! dropping the guard cancels the timer. Widgets keep their guards next to
//! their state, so unmounting a widget cancels everything it scheduled.

use crate::sync::lock;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, Weak};

new_key_type! {
    /// Identifier of a scheduled timer
    pub struct TimerId;
}

/// What a timer wants after it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reschedule {
    /// Fire again after this many milliseconds
    After(u64),
    /// Remove the timer
    Done,
}

/// Timer callback; receives the virtual time at which it fired
pub type TimerCallback = Box<dyn FnMut(u64) -> Reschedule + Send>;

struct TimerEntry {
    due_ms: u64,
    /// Tie-breaker so timers due at the same instant fire in schedule order
    seq: u64,
    /// Taken out while the callback runs
    callback: Option<TimerCallback>,
}

#[derive(Default)]
struct TimerQueue {
    timers: SlotMap<TimerId, TimerEntry>,
    now_ms: u64,
    next_seq: u64,
    fired_total: u64,
}

impl TimerQueue {
    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn insert(&mut self, delay_ms: u64, callback: TimerCallback) -> TimerId {
        let seq = self.bump_seq();
        self.timers.insert(TimerEntry {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            callback: Some(callback),
        })
    }

    fn next_due(&self, until_ms: u64) -> Option<TimerId> {
        self.timers
            .iter()
            .filter(|(_, e)| e.callback.is_some() && e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(id, _)| id)
    }
}

/// Owner of the virtual clock
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Arc<Mutex<TimerQueue>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A weak handle for widgets to schedule with
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        lock(&self.inner).now_ms
    }

    /// Number of live timers
    pub fn pending(&self) -> usize {
        lock(&self.inner).timers.len()
    }

    /// Total callbacks fired since creation
    pub fn fired_total(&self) -> u64 {
        lock(&self.inner).fired_total
    }

    /// Advance the clock by `ms`, firing every timer that comes due
    ///
    /// Callbacks run with the queue unlocked, so they may schedule or cancel
    /// timers. A timer rescheduled inside the window fires again within the
    /// same call if its new due time is still reached. Returns the number
    /// of callbacks fired.
    pub fn advance(&self, ms: u64) -> usize {
        let until_ms = lock(&self.inner).now_ms.saturating_add(ms);
        let mut fired = 0;

        loop {
            let (id, due_ms, mut callback) = {
                let mut queue = lock(&self.inner);
                let Some(id) = queue.next_due(until_ms) else {
                    queue.now_ms = until_ms;
                    break;
                };
                let entry = &mut queue.timers[id];
                let due_ms = entry.due_ms;
                let Some(callback) = entry.callback.take() else {
                    continue;
                };
                queue.now_ms = due_ms;
                (id, due_ms, callback)
            };

            let next = callback(due_ms);
            fired += 1;

            let mut queue = lock(&self.inner);
            queue.fired_total += 1;
            match next {
                Reschedule::After(delay_ms) => {
                    let seq = queue.bump_seq();
                    // Cancelled during its own callback: the entry is gone
                    if let Some(entry) = queue.timers.get_mut(id) {
                        entry.due_ms = due_ms.saturating_add(delay_ms.max(1));
                        entry.seq = seq;
                        entry.callback = Some(callback);
                    }
                }
                Reschedule::Done => {
                    queue.timers.remove(id);
                }
            }
        }

        if fired > 0 {
            tracing::trace!(fired, now_ms = until_ms, "timers advanced");
        }
        fired
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = lock(&self.inner);
        f.debug_struct("Scheduler")
            .field("now_ms", &queue.now_ms)
            .field("pending", &queue.timers.len())
            .finish()
    }
}

/// Weak handle to a [`Scheduler`]
///
/// Scheduling through a handle whose scheduler is gone returns `None`;
/// callers treat that as "no animation" and render their static state.
#[derive(Clone, Default)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<TimerQueue>>,
}

impl SchedulerHandle {
    /// A handle that never schedules anything
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn now_ms(&self) -> Option<u64> {
        self.inner.upgrade().map(|q| lock(&q).now_ms)
    }

    /// Schedule `callback` to fire after `delay_ms`; its return value
    /// decides whether and when it fires again
    #[must_use = "the timer is cancelled when the guard is dropped"]
    pub fn schedule<F>(&self, delay_ms: u64, callback: F) -> Option<TimerGuard>
    where
        F: FnMut(u64) -> Reschedule + Send + 'static,
    {
        let queue = self.inner.upgrade()?;
        let id = lock(&queue).insert(delay_ms, Box::new(callback));
        Some(TimerGuard {
            id,
            queue: self.inner.clone(),
        })
    }

    /// Fire `callback` once after `delay_ms`
    #[must_use = "the timer is cancelled when the guard is dropped"]
    pub fn once<F>(&self, delay_ms: u64, callback: F) -> Option<TimerGuard>
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let mut callback = Some(callback);
        self.schedule(delay_ms, move |now| {
            if let Some(callback) = callback.take() {
                callback(now);
            }
            Reschedule::Done
        })
    }

    /// Fire `callback` every `period_ms` (at least 1 ms)
    #[must_use = "the timer is cancelled when the guard is dropped"]
    pub fn interval<F>(&self, period_ms: u64, mut callback: F) -> Option<TimerGuard>
    where
        F: FnMut(u64) + Send + 'static,
    {
        let period_ms = period_ms.max(1);
        self.schedule(period_ms, move |now| {
            callback(now);
            Reschedule::After(period_ms)
        })
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Cancels its timer when dropped
pub struct TimerGuard {
    id: TimerId,
    queue: Weak<Mutex<TimerQueue>>,
}

impl TimerGuard {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the timer is still scheduled
    pub fn is_active(&self) -> bool {
        self.queue
            .upgrade()
            .map(|q| lock(&q).timers.contains_key(self.id))
            .unwrap_or(false)
    }

    /// Cancel explicitly (same as dropping)
    pub fn cancel(self) {}
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            lock(&queue).timers.remove(self.id);
        }
    }
}

impl std::fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerGuard").field("id", &self.id).finish()
    }
}
