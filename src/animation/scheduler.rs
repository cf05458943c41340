//! Deferred-task scheduling for connector reveals.
//!
//! Everything runs on the GLib main context; tasks are plain `FnOnce`
//! closures and never cross threads.

use std::time::{Duration, Instant};

/// A task queued to run once after a delay.
pub type DeferredTask = Box<dyn FnOnce() + 'static>;

/// Timer queue the animator submits its staggered callbacks to.
pub trait Scheduler {
    /// Current time on the scheduler's clock.
    fn now(&self) -> Instant;

    /// Run `task` once, `delay` from now. Fire-and-forget: there is no handle
    /// to cancel it, callers guard stale work themselves.
    fn schedule(&self, delay: Duration, task: DeferredTask);
}

/// Schedules on the thread-default GLib main context.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlibScheduler;

impl Scheduler for GlibScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule(&self, delay: Duration, task: DeferredTask) {
        glib::timeout_add_local_once(delay, task);
    }
}

/// Virtual-clock scheduler: time only moves when `advance` is called.
#[cfg(test)]
pub struct ManualScheduler {
    now: std::cell::Cell<Instant>,
    next_seq: std::cell::Cell<u64>,
    pending: std::cell::RefCell<Vec<(Instant, u64, DeferredTask)>>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            now: std::cell::Cell::new(Instant::now()),
            next_seq: std::cell::Cell::new(0),
            pending: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Delays of every queued task, relative to the current virtual time,
    /// in submission order.
    pub fn pending_delays(&self) -> Vec<Duration> {
        let now = self.now.get();
        let mut pending: Vec<(u64, Duration)> = self
            .pending
            .borrow()
            .iter()
            .map(|(due, seq, _)| (*seq, due.saturating_duration_since(now)))
            .collect();
        pending.sort_by_key(|(seq, _)| *seq);
        pending.into_iter().map(|(_, delay)| delay).collect()
    }

    /// Move the clock forward, running due tasks in deadline order. Tasks
    /// scheduled by a running task are honoured if they fall due in the
    /// window.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let due = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, seq, _))| (*at, *seq))
                    .map(|(i, _)| i);
                due.map(|i| pending.remove(i))
            };
            let Some((at, _, task)) = next else {
                break;
            };
            if at > self.now.get() {
                self.now.set(at);
            }
            task();
        }
        self.now.set(target);
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn schedule(&self, delay: Duration, task: DeferredTask) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.pending
            .borrow_mut()
            .push((self.now.get() + delay, seq, task));
    }
}
