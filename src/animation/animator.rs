//! Staggered stroke reveal for row connectors.
//!
//! Each row widget owns a [`ConnectorSlot`]. Binding a row installs a fresh
//! path in the slot and asks the [`ConnectorAnimator`] to reveal it: the
//! stroke stays hidden for `unit * (position + 1)`, then draws on linearly
//! over one more `unit`. Callbacks carry the slot generation they were issued
//! for, so a row recycled before its delay elapses is never touched by the
//! previous binding's timers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::scheduler::Scheduler;
use crate::geometry::ConnectorPath;

/// Stagger step and draw-on duration used when nothing is configured.
pub const DEFAULT_ANIMATION_UNIT: Duration = Duration::from_millis(250);

/// Reveal progress of one connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Nothing drawn yet; waiting for the stagger delay.
    Hidden,
    /// Drawing on, from `started` for `duration`.
    Revealing { started: Instant, duration: Duration },
    /// Fully drawn.
    Revealed,
}

impl RevealState {
    /// Model stroke end: 0 while hidden, 1 as soon as the reveal begins.
    pub fn stroke_end(&self) -> f64 {
        match self {
            RevealState::Hidden => 0.0,
            RevealState::Revealing { .. } | RevealState::Revealed => 1.0,
        }
    }

    /// Presented stroke fraction at `now`, linearly interpolated while
    /// revealing.
    pub fn fraction_at(&self, now: Instant) -> f64 {
        match *self {
            RevealState::Hidden => 0.0,
            RevealState::Revealed => 1.0,
            RevealState::Revealing { started, duration } => {
                if duration.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(started);
                (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
            }
        }
    }

    /// True while the stroke is drawing on and needs a redraw every frame.
    pub fn is_animating(&self) -> bool {
        matches!(self, RevealState::Revealing { .. })
    }
}

type ChangedCallback = Rc<dyn Fn(&RevealState)>;

struct SlotInner {
    generation: u64,
    path: ConnectorPath,
    state: RevealState,
    on_changed: Option<ChangedCallback>,
}

/// Per-row holder for the current connector path and its reveal state.
///
/// Clones share the same slot.
#[derive(Clone)]
pub struct ConnectorSlot {
    inner: Rc<RefCell<SlotInner>>,
}

impl std::fmt::Debug for ConnectorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ConnectorSlot")
            .field("generation", &inner.generation)
            .field("segments", &inner.path.segments().len())
            .field("state", &inner.state)
            .finish()
    }
}

impl Default for ConnectorSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorSlot {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SlotInner {
                generation: 0,
                path: ConnectorPath::empty(),
                state: RevealState::Revealed,
                on_changed: None,
            })),
        }
    }

    /// Register the redraw hook. Called after every state or path change.
    pub fn connect_changed<F>(&self, callback: F)
    where
        F: Fn(&RevealState) + 'static,
    {
        self.inner.borrow_mut().on_changed = Some(Rc::new(callback));
    }

    /// Replace the path for a new binding, starting from `state`. Any
    /// callback scheduled for an earlier binding becomes stale. Returns the
    /// new generation.
    pub fn install(&self, path: ConnectorPath, state: RevealState) -> u64 {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.path = path;
            inner.state = state;
            inner.generation
        };
        self.notify();
        generation
    }

    /// Swap in a path rebuilt for new geometry, keeping the reveal state.
    pub fn replace_geometry(&self, path: ConnectorPath) {
        self.inner.borrow_mut().path = path;
        self.notify();
    }

    /// Clear the slot when its row is unbound.
    pub fn reset(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.path = ConnectorPath::empty();
            inner.state = RevealState::Revealed;
        }
        self.notify();
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    pub fn state(&self) -> RevealState {
        self.inner.borrow().state
    }

    #[cfg(test)]
    pub fn path(&self) -> ConnectorPath {
        self.inner.borrow().path.clone()
    }

    pub fn stroke_end(&self) -> f64 {
        self.state().stroke_end()
    }

    pub fn fraction_at(&self, now: Instant) -> f64 {
        self.state().fraction_at(now)
    }

    /// The part of the path that should be stroked at `now`.
    pub fn visible_path(&self, now: Instant) -> ConnectorPath {
        let fraction = self.fraction_at(now);
        self.inner.borrow().path.trimmed(fraction)
    }

    fn downgrade(&self) -> Weak<RefCell<SlotInner>> {
        Rc::downgrade(&self.inner)
    }

    fn from_weak(weak: &Weak<RefCell<SlotInner>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Apply `state` only if the slot still belongs to `generation`.
    fn transition(&self, generation: u64, state: RevealState) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.generation != generation {
                return false;
            }
            inner.state = state;
        }
        self.notify();
        true
    }

    fn notify(&self) {
        let (callback, state) = {
            let inner = self.inner.borrow();
            (inner.on_changed.clone(), inner.state)
        };
        if let Some(callback) = callback {
            callback(&state);
        }
    }
}

/// Drives connector reveals through a [`Scheduler`].
pub struct ConnectorAnimator<S: Scheduler> {
    scheduler: Rc<S>,
    unit: Duration,
}

impl<S: Scheduler> std::fmt::Debug for ConnectorAnimator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorAnimator")
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler + 'static> ConnectorAnimator<S> {
    pub fn new(scheduler: Rc<S>, unit: Duration) -> Self {
        Self { scheduler, unit }
    }

    /// Delay before row `position` starts drawing. Never zero: the first row
    /// waits one full unit.
    pub fn stagger(&self, position: usize) -> Duration {
        let steps = u32::try_from(position.saturating_add(1)).unwrap_or(u32::MAX);
        self.unit.saturating_mul(steps)
    }

    /// Install `path` in `slot` and reveal it.
    ///
    /// With `animate` off the connector is shown in full immediately and no
    /// timer is queued. Otherwise it is hidden now, starts drawing after
    /// [`stagger`](Self::stagger) and settles one unit later.
    pub fn reveal(&self, slot: &ConnectorSlot, path: ConnectorPath, position: usize, animate: bool) {
        if !animate {
            slot.install(path, RevealState::Revealed);
            return;
        }

        let generation = slot.install(path, RevealState::Hidden);
        let delay = self.stagger(position);
        let unit = self.unit;
        trace!(position, generation, ?delay, "Scheduling connector reveal");

        let weak = slot.downgrade();
        let scheduler = Rc::downgrade(&self.scheduler);
        self.scheduler.schedule(
            delay,
            Box::new(move || {
                let (Some(slot), Some(scheduler)) = (ConnectorSlot::from_weak(&weak), scheduler.upgrade())
                else {
                    return;
                };
                let started = scheduler.now();
                let revealing = RevealState::Revealing {
                    started,
                    duration: unit,
                };
                if !slot.transition(generation, revealing) {
                    debug!(position, generation, "Dropping stale connector reveal");
                    return;
                }

                let weak = slot.downgrade();
                scheduler.schedule(
                    unit,
                    Box::new(move || {
                        if let Some(slot) = ConnectorSlot::from_weak(&weak) {
                            slot.transition(generation, RevealState::Revealed);
                        }
                    }),
                );
            }),
        );
    }
}
