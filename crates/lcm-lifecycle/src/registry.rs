//! Lifecycle registry: driver + published handle.
//!
//! # Design
//!
//! The state machine for one owner is split in two roles:
//!
//! - [`LifecycleRegistry`] is the **driver**. The owning component holds it
//!   exclusively and is the only code that can call [`advance`] or
//!   [`move_to`]. Dropping it walks the machine down to `DESTROYED` (when that
//!   state is reachable), so observers always see `ON_DESTROY`.
//! - [`LifecycleHandle`] is the **published, read-only** side. Anyone may hold
//!   a clone to register observers or read the current state. It keeps only a
//!   weak link to the observer list; after the driver is gone it still reads
//!   the last state that was dispatched.
//!
//! ```text
//!    INITIALIZED ──ON_CREATE──► CREATED ──ON_START──► STARTED ──ON_RESUME──► RESUMED
//!                                 │  ▲                  │  ▲                   │
//!                                 │  └──────ON_STOP─────┘  └──────ON_PAUSE─────┘
//!                            ON_DESTROY
//!                                 ▼
//!                            DESTROYED (term.)
//! ```
//!
//! # Dispatch
//!
//! `advance` updates the state first, then notifies every live observer in
//! registration order on the calling thread. The observer list is snapshotted
//! before the fan-out: observers may register further observers from inside a
//! callback, and those are not part of the in-flight fan-out.
//!
//! The machine is built on `Rc`/`Cell`/`RefCell` and is therefore neither
//! `Send` nor `Sync`. Serialising access across threads is the caller's job.
//!
//! [`advance`]: LifecycleRegistry::advance
//! [`move_to`]: LifecycleRegistry::move_to

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

use crate::error::LifecycleError;
use crate::observer::ObserverRef;
use crate::types::{LifecycleEvent, LifecycleState};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What a late observer sees when it registers after the owner has already
/// moved past `INITIALIZED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatchUpPolicy {
    /// Immediately deliver the up-events from `INITIALIZED` to the current
    /// state, to the new observer only.
    #[default]
    Replay,
    /// Deliver nothing until the next transition.
    Skip,
}

impl CatchUpPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatchUpPolicy::Replay => "replay",
            CatchUpPolicy::Skip => "skip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryOptions {
    pub catch_up: CatchUpPolicy,
    /// Remove dropped observers from the list after a dispatch finds them.
    pub prune_dropped: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            catch_up: CatchUpPolicy::Replay,
            prune_dropped: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Machine (shared between driver and handles)
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Machine {
    owner: String,
    state: Rc<Cell<LifecycleState>>,
    observers: RefCell<Vec<ObserverRef>>,
    options: RegistryOptions,
}

impl Machine {
    fn live_observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|o| o.is_alive())
            .count()
    }
}

// ---------------------------------------------------------------------------
// LifecycleRegistry (driver)
// ---------------------------------------------------------------------------

/// The driver side of one owner's lifecycle state machine.
#[derive(Debug)]
pub struct LifecycleRegistry {
    machine: Rc<Machine>,
}

impl LifecycleRegistry {
    /// Create a machine in `INITIALIZED` with default options.
    ///
    /// `owner` is a label used in log output only.
    pub fn new(owner: impl Into<String>) -> Self {
        Self::with_options(owner, RegistryOptions::default())
    }

    pub fn with_options(owner: impl Into<String>, options: RegistryOptions) -> Self {
        let machine = Machine {
            owner: owner.into(),
            state: Rc::new(Cell::new(LifecycleState::Initialized)),
            observers: RefCell::new(Vec::new()),
            options,
        };
        debug!(owner = %machine.owner, catch_up = options.catch_up.as_str(), "lifecycle registry created");
        Self {
            machine: Rc::new(machine),
        }
    }

    pub fn owner(&self) -> &str {
        &self.machine.owner
    }

    pub fn options(&self) -> RegistryOptions {
        self.machine.options
    }

    pub fn current_state(&self) -> LifecycleState {
        self.machine.state.get()
    }

    /// The read-only side to publish to observers and other callers.
    pub fn handle(&self) -> LifecycleHandle {
        LifecycleHandle {
            machine: Rc::downgrade(&self.machine),
            state: Rc::clone(&self.machine.state),
        }
    }

    /// Apply `event`, then notify observers in registration order.
    ///
    /// # Errors
    /// Returns [`LifecycleError::InvalidTransition`] when `event` has no edge
    /// out of the current state. The state is left unchanged and no observer
    /// is called. Callers **MUST** treat this as fatal.
    pub fn advance(&mut self, event: LifecycleEvent) -> Result<(), LifecycleError> {
        let from = self.machine.state.get();
        let Some(to) = from.next(event) else {
            warn!(owner = %self.machine.owner, %from, %event, "illegal lifecycle transition");
            return Err(LifecycleError::InvalidTransition { from, event });
        };

        self.machine.state.set(to);
        debug!(owner = %self.machine.owner, %from, %event, %to, "lifecycle transition");

        self.dispatch(event);

        if to.is_terminal() {
            let released = self.machine.observers.borrow_mut().drain(..).count();
            debug!(owner = %self.machine.owner, released, "owner destroyed; observers released");
        }

        Ok(())
    }

    /// Walk to `target` one table edge at a time, dispatching every
    /// intermediate event. Returns the events applied, in order.
    ///
    /// # Errors
    /// [`LifecycleError::UnreachableState`] when no path exists (leaving
    /// `DESTROYED`, or returning to `INITIALIZED`). The state is unchanged.
    pub fn move_to(
        &mut self,
        target: LifecycleState,
    ) -> Result<Vec<LifecycleEvent>, LifecycleError> {
        let from = self.machine.state.get();
        let path = from
            .path_to(target)
            .ok_or(LifecycleError::UnreachableState { from, to: target })?;

        for event in &path {
            self.advance(*event)?;
        }

        Ok(path)
    }

    fn dispatch(&self, event: LifecycleEvent) {
        let handle = self.handle();
        let snapshot: Vec<ObserverRef> = self.machine.observers.borrow().clone();

        let mut dropped = 0usize;
        for (index, observer) in snapshot.iter().enumerate() {
            if observer.receive(&handle, event) {
                trace!(owner = %self.machine.owner, %event, index, "observer notified");
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 && self.machine.options.prune_dropped {
            self.machine
                .observers
                .borrow_mut()
                .retain(ObserverRef::is_alive);
            debug!(owner = %self.machine.owner, dropped, "pruned dropped observers");
        }
    }
}

impl Drop for LifecycleRegistry {
    fn drop(&mut self) {
        // Never run observer callbacks while unwinding.
        if std::thread::panicking() {
            return;
        }
        let from = self.machine.state.get();
        if from.is_terminal() {
            return;
        }
        // INITIALIZED has no edge to DESTROYED; nothing was ever dispatched.
        let Some(path) = from.path_to(LifecycleState::Destroyed) else {
            return;
        };
        debug!(owner = %self.machine.owner, %from, steps = path.len(), "driver dropped; destroying");
        for event in path {
            if self.advance(event).is_err() {
                break;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// LifecycleHandle (published, read-only)
// ---------------------------------------------------------------------------

/// Read-only view of an owner's lifecycle. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LifecycleHandle {
    machine: Weak<Machine>,
    state: Rc<Cell<LifecycleState>>,
}

impl LifecycleHandle {
    /// Current state. Once the driver has been dropped this is the last state
    /// it dispatched: `DESTROYED`, or `INITIALIZED` if it was never created.
    pub fn current_state(&self) -> LifecycleState {
        self.state.get()
    }

    /// `false` once the driver has been dropped.
    pub fn is_attached(&self) -> bool {
        self.machine.strong_count() > 0
    }

    /// Registered observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.machine
            .upgrade()
            .map(|m| m.live_observer_count())
            .unwrap_or(0)
    }

    /// Append `observer` to the notification list.
    ///
    /// Returns `true` if the observer was added. Registration is ignored (and
    /// `false` returned) when the owner is destroyed or gone, when the
    /// observer is already dropped, or when the same observer is already
    /// registered: an observer never receives an event twice.
    ///
    /// Under [`CatchUpPolicy::Replay`] the new observer immediately receives
    /// the up-events leading to the current state.
    pub fn register(&self, observer: ObserverRef) -> bool {
        let Some(machine) = self.machine.upgrade() else {
            debug!("registration ignored: lifecycle owner is gone");
            return false;
        };

        let state = machine.state.get();
        if state.is_terminal() {
            debug!(owner = %machine.owner, "registration ignored: owner destroyed");
            return false;
        }
        if !observer.is_alive() {
            return false;
        }

        {
            let mut observers = machine.observers.borrow_mut();
            if observers.iter().any(|o| o.same_observer(&observer)) {
                debug!(owner = %machine.owner, "registration ignored: already registered");
                return false;
            }
            observers.push(observer.clone());
            trace!(owner = %machine.owner, count = observers.len(), "observer registered");
        }

        if machine.options.catch_up == CatchUpPolicy::Replay {
            // Initialized -> current is always an up-path for a live state.
            let replay = LifecycleState::Initialized
                .path_to(state)
                .unwrap_or_default();
            for event in replay {
                if !observer.receive(self, event) {
                    break;
                }
                trace!(owner = %machine.owner, %event, "catch-up delivered");
            }
        }

        true
    }
}

/// A component that publishes its lifecycle.
pub trait LifecycleOwner {
    fn lifecycle(&self) -> LifecycleHandle;
}

impl LifecycleOwner for LifecycleRegistry {
    fn lifecycle(&self) -> LifecycleHandle {
        self.handle()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
