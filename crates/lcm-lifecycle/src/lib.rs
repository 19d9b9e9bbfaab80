//! lcm-lifecycle
//!
//! Observer-based lifecycle state machine for one owning component.
//! - States and events are closed enums; legal moves come from one table
//! - The owner drives the machine through `LifecycleRegistry`
//! - Everyone else sees a read-only `LifecycleHandle`
//! - Observers are weakly held and notified synchronously, in registration order
//!
//! An illegal transition returns `LifecycleError`, which callers MUST treat as
//! a fatal programming error.

mod error;
mod observer;
mod registry;
mod types;

pub use error::{LifecycleError, ParseLifecycleError};

pub use types::{LifecycleEvent, LifecycleState, TRANSITIONS};

pub use observer::{EventHandlers, FullLifecycleObserver, LifecycleEventObserver, ObserverRef};

pub use registry::{
    CatchUpPolicy, LifecycleHandle, LifecycleOwner, LifecycleRegistry, RegistryOptions,
};
