//! Observer capability and its two variants.
//!
//! Observers are held weakly by the registry: registering does not keep an
//! observer alive. Keep the `Rc` somewhere (usually on the component that
//! created the observer) for as long as notifications are wanted.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::registry::LifecycleHandle;
use crate::types::LifecycleEvent;

/// Observer with one callback per lifecycle event. Every callback defaults to
/// a no-op, so implementors only override what they care about.
pub trait FullLifecycleObserver {
    fn on_create(&self, _owner: &LifecycleHandle) {}

    fn on_start(&self, _owner: &LifecycleHandle) {}

    fn on_resume(&self, _owner: &LifecycleHandle) {}

    fn on_pause(&self, _owner: &LifecycleHandle) {}

    fn on_stop(&self, _owner: &LifecycleHandle) {}

    fn on_destroy(&self, _owner: &LifecycleHandle) {}
}

/// Observer with a single entry point receiving every event.
pub trait LifecycleEventObserver {
    fn on_state_changed(&self, owner: &LifecycleHandle, event: LifecycleEvent);
}

/// A registered observer, weakly referenced.
///
/// `advance` treats both variants identically: each dispatch upgrades the weak
/// reference and, if the observer is still alive, delivers the event.
#[derive(Clone)]
pub enum ObserverRef {
    Full(Weak<dyn FullLifecycleObserver>),
    Generic(Weak<dyn LifecycleEventObserver>),
}

impl ObserverRef {
    pub fn full<O: FullLifecycleObserver + 'static>(observer: &Rc<O>) -> Self {
        let weak: Weak<O> = Rc::downgrade(observer);
        ObserverRef::Full(weak)
    }

    pub fn generic<O: LifecycleEventObserver + 'static>(observer: &Rc<O>) -> Self {
        let weak: Weak<O> = Rc::downgrade(observer);
        ObserverRef::Generic(weak)
    }

    /// `false` once every strong reference to the observer is gone.
    pub fn is_alive(&self) -> bool {
        match self {
            ObserverRef::Full(weak) => weak.strong_count() > 0,
            ObserverRef::Generic(weak) => weak.strong_count() > 0,
        }
    }

    /// Same variant and same allocation.
    pub fn same_observer(&self, other: &ObserverRef) -> bool {
        match (self, other) {
            (ObserverRef::Full(a), ObserverRef::Full(b)) => Weak::ptr_eq(a, b),
            (ObserverRef::Generic(a), ObserverRef::Generic(b)) => Weak::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Deliver `event`. Returns `false` without calling anything if the
    /// observer has been dropped.
    pub(crate) fn receive(&self, owner: &LifecycleHandle, event: LifecycleEvent) -> bool {
        match self {
            ObserverRef::Full(weak) => {
                let Some(observer) = weak.upgrade() else {
                    return false;
                };
                match event {
                    LifecycleEvent::OnCreate => observer.on_create(owner),
                    LifecycleEvent::OnStart => observer.on_start(owner),
                    LifecycleEvent::OnResume => observer.on_resume(owner),
                    LifecycleEvent::OnPause => observer.on_pause(owner),
                    LifecycleEvent::OnStop => observer.on_stop(owner),
                    LifecycleEvent::OnDestroy => observer.on_destroy(owner),
                }
                true
            }
            ObserverRef::Generic(weak) => {
                let Some(observer) = weak.upgrade() else {
                    return false;
                };
                observer.on_state_changed(owner, event);
                true
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ObserverRef::Full(_) => "full",
            ObserverRef::Generic(_) => "generic",
        }
    }
}

impl fmt::Debug for ObserverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRef")
            .field("kind", &self.kind())
            .field("alive", &self.is_alive())
            .finish()
    }
}

type Handler = Box<dyn Fn(&LifecycleHandle)>;

/// Generic observer built from an explicit event → handlers table.
///
/// Handlers bound to the same event run in the order they were bound.
///
/// ```
/// use std::rc::Rc;
/// use lcm_lifecycle::{EventHandlers, LifecycleEvent, LifecycleRegistry, ObserverRef};
///
/// let mut registry = LifecycleRegistry::new("demo");
/// let handlers = Rc::new(
///     EventHandlers::new()
///         .on(LifecycleEvent::OnCreate, |_| println!("connect"))
///         .on(LifecycleEvent::OnStart, |_| println!("start #1"))
///         .on(LifecycleEvent::OnStart, |_| println!("start #2")),
/// );
/// registry.handle().register(ObserverRef::generic(&handlers));
/// registry.advance(LifecycleEvent::OnCreate).unwrap();
/// ```
#[derive(Default)]
pub struct EventHandlers {
    handlers: BTreeMap<LifecycleEvent, Vec<Handler>>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `event`.
    pub fn on<F>(mut self, event: LifecycleEvent, handler: F) -> Self
    where
        F: Fn(&LifecycleHandle) + 'static,
    {
        self.handlers
            .entry(event)
            .or_default()
            .push(Box::new(handler));
        self
    }

    pub fn handler_count(&self, event: LifecycleEvent) -> usize {
        self.handlers.get(&event).map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl LifecycleEventObserver for EventHandlers {
    fn on_state_changed(&self, owner: &LifecycleHandle, event: LifecycleEvent) {
        if let Some(bound) = self.handlers.get(&event) {
            for handler in bound {
                handler(owner);
            }
        }
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<&'static str, usize> = self
            .handlers
            .iter()
            .map(|(event, bound)| (event.as_str(), bound.len()))
            .collect();
        f.debug_struct("EventHandlers")
            .field("handlers", &counts)
            .finish()
    }
}
