use std::any::Any;
use std::rc::Rc;

use lcm_lifecycle::{
    LifecycleError, LifecycleEvent, LifecycleHandle, LifecycleOwner, LifecycleRegistry,
    LifecycleState, ObserverRef, RegistryOptions,
};

/// A component that owns its lifecycle registry and drives it from its own
/// callback methods, the way a platform component forwards OS callbacks.
///
/// Observers attached through [`attach`](Self::attach) are retained by the
/// component, so they live exactly as long as it does.
pub struct ScriptedComponent {
    registry: LifecycleRegistry,
    retained: Vec<Rc<dyn Any>>,
}

impl ScriptedComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(name, RegistryOptions::default())
    }

    pub fn with_options(name: impl Into<String>, options: RegistryOptions) -> Self {
        Self {
            registry: LifecycleRegistry::with_options(name, options),
            retained: Vec::new(),
        }
    }

    /// Register `observer` and keep it alive for the component's lifetime.
    ///
    /// Returns `false` (and drops the component's reference) when the
    /// registration was refused: owner destroyed, or already registered.
    pub fn attach<O: 'static>(
        &mut self,
        observer: Rc<O>,
        as_ref: fn(&Rc<O>) -> ObserverRef,
    ) -> bool {
        let registered = self.registry.handle().register(as_ref(&observer));
        if registered {
            self.retained.push(observer);
        }
        registered
    }

    pub fn state(&self) -> LifecycleState {
        self.registry.current_state()
    }

    pub fn on_create(&mut self) -> Result<(), LifecycleError> {
        self.registry.advance(LifecycleEvent::OnCreate)
    }

    pub fn on_start(&mut self) -> Result<(), LifecycleError> {
        self.registry.advance(LifecycleEvent::OnStart)
    }

    pub fn on_resume(&mut self) -> Result<(), LifecycleError> {
        self.registry.advance(LifecycleEvent::OnResume)
    }

    pub fn on_pause(&mut self) -> Result<(), LifecycleError> {
        self.registry.advance(LifecycleEvent::OnPause)
    }

    pub fn on_stop(&mut self) -> Result<(), LifecycleError> {
        self.registry.advance(LifecycleEvent::OnStop)
    }

    pub fn on_destroy(&mut self) -> Result<(), LifecycleError> {
        self.registry.advance(LifecycleEvent::OnDestroy)
    }

    /// Apply `events` in order, returning the state after each step. Stops
    /// at the first illegal event.
    pub fn run_script(
        &mut self,
        events: &[LifecycleEvent],
    ) -> Result<Vec<LifecycleState>, LifecycleError> {
        let mut states = Vec::with_capacity(events.len());
        for event in events {
            self.registry.advance(*event)?;
            states.push(self.registry.current_state());
        }
        Ok(states)
    }

    pub fn move_to(&mut self, target: LifecycleState) -> Result<Vec<LifecycleEvent>, LifecycleError> {
        self.registry.move_to(target)
    }
}

impl LifecycleOwner for ScriptedComponent {
    fn lifecycle(&self) -> LifecycleHandle {
        self.registry.handle()
    }
}
