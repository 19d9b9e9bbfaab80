//! Demo component used by `lcm replay` and `lcm drive`.
//!
//! It owns its registry and keeps strong references to the two observers it
//! registers: a full observer that logs every callback, and an
//! `EventHandlers` table (connect on create, two handlers on start).

use std::cell::RefCell;
use std::rc::Rc;

use lcm_lifecycle::{
    EventHandlers, FullLifecycleObserver, LifecycleError, LifecycleEvent, LifecycleHandle,
    LifecycleOwner, LifecycleRegistry, LifecycleState, ObserverRef, RegistryOptions,
};
use tracing::info;

pub const DEMO_OWNER: &str = "demo-component";

/// Actions performed by handlers, in order.
pub type ActionLog = Rc<RefCell<Vec<String>>>;

struct TracingObserver;

impl FullLifecycleObserver for TracingObserver {
    fn on_create(&self, owner: &LifecycleHandle) {
        info!(state = %owner.current_state(), "on_create");
    }

    fn on_start(&self, owner: &LifecycleHandle) {
        info!(state = %owner.current_state(), "on_start");
    }

    fn on_resume(&self, owner: &LifecycleHandle) {
        info!(state = %owner.current_state(), "on_resume");
    }

    fn on_pause(&self, owner: &LifecycleHandle) {
        info!(state = %owner.current_state(), "on_pause");
    }

    fn on_stop(&self, owner: &LifecycleHandle) {
        info!(state = %owner.current_state(), "on_stop");
    }

    fn on_destroy(&self, owner: &LifecycleHandle) {
        info!(state = %owner.current_state(), "on_destroy");
    }
}

fn action(log: &ActionLog, name: &'static str) -> impl Fn(&LifecycleHandle) + 'static {
    let log = Rc::clone(log);
    move |_: &LifecycleHandle| log.borrow_mut().push(name.to_string())
}

pub struct DemoComponent {
    registry: LifecycleRegistry,
    actions: ActionLog,
    _logger: Rc<TracingObserver>,
    _handlers: Rc<EventHandlers>,
}

impl DemoComponent {
    pub fn new(options: RegistryOptions) -> Self {
        let registry = LifecycleRegistry::with_options(DEMO_OWNER, options);
        let actions: ActionLog = Rc::default();

        let logger = Rc::new(TracingObserver);
        let handlers = Rc::new(
            EventHandlers::new()
                .on(LifecycleEvent::OnCreate, action(&actions, "connect"))
                .on(LifecycleEvent::OnStart, action(&actions, "start_metrics"))
                .on(LifecycleEvent::OnStart, action(&actions, "start_heartbeat"))
                .on(LifecycleEvent::OnDestroy, action(&actions, "disconnect")),
        );

        let owner = registry.handle();
        owner.register(ObserverRef::full(&logger));
        owner.register(ObserverRef::generic(&handlers));

        Self {
            registry,
            actions,
            _logger: logger,
            _handlers: handlers,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.registry.current_state()
    }

    pub fn advance(&mut self, event: LifecycleEvent) -> Result<(), LifecycleError> {
        self.registry.advance(event)
    }

    pub fn move_to(&mut self, target: LifecycleState) -> Result<Vec<LifecycleEvent>, LifecycleError> {
        self.registry.move_to(target)
    }

    /// Drain actions recorded since the last call.
    pub fn take_actions(&self) -> Vec<String> {
        std::mem::take(&mut *self.actions.borrow_mut())
    }
}

impl LifecycleOwner for DemoComponent {
    fn lifecycle(&self) -> LifecycleHandle {
        self.registry.handle()
    }
}
