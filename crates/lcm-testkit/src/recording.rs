use std::cell::RefCell;
use std::rc::Rc;

use lcm_lifecycle::{
    FullLifecycleObserver, LifecycleEvent, LifecycleEventObserver, LifecycleHandle,
    LifecycleState,
};

/// One delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub observer: String,
    pub event: LifecycleEvent,
    /// Owner state as seen from inside the callback.
    pub state: LifecycleState,
}

/// Ordered notification record shared by any number of observers.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Rc<RefCell<Vec<Record>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, observer: &str, event: LifecycleEvent, state: LifecycleState) {
        self.records.borrow_mut().push(Record {
            observer: observer.to_string(),
            event,
            state,
        });
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    /// Events seen by one observer, in delivery order.
    pub fn events_for(&self, observer: &str) -> Vec<LifecycleEvent> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.observer == observer)
            .map(|r| r.event)
            .collect()
    }

    /// `"<observer>:<EVENT>"` per record; handy for whole-sequence asserts.
    pub fn lines(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .map(|r| format!("{}:{}", r.observer, r.event))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

/// Full-variant observer that records every callback.
#[derive(Debug)]
pub struct RecordingObserver {
    name: String,
    log: EventLog,
}

impl RecordingObserver {
    pub fn new(name: impl Into<String>, log: &EventLog) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            log: log.clone(),
        })
    }

    fn record(&self, owner: &LifecycleHandle, event: LifecycleEvent) {
        self.log.record(&self.name, event, owner.current_state());
    }
}

impl FullLifecycleObserver for RecordingObserver {
    fn on_create(&self, owner: &LifecycleHandle) {
        self.record(owner, LifecycleEvent::OnCreate);
    }

    fn on_start(&self, owner: &LifecycleHandle) {
        self.record(owner, LifecycleEvent::OnStart);
    }

    fn on_resume(&self, owner: &LifecycleHandle) {
        self.record(owner, LifecycleEvent::OnResume);
    }

    fn on_pause(&self, owner: &LifecycleHandle) {
        self.record(owner, LifecycleEvent::OnPause);
    }

    fn on_stop(&self, owner: &LifecycleHandle) {
        self.record(owner, LifecycleEvent::OnStop);
    }

    fn on_destroy(&self, owner: &LifecycleHandle) {
        self.record(owner, LifecycleEvent::OnDestroy);
    }
}

/// Generic-variant observer that records every event.
#[derive(Debug)]
pub struct RecordingEventObserver {
    name: String,
    log: EventLog,
}

impl RecordingEventObserver {
    pub fn new(name: impl Into<String>, log: &EventLog) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            log: log.clone(),
        })
    }
}

impl LifecycleEventObserver for RecordingEventObserver {
    fn on_state_changed(&self, owner: &LifecycleHandle, event: LifecycleEvent) {
        self.log.record(&self.name, event, owner.current_state());
    }
}
