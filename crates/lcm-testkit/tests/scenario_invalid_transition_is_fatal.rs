//! Scenario: invalid transition is fatal
//!
//! # Invariant under test
//! An event with no edge out of the current state fails with
//! `InvalidTransition`, leaves the state untouched and notifies nobody.
//! Replaying an event without its valid predecessor state also fails: the
//! machine never claims idempotence.

use lcm_lifecycle::{LifecycleError, LifecycleEvent, LifecycleState, ObserverRef};
use lcm_testkit::{EventLog, RecordingObserver, ScriptedComponent};

#[test]
fn start_before_create_fails_and_stays_initialized() {
    let log = EventLog::new();
    let mut component = ScriptedComponent::new("main");
    component.attach(RecordingObserver::new("A", &log), ObserverRef::full);

    let err = component.on_start().unwrap_err();

    assert_eq!(
        err,
        LifecycleError::InvalidTransition {
            from: LifecycleState::Initialized,
            event: LifecycleEvent::OnStart,
        }
    );
    assert_eq!(component.state(), LifecycleState::Initialized);
    assert!(log.is_empty(), "rejected events must not be dispatched");
}

#[test]
fn replaying_same_event_fails() {
    let mut component = ScriptedComponent::new("main");
    component.on_create().unwrap();

    let err = component.on_create().unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidTransition {
            from: LifecycleState::Created,
            event: LifecycleEvent::OnCreate,
        }
    ));
    assert_eq!(component.state(), LifecycleState::Created);

    component.move_to(LifecycleState::Resumed).unwrap();
    assert!(component.on_resume().is_err());
    assert_eq!(component.state(), LifecycleState::Resumed);
}

#[test]
fn destroy_from_resumed_skipping_pause_fails() {
    let mut component = ScriptedComponent::new("main");
    component.move_to(LifecycleState::Resumed).unwrap();

    assert!(component.on_destroy().is_err());
    assert!(component.on_stop().is_err());
    assert_eq!(component.state(), LifecycleState::Resumed);
}

#[test]
fn script_stops_at_first_illegal_event() {
    use LifecycleEvent::*;

    let log = EventLog::new();
    let mut component = ScriptedComponent::new("main");
    component.attach(RecordingObserver::new("A", &log), ObserverRef::full);

    let err = component
        .run_script(&[OnCreate, OnStart, OnDestroy, OnStop])
        .unwrap_err();

    assert_eq!(err.from_state(), LifecycleState::Started);
    assert_eq!(component.state(), LifecycleState::Started);
    assert_eq!(log.events_for("A"), vec![OnCreate, OnStart]);
}
