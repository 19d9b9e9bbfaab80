use lcm_config::{load_layered_yaml_from_strings, LoadedConfig, DEFAULT_LOG_FILTER};
use lcm_lifecycle::{
    CatchUpPolicy, FullLifecycleObserver, LifecycleEvent, LifecycleRegistry, ObserverRef,
};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct CreateCounter {
    creates: Cell<u32>,
}

impl FullLifecycleObserver for CreateCounter {
    fn on_create(&self, _owner: &lcm_lifecycle::LifecycleHandle) {
        self.creates.set(self.creates.get() + 1);
    }
}

#[test]
fn empty_config_gives_defaults() {
    let cfg = LoadedConfig::empty().unwrap().lifecycle().unwrap();
    assert_eq!(cfg.registry.catch_up, CatchUpPolicy::Replay);
    assert!(cfg.registry.prune_dropped);
    assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
}

#[test]
fn skip_policy_from_yaml_reaches_the_registry() {
    let loaded = load_layered_yaml_from_strings(&["lifecycle:\n  catch_up: skip\n"]).unwrap();
    let cfg = loaded.lifecycle().unwrap();

    let mut registry = LifecycleRegistry::with_options("cfg-driven", cfg.registry);
    registry.advance(LifecycleEvent::OnCreate).unwrap();

    let late = Rc::new(CreateCounter::default());
    registry.handle().register(ObserverRef::full(&late));
    assert_eq!(late.creates.get(), 0, "skip policy must not replay ON_CREATE");
}

#[test]
fn replay_policy_from_yaml_reaches_the_registry() {
    let loaded = load_layered_yaml_from_strings(&["lifecycle:\n  catch_up: replay\n"]).unwrap();
    let cfg = loaded.lifecycle().unwrap();

    let mut registry = LifecycleRegistry::with_options("cfg-driven", cfg.registry);
    registry.advance(LifecycleEvent::OnCreate).unwrap();

    let late = Rc::new(CreateCounter::default());
    registry.handle().register(ObserverRef::full(&late));
    assert_eq!(late.creates.get(), 1);
}

#[test]
fn unknown_catch_up_value_is_an_error() {
    let loaded = load_layered_yaml_from_strings(&["lifecycle:\n  catch_up: lazy\n"]).unwrap();
    let err = loaded.lifecycle().unwrap_err();
    assert!(err.to_string().contains("lazy"), "{err}");
}
