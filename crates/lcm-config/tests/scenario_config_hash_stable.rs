use std::fs;

use lcm_config::{load_layered_yaml, load_layered_yaml_from_strings};

#[test]
fn hash_ignores_key_order_and_formatting() {
    let a = r#"
lifecycle:
  catch_up: replay
  prune_dropped_observers: true
logging:
  filter: info
"#;
    let b = r#"
logging: { filter: info }
lifecycle: { prune_dropped_observers: true, catch_up: replay }
"#;

    let la = load_layered_yaml_from_strings(&[a]).unwrap();
    let lb = load_layered_yaml_from_strings(&[b]).unwrap();
    assert_eq!(la.canonical_json, lb.canonical_json);
    assert_eq!(la.config_hash, lb.config_hash);
    assert_eq!(la.config_hash.len(), 64);
}

#[test]
fn later_layer_overrides_and_changes_hash() {
    let base = "lifecycle:\n  catch_up: replay\n";
    let overlay = "lifecycle:\n  catch_up: skip\n";

    let base_only = load_layered_yaml_from_strings(&[base]).unwrap();
    let layered = load_layered_yaml_from_strings(&[base, overlay]).unwrap();

    assert_ne!(base_only.config_hash, layered.config_hash);
    assert_eq!(
        layered.config_json.pointer("/lifecycle/catch_up"),
        Some(&serde_json::json!("skip"))
    );
}

#[test]
fn files_load_in_the_order_given() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.yaml");
    let dev = dir.path().join("dev.yaml");
    fs::write(&base, "logging:\n  filter: info\n").unwrap();
    fs::write(&dev, "logging:\n  filter: lcm_lifecycle=debug\n").unwrap();

    let base_s = base.to_string_lossy().to_string();
    let dev_s = dev.to_string_lossy().to_string();

    let loaded = load_layered_yaml(&[&base_s, &dev_s]).unwrap();
    let cfg = loaded.lifecycle().unwrap();
    assert_eq!(cfg.log_filter, "lcm_lifecycle=debug");

    let reversed = load_layered_yaml(&[&dev_s, &base_s]).unwrap();
    assert_eq!(reversed.lifecycle().unwrap().log_filter, "info");
}

#[test]
fn missing_file_reports_its_path() {
    let err = load_layered_yaml(&["/definitely/not/here.yaml"]).unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.yaml"));
}
