//! lcm-config
//!
//! Layered YAML configuration:
//! - docs merge in order (later docs override earlier ones, maps deep-merge)
//! - the merged document is canonicalised to JSON and hashed (SHA-256)
//! - `LifecycleConfig` reads the typed settings out of the merged JSON
//! - `report_unused_keys` flags leaves nothing reads (typos, stale keys)

use anyhow::{Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;

mod consumption;
mod lifecycle;

pub use consumption::{consumed_pointers, report_unused_keys, UnusedKeyPolicy, UnusedKeyReport};
pub use lifecycle::{LifecycleConfig, DEFAULT_LOG_FILTER};

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// Config with no layers: every setting at its default.
    pub fn empty() -> Result<Self> {
        load_layered_yaml_from_strings(&[])
    }

    pub fn lifecycle(&self) -> Result<LifecycleConfig> {
        LifecycleConfig::from_config_json(&self.config_json)
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let layers = paths
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("failed to read config layer: {path}"))
        })
        .collect::<Result<Vec<String>>>()?;

    let layer_refs: Vec<&str> = layers.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&layer_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        // An empty document parses as null; it contributes nothing.
        if v_json.is_null() {
            continue;
        }
        merge_layer(&mut merged, v_json);
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Maps merge key by key; anything else in `layer` replaces what is there.
fn merge_layer(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, value) in layer_map {
                merge_layer(base_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json's default Map is key-sorted, so compact serialisation is
    // already independent of the key order in the source YAML.
    serde_json::to_string(v).context("canonical json serialize failed")
}
