//! Command handler modules for lcm-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod demo;
pub mod drive;
pub mod replay;

use anyhow::{Context, Result};
use lcm_config::{LifecycleConfig, LoadedConfig, UnusedKeyPolicy};
use lcm_lifecycle::TRANSITIONS;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load layered config (defaults when no paths are given) and return the
/// typed lifecycle settings. Unused keys are reported on stderr, not fatal.
pub fn load_lifecycle_config(paths: &[String]) -> Result<LifecycleConfig> {
    let loaded = if paths.is_empty() {
        LoadedConfig::empty()?
    } else {
        let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
        lcm_config::load_layered_yaml(&path_refs)?
    };

    // Tracing is not installed yet (the filter comes from this config).
    let report = lcm_config::report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    for leaf in &report.unused_leaf_pointers {
        eprintln!("config_unused_key={leaf}");
    }

    loaded
        .lifecycle()
        .with_context(|| format!("invalid lifecycle config (hash {})", loaded.config_hash))
}

pub fn print_table() {
    for (from, event, to) in TRANSITIONS {
        println!("{from} --{event}--> {to}");
    }
}
