use anyhow::{anyhow, bail, Result};
use lcm_lifecycle::{CatchUpPolicy, RegistryOptions};
use serde_json::Value;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Typed view of the settings this workspace reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    pub registry: RegistryOptions,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            registry: RegistryOptions::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Build from merged config JSON (produced by `load_layered_yaml*`).
    ///
    /// All fields are optional:
    /// - lifecycle.catch_up: "replay" | "skip" (default "replay")
    /// - lifecycle.prune_dropped_observers: bool (default true)
    /// - logging.filter: string (default "info")
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let mut out = Self::default();

        match cfg.pointer("/lifecycle/catch_up") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => {
                out.registry.catch_up = parse_catch_up(s)?;
            }
            Some(other) => bail!("lifecycle.catch_up must be a string (got {other})"),
        }

        match cfg.pointer("/lifecycle/prune_dropped_observers") {
            None | Some(Value::Null) => {}
            Some(Value::Bool(b)) => out.registry.prune_dropped = *b,
            Some(other) => {
                bail!("lifecycle.prune_dropped_observers must be a bool (got {other})")
            }
        }

        match cfg.pointer("/logging/filter") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) if !s.trim().is_empty() => out.log_filter = s.trim().to_string(),
            Some(other) => bail!("logging.filter must be a non-empty string (got {other})"),
        }

        Ok(out)
    }
}

fn parse_catch_up(s: &str) -> Result<CatchUpPolicy> {
    match s.trim().to_ascii_lowercase().as_str() {
        "replay" => Ok(CatchUpPolicy::Replay),
        "skip" => Ok(CatchUpPolicy::Skip),
        other => Err(anyhow!(
            "lifecycle.catch_up must be one of replay|skip (got '{other}')"
        )),
    }
}
