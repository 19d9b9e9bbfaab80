//! Unused-key guard.
//!
//! "Consumed pointers" are JSON Pointer prefixes. A leaf under any consumed
//! prefix is consumed; every other leaf is reported as unused. The registry
//! below must list only what the code actually reads.

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnusedKeyReport {
    /// Consumed JSON-pointer prefixes used for this analysis (sorted, unique)
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Pointers read by `LifecycleConfig::from_config_json`.
pub fn consumed_pointers() -> &'static [&'static str] {
    &[
        "/lifecycle/catch_up",
        "/lifecycle/prune_dropped_observers",
        "/logging/filter",
    ]
}

/// Report every config leaf not covered by [`consumed_pointers`].
///
/// `Warn` always returns the report. `Fail` errors when anything is unused.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let mut consumed_prefixes: Vec<String> =
        consumed_pointers().iter().map(|p| as_prefix(p)).collect();
    consumed_prefixes.sort();
    consumed_prefixes.dedup();

    let mut unused_leaf_pointers = Vec::new();
    for_each_leaf(config_json, &mut String::new(), &mut |leaf: &str| {
        if !consumed_prefixes.iter().any(|prefix| covers(prefix, leaf)) {
            unused_leaf_pointers.push(leaf.to_string());
        }
    });
    unused_leaf_pointers.sort();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        let shown: Vec<&str> = report
            .unused_leaf_pointers
            .iter()
            .take(PREVIEW_LEN)
            .map(String::as_str)
            .collect();
        bail!(
            "CONFIG_UNUSED_KEYS: {} config key(s) are not read by lcm ({}). \
            Remove them or fix their spelling.",
            report.unused_leaf_pointers.len(),
            shown.join(", ")
        );
    }

    Ok(report)
}

const PREVIEW_LEN: usize = 12;

/// Rooted, without a trailing slash ("/" stays "/").
fn as_prefix(pointer: &str) -> String {
    let body = pointer.trim().trim_matches('/');
    format!("/{body}")
}

/// Whole-segment prefix match: "/logging" covers "/logging/filter" but
/// not "/loggingx".
fn covers(prefix: &str, leaf: &str) -> bool {
    match leaf.strip_prefix(prefix) {
        Some(rest) => prefix == "/" || rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Visit the JSON pointer of every scalar and every empty container.
/// The empty root document has no leaves.
fn for_each_leaf(v: &Value, path: &mut String, visit: &mut dyn FnMut(&str)) {
    let children: Vec<(String, &Value)> = match v {
        Value::Object(map) => map
            .iter()
            .map(|(k, child)| (k.replace('~', "~0").replace('/', "~1"), child))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, child)| (i.to_string(), child))
            .collect(),
        _ => Vec::new(),
    };

    let is_container = matches!(v, Value::Object(_) | Value::Array(_));
    if children.is_empty() {
        if path.is_empty() {
            if !is_container {
                visit("/");
            }
        } else {
            visit(path);
        }
        return;
    }

    for (token, child) in children {
        let len = path.len();
        path.push('/');
        path.push_str(&token);
        for_each_leaf(child, path, visit);
        path.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(v: &Value) -> Vec<String> {
        let mut out = Vec::new();
        for_each_leaf(v, &mut String::new(), &mut |leaf: &str| out.push(leaf.to_string()));
        out
    }

    #[test]
    fn prefix_respects_segment_boundary() {
        assert!(covers("/logging", "/logging/filter"));
        assert!(covers("/logging/filter", "/logging/filter"));
        assert!(!covers("/log", "/logging/filter"));
        assert!(covers("/", "/anything"));
    }

    #[test]
    fn prefixes_are_rooted_and_trimmed() {
        assert_eq!(as_prefix("lifecycle/"), "/lifecycle");
        assert_eq!(as_prefix(""), "/");
    }

    #[test]
    fn empty_section_counts_as_leaf() {
        let v = serde_json::json!({"a": {}, "b": [1]});
        assert_eq!(leaves(&v), vec!["/a".to_string(), "/b/0".to_string()]);
    }

    #[test]
    fn keys_with_slashes_are_escaped() {
        let v = serde_json::json!({"a/b": {"c~d": 1}});
        assert_eq!(leaves(&v), vec!["/a~1b/c~0d".to_string()]);
    }

    #[test]
    fn empty_root_has_no_leaves() {
        assert!(leaves(&serde_json::json!({})).is_empty());
    }
}
