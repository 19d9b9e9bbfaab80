//! `lcm replay`: apply an explicit event sequence to the demo component.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use lcm_config::LifecycleConfig;
use lcm_lifecycle::{LifecycleEvent, LifecycleState};

use super::demo::{DemoComponent, DEMO_OWNER};

#[derive(Debug, Serialize)]
pub struct ReplayStep {
    pub step: usize,
    pub event: LifecycleEvent,
    pub state: LifecycleState,
    /// Handler actions triggered by this step.
    pub actions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReplayTranscript {
    pub run_id: Uuid,
    pub started_at_utc: DateTime<Utc>,
    pub owner: &'static str,
    pub catch_up: &'static str,
    pub steps: Vec<ReplayStep>,
    pub final_state: LifecycleState,
}

pub fn run(events_arg: &str, cfg: &LifecycleConfig, json: bool) -> Result<()> {
    let events = LifecycleEvent::parse_list(events_arg)
        .with_context(|| format!("invalid --events '{events_arg}'"))?;
    if events.is_empty() {
        anyhow::bail!("--events must name at least one event");
    }

    let transcript = replay(&events, cfg)?;

    if json {
        let out = serde_json::to_string_pretty(&transcript)
            .context("serialize replay transcript failed")?;
        println!("{out}");
    } else {
        for s in &transcript.steps {
            println!("step={} event={} state={}", s.step, s.event, s.state);
        }
    }

    Ok(())
}

/// Apply `events` in order. Stops at the first illegal event; the error names
/// the step and carries the `LifecycleError` as its source.
pub fn replay(events: &[LifecycleEvent], cfg: &LifecycleConfig) -> Result<ReplayTranscript> {
    let run_id = Uuid::new_v4();
    let started_at_utc = Utc::now();
    tracing::info!(%run_id, owner = DEMO_OWNER, count = events.len(), "replay start");

    let mut demo = DemoComponent::new(cfg.registry);
    let mut steps = Vec::with_capacity(events.len());

    for (i, event) in events.iter().copied().enumerate() {
        let step = i + 1;
        demo.advance(event)
            .with_context(|| format!("replay aborted at step {step} ({event})"))?;
        steps.push(ReplayStep {
            step,
            event,
            state: demo.state(),
            actions: demo.take_actions(),
        });
    }

    Ok(ReplayTranscript {
        run_id,
        started_at_utc,
        owner: DEMO_OWNER,
        catch_up: cfg.registry.catch_up.as_str(),
        steps,
        final_state: demo.state(),
    })
}
