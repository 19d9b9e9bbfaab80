//! `lcm drive`: move the demo component to a target state.

use anyhow::{Context, Result};

use lcm_config::LifecycleConfig;
use lcm_lifecycle::{LifecycleEvent, LifecycleState};

use super::demo::DemoComponent;

pub fn run(to_arg: &str, from_events: Option<&str>, cfg: &LifecycleConfig) -> Result<()> {
    let target =
        LifecycleState::parse(to_arg).with_context(|| format!("invalid --to '{to_arg}'"))?;

    let mut demo = DemoComponent::new(cfg.registry);

    if let Some(raw) = from_events {
        let prelude = LifecycleEvent::parse_list(raw)
            .with_context(|| format!("invalid --from-events '{raw}'"))?;
        for event in prelude {
            demo.advance(event)
                .with_context(|| format!("--from-events rejected at {event}"))?;
        }
    }

    let from = demo.state();
    let applied = demo
        .move_to(target)
        .with_context(|| format!("drive {from} -> {target} failed"))?;

    println!("from={from}");
    for event in &applied {
        println!("event={event}");
    }
    println!("state={}", demo.state());
    println!("actions={}", demo.take_actions().join(","));

    Ok(())
}
