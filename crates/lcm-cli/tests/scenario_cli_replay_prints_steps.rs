use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn replay_prints_one_line_per_step() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.env_remove("RUST_LOG")
        .args(["replay", "--events", "ON_CREATE,ON_START,ON_RESUME"]);

    cmd.assert().success().stdout(
        predicate::str::contains("step=1 event=ON_CREATE state=CREATED")
            .and(predicate::str::contains("step=2 event=ON_START state=STARTED"))
            .and(predicate::str::contains("step=3 event=ON_RESUME state=RESUMED")),
    );
    Ok(())
}

#[test]
fn replay_json_transcript_carries_run_metadata() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.env_remove("RUST_LOG")
        .args(["replay", "--events", "create start", "--json"]);

    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out)?;

    assert!(v["run_id"].as_str().is_some_and(|s| s.len() == 36));
    assert!(v["started_at_utc"].is_string());
    assert_eq!(v["final_state"], "STARTED");
    assert_eq!(v["steps"][1]["event"], "ON_START");
    assert_eq!(
        v["steps"][1]["actions"],
        serde_json::json!(["start_metrics", "start_heartbeat"])
    );
    Ok(())
}

#[test]
fn replay_fails_on_invalid_transition() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.env_remove("RUST_LOG")
        .args(["replay", "--events", "ON_CREATE,ON_RESUME"]);

    cmd.assert().failure().stderr(
        predicate::str::contains("replay aborted at step 2")
            .and(predicate::str::contains("invalid lifecycle transition")),
    );
    Ok(())
}

#[test]
fn replay_after_destroy_fails() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.env_remove("RUST_LOG")
        .args(["replay", "--events", "ON_CREATE,ON_DESTROY,ON_CREATE"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("step 3"));
    Ok(())
}

#[test]
fn replay_rejects_unknown_event_name() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.args(["replay", "--events", "ON_CREATE,ON_RESTART"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("ON_RESTART"));
    Ok(())
}
