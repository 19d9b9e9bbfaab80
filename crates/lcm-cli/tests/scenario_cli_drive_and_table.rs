use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn table_lists_all_six_edges() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.arg("table");

    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out)?;
    assert_eq!(text.lines().count(), 6);
    assert!(text.contains("INITIALIZED --ON_CREATE--> CREATED"));
    assert!(text.contains("CREATED --ON_DESTROY--> DESTROYED"));
    Ok(())
}

#[test]
fn drive_walks_every_intermediate_event() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.env_remove("RUST_LOG").args(["drive", "--to", "RESUMED"]);

    cmd.assert().success().stdout(predicate::str::diff(
        "from=INITIALIZED\n\
         event=ON_CREATE\n\
         event=ON_START\n\
         event=ON_RESUME\n\
         state=RESUMED\n\
         actions=connect,start_metrics,start_heartbeat\n",
    ));
    Ok(())
}

#[test]
fn drive_down_from_prelude_state() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.env_remove("RUST_LOG").args([
        "drive",
        "--from-events",
        "ON_CREATE,ON_START",
        "--to",
        "DESTROYED",
    ]);

    cmd.assert().success().stdout(
        predicate::str::contains("from=STARTED")
            .and(predicate::str::contains("event=ON_STOP\nevent=ON_DESTROY"))
            .and(predicate::str::contains("state=DESTROYED")),
    );
    Ok(())
}

#[test]
fn drive_to_initialized_is_unreachable() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("lcm")?;
    cmd.env_remove("RUST_LOG")
        .args(["drive", "--from-events", "ON_CREATE", "--to", "INITIALIZED"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unreachable lifecycle state"));
    Ok(())
}
