use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("priority-triage").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn normalize_command_prints_clean_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("priority-triage").expect("binary exists");
    cmd.current_dir(dir.path())
        .args(["normalize", "Server DOWN!! completely (urgent)"])
        .assert()
        .success()
        .stdout("server down completely urgent\n");
}

#[test]
fn classify_without_model_prints_default_priority() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("priority-triage").expect("binary exists");
    cmd.current_dir(dir.path())
        .env("MODEL_PATH", dir.path().join("models/missing.json"))
        .env("LEGACY_MODEL_PATH", dir.path().join("missing.json"))
        .env("OUTPUTS_DIR", dir.path().join("outputs"))
        .env_remove("DEFAULT_PRIORITY")
        .args(["classify", "the server is down"])
        .assert()
        .success()
        .stdout("medium\tthe server is down\n");
}
