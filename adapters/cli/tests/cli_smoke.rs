use std::process::Command;

#[test]
fn scripted_session_prints_a_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_quizrush"))
        .args(["--seed", "7"])
        .output()
        .expect("failed to run the quizrush binary");

    assert!(output.status.success(), "quizrush should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("total_score"), "summary missing: {stdout}");
    assert!(stdout.contains("intensity_reached"), "summary missing: {stdout}");
}

#[test]
fn identical_seeds_print_identical_summaries() {
    let run = || {
        let output = Command::new(env!("CARGO_BIN_EXE_quizrush"))
            .args(["--seed", "1234"])
            .output()
            .expect("failed to run the quizrush binary");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };
    assert_eq!(run(), run());
}

#[test]
fn config_file_overrides_the_defaults() {
    let dir = std::env::temp_dir().join("quizrush-cli-smoke");
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("session.toml");
    std::fs::write(
        &path,
        "grid_columns = 9\ngrid_rows = 9\nstarting_seconds = 10\nmax_seconds = 20\n",
    )
    .expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_quizrush"))
        .arg("--config")
        .arg(&path)
        .args(["--seed", "7"])
        .output()
        .expect("failed to run the quizrush binary");

    assert!(output.status.success(), "quizrush should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("completed"), "summary missing: {stdout}");
}
