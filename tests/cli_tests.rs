mod common;

use common::{run_recap, TestEnv};

#[test]
fn recap_help_shows_usage() {
    let output = run_recap(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("summarize"));
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("chunk"));
    assert!(stdout.contains("estimate"));
}

#[test]
fn recap_version_shows_version() {
    let output = run_recap(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--version should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("recap "));
}

#[test]
fn subcommand_help_documents_flags() {
    let output = run_recap(&["summarize", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("--type"));
    assert!(stdout.contains("--force-chunking"));
    assert!(stdout.contains("--json"));
    assert!(stdout.contains("--output"));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_recap(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("recap"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_path_prints_a_path() {
    let env = TestEnv::new();
    let path = env.config_path();
    assert!(path.to_string_lossy().ends_with("config.toml"));
}

#[test]
fn config_init_then_show_round_trips() {
    let env = TestEnv::new();

    let output = env.run(&["config", "init"]);
    assert!(
        output.status.success(),
        "config init should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(env.config_path().exists());

    // Second init without --force refuses to overwrite.
    let output = env.run(&["config", "init"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"));

    let output = env.run(&["config", "show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[llm]"));
    assert!(stdout.contains("provider = \"langbase\""));
    assert!(stdout.contains("[chunking]"));
}

#[test]
fn config_file_overrides_are_picked_up() {
    let env = TestEnv::new();
    env.write_config("[chunking]\nmax_tokens = 500\n");

    let output = env.run(&["config", "show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("max_tokens = 500"));
    // Unset sections still come back with defaults.
    assert!(stdout.contains("provider = \"langbase\""));
}
