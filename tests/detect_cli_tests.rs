mod common;

use common::{TestEnv, STANDUP_TRANSCRIPT};

#[test]
fn detect_classifies_standup() {
    let env = TestEnv::new();
    let path = env.write_transcript("standup.txt", STANDUP_TRANSCRIPT);

    let output = env.run(&["detect", path.to_str().unwrap(), "--title", "Daily Standup"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "detect should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Meeting type: Standup"));
    assert!(stdout.contains("Confidence:"));
    assert!(stdout.contains("Signals:"));
}

#[test]
fn detect_json_emits_machine_readable_result() {
    let env = TestEnv::new();
    let path = env.write_transcript("standup.txt", STANDUP_TRANSCRIPT);

    let output = env.run(&["detect", path.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON output");
    assert_eq!(parsed["meeting_type"], "standup");
    assert!(parsed["confidence"].as_f64().unwrap() > 0.0);
    assert!(parsed["signals"].is_array());
}

#[test]
fn detect_rejects_too_short_transcript() {
    let env = TestEnv::new();
    let path = env.write_transcript("short.txt", "Alice: hi\n");

    let output = env.run(&["detect", path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("too short"),
        "expected length validation error\nstderr:\n{}",
        stderr
    );
}

#[test]
fn detect_missing_file_reports_path() {
    let env = TestEnv::new();

    let output = env.run(&["detect", "/nonexistent/meeting.txt"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/meeting.txt"));
}

#[test]
fn detect_normalizes_vtt_input() {
    let env = TestEnv::new();
    let vtt = "WEBVTT\n\n\
00:00:01.000 --> 00:00:08.000\n\
<v Alice>Yesterday I finished the login page and today I will start the dashboard work.\n\n\
00:00:08.000 --> 00:00:16.000\n\
<v Bob>Yesterday I fixed the flaky test. Today I continue the migration. I am blocked on staging.\n\n\
00:12:00.000 --> 00:12:05.000\n\
<v Carol>No blockers from me, I will keep reviewing pull requests today.\n";
    let path = env.write_transcript("standup.vtt", vtt);

    let output = env.run(&["detect", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "detect on VTT should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Meeting type: Standup"));
}
