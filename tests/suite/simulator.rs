//! The `incall-sim` binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use incall_types::{PanelId, UiEffect};

fn run_sim(dir: &Path, config: &str, script: &str) -> Output {
    let config_path = dir.join("config.toml");
    let script_path = dir.join("script.jsonl");
    fs::write(&config_path, config).unwrap();
    fs::write(&script_path, script).unwrap();

    Command::new(env!("CARGO_BIN_EXE_incall-sim"))
        .arg("--config")
        .arg(&config_path)
        .arg(&script_path)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn effects(output: &Output) -> Vec<UiEffect> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn prints_effect_stream_as_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_sim(
        dir.path(),
        "[ui]\nreduced_motion = true\n",
        r#"{"event":"foreground","foreground":true}
{"event":"intent"}
{"event":"rotation","degrees":10}
{"event":"rotation","degrees":15}
{"event":"key","key":"mute"}
"#,
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim_end(), @r#"
    {"effect":"ui_showing","showing":true}
    {"effect":"panel_created","panel":"call_card","slot":"main"}
    {"effect":"panel_visibility","panel":"call_card","visible":true}
    {"effect":"rotation_changed","rotation":"rotation0"}
    {"effect":"orientation_changed","rotation":"rotation0"}
    {"effect":"call","command":"mute","muted":true}
    "#);
}

#[test]
fn ticks_complete_the_dialpad_slide() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_sim(
        dir.path(),
        "[ui]\ndialpad_animation_ms = 100\n",
        r#"# dialpad up, then back slides it away
{"event":"foreground","foreground":true}
{"event":"attach","tag":"tag_callcard_fragment"}
{"event":"dialpad","show":true}
{"event":"back"}
{"event":"tick","ms":60}
{"event":"tick","ms":60}
"#,
    );
    assert!(output.status.success());
    let effects = effects(&output);
    assert_eq!(
        effects.last(),
        Some(&UiEffect::PanelVisibility {
            panel: PanelId::Dialpad,
            visible: false
        })
    );
    assert!(
        effects
            .iter()
            .any(|e| matches!(e, UiEffect::StartTransition { .. }))
    );
}

#[test]
fn unknown_panel_tag_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_sim(
        dir.path(),
        "",
        "{\"event\":\"attach\",\"tag\":\"tag_mystery_fragment\"}\n",
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected panel tag"), "stderr: {stderr}");
}

#[test]
fn save_file_survives_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    let state_json = serde_json::to_string(&state).unwrap();

    let first = run_sim(
        dir.path(),
        "",
        &format!(
            "{{\"event\":\"attach\",\"tag\":\"tag_callcard_fragment\"}}\n\
             {{\"event\":\"dialpad\",\"show\":true}}\n\
             {{\"event\":\"key\",\"key\":\"3\"}}\n\
             {{\"event\":\"save\",\"path\":{state_json}}}\n"
        ),
    );
    assert!(first.status.success());

    let second = run_sim(
        dir.path(),
        "",
        &format!(
            "{{\"event\":\"restore\",\"path\":{state_json}}}\n\
             {{\"event\":\"attach\",\"tag\":\"tag_callcard_fragment\"}}\n\
             {{\"event\":\"foreground\",\"foreground\":true}}\n"
        ),
    );
    assert!(second.status.success());
    assert!(effects(&second).contains(&UiEffect::SetDtmfText {
        text: "3".to_string()
    }));
}
