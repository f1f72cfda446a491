mod common;

use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use common::{kikiqr_cmd, pixel};
use kikiqr::{Color, DEFAULT_OUTPUT, QrStyle, verify_file};

fn json_summary(cmd: &mut assert_cmd::Command) -> Value {
    let out = cmd
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).expect("valid json output")
}

fn side(summary: &Value, border: u64, scale: u64) -> u64 {
    let modules = summary["modules"].as_u64().expect("modules");
    (modules + 2 * border) * scale
}

fn failure_stderr(cmd: &mut assert_cmd::Command) -> String {
    let out = cmd.assert().failure().code(1).get_output().stderr.clone();
    String::from_utf8_lossy(&out).into_owned()
}

#[test]
fn env_overrides_scale_and_dark() {
    let tmp = TempDir::new().expect("temp dir");
    let summary = json_summary(
        kikiqr_cmd(tmp.path())
            .env("KIKIQR_SCALE", "3")
            .env("KIKIQR_DARK", "#000"),
    );
    assert_eq!(summary["width"].as_u64(), Some(side(&summary, 2, 3)));

    let path = tmp.path().join(DEFAULT_OUTPUT);
    let img = image::open(&path).expect("open png");
    // timing pattern module (8, 6)
    assert_eq!(pixel(&img, (8 + 2) * 3 + 1, (6 + 2) * 3 + 1), Color::rgb(0, 0, 0));

    let style = QrStyle {
        scale: 3,
        dark: Color::rgb(0, 0, 0),
        ..QrStyle::default()
    };
    verify_file(&path, &style, kikiqr::DEFAULT_URL).expect("still decodes");
}

#[test]
fn env_overrides_payload_output_and_verify() {
    let tmp = TempDir::new().expect("temp dir");
    let summary = json_summary(
        kikiqr_cmd(tmp.path())
            .env("KIKIQR_URL", "https://example.org/env")
            .env("KIKIQR_OUTPUT", "env.png")
            .env("KIKIQR_VERIFY", "on")
            .env("KIKIQR_ERROR_CORRECTION", "h"),
    );
    assert_eq!(summary["payload"], "https://example.org/env");
    assert_eq!(summary["path"], "env.png");
    assert_eq!(summary["verification"], "passed");
    assert_eq!(summary["error_correction"], "H");
    assert!(tmp.path().join("env.png").exists());
    assert!(!tmp.path().join(DEFAULT_OUTPUT).exists());
}

#[test]
fn flags_take_precedence_over_env() {
    let tmp = TempDir::new().expect("temp dir");
    let summary = json_summary(
        kikiqr_cmd(tmp.path())
            .env("KIKIQR_SCALE", "3")
            .env("KIKIQR_BORDER", "1")
            .args(["--scale", "5"]),
    );
    assert_eq!(summary["width"].as_u64(), Some(side(&summary, 1, 5)));
}

#[test]
fn unparsable_env_scale_fails() {
    let tmp = TempDir::new().expect("temp dir");
    let stderr = failure_stderr(kikiqr_cmd(tmp.path()).env("KIKIQR_SCALE", "x"));
    assert!(stderr.contains("KIKIQR_SCALE"), "stderr: {stderr}");
    assert!(!tmp.path().join(DEFAULT_OUTPUT).exists());
}

#[test]
fn unknown_env_error_correction_fails() {
    let tmp = TempDir::new().expect("temp dir");
    let stderr = failure_stderr(kikiqr_cmd(tmp.path()).env("KIKIQR_ERROR_CORRECTION", "Z"));
    assert!(stderr.contains("error correction"), "stderr: {stderr}");
}

#[test]
fn invalid_env_color_fails() {
    let tmp = TempDir::new().expect("temp dir");
    let stderr = failure_stderr(kikiqr_cmd(tmp.path()).env("KIKIQR_FINDER_DARK", "amber"));
    assert!(stderr.contains("amber"), "stderr: {stderr}");
}

#[test]
fn empty_env_quiet_zone_clears_configured_one() {
    let tmp = TempDir::new().expect("temp dir");
    fs::write(
        tmp.path().join("kikiqr.toml"),
        "[style]\nquiet_zone = \"#ffffff\"\n",
    )
    .expect("write config");
    let path = tmp.path().join(DEFAULT_OUTPUT);

    kikiqr_cmd(tmp.path()).assert().success();
    let img = image::open(&path).expect("open png");
    assert_eq!(pixel(&img, 0, 0), Color::rgb(255, 255, 255));

    kikiqr_cmd(tmp.path())
        .env("KIKIQR_QUIET_ZONE", "")
        .assert()
        .success();
    let img = image::open(&path).expect("open png");
    assert_eq!(pixel(&img, 0, 0), QrStyle::default().light);
}

#[test]
fn xdg_config_is_discovered() {
    let tmp = TempDir::new().expect("temp dir");
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(xdg.join("kikiqr")).expect("create xdg dir");
    fs::write(
        xdg.join("kikiqr").join("config.toml"),
        "[output]\npath = \"xdg.png\"\n\n[style]\nborder = 0\n",
    )
    .expect("write config");

    let summary = json_summary(kikiqr_cmd(tmp.path()).env("XDG_CONFIG_HOME", &xdg));
    assert_eq!(summary["path"], "xdg.png");
    assert_eq!(summary["width"].as_u64(), Some(side(&summary, 0, 7)));
}

#[test]
fn cwd_config_wins_over_xdg() {
    let tmp = TempDir::new().expect("temp dir");
    let xdg = tmp.path().join("xdg");
    fs::create_dir_all(xdg.join("kikiqr")).expect("create xdg dir");
    fs::write(
        xdg.join("kikiqr").join("config.toml"),
        "[output]\npath = \"xdg.png\"\n",
    )
    .expect("write xdg config");
    fs::write(
        tmp.path().join("kikiqr.yaml"),
        "output:\n  path: cwd.png\n",
    )
    .expect("write cwd config");

    let summary = json_summary(kikiqr_cmd(tmp.path()).env("XDG_CONFIG_HOME", &xdg));
    assert_eq!(summary["path"], "cwd.png");
}

#[test]
fn explicit_config_flag_is_used() {
    let tmp = TempDir::new().expect("temp dir");
    let config = tmp.path().join("custom.toml");
    fs::write(&config, "[payload]\nurl = \"https://example.org/flag\"\n").expect("write config");

    let summary = json_summary(
        kikiqr_cmd(tmp.path()).args(["--config", config.to_str().expect("utf-8 path")]),
    );
    assert_eq!(summary["payload"], "https://example.org/flag");
}

fn log_contents(dir: &Path, prefix: &str) -> String {
    fs::read_dir(dir)
        .expect("log dir exists")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .map(|entry| fs::read_to_string(entry.path()).expect("read log"))
        .collect()
}

#[test]
fn log_file_receives_info_events() {
    let tmp = TempDir::new().expect("temp dir");
    let logs = tmp.path().join("logs");

    kikiqr_cmd(tmp.path())
        .env("KIKIQR_LOG_FILE", logs.join("kikiqr.log"))
        .env("KIKIQR_LOG_LEVEL", "info")
        .assert()
        .success();

    let contents = fs::read_to_string(logs.join("kikiqr.log")).expect("log written");
    assert!(contents.contains("Wrote QR image"), "log: {contents}");
    assert!(!contents.contains('\u{1b}'), "log file must be plain text");
}

#[test]
fn rotated_log_file_receives_info_events() {
    let tmp = TempDir::new().expect("temp dir");
    let logs = tmp.path().join("logs");

    kikiqr_cmd(tmp.path())
        .env("KIKIQR_LOG_FILE", logs.join("kikiqr.log"))
        .env("KIKIQR_LOG_ROTATION", "daily")
        .env("KIKIQR_LOG_LEVEL", "info")
        .assert()
        .success();

    let contents = log_contents(&logs, "kikiqr.log.");
    assert!(contents.contains("Wrote QR image"), "log: {contents}");
}

#[test]
fn console_logs_go_to_stderr_without_color() {
    let tmp = TempDir::new().expect("temp dir");
    let out = kikiqr_cmd(tmp.path())
        .env("KIKIQR_LOG_LEVEL", "info")
        .env("KIKIQR_LOG_COLOR", "0")
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Wrote QR image"), "stderr: {stderr}");
    assert!(!stderr.contains('\u{1b}'), "stderr: {stderr}");
    serde_json::from_slice::<Value>(&out.stdout).expect("stdout stays pure json");
}
