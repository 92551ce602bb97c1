use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REGISTRY: &str = r#"{
  "data": {
    "devices": [
      {"device": "AA:BB", "model": "H6072", "deviceName": "Lamp", "controllable": true, "retrievable": true, "supportCmds": ["turn", "brightness"]}
    ]
  },
  "message": "Success",
  "code": 200
}"#;

fn goveectl(registry: &Path) -> Command {
    let mut cmd = Command::cargo_bin("goveectl").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("GOVEE_APIKEY")
        .env_remove("GOVEE_API_URL")
        .arg("--registry")
        .arg(registry);
    cmd
}

fn registry_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("devices.json");
    std::fs::write(&path, REGISTRY).unwrap();
    path
}

#[test]
fn test_help_lists_control_commands() {
    Command::cargo_bin("goveectl")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("brightness"))
        .stdout(predicate::str::contains("color-temp"));
}

#[test]
fn test_out_of_range_brightness_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_file(&dir);

    goveectl(&registry)
        .args(["--api-key", "k", "--api-url", "http://127.0.0.1:9"])
        .args(["brightness", "150", "Lamp"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("\"validation\""));
}

#[test]
fn test_malformed_color_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_file(&dir);

    goveectl(&registry)
        .args(["--api-key", "k", "color", "255,0", "Lamp"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"invalid_input\""));
}

#[test]
fn test_cached_without_registry() {
    let dir = tempfile::tempdir().unwrap();

    goveectl(&dir.path().join("missing.json"))
        .args(["devices", "cached"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"registry_not_found\""));
}

#[test]
fn test_cached_prints_registry() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_file(&dir);

    goveectl(&registry)
        .args(["devices", "cached"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Lamp\""))
        .stdout(predicate::str::contains("AA:BB"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_turn_off_sends_one_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/devices/control"))
        .and(body_json(json!({
            "device": "AA:BB",
            "model": "H6072",
            "cmd": {"name": "turn", "value": "off"}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 200, "message": "ok"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let registry = registry_file(&dir);

    goveectl(&registry)
        .args(["--api-key", "k", "--api-url", server.uri().as_str()])
        .args(["turn", "off", "Lamp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sent\": 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API Key"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let registry = registry_file(&dir);

    goveectl(&registry)
        .args(["--api-key", "bad", "--api-url", server.uri().as_str()])
        .args(["turn", "on", "Lamp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"status\": 401"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_writes_registry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REGISTRY))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("fresh.json");

    goveectl(&registry)
        .args(["--api-key", "k", "--api-url", server.uri().as_str()])
        .args(["devices", "sync"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&registry).unwrap();
    assert!(written.contains("\"savedAt\""));
    assert!(written.contains("\"deviceName\": \"Lamp\""));
}
