mod support;

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

use support::{CannedResponse, TestServer};

const BOTS: &str = r#"[{"id": 1, "name": "support"}]"#;
const USERS: &str = r#"[
    {"id": 9, "email": "ana@example.com", "role": "admin"},
    {"id": 10, "email": "bo@example.com", "role": "customer"}
]"#;

fn write_config(dir: &tempfile::TempDir, host: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!(
            "environment = \"prod\"\n\n[prod]\ntoken = \"secret\"\ncms = \"{host}\"\nintegrations_manager = \"{host}\"\n"
        ),
    )
    .unwrap();
    path
}

fn botctl(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("botctl").unwrap();
    cmd.env("BOTCTL_CONFIG", config);
    cmd
}

/// Serves the CMS fixture under the `/api/v1` prefix the gateway adds.
fn cms_server() -> TestServer {
    TestServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
        ("GET", "/api/v1/bots") => CannedResponse::json(200, BOTS),
        ("GET", "/api/v1/bots/1/users") => CannedResponse::json(200, USERS),
        ("POST", "/api/v1/bots") => CannedResponse::json(201, "{}"),
        ("PUT", "/api/v1/bots/1/users/10") => CannedResponse::json(200, "{}"),
        _ => CannedResponse::json(404, "{}"),
    })
}

#[test]
fn config_set_then_get_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    botctl(&config)
        .args(["config", "set", "prod/token", "abc"])
        .assert()
        .success();

    botctl(&config)
        .args(["config", "get", "prod/TOKEN"])
        .assert()
        .success()
        .stdout("abc\n");
}

#[test]
fn bare_variable_uses_the_default_environment() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "http://unused.example");

    botctl(&config)
        .args(["config", "get", "token"])
        .assert()
        .success()
        .stdout("secret\n");
}

#[test]
fn environment_flag_overrides_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "http://unused.example");

    botctl(&config)
        .args(["-e", "dev", "config", "set", "token", "dev-token"])
        .assert()
        .success();

    botctl(&config)
        .args(["config", "get", "dev/token"])
        .assert()
        .success()
        .stdout("dev-token\n");
}

#[test]
fn invalid_environment_token_exits_255() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    botctl(&config)
        .args(["config", "get", "bad!!/token"])
        .assert()
        .code(255)
        .stderr(predicate::str::contains("invalid platform environment"));
}

#[test]
fn invalid_variable_name_exits_255() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    botctl(&config)
        .args(["config", "get", "prod/nonsense"])
        .assert()
        .code(255)
        .stderr(predicate::str::contains("invalid variable name"));
}

#[test]
fn config_env_shows_and_updates_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    botctl(&config)
        .args(["config", "env"])
        .assert()
        .success()
        .stdout("dev\n");

    botctl(&config)
        .args(["config", "env", "staging"])
        .assert()
        .success();

    botctl(&config)
        .args(["config", "env"])
        .assert()
        .success()
        .stdout("staging\n");
}

#[test]
fn lsbots_prints_names() {
    let server = cms_server();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server.url());

    botctl(&config)
        .arg("lsbots")
        .assert()
        .success()
        .stdout("support\n");

    assert_eq!(
        server.requests()[0].authorization.as_deref(),
        Some("secret")
    );
}

#[test]
fn mkbot_posts_to_the_listing_endpoint() {
    let server = cms_server();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server.url());

    botctl(&config)
        .args(["mkbot", "helpdesk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created bot helpdesk"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/v1/bots");
}

#[test]
fn mkadmin_promotes_a_customer() {
    let server = cms_server();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server.url());

    botctl(&config)
        .args(["mkadmin", "support", "bo@example.com"])
        .assert()
        .success();

    let puts: Vec<_> = server
        .requests()
        .into_iter()
        .filter(|r| r.method == "PUT")
        .collect();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].path, "/api/v1/bots/1/users/10");
}

#[test]
fn mkadmin_on_an_admin_exits_1_without_a_mutating_request() {
    let server = cms_server();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server.url());

    botctl(&config)
        .args(["mkadmin", "support", "ana@example.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is an admin already"));

    assert!(
        server
            .requests()
            .iter()
            .all(|r| r.method == "GET"),
        "no mutating request may be issued"
    );
}

#[test]
fn mkadmin_on_a_non_member_exits_2() {
    let server = cms_server();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server.url());

    botctl(&config)
        .args(["mkadmin", "support", "ghost@example.com"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a bot user"));
}

#[test]
fn mkadmin_on_an_unknown_bot_exits_255() {
    let server = cms_server();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server.url());

    botctl(&config)
        .args(["mkadmin", "ghostbot", "ana@example.com"])
        .assert()
        .code(255)
        .stderr(predicate::str::contains("not a bot: ghostbot"));
}

#[test]
fn expired_token_exits_255() {
    let server = TestServer::start(|_| CannedResponse::json(401, "{}"));
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server.url());

    botctl(&config)
        .arg("lsbots")
        .assert()
        .code(255)
        .stderr(predicate::str::contains("token expired"));
}

#[test]
fn missing_host_configuration_exits_255() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    botctl(&config)
        .arg("lsbots")
        .assert()
        .code(255)
        .stderr(predicate::str::contains("no value configured for cms"));
}
