//! Integration tests for the `qd` CLI.
//!
//! Each test starts a mock quote service, runs `qd` as a subprocess from an
//! empty temp directory pointed at the mock, and checks stdout/stderr and
//! which endpoints were hit.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use httpmock::Method::PATCH;
use httpmock::prelude::*;
use serde_json::{Value, json};

/// Get the path to the built `qd` binary.
fn qd_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("qd");
    path
}

fn sample_quotes() -> Value {
    json!({
        "data": [
            {
                "id": "1",
                "name": "Alice Smith",
                "phone": "555-0101",
                "email": "alice@example.com",
                "service": "Roofing",
                "message": "Leaky roof",
                "created_at": "2025-03-07T12:00:00",
                "marked": false
            },
            {
                "id": "2",
                "name": "Bob Jones",
                "phone": "555-0102",
                "email": "bob@example.com",
                "service": "Plumbing",
                "message": "Burst pipe\nin the kitchen",
                "created_at": "2025-03-08T09:30:00",
                "marked": true
            },
            {
                "id": 3,
                "name": "Cara Lee",
                "phone": null,
                "email": "cara@example.com",
                "service": "Roofing",
                "message": "Gutters",
                "created_at": "2025-03-09T16:45:00"
            }
        ]
    })
}

/// A mock service answering GET /quotes with the sample data.
fn server_with_quotes() -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/quotes");
        then.status(200).json_body(sample_quotes());
    });
    server
}

fn qd_command(dir: &Path, server: &MockServer, args: &[&str]) -> Command {
    let mut cmd = Command::new(qd_bin());
    cmd.args(args)
        .arg("--api-url")
        .arg(server.base_url())
        .current_dir(dir)
        .env_remove("QD_API_URL")
        .env_remove("QD_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Run `qd` in `dir` against `server`. Returns (stdout, stderr, success).
fn run_qd(dir: &Path, server: &MockServer, args: &[&str]) -> (String, String, bool) {
    run_qd_with_input(dir, server, args, "")
}

fn run_qd_with_input(
    dir: &Path,
    server: &MockServer,
    args: &[&str],
    input: &str,
) -> (String, String, bool) {
    let mut child = qd_command(dir, server, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run qd");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `qd` expecting success, return stdout.
fn run_qd_ok(dir: &Path, server: &MockServer, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_qd(dir, server, args);
    if !success {
        panic!(
            "qd {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_list_defaults_to_not_marked() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();

    let out = run_qd_ok(tmp.path(), &server, &["list"]);
    assert!(out.contains("[New ] 1  Alice Smith  Roofing  07/03/2025"));
    assert!(out.contains("[New ] 3  Cara Lee"));
    assert!(!out.contains("Bob Jones"));
    assert!(out.contains("Showing 2 of 3 quotes"));
}

#[test]
fn test_list_search_by_field() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();

    let out = run_qd_ok(
        tmp.path(),
        &server,
        &["list", "--status", "all", "--field", "service", "--search", "ROOF"],
    );
    assert!(out.contains("Alice Smith"));
    assert!(out.contains("Cara Lee"));
    assert!(!out.contains("Bob Jones"));
    assert!(out.contains("Showing 2 of 3 quotes"));

    let out = run_qd_ok(
        tmp.path(),
        &server,
        &["list", "--status", "all", "--field", "date", "--search", "08/03"],
    );
    assert!(out.contains("Bob Jones"));
    assert!(out.contains("Showing 1 of 3 quotes"));
}

#[test]
fn test_list_no_matches() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();

    let out = run_qd_ok(tmp.path(), &server, &["list", "--search", "nobody"]);
    assert!(out.contains("No quotes found matching your criteria"));
    assert!(out.contains("Showing 0 of 3 quotes"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();

    let out = run_qd_ok(tmp.path(), &server, &["list", "--status", "marked", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["showing"], 1);
    assert_eq!(parsed["total"], 3);
    assert_eq!(parsed["quotes"][0]["id"], "2");
    assert_eq!(parsed["quotes"][0]["marked"], true);
}

#[test]
fn test_show_detail() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();

    let out = run_qd_ok(tmp.path(), &server, &["show", "2"]);
    assert!(out.contains("Quote 2"));
    assert!(out.contains("  Name:     Bob Jones"));
    assert!(out.contains("  Message:  Burst pipe\n            in the kitchen"));
    assert!(out.contains("  Received: 08/03/2025, 09:30 am"));
    assert!(out.contains("  Status:   Marked as Seen"));
}

#[test]
fn test_show_numeric_id_and_null_field() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();

    let out = run_qd_ok(tmp.path(), &server, &["show", "3", "--json"]);
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], "3");
    assert_eq!(parsed["phone"], "");
    assert_eq!(parsed["marked"], false);
}

#[test]
fn test_show_unknown_id() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();

    let (_, stderr, success) = run_qd(tmp.path(), &server, &["show", "42"]);
    assert!(!success);
    assert!(stderr.contains("error: quote not found: 42"));
}

#[test]
fn test_fetch_failure() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/quotes");
        then.status(500);
    });

    let (_, stderr, success) = run_qd(tmp.path(), &server, &["list"]);
    assert!(!success);
    assert!(stderr.contains("error: Failed to fetch quotes"));
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_sends_negation_and_prints_server_copy() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();
    let patch = server.mock(|when, then| {
        when.method(PATCH)
            .path("/quotes/1/marked")
            .json_body(json!({ "marked": true }));
        then.status(200).json_body(json!({
            "data": {
                "id": "1",
                "name": "Alice Smith",
                "phone": "555-0101",
                "email": "alice@example.com",
                "service": "Roofing (confirmed)",
                "message": "Leaky roof",
                "created_at": "2025-03-07T12:00:00",
                "marked": true
            }
        }));
    });

    let out = run_qd_ok(tmp.path(), &server, &["toggle", "1"]);
    patch.assert();
    // The server's representation wins
    assert!(out.contains("Service:  Roofing (confirmed)"));
    assert!(out.contains("Status:   Marked as Seen"));
}

#[test]
fn test_toggle_failure() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();
    server.mock(|when, then| {
        when.method(PATCH).path("/quotes/2/marked");
        then.status(502);
    });

    let (_, stderr, success) = run_qd(tmp.path(), &server, &["toggle", "2"]);
    assert!(!success);
    assert!(stderr.contains("error: Failed to update marked status. Please try again."));
    assert!(stderr.contains("502"));
}

#[test]
fn test_edit_sends_full_update() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();
    let put = server.mock(|when, then| {
        when.method(PUT).path("/quotes/1").json_body(json!({
            "name": "Alicia Smith",
            "phone": "555-0101",
            "email": "alice@example.com",
            "service": "Roofing",
            "message": "Roof and gutters"
        }));
        then.status(200).json_body(json!({
            "data": {
                "id": "1",
                "name": "Alicia Smith",
                "phone": "555-0101",
                "email": "alice@example.com",
                "service": "Roofing",
                "message": "Roof and gutters",
                "created_at": "2025-03-07T12:00:00",
                "marked": false
            }
        }));
    });

    let out = run_qd_ok(
        tmp.path(),
        &server,
        &[
            "edit",
            "1",
            "--name",
            "Alicia Smith",
            "--message",
            "Roof and gutters",
        ],
    );
    put.assert();
    assert!(out.contains("Name:     Alicia Smith"));
    assert!(out.contains("Message:  Roof and gutters"));
}

#[test]
fn test_edit_requires_a_field() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();

    let (_, stderr, success) = run_qd(tmp.path(), &server, &["edit", "1"]);
    assert!(!success);
    assert!(stderr.contains("error: nothing to change"));
}

#[test]
fn test_delete_with_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/quotes/3");
        then.status(200);
    });

    let out = run_qd_ok(tmp.path(), &server, &["delete", "3", "--yes"]);
    delete.assert();
    assert!(out.contains("deleted 3"));
}

#[test]
fn test_delete_declined_at_prompt() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/quotes/3");
        then.status(200);
    });

    let (out, stderr, success) =
        run_qd_with_input(tmp.path(), &server, &["delete", "3"], "n\n");
    assert!(success);
    assert!(out.contains("cancelled"));
    assert!(stderr.contains("Are you sure you want to delete this quote?"));
    delete.assert_hits(0);
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn test_config_file_sets_default_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = server_with_quotes();
    std::fs::write(
        tmp.path().join("quotedesk.toml"),
        "[ui]\ndefault_status = \"all\"\n",
    )
    .unwrap();

    let out = run_qd_ok(tmp.path(), &server, &["list"]);
    assert!(out.contains("Showing 3 of 3 quotes"));
}

#[test]
fn test_invalid_api_url() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = Command::new(qd_bin())
        .args(["list", "--api-url", "not a url"])
        .current_dir(tmp.path())
        .env_remove("QD_CONFIG")
        .output()
        .expect("failed to run qd");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: invalid API base URL"));
}
