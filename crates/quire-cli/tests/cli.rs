/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests running the quire binary against files in a temp dir.
 */

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn quire(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quire"))
        .args(args)
        .env("RUST_LOG", "quire=warn")
        .output()
        .expect("Failed to execute quire")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_get_and_set_flat() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("app.ini");
    fs::write(&file, "; App\r\nname = demo ; keep me out\r\nport = 80\r\n").unwrap();
    let file = path_str(&file);

    let output = quire(&["get", file, "port"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "80\n");

    let output = quire(&["set", file, "port", "8080"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        fs::read_to_string(file).unwrap(),
        "; App\r\nname = demo ; keep me out\r\nport = 8080\r\n"
    );
}

#[test]
fn test_set_in_section_creates_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("new.ini");
    let file = path_str(&file);

    let output = quire(&["set", file, "host", "localhost", "--section", "db"]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(file).unwrap(), "[db]\r\nhost = localhost\r\n");

    let output = quire(&["get", file, "host", "--section", "db"]);
    assert_eq!(stdout(&output), "localhost\n");
}

#[test]
fn test_get_missing_key_fails() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("app.ini");
    fs::write(&file, "a = 1\r\n").unwrap();

    let output = quire(&["get", path_str(&file), "b"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Key `b` not found"));
}

#[test]
fn test_dump_json_with_headers() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("app.ini");
    fs::write(&file, "[A]\r\nk1 = v1\r\n[B]\r\nk2 = _SPACE_v2\r\n").unwrap();

    let output = quire(&["dump", path_str(&file), "--headers", "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["A"]["k1"], "v1");
    assert_eq!(json["B"]["k2"], "v2");
}

#[test]
fn test_dump_ini_flat() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("app.ini");
    fs::write(&file, "; c\r\nline = -(*3)\r\n\r\nk\\=x = v\r\n").unwrap();

    let output = quire(&["dump", path_str(&file)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "line = ---\nk\\=x = v\n");
}

#[test]
fn test_duplicate_key_fails_dump() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("dup.ini");
    fs::write(&file, "k = 1\r\nk = 2\r\n").unwrap();

    let output = quire(&["dump", path_str(&file)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate key `k`"));
}

#[test]
fn test_create_and_clear() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("gen.ini");
    let file = path_str(&file);

    let output = quire(&[
        "create",
        file,
        "--title",
        "Generated",
        "--subtitle",
        "by quire",
        "--set",
        "top=1",
        "--set",
        "db.host=localhost",
    ]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(file).unwrap(),
        "; Generated\r\n; by quire\r\n\r\ntop = 1\r\n[db]\r\nhost = localhost\r\n"
    );

    let output = quire(&["clear", file]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(file).unwrap(), "; Generated\r\n; by quire\r\n");
}

#[test]
fn test_base_dir_flag() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("dirs.ini");
    fs::write(&file, "logs = _BASEDIR_/logs\r\n").unwrap();

    let output = quire(&["get", path_str(&file), "logs", "--base-dir", "/srv/app"]);
    assert_eq!(stdout(&output), "/srv/app/logs\n");
}

#[test]
fn test_version_uses_library_name() {
    let output = quire(&["--version"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!("{} {}\n", quire::LIB_NAME, quire::VERSION)
    );
}

#[test]
fn test_set_multi_line_value_stays_on_one_line() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("app.ini");
    fs::write(&file, "motd = old\r\nport = 80\r\n").unwrap();
    let file = path_str(&file);

    let output = quire(&["set", file, "motd", "hello\nworld"]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(file).unwrap(),
        "motd = hello_ENTER_world\r\nport = 80\r\n"
    );
}
