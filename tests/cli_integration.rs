//! CLI integration tests for codecs
//!
//! These run the `codecs` binary end to end with an isolated config file.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the codecs binary
fn codecs_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("codecs"))
}

/// Create a temporary directory holding a config file with `content`
fn setup_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

/// A codecs command using an empty config
fn with_config(path: &PathBuf) -> assert_cmd::Command {
    let mut cmd = codecs_cmd();
    cmd.arg("--config").arg(path);
    cmd
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_list_shows_all_kinds() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Base64 Decoder"))
        .stdout(predicate::str::contains("Hex Encoder"))
        .stdout(predicate::str::contains("SHA256 Hasher"))
        .stdout(predicate::str::contains("Search and Replace Script"));
}

#[test]
fn test_list_filters_by_kind() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["list", "--kind", "hasher"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MD5"))
        .stdout(predicate::str::contains("Decoder").not());
}

#[test]
fn test_list_json() {
    let (_dir, config) = setup_config("");

    let output = with_config(&config)
        .args(["list", "--kind", "decoder", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["key"], "decoder:Base64");
    assert_eq!(items[0]["title"], "Base64 Decoder");
    assert_eq!(items[0]["author"], "codecs");
}

#[test]
fn test_disabled_commands_are_hidden() {
    let (_dir, config) = setup_config("disabled = [\"hasher:MD5\"]\n");

    with_config(&config)
        .args(["list", "--kind", "hasher"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MD5").not())
        .stdout(predicate::str::contains("SHA256"));
}

#[test]
fn test_unknown_kind_is_rejected() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["list", "--kind", "compressor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown codec kind"));
}

// =============================================================================
// Running
// =============================================================================

#[test]
fn test_run_encoder_with_argument() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["run", "encoder", "base64", "Hello"])
        .assert()
        .success()
        .stdout("SGVsbG8=\n");
}

#[test]
fn test_run_reads_stdin() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["run", "hasher", "sha256"])
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
        ));
}

#[test]
fn test_run_json_output() {
    let (_dir, config) = setup_config("");

    let output = with_config(&config)
        .args(["run", "decoder", "hex", "48656c6c6f", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["command"], "decoder:Hex");
    assert_eq!(json["output"], "Hello");
}

#[test]
fn test_run_unknown_command_fails() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["run", "hasher", "crc32", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Command not found: hasher:crc32"));
}

#[test]
fn test_run_decoder_error_is_reported() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["run", "decoder", "base64", "!!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Base64 Decoder failed"));
}

#[test]
fn test_run_unconfigured_script_fails() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["run", "script", "search and replace", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

// =============================================================================
// Selecting
// =============================================================================

#[test]
fn test_select_configures_script() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args([
            "select",
            "script",
            "search and replace",
            "the cat sat",
            "--set",
            "search=cat",
            "--set",
            "replace=dog",
        ])
        .assert()
        .success()
        .stdout("the dog sat\n");
}

#[test]
fn test_select_json_shows_dynamic_title() {
    let (_dir, config) = setup_config("");

    let output = with_config(&config)
        .args([
            "select",
            "script",
            "search and replace",
            "aaa",
            "--set",
            "search=a",
            "--set",
            "replace=b",
            "--format",
            "json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["title"], "Replace \"a\" with \"b\"");
    assert_eq!(json["output"], "bbb");
}

#[test]
fn test_select_rejects_malformed_assignment() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["select", "script", "search and replace", "x", "--set", "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected field=value"));
}

#[test]
fn test_select_defaults_to_run() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["select", "script", "upper case", "hello   world"])
        .assert()
        .success()
        .stdout("HELLO WORLD\n");
}

// =============================================================================
// Smart decode
// =============================================================================

#[test]
fn test_smart_decode_uses_configured_depth() {
    let (_dir, config) = setup_config("smart_decode_depth = 3\n");

    with_config(&config)
        .args(["smart-decode", "NDg2NTZjNmM2Zg=="])
        .assert()
        .success()
        .stdout("Hello\n");
}

#[test]
fn test_smart_decode_depth_flag() {
    let (_dir, config) = setup_config("");

    let output = with_config(&config)
        .args(["smart-decode", "NDg2NTZjNmM2Zg==", "--depth", "1", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["output"], "48656c6c6f");
    assert_eq!(json["steps"], serde_json::json!(["decoder:Base64"]));
}

#[test]
fn test_smart_decode_rejects_zero_depth() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["smart-decode", "NDg2NTZjNmM2Zg==", "--depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--depth"));
}

#[test]
fn test_smart_decode_without_match() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["smart-decode", "plain text"])
        .assert()
        .success()
        .stdout("plain text\n")
        .stderr(predicate::str::contains("No decoder matched"));
}

// =============================================================================
// Dependencies and configuration
// =============================================================================

#[test]
fn test_deps_reports_missing_filter_program() {
    let (_dir, config) = setup_config(
        r#"
[[filters]]
name = "Pretty"
program = "nonexistent_xyz_filter"
"#,
    );

    with_config(&config)
        .arg("deps")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pretty Script"))
        .stdout(predicate::str::contains("nonexistent_xyz_filter"));

    with_config(&config)
        .args(["list", "--kind", "script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pretty").not());
}

#[test]
fn test_deps_all_resolved() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .arg("deps")
        .assert()
        .success()
        .stdout(predicate::str::contains("All plugin dependencies resolved"));
}

#[cfg(unix)]
#[test]
fn test_filter_from_search_path() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("codecs-test-rev");
    fs::write(&tool, "#!/bin/sh\ntr a-z A-Z\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "search_paths = [{:?}]\n\n[[filters]]\nname = \"Shout\"\nprogram = {:?}\n",
            dir.path().display().to_string(),
            tool.display().to_string(),
        ),
    )
    .unwrap();

    with_config(&config_path)
        .args(["run", "script", "shout", "quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QUIET"));
}

#[test]
fn test_invalid_config_fails() {
    let (_dir, config) = setup_config("smart_decode_depth = 0\n");

    with_config(&config)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("smart_decode_depth"));
}

#[test]
fn test_config_json() {
    let (_dir, config) = setup_config("default_format = \"json\"\n");

    let output = with_config(&config).arg("config").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["config"]["default_format"], "json");
    assert_eq!(json["config"]["smart_decode_depth"], 1);
}

#[test]
fn test_verbose_logs_to_stderr() {
    let (_dir, config) = setup_config("");

    with_config(&config)
        .args(["--verbose", "run", "encoder", "hex", "A"])
        .assert()
        .success()
        .stdout("41\n")
        .stderr(predicate::str::contains("VERBOSE"));
}
