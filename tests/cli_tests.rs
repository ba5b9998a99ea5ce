//! CLI integration tests
//!
//! Each test runs against its own temporary archive, cache and home directory.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary archive with `php/sample1` (described) and `js/slider` (bare)
fn fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let item = temp_dir.path().join("code/php/sample1");
    fs::create_dir_all(item.join("lib")).unwrap();
    fs::write(
        item.join("README.txt"),
        "TITLE: Sample One\nKEYWORDS: demo, test\nDESCRIPTION: A demo.\n\n",
    )
    .unwrap();
    fs::write(item.join("index.php"), "<?php echo 'hello';\n").unwrap();
    fs::write(item.join("lib/util.php"), "<?php // util\n").unwrap();
    fs::create_dir_all(temp_dir.path().join("code/js/slider")).unwrap();
    fs::create_dir_all(temp_dir.path().join("home")).unwrap();
    temp_dir
}

/// Get a command for the codeshelf binary pointed at the fixture
fn codeshelf(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("codeshelf").unwrap();
    cmd.env("HOME", dir.join("home"))
        .env_remove("CODESHELF_ROOT")
        .env_remove("CODESHELF_CACHE_DIR")
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(dir.join("code"))
        .arg("--cache-dir")
        .arg(dir.join("cache"));
    cmd
}

#[test]
fn test_help() {
    Command::cargo_bin("codeshelf")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("archive of categorized code samples"));
}

#[test]
fn test_version() {
    Command::cargo_bin("codeshelf")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("codeshelf"));
}

#[test]
fn test_search_help() {
    Command::cargo_bin("codeshelf")
        .unwrap()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--case-sensitive"))
        .stdout(predicate::str::contains("--no-title"))
        .stdout(predicate::str::contains("--no-keywords"))
        .stdout(predicate::str::contains("--no-description"));
}

#[test]
fn test_categories() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("JS"))
        .stdout(predicate::str::contains("PHP"));
}

#[test]
fn test_list_category() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["list", "php"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample One"))
        .stdout(predicate::str::contains("demo, test"));
}

#[test]
fn test_list_creates_missing_description() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Slider"));

    assert!(tmp.path().join("code/js/slider/README.txt").exists());
}

#[test]
fn test_list_unknown_category() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["list", "ruby"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Category not found: ruby"));
}

#[test]
fn test_search_json_shape() {
    let tmp = fixture();
    let output = codeshelf(tmp.path())
        .args(["--output", "json", "search", "demo"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["php"]["sample1"]["title"], "Sample One");
    assert_eq!(value.as_object().unwrap().len(), 1);
}

#[test]
fn test_search_no_match() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["search", "zzz-nomatch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results."));

    codeshelf(tmp.path())
        .args(["--output", "json", "search", "zzz-nomatch"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"));
}

#[test]
fn test_search_field_toggle() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["search", "Sample", "--no-title"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results."));
}

#[test]
fn test_search_writes_cache() {
    let tmp = fixture();
    codeshelf(tmp.path()).args(["search", "demo"]).assert().success();
    assert!(tmp.path().join("cache/snapshot.json").exists());
}

#[test]
fn test_keyword() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["keyword", "test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample One"));
}

#[test]
fn test_show_item() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["show", "php", "sample1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.php"))
        .stdout(predicate::str::contains("/lib/"));
}

#[test]
fn test_show_item_with_file() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["show", "php", "sample1", "lib/util.php"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<?php // util"));
}

#[test]
fn test_show_missing_item() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["show", "php", "ghost"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Item not found"));
}

#[test]
fn test_cat_file() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["cat", "php", "sample1", "index.php"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?php echo 'hello';\n"));
}

#[test]
fn test_cat_rejects_path_escape() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["cat", "php", "sample1", "../../README.txt"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_download() {
    let tmp = fixture();
    let dest = tmp.path().join("downloads");
    fs::create_dir_all(&dest).unwrap();

    codeshelf(tmp.path())
        .args(["download", "php", "sample1", "index.php", "--dest"])
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    assert_eq!(
        fs::read_to_string(dest.join("index.php")).unwrap(),
        "<?php echo 'hello';\n"
    );
}

#[test]
fn test_cache_lifecycle() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["cache", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache Status"))
        .stdout(predicate::str::contains("Not cached"));

    codeshelf(tmp.path())
        .args(["cache", "rebuild"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache rebuilt with 2 items"));

    codeshelf(tmp.path())
        .args(["cache", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries: 2"))
        .stdout(predicate::str::contains("fresh"));

    codeshelf(tmp.path())
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared"));
    assert!(!tmp.path().join("cache/snapshot.json").exists());
}

#[test]
fn test_config_path() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".codeshelf/config.toml"));
}

#[test]
fn test_config_set_and_show() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["config", "set", "cache.ttl_secs", "120"])
        .assert()
        .success();

    codeshelf(tmp.path())
        .args(["--output", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ttl_secs\": 120"));

    codeshelf(tmp.path())
        .args(["config", "set", "output.format", "xml"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_invalid_command() {
    Command::cargo_bin("codeshelf")
        .unwrap()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["--quiet", "--verbose", "categories"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_output_format_options() {
    let tmp = fixture();
    codeshelf(tmp.path())
        .args(["--output", "json", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"php\""));

    codeshelf(tmp.path())
        .args(["--output", "invalid", "categories"])
        .assert()
        .failure();
}
