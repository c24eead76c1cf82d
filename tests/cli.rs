use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

const DEFAULT_ROOT: &str = "app/src/main/java/com/example/shots";

fn repackage(cwd: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_repackage"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("run repackage")
}

fn seed_project(cwd: &Path) {
    let root = cwd.join(DEFAULT_ROOT);
    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(
        root.join("MainActivity.kt"),
        "package com.example.espressoshots\n\nimport com.example.espressoshots.data.Shot\n",
    )
    .unwrap();
    fs::write(root.join("data/Shot.kt"), "package com.example.shots.data\n").unwrap();
}

#[test]
fn no_arguments_rewrites_default_tree() {
    let dir = tempdir().unwrap();
    seed_project(dir.path());

    let output = repackage(dir.path(), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("✓ Updated: "));
    assert!(stdout.contains("MainActivity.kt"));
    assert!(!stdout.contains("Shot.kt"));
    assert!(stdout.contains("Total files updated: 1"));
    assert_eq!(
        fs::read_to_string(dir.path().join(DEFAULT_ROOT).join("MainActivity.kt")).unwrap(),
        "package com.example.shots\n\nimport com.example.shots.data.Shot\n"
    );
}

#[test]
fn missing_default_root_reports_zero() {
    let dir = tempdir().unwrap();

    let output = repackage(dir.path(), &[]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Total files updated: 0"));
}

#[test]
fn json_mode_prints_envelope() {
    let dir = tempdir().unwrap();
    seed_project(dir.path());

    let output = repackage(dir.path(), &["--json", "--dry-run"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["command"], "fix");
    assert_eq!(value["data"]["batch"]["updated"], 1);
    assert!(value["data"].get("filesUpdated").is_none());
    assert_eq!(value["data"]["applied"], false);
    assert!(fs::read_to_string(dir.path().join(DEFAULT_ROOT).join("MainActivity.kt"))
        .unwrap()
        .contains("espressoshots"));
}

#[test]
fn undecodable_file_reported_and_exit_is_success() {
    let dir = tempdir().unwrap();
    seed_project(dir.path());
    let broken = dir.path().join(DEFAULT_ROOT).join("Broken.kt");
    fs::write(&broken, b"package com.example.espressoshots\n\xff\xfe\n").unwrap();

    let output = repackage(dir.path(), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("✗ Error in "));
    assert!(stdout
        .lines()
        .any(|line| line.starts_with("✗ Error in ") && line.contains("Broken.kt: ")));
    assert!(stdout.contains("Total files updated: 1"));
    assert_eq!(
        fs::read(&broken).unwrap(),
        b"package com.example.espressoshots\n\xff\xfe\n"
    );
}

#[test]
fn files_under_dot_dirs_are_rewritten() {
    let dir = tempdir().unwrap();
    let model = dir.path().join(DEFAULT_ROOT).join("feature/.hg/Model.kt");
    fs::create_dir_all(model.parent().unwrap()).unwrap();
    fs::write(&model, "package com.example.espressoshots.feature\n").unwrap();

    let output = repackage(dir.path(), &[]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Total files updated: 1"));
    assert_eq!(
        fs::read_to_string(&model).unwrap(),
        "package com.example.shots.feature\n"
    );
}

#[test]
fn config_in_working_directory_ignored_without_flag() {
    let dir = tempdir().unwrap();
    seed_project(dir.path());
    fs::write(dir.path().join("repackage.json"), "{ not json").unwrap();

    let output = repackage(dir.path(), &[]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Total files updated: 1"));
}

#[test]
fn invalid_config_exits_with_code_2() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("repackage.json"), "{ not json").unwrap();

    let output = repackage(dir.path(), &["--json", "--config", "repackage.json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(value["success"], false);
    assert_eq!(value["error"]["code"], "config.invalid_json");
}

#[test]
fn custom_namespace_and_path() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/App.kt"), "package org.old.app\n").unwrap();

    let output = repackage(
        dir.path(),
        &["--path", "src", "--from", "org.old", "--to", "org.new"],
    );

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("src/App.kt")).unwrap(),
        "package org.new.app\n"
    );
}
