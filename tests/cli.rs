use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn appbase(config: &Path, default_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("appbase");
    cmd.env_remove("RUST_LOG")
        .env_remove("APPBASE_CONFIG_DIR")
        .env_remove("APPBASE_DEFAULT_DIR")
        .arg("--config-dir")
        .arg(config)
        .arg("--default-dir")
        .arg(default_dir);
    cmd
}

#[test]
fn info_defaults_to_default_dir() {
    let tmp = tempdir().unwrap();
    let default_dir = tmp.path().join("dyad-apps");
    appbase(&tmp.path().join("cfg"), &default_dir)
        .args(["info", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isCustom\": false"))
        .stdout(predicate::str::contains("dyad-apps"));
}

#[test]
fn set_rejects_a_file() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("cfg");
    let file = tmp.path().join("passwd");
    fs::write(&file, "x").unwrap();

    appbase(&cfg, &tmp.path().join("dyad-apps"))
        .arg("set")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
    assert!(!cfg.join("settings.toml").exists());
}

#[test]
fn set_reports_a_missing_path() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("cfg");

    appbase(&cfg, &tmp.path().join("dyad-apps"))
        .arg("set")
        .arg(tmp.path().join("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
    assert!(!cfg.join("settings.toml").exists());
}

#[test]
fn info_shows_config_files() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("cfg");
    appbase(&cfg, &tmp.path().join("dyad-apps"))
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.toml"))
        .stdout(predicate::str::contains("apps.json"));
}

#[cfg(unix)]
#[test]
fn set_links_registered_apps_and_persists_override() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("cfg");
    let default_dir = tmp.path().join("dyad-apps");
    fs::create_dir_all(default_dir.join("foo")).unwrap();
    let new_base = tmp.path().join("new-apps");
    fs::create_dir_all(&new_base).unwrap();

    appbase(&cfg, &default_dir)
        .args(["apps", "add", "foo"])
        .assert()
        .success();

    appbase(&cfg, &default_dir)
        .arg("set")
        .arg(&new_base)
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked 1 app(s)"));

    assert!(fs::symlink_metadata(new_base.join("foo"))
        .unwrap()
        .file_type()
        .is_symlink());
    let settings = fs::read_to_string(cfg.join("settings.toml")).unwrap();
    assert!(settings.contains("customBaseDirectory"), "{}", settings);

    appbase(&cfg, &default_dir)
        .args(["info", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isCustom\": true"));

    appbase(&cfg, &default_dir)
        .args(["apps", "path", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("new-apps"));

    appbase(&cfg, &default_dir)
        .arg("reset")
        .assert()
        .success();
    let settings = fs::read_to_string(cfg.join("settings.toml")).unwrap();
    assert!(!settings.contains("customBaseDirectory"), "{}", settings);
}

#[test]
fn apps_list_is_newest_first() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("cfg");
    let default_dir = tmp.path().join("dyad-apps");
    for name in ["older", "newer"] {
        appbase(&cfg, &default_dir)
            .args(["apps", "add", name])
            .assert()
            .success();
    }

    let out = appbase(&cfg, &default_dir)
        .args(["apps", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let newer = text.find("newer").unwrap();
    let older = text.find("older").unwrap();
    assert!(newer < older, "{}", text);
}
