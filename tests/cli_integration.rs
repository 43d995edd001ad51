//! Integration tests for the Lockbox CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts cannot be driven here, so the master password
//! comes from `LOCKBOX_PASSWORD` and every destructive command gets
//! `--force`. Each test writes a `.lockbox.toml` with cheap Argon2
//! parameters so vault creation stays fast.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PASSWORD: &str = "correct-horse";

/// Helper: get a Command pointing at the lockbox binary.
fn lockbox() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("lockbox").expect("binary should exist")
}

/// Helper: a project directory with fast KDF settings.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".lockbox.toml")
        .write_str("argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n")
        .unwrap();
    tmp
}

/// Helper: a command running in `dir` with the master password set.
fn lockbox_in(dir: &TempDir, password: &str) -> Command {
    let mut cmd = lockbox();
    cmd.current_dir(dir.path())
        .env("LOCKBOX_PASSWORD", password)
        .env_remove("LOCKBOX_LOG");
    cmd
}

fn create_vault(dir: &TempDir, name: &str) {
    lockbox_in(dir, PASSWORD)
        .args(["create", name, "--description", "test vault"])
        .assert()
        .success();
}

#[test]
fn help_flag_shows_usage() {
    lockbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Password-protected local secret vaults"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn version_flag_shows_version() {
    lockbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn no_args_shows_help() {
    lockbox()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn create_writes_vault_file() {
    let tmp = project();
    create_vault(&tmp, "personal");

    tmp.child("vaults/personal.json")
        .assert(predicate::str::contains("\"Name\":\"personal\""))
        .assert(predicate::str::contains("EncodedEncryptedVaultKey"))
        .assert(predicate::str::contains("argon2id"));
}

#[test]
fn create_twice_fails() {
    let tmp = project();
    create_vault(&tmp, "personal");

    lockbox_in(&tmp, PASSWORD)
        .args(["create", "personal", "--description", "again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn create_rejects_path_in_name() {
    let tmp = project();

    lockbox_in(&tmp, PASSWORD)
        .args(["create", "a/b", "--description", "d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path separators"));
}

#[test]
fn create_rejects_short_password() {
    let tmp = project();

    lockbox_in(&tmp, "short")
        .args(["create", "personal", "--description", "d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));

    tmp.child("vaults/personal.json")
        .assert(predicate::path::missing());
}

#[test]
fn add_then_open_reveals_secret() {
    let tmp = project();
    create_vault(&tmp, "personal");

    lockbox_in(&tmp, PASSWORD)
        .args(["add", "personal", "email"])
        .write_stdin("me@example.com\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 total"));

    lockbox_in(&tmp, PASSWORD)
        .args(["open", "personal", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("email"))
        .stdout(predicate::str::contains("me@example.com"));
}

#[test]
fn open_masks_values_by_default() {
    let tmp = project();
    create_vault(&tmp, "personal");

    lockbox_in(&tmp, PASSWORD)
        .args(["add", "personal", "pin", "4321"])
        .assert()
        .success();

    lockbox_in(&tmp, PASSWORD)
        .args(["open", "personal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pin"))
        .stdout(predicate::str::contains("4321").not());
}

#[test]
fn wrong_password_shows_no_secrets() {
    let tmp = project();
    create_vault(&tmp, "personal");

    lockbox_in(&tmp, PASSWORD)
        .args(["add", "personal", "email", "me@example.com"])
        .assert()
        .success();

    lockbox_in(&tmp, "wrong")
        .args(["open", "personal", "--reveal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"))
        .stdout(predicate::str::contains("me@example.com").not());
}

#[test]
fn recoverable_error_suggests_retry() {
    let tmp = project();
    create_vault(&tmp, "personal");

    lockbox_in(&tmp, "wrong")
        .args(["open", "personal"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("try again"));
}

#[test]
fn missing_vault_does_not_suggest_retry() {
    let tmp = project();

    lockbox_in(&tmp, PASSWORD)
        .args(["open", "ghost"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("try again").not());
}

#[test]
fn list_skips_renamed_vault_file() {
    let tmp = project();
    create_vault(&tmp, "real");
    std::fs::rename(
        tmp.child("vaults/real.json").path(),
        tmp.child("vaults/other.json").path(),
    )
    .unwrap();

    lockbox_in(&tmp, PASSWORD)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("real").not())
        .stderr(predicate::str::contains("other.json"));
}

#[test]
fn remove_secret_with_force() {
    let tmp = project();
    create_vault(&tmp, "personal");

    lockbox_in(&tmp, PASSWORD)
        .args(["add", "personal", "email", "me@example.com"])
        .assert()
        .success();

    lockbox_in(&tmp, PASSWORD)
        .args(["remove", "personal", "email", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 left"));

    lockbox_in(&tmp, PASSWORD)
        .args(["remove", "personal", "email", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn delete_vault_with_force() {
    let tmp = project();
    create_vault(&tmp, "personal");

    lockbox_in(&tmp, PASSWORD)
        .args(["delete", "personal", "--force"])
        .assert()
        .success();

    tmp.child("vaults/personal.json")
        .assert(predicate::path::missing());
}

#[test]
fn list_shows_vaults_and_skips_broken_files() {
    let tmp = project();
    create_vault(&tmp, "alpha");
    create_vault(&tmp, "beta");
    tmp.child("vaults/broken.json").write_str("{ nope").unwrap();

    lockbox_in(&tmp, PASSWORD)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("2 vault(s)"))
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn open_missing_vault_fails() {
    let tmp = project();

    lockbox_in(&tmp, PASSWORD)
        .args(["open", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn vault_dir_flag_overrides_config() {
    let tmp = project();

    lockbox_in(&tmp, PASSWORD)
        .args(["--vault-dir", "elsewhere", "create", "v", "--description", "d"])
        .assert()
        .success();

    tmp.child("elsewhere/v.json").assert(predicate::path::exists());
    tmp.child("vaults/v.json").assert(predicate::path::missing());
}
