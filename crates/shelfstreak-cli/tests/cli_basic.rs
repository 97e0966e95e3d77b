//! Basic CLI E2E tests.
//!
//! Each test gets its own HOME and database so runs never share state.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against the sandbox in `home` and return
/// (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_shelfstreak-cli"))
        .args(args)
        .env("HOME", home)
        .env("SHELFSTREAK_DB", home.join("shelf.db"))
        .env_remove("SHELFSTREAK_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let (stdout, stderr, code) = run_cli(home, &full);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("reply is not JSON")
}

#[test]
fn test_streak_add_and_continue() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["--today", "2024-03-01", "streakadd"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Reading Streak Started"));

    let (stdout, _, _) = run_cli(home.path(), &["--today", "2024-03-01", "streakadd"]);
    assert!(stdout.contains("You've already logged your reading for today!"));

    let reply = run_json(home.path(), &["--today", "2024-03-02", "streakadd"]);
    assert_eq!(
        reply["embed"]["description"],
        "Your current reading streak is now **2** days!"
    );
}

#[test]
fn test_broken_streak_is_red() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["--today", "2024-03-01", "streakadd"]);
    let reply = run_json(home.path(), &["--today", "2024-03-09", "streakadd"]);
    assert_eq!(reply["embed"]["title"], "Streak Broken");
    assert_eq!(reply["embed"]["color"], "#FF0000");
}

#[test]
fn test_override_permission_and_admin_config() {
    let home = tempfile::tempdir().unwrap();

    let denied = run_json(home.path(), &["--user", "42", "streakoverride", "7", "10"]);
    assert_eq!(denied["ephemeral"], true);
    assert_eq!(
        denied["content"],
        "You don't have permission to use this command."
    );

    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "admin.user_ids", "42"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let applied = run_json(
        home.path(),
        &["--user", "42", "--today", "2024-05-05", "streakoverride", "7", "10"],
    );
    assert_eq!(applied["embed"]["title"], "Streak Override");

    let status = run_json(home.path(), &["--user", "7", "streak"]);
    assert_eq!(
        status["embed"]["description"],
        "Your current reading streak is **10** days!"
    );
}

#[test]
fn test_negative_override_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "admin.user_ids", "42"]);
    let reply = run_json(home.path(), &["--user", "42", "streakoverride", "7", "-3"]);
    assert_eq!(reply["ephemeral"], true);
}

#[test]
fn test_goal_and_progress_without_books() {
    let home = tempfile::tempdir().unwrap();
    let set = run_json(home.path(), &["setgoal", "12"]);
    assert_eq!(
        set["embed"]["description"],
        "Your reading goal for this year is **12** books!"
    );
    let progress = run_json(home.path(), &["progress"]);
    assert_eq!(progress["content"], "You haven't added any books yet!");
}

#[test]
fn test_config_get_and_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "points.per_book"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10");

    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_backup_writes_a_copy() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["--today", "2024-03-01", "streakadd"]);
    let target = home.path().join("bk");
    let (stdout, stderr, code) =
        run_cli(home.path(), &["backup", "--dir", target.to_str().unwrap()]);
    assert_eq!(code, 0, "backup failed: {stderr}");
    assert!(Path::new(stdout.trim()).exists());
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Available Commands"));
}
