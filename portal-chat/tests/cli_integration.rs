//! CLI integration tests for portal-chat

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the user's config and log settings
fn portal_chat(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("portal-chat").unwrap();
    cmd.env("PORTAL_CONFIG", temp_dir.path().join("missing.toml"))
        .env_remove("PORTAL_LOG_FORMAT")
        .env_remove("PORTAL_LOG_LEVEL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_options() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--reply-delay"))
        .stdout(predicate::str::contains("--log-format"));
}

#[test]
fn test_greeting_on_start() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Talking to Ms. Johnson (Science Teacher)"))
        .stdout(predicate::str::contains("2 unread notifications"));
}

#[test]
fn test_reply_arrives_before_exit() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .args(["--reply-delay", "10ms"])
        .write_stdin("Hi\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You: Hi"))
        .stdout(predicate::str::contains("Ms. Johnson is typing..."))
        .stdout(predicate::str::contains(
            "Ms. Johnson: Hello! How can I help you today",
        ));
}

#[test]
fn test_quit_cancels_pending_reply() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .args(["--reply-delay", "30s"])
        .write_stdin("Hi\n/quit\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending replies cancelled"))
        .stdout(predicate::str::contains("How can I help").not());
}

#[test]
fn test_new_contact_conversation() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .args(["--reply-delay", "10ms"])
        .write_stdin("/add Jane Doe | Principal\n/contacts\nCan we schedule a meeting?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Started a conversation with Jane Doe (Principal)"))
        .stdout(predicate::str::contains("(JD) - Principal | No messages yet"))
        .stdout(predicate::str::contains("Jane Doe: I'm available for a parent-teacher meeting"));
}

#[test]
fn test_form_errors_are_inline() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .write_stdin("/add\n/frobnicate\n/select 42\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Name is required"))
        .stdout(predicate::str::contains("Error: Unknown command: /frobnicate"))
        .stdout(predicate::str::contains("Error: No contact with id 42"));
}

#[test]
fn test_second_send_shows_typing_again() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .args(["--reply-delay", "200ms"])
        .write_stdin("Hello\nHow are the grades?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ms. Johnson is typing...").count(2))
        .stdout(predicate::str::contains("performing well in recent assessments"));
}

#[test]
fn test_settings_forms() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .write_stdin("/feedback Pickup | short\n/password old | eight888 | eight889\n/password old | eight888 | eight888\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Message must be at least 10 characters"))
        .stdout(predicate::str::contains("Error: Passwords do not match"))
        .stdout(predicate::str::contains("Password updated successfully!"));
}

#[test]
fn test_calendar_commands() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .write_stdin("/book Ms. Johnson | 2099-01-15 | 16:30 | Project check-in\n/events 2099-01-15\n/unbook 1\n/undo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Appointment scheduled: Meeting with Ms. Johnson on 2099-01-15 at 16:30",
        ))
        .stdout(predicate::str::contains("Events on January 15, 2099"))
        .stdout(predicate::str::contains("Event \"Parent-Teacher Conference\" deleted"))
        .stdout(predicate::str::contains("Event \"Parent-Teacher Conference\" restored"));
}

#[test]
fn test_config_file_sets_user_label() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[messaging]
reply_delay = "5ms"
user_label = "Parent"
"#,
    )
    .unwrap();

    portal_chat(&temp_dir)
        .arg("--config")
        .arg(&config_path)
        .write_stdin("Thanks\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parent: Thanks"))
        .stdout(predicate::str::contains("Ms. Johnson: You're welcome!"));
}

#[test]
fn test_invalid_reply_delay_fails() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .args(["--reply-delay", "soon"])
        .write_stdin("")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration 'soon'"));
}

#[test]
fn test_unknown_log_format_is_a_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .args(["--log-format", "xml"])
        .write_stdin("")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown log format 'xml'"));
}

#[test]
fn test_log_format_flag_accepts_json() {
    let temp_dir = TempDir::new().unwrap();
    portal_chat(&temp_dir)
        .args(["--log-format", "json"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Talking to Ms. Johnson"));
}

#[test]
fn test_malformed_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[messaging\nreply_delay = ").unwrap();

    portal_chat(&temp_dir)
        .arg("--config")
        .arg(&config_path)
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}
