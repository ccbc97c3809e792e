use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a test command with a private state directory and none
/// of the host's tablectl environment leaking in.
fn tablectl(state: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tablectl").unwrap();
    cmd.env("TABLECTL_STATE_DIR", state.path());
    for var in [
        "TABLECTL_AUTO_RUN_EXAMPLES",
        "TABLESTORE_EMULATOR_HOST",
        "TABLECTL_ENABLE_ADMIN_EXAMPLES",
        "TABLECTL_PROJECT_ID",
        "TABLECTL_INSTANCE_ID",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

// ---------------------------------------------------------------------------
// Usage and dispatch errors
// ---------------------------------------------------------------------------

#[test]
fn missing_command_prints_usage_and_fails() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing command"))
        .stderr(predicate::str::contains(
            "Usage: tablectl <command> [arguments]",
        ))
        .stderr(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_is_reported_by_name() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .arg("nope")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: nope"));
}

#[test]
fn help_text_lists_every_command() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "create-table <project-id> <instance-id> <table-id>",
        ))
        .stderr(predicate::str::contains(
            "list-tables <project-id> <instance-id>",
        ))
        .stderr(predicate::str::contains(
            "delete-table <project-id> <instance-id> <table-id>",
        ))
        .stderr(predicate::str::contains(
            "cleanup-stale-tables <project-id> <instance-id> <prefix>",
        ))
        .stderr(predicate::str::contains("new-table-id <prefix>"))
        .stderr(predicate::str::contains("show-policy <bucket> <object>"));
}

#[test]
fn wrong_argument_count_prints_the_command_usage() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .args(["create-table", "proj"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "create-table <project-id> <instance-id> <table-id>",
        ));
}

// ---------------------------------------------------------------------------
// Table administration flow
// ---------------------------------------------------------------------------

#[test]
fn create_list_delete_flow() {
    let state = TempDir::new().unwrap();

    tablectl(&state)
        .args(["create-table", "proj", "inst", "accounts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created table accounts"));

    tablectl(&state)
        .args(["list-tables", "proj", "inst"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accounts"));

    tablectl(&state)
        .args(["delete-table", "proj", "inst", "accounts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted table accounts"));

    tablectl(&state)
        .args(["list-tables", "proj", "inst"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accounts").not());
}

#[test]
fn duplicate_create_reports_a_generic_error() {
    let state = TempDir::new().unwrap();

    tablectl(&state)
        .args(["create-table", "proj", "inst", "accounts"])
        .assert()
        .success();

    tablectl(&state)
        .args(["create-table", "proj", "inst", "accounts"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn deleting_a_missing_table_fails() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .args(["delete-table", "proj", "inst", "absent"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn cleanup_succeeds_on_an_empty_instance() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .args(["cleanup-stale-tables", "proj", "inst", "test-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Swept stale 'test-' tables"));
}

// ---------------------------------------------------------------------------
// Helper commands
// ---------------------------------------------------------------------------

#[test]
fn new_table_id_is_prefixed() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .args(["new-table-id", "demo-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("demo-"));
}

#[test]
fn show_policy_prints_both_documents() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .args(["show-policy", "travel-maps", "paris.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PolicyDocument={expiration="))
        .stdout(predicate::str::contains("PolicyDocumentV4={bucket=travel-maps"))
        .stdout(predicate::str::contains("starts-with, $key, paris.jpg"));
}

// ---------------------------------------------------------------------------
// Auto-run
// ---------------------------------------------------------------------------

#[test]
fn auto_run_requires_the_project_variables() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .env("TABLECTL_AUTO_RUN_EXAMPLES", "yes")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "TABLECTL_PROJECT_ID environment variable is not set",
        ));
}

#[test]
fn auto_run_skips_admin_examples_outside_the_emulator() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .env("TABLECTL_AUTO_RUN_EXAMPLES", "yes")
        .env("TABLECTL_PROJECT_ID", "proj")
        .env("TABLECTL_INSTANCE_ID", "inst")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto-").not());
}

#[test]
fn auto_run_exercises_the_admin_surface_under_the_emulator() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .env("TABLECTL_AUTO_RUN_EXAMPLES", "yes")
        .env("TABLESTORE_EMULATOR_HOST", "localhost:8086")
        .env("TABLECTL_PROJECT_ID", "proj")
        .env("TABLECTL_INSTANCE_ID", "inst")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto-"));

    // The throwaway table is removed again.
    tablectl(&state)
        .args(["list-tables", "proj", "inst"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto-").not());
}

#[test]
fn auto_run_flag_is_ignored_when_a_command_is_given() {
    let state = TempDir::new().unwrap();
    tablectl(&state)
        .env("TABLECTL_AUTO_RUN_EXAMPLES", "yes")
        .args(["new-table-id", "demo-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("demo-"));
}
