mod common;

use common::{stdout, taskdesk};

#[tokio::test]
async fn help_lists_commands() {
    let output = taskdesk()
        .arg("--help")
        .output()
        .await
        .expect("failed to run taskdesk --help");

    assert!(output.status.success());
    let stdout = stdout(&output);
    for command in ["list", "users", "show", "add", "update", "delete"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[tokio::test]
async fn unknown_command_reports_invalid_input() {
    let output = taskdesk()
        .arg("archive")
        .output()
        .await
        .expect("failed to run taskdesk");

    assert!(!output.status.success());
    assert!(common::stderr(&output).contains("ERROR: invalid_input"));
}

#[tokio::test]
async fn bad_config_override_is_rejected() {
    let output = taskdesk()
        .args(["list", "--config-override", "colour=red"])
        .output()
        .await
        .expect("failed to run taskdesk");

    assert!(!output.status.success());
    let stderr = common::stderr(&output);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(stderr.contains("unknown config field"));
}
