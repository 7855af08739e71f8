#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskdesk-cli-{nanos}-{file_name}"))
}

/// The binary with an isolated (missing) config file and no inherited
/// service address.
pub fn taskdesk() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_taskdesk"));
    cmd.env("TASKDESK_CONFIG_PATH", temp_path("config.json"))
        .env_remove("TASKDESK_BASE_URL")
        .env_remove("TASKDESK_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

pub async fn run_with_input(mut cmd: Command, input: &str) -> Output {
    cmd.stdin(Stdio::piped());
    let mut child = cmd.spawn().expect("spawn taskdesk");
    let mut stdin = child.stdin.take().expect("stdin");
    stdin.write_all(input.as_bytes()).await.expect("write stdin");
    drop(stdin);
    child.wait_with_output().await.expect("wait for taskdesk")
}

pub fn task_json(id: i64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "2%",
        "dueDate": "2024-05-01",
        "taskProgress": "todo",
        "priority": "low",
        "photoUrl": "",
        "hours": 1,
        "isReady": "N",
        "user": { "id": 7, "userName": "ana", "isActive": "S" }
    })
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
