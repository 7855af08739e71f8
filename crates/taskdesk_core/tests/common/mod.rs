//! Shared fixtures for the flow tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use taskdesk_core::AppError;
use taskdesk_core::form::{FormFields, TaskForm};
use taskdesk_core::notify::{Notice, Notifier};
use taskdesk_core::remote::{ClientConfig, HttpTaskService, TaskService};
use wiremock::MockServer;

pub fn service_for(server: &MockServer) -> Arc<dyn TaskService> {
    let config = ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    };
    Arc::new(HttpTaskService::new(&config).expect("client init"))
}

#[allow(dead_code)]
pub fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskdesk-{nanos}-{file_name}"))
}

pub fn milk_form() -> TaskForm {
    TaskForm {
        fields: FormFields {
            title: "Buy milk".into(),
            description: "2%".into(),
            due_date: Some("2024-05-01".into()),
            task_progress: "todo".into(),
            priority: "low".into(),
            hours: "1".into(),
            user_id: Some(7),
            image: None,
        },
        ..TaskForm::create()
    }
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

#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .map(|notice| notice.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), AppError> {
        self.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }
}
