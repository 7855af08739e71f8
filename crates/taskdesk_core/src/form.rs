use crate::error::AppError;
use crate::media::ImageRef;
use crate::model::{Task, TaskPayload, UserRef};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    DueDate,
    TaskProgress,
    Priority,
    Hours,
    User,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::DueDate => "due date",
            Self::TaskProgress => "task progress",
            Self::Priority => "priority",
            Self::Hours => "hours",
            Self::User => "user",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a form creates a new task or rewrites an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Carries the task being edited so server-managed fields are resent as-is.
    Update(Task),
}

/// Field values as typed by the user, plus the picked image if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub task_progress: String,
    pub priority: String,
    pub hours: String,
    pub user_id: Option<i64>,
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub fields: FormFields,
}

impl TaskForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: FormFields::default(),
        }
    }

    /// A form pre-filled from an existing task. No image is picked.
    pub fn update(task: Task) -> Self {
        let fields = FormFields {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            task_progress: task.task_progress.clone(),
            priority: task.priority.clone(),
            hours: task.hours.to_string(),
            user_id: Some(task.user.id),
            image: None,
        };
        Self {
            mode: FormMode::Update(task),
            fields,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, FormMode::Update(_))
    }

    /// Photo URL to send when no new image was picked: the edited task's
    /// stored photo, or empty for a new task.
    pub fn current_photo_url(&self) -> String {
        match &self.mode {
            FormMode::Create => String::new(),
            FormMode::Update(task) => task.photo_url.clone().unwrap_or_default(),
        }
    }

    pub fn missing_fields(&self) -> Vec<FormField> {
        let fields = &self.fields;
        let mut missing = Vec::new();
        let blank = |value: &str| value.trim().is_empty();

        if blank(&fields.title) {
            missing.push(FormField::Title);
        }
        if blank(&fields.description) {
            missing.push(FormField::Description);
        }
        if fields.due_date.as_deref().is_none_or(blank) {
            missing.push(FormField::DueDate);
        }
        if blank(&fields.task_progress) {
            missing.push(FormField::TaskProgress);
        }
        if blank(&fields.priority) {
            missing.push(FormField::Priority);
        }
        if blank(&fields.hours) {
            missing.push(FormField::Hours);
        }
        if fields.user_id.is_none() {
            missing.push(FormField::User);
        }
        missing
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }

        let names: Vec<&str> = missing.iter().map(|field| field.label()).collect();
        Err(AppError::invalid_input(format!(
            "missing required fields: {}",
            names.join(", ")
        )))
    }

    pub fn parsed_hours(&self) -> Result<u64, AppError> {
        let raw = self.fields.hours.trim();
        raw.parse::<u64>().map_err(|_| {
            AppError::invalid_input(format!("hours must be a whole number, got '{raw}'"))
        })
    }

    /// Builds the create or update body around an already resolved photo URL.
    pub fn payload(&self, photo_url: String) -> Result<TaskPayload, AppError> {
        self.validate()?;
        let hours = self.parsed_hours()?;
        let user_id = self
            .fields
            .user_id
            .ok_or_else(|| AppError::invalid_input("missing required fields: user"))?;

        let (id, is_ready) = match &self.mode {
            FormMode::Create => (None, None),
            FormMode::Update(task) => (Some(task.id), task.is_ready.clone()),
        };

        Ok(TaskPayload {
            id,
            title: self.fields.title.clone(),
            description: self.fields.description.clone(),
            due_date: self.fields.due_date.clone(),
            task_progress: self.fields.task_progress.clone(),
            priority: self.fields.priority.clone(),
            photo_url,
            hours,
            is_ready,
            user: UserRef { id: user_id },
        })
    }

    pub fn reset(&mut self) {
        self.fields = FormFields::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{FormField, FormFields, TaskForm};
    use crate::model::{Task, User};

    fn filled_form() -> TaskForm {
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

    fn existing_task() -> Task {
        Task {
            id: 42,
            title: "Old".into(),
            description: "desc".into(),
            due_date: Some("2024-01-01".into()),
            task_progress: "doing".into(),
            priority: "high".into(),
            photo_url: Some("https://x/old.png".into()),
            hours: 3,
            is_ready: Some("N".into()),
            user: User {
                id: 5,
                user_name: "luis".into(),
                is_active: Some("S".into()),
            },
        }
    }

    #[test]
    fn empty_form_reports_every_field() {
        let form = TaskForm::create();
        assert_eq!(
            form.missing_fields(),
            vec![
                FormField::Title,
                FormField::Description,
                FormField::DueDate,
                FormField::TaskProgress,
                FormField::Priority,
                FormField::Hours,
                FormField::User,
            ]
        );

        let err = form.validate().unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert!(err.to_string().contains("title, description, due date"));
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let mut form = filled_form();
        form.fields.priority = "   ".into();
        form.fields.due_date = Some(String::new());

        assert_eq!(
            form.missing_fields(),
            vec![FormField::DueDate, FormField::Priority]
        );
    }

    #[test]
    fn payload_parses_hours_and_references_user() {
        let payload = filled_form().payload(String::new()).unwrap();

        assert_eq!(payload.id, None);
        assert_eq!(payload.hours, 1);
        assert_eq!(payload.user.id, 7);
        assert_eq!(payload.photo_url, "");
    }

    #[test]
    fn payload_rejects_non_numeric_hours() {
        let mut form = filled_form();
        form.fields.hours = "two".into();

        let err = form.payload(String::new()).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert!(err.to_string().contains("hours"));
    }

    #[test]
    fn update_form_carries_server_managed_fields() {
        let mut form = TaskForm::update(existing_task());
        assert!(form.is_update());
        assert_eq!(form.fields.hours, "3");
        assert_eq!(form.fields.user_id, Some(5));
        assert_eq!(form.fields.image, None);

        form.fields.title = "New".into();
        let payload = form.payload("https://x/new.png".into()).unwrap();

        assert_eq!(payload.id, Some(42));
        assert_eq!(payload.is_ready.as_deref(), Some("N"));
        assert_eq!(payload.title, "New");
        assert_eq!(payload.photo_url, "https://x/new.png");
    }

    #[test]
    fn current_photo_url_follows_mode() {
        assert_eq!(filled_form().current_photo_url(), "");
        assert_eq!(
            TaskForm::update(existing_task()).current_photo_url(),
            "https://x/old.png"
        );

        let without_photo = Task {
            photo_url: None,
            ..existing_task()
        };
        assert_eq!(TaskForm::update(without_photo).current_photo_url(), "");
    }

    #[test]
    fn reset_clears_fields_but_keeps_mode() {
        let mut form = filled_form();
        form.reset();
        assert_eq!(form, TaskForm::create());
    }
}
