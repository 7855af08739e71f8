use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskdesk_core::AppError;
use taskdesk_core::config::Palette;
use taskdesk_core::model::{Task, User};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Photo")]
    photo: &'static str,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "User")]
    user_name: String,
    #[tabled(rename = "Active")]
    active: String,
}

pub fn task_table(tasks: &[Task], palette: &Palette) -> String {
    if tasks.is_empty() {
        return palette.mutedize("No tasks found");
    }

    let rows = tasks.iter().map(|task| TaskRow {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        user: task.user.user_name.clone(),
        photo: if task.photo().is_some() { "yes" } else { "-" },
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n{}", palette.accentize("Tasks"), table)
}

pub fn user_table(users: &[User], palette: &Palette) -> String {
    if users.is_empty() {
        return palette.mutedize("No users found");
    }

    let rows = users.iter().map(|user| UserRow {
        id: user.id,
        user_name: user.user_name.clone(),
        active: user.is_active.clone().unwrap_or_else(|| "-".to_string()),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n{}", palette.accentize("Users"), table)
}

pub fn task_detail(task: &Task, palette: &Palette) -> String {
    let mut lines = vec![
        palette.accentize(&format!("{} ({})", task.title, task.id)),
        task.description.clone(),
        format!("Due date: {}", task.due_date.as_deref().unwrap_or("-")),
        format!("Progress: {}", task.task_progress),
        format!("Priority: {}", task.priority),
        format!("Hours: {}", task.hours),
        format!("User: {}", task.user.user_name),
    ];
    if let Some(photo) = task.photo() {
        lines.push(format!("Photo: {photo}"));
    }
    lines.join("\n")
}

pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string(value)?)
}
