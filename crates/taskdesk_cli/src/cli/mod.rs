use clap::{Args, Parser, Subcommand};
use taskdesk_core::config::ConfigOverrides;
use taskdesk_core::form::TaskForm;
use taskdesk_core::media::ImageRef;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task service address, e.g. http://10.0.2.2:1111
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks
    ///
    /// Example: taskdesk list
    List,
    /// List users that tasks can be assigned to
    ///
    /// Example: taskdesk users
    Users,
    /// Show details of a task
    ///
    /// Example: taskdesk show 42
    Show { id: i64 },
    /// Add a new task
    ///
    /// Example: taskdesk add --title "Buy milk" --description 2% --due-date 2024-05-01
    ///          --progress todo --priority low --hours 1 --user 7 --image ~/photo.jpg
    Add {
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Update a task; omitted fields keep their current value
    ///
    /// Example: taskdesk update 42 --title "Buy oat milk"
    Update {
        id: i64,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task after confirmation
    ///
    /// Example: taskdesk delete 42
    /// Example: taskdesk delete 42 --yes
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct TaskFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long = "due-date", value_name = "YYYY-MM-DD")]
    pub due_date: Option<String>,
    #[arg(long)]
    pub progress: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub hours: Option<String>,
    /// Id of the assigned user
    #[arg(long = "user", value_name = "USER_ID")]
    pub user: Option<i64>,
    /// Photo to attach, as a path or file:// URI
    #[arg(long, value_name = "PATH")]
    pub image: Option<String>,
}

impl TaskFields {
    /// Copies every given flag into the form, leaving the rest untouched.
    pub fn apply_to(&self, form: &mut TaskForm) {
        let fields = &mut form.fields;
        if let Some(title) = &self.title {
            fields.title = title.clone();
        }
        if let Some(description) = &self.description {
            fields.description = description.clone();
        }
        if let Some(due_date) = &self.due_date {
            fields.due_date = Some(due_date.clone());
        }
        if let Some(progress) = &self.progress {
            fields.task_progress = progress.clone();
        }
        if let Some(priority) = &self.priority {
            fields.priority = priority.clone();
        }
        if let Some(hours) = &self.hours {
            fields.hours = hours.clone();
        }
        if let Some(user) = self.user {
            fields.user_id = Some(user);
        }
        if let Some(image) = &self.image {
            fields.image = Some(ImageRef::new(image.clone()));
        }
    }
}

/// Flag name used to identify config override arguments by the runtime.
pub const CONFIG_OVERRIDE_FLAG: &str = "--config-override";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    BaseUrl,
    TimeoutSecs,
    Theme,
    DesktopNotifications,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let canonical_field =
        canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_field.as_str() {
        "base_url" | "url" => ConfigOverrideTarget::BaseUrl,
        "timeout_secs" | "timeout" => ConfigOverrideTarget::TimeoutSecs,
        "theme" => ConfigOverrideTarget::Theme,
        "desktop_notifications" | "notifications" => ConfigOverrideTarget::DesktopNotifications,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` argument into one set of overrides.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::BaseUrl => overrides.base_url = Some(parsed.value),
            ConfigOverrideTarget::TimeoutSecs => {
                let secs = parsed
                    .value
                    .parse::<u64>()
                    .map_err(|_| format!("timeout must be a number of seconds, got '{}'", parsed.value))?;
                overrides.timeout_secs = Some(secs);
            }
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::DesktopNotifications => {
                overrides.desktop_notifications = Some(parse_switch(&parsed.value)?);
            }
        }
    }
    Ok(overrides)
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("expected true or false, got '{other}'")),
    }
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Cli, Command, ConfigOverrideTarget, TaskFields, collect_config_overrides,
        parse_config_override,
    };
    use clap::Parser;
    use taskdesk_core::form::TaskForm;

    #[test]
    fn parse_config_override_canonicalizes_field_names() {
        let parsed = parse_config_override(" Base-URL = http://10.0.2.2:1111 ").unwrap();

        assert_eq!(parsed.target, ConfigOverrideTarget::BaseUrl);
        assert_eq!(parsed.value, "http://10.0.2.2:1111");
    }

    #[test]
    fn parse_config_override_rejects_unknown_fields() {
        let err = parse_config_override("unknown.field=value").unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn parse_config_override_rejects_missing_equals() {
        let err = parse_config_override("themenoir").unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn collect_config_overrides_converts_values() {
        let overrides = collect_config_overrides(&[
            "timeout=5".to_string(),
            "theme=noir".to_string(),
            "notifications=on".to_string(),
        ])
        .unwrap();

        assert_eq!(overrides.timeout_secs, Some(5));
        assert_eq!(overrides.theme.as_deref(), Some("noir"));
        assert_eq!(overrides.desktop_notifications, Some(true));
        assert_eq!(overrides.base_url, None);
    }

    #[test]
    fn collect_config_overrides_rejects_bad_timeout() {
        let err = collect_config_overrides(&["timeout=soon".to_string()]).unwrap_err();
        assert!(err.contains("timeout"));
    }

    #[test]
    fn add_flags_fill_form() {
        let cli = Cli::try_parse_from([
            "taskdesk", "add", "--title", "Buy milk", "--hours", "1", "--user", "7", "--image",
            "file:///x/photo.jpg",
        ])
        .unwrap();

        let fields = match cli.command {
            Command::Add { fields } => fields,
            other => panic!("unexpected command: {other:?}"),
        };
        let mut form = TaskForm::create();
        fields.apply_to(&mut form);

        assert_eq!(form.fields.title, "Buy milk");
        assert_eq!(form.fields.hours, "1");
        assert_eq!(form.fields.user_id, Some(7));
        assert_eq!(
            form.fields.image.as_ref().map(|image| image.as_str()),
            Some("file:///x/photo.jpg")
        );
        assert!(form.fields.description.is_empty());
    }

    #[test]
    fn empty_fields_leave_form_untouched() {
        let mut form = TaskForm::create();
        form.fields.title = "kept".into();

        TaskFields::default().apply_to(&mut form);

        assert_eq!(form.fields.title, "kept");
    }
}
