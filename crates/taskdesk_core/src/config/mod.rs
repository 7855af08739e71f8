mod theme;

pub use theme::{Palette, Theme};

use crate::error::AppError;
use crate::remote::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "taskdesk";
pub const CONFIG_PATH_ENV_VAR: &str = "TASKDESK_CONFIG_PATH";
pub const BASE_URL_ENV_VAR: &str = "TASKDESK_BASE_URL";

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub theme: Option<String>,
    pub desktop_notifications: bool,
}

impl Config {
    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::default();
        if let Some(base_url) = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        {
            client.base_url = base_url.to_string();
        }
        if let Some(secs) = self.timeout_secs.filter(|secs| *secs > 0) {
            client.timeout = Duration::from_secs(secs);
        }
        client
    }

    /// Unknown theme names fall back to the plain theme.
    pub fn theme(&self) -> Theme {
        self.theme
            .as_deref()
            .and_then(Theme::from_name)
            .unwrap_or_default()
    }

    pub fn palette(&self) -> Palette {
        self.theme().palette()
    }

    /// Returns a copy with every override that is set applied on top.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Config {
        let mut merged = self.clone();
        if let Some(base_url) = &overrides.base_url {
            merged.base_url = Some(base_url.clone());
        }
        if let Some(secs) = overrides.timeout_secs {
            merged.timeout_secs = Some(secs);
        }
        if let Some(theme) = &overrides.theme {
            merged.theme = Some(canonical_theme(theme));
        }
        if let Some(enabled) = overrides.desktop_notifications {
            merged.desktop_notifications = enabled;
        }
        merged
    }

    fn normalized(mut self) -> Self {
        self.theme = self.theme.as_deref().map(canonical_theme);
        self
    }
}

fn canonical_theme(raw: &str) -> String {
    Theme::from_name(raw)
        .map(|theme| theme.name().to_string())
        .unwrap_or_else(|| raw.trim().to_string())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub theme: Option<String>,
    pub desktop_notifications: Option<bool>,
}

impl ConfigOverrides {
    /// Overrides taken from the process environment.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// A loaded configuration together with the error, if any, that forced a
/// fall back to defaults.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

impl ConfigLoad {
    /// Loads from [`config_path`]. Never fails; problems are carried in `error`.
    pub fn discover() -> Self {
        match config_path() {
            Ok(path) => Self::from_path(&path),
            Err(err) => Self::defaults(Some(err)),
        }
    }

    /// A missing file is not an error.
    pub fn from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::defaults(None);
        }
        match read_config(path) {
            Ok(config) => Self {
                config,
                error: None,
            },
            Err(err) => Self::defaults(Some(err)),
        }
    }

    fn defaults(error: Option<AppError>) -> Self {
        Self {
            config: Config::default(),
            error,
        }
    }
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV_VAR).filter(|path| !path.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(config_dir()?.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn config_dir() -> Result<PathBuf, AppError> {
    let (var, nested) = if cfg!(windows) {
        ("APPDATA", None)
    } else {
        ("HOME", Some(".config"))
    };
    let root = std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::invalid_data(format!("{var} is not set")))?;

    let mut dir = PathBuf::from(root);
    if let Some(nested) = nested {
        dir.push(nested);
    }
    Ok(dir)
}

pub fn read_config(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {err}", path.display())))?;
    let config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("{} is not a valid config: {err}", path.display()))
    })?;
    Ok(config.normalized())
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigLoad, ConfigOverrides, Theme, read_config};
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn scratch_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("taskdesk-config-{nanos}-{name}"))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let load = ConfigLoad::from_path(&scratch_file("absent.json"));

        assert_eq!(load.config, Config::default());
        assert!(load.error.is_none());
    }

    #[test]
    fn broken_file_yields_defaults_and_reports() {
        let path = scratch_file("broken.json");
        std::fs::write(&path, "{ \"base_url\": ").unwrap();

        let load = ConfigLoad::from_path(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(load.config, Config::default());
        assert_eq!(load.error.map(|err| err.code()), Some("invalid_data"));
    }

    #[test]
    fn reads_every_field() {
        let path = scratch_file("full.json");
        let body = serde_json::json!({
            "base_url": "http://10.0.2.2:1111",
            "timeout_secs": 5,
            "theme": "Dark Mode",
            "desktop_notifications": true
        });
        std::fs::write(&path, body.to_string()).unwrap();

        let config = read_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.base_url.as_deref(), Some("http://10.0.2.2:1111"));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.theme.as_deref(), Some("noir"));
        assert!(config.desktop_notifications);
    }

    #[test]
    fn client_config_falls_back_to_defaults() {
        let client = Config::default().client_config();
        assert_eq!(client.base_url, "http://127.0.0.1:1111/");
        assert_eq!(client.timeout, Duration::from_secs(30));

        let config = Config {
            base_url: Some(" http://tasks.local:8080 ".into()),
            timeout_secs: Some(3),
            ..Config::default()
        };
        let client = config.client_config();
        assert_eq!(client.base_url, "http://tasks.local:8080");
        assert_eq!(client.timeout, Duration::from_secs(3));

        let zero = Config {
            timeout_secs: Some(0),
            ..Config::default()
        };
        assert_eq!(zero.client_config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let base = Config {
            base_url: Some("http://a:1111".into()),
            timeout_secs: Some(10),
            theme: Some("default".into()),
            desktop_notifications: true,
        };
        let overrides = ConfigOverrides {
            base_url: Some("http://b:2222".into()),
            theme: Some("Solarized".into()),
            ..ConfigOverrides::default()
        };

        let merged = base.with_overrides(&overrides);
        assert_eq!(merged.base_url.as_deref(), Some("http://b:2222"));
        assert_eq!(merged.timeout_secs, Some(10));
        assert_eq!(merged.theme(), Theme::Solarized);
        assert!(merged.desktop_notifications);

        assert_eq!(base.with_overrides(&ConfigOverrides::default()), base);
    }

    #[test]
    fn unknown_theme_uses_plain_palette() {
        let config = Config {
            theme: Some("oceanic".into()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::Plain);
        assert!(config.palette().accent.is_empty());
    }
}
