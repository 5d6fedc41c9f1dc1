use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::theme::Theme;

/// Folder given to new notes when nothing else is configured.
pub const DEFAULT_FOLDER: &str = "Personal";

const APP_NAME: &str = "pnotes";
const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
///
/// Loaded from `config.toml` in the platform config directory (or the file
/// named by `PNOTES_CONFIG`), then overridden by `PNOTES_*` environment
/// variables. Every field has a default, so a missing file is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme the session starts with. Toggling at runtime is not written back.
    pub theme: Theme,
    /// Folder assigned to newly created notes.
    pub default_folder: String,
    /// Whether to insert the welcome notes on start.
    pub seed_demo_notes: bool,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
    /// Directory for the rolling log file. Defaults to `<data dir>/logs`.
    pub dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            default_folder: DEFAULT_FOLDER.to_string(),
            seed_demo_notes: true,
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            dir: None,
        }
    }
}

impl Config {
    /// Load the configuration from disk and the process environment.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os("PNOTES_CONFIG") {
            Some(p) => PathBuf::from(p),
            None => config_path()?,
        };
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(std::env::vars())?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    /// Apply `PNOTES_*` overrides from an iterator of environment pairs.
    /// Unrelated variables are ignored.
    pub fn apply_overrides<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "PNOTES_THEME" => self.theme = value.parse()?,
                "PNOTES_DEFAULT_FOLDER" => self.default_folder = value,
                "PNOTES_LOG" => self.log.filter = value,
                "PNOTES_LOG_DIR" => self.log.dir = Some(PathBuf::from(value)),
                "PNOTES_DEMO" => self.seed_demo_notes = parse_bool(&key, &value)?,
                _ => {}
            }
        }
        self.normalize();
        Ok(())
    }

    /// Directory the log file goes to.
    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.log.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_local_dir().join("logs")),
        }
    }

    fn normalize(&mut self) {
        let trimmed = self.default_folder.trim();
        self.default_folder = if trimmed.is_empty() {
            DEFAULT_FOLDER.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

/// Returns the default config file path.
/// Location: `~/.config/pnotes/config.toml` (XDG-compliant)
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or(Error::NoDirectory("home"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{key}: expected a boolean, got '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.default_folder, "Personal");
        assert!(config.seed_demo_notes);
        assert_eq!(config.log.filter, "info");
        assert!(config.log.dir.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::from_toml(
            r#"
            theme = "dark"
            default_folder = "Inbox"
            seed_demo_notes = false

            [log]
            filter = "pnotes_notes=debug"
            dir = "/tmp/pnotes-logs"
            "#,
        )
        .unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.default_folder, "Inbox");
        assert!(!config.seed_demo_notes);
        assert_eq!(config.log.filter, "pnotes_notes=debug");
        assert_eq!(config.log.dir, Some(PathBuf::from("/tmp/pnotes-logs")));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("theme = \"dark\"").unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.default_folder, "Personal");
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_bad_theme_in_toml() {
        assert!(Config::from_toml("theme = \"sepia\"").is_err());
    }

    #[test]
    fn test_blank_default_folder_falls_back() {
        let config = Config::from_toml("default_folder = \"   \"").unwrap();
        assert_eq!(config.default_folder, DEFAULT_FOLDER);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(vars(&[
                ("PNOTES_THEME", "dark"),
                ("PNOTES_DEFAULT_FOLDER", " Work "),
                ("PNOTES_LOG", "debug"),
                ("PNOTES_DEMO", "0"),
                ("HOME", "/ignored"),
            ]))
            .unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.default_folder, "Work");
        assert_eq!(config.log.filter, "debug");
        assert!(!config.seed_demo_notes);
    }

    #[test]
    fn test_invalid_env_override() {
        let mut config = Config::default();
        assert!(config.apply_overrides(vars(&[("PNOTES_THEME", "blue")])).is_err());
        assert!(config.apply_overrides(vars(&[("PNOTES_DEMO", "maybe")])).is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("pnotes-test-does-not-exist.toml");
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_log_dir() {
        let mut config = Config::default();
        config.log.dir = Some(PathBuf::from("/var/log/pnotes"));
        assert_eq!(config.log_dir().unwrap(), PathBuf::from("/var/log/pnotes"));
    }
}
