//! Configuration for the terminal client.
//!
//! Values come from CLI flags (which clap already merges with `COACHCHAT_*`
//! environment variables), then the TOML config file, then built-in defaults.

pub mod coaches;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use coachchat_types::{Coach, DEFAULT_STORAGE_KEY};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const HISTORY_FILE_NAME: &str = "history.json";

/// Coaches offered when neither a list nor a persona directory is configured
pub const DEFAULT_COACHES: &[&str] = &[
    "Aiyoda",
    "Wellness Warrior",
    "Career Catalyst",
    "Executive Coach",
    "Personal Growth Guru",
    "Relationship Revivalist",
];

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub feedback_endpoint: Option<String>,
    pub coach: Option<String>,
    pub coaches: Vec<String>,
    pub coach_dir: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub storage_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub transcript_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config file")
    }

    /// Read a config file. A missing file is an empty config unless
    /// `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                log::debug!("No config file at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// Fully resolved settings the client runs with
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub feedback_endpoint: Option<String>,
    pub coach: Coach,
    pub coaches: Vec<Coach>,
    pub history_file: PathBuf,
    pub storage_key: String,
    pub timeout: Duration,
    pub transcript_dir: Option<PathBuf>,
    pub color: bool,
}

impl AppConfig {
    /// Settings for a given endpoint and history file, everything else default
    pub fn new(endpoint: impl Into<String>, history_file: impl Into<PathBuf>) -> Self {
        let coaches = default_coaches();
        Self {
            endpoint: endpoint.into(),
            feedback_endpoint: None,
            coach: coaches[0].clone(),
            coaches,
            history_file: history_file.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transcript_dir: None,
            color: true,
        }
    }
}

pub fn default_coaches() -> Vec<Coach> {
    DEFAULT_COACHES.iter().map(|name| Coach::new(*name)).collect()
}

/// Get or create the base coachchat directory (~/.coachchat)
pub fn get_coachchat_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    let dir = PathBuf::from(home_dir).join(".coachchat");

    if !dir.exists() {
        std::fs::create_dir_all(&dir).context("Failed to create coachchat directory")?;
    }

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = FileConfig::from_toml(
            r#"
            endpoint = "https://coach.example/"
            coach = "Career Catalyst"
            coaches = ["Career Catalyst", "Aiyoda"]
            history_file = "/tmp/history.json"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint.as_deref(), Some("https://coach.example/"));
        assert_eq!(config.coach.as_deref(), Some("Career Catalyst"));
        assert_eq!(config.coaches, vec!["Career Catalyst", "Aiyoda"]);
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/history.json")));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.transcript_dir, None);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("endpiont = \"http://x/\"").is_err());
    }

    #[test]
    fn test_missing_optional_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(FileConfig::load(&path, false).unwrap(), FileConfig::default());
        assert!(FileConfig::load(&path, true).is_err());
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::new(DEFAULT_ENDPOINT, "/tmp/history.json");
        assert_eq!(config.coach.name, "Aiyoda");
        assert_eq!(config.coaches.len(), DEFAULT_COACHES.len());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
