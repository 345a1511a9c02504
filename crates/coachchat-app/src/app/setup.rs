use anyhow::{bail, Context, Result};
use std::time::Duration;

use coachchat_api::HttpChatClient;
use coachchat_chat::{ChatSession, ChatView};
use coachchat_history::{FileStore, HistoryStore};
use coachchat_types::{Coach, DEFAULT_STORAGE_KEY};

use crate::cli::Cli;
use crate::config::coaches::{discover_coaches, find_coach};
use crate::config::{
    default_coaches, get_coachchat_dir, AppConfig, FileConfig, CONFIG_FILE_NAME,
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, HISTORY_FILE_NAME,
};

/// Set up application configuration from CLI arguments and the config file
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    // An explicitly named config file must exist; the default one may not.
    let file = match &cli.config {
        Some(path) => FileConfig::load(path, true)?,
        None => FileConfig::load(&get_coachchat_dir()?.join(CONFIG_FILE_NAME), false)?,
    };
    resolve_config(cli, file)
}

/// Merge CLI values over file values over defaults.
///
/// Precedence: CLI flags / COACHCHAT_* env > config file > defaults
pub fn resolve_config(cli: &Cli, file: FileConfig) -> Result<AppConfig> {
    let endpoint = cli
        .endpoint
        .clone()
        .or(file.endpoint)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let feedback_endpoint = cli.feedback_endpoint.clone().or(file.feedback_endpoint);

    let coaches = resolve_coaches(cli.coach_dir.clone().or(file.coach_dir), file.coaches)?;

    let coach = match cli.coach.clone().or(file.coach) {
        Some(name) => match find_coach(&coaches, &name) {
            Some(coach) => coach.clone(),
            None => bail!(
                "Unknown coach '{}'. Available coaches: {}",
                name,
                coach_names(&coaches)
            ),
        },
        None => coaches[0].clone(),
    };

    let history_file = match cli.history_file.clone().or(file.history_file) {
        Some(path) => path,
        None => get_coachchat_dir()?.join(HISTORY_FILE_NAME),
    };

    let storage_key = cli
        .storage_key
        .clone()
        .or(file.storage_key)
        .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

    let timeout_secs = cli
        .timeout
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        bail!("Timeout must be at least one second");
    }

    Ok(AppConfig {
        endpoint,
        feedback_endpoint,
        coach,
        coaches,
        history_file,
        storage_key,
        timeout: Duration::from_secs(timeout_secs),
        transcript_dir: cli.transcript_dir.clone().or(file.transcript_dir),
        color: !cli.no_color,
    })
}

fn resolve_coaches(coach_dir: Option<std::path::PathBuf>, listed: Vec<String>) -> Result<Vec<Coach>> {
    if let Some(dir) = coach_dir {
        let discovered = discover_coaches(&dir)?;
        if !discovered.is_empty() {
            return Ok(discovered);
        }
        log::warn!("No coach persona files found in {}", dir.display());
    }

    if !listed.is_empty() {
        return Ok(listed.into_iter().map(Coach::new).collect());
    }

    Ok(default_coaches())
}

pub fn coach_names(coaches: &[Coach]) -> String {
    coaches
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// HTTP client for the configured endpoints
pub fn build_client(config: &AppConfig) -> Result<HttpChatClient> {
    let client = HttpChatClient::with_timeout(config.endpoint.clone(), config.timeout)
        .with_context(|| format!("Failed to set up client for {}", config.endpoint))?;

    Ok(match &config.feedback_endpoint {
        Some(url) => client.with_feedback_endpoint(url.clone()),
        None => client,
    })
}

/// Open the persisted history and wrap it in a session rendering to `view`
pub fn open_session<V: ChatView>(config: &AppConfig, view: V) -> ChatSession<FileStore, V> {
    let storage = FileStore::new(&config.history_file);
    let store = HistoryStore::with_key(storage, config.storage_key.clone());
    log::debug!(
        "Opened history {} ({} turns)",
        config.history_file.display(),
        store.history().len()
    );
    ChatSession::new(store, view)
}
