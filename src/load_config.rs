use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::{ProviderKeys, Settings};
use crate::keys::KeyGroup;

pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Plural (comma-separated) variable first, then the single-key fallback.
fn key_vars(group: KeyGroup) -> (&'static str, &'static str) {
    match group {
        KeyGroup::OpenAi => ("OPENAI_API_KEYS", "OPENAI_API_KEY"),
        KeyGroup::Gemini => ("GEMINI_API_KEYS", "GEMINI_API_KEY"),
    }
}

/// Loads the optional static YAML file (no secrets) and injects the GitHub token
/// and provider keys from the environment. Without a file, every setting takes
/// its default.
pub fn load_config(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => {
            info!("No config file given, using default settings");
            Settings::default()
        }
    };

    settings.github.token = match std::env::var(GITHUB_TOKEN_VAR) {
        Ok(token) if !token.trim().is_empty() => {
            info!("GITHUB_TOKEN found in env");
            Some(token.trim().to_string())
        }
        _ => {
            warn!("GITHUB_TOKEN not set, GitHub requests will be unauthenticated");
            None
        }
    };

    settings.provider_keys = provider_keys_from_env();

    validate(&settings)?;
    settings.trace_loaded();
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<Settings> {
    info!(config_path = ?path, "Loading configuration from file");

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path, e));
        }
    };

    // An empty file is a valid "all defaults" config.
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    match serde_yaml::from_str(&content) {
        Ok(settings) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(settings)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

fn provider_keys_from_env() -> ProviderKeys {
    let mut groups = Vec::new();
    for group in KeyGroup::ALL {
        let (plural, single) = key_vars(group);
        let raw = std::env::var(plural).or_else(|_| std::env::var(single));
        let keys = raw.map(|value| split_keys(&value)).unwrap_or_default();
        info!(group = %group, keys = keys.len(), "Provider keys loaded from env");
        if !keys.is_empty() {
            groups.push((group, keys));
        }
    }
    ProviderKeys { groups }
}

/// Comma-separated list, trimmed, empties dropped.
pub fn split_keys(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate(settings: &Settings) -> Result<()> {
    let content = &settings.content;
    let github = &settings.github;
    if content.concurrency == 0 {
        error!("content.concurrency must be at least 1");
        anyhow::bail!("content.concurrency must be at least 1");
    }
    if content.max_file_size == 0 {
        error!("content.max_file_size must be positive");
        anyhow::bail!("content.max_file_size must be positive");
    }
    for (name, value) in [
        ("github.request_timeout_secs", github.request_timeout_secs),
        ("github.archive_timeout_secs", github.archive_timeout_secs),
        ("github.deadline_secs", github.deadline_secs),
    ] {
        if value == 0 {
            error!(setting = name, "Timeout must be positive");
            anyhow::bail!("{name} must be positive");
        }
    }
    Ok(())
}
