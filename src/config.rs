use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::keys::KeyGroup;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024;
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Everything the acquisition pipeline reads at startup. The YAML file carries
/// only the non-secret parts; tokens and API keys are injected from the
/// environment by [`crate::load_config::load_config`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub github: GitHubSettings,
    pub content: ContentSettings,
    #[serde(skip)]
    pub provider_keys: ProviderKeys,
}

impl Settings {
    pub fn trace_loaded(&self) {
        info!(
            api_base = %self.github.api_base,
            authenticated = self.github.token.is_some(),
            strategy = ?self.content.strategy,
            concurrency = self.content.concurrency,
            max_file_size = self.content.max_file_size,
            "Loaded settings"
        );
        debug!(settings = ?self, "Settings loaded (full debug)");
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    pub api_base: String,
    pub user_agent: String,
    #[serde(skip)]
    pub token: Option<String>,
    pub request_timeout_secs: u64,
    pub archive_timeout_secs: u64,
    /// Upper bound on one whole acquisition (commit resolution, tree, corpus).
    pub deadline_secs: u64,
    pub search_page_delay_ms: u64,
}

impl GitHubSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn archive_timeout(&self) -> Duration {
        Duration::from_secs(self.archive_timeout_secs)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    pub fn search_page_delay(&self) -> Duration {
        Duration::from_millis(self.search_page_delay_ms)
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: concat!("gitsummarize/", env!("CARGO_PKG_VERSION")).to_string(),
            token: None,
            request_timeout_secs: 30,
            archive_timeout_secs: 300,
            deadline_secs: 600,
            search_page_delay_ms: 1000,
        }
    }
}

// Keeps the token out of logs.
impl fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .field("has_token", &self.token.is_some())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("archive_timeout_secs", &self.archive_timeout_secs)
            .field("deadline_secs", &self.deadline_secs)
            .field("search_page_delay_ms", &self.search_page_delay_ms)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Exclusive size ceiling in bytes: a file is kept only when smaller.
    pub max_file_size: u64,
    /// Maximum number of blob fetches in flight at once.
    pub concurrency: usize,
    pub strategy: StrategyKind,
    /// Eligible-file count above which [`StrategyKind::Auto`] downloads the archive.
    pub archive_threshold: usize,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            strategy: StrategyKind::default(),
            archive_threshold: 200,
        }
    }
}

/// How the corpus is acquired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// One request per file, bounded fan-out.
    #[default]
    Blob,
    /// One archive download, extracted locally.
    Archive,
    /// Picks between the two from the repository's eligible-file count.
    Auto,
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blob" => Ok(StrategyKind::Blob),
            "archive" | "zip" | "zipball" => Ok(StrategyKind::Archive),
            "auto" => Ok(StrategyKind::Auto),
            other => Err(format!("unknown content strategy '{other}'")),
        }
    }
}

/// Provider API keys per credential group, in configuration order.
#[derive(Clone, Default)]
pub struct ProviderKeys {
    pub groups: Vec<(KeyGroup, Vec<String>)>,
}

impl fmt::Debug for ProviderKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (group, keys) in &self.groups {
            map.entry(&group.as_str(), &keys.len());
        }
        map.finish()
    }
}
