//! Round-robin rotation over interchangeable provider API keys.
//!
//! A [`KeyRotator`] is built once at startup, validated, and then shared behind
//! an `Arc` by everything that instantiates provider clients. Keys are only
//! added while the rotator is still exclusively owned; drawing is lock-free.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ProviderKeys, Settings};
use crate::error::KeyError;

/// A named class of interchangeable API keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyGroup {
    OpenAi,
    Gemini,
}

impl KeyGroup {
    pub const ALL: [KeyGroup; 2] = [KeyGroup::OpenAi, KeyGroup::Gemini];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyGroup::OpenAi => "openai",
            KeyGroup::Gemini => "gemini",
        }
    }
}

impl fmt::Display for KeyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KeyGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(KeyGroup::OpenAi),
            "gemini" => Ok(KeyGroup::Gemini),
            other => Err(format!("unknown credential group '{other}'")),
        }
    }
}

#[derive(Default)]
struct KeyPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

#[derive(Default)]
pub struct KeyRotator {
    pools: BTreeMap<KeyGroup, KeyPool>,
}

impl KeyRotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::from_provider_keys(&settings.provider_keys)
    }

    /// Rotator over every configured key, in configuration order.
    pub fn from_provider_keys(provider_keys: &ProviderKeys) -> Self {
        let mut rotator = Self::new();
        for (group, keys) in &provider_keys.groups {
            for key in keys {
                rotator.add_key(*group, key.clone());
            }
        }
        rotator
    }

    /// Appends `key` to `group` and restarts that group's cycle from its first key.
    pub fn add_key(&mut self, group: KeyGroup, key: impl Into<String>) {
        let pool = self.pools.entry(group).or_default();
        pool.keys.push(key.into());
        *pool.cursor.get_mut() = 0;
        debug!(group = %group, keys = pool.keys.len(), "Added API key to credential group");
    }

    /// Next key of `group` in round-robin order.
    ///
    /// Concurrent callers may observe draws in any interleaving; every returned
    /// key is a member of the configured set.
    pub fn next_key(&self, group: KeyGroup) -> Result<String, KeyError> {
        let pool = self
            .pools
            .get(&group)
            .filter(|pool| !pool.keys.is_empty())
            .ok_or(KeyError::NoKeys(group))?;
        let index = pool.cursor.fetch_add(1, Ordering::Relaxed) % pool.keys.len();
        Ok(pool.keys[index].clone())
    }

    pub fn key_count(&self, group: KeyGroup) -> usize {
        self.pools.get(&group).map_or(0, |pool| pool.keys.len())
    }

    /// Startup check: every listed group must have at least one key.
    pub fn require(&self, groups: &[KeyGroup]) -> Result<(), KeyError> {
        for &group in groups {
            if self.key_count(group) == 0 {
                return Err(KeyError::NoKeys(group));
            }
        }
        info!(groups = ?groups, "Credential groups validated");
        Ok(())
    }
}

impl fmt::Debug for KeyRotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<_, _> = self
            .pools
            .iter()
            .map(|(group, pool)| (group.as_str(), pool.keys.len()))
            .collect();
        f.debug_struct("KeyRotator").field("keys", &counts).finish()
    }
}

/// Shows the first four characters of a key, for operator output. Short keys
/// are hidden entirely.
pub fn mask_key(key: &str) -> String {
    if key.chars().count() <= 8 {
        return "****".to_string();
    }
    let visible: String = key.chars().take(4).collect();
    format!("{visible}****")
}
