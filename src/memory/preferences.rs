//! In-memory preference store with optional TOML persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::core::context::{GuildId, Identity, UserId};
use crate::services::{PreferenceService, ServiceError, ServiceResult};
use crate::utils::fs::write_atomic;

/// Timezone used when neither the user nor their guild picked one.
pub const DEFAULT_TIMEZONE: &str = "UTC";

const FULL_WITH_SECONDS: &str = "%A, %B %-d, %Y, %H:%M:%S %Z";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Guild language overrides members' own language.
    #[serde(default)]
    pub enforce: bool,
}

/// Everything the store holds, keyed by id. This is also the on-disk format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    #[serde(default)]
    pub users: BTreeMap<String, UserPreferences>,
    #[serde(default)]
    pub guilds: BTreeMap<String, GuildPreferences>,
}

impl PreferenceSnapshot {
    fn user(&self, id: UserId) -> Option<&UserPreferences> {
        self.users.get(&id.to_string())
    }

    fn guild(&self, id: GuildId) -> Option<&GuildPreferences> {
        self.guilds.get(&id.to_string())
    }

    fn user_mut(&mut self, id: UserId) -> &mut UserPreferences {
        self.users.entry(id.to_string()).or_default()
    }

    fn guild_mut(&mut self, id: GuildId) -> &mut GuildPreferences {
        self.guilds.entry(id.to_string()).or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read preferences at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse preferences at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write preferences at {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Formats `at` in `timezone` with full date, time and seconds. Unknown zones
/// render in UTC.
pub fn format_full_with_seconds(at: DateTime<Utc>, timezone: &str) -> String {
    let tz: Tz = timezone.parse().unwrap_or(Tz::UTC);
    at.with_timezone(&tz).format(FULL_WITH_SECONDS).to_string()
}

pub struct MemoryPreferences {
    default_language: String,
    state: RwLock<PreferenceSnapshot>,
    persist_path: Option<PathBuf>,
    /// Serializes writes, so each one starts from the last published state.
    persist_lock: Mutex<()>,
    writes: AtomicUsize,
}

impl MemoryPreferences {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self::with_snapshot(default_language, PreferenceSnapshot::default())
    }

    pub fn with_snapshot(default_language: impl Into<String>, snapshot: PreferenceSnapshot) -> Self {
        Self {
            default_language: default_language.into(),
            state: RwLock::new(snapshot),
            persist_path: None,
            persist_lock: Mutex::new(()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Opens a store persisted at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>, default_language: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Read {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&contents).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            PreferenceSnapshot::default()
        };

        let mut store = Self::with_snapshot(default_language, snapshot);
        store.persist_path = Some(path);
        Ok(store)
    }

    pub async fn snapshot(&self) -> PreferenceSnapshot {
        self.state.read().await.clone()
    }

    pub async fn user(&self, id: UserId) -> UserPreferences {
        self.state.read().await.user(id).cloned().unwrap_or_default()
    }

    pub async fn guild(&self, id: GuildId) -> GuildPreferences {
        self.state.read().await.guild(id).cloned().unwrap_or_default()
    }

    /// Number of writes performed since construction.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Applies `mutate` to a copy of the state, persists the copy, and only
    /// then publishes it. A failed save leaves the store unchanged.
    async fn write<F>(&self, mutate: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut PreferenceSnapshot),
    {
        let _persist = self.persist_lock.lock().await;

        let mut next = self.state.read().await.clone();
        mutate(&mut next);

        if let Some(path) = self.persist_path.clone() {
            next = tokio::task::spawn_blocking(move || {
                save_snapshot(&path, &next).map(|()| next)
            })
            .await
            .map_err(|e| ServiceError::Store(e.to_string()))?
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        }

        *self.state.write().await = next;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn effective_language(&self, state: &PreferenceSnapshot, user: &Identity) -> String {
        let guild = user.guild_id().and_then(|id| state.guild(id));

        if let Some(GuildPreferences {
            language: Some(language),
            enforce: true,
            ..
        }) = guild
        {
            return language.clone();
        }

        state
            .user(user.user_id)
            .and_then(|prefs| prefs.language.clone())
            .or_else(|| guild.and_then(|prefs| prefs.language.clone()))
            .unwrap_or_else(|| self.default_language.clone())
    }

    fn effective_timezone(state: &PreferenceSnapshot, user: &Identity) -> String {
        state
            .user(user.user_id)
            .and_then(|prefs| prefs.timezone.clone())
            .or_else(|| {
                user.guild_id()
                    .and_then(|id| state.guild(id))
                    .and_then(|prefs| prefs.timezone.clone())
            })
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
    }
}

fn save_snapshot(path: &Path, snapshot: &PreferenceSnapshot) -> Result<(), StoreError> {
    let contents = toml::to_string_pretty(snapshot)?;
    write_atomic(path, &contents).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait]
impl PreferenceService for MemoryPreferences {
    async fn user_language(&self, user: &Identity) -> ServiceResult<String> {
        let state = self.state.read().await;
        Ok(self.effective_language(&state, user))
    }

    async fn set_user_language(&self, user: &Identity, language: &str) -> ServiceResult<()> {
        debug!(user = %user.user_id, language = %language, "Storing user language");
        let id = user.user_id;
        self.write(|state| state.user_mut(id).language = Some(language.to_string()))
            .await
    }

    async fn set_guild_language(&self, guild: GuildId, language: &str) -> ServiceResult<()> {
        debug!(guild = %guild, language = %language, "Storing guild language");
        self.write(|state| state.guild_mut(guild).language = Some(language.to_string()))
            .await
    }

    async fn set_user_timezone(&self, user: &Identity, timezone: &str) -> ServiceResult<()> {
        debug!(user = %user.user_id, timezone = %timezone, "Storing user timezone");
        let id = user.user_id;
        self.write(|state| state.user_mut(id).timezone = Some(timezone.to_string()))
            .await
    }

    async fn set_guild_timezone(&self, guild: GuildId, timezone: &str) -> ServiceResult<()> {
        debug!(guild = %guild, timezone = %timezone, "Storing guild timezone");
        self.write(|state| state.guild_mut(guild).timezone = Some(timezone.to_string()))
            .await
    }

    async fn set_guild_enforce(&self, guild: GuildId, enforce: bool) -> ServiceResult<()> {
        debug!(guild = %guild, enforce, "Storing guild enforcement");
        self.write(|state| state.guild_mut(guild).enforce = enforce)
            .await
    }

    async fn to_user_locale_string(
        &self,
        user: &Identity,
        at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let state = self.state.read().await;
        let timezone = Self::effective_timezone(&state, user);
        Ok(format_full_with_seconds(at, &timezone))
    }

    async fn to_guild_locale_string(
        &self,
        guild: GuildId,
        at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let state = self.state.read().await;
        let timezone = state
            .guild(guild)
            .and_then(|prefs| prefs.timezone.clone())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        Ok(format_full_with_seconds(at, &timezone))
    }
}
