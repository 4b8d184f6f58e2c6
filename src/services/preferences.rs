use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::ServiceResult;
use crate::core::context::{GuildId, Identity};

/// Per-user and per-guild locale preferences, plus locale-aware time
/// formatting based on them.
///
/// Writes are last-write-wins; callers never read-modify-write.
#[async_trait]
pub trait PreferenceService: Send + Sync {
    /// The language messages to `user` should be rendered in.
    async fn user_language(&self, user: &Identity) -> ServiceResult<String>;

    async fn set_user_language(&self, user: &Identity, language: &str) -> ServiceResult<()>;

    async fn set_guild_language(&self, guild: GuildId, language: &str) -> ServiceResult<()>;

    async fn set_user_timezone(&self, user: &Identity, timezone: &str) -> ServiceResult<()>;

    async fn set_guild_timezone(&self, guild: GuildId, timezone: &str) -> ServiceResult<()>;

    async fn set_guild_enforce(&self, guild: GuildId, enforce: bool) -> ServiceResult<()>;

    /// Full date and time, down to seconds, in the user's timezone.
    async fn to_user_locale_string(
        &self,
        user: &Identity,
        at: DateTime<Utc>,
    ) -> ServiceResult<String>;

    /// Full date and time, down to seconds, in the guild's timezone.
    async fn to_guild_locale_string(
        &self,
        guild: GuildId,
        at: DateTime<Utc>,
    ) -> ServiceResult<String>;
}
