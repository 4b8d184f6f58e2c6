use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::context::{
    ChannelKind, ChannelRef, GuildId, Identity, IncomingMessage, Permissions,
};

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_LANGUAGE: &str = "en";

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Command prefix, e.g. `!` for `!intl list`
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Language required lookups fall back to and new users start with
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Directory of extra `<code>.toml` language files
    pub languages_dir: Option<PathBuf>,
    /// File preferences are persisted to; in-memory only when unset
    pub store_path: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: Option<String>,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            default_language: default_language(),
            languages_dir: None,
            store_path: None,
            log_filter: None,
            session: SessionConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionChannel {
    #[default]
    Guild,
    Direct,
}

/// The simulated actor every console line is attributed to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "SessionConfig::default_user_id")]
    pub user_id: u64,
    #[serde(default = "SessionConfig::default_display_name")]
    pub display_name: String,
    #[serde(default = "SessionConfig::default_guild_id")]
    pub guild_id: u64,
    #[serde(default)]
    pub channel: SessionChannel,
    #[serde(default)]
    pub manage_guild: bool,
    /// When set, messages arrive through this proxy author with the session
    /// user as the proxied member.
    pub proxy_author: Option<u64>,
}

impl SessionConfig {
    fn default_user_id() -> u64 {
        1
    }

    fn default_display_name() -> String {
        "console".to_string()
    }

    fn default_guild_id() -> u64 {
        1
    }

    pub fn identity(&self) -> Identity {
        let permissions = if self.manage_guild {
            Permissions::MANAGE_GUILD
        } else {
            Permissions::empty()
        };
        Identity::user(self.user_id, self.display_name.clone())
            .with_membership(GuildId(self.guild_id), permissions)
    }

    pub fn channel_ref(&self) -> ChannelRef {
        match self.channel {
            SessionChannel::Guild => ChannelRef {
                id: self.guild_id,
                kind: ChannelKind::GuildText,
                guild_id: Some(GuildId(self.guild_id)),
            },
            SessionChannel::Direct => ChannelRef {
                id: self.user_id,
                kind: ChannelKind::Direct,
                guild_id: None,
            },
        }
    }

    /// Builds the message a console line arrives as.
    pub fn message(&self, id: u64) -> IncomingMessage {
        let identity = self.identity();
        let (author, proxied_member) = match self.proxy_author {
            Some(proxy) => (Some(Identity::user(proxy, "proxy")), Some(identity)),
            None => (Some(identity), None),
        };
        IncomingMessage {
            id,
            channel: self.channel_ref(),
            author,
            proxied_member,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: Self::default_user_id(),
            display_name: Self::default_display_name(),
            guild_id: Self::default_guild_id(),
            channel: SessionChannel::default(),
            manage_guild: false,
            proxy_author: None,
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
