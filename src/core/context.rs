//! Per-invocation input: who sent the command, where, and what it said.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::channel::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GuildId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a message was posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Direct,
    GuildText,
    Other,
}

/// Guild permission bits, using the host platform's bit positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions(u64);

impl Permissions {
    pub const ADMINISTRATOR: Permissions = Permissions(1 << 3);
    pub const MANAGE_GUILD: Permissions = Permissions(1 << 5);

    pub const fn empty() -> Self {
        Permissions(0)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Permissions(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn contains(self, other: Permissions) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Permissions) -> Self {
        Permissions(self.0 | other.0)
    }

    /// Whether these permissions allow changing server-wide settings.
    ///
    /// Administrators implicitly hold every permission.
    pub const fn can_manage_guild(self) -> bool {
        self.contains(Self::MANAGE_GUILD) || self.contains(Self::ADMINISTRATOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMembership {
    pub guild_id: GuildId,
    pub permissions: Permissions,
}

/// A user as seen by this module, optionally with their membership in the
/// guild the message came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub display_name: String,
    pub membership: Option<GuildMembership>,
}

impl Identity {
    pub fn user(user_id: u64, display_name: impl Into<String>) -> Self {
        Self {
            user_id: UserId(user_id),
            display_name: display_name.into(),
            membership: None,
        }
    }

    pub fn with_membership(mut self, guild_id: GuildId, permissions: Permissions) -> Self {
        self.membership = Some(GuildMembership {
            guild_id,
            permissions,
        });
        self
    }

    pub fn guild_id(&self) -> Option<GuildId> {
        self.membership.as_ref().map(|m| m.guild_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: u64,
    pub kind: ChannelKind,
    pub guild_id: Option<GuildId>,
}

/// The message that carried the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: u64,
    pub channel: ChannelRef,
    pub author: Option<Identity>,
    /// Member behind a proxied message (e.g. sent through a webhook on
    /// someone's behalf).
    pub proxied_member: Option<Identity>,
}

impl IncomingMessage {
    /// The user the command should be attributed to.
    pub fn acting_identity(&self) -> Option<&Identity> {
        self.proxied_member.as_ref().or(self.author.as_ref())
    }
}

/// Output of the upstream command parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: String,
    pub subcommand: Option<String>,
    /// `None` when the command carried no arguments at all.
    pub arguments: Option<Vec<String>>,
}

/// Everything a handler gets to see about one command occurrence.
#[derive(Clone)]
pub struct CommandContext {
    pub parsed: ParsedCommand,
    pub message: IncomingMessage,
    pub prefix: Option<String>,
    pub channel: Arc<dyn Channel>,
}

impl CommandContext {
    pub fn channel_kind(&self) -> ChannelKind {
        self.message.channel.kind
    }

    pub fn guild_id(&self) -> Option<GuildId> {
        self.message.channel.guild_id
    }

    pub fn acting_identity(&self) -> Option<&Identity> {
        self.message.acting_identity()
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("parsed", &self.parsed)
            .field("message", &self.message)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
