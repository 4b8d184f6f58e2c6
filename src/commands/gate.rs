use crate::core::context::{ChannelKind, ChannelRef, Identity};
use crate::core::message::Reply;
use crate::core::preference::PreferenceScope;

use super::keys;

/// Outcome of checking whether an identity may write in a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    /// Guild-scoped change attempted outside a guild text channel.
    DeniedNotGuild,
    /// The actor is not a member of the guild with manage-guild authority.
    DeniedNoPermission,
}

impl GateDecision {
    pub fn is_allowed(self) -> bool {
        self == GateDecision::Allowed
    }

    /// Reply for a denial, `None` when allowed.
    ///
    /// `not_guild_key` selects the wrong-context message, which differs
    /// between plain server settings and language enforcement.
    pub fn denial_reply(self, not_guild_key: &str) -> Option<Reply> {
        match self {
            GateDecision::Allowed => None,
            GateDecision::DeniedNotGuild => Some(Reply::error(not_guild_key)),
            GateDecision::DeniedNoPermission => Some(Reply::info(keys::SET_PERMISSIONS)),
        }
    }
}

/// User-scoped writes are always allowed. Guild-scoped writes need a guild
/// text channel and a member of that guild who can manage it.
pub fn authorize(scope: PreferenceScope, channel: &ChannelRef, actor: &Identity) -> GateDecision {
    match scope {
        PreferenceScope::User => GateDecision::Allowed,
        PreferenceScope::Guild => authorize_guild(channel, actor),
    }
}

fn authorize_guild(channel: &ChannelRef, actor: &Identity) -> GateDecision {
    let guild_id = match (channel.kind, channel.guild_id) {
        (ChannelKind::GuildText, Some(guild_id)) => guild_id,
        _ => return GateDecision::DeniedNotGuild,
    };

    match &actor.membership {
        Some(membership)
            if membership.guild_id == guild_id && membership.permissions.can_manage_guild() =>
        {
            GateDecision::Allowed
        }
        _ => GateDecision::DeniedNoPermission,
    }
}
