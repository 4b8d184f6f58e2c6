//! Property setters behind `set` and `server_set`.

mod enforce;
mod language;
mod timezone;

pub use enforce::parse_enforce_state;

use tracing::debug;

use crate::core::context::{CommandContext, GuildId, Identity};
use crate::core::message::Reply;
use crate::core::preference::{PreferenceKey, PreferenceScope};

use super::args::{help_reply, resolve_arguments, Resolution};
use super::gate::authorize;
use super::{keys, IntlCommand, IntlError};

/// Inputs shared by every property setter.
pub(super) struct SetRequest<'a> {
    pub ctx: &'a CommandContext,
    pub scope: PreferenceScope,
    pub value: &'a str,
    pub actor: &'a Identity,
}

impl SetRequest<'_> {
    fn guild(&self) -> Result<GuildId, IntlError> {
        self.ctx.guild_id().ok_or(IntlError::MissingGuild)
    }
}

/// Gate, then arguments, then the matching setter.
pub(super) async fn handle_set(
    cmd: &IntlCommand,
    ctx: &CommandContext,
    scope: PreferenceScope,
    actor: &Identity,
) -> Result<Option<Reply>, IntlError> {
    let decision = authorize(scope, &ctx.message.channel, actor);
    if let Some(denial) = decision.denial_reply(keys::SET_DM) {
        debug!(scope = %scope, decision = ?decision, "intl set denied");
        return Ok(Some(denial));
    }

    let (key, value) = match resolve_arguments(ctx.parsed.arguments.as_deref()) {
        Resolution::Resolved { key, value } => (key, value),
        Resolution::Help => return Ok(Some(help_reply(scope, ctx.prefix()))),
        Resolution::Unrecognized(token) => {
            debug!(key = %token, "Ignoring unrecognized preference key");
            return Ok(None);
        }
    };

    let request = SetRequest {
        ctx,
        scope,
        value,
        actor,
    };

    let reply = match key {
        PreferenceKey::Language => language::set_language(cmd, &request).await?,
        PreferenceKey::Timezone => timezone::set_timezone(cmd, &request).await?,
        PreferenceKey::Enforce => enforce::set_enforce(cmd, &request).await?,
    };

    Ok(Some(reply))
}
