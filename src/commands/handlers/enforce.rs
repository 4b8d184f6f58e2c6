use tracing::debug;

use crate::core::message::Reply;
use crate::core::preference::PreferenceScope;

use super::super::gate::authorize;
use super::super::{keys, IntlCommand, IntlError};
use super::SetRequest;

/// Normalizes an enforcement state token. Case-insensitive.
///
/// Accepts `+`/`enable`/`true` and `-`/`disable`/`false`.
pub fn parse_enforce_state(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "+" | "enable" | "true" => Some(true),
        "-" | "disable" | "false" => Some(false),
        _ => None,
    }
}

fn state_suffix(enabled: bool) -> &'static str {
    if enabled {
        "ENABLED"
    } else {
        "DISABLED"
    }
}

/// Enforcement is a guild setting whichever subcommand carried it, so the
/// guild gate runs here even for `set`. The token is checked first, making a
/// bad token a validation error in every context.
pub(super) async fn set_enforce(
    cmd: &IntlCommand,
    request: &SetRequest<'_>,
) -> Result<Reply, IntlError> {
    let Some(enable) = parse_enforce_state(request.value) else {
        debug!(state = %request.value, "Rejected enforcement state");
        return Ok(Reply::error(keys::SET_INVALID_STATE).with_param("state", request.value));
    };

    let decision = authorize(
        PreferenceScope::Guild,
        &request.ctx.message.channel,
        request.actor,
    );
    if let Some(denial) = decision.denial_reply(keys::ENFORCING_DM) {
        debug!(decision = ?decision, "Enforcement change denied");
        return Ok(denial);
    }

    cmd.preferences()
        .set_guild_enforce(request.guild()?, enable)
        .await?;
    debug!(enabled = enable, "Language enforcement stored");

    Ok(Reply::ok(keys::scoped(
        keys::SET_ENFORCE_DONE,
        state_suffix(enable),
    )))
}
