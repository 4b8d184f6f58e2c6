use tracing::debug;

use crate::core::message::Reply;
use crate::core::preference::PreferenceScope;

use super::super::names::language_name;
use super::super::{keys, IntlCommand, IntlError};
use super::SetRequest;

pub(super) async fn set_language(
    cmd: &IntlCommand,
    request: &SetRequest<'_>,
) -> Result<Reply, IntlError> {
    let code = request.value;

    if !cmd.catalog().is_loaded(code) {
        debug!(code = %code, "Rejected unknown language code");
        return Ok(Reply::error(keys::SET_INVALID_LANGCODE)
            .with_param("code", code)
            .with_param("prefix", request.ctx.prefix()));
    }

    match request.scope {
        PreferenceScope::User => {
            cmd.preferences()
                .set_user_language(request.actor, code)
                .await?
        }
        PreferenceScope::Guild => {
            cmd.preferences()
                .set_guild_language(request.guild()?, code)
                .await?
        }
    }
    debug!(scope = %request.scope, code = %code, "Language preference stored");

    Ok(
        Reply::ok(keys::scoped(keys::SET_DONE, request.scope.as_str()))
            .with_param("language", language_name(cmd.catalog(), code)),
    )
}
