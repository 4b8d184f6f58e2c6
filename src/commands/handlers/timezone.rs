use chrono::Utc;
use tracing::debug;

use crate::core::message::Reply;
use crate::core::preference::PreferenceScope;

use super::super::{keys, IntlCommand, IntlError};
use super::SetRequest;

pub(super) async fn set_timezone(
    cmd: &IntlCommand,
    request: &SetRequest<'_>,
) -> Result<Reply, IntlError> {
    let timezone = request.value;

    if !cmd.timezones().accepts(timezone) {
        debug!(timezone = %timezone, "Rejected timezone");
        return Ok(Reply::error(keys::SET_INVALID_TIMEZONE).with_param("timezone", timezone));
    }

    let preferences = cmd.preferences();
    let current_time = match request.scope {
        PreferenceScope::User => {
            preferences
                .set_user_timezone(request.actor, timezone)
                .await?;
            preferences
                .to_user_locale_string(request.actor, Utc::now())
                .await?
        }
        PreferenceScope::Guild => {
            let guild = request.guild()?;
            preferences.set_guild_timezone(guild, timezone).await?;
            preferences.to_guild_locale_string(guild, Utc::now()).await?
        }
    };
    debug!(scope = %request.scope, timezone = %timezone, "Timezone preference stored");

    Ok(
        Reply::ok(keys::scoped(keys::SET_DONE_TIMEZONE, request.scope.as_str()))
            .with_param("currentTime", current_time)
            .with_param("timezone", timezone),
    )
}
