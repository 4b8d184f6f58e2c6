use crate::core::message::Reply;
use crate::core::preference::{PreferenceKey, PreferenceScope};

use super::keys;

/// What the argument list of a `set`-style invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Not exactly `<key> <value>`; the caller gets usage help.
    Help,
    /// A key outside the alias table.
    Unrecognized(&'a str),
    Resolved { key: PreferenceKey, value: &'a str },
}

pub fn resolve_arguments(arguments: Option<&[String]>) -> Resolution<'_> {
    let [key, value] = arguments.unwrap_or_default() else {
        return Resolution::Help;
    };

    match PreferenceKey::from_alias(key) {
        Some(key) => Resolution::Resolved {
            key,
            value: value.as_str(),
        },
        None => Resolution::Unrecognized(key.as_str()),
    }
}

pub(super) fn help_reply(scope: PreferenceScope, prefix: &str) -> Reply {
    Reply::info(keys::scoped(keys::HELP_SET, scope.as_str())).with_param("prefix", prefix)
}
