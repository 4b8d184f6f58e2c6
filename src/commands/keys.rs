//! Catalog keys the `intl` command emits.
//!
//! Scope- and state-specific keys carry an `@SUFFIX` added by [`scoped`].

pub const SET_DM: &str = "LANGUAGE_PREFERENCE_SET_DM";
pub const SET_PERMISSIONS: &str = "LANGUAGE_PREFERENCE_SET_PERMISSIONS";
pub const HELP_SET: &str = "LANGUAGE_PREFERENCE_HELP_SET";

pub const SET_INVALID_LANGCODE: &str = "LANGUAGE_PREFERENCE_SET_INVALID_LANGCODE";
pub const SET_DONE: &str = "LANGUAGE_PREFERENCE_SET_DONE";

pub const SET_INVALID_TIMEZONE: &str = "LANGUAGE_PREFERENCE_SET_INVALID_TIMEZONE";
pub const SET_DONE_TIMEZONE: &str = "LANGUAGE_PREFERENCE_SET_DONE_TIMEZONE";

pub const SET_INVALID_STATE: &str = "LANGUAGE_PREFERENCE_SET_INVALID_STATE";
pub const ENFORCING_DM: &str = "LANGUAGE_PREFERENCE_ENFORCING_DM";
pub const SET_ENFORCE_DONE: &str = "LANGUAGE_PREFERENCE_SET_ENFORCE_DONE";

pub const LIST: &str = "LANGUAGE_PREFERENCE_LIST";
pub const LIST_TITLE: &str = "LANGUAGE_PREFERENCE_LIST_TITLE";
pub const LIST_LANGUAGE: &str = "LANGUAGE_PREFERENCE_LIST_LANGUAGE";

pub const NO_NAME: &str = "LANGUAGE_PREFERENCE_NO_NAME";

/// A language's name for itself, stored in its own bundle.
pub const NAME: &str = "+NAME";
/// The country a language bundle is written for.
pub const COUNTRY: &str = "+COUNTRY";

pub fn scoped(key: &str, suffix: &str) -> String {
    format!("{key}@{suffix}")
}
