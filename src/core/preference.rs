use std::fmt;

/// Which storage partition a preference write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceScope {
    User,
    Guild,
}

impl PreferenceScope {
    /// Suffix used in scope-specific message keys.
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceScope::User => "USER",
            PreferenceScope::Guild => "GUILD",
        }
    }
}

impl fmt::Display for PreferenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which property a `set`-style invocation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    Language,
    Timezone,
    Enforce,
}

impl PreferenceKey {
    /// Maps a key token to a property. Matching is case-sensitive.
    pub fn from_alias(token: &str) -> Option<Self> {
        match token {
            "language" | "lang" => Some(PreferenceKey::Language),
            "timezone" | "tz" => Some(PreferenceKey::Timezone),
            "enforce" | "enf" => Some(PreferenceKey::Enforce),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PreferenceKey::Language => "language",
            PreferenceKey::Timezone => "timezone",
            PreferenceKey::Enforce => "enforce",
        }
    }
}
