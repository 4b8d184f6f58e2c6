use crate::core::preference::PreferenceScope;

/// What a subcommand dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Set(PreferenceScope),
    List,
}

pub struct Subcommand {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub route: Route,
}

pub fn all_subcommands() -> &'static [Subcommand] {
    SUBCOMMANDS
}

/// Subcommand names are matched exactly.
pub fn find_subcommand(name: &str) -> Option<&'static Subcommand> {
    all_subcommands()
        .iter()
        .find(|subcommand| subcommand.name == name)
}

const SUBCOMMANDS: &[Subcommand] = &[
    Subcommand {
        name: "set",
        usage: "set <language|lang|timezone|tz|enforce|enf> <value>",
        help: "Change your own language or timezone.",
        route: Route::Set(PreferenceScope::User),
    },
    Subcommand {
        name: "server_set",
        usage: "server_set <language|lang|timezone|tz|enforce|enf> <value>",
        help: "Change the server's language, timezone or language enforcement.",
        route: Route::Set(PreferenceScope::Guild),
    },
    Subcommand {
        name: "list",
        usage: "list",
        help: "Show every available language.",
        route: Route::List,
    },
];
