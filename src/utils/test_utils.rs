use std::sync::Arc;

use crate::commands::Services;
use crate::core::context::{
    ChannelKind, ChannelRef, CommandContext, GuildId, Identity, IncomingMessage, ParsedCommand,
    Permissions,
};
use crate::memory::{
    CatalogRenderer, IanaTimezones, MemoryPreferences, RecordingChannel, TomlCatalog,
};
use crate::module::builtin_bundles;
use crate::services::LanguageCatalog;

pub const TEST_GUILD: GuildId = GuildId(700);

/// In-memory collaborators plus typed handles for assertions.
pub struct TestServices {
    pub catalog: Arc<TomlCatalog>,
    pub preferences: Arc<MemoryPreferences>,
    pub services: Services,
}

/// Built-in languages without the module's own strings.
pub fn test_services() -> TestServices {
    let catalog = Arc::new(TomlCatalog::with_builtin_languages("en"));
    let preferences = Arc::new(MemoryPreferences::new("en"));
    let services = Services {
        catalog: catalog.clone(),
        preferences: preferences.clone(),
        renderer: Arc::new(CatalogRenderer::new(catalog.clone(), preferences.clone())),
        timezones: Arc::new(IanaTimezones),
    };
    TestServices {
        catalog,
        preferences,
        services,
    }
}

/// Same as [`test_services`], with the module's strings layered on.
pub fn test_services_with_strings() -> TestServices {
    let fixture = test_services();
    fixture.catalog.extend(builtin_bundles());
    fixture
}

pub fn guild_member(id: u64) -> Identity {
    Identity::user(id, format!("member-{id}")).with_membership(TEST_GUILD, Permissions::empty())
}

pub fn guild_manager(id: u64) -> Identity {
    Identity::user(id, format!("manager-{id}"))
        .with_membership(TEST_GUILD, Permissions::MANAGE_GUILD)
}

fn parsed(subcommand: &str, args: &[&str]) -> ParsedCommand {
    ParsedCommand {
        command: "intl".to_string(),
        subcommand: Some(subcommand.to_string()),
        arguments: (!args.is_empty()).then(|| args.iter().map(|a| a.to_string()).collect()),
    }
}

fn context(
    channel: ChannelRef,
    actor: Option<Identity>,
    parsed: ParsedCommand,
) -> (CommandContext, Arc<RecordingChannel>) {
    let recorder = Arc::new(RecordingChannel::new());
    let ctx = CommandContext {
        parsed,
        message: IncomingMessage {
            id: 1,
            channel,
            author: actor,
            proxied_member: None,
        },
        prefix: Some("!".to_string()),
        channel: recorder.clone(),
    };
    (ctx, recorder)
}

pub fn guild_channel() -> ChannelRef {
    ChannelRef {
        id: 701,
        kind: ChannelKind::GuildText,
        guild_id: Some(TEST_GUILD),
    }
}

pub fn dm_channel() -> ChannelRef {
    ChannelRef {
        id: 702,
        kind: ChannelKind::Direct,
        guild_id: None,
    }
}

/// `intl <subcommand> <args...>` from `actor` in a guild text channel.
pub fn guild_context(
    actor: Identity,
    subcommand: &str,
    args: &[&str],
) -> (CommandContext, Arc<RecordingChannel>) {
    context(guild_channel(), Some(actor), parsed(subcommand, args))
}

/// `intl <subcommand> <args...>` from `actor` in a direct message.
pub fn dm_context(
    actor: Identity,
    subcommand: &str,
    args: &[&str],
) -> (CommandContext, Arc<RecordingChannel>) {
    context(dm_channel(), Some(actor), parsed(subcommand, args))
}

/// A message with neither author nor proxied member.
pub fn anonymous_context(
    subcommand: &str,
    args: &[&str],
) -> (CommandContext, Arc<RecordingChannel>) {
    context(guild_channel(), None, parsed(subcommand, args))
}
