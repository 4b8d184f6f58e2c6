use super::*;
use crate::core::context::{GuildId, Identity, Permissions, UserId};
use crate::core::message::MessageKind;
use crate::utils::test_utils::{
    anonymous_context, dm_context, guild_context, guild_manager, guild_member,
    test_services_with_strings, TestServices, TEST_GUILD,
};

fn command() -> (IntlCommand, TestServices) {
    let fixture = test_services_with_strings();
    (IntlCommand::new(fixture.services.clone()), fixture)
}

async fn reply_for(cmd: &IntlCommand, ctx: &CommandContext) -> Reply {
    cmd.execute(ctx)
        .await
        .expect("invocation failed")
        .expect("expected a reply")
}

#[tokio::test]
async fn set_timezone_stores_and_reports_current_time() {
    let (cmd, fixture) = command();
    let (ctx, _) = guild_context(guild_member(1), "set", &["timezone", "Europe/Moscow"]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(reply.kind, MessageKind::Ok);
    assert_eq!(
        reply.key(),
        Some("LANGUAGE_PREFERENCE_SET_DONE_TIMEZONE@USER")
    );
    assert_eq!(reply.param("timezone"), Some("Europe/Moscow"));
    assert!(reply
        .param("currentTime")
        .is_some_and(|time| time.ends_with("MSK")));
    assert_eq!(fixture.preferences.write_count(), 1);
    assert_eq!(
        fixture.preferences.user(UserId(1)).await.timezone.as_deref(),
        Some("Europe/Moscow")
    );
}

#[tokio::test]
async fn server_timezone_uses_guild_scope() {
    let (cmd, fixture) = command();
    let (ctx, _) = guild_context(guild_manager(2), "server_set", &["tz", "Asia/Tokyo"]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(
        reply.key(),
        Some("LANGUAGE_PREFERENCE_SET_DONE_TIMEZONE@GUILD")
    );
    assert!(reply
        .param("currentTime")
        .is_some_and(|time| time.ends_with("JST")));
    assert_eq!(
        fixture.preferences.guild(TEST_GUILD).await.timezone.as_deref(),
        Some("Asia/Tokyo")
    );
}

#[tokio::test]
async fn invalid_timezone_is_rejected_without_write() {
    let (cmd, fixture) = command();
    let (ctx, _) = guild_context(guild_member(1), "set", &["tz", "Mars/Olympus"]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(reply.kind, MessageKind::Error);
    assert_eq!(reply.key(), Some(keys::SET_INVALID_TIMEZONE));
    assert_eq!(reply.param("timezone"), Some("Mars/Olympus"));
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn server_set_without_permission_is_denied() {
    let (cmd, fixture) = command();
    let (ctx, _) = guild_context(guild_member(1), "server_set", &["language", "xx"]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(reply.kind, MessageKind::Information);
    assert_eq!(reply.key(), Some(keys::SET_PERMISSIONS));
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn administrators_may_change_server_preferences() {
    let (cmd, fixture) = command();
    let admin = Identity::user(3, "admin").with_membership(TEST_GUILD, Permissions::ADMINISTRATOR);
    let (ctx, _) = guild_context(admin, "server_set", &["lang", "de"]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(reply.key(), Some("LANGUAGE_PREFERENCE_SET_DONE@GUILD"));
    assert_eq!(
        fixture.preferences.guild(TEST_GUILD).await.language.as_deref(),
        Some("de")
    );
}

#[tokio::test]
async fn membership_of_another_guild_does_not_count() {
    let (cmd, fixture) = command();
    let outsider =
        Identity::user(4, "outsider").with_membership(GuildId(1), Permissions::MANAGE_GUILD);
    let (ctx, _) = guild_context(outsider, "server_set", &["lang", "de"]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(reply.key(), Some(keys::SET_PERMISSIONS));
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn server_set_in_direct_message_is_wrong_context() {
    let (cmd, fixture) = command();

    // The gate runs before the argument count is checked.
    for args in [&["language", "ru"][..], &[][..], &["language"][..]] {
        let (ctx, _) = dm_context(guild_manager(2), "server_set", args);
        let reply = reply_for(&cmd, &ctx).await;
        assert_eq!(reply.kind, MessageKind::Error);
        assert_eq!(reply.key(), Some(keys::SET_DM));
    }
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn wrong_argument_count_shows_scoped_help() {
    let (cmd, fixture) = command();

    for args in [&[][..], &["language"][..], &["language", "en", "now"][..]] {
        let (ctx, _) = guild_context(guild_member(1), "set", args);
        let reply = reply_for(&cmd, &ctx).await;
        assert_eq!(reply.kind, MessageKind::Information);
        assert_eq!(reply.key(), Some("LANGUAGE_PREFERENCE_HELP_SET@USER"));
        assert_eq!(reply.param("prefix"), Some("!"));
    }

    let (ctx, _) = guild_context(guild_manager(2), "server_set", &["tz"]);
    assert_eq!(
        reply_for(&cmd, &ctx).await.key(),
        Some("LANGUAGE_PREFERENCE_HELP_SET@GUILD")
    );
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn set_language_stores_and_names_the_language() {
    let (cmd, fixture) = command();
    let (ctx, _) = dm_context(Identity::user(5, "dm-user"), "set", &["lang", "ru"]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(reply.kind, MessageKind::Ok);
    assert_eq!(reply.key(), Some("LANGUAGE_PREFERENCE_SET_DONE@USER"));
    assert_eq!(reply.param("language"), Some("Русский (Россия)"));
    assert_eq!(
        fixture.preferences.user(UserId(5)).await.language.as_deref(),
        Some("ru")
    );
}

#[tokio::test]
async fn unknown_language_code_is_rejected_with_prefix() {
    let (cmd, fixture) = command();
    let (ctx, _) = guild_context(guild_member(1), "set", &["language", "xx"]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(reply.kind, MessageKind::Error);
    assert_eq!(reply.key(), Some(keys::SET_INVALID_LANGCODE));
    assert_eq!(reply.param("code"), Some("xx"));
    assert_eq!(reply.param("prefix"), Some("!"));
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn language_codes_are_case_sensitive() {
    let (cmd, _) = command();
    let (ctx, _) = guild_context(guild_member(1), "set", &["language", "RU"]);

    assert_eq!(
        reply_for(&cmd, &ctx).await.key(),
        Some(keys::SET_INVALID_LANGCODE)
    );
}

#[tokio::test]
async fn invalid_enforce_state_is_echoed() {
    let (cmd, fixture) = command();

    for ctx in [
        guild_context(guild_manager(2), "server_set", &["enforce", "maybe"]).0,
        dm_context(guild_member(1), "set", &["enforce", "maybe"]).0,
    ] {
        let reply = reply_for(&cmd, &ctx).await;
        assert_eq!(reply.kind, MessageKind::Error);
        assert_eq!(reply.key(), Some(keys::SET_INVALID_STATE));
        assert_eq!(reply.param("state"), Some("maybe"));
    }
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn enforcement_requires_server_context_and_permission() {
    let (cmd, fixture) = command();

    let (ctx, _) = dm_context(guild_manager(2), "set", &["enforce", "enable"]);
    let reply = reply_for(&cmd, &ctx).await;
    assert_eq!(reply.kind, MessageKind::Error);
    assert_eq!(reply.key(), Some(keys::ENFORCING_DM));

    let (ctx, _) = guild_context(guild_member(1), "set", &["enf", "+"]);
    assert_eq!(reply_for(&cmd, &ctx).await.key(), Some(keys::SET_PERMISSIONS));

    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn enforcement_toggles_guild_setting() {
    let (cmd, fixture) = command();

    let (ctx, _) = guild_context(guild_manager(2), "server_set", &["enforce", "Enable"]);
    let reply = reply_for(&cmd, &ctx).await;
    assert_eq!(reply.kind, MessageKind::Ok);
    assert_eq!(
        reply.key(),
        Some("LANGUAGE_PREFERENCE_SET_ENFORCE_DONE@ENABLED")
    );
    assert!(fixture.preferences.guild(TEST_GUILD).await.enforce);

    let (ctx, _) = guild_context(guild_manager(2), "set", &["enf", "-"]);
    assert_eq!(
        reply_for(&cmd, &ctx).await.key(),
        Some("LANGUAGE_PREFERENCE_SET_ENFORCE_DONE@DISABLED")
    );
    assert!(!fixture.preferences.guild(TEST_GUILD).await.enforce);
    assert_eq!(fixture.preferences.write_count(), 2);
}

#[tokio::test]
async fn unrecognized_key_is_silent() {
    let (cmd, fixture) = command();
    let (ctx, channel) = guild_context(guild_manager(2), "server_set", &["currency", "EUR"]);

    assert!(cmd.execute(&ctx).await.unwrap().is_none());
    cmd.run(&ctx).await.unwrap();

    assert!(channel.messages().is_empty());
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn unknown_or_missing_subcommand_is_silent() {
    let (cmd, _) = command();

    let (ctx, channel) = guild_context(guild_member(1), "remove", &["language"]);
    assert!(cmd.execute(&ctx).await.unwrap().is_none());

    let (mut ctx, _) = guild_context(guild_member(1), "list", &[]);
    ctx.parsed.subcommand = None;
    assert!(cmd.execute(&ctx).await.unwrap().is_none());

    assert!(channel.messages().is_empty());
}

#[tokio::test]
async fn invocation_without_actor_is_silent() {
    let (cmd, fixture) = command();
    let (ctx, channel) = anonymous_context("set", &["language", "ru"]);

    assert!(cmd.execute(&ctx).await.unwrap().is_none());
    cmd.run(&ctx).await.unwrap();

    assert!(channel.messages().is_empty());
    assert_eq!(fixture.preferences.write_count(), 0);
}

#[tokio::test]
async fn proxied_member_is_the_actor() {
    let (cmd, fixture) = command();
    let (mut ctx, _) = guild_context(Identity::user(90, "proxy"), "set", &["lang", "fr"]);
    ctx.message.proxied_member = Some(guild_member(6));

    cmd.execute(&ctx).await.unwrap();

    assert_eq!(
        fixture.preferences.user(UserId(6)).await.language.as_deref(),
        Some("fr")
    );
    assert_eq!(fixture.preferences.user(UserId(90)).await.language, None);
}

#[tokio::test]
async fn list_reports_every_language_in_catalog_order() {
    let (cmd, _) = command();
    let (ctx, _) = dm_context(Identity::user(5, "dm-user"), "list", &[]);

    let reply = reply_for(&cmd, &ctx).await;

    assert_eq!(reply.kind, MessageKind::Information);
    assert_eq!(reply.key(), Some(keys::LIST));
    assert_eq!(reply.title.as_deref(), Some("Available languages"));
    assert_eq!(
        reply.param("languages"),
        Some(
            "`en`: English (United States)\n\
             `ru`: Русский (Россия)\n\
             `uk`: Українська (Україна)\n\
             `fr`: Français (France)\n\
             `de`: Deutsch\n"
        )
    );
}

#[tokio::test]
async fn run_renders_in_the_actors_language() {
    let (cmd, _) = command();

    let (ctx, _) = guild_context(guild_member(1), "set", &["language", "ru"]);
    cmd.run(&ctx).await.unwrap();

    let (ctx, channel) = guild_context(guild_member(1), "list", &[]);
    cmd.run(&ctx).await.unwrap();

    let sent = channel.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, MessageKind::Information);
    assert_eq!(sent[0].title.as_deref(), Some("Доступные языки"));
    assert!(sent[0].content.contains("Deutsch"));
}

#[tokio::test]
async fn run_sends_denials_to_the_channel() {
    let (cmd, _) = command();
    let (ctx, channel) = dm_context(guild_manager(2), "server_set", &["lang", "ru"]);

    cmd.run(&ctx).await.unwrap();

    let sent = channel.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, MessageKind::Error);
    assert_eq!(
        sent[0].content,
        "Server preferences can only be changed from a server text channel."
    );
}

#[tokio::test]
async fn rendered_help_uses_the_command_prefix() {
    let (cmd, _) = command();
    let (mut ctx, channel) = guild_context(guild_manager(2), "server_set", &[]);
    ctx.prefix = Some("?".to_string());

    cmd.run(&ctx).await.unwrap();

    let sent = channel.messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0]
        .content
        .contains("`?intl server_set language <code>`"));
    assert!(sent[0].content.contains("(see `?intl list`)"));
    assert!(!sent[0].content.contains("{prefix}"));
}
