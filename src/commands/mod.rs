//! The `intl` command: routing, authorization and the preference setters.
//!
//! One invocation is a single linear pass. The router picks a subcommand,
//! `set`/`server_set` go through the authorization gate, the argument
//! resolver and one property setter, and `list` renders the language list.
//! Every stage either hands over to the next one or settles on a [`Reply`];
//! nothing is retried.

mod args;
mod gate;
mod handlers;
pub mod keys;
mod list;
mod names;
mod registry;

pub use args::{resolve_arguments, Resolution};
pub use gate::{authorize, GateDecision};
pub use handlers::parse_enforce_state;
pub use list::format_language_list;
pub use names::language_name;
pub use registry::{all_subcommands, find_subcommand, Route, Subcommand};

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::core::context::{CommandContext, Identity};
use crate::core::message::Reply;
use crate::services::{
    FlowHandler, HandlerError, LanguageCatalog, LookupError, MessageRenderer, PreferenceService,
    ServiceError, TimezoneValidator,
};

/// Top-level command name the module registers under.
pub const COMMAND_NAME: &str = "intl";

/// Failure of an invocation caused by infrastructure rather than user input.
#[derive(Debug, thiserror::Error)]
pub enum IntlError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("server-scoped change requested outside of a server")]
    MissingGuild,
}

/// Collaborators the command needs, injected once at construction.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn LanguageCatalog>,
    pub preferences: Arc<dyn PreferenceService>,
    pub renderer: Arc<dyn MessageRenderer>,
    pub timezones: Arc<dyn TimezoneValidator>,
}

pub struct IntlCommand {
    services: Services,
}

impl IntlCommand {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub(crate) fn catalog(&self) -> &dyn LanguageCatalog {
        self.services.catalog.as_ref()
    }

    pub(crate) fn preferences(&self) -> &dyn PreferenceService {
        self.services.preferences.as_ref()
    }

    pub(crate) fn timezones(&self) -> &dyn TimezoneValidator {
        self.services.timezones.as_ref()
    }

    /// Decides the reply for an invocation without sending it.
    ///
    /// `Ok(None)` means the invocation is dropped silently: no acting
    /// identity, an unknown subcommand or an unrecognized preference key.
    pub async fn execute(&self, ctx: &CommandContext) -> Result<Option<Reply>, IntlError> {
        match ctx.acting_identity() {
            Some(actor) => self.execute_as(ctx, actor).await,
            None => {
                debug!(message_id = ctx.message.id, "No acting identity for intl command");
                Ok(None)
            }
        }
    }

    /// Runs an invocation and sends the reply, if any, back to its channel.
    pub async fn run(&self, ctx: &CommandContext) -> Result<(), IntlError> {
        let Some(actor) = ctx.acting_identity() else {
            debug!(message_id = ctx.message.id, "No acting identity for intl command");
            return Ok(());
        };

        if let Some(reply) = self.execute_as(ctx, actor).await? {
            let rendered = self.services.renderer.render(actor, &reply).await?;
            ctx.channel.send(rendered).await?;
        }
        Ok(())
    }

    async fn execute_as(
        &self,
        ctx: &CommandContext,
        actor: &Identity,
    ) -> Result<Option<Reply>, IntlError> {
        let Some(name) = ctx.parsed.subcommand.as_deref() else {
            debug!("intl command without subcommand");
            return Ok(None);
        };
        let Some(subcommand) = find_subcommand(name) else {
            debug!(subcommand = %name, "Unknown intl subcommand");
            return Ok(None);
        };

        debug!(
            subcommand = subcommand.name,
            user = %actor.user_id,
            "Dispatching intl subcommand"
        );

        match subcommand.route {
            Route::Set(scope) => handlers::handle_set(self, ctx, scope, actor).await,
            Route::List => list::handle_list(self, actor).await.map(Some),
        }
    }
}

#[async_trait]
impl FlowHandler for IntlCommand {
    async fn handle(&self, ctx: &CommandContext) -> Result<(), HandlerError> {
        self.run(ctx).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests;
