//! Registration surface of the host's command-flow subsystem.

use async_trait::async_trait;

use crate::core::context::CommandContext;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// Receives every parsed invocation of the command it was registered for.
#[async_trait]
pub trait FlowHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext) -> Result<(), HandlerError>;
}

pub trait CommandFlows: Send + Sync {
    /// Routes invocations of the top-level `command` to `handler`.
    fn watch_for_commands(
        &self,
        command: &str,
        handler: std::sync::Arc<dyn FlowHandler>,
    ) -> HandlerId;

    /// Stops routing to a handler. Returns `false` if it was not registered.
    fn unhandle(&self, id: HandlerId) -> bool;
}
