//! Minimal command-flow hub: parses prefixed text commands and routes them to
//! registered handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::core::context::{CommandContext, IncomingMessage, ParsedCommand};
use crate::services::{Channel, CommandFlows, FlowHandler, HandlerError, HandlerId};

struct Registration {
    id: HandlerId,
    command: String,
    handler: Arc<dyn FlowHandler>,
}

pub struct FlowHub {
    prefix: String,
    handlers: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

/// Splits `<prefix><command> [subcommand] [arguments...]` on whitespace.
///
/// Returns `None` for text that is not a command.
pub fn parse_command(prefix: &str, text: &str) -> Option<ParsedCommand> {
    let body = text.trim().strip_prefix(prefix)?;
    if body.starts_with(char::is_whitespace) {
        return None;
    }

    let mut tokens = body.split_whitespace();
    let command = tokens.next()?.to_string();
    let subcommand = tokens.next().map(str::to_string);
    let arguments: Vec<String> = tokens.map(str::to_string).collect();

    Some(ParsedCommand {
        command,
        subcommand,
        arguments: (!arguments.is_empty()).then_some(arguments),
    })
}

impl FlowHub {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Runs every handler registered for the command in `text`.
    ///
    /// Returns how many handlers ran; zero when `text` is not a command or
    /// nobody listens for it.
    pub async fn dispatch(
        &self,
        message: IncomingMessage,
        text: &str,
        channel: Arc<dyn Channel>,
    ) -> Result<usize, HandlerError> {
        let Some(parsed) = parse_command(&self.prefix, text) else {
            return Ok(0);
        };

        let handlers: Vec<Arc<dyn FlowHandler>> = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|registration| registration.command.eq_ignore_ascii_case(&parsed.command))
            .map(|registration| registration.handler.clone())
            .collect();

        if handlers.is_empty() {
            debug!(command = %parsed.command, "No handler for command");
            return Ok(0);
        }

        let ctx = CommandContext {
            parsed,
            message,
            prefix: Some(self.prefix.clone()),
            channel,
        };

        for handler in &handlers {
            handler.handle(&ctx).await?;
        }
        Ok(handlers.len())
    }
}

impl CommandFlows for FlowHub {
    fn watch_for_commands(&self, command: &str, handler: Arc<dyn FlowHandler>) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Registration {
                id,
                command: command.to_string(),
                handler,
            });
        info!(command = %command, handler = id.0, "Registered command handler");
        id
    }

    fn unhandle(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        let before = handlers.len();
        handlers.retain(|registration| registration.id != id);
        let removed = handlers.len() != before;
        if removed {
            info!(handler = id.0, "Removed command handler");
        }
        removed
    }
}
