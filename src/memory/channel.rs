use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};

use crate::core::message::RenderedMessage;
use crate::services::{Channel, ServiceError, ServiceResult};

/// Keeps every message sent to it.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<RenderedMessage>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<RenderedMessage> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Drains the recorded messages.
    pub fn take(&self) -> Vec<RenderedMessage> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    async fn send(&self, message: RenderedMessage) -> ServiceResult<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
        Ok(())
    }
}

/// Prints each message to stdout, followed by a blank line.
pub struct ConsoleChannel {
    stdout: tokio::sync::Mutex<Stdout>,
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self {
            stdout: tokio::sync::Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for ConsoleChannel {
    async fn send(&self, message: RenderedMessage) -> ServiceResult<()> {
        let mut stdout = self.stdout.lock().await;
        let text = format!("{message}\n\n");
        stdout
            .write_all(text.as_bytes())
            .await
            .map_err(|e| ServiceError::Delivery(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| ServiceError::Delivery(e.to_string()))
    }
}
