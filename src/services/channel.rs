use async_trait::async_trait;

use super::ServiceResult;
use crate::core::message::RenderedMessage;

/// The chat channel a command came from; replies go back to it.
#[async_trait]
pub trait Channel: Send + Sync {
    async fn send(&self, message: RenderedMessage) -> ServiceResult<()>;
}
