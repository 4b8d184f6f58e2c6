use async_trait::async_trait;

use super::ServiceResult;
use crate::core::context::Identity;
use crate::core::message::{RenderedMessage, Reply};

/// Turns a [`Reply`] into a message localized for `target`.
#[async_trait]
pub trait MessageRenderer: Send + Sync {
    async fn render(&self, target: &Identity, reply: &Reply) -> ServiceResult<RenderedMessage>;
}
