//! Collaborators the command module orchestrates but does not own.
//!
//! Every trait here is object safe and `Send + Sync` so a host can share one
//! implementation across concurrently running invocations behind an `Arc`.

pub mod catalog;
pub mod channel;
pub mod flows;
pub mod preferences;
pub mod render;
pub mod timezone;

pub use catalog::{ExtensionId, LanguageCatalog, LookupError, StringBundle};
pub use channel::Channel;
pub use flows::{CommandFlows, FlowHandler, HandlerError, HandlerId};
pub use preferences::PreferenceService;
pub use render::MessageRenderer;
pub use timezone::TimezoneValidator;

/// Failure reported by a collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("preference store failure: {0}")]
    Store(String),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("failed to deliver message: {0}")]
    Delivery(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
