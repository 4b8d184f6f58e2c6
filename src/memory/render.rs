use std::sync::Arc;

use async_trait::async_trait;

use crate::core::context::Identity;
use crate::core::message::{MessageBody, RenderedMessage, Reply};
use crate::services::{LanguageCatalog, MessageRenderer, PreferenceService, ServiceResult};
use crate::utils::format::interpolate;

/// Renders replies through the catalog in the recipient's language.
pub struct CatalogRenderer {
    catalog: Arc<dyn LanguageCatalog>,
    preferences: Arc<dyn PreferenceService>,
}

impl CatalogRenderer {
    pub fn new(catalog: Arc<dyn LanguageCatalog>, preferences: Arc<dyn PreferenceService>) -> Self {
        Self {
            catalog,
            preferences,
        }
    }
}

#[async_trait]
impl MessageRenderer for CatalogRenderer {
    async fn render(&self, target: &Identity, reply: &Reply) -> ServiceResult<RenderedMessage> {
        let language = self.preferences.user_language(target).await?;

        let content = match &reply.body {
            MessageBody::Key(key) => {
                self.catalog
                    .get_formatted_string(&language, key, &reply.params)?
            }
            MessageBody::Text(text) => interpolate(text, &reply.params),
        };

        Ok(RenderedMessage {
            kind: reply.kind,
            title: reply.title.clone(),
            content,
        })
    }
}
