//! Language catalog: the registry of loaded languages and their strings.

use std::collections::BTreeMap;

use crate::core::message::FormatParams;
use crate::utils::format::interpolate;

/// Why a string lookup failed.
///
/// Lookups flagged as required and lookups flagged as optional fail with
/// different variants so callers can tell "not translated" from "broken".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("language `{0}` is not loaded")]
    UnknownLanguage(String),
    #[error("required string `{key}` is missing for language `{language}`")]
    MissingRequired { language: String, key: String },
    #[error("optional string `{key}` is not set for language `{language}`")]
    MissingOptional { language: String, key: String },
}

/// Strings for one language, contributed by a module on top of the base
/// catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBundle {
    pub language: String,
    pub strings: BTreeMap<String, String>,
}

impl StringBundle {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            strings: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }
}

/// Handle returned by [`LanguageCatalog::extend`], used to retract the
/// extension again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionId(pub u64);

pub trait LanguageCatalog: Send + Sync {
    /// Loaded language codes, in catalog order.
    fn loaded_languages(&self) -> Vec<String>;

    fn is_loaded(&self, language: &str) -> bool {
        self.loaded_languages().iter().any(|code| code == language)
    }

    /// Looks up `key` for `language`.
    ///
    /// With `required` set, implementations may fall back to a default
    /// language before failing with [`LookupError::MissingRequired`].
    /// Optional lookups never fall back.
    fn get_string(&self, language: &str, key: &str, required: bool) -> Result<String, LookupError>;

    /// Required lookup with `{name}` placeholders filled from `params`.
    fn get_formatted_string(
        &self,
        language: &str,
        key: &str,
        params: &FormatParams,
    ) -> Result<String, LookupError> {
        let template = self.get_string(language, key, true)?;
        Ok(interpolate(&template, params))
    }

    /// Layers module-owned strings over the catalog.
    fn extend(&self, bundles: Vec<StringBundle>) -> ExtensionId;

    /// Removes a previous extension. Returns `false` if it was already gone.
    fn retract(&self, id: ExtensionId) -> bool;
}
