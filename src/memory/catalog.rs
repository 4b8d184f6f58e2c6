//! TOML-backed language catalog.
//!
//! Each language is a flat TOML table of `key = "string"` pairs. Built-in
//! languages ship inside the binary; more can be loaded from `<code>.toml`
//! files in a directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::services::catalog::{ExtensionId, LanguageCatalog, LookupError, StringBundle};

const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("en", include_str!("../builtins/languages/en.toml")),
    ("ru", include_str!("../builtins/languages/ru.toml")),
    ("uk", include_str!("../builtins/languages/uk.toml")),
    ("fr", include_str!("../builtins/languages/fr.toml")),
    ("de", include_str!("../builtins/languages/de.toml")),
];

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read language file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse strings for language `{language}`: {source}")]
    Parse {
        language: String,
        source: toml::de::Error,
    },
}

#[derive(Debug)]
struct Language {
    code: String,
    strings: HashMap<String, String>,
}

#[derive(Debug)]
struct Extension {
    id: ExtensionId,
    bundles: Vec<StringBundle>,
}

#[derive(Debug, Default)]
struct CatalogState {
    languages: Vec<Language>,
    extensions: Vec<Extension>,
    next_extension: u64,
}

impl CatalogState {
    fn language(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.code == code)
    }

    /// Newest extension wins, then the base strings.
    fn lookup(&self, code: &str, key: &str) -> Option<&str> {
        let language = self.language(code)?;

        self.extensions
            .iter()
            .rev()
            .flat_map(|extension| extension.bundles.iter())
            .filter(|bundle| bundle.language == code)
            .find_map(|bundle| bundle.strings.get(key))
            .or_else(|| language.strings.get(key))
            .map(String::as_str)
    }
}

pub struct TomlCatalog {
    default_language: String,
    state: RwLock<CatalogState>,
}

impl TomlCatalog {
    /// An empty catalog. `default_language` is where required lookups fall
    /// back to.
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
            state: RwLock::new(CatalogState::default()),
        }
    }

    /// A catalog preloaded with the languages embedded in the binary.
    pub fn with_builtin_languages(default_language: impl Into<String>) -> Self {
        let catalog = Self::new(default_language);
        for (code, contents) in BUILTIN_LANGUAGES {
            catalog
                .load_toml_str(code, contents)
                .expect("Failed to parse builtin language file");
        }
        catalog
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Adds a language, or replaces the strings of an already loaded one
    /// while keeping its position.
    pub fn add_language<I, K, V>(&self, code: impl Into<String>, strings: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let code = code.into();
        let strings: HashMap<String, String> = strings
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        match state.languages.iter_mut().find(|l| l.code == code) {
            Some(existing) => existing.strings = strings,
            None => state.languages.push(Language { code, strings }),
        }
    }

    pub fn load_toml_str(&self, code: &str, contents: &str) -> Result<(), CatalogLoadError> {
        let strings: HashMap<String, String> =
            toml::from_str(contents).map_err(|source| CatalogLoadError::Parse {
                language: code.to_string(),
                source,
            })?;
        debug!(language = %code, strings = strings.len(), "Loaded language");
        self.add_language(code, strings);
        Ok(())
    }

    /// Loads every `<code>.toml` file in `dir`, in file name order.
    ///
    /// Returns how many languages were loaded.
    pub fn load_dir(&self, dir: &Path) -> Result<usize, CatalogLoadError> {
        let read_err = |source| CatalogLoadError::Read {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
                files.push(path);
            }
        }
        files.sort();

        let mut loaded = 0;
        for path in files {
            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let contents = fs::read_to_string(&path).map_err(|source| CatalogLoadError::Read {
                path: path.clone(),
                source,
            })?;
            self.load_toml_str(code, &contents)?;
            loaded += 1;
        }

        Ok(loaded)
    }
}

impl LanguageCatalog for TomlCatalog {
    fn loaded_languages(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.languages.iter().map(|l| l.code.clone()).collect()
    }

    fn is_loaded(&self, language: &str) -> bool {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.language(language).is_some()
    }

    fn get_string(&self, language: &str, key: &str, required: bool) -> Result<String, LookupError> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());

        if let Some(value) = state.lookup(language, key) {
            return Ok(value.to_string());
        }

        if !required {
            return Err(match state.language(language) {
                Some(_) => LookupError::MissingOptional {
                    language: language.to_string(),
                    key: key.to_string(),
                },
                None => LookupError::UnknownLanguage(language.to_string()),
            });
        }

        if language != self.default_language {
            if let Some(value) = state.lookup(&self.default_language, key) {
                return Ok(value.to_string());
            }
        }

        Err(LookupError::MissingRequired {
            language: language.to_string(),
            key: key.to_string(),
        })
    }

    fn extend(&self, bundles: Vec<StringBundle>) -> ExtensionId {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

        let bundles: Vec<StringBundle> = bundles
            .into_iter()
            .filter(|bundle| {
                let loaded = state.language(&bundle.language).is_some();
                if !loaded {
                    debug!(language = %bundle.language, "Skipping strings for language that is not loaded");
                }
                loaded
            })
            .collect();

        state.next_extension += 1;
        let id = ExtensionId(state.next_extension);
        state.extensions.push(Extension { id, bundles });
        id
    }

    fn retract(&self, id: ExtensionId) -> bool {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let before = state.extensions.len();
        state.extensions.retain(|extension| extension.id != id);
        state.extensions.len() != before
    }
}
