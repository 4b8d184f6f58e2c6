//! Lifecycle of the intl preferences module inside a host bot.
//!
//! `init` contributes the module's strings to the catalog and registers the
//! `intl` command with the host's command flows; `unload` undoes both.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::commands::{IntlCommand, Services, COMMAND_NAME};
use crate::services::{CommandFlows, ExtensionId, HandlerId, StringBundle};

const BUILTIN_STRINGS: &[(&str, &str)] = &[
    ("en", include_str!("builtins/i18n/en.toml")),
    ("ru", include_str!("builtins/i18n/ru.toml")),
];

/// The module's own strings, one bundle per shipped language.
pub fn builtin_bundles() -> Vec<StringBundle> {
    BUILTIN_STRINGS
        .iter()
        .map(|(language, contents)| {
            let strings: BTreeMap<String, String> =
                toml::from_str(contents).expect("Failed to parse builtin module strings");
            StringBundle {
                language: language.to_string(),
                strings,
            }
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("missing required dependency: {0}")]
    MissingDependency(&'static str),
}

/// What the host hands the module at init.
#[derive(Clone)]
pub struct ModuleDependencies {
    pub command_flows: Option<Arc<dyn CommandFlows>>,
    pub services: Services,
}

pub struct IntlPreferencesModule {
    flows: Arc<dyn CommandFlows>,
    services: Services,
    handler: Option<HandlerId>,
    extension: Option<ExtensionId>,
}

impl IntlPreferencesModule {
    pub fn init(deps: ModuleDependencies) -> Result<Self, InitError> {
        let flows = deps
            .command_flows
            .ok_or(InitError::MissingDependency("command flows"))?;
        let services = deps.services;

        let extension = services.catalog.extend(builtin_bundles());
        let command = Arc::new(IntlCommand::new(services.clone()));
        let handler = flows.watch_for_commands(COMMAND_NAME, command);

        info!(
            command = COMMAND_NAME,
            handler = handler.0,
            "Intl preferences module initialized"
        );

        Ok(Self {
            flows,
            services,
            handler: Some(handler),
            extension: Some(extension),
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.handler.is_some()
    }

    /// Deregisters the command and retracts the module's strings.
    ///
    /// Returns whether anything was released; calling it again is a no-op.
    pub fn unload(&mut self) -> bool {
        let handler = self.handler.take();
        let extension = self.extension.take();

        if let Some(handler) = handler {
            self.flows.unhandle(handler);
        }
        if let Some(extension) = extension {
            self.services.catalog.retract(extension);
        }

        let released = handler.is_some() || extension.is_some();
        if released {
            info!(command = COMMAND_NAME, "Intl preferences module unloaded");
        }
        released
    }
}

impl Drop for IntlPreferencesModule {
    fn drop(&mut self) {
        self.unload();
    }
}
