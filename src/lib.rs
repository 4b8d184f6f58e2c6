//! Per-user and per-server language and timezone preferences for a chat bot.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`commands`] implements the `intl` command: subcommand routing, the
//!   server-permission gate, argument resolution and the property setters.
//! - [`services`] defines the collaborator traits the command relies on
//!   (language catalog, preference store, renderer, channels, command flows).
//! - [`memory`] provides in-memory and TOML-backed implementations of those
//!   collaborators.
//! - [`module`] wires the command into a host's command flows and contributes
//!   its localized strings.
//! - [`core`] holds message, context and configuration types.
//!
//! The `intl-console` binary (`src/main.rs`) routes through [`crate::cli::main`]
//! and drives the module from stdin.

pub mod cli;
pub mod commands;
pub mod core;
pub mod memory;
pub mod module;
pub mod services;
pub mod utils;
