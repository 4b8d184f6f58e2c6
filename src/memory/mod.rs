//! Reference implementations of the collaborator traits.
//!
//! These back the console host and the tests. A real bot platform provides
//! its own versions of each.

pub mod catalog;
pub mod channel;
pub mod flows;
pub mod preferences;
pub mod render;
pub mod timezone;

pub use catalog::TomlCatalog;
pub use channel::{ConsoleChannel, RecordingChannel};
pub use flows::FlowHub;
pub use preferences::MemoryPreferences;
pub use render::CatalogRenderer;
pub use timezone::IanaTimezones;
