pub mod data;
pub mod io;

pub use data::{path_display, Config, SessionChannel, SessionConfig};
pub use io::ConfigError;
