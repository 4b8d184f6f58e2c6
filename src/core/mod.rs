pub mod config;
pub mod context;
pub mod message;
pub mod preference;
