//! Application-level state shared by every command.

mod config;

pub use config::Config;
