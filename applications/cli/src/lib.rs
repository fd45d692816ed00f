//! Cadenza CLI
//!
//! Command-line front end over the catalog store, playlist service and
//! playback controller. The binary in `main.rs` only parses arguments, loads
//! configuration and installs logging; everything else lives here so it can
//! be driven from tests.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use commands::run;
pub use config::AppConfig;
