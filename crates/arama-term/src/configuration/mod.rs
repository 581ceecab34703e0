//! Configuration management for the terminal client.
//!
//! Values are layered from built-in defaults, an optional TOML file, and the
//! command line (which also reads environment variables).

mod config;

pub use config::*;
