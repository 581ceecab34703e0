//! Application layer orchestrating the terminal interface.
//!
//! This module handles command-line parsing, rendering, and the main UI loop.
//! It coordinates between the domain logic and infrastructure components.

pub mod cli;
pub mod render;
pub mod ui;
