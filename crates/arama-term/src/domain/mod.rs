//! Core domain logic for the chat client.
//!
//! This module contains the conversation model and the state machine that drives
//! it, independent of the terminal or the HTTP transport.

pub mod models;
pub mod services;
