//! Infrastructure layer providing external integrations.
//!
//! This module contains the chat backend implementations.

pub mod clients;
