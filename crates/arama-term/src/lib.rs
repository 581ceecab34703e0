//! Terminal client for the arama search assistant.
//!
//! The crate keeps one conversation with a remote assistant: it generates the
//! session identity, owns the ordered message history, and runs every user
//! message through a single-flight dispatcher that reconciles the backend's reply
//! (or a local fallback) back into the history. The terminal UI is a thin adapter
//! that renders history snapshots and forwards submit/clear intents.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;
pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    Action, ChatBackend, ChatBackendBox, Event, History, Message, Role, Session, Source,
};
pub use domain::services::{ActionsService, Dispatcher};
pub use infrastructure::clients::ChatBackendManager;
