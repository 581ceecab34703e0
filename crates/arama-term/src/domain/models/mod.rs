mod action;
mod chat_backend;
mod dispatch;
mod event;
mod history;
mod message;
mod session;
mod slash_command;

pub use action::*;
pub use chat_backend::*;
pub use dispatch::*;
pub use event::*;
pub use history::*;
pub use message::*;
pub use session::*;
pub use slash_command::*;
