use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Message;

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn health_check(&self) -> Result<()>;
    async fn send_message(&self, session_id: &str, text: &str) -> Result<Message>;
}

pub type ChatBackendBox = Box<dyn ChatBackend>;
