pub mod http;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatBackendBox;

pub struct ChatBackendManager {}

impl ChatBackendManager {
    /// Builds the backend described by the loaded configuration.
    pub fn from_config() -> Result<ChatBackendBox> {
        let url = Config::get(ConfigKey::BackendUrl);
        if url.is_empty() {
            bail!(format!("No backend configured, set '{}'", ConfigKey::BackendUrl));
        }

        let timeout = Config::get_u64(ConfigKey::RequestTimeout)?;
        if timeout == 0 {
            bail!(format!("'{}' must be at least 1 second", ConfigKey::RequestTimeout));
        }

        return Ok(Box::new(http::HttpBackend::new(
            &url,
            Duration::from_secs(timeout),
        )));
    }
}
