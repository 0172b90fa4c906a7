//! Controller configuration
//!
//! The page passes a plain object to the WASM constructor; every field is
//! optional and falls back to the values the tool is deployed with.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::file::MAX_FILE_SIZE;
use crate::messages::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerConfig {
    /// Prefix for every backend path; empty means same origin
    pub base_url: String,
    pub max_file_size: u64,
    pub progress_interval_ms: u32,
    pub cleanup_delay_ms: u32,
    pub notification_ms: u32,
    pub preview_rows: usize,
    pub truncate_len: usize,
    pub default_year: String,
    pub locale: Locale,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_file_size: MAX_FILE_SIZE,
            progress_interval_ms: 2000,
            cleanup_delay_ms: 2000,
            notification_ms: 3000,
            preview_rows: 5,
            truncate_len: 50,
            default_year: "2021-2022".to_string(),
            locale: Locale::Tr,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size == 0 {
            return Err(ConfigError::Zero("maxFileSize"));
        }
        if self.progress_interval_ms == 0 {
            return Err(ConfigError::Zero("progressIntervalMs"));
        }
        if self.notification_ms == 0 {
            return Err(ConfigError::Zero("notificationMs"));
        }
        if self.truncate_len == 0 {
            return Err(ConfigError::Zero("truncateLen"));
        }
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms.into())
    }

    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.cleanup_delay_ms.into())
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms.into())
    }
}
