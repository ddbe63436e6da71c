//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::event::{event_meta_for_group, EventMetadata, EVENT_META_GROUP};
use crate::log_buffer::{LogBuffer, DEFAULT_LOG_BUFFER_SIZE};
use crate::telemetry::LogFormat;

/// Settings the embedding controller may override.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Group event metadata keys are namespaced under.
    pub event_group: String,
    /// Number of action log lines attached to failure events.
    pub log_buffer_size: usize,
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_group: EVENT_META_GROUP.to_string(),
            log_buffer_size: DEFAULT_LOG_BUFFER_SIZE,
            log_format: LogFormat::Text,
        }
    }
}

impl EngineConfig {
    pub fn with_event_group(mut self, group: impl Into<String>) -> Self {
        self.event_group = group.into();
        self
    }

    pub fn with_log_buffer_size(mut self, size: usize) -> Self {
        self.log_buffer_size = size;
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Create from environment variables
    ///
    /// Reads:
    /// - RELWATCH_EVENT_GROUP (optional, default: "helm.toolkit.fluxcd.io")
    /// - RELWATCH_LOG_BUFFER_SIZE (optional, default: 5)
    /// - RELWATCH_LOG_FORMAT (optional, "text" or "json", default: "text")
    pub fn from_env() -> std::result::Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> std::result::Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(group) = lookup("RELWATCH_EVENT_GROUP").filter(|g| !g.is_empty()) {
            config.event_group = group;
        }
        if let Some(size) = lookup("RELWATCH_LOG_BUFFER_SIZE") {
            config.log_buffer_size = size
                .trim()
                .parse()
                .map_err(|e| format!("RELWATCH_LOG_BUFFER_SIZE is not a valid size: {e}"))?;
        }
        if let Some(format) = lookup("RELWATCH_LOG_FORMAT") {
            config.log_format = format.parse()?;
        }
        Ok(config)
    }

    pub fn new_log_buffer(&self) -> LogBuffer {
        LogBuffer::new(self.log_buffer_size)
    }

    pub fn event_meta(&self, revision: &str, token: &str) -> Option<EventMetadata> {
        event_meta_for_group(&self.event_group, revision, token)
    }
}
