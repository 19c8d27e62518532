// crates/agenticops-core/src/config.rs
// Console configuration loaded from an embedded console.toml

use crate::error::{ConsoleError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Top-level config structure; every section is optional
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    pub channel: ChannelConfig,
    pub canvas: CanvasConfig,
    pub conversation: ConversationConfig,
    pub popup: PopupConfig,
    pub api: ApiConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            channel: ChannelConfig::default(),
            canvas: CanvasConfig::default(),
            conversation: ConversationConfig::default(),
            popup: PopupConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

/// Streaming channel section
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChannelConfig {
    /// Path of the chat socket on the serving host
    pub ws_path: String,
    /// Fixed backoff between reconnect attempts
    pub reconnect_delay_ms: u64,
    pub session_id: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            ws_path: "/ws/chat".to_string(),
            reconnect_delay_ms: 3000,
            session_id: "default".to_string(),
        }
    }
}

/// Grid placement for new cards
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    pub columns: u32,
    pub card_width: f64,
    pub card_height: f64,
    pub gap_x: f64,
    pub gap_y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    /// Rendered width of a freshly placed node
    pub node_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            card_width: 440.0,
            card_height: 350.0,
            gap_x: 40.0,
            gap_y: 40.0,
            origin_x: 50.0,
            origin_y: 50.0,
            node_width: 420.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConversationConfig {
    /// Bound on table payloads waiting for an assistant message
    pub max_pending_tables: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_pending_tables: 16,
        }
    }
}

/// Hover detail overlay geometry
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PopupConfig {
    pub width: f64,
    pub estimated_height: f64,
    pub gap: f64,
    pub margin: f64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            estimated_height: 340.0,
            gap: 8.0,
            margin: 16.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: "/api".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ConsoleConfig = toml::from_str(contents)?;
        config.validate()?;
        log::debug!("Loaded console config (log_level={})", config.log_level);
        Ok(config)
    }

    /// Like [`from_toml_str`](Self::from_toml_str) but never fails
    pub fn load_or_default(contents: &str) -> Self {
        match Self::from_toml_str(contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid console config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas.columns == 0 {
            return Err(ConsoleError::Config("canvas.columns must be at least 1".into()));
        }
        if self.channel.reconnect_delay_ms == 0 {
            return Err(ConsoleError::Config(
                "channel.reconnect_delay_ms must be positive".into(),
            ));
        }
        if self.channel.session_id.trim().is_empty() {
            return Err(ConsoleError::Config("channel.session_id is empty".into()));
        }
        if self.conversation.max_pending_tables == 0 {
            return Err(ConsoleError::Config(
                "conversation.max_pending_tables must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.channel.reconnect_delay_ms)
    }

    /// Parsed log level; unknown names fall back to `Debug`
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Debug)
    }
}
