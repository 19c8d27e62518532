// crates/agenticops-core/src/error.rs
// Standardized error types for the console state engine

use thiserror::Error;

/// Main error type for the console core
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),

    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("invalid {kind} payload: {source}")]
    InvalidPayload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("card already on canvas: {0}")]
    DuplicateCard(String),

    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error("channel not connected")]
    NotConnected,

    #[error("a response is already in progress")]
    Busy,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Result using ConsoleError
pub type Result<T> = std::result::Result<T, ConsoleError>;

impl ConsoleError {
    /// Frame-level problems are dropped silently; everything else is worth a warning
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ConsoleError::MalformedFrame(_)
                | ConsoleError::UnknownEventKind(_)
                | ConsoleError::InvalidPayload { .. }
        )
    }
}

impl From<ConsoleError> for String {
    fn from(err: ConsoleError) -> Self {
        err.to_string()
    }
}

/// Failure of the auxiliary entity-stats lookup; stored in overlay state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("No network ID")]
    MissingEntityId,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Display formatting
    // ============================================================================

    #[test]
    fn test_unknown_kind_display() {
        let err = ConsoleError::UnknownEventKind("cards_ready".into());
        assert_eq!(err.to_string(), "unknown event kind: cards_ready");
    }

    #[test]
    fn test_duplicate_card_display() {
        let err = ConsoleError::DuplicateCard("c1".into());
        assert_eq!(err.to_string(), "card already on canvas: c1");
    }

    #[test]
    fn test_not_connected_display() {
        assert_eq!(ConsoleError::NotConnected.to_string(), "channel not connected");
    }

    #[test]
    fn test_invalid_payload_display() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ConsoleError::InvalidPayload {
            kind: "tool_call",
            source,
        };
        assert!(err.to_string().starts_with("invalid tool_call payload:"));
    }

    #[test]
    fn test_stats_error_display() {
        assert_eq!(StatsError::MissingEntityId.to_string(), "No network ID");
        assert_eq!(StatsError::Status(502).to_string(), "HTTP 502");
    }

    // ============================================================================
    // From conversions
    // ============================================================================

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ConsoleError = json_err.into();
        assert!(matches!(err, ConsoleError::MalformedFrame(_)));
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: ConsoleError = toml_err.into();
        assert!(matches!(err, ConsoleError::Toml(_)));
        assert!(!err.is_malformed_input());
    }

    #[test]
    fn test_into_string() {
        let s: String = ConsoleError::Config("bad".into()).into();
        assert_eq!(s, "configuration error: bad");
    }
}
