//! Error types for the agentic core library.
//!
//! Every failure that can happen while talking to the simulation service ends
//! up here. The view layer never lets one escape a run: it is folded into a
//! synthetic transcript entry using [`AgenticError::description`].
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E1001-E1099 | Config | Config file, environment and validation errors |
//! | E2001-E2099 | Request | Transport, HTTP status and response body errors |
//! | E3001-E3099 | View | Input validation and run lifecycle errors |
//! | E9001-E9099 | General | IO, serialization and internal errors |

use thiserror::Error;

/// The main error type for the agentic core library.
#[derive(Debug, Error)]
pub enum AgenticError {
    // ========================================================================
    // Configuration Errors (E1001-E1099)
    // ========================================================================
    /// Configuration file or environment could not be parsed
    #[error("[E1001] Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// A configuration value is present but unusable
    #[error("[E1002] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    /// Configuration directory could not be resolved
    #[error("[E1003] Configuration directory unavailable: {0}")]
    ConfigDirUnavailable(String),

    // ========================================================================
    // Request Errors (E2001-E2099)
    // ========================================================================
    /// The simulation service could not be reached
    #[error("[E2001] Simulation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The request failed in transit
    #[error("[E2002] Simulation request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete in time
    #[error("[E2003] Simulation request timed out: {0}")]
    RequestTimeout(String),

    /// The service answered with a non-success status
    #[error("[E2004] Simulation service returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not a valid simulation result
    #[error("[E2005] Failed to parse simulation response: {0}")]
    ResponseParseError(String),

    // ========================================================================
    // View Errors (E3001-E3099)
    // ========================================================================
    /// Round count input is not a whole number
    #[error("[E3001] Invalid round count: {0:?}")]
    InvalidRounds(String),

    /// A run was requested while another one is in flight
    #[error("[E3002] A simulation run is already in progress")]
    RunInProgress,

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    #[error("[E9001] IO error: {0}")]
    IoError(String),

    #[error("[E9002] Serialization error: {0}")]
    SerializationError(String),

    #[error("[E9003] Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AgenticError.
pub type AgenticResult<T> = Result<T, AgenticError>;

impl From<reqwest::Error> for AgenticError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AgenticError::RequestTimeout(err.to_string())
        } else if err.is_connect() {
            AgenticError::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            AgenticError::ResponseParseError(err.to_string())
        } else if let Some(status) = err.status() {
            AgenticError::HttpStatus {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            AgenticError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AgenticError {
    fn from(err: serde_json::Error) -> Self {
        AgenticError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for AgenticError {
    fn from(err: std::io::Error) -> Self {
        AgenticError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for AgenticError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::FileParse { uri, cause } => AgenticError::ConfigParseError(
                format!("Failed to parse {}: {}", uri.unwrap_or_default(), cause),
            ),
            config::ConfigError::Type {
                origin,
                unexpected,
                expected,
                key,
            } => AgenticError::InvalidConfigValue {
                key: key.unwrap_or_else(|| origin.map(|o| o.to_string()).unwrap_or_default()),
                message: format!("Expected {}, got {}", expected, unexpected),
            },
            _ => AgenticError::ConfigParseError(err.to_string()),
        }
    }
}

impl From<toml::ser::Error> for AgenticError {
    fn from(err: toml::ser::Error) -> Self {
        AgenticError::SerializationError(err.to_string())
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl AgenticError {
    /// Returns true if this error came from the round trip to the service.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            AgenticError::ServiceUnavailable(_)
                | AgenticError::RequestFailed(_)
                | AgenticError::RequestTimeout(_)
                | AgenticError::HttpStatus { .. }
                | AgenticError::ResponseParseError(_)
        )
    }

    /// Returns true if this error is related to configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AgenticError::ConfigParseError(_)
                | AgenticError::InvalidConfigValue { .. }
                | AgenticError::ConfigDirUnavailable(_)
        )
    }

    /// Bare failure text, without the error code or category prefix.
    ///
    /// This is what the transcript shows after `"Error: "`.
    pub fn description(&self) -> String {
        match self {
            AgenticError::ServiceUnavailable(msg)
            | AgenticError::RequestFailed(msg)
            | AgenticError::RequestTimeout(msg)
            | AgenticError::ResponseParseError(msg)
            | AgenticError::ConfigParseError(msg)
            | AgenticError::ConfigDirUnavailable(msg)
            | AgenticError::IoError(msg)
            | AgenticError::SerializationError(msg)
            | AgenticError::Internal(msg) => msg.clone(),
            AgenticError::HttpStatus { status, body } if body.is_empty() => {
                format!("HTTP {}", status)
            }
            AgenticError::HttpStatus { status, body } => format!("HTTP {}: {}", status, body),
            other => other.to_string(),
        }
    }

    /// Returns an error code suitable for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AgenticError::ConfigParseError(_) => "E1001",
            AgenticError::InvalidConfigValue { .. } => "E1002",
            AgenticError::ConfigDirUnavailable(_) => "E1003",
            AgenticError::ServiceUnavailable(_) => "E2001",
            AgenticError::RequestFailed(_) => "E2002",
            AgenticError::RequestTimeout(_) => "E2003",
            AgenticError::HttpStatus { .. } => "E2004",
            AgenticError::ResponseParseError(_) => "E2005",
            AgenticError::InvalidRounds(_) => "E3001",
            AgenticError::RunInProgress => "E3002",
            AgenticError::IoError(_) => "E9001",
            AgenticError::SerializationError(_) => "E9002",
            AgenticError::Internal(_) => "E9003",
        }
    }

    /// Returns a user-friendly suggestion for how to resolve this error.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            AgenticError::ServiceUnavailable(_) => {
                Some("Check that the simulation service is running and service.base_url is correct")
            }
            AgenticError::RequestTimeout(_) => {
                Some("Long simulations may need a larger service.timeout_secs")
            }
            AgenticError::InvalidRounds(_) => Some("Enter a whole number of rounds, 1 or more"),
            AgenticError::ConfigParseError(_) => {
                Some("Run 'agentic config init --force' to rewrite the configuration file")
            }
            _ => None,
        }
    }
}
