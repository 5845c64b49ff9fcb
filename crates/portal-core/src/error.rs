//! Error types for Portal Core
//!
//! Provides error handling for:
//! - Record validation during option reconciliation
//! - Malformed ARM resource ids
//! - Key Vault lookup failures
//! - Blade navigation failures
//! - Configuration loading

use portal_options::ValidationError;

/// Main portal error type
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Record could not be turned into an option
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),

    /// Resource id could not be parsed
    #[error("invalid resource id: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Key Vault lookup failed
    #[error("key vault lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Blade navigation failed
    #[error("blade error: {0}")]
    Blade(#[from] BladeError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// ARM resource id parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// Id does not start with `/subscriptions/{id}`
    #[error("'{resource_id}' is not an ARM resource id: {reason}")]
    Malformed {
        /// Offending id
        resource_id: String,
        /// What was wrong
        reason: String,
    },

    /// Id lacks a segment the caller needs
    #[error("'{resource_id}' has no {segment} segment")]
    MissingSegment {
        /// Offending id
        resource_id: String,
        /// Segment name
        segment: &'static str,
    },
}

/// Key Vault lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Backend refused the request
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Backend could not be reached
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Blade navigation errors
#[derive(Debug, thiserror::Error)]
pub enum BladeError {
    /// Host portal refused to open the blade
    #[error("blade '{blade}' could not be opened: {reason}")]
    OpenFailed {
        /// Blade name
        blade: String,
        /// Host-provided reason
        reason: String,
    },

    /// Blade returned data in an unexpected shape
    #[error("unexpected blade response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::PortalConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value is syntactically valid but unusable
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// What was wrong
        reason: String,
    },
}

impl PortalError {
    /// Whether retrying the same call could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Lookup(LookupError::Unavailable(_)))
    }
}
