//! Blade navigation requests
//!
//! The host portal owns blade navigation. This module only composes the
//! requests and reads the results; [`BladeOpener`] is the seam to the host.

use crate::error::BladeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extension hosting the Key Vault blades
pub const KEY_VAULT_EXTENSION: &str = "Microsoft_Azure_KeyVault";

/// Request to open a blade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BladeRequest {
    /// Blade name
    pub detail_blade: String,
    /// Inputs passed to the blade
    pub detail_blade_inputs: Value,
    /// Owning extension, when not the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Open next to the current blade instead of replacing it
    #[serde(default)]
    pub open_as_context_blade: bool,
}

impl BladeRequest {
    /// Create request for a blade in the current extension
    #[must_use]
    pub fn new(detail_blade: impl Into<String>, inputs: Value) -> Self {
        Self {
            detail_blade: detail_blade.into(),
            detail_blade_inputs: inputs,
            extension: None,
            open_as_context_blade: false,
        }
    }

    /// Target another extension
    #[inline]
    #[must_use]
    pub fn in_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Open as context blade
    #[inline]
    #[must_use]
    pub fn as_context_blade(mut self) -> Self {
        self.open_as_context_blade = true;
        self
    }
}

/// Why a blade closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BladeCloseReason {
    /// Blade closed itself after completing, carrying a result
    ChildClosedSelf,
    /// User navigated away
    UserNavigation,
}

/// Outcome of an opened blade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeResult {
    /// Close reason
    pub reason: BladeCloseReason,
    /// Data returned by the blade
    #[serde(default)]
    pub data: Option<Value>,
}

impl BladeResult {
    /// Result of a blade that completed with data
    #[must_use]
    pub fn completed(data: Value) -> Self {
        Self {
            reason: BladeCloseReason::ChildClosedSelf,
            data: Some(data),
        }
    }

    /// Result of a blade the user dismissed
    #[must_use]
    pub fn dismissed() -> Self {
        Self {
            reason: BladeCloseReason::UserNavigation,
            data: None,
        }
    }

    /// Whether the blade completed on its own
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.reason == BladeCloseReason::ChildClosedSelf
    }
}

/// Host portal navigation
///
/// Implemented by the embedding shell.
#[async_trait::async_trait]
pub trait BladeOpener: Send + Sync {
    /// Open a blade and wait for it to close
    async fn open_blade(&self, request: BladeRequest) -> Result<BladeResult, BladeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_in_portal_shape() {
        let request = BladeRequest::new("VaultBlade", json!({ "id": "/vault" }))
            .in_extension(KEY_VAULT_EXTENSION);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "detailBlade": "VaultBlade",
                "detailBladeInputs": { "id": "/vault" },
                "extension": "Microsoft_Azure_KeyVault",
                "openAsContextBlade": false,
            })
        );
    }

    #[test]
    fn result_parses_close_reason() {
        let result: BladeResult =
            serde_json::from_value(json!({ "reason": "childClosedSelf", "data": { "x": 1 } }))
                .unwrap();
        assert!(result.is_completed());

        let result: BladeResult =
            serde_json::from_value(json!({ "reason": "userNavigation" })).unwrap();
        assert!(!result.is_completed());
        assert!(result.data.is_none());
    }
}
