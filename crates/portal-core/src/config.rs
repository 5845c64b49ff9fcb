//! Portal configuration
//!
//! Settings are read from TOML; every field has a default so an empty file
//! is a valid configuration.

use crate::error::ConfigError;
use portal_options::FieldState;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder replaced by the proposed name in [`PortalConfig::new_entry_format`]
pub const NAME_PLACEHOLDER: &str = "{0}";

/// Portal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Value of the `sitename` property on every telemetry event
    pub site_name: String,
    /// DNS suffix of Key Vault endpoints
    pub key_vault_dns_suffix: String,
    /// Display format for not-yet-created entries
    pub new_entry_format: String,
    /// Width of dropdown fields that do not set their own
    pub dropdown_width: String,
    /// Offer the Consumption/Premium plan type choice when changing plans
    pub enable_dynamic_to_premium: bool,
}

impl PortalConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With telemetry site name
    #[inline]
    #[must_use]
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    /// With Key Vault DNS suffix
    #[inline]
    #[must_use]
    pub fn with_key_vault_dns_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.key_vault_dns_suffix = suffix.into();
        self
    }

    /// With display format for new entries
    #[inline]
    #[must_use]
    pub fn with_new_entry_format(mut self, format: impl Into<String>) -> Self {
        self.new_entry_format = format.into();
        self
    }

    /// With plan type choice enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_dynamic_to_premium(mut self, enabled: bool) -> Self {
        self.enable_dynamic_to_premium = enabled;
        self
    }

    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded portal config");
        Ok(config)
    }

    /// Check field values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.new_entry_format.contains(NAME_PLACEHOLDER) {
            return Err(ConfigError::InvalidValue {
                field: "new_entry_format",
                reason: format!("must contain {NAME_PLACEHOLDER}"),
            });
        }
        if self.key_vault_dns_suffix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "key_vault_dns_suffix",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// CSS width to render a dropdown field with
    #[must_use]
    pub fn field_width<'a>(&'a self, field: &'a FieldState) -> &'a str {
        field.width_or(&self.dropdown_width)
    }

    /// Display text for a not-yet-created entry
    #[must_use]
    pub fn format_new(&self, name: &str) -> String {
        self.new_entry_format.replace(NAME_PLACEHOLDER, name)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            site_name: "azurefunctions".to_string(),
            key_vault_dns_suffix: "vault.azure.net".to_string(),
            new_entry_format: "(new) {0}".to_string(),
            dropdown_width: "535px".to_string(),
            enable_dynamic_to_premium: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = PortalConfig::from_toml_str("").unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let config = PortalConfig::from_toml_str(
            "site_name = \"portal\"\nenable_dynamic_to_premium = true\n",
        )
        .unwrap();
        assert_eq!(config.site_name, "portal");
        assert!(config.enable_dynamic_to_premium);
        assert_eq!(config.key_vault_dns_suffix, "vault.azure.net");
    }

    #[test]
    fn rejects_format_without_placeholder() {
        let result = PortalConfig::from_toml_str("new_entry_format = \"new\"");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "new_entry_format",
                ..
            })
        ));
    }

    #[test]
    fn field_width_defaults_from_config() {
        let config = PortalConfig::from_toml_str("dropdown_width = \"400px\"").unwrap();
        let field = FieldState::new("plan", None);
        assert_eq!(PortalConfig::default().field_width(&field), "535px");
        assert_eq!(config.field_width(&field), "400px");

        let field = field.with_width("250px");
        assert_eq!(config.field_width(&field), "250px");
    }

    #[test]
    fn rejects_bad_toml() {
        let result = PortalConfig::from_toml_str("site_name = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn format_new_substitutes_name() {
        let config = PortalConfig::new();
        assert_eq!(config.format_new("plan-a"), "(new) plan-a");

        let config = config.with_new_entry_format("{0} (to be created)");
        assert_eq!(config.format_new("rg"), "rg (to be created)");
    }
}
