//! Key Vault reference details
//!
//! An app setting can reference a Key Vault secret. The details panel shows
//! the vault, secret, and version behind the reference, links each of them to
//! the Key Vault blades once the vault's resource id is known, and explains
//! the resolution status.
//!
//! # Workflow
//! 1. Build endpoint URIs from the reference
//! 2. Look up the vault's resource id in the app's subscription
//! 3. Produce detail rows; rows become links only if step 2 succeeded

use crate::blade::{BladeOpener, BladeRequest, KEY_VAULT_EXTENSION};
use crate::config::PortalConfig;
use crate::descriptor::ArmResourceDescriptor;
use crate::error::{BladeError, LookupError, PortalError};
use crate::site::Site;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Key Vault reference as reported for an app setting
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyVaultReference {
    /// Resolution status reported by the platform
    pub status: String,
    /// Vault name
    pub vault_name: String,
    /// Secret name
    pub secret_name: String,
    /// Secret version, empty for "latest"
    pub secret_version: String,
    /// Error details when unresolved
    pub details: String,
    /// Managed identity used to read the secret
    pub identity_type: String,
}

/// Resolution status
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyVaultReferenceStatus {
    /// Secret was read
    Resolved,
    /// Platform has not tried yet; visiting the site triggers resolution
    Initialized,
    /// Anything else (`SecretNotFound`, `AccessToKeyVaultDenied`, ...)
    Unresolved(String),
}

impl KeyVaultReferenceStatus {
    /// Classify a reported status (case-insensitive)
    #[must_use]
    pub fn parse(status: &str) -> Self {
        if status.eq_ignore_ascii_case("resolved") {
            Self::Resolved
        } else if status.eq_ignore_ascii_case("initialized") {
            Self::Initialized
        } else {
            Self::Unresolved(status.to_string())
        }
    }

    /// Whether error details apply
    #[inline]
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

/// Managed identity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    /// User-assigned identity
    User,
    /// System-assigned identity
    System,
}

impl IdentityKind {
    /// Classify a reported identity type; anything but user-assigned is system
    #[must_use]
    pub fn parse(identity_type: &str) -> Self {
        if identity_type.eq_ignore_ascii_case("userassigned") {
            Self::User
        } else {
            Self::System
        }
    }

    /// Label for the identity row
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User assigned managed identity",
            Self::System => "System assigned managed identity",
        }
    }
}

/// Endpoint URIs derived from a reference
///
/// Each URI nests inside the previous one and is absent when its own part or
/// any parent is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct KeyVaultUris {
    /// `https://{vault}.{suffix}/`
    pub vault: Option<String>,
    /// `{vault}secrets/{secret}/`
    pub secret: Option<String>,
    /// `{secret}{version}`
    pub version: Option<String>,
}

impl KeyVaultUris {
    /// Build URIs for a reference
    #[must_use]
    pub fn from_reference(reference: &KeyVaultReference, dns_suffix: &str) -> Self {
        let vault = non_empty(&reference.vault_name)
            .map(|vault| format!("https://{vault}.{dns_suffix}/"));
        let secret = vault.as_ref().and_then(|base| {
            non_empty(&reference.secret_name).map(|secret| format!("{base}secrets/{secret}/"))
        });
        let version = secret.as_ref().and_then(|base| {
            non_empty(&reference.secret_version).map(|version| format!("{base}{version}"))
        });
        Self {
            vault,
            secret,
            version,
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// Vault returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultResource {
    /// ARM id of the vault
    pub id: String,
}

/// Vault lookup by endpoint URI
#[async_trait::async_trait]
pub trait KeyVaultLookup: Send + Sync {
    /// Vaults in `subscription_id` whose endpoint is `vault_uri`
    async fn find_vaults(
        &self,
        subscription_id: &str,
        vault_uri: &str,
    ) -> Result<Vec<VaultResource>, LookupError>;
}

/// Linkable parts of a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyVaultLink {
    /// The vault
    Vault,
    /// All versions of the secret
    Secret,
    /// The referenced secret version
    SecretVersion,
}

/// What clicking a row does
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    /// Open a Key Vault blade
    OpenBlade(KeyVaultLink),
    /// Follow a URL
    Href {
        /// Target URL
        url: String,
        /// Localization key of the link text
        label_key: &'static str,
    },
}

/// One line of the details panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    /// Element id
    pub id: &'static str,
    /// Localization key of the label
    pub label_key: &'static str,
    /// Raw value
    pub value: String,
    /// Localization key of a message shown instead of `value`
    pub value_key: Option<&'static str>,
    /// Click action, if the row is a link
    pub action: Option<RowAction>,
}

/// Loaded details of one Key Vault reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyVaultReferenceView {
    reference: KeyVaultReference,
    uris: KeyVaultUris,
    vault_resource_id: Option<String>,
}

impl KeyVaultReferenceView {
    /// View without a resolved vault; nothing links anywhere
    #[must_use]
    pub fn unresolved(reference: KeyVaultReference, config: &PortalConfig) -> Self {
        let uris = KeyVaultUris::from_reference(&reference, &config.key_vault_dns_suffix);
        Self {
            reference,
            uris,
            vault_resource_id: None,
        }
    }

    /// Load details, resolving the vault in the app's subscription
    ///
    /// A failed lookup leaves the view unlinked rather than failing.
    ///
    /// # Errors
    /// `PortalError::Descriptor` if `resource_id` has no subscription.
    pub async fn load(
        lookup: &dyn KeyVaultLookup,
        resource_id: &str,
        reference: KeyVaultReference,
        config: &PortalConfig,
    ) -> Result<Self, PortalError> {
        let subscription = ArmResourceDescriptor::parse(resource_id)?
            .subscription()
            .to_string();
        let mut view = Self::unresolved(reference, config);

        let Some(vault_uri) = view.uris.vault.clone() else {
            return Ok(view);
        };
        match lookup.find_vaults(&subscription, &vault_uri).await {
            Ok(vaults) => {
                view.vault_resource_id = vaults.into_iter().next().map(|v| v.id);
                if view.vault_resource_id.is_none() {
                    tracing::debug!(vault_uri = %vault_uri, "no vault found for reference");
                }
            }
            Err(e) => {
                tracing::warn!(vault_uri = %vault_uri, error = %e, "key vault lookup failed");
            }
        }
        Ok(view)
    }

    /// Underlying reference
    #[inline]
    #[must_use]
    pub fn reference(&self) -> &KeyVaultReference {
        &self.reference
    }

    /// Endpoint URIs
    #[inline]
    #[must_use]
    pub fn uris(&self) -> &KeyVaultUris {
        &self.uris
    }

    /// Resolved vault resource id
    #[inline]
    #[must_use]
    pub fn vault_resource_id(&self) -> Option<&str> {
        self.vault_resource_id.as_deref()
    }

    /// Resolution status
    #[must_use]
    pub fn status(&self) -> KeyVaultReferenceStatus {
        KeyVaultReferenceStatus::parse(&self.reference.status)
    }

    /// Blade request for a link, if it can be followed
    #[must_use]
    pub fn blade_request(&self, link: KeyVaultLink) -> Option<BladeRequest> {
        let vault_id = self.vault_resource_id.as_deref()?;
        let (blade, inputs) = match link {
            KeyVaultLink::Vault => ("VaultBlade", json!({ "id": vault_id })),
            KeyVaultLink::Secret => (
                "ListSecretVersionsBlade",
                json!({ "id": self.uris.secret.as_deref()?, "vaultId": vault_id }),
            ),
            KeyVaultLink::SecretVersion => (
                "SecretVersionBlade",
                json!({ "id": self.uris.version.as_deref()?, "vaultId": vault_id }),
            ),
        };
        Some(BladeRequest::new(blade, inputs).in_extension(KEY_VAULT_EXTENSION))
    }

    /// Follow a link
    ///
    /// Returns `false` without opening anything when the link is inactive.
    pub async fn open(
        &self,
        opener: &dyn BladeOpener,
        link: KeyVaultLink,
    ) -> Result<bool, BladeError> {
        let Some(request) = self.blade_request(link) else {
            return Ok(false);
        };
        opener.open_blade(request).await?;
        Ok(true)
    }

    /// Rows of the details panel in display order
    #[must_use]
    pub fn detail_rows(&self, site: Option<&Site>) -> Vec<DetailRow> {
        let reference = &self.reference;
        let mut rows = Vec::with_capacity(6);

        let linked = |link: KeyVaultLink| {
            self.blade_request(link)
                .map(|_| RowAction::OpenBlade(link))
        };

        if !reference.vault_name.is_empty() {
            rows.push(DetailRow {
                id: "key-vault-name",
                label_key: "keyVaultName",
                value: reference.vault_name.clone(),
                value_key: None,
                action: linked(KeyVaultLink::Vault),
            });
        }
        if !reference.secret_name.is_empty() {
            rows.push(DetailRow {
                id: "key-secret-name",
                label_key: "keyVaultSecretName",
                value: reference.secret_name.clone(),
                value_key: None,
                action: linked(KeyVaultLink::Secret),
            });
        }
        if !reference.secret_version.is_empty() {
            rows.push(DetailRow {
                id: "key-secret-version",
                label_key: "keyVaultSecretVersion",
                value: reference.secret_version.clone(),
                value_key: None,
                action: linked(KeyVaultLink::SecretVersion),
            });
        }
        if !reference.identity_type.is_empty() {
            rows.push(DetailRow {
                id: "key-identity",
                label_key: "identity",
                value: IdentityKind::parse(&reference.identity_type)
                    .label()
                    .to_string(),
                value_key: None,
                action: None,
            });
        }

        let status = self.status();
        let scm_link = match status {
            KeyVaultReferenceStatus::Initialized => site.and_then(Site::scm_url),
            _ => None,
        };
        let initialized_on_site =
            matches!(status, KeyVaultReferenceStatus::Initialized) && site.is_some();
        rows.push(DetailRow {
            id: "key-status",
            label_key: "status",
            value: reference.status.clone(),
            value_key: initialized_on_site.then_some("keyVaultReferenceInitializedStatus"),
            action: scm_link.map(|url| RowAction::Href {
                url,
                label_key: "clickHereToAccessSite",
            }),
        });

        if status.is_unresolved() {
            rows.push(DetailRow {
                id: "key-error-details",
                label_key: "errorDetails",
                value: reference.details.clone(),
                value_key: None,
                action: None,
            });
        }

        rows
    }
}
