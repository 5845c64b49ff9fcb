//! Portal Core
//!
//! Derived form state for the app configuration portal pages.
//!
//! # Core Concepts
//!
//! - [`ServerFarmInfo`]: destination plan form values on the change-plan page,
//!   with the plan and resource group dropdowns built by
//!   [`portal_options::reconcile`]
//! - [`KeyVaultReferenceView`]: details panel of an app setting that points
//!   at a Key Vault secret
//! - [`BladeOpener`] / [`KeyVaultLookup`]: seams to the host portal and the
//!   vault lookup service
//! - [`TelemetryService`]: event tracking shim
//! - [`PortalConfig`]: TOML-backed settings
//!
//! # Example
//!
//! ```rust
//! use portal_core::{plan::*, PortalConfig};
//!
//! let info = ServerFarmInfo {
//!     new_plan: NewPlanInfo {
//!         name: "plan-b".into(),
//!         sku_code: "Y1".into(),
//!         tier: "Dynamic".into(),
//!         new_resource_group_name: "rg-b".into(),
//!         resource_group: ResourceGroupChoice::New,
//!     },
//!     choice: PlanChoice::New,
//! };
//!
//! let config = PortalConfig::default();
//! let options = info.server_farm_options(&[], &config).unwrap();
//! assert_eq!(options.as_slice()[0].text(), "(new) plan-b");
//! assert_eq!(info.selected_resource_group_label(&config).unwrap(), "(new) rg-b");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod blade;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod key_vault;
pub mod plan;
pub mod site;
pub mod telemetry;

// Re-exports
pub use blade::{BladeCloseReason, BladeOpener, BladeRequest, BladeResult};
pub use config::PortalConfig;
pub use descriptor::ArmResourceDescriptor;
pub use error::{BladeError, ConfigError, DescriptorError, LookupError, PortalError};
pub use key_vault::{
    DetailRow, KeyVaultLink, KeyVaultLookup, KeyVaultReference, KeyVaultReferenceStatus,
    KeyVaultReferenceView, KeyVaultUris, RowAction, VaultResource,
};
pub use plan::{
    NewPlanInfo, PlanChoice, ResourceGroup, ResourceGroupChoice, ServerFarm, ServerFarmInfo,
};
pub use site::Site;
pub use telemetry::{TelemetryService, TelemetrySink, TracingSink};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
