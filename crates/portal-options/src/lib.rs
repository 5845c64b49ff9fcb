//! Portal Options
//!
//! Dropdown option reconciliation for portal forms.
//!
//! # Overview
//!
//! Forms that let a user pick an existing backend object or propose a new one
//! (a new hosting plan, a new resource group) render a single dropdown mixing
//! both. This crate provides:
//! - **Record**: a backend entity eligible for selection
//! - **VirtualEntry**: a placeholder for an object the user is about to create
//! - **reconcile**: merges both into an [`OptionList`] with unique keys and
//!   exactly one default option
//! - **FieldState**: dirty tracking and selected-key resolution for the
//!   dropdown bound to a form field
//!
//! # Example
//!
//! ```rust
//! use portal_options::{reconcile, InsertionPolicy, Record, VirtualEntry, VirtualKind};
//!
//! let groups = vec![Record::new("RG1", "Group One", ())];
//! let new_group = VirtualEntry::new(VirtualKind::NewResourceGroup, "NewGroup");
//!
//! let options = reconcile(&groups, Some(&new_group), InsertionPolicy::Append).unwrap();
//! assert_eq!(options.keys().collect::<Vec<_>>(), vec!["rg1", "newgroup"]);
//! assert_eq!(options.default_option().map(|o| o.key()), Some("rg1"));
//! ```

#![warn(missing_docs)]

pub mod field;
pub mod option;
pub mod reconcile;
pub mod record;
pub mod validation;

// Re-exports
pub use field::{is_loaded, FieldState, NULL_KEY};
pub use option::{DropdownOption, OptionList, OptionPayload};
pub use reconcile::{reconcile, InsertionPolicy};
pub use record::{Record, VirtualEntry, VirtualKind, VirtualMarker};
pub use validation::{validate_records, ValidationError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building dropdown options
    pub use crate::{
        reconcile, DropdownOption, FieldState, InsertionPolicy, OptionList, OptionPayload,
        Record, ValidationError, VirtualEntry, VirtualKind,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
