//! Records and virtual entries
//!
//! Provides [`Record`] for backend entities and [`VirtualEntry`] for objects
//! the user has proposed but not yet created.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Backend entity eligible for selection
///
/// Identifiers compare case-insensitively; [`Record::key`] gives the
/// normalized form used as the option key.
///
/// # Example
/// ```
/// use portal_options::Record;
///
/// let record = Record::new("/subscriptions/S1/resourceGroups/RG1", "RG1", ());
/// assert_eq!(record.key(), "/subscriptions/s1/resourcegroups/rg1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record<T> {
    /// Backend identifier (ARM id for portal resources)
    id: String,

    /// Display name
    name: String,

    /// Associated payload handed back to the caller on selection
    data: T,
}

impl<T> Record<T> {
    /// Create new record
    ///
    /// Identifiers are not checked here; [`crate::reconcile`] rejects records
    /// with a blank identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data,
        }
    }

    /// Identifier as supplied by the backend
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Payload
    #[inline]
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume into payload
    #[inline]
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Case-normalized option key
    #[inline]
    #[must_use]
    pub fn key(&self) -> String {
        self.id.to_lowercase()
    }

    /// Whether the identifier is missing
    #[inline]
    #[must_use]
    pub fn has_blank_id(&self) -> bool {
        self.id.trim().is_empty()
    }
}

/// Kind of object a virtual entry stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VirtualKind {
    /// App Service plan that will be created with the app
    NewPlan,
    /// Resource group that will be created with the plan
    NewResourceGroup,
}

impl Display for VirtualKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewPlan => f.write_str("new-plan"),
            Self::NewResourceGroup => f.write_str("new-resource-group"),
        }
    }
}

/// Placeholder for a user-initiated, not-yet-persisted object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualEntry {
    kind: VirtualKind,
    name: String,
    key: String,
    text: String,
}

impl VirtualEntry {
    /// Create virtual entry for a proposed name
    ///
    /// Key is the lowercased name, display text is the name itself.
    #[must_use]
    pub fn new(kind: VirtualKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            key: name.to_lowercase(),
            text: name.clone(),
            name,
        }
    }

    /// Override display text (e.g. `"(new) plan-a"`)
    #[inline]
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Override option key
    #[inline]
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into().to_lowercase();
        self
    }

    /// Kind tag
    #[inline]
    #[must_use]
    pub fn kind(&self) -> VirtualKind {
        self.kind
    }

    /// Proposed name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Option key (lowercase)
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Payload carried by the option built from this entry
    #[inline]
    #[must_use]
    pub fn marker(&self) -> VirtualMarker {
        VirtualMarker {
            kind: self.kind,
            name: self.name.clone(),
        }
    }
}

/// Payload of an option that does not correspond to a backend record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualMarker {
    /// What the user is creating
    pub kind: VirtualKind,
    /// Proposed name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_is_lowercase_id() {
        let record = Record::new("RG-One", "RG One", 7u32);
        assert_eq!(record.key(), "rg-one");
        assert_eq!(record.name(), "RG One");
        assert_eq!(*record.data(), 7);
    }

    #[test]
    fn blank_id_detection() {
        assert!(Record::new("", "x", ()).has_blank_id());
        assert!(Record::new("  ", "x", ()).has_blank_id());
        assert!(!Record::new("id", "", ()).has_blank_id());
    }

    #[test]
    fn virtual_entry_defaults() {
        let entry = VirtualEntry::new(VirtualKind::NewPlan, "PlanA");
        assert_eq!(entry.key(), "plana");
        assert_eq!(entry.text(), "PlanA");
        assert_eq!(entry.marker().name, "PlanA");
        assert_eq!(entry.marker().kind, VirtualKind::NewPlan);
    }

    #[test]
    fn virtual_entry_overrides() {
        let entry = VirtualEntry::new(VirtualKind::NewPlan, "PlanA")
            .with_text("(new) PlanA")
            .with_key("Custom-Key");
        assert_eq!(entry.key(), "custom-key");
        assert_eq!(entry.text(), "(new) PlanA");
        assert_eq!(entry.name(), "PlanA");
    }

    #[test]
    fn virtual_kind_display() {
        assert_eq!(VirtualKind::NewResourceGroup.to_string(), "new-resource-group");
    }
}
