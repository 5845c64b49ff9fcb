//! Display-ready dropdown options

use crate::record::{Record, VirtualEntry, VirtualMarker};
use serde::{Deserialize, Serialize};

/// What an option stands for
///
/// A real record and a placeholder are distinct variants so a consumer can
/// never mistake one for the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionPayload<T> {
    /// Backend record
    Record(Record<T>),
    /// Not-yet-created object
    Virtual(VirtualMarker),
}

/// Selectable projection of a record or virtual entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption<T> {
    key: String,
    text: String,
    payload: OptionPayload<T>,
    is_default: bool,
}

impl<T> DropdownOption<T> {
    pub(crate) fn from_record(key: String, record: Record<T>, is_default: bool) -> Self {
        Self {
            key,
            text: record.name().to_string(),
            payload: OptionPayload::Record(record),
            is_default,
        }
    }

    pub(crate) fn from_virtual(key: String, entry: &VirtualEntry, is_default: bool) -> Self {
        Self {
            key,
            text: entry.text().to_string(),
            payload: OptionPayload::Virtual(entry.marker()),
            is_default,
        }
    }

    pub(crate) fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
    }

    /// Unique key (lowercase)
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

    /// Payload
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &OptionPayload<T> {
        &self.payload
    }

    /// Whether this option is preselected
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Whether this option is a placeholder
    #[inline]
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        matches!(self.payload, OptionPayload::Virtual(_))
    }

    /// Backend record, if any
    #[inline]
    #[must_use]
    pub fn record(&self) -> Option<&Record<T>> {
        match &self.payload {
            OptionPayload::Record(record) => Some(record),
            OptionPayload::Virtual(_) => None,
        }
    }
}

/// Ordered option list with unique keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionList<T> {
    options: Vec<DropdownOption<T>>,
}

impl<T> OptionList<T> {
    pub(crate) fn from_vec(options: Vec<DropdownOption<T>>) -> Self {
        Self { options }
    }

    /// Empty list
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    /// Number of options
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate in display order
    pub fn iter(&self) -> std::slice::Iter<'_, DropdownOption<T>> {
        self.options.iter()
    }

    /// Options as slice
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[DropdownOption<T>] {
        &self.options
    }

    /// Option keys in display order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(DropdownOption::key)
    }

    /// The preselected option
    #[must_use]
    pub fn default_option(&self) -> Option<&DropdownOption<T>> {
        self.options.iter().find(|o| o.is_default)
    }

    /// Look up option by key (case-insensitive)
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&DropdownOption<T>> {
        let key = key.to_lowercase();
        self.options.iter().find(|o| o.key == key)
    }

    /// Check if key is present (case-insensitive)
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Consume into vector
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<DropdownOption<T>> {
        self.options
    }
}

impl<T> Default for OptionList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> IntoIterator for OptionList<T> {
    type Item = DropdownOption<T>;
    type IntoIter = std::vec::IntoIter<DropdownOption<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OptionList<T> {
    type Item = &'a DropdownOption<T>;
    type IntoIter = std::slice::Iter<'a, DropdownOption<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
