//! Dropdown field state
//!
//! Tracks the value of a form field rendered as a dropdown: whether it moved
//! away from its initial value, and which option key to show as selected.

use crate::option::{DropdownOption, OptionList};
use serde::{Deserialize, Serialize};

/// Selected key shown when the field has no value
pub const NULL_KEY: &str = "null";

/// Form field bound to a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldState {
    name: String,
    initial: Option<String>,
    value: Option<String>,
    error: Option<String>,
    #[serde(default)]
    width: Option<String>,
}

impl FieldState {
    /// Create field whose value starts at `initial`
    #[must_use]
    pub fn new(name: impl Into<String>, initial: Option<String>) -> Self {
        Self {
            name: name.into(),
            value: initial.clone(),
            initial,
            error: None,
            width: None,
        }
    }

    /// With an explicit CSS width
    #[must_use]
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// CSS width, or `fallback` when the field sets none
    #[inline]
    #[must_use]
    pub fn width_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.width.as_deref().unwrap_or(fallback)
    }

    /// Field name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Validation message, if any
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Attach validation message
    #[inline]
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Whether the value differs from the initial value
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.initial != self.value
    }

    /// Key to mark as selected in the dropdown
    #[inline]
    #[must_use]
    pub fn selected_key(&self) -> &str {
        self.value.as_deref().unwrap_or(NULL_KEY)
    }

    /// Take the key of the chosen option as the new value
    pub fn select<T>(&mut self, option: &DropdownOption<T>) {
        tracing::debug!(field = %self.name, key = option.key(), "dropdown selection changed");
        self.value = Some(option.key().to_string());
    }

    /// Restore the initial value
    pub fn reset(&mut self) {
        self.value = self.initial.clone();
        self.error = None;
    }
}

/// Whether the dropdown has data to show
///
/// Callers render a loading placeholder until this is true.
#[inline]
#[must_use]
pub fn is_loaded<T>(options: &OptionList<T>) -> bool {
    !options.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::{reconcile, InsertionPolicy};
    use crate::record::Record;

    #[test]
    fn unset_field_selects_null_key() {
        let field = FieldState::new("plan", None);
        assert_eq!(field.selected_key(), NULL_KEY);
        assert!(!field.is_dirty());
    }

    #[test]
    fn selection_marks_dirty_and_reset_clears() {
        let records = vec![Record::new("A", "a", ()), Record::new("B", "b", ())];
        let options = reconcile(&records, None, InsertionPolicy::Append).unwrap();

        let mut field = FieldState::new("plan", Some("a".to_string()));
        field.select(&options.as_slice()[1]);
        assert_eq!(field.selected_key(), "b");
        assert!(field.is_dirty());

        field.set_error(Some("required".to_string()));
        field.reset();
        assert_eq!(field.value(), Some("a"));
        assert!(field.error().is_none());
        assert!(!field.is_dirty());
    }

    #[test]
    fn width_falls_back_when_unset() {
        let field = FieldState::new("plan", None);
        assert_eq!(field.width_or("535px"), "535px");
        assert_eq!(field.with_width("300px").width_or("535px"), "300px");
    }

    #[test]
    fn reselecting_initial_is_clean() {
        let records = vec![Record::new("A", "a", ())];
        let options = reconcile(&records, None, InsertionPolicy::Append).unwrap();

        let mut field = FieldState::new("plan", Some("a".to_string()));
        field.select(&options.as_slice()[0]);
        assert!(!field.is_dirty());
    }

    #[test]
    fn loaded_once_options_exist() {
        let empty: Vec<Record<()>> = vec![];
        let none = reconcile(&empty, None, InsertionPolicy::Append).unwrap();
        assert!(!is_loaded(&none));

        let some = reconcile(&[Record::new("x", "x", ())], None, InsertionPolicy::Append).unwrap();
        assert!(is_loaded(&some));
    }
}
