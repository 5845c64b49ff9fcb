//! Option reconciliation
//!
//! Merges a fetched record collection with an optional virtual entry into an
//! [`OptionList`]. The result is recomputed whenever the records or the
//! proposed name change; it is never mutated in place.

use crate::option::{DropdownOption, OptionList};
use crate::record::{Record, VirtualEntry};
use crate::validation::{validate_records, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where a virtual entry goes relative to the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertionPolicy {
    /// Always add the virtual entry after the records
    #[default]
    Append,
    /// Only inject the virtual entry when there are no records
    PrependIfEmpty,
    /// Put the virtual entry first and preselect it
    Prepend,
}

/// Build the option list for a dropdown
///
/// # Workflow
/// 1. Map records to options keyed by lowercased id; the first is default
/// 2. Drop later records whose key was already seen
/// 3. Place the virtual entry according to `policy`, unless its key
///    collides with a record
///
/// Exactly one option is default whenever the list is non-empty.
///
/// # Errors
/// `ValidationError::MissingIdentifier` if any record has a blank id.
pub fn reconcile<T: Clone>(
    records: &[Record<T>],
    virtual_entry: Option<&VirtualEntry>,
    policy: InsertionPolicy,
) -> Result<OptionList<T>, ValidationError> {
    validate_records(records)?;

    let mut seen: HashSet<String> = HashSet::with_capacity(records.len() + 1);
    let mut options: Vec<DropdownOption<T>> = Vec::with_capacity(records.len() + 1);

    for record in records {
        let key = record.key();
        if !seen.insert(key.clone()) {
            tracing::debug!(key = %key, "discarding duplicate record");
            continue;
        }
        let is_default = options.is_empty();
        options.push(DropdownOption::from_record(key, record.clone(), is_default));
    }

    let Some(entry) = virtual_entry else {
        return Ok(OptionList::from_vec(options));
    };

    // Deserialized entries bypass the lowercasing in `VirtualEntry::new`.
    let virtual_key = entry.key().to_lowercase();
    if seen.contains(&virtual_key) {
        // Observed portal behavior: a proposed name matching an existing
        // record hides the placeholder.
        tracing::debug!(
            key = %virtual_key,
            kind = %entry.kind(),
            "virtual entry collides with an existing record; dropping it"
        );
        return Ok(OptionList::from_vec(options));
    }

    match policy {
        InsertionPolicy::PrependIfEmpty if !options.is_empty() => {}
        InsertionPolicy::Append | InsertionPolicy::PrependIfEmpty => {
            let is_default = options.is_empty();
            options.push(DropdownOption::from_virtual(virtual_key, entry, is_default));
        }
        InsertionPolicy::Prepend => {
            if let Some(first) = options.first_mut() {
                first.set_default(false);
            }
            options.insert(0, DropdownOption::from_virtual(virtual_key, entry, true));
        }
    }

    Ok(OptionList::from_vec(options))
}
