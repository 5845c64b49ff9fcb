//! Record validation
//!
//! Records only need an identifier to be usable as options. Names are passed
//! through untouched, empty or not.

use crate::record::Record;

/// Check that every record carries an identifier
///
/// # Returns
/// - `Ok(())` if all identifiers are non-blank
/// - `Err(ValidationError::MissingIdentifier)` for the first offending record
pub fn validate_records<T>(records: &[Record<T>]) -> Result<(), ValidationError> {
    match records.iter().position(Record::has_blank_id) {
        Some(index) => Err(ValidationError::MissingIdentifier {
            index,
            name: records[index].name().to_string(),
        }),
        None => Ok(()),
    }
}

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Record has an empty or whitespace-only identifier
    #[error("record {index} ('{name}') has no identifier")]
    MissingIdentifier {
        /// Position in the input sequence
        index: usize,
        /// Display name of the offending record
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_empty_input() {
        let records: Vec<Record<()>> = vec![];
        assert!(validate_records(&records).is_ok());
    }

    #[test]
    fn accepts_empty_names() {
        let records = vec![Record::new("id-1", "", ())];
        assert!(validate_records(&records).is_ok());
    }

    #[test]
    fn reports_first_blank_id() {
        let records = vec![
            Record::new("ok", "fine", ()),
            Record::new(" ", "broken", ()),
            Record::new("", "also broken", ()),
        ];
        let err = validate_records(&records).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingIdentifier {
                index: 1,
                name: "broken".to_string(),
            }
        );
        assert_eq!(err.to_string(), "record 1 ('broken') has no identifier");
    }
}
