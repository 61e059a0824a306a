//! Field-level validation failure collection.
//!
//! Forms submit several fields at once; the client highlights every failing
//! field, so validators accumulate messages here instead of stopping at the
//! first failure.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use super::Error;

/// Ordered map of field name to the first failure message for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record a failure for `field`. The first message recorded for a field wins.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Record the error half of `result` under `field`, returning the success value.
    pub fn check<T, E: std::fmt::Display>(
        &mut self,
        field: &str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(field, err.to_string());
                None
            }
        }
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Convert into `Ok(())` when empty, otherwise a validation [`Error`].
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(self))
        }
    }

    /// JSON details payload: `{ "errors": { field: { "message": ... } } }`.
    pub(crate) fn to_details(&self) -> Value {
        let errors: Map<String, Value> = self
            .0
            .iter()
            .map(|(field, message)| (field.clone(), json!({ "message": message })))
            .collect();
        json!({ "errors": errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn first_message_per_field_is_kept() {
        let mut errors = FieldErrors::default();
        errors.push("name", "too short");
        errors.push("name", "invalid characters");
        assert_eq!(errors.get("name"), Some("too short"));
    }

    #[rstest]
    fn check_records_failures_and_passes_values_through() {
        let mut errors = FieldErrors::default();
        let ok: Option<u8> = errors.check("take", Ok::<_, String>(5));
        let failed: Option<u8> = errors.check("page", Err::<u8, _>("page must be at least 1"));

        assert_eq!(ok, Some(5));
        assert!(failed.is_none());
        assert_eq!(errors.get("page"), Some("page must be at least 1"));
        assert!(errors.get("take").is_none());
    }

    #[rstest]
    fn empty_collection_is_ok() {
        assert!(FieldErrors::default().into_result().is_ok());
    }

    #[rstest]
    fn non_empty_collection_becomes_invalid_request() {
        let mut errors = FieldErrors::default();
        errors.push("email", "email must be a valid address");
        let err = errors.into_result().expect_err("errors present");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
