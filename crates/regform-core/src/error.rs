//! Core error types for the regform workspace.
//!
//! [`FormError`] covers builder misuse (programmatic callers only; the
//! interactive builder recovers locally), publish checks, and failures at
//! the persistence boundary. Submission-side validation errors are not
//! represented here: they accumulate per field and are reported through
//! the validator's outcome type instead of short-circuiting as a `Result`.

use thiserror::Error;

/// The primary error type for the regform workspace.
///
/// Each variant maps to an appropriate HTTP status code via
/// [`FormError::status_code`], since the persistence collaborator assumes
/// HTTP-style status semantics.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Builder misuse (strict surface only) ─────────────────────────

    /// The targeted field id does not exist in the form definition.
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// An option index is out of range for the targeted field, or the
    /// field does not carry options at all.
    #[error("Option index {index} out of range for field {field}")]
    IndexOutOfRange {
        /// The targeted field id.
        field: String,
        /// The offending option index.
        index: usize,
    },

    /// A destructive edit was refused because the form already has
    /// stored submissions referencing the field.
    #[error("Field {0} has live submissions and cannot be destructively edited")]
    FieldInUse(String),

    // ── Publishing ───────────────────────────────────────────────────

    /// The form definition cannot be published; carries every blocker.
    #[error("Form is not publishable: {}", .0.join("; "))]
    NotPublishable(Vec<String>),

    // ── Persistence boundary ─────────────────────────────────────────

    /// The persistence collaborator reported a failure. The message is
    /// opaque and surfaced verbatim to the administrator.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// No form definition is stored for the given event.
    #[error("No form definition stored for event: {0}")]
    DefinitionNotFound(String),
}

impl FormError {
    /// Returns the HTTP status code associated with this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::FieldNotFound(_) | Self::DefinitionNotFound(_) => 404,
            Self::IndexOutOfRange { .. } | Self::NotPublishable(_) => 400,
            Self::FieldInUse(_) => 409,
            Self::PersistenceFailure(_) => 502,
        }
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(FormError::FieldNotFound("f1".into()).status_code(), 404);
        assert_eq!(
            FormError::IndexOutOfRange {
                field: "f1".into(),
                index: 3
            }
            .status_code(),
            400
        );
        assert_eq!(FormError::FieldInUse("f1".into()).status_code(), 409);
        assert_eq!(
            FormError::NotPublishable(vec!["title".into()]).status_code(),
            400
        );
        assert_eq!(
            FormError::PersistenceFailure("down".into()).status_code(),
            502
        );
        assert_eq!(
            FormError::DefinitionNotFound("ev1".into()).status_code(),
            404
        );
    }

    #[test]
    fn test_display() {
        let err = FormError::FieldNotFound("f9".into());
        assert_eq!(err.to_string(), "Field not found: f9");

        let err = FormError::NotPublishable(vec![
            "Form title must not be empty.".into(),
            "Field 1 has no label.".into(),
        ]);
        assert!(err.to_string().contains("title must not be empty"));
        assert!(err.to_string().contains("; "));
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = FormError::IndexOutOfRange {
            field: "f2".into(),
            index: 5,
        };
        assert_eq!(err.to_string(), "Option index 5 out of range for field f2");
    }
}
