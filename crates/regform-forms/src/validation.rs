//! Submission validation against a form definition.
//!
//! [`validate`] takes a published [`FormDefinition`] and a candidate
//! answer set and decides acceptance. Per field, in field order: the
//! required check first, then a type check against the field's kind.
//! Violations accumulate across all fields: the caller always receives
//! the complete, field-indexed error list, never just the first failure.
//!
//! Accepted submissions carry normalized answers: numbers as numeric,
//! dates as calendar dates, checkbox selections as sets, and an explicit
//! [`Value::NoAnswer`] for optional unanswered fields so the answer key
//! set always equals the definition's field id set.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use regform_core::value::Value;

use crate::schema::{FieldKind, FieldSchema, FieldType, FormDefinition};

/// Key used for form-level errors that are not attributable to one field.
pub const NON_FIELD_KEY: &str = "__all__";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

static PHONE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-() ]+$").expect("valid regex"));

/// A raw submitted value: a single string, or a list of strings for
/// checkbox fields. Untagged on the wire, so `"x"` and `["x", "y"]` both
/// deserialize directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    /// One submitted string.
    One(String),
    /// A list of submitted strings (checkbox selections).
    Many(Vec<String>),
}

impl RawAnswer {
    fn is_empty(&self) -> bool {
        match self {
            Self::One(s) => s.is_empty(),
            Self::Many(items) => items.is_empty(),
        }
    }
}

impl From<&str> for RawAnswer {
    fn from(v: &str) -> Self {
        Self::One(v.to_string())
    }
}

impl From<Vec<&str>> for RawAnswer {
    fn from(v: Vec<&str>) -> Self {
        Self::Many(v.into_iter().map(String::from).collect())
    }
}

/// A candidate answer set: field id to raw value. Fields may be absent.
pub type Submission = HashMap<String, RawAnswer>;

/// The kind of a single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field was absent, empty, or an empty selection.
    RequiredFieldMissing,
    /// The raw value does not match the field's type.
    TypeMismatch {
        /// The expected field type.
        field_type: FieldType,
    },
    /// A submitted choice is not one of the field's options.
    OptionNotAllowed,
    /// The form requires an authenticated identity and none was supplied.
    GuestNotAllowed,
}

/// One field-indexed validation failure with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionError {
    /// The offending field's id, or [`NON_FIELD_KEY`] for form-level errors.
    pub field_id: String,
    /// The failure kind.
    pub kind: ErrorKind,
    /// A message suitable for display next to the field.
    pub message: String,
}

impl SubmissionError {
    fn new(field_id: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.to_string(),
            kind,
            message: message.into(),
        }
    }
}

/// The validator's decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The submission is accepted; `answers` holds one normalized value
    /// per field of the definition.
    Accepted {
        /// Normalized answers keyed by field id.
        answers: BTreeMap<String, Value>,
    },
    /// The submission is rejected; `errors` is the complete list of
    /// violations across all fields.
    Rejected {
        /// All violations, in field order.
        errors: Vec<SubmissionError>,
    },
}

impl ValidationOutcome {
    /// Returns `true` for [`ValidationOutcome::Accepted`].
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

fn type_mismatch(field: &FieldSchema, message: impl Into<String>) -> SubmissionError {
    SubmissionError::new(
        &field.id,
        ErrorKind::TypeMismatch {
            field_type: field.field_type(),
        },
        message,
    )
}

fn choice_not_allowed(field: &FieldSchema, choice: &str) -> SubmissionError {
    SubmissionError::new(
        &field.id,
        ErrorKind::OptionNotAllowed,
        format!("Select a valid choice. {choice} is not one of the available choices."),
    )
}

/// Type-checks and normalizes one present, non-empty raw value.
fn check_field(field: &FieldSchema, raw: &RawAnswer) -> Result<Value, Vec<SubmissionError>> {
    let single = match raw {
        RawAnswer::One(s) => Some(s.as_str()),
        RawAnswer::Many(_) => None,
    };

    match &field.kind {
        FieldKind::ShortText | FieldKind::LongText => single
            .map(|s| Value::Text(s.to_string()))
            .ok_or_else(|| vec![type_mismatch(field, "Enter a single value.")]),

        FieldKind::Email => match single {
            Some(s) if EMAIL_RE.is_match(s) => Ok(Value::Text(s.to_string())),
            _ => Err(vec![type_mismatch(field, "Enter a valid email address.")]),
        },

        FieldKind::Phone => match single {
            Some(s)
                if PHONE_CHARS_RE.is_match(s)
                    && s.chars().filter(char::is_ascii_digit).count() >= 7 =>
            {
                Ok(Value::Text(s.to_string()))
            }
            _ => Err(vec![type_mismatch(field, "Enter a valid phone number.")]),
        },

        FieldKind::Number => match single.map(|s| s.trim().parse::<f64>()) {
            Some(Ok(n)) if n.is_finite() => Ok(Value::Number(n)),
            _ => Err(vec![type_mismatch(field, "Enter a number.")]),
        },

        FieldKind::Date => match single.map(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")) {
            Some(Ok(d)) => Ok(Value::Date(d)),
            _ => Err(vec![type_mismatch(
                field,
                "Enter a valid date (YYYY-MM-DD).",
            )]),
        },

        FieldKind::Dropdown { options } | FieldKind::Radio { options } => match single {
            Some(s) if options.iter().any(|o| o == s) => Ok(Value::Text(s.to_string())),
            Some(s) => Err(vec![choice_not_allowed(field, s)]),
            None => Err(vec![type_mismatch(field, "Select a single choice.")]),
        },

        FieldKind::Checkbox { options } => {
            let selected: Vec<&str> = match raw {
                RawAnswer::One(s) => vec![s.as_str()],
                RawAnswer::Many(items) => items.iter().map(String::as_str).collect(),
            };
            let mut errors = Vec::new();
            let mut set = BTreeSet::new();
            for choice in selected {
                if options.iter().any(|o| o == choice) {
                    set.insert(choice.to_string());
                } else {
                    errors.push(choice_not_allowed(field, choice));
                }
            }
            if errors.is_empty() {
                Ok(Value::Selection(set))
            } else {
                Err(errors)
            }
        }
    }
}

/// Runs the per-field pipeline, accumulating normalized answers and errors.
fn clean_fields(
    form: &FormDefinition,
    submission: &Submission,
) -> (BTreeMap<String, Value>, Vec<SubmissionError>) {
    let mut answers = BTreeMap::new();
    let mut errors = Vec::new();

    let mut fields: Vec<&FieldSchema> = form.fields.iter().collect();
    fields.sort_by_key(|f| f.order);

    for field in fields {
        match submission.get(&field.id) {
            Some(raw) if !raw.is_empty() => match check_field(field, raw) {
                Ok(value) => {
                    answers.insert(field.id.clone(), value);
                }
                Err(field_errors) => errors.extend(field_errors),
            },
            _ if field.is_required => {
                errors.push(SubmissionError::new(
                    &field.id,
                    ErrorKind::RequiredFieldMissing,
                    "This field is required.",
                ));
            }
            _ => {
                answers.insert(field.id.clone(), Value::NoAnswer);
            }
        }
    }

    (answers, errors)
}

/// Validates a submission against a form definition.
///
/// Identity-agnostic: the guest-registration flag is enforced by
/// [`validate_submission`]. Returns [`ValidationOutcome::Accepted`] with
/// the normalized answer set, or [`ValidationOutcome::Rejected`] with
/// every violation found.
pub fn validate(form: &FormDefinition, submission: &Submission) -> ValidationOutcome {
    let (answers, errors) = clean_fields(form, submission);
    if errors.is_empty() {
        ValidationOutcome::Accepted { answers }
    } else {
        ValidationOutcome::Rejected { errors }
    }
}

/// Validates a submission, additionally enforcing guest registration.
///
/// When the definition does not allow guest registration and `identity`
/// is `None`, the outcome is rejected with a form-level
/// [`ErrorKind::GuestNotAllowed`] under [`NON_FIELD_KEY`], appended to
/// whatever field errors were found.
pub fn validate_submission(
    form: &FormDefinition,
    submission: &Submission,
    identity: Option<&str>,
) -> ValidationOutcome {
    let (answers, mut errors) = clean_fields(form, submission);

    if !form.allow_guest_registration && identity.is_none() {
        errors.push(SubmissionError::new(
            NON_FIELD_KEY,
            ErrorKind::GuestNotAllowed,
            "Sign in to register for this event.",
        ));
    }

    if errors.is_empty() {
        ValidationOutcome::Accepted { answers }
    } else {
        ValidationOutcome::Rejected { errors }
    }
}
