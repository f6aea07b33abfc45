//! Normalized answer values.
//!
//! The [`Value`] enum is the canonical shape of a validated answer. The
//! submission validator coerces raw input into these variants so that
//! downstream consumers (storage, export, confirmation emails) never see
//! raw strings for typed fields.

use std::collections::BTreeSet;
use std::fmt;

/// A normalized answer value for a single form field.
///
/// Every field of a form definition appears in an accepted answer set,
/// optional unanswered fields included; those carry [`Value::NoAnswer`]
/// rather than being omitted, so the answer key set is stable across
/// submissions.
///
/// # Examples
///
/// ```
/// use regform_core::Value;
///
/// let v = Value::from(42.0);
/// assert_eq!(v, Value::Number(42.0));
///
/// let v = Value::from("hello");
/// assert_eq!(v, Value::Text("hello".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// An optional field the submitter left unanswered.
    NoAnswer,
    /// A free-text, email, phone, or single-choice answer.
    Text(String),
    /// A finite numeric answer.
    Number(f64),
    /// A calendar date answer.
    Date(chrono::NaiveDate),
    /// A checkbox answer: the set of selected options.
    Selection(BTreeSet<String>),
}

impl Value {
    /// Returns `true` if this value is the explicit no-answer marker.
    pub const fn is_no_answer(&self) -> bool {
        matches!(self, Self::NoAnswer)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAnswer => write!(f, "-"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Selection(items) => {
                let mut first = true;
                for item in items {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<chrono::NaiveDate> for Value {
    fn from(v: chrono::NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(v: BTreeSet<String>) -> Self {
        Self::Selection(v)
    }
}
