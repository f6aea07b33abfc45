//! # regform-forms
//!
//! The registration-form engine: a small polymorphic schema for typed
//! input fields, builder operations that edit a form definition under
//! ordering and identity invariants, a pure preview projection, and a
//! submission validator that accepts or rejects end-user answers against
//! the same definition.
//!
//! ## Modules
//!
//! - [`schema`] - `FieldSchema`, `FieldKind`, and `FormDefinition` value types
//! - [`builder`] - mutation operations and the interactive [`builder::FormBuilder`]
//! - [`preview`] - disabled, display-only projection of a definition
//! - [`validation`] - the submission validation contract
//! - [`store`] - the persistence interface and submission flow

pub mod builder;
pub mod preview;
pub mod schema;
pub mod store;
pub mod validation;

pub use builder::{Direction, FieldPatch, FormBuilder};
pub use preview::{project, FormPreview};
pub use schema::{FieldKind, FieldSchema, FieldType, FormDefinition};
pub use store::{publish, submit, FormStore, MemoryStore, SubmissionReceipt, SubmitOutcome};
pub use validation::{
    validate, validate_submission, ErrorKind, RawAnswer, Submission, SubmissionError,
    ValidationOutcome,
};
