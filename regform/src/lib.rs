//! # regform
//!
//! Dynamic registration-form toolkit: an administrator defines an
//! ordered set of typed input fields for an event, edits the definition
//! interactively, previews it, and persists it; end-user submissions are
//! later validated against the same definition.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `regform` to get everything, or on the individual
//! crates for finer-grained control.
//!
//! ```
//! use regform::forms::{project, FieldPatch, FieldType, FormBuilder, FormDefinition};
//!
//! let mut builder = FormBuilder::new(FormDefinition::starter("Harbor Festival"));
//! let meal = builder.add_field(FieldType::Dropdown);
//! builder.update_field(&meal, &FieldPatch::new().label("Meal choice").required(true));
//! builder.update_option(&meal, 0, "Standard");
//!
//! let preview = project(builder.form());
//! assert_eq!(preview.fields.len(), 3);
//! ```

/// Foundation types: error taxonomy, answer values, and logging.
pub use regform_core as core;

/// Schemas, builder operations, preview projection, validation, and the
/// persistence interface.
pub use regform_forms as forms;
