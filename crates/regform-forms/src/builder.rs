//! Builder operations over a form definition.
//!
//! Every operation is a value transition: it reads a [`FormDefinition`]
//! and produces a new one, leaving the input untouched. That keeps the
//! ordering invariant (`order` values form a dense `[0, n)` range after
//! every operation) independently testable and makes undo/redo and
//! preview diffing trivial for callers.
//!
//! Two surfaces are exposed:
//!
//! - The module-level functions are the strict, programmatic surface:
//!   invalid targets surface [`FormError::FieldNotFound`] or
//!   [`FormError::IndexOutOfRange`].
//! - [`FormBuilder`] is the interactive surface used by an editing UI:
//!   every method is total, degrading invalid targets to logged no-ops,
//!   matching read-modify-write UI semantics where the caller only ever
//!   offers valid targets.

use regform_core::error::{FormError, FormResult};
use tracing::debug;

use crate::schema::{FieldSchema, FieldType, FormDefinition};

/// Direction for [`move_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward `order = 0`.
    Up,
    /// Toward `order = n - 1`.
    Down,
}

/// A partial update for one field.
///
/// Only the populated members are applied; everything else is left as-is.
/// Changing `field_type` goes through [`crate::schema::FieldKind::retyped`],
/// which drops or initializes the option list as needed.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    /// New label, if any.
    pub label: Option<String>,
    /// New field type, if any.
    pub field_type: Option<FieldType>,
    /// New requiredness, if any.
    pub is_required: Option<bool>,
    /// New placeholder hint, if any.
    pub placeholder: Option<String>,
    /// New help text, if any.
    pub help_text: Option<String>,
}

impl FieldPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the field type.
    #[must_use]
    pub const fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Sets the requiredness.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.is_required = Some(required);
        self
    }

    /// Sets the placeholder hint.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }
}

/// Reassigns `order` to match vector positions.
fn renumber(fields: &mut [FieldSchema]) {
    for (index, field) in fields.iter_mut().enumerate() {
        field.order = index;
    }
}

/// Appends a new field of the given type.
///
/// The new field is created per [`FieldSchema::new`] with
/// `order` equal to the previous field count. Total: always succeeds.
pub fn add_field(form: &FormDefinition, field_type: FieldType) -> FormDefinition {
    let mut next = form.clone();
    let order = next.fields.len();
    next.fields.push(FieldSchema::new(field_type, order));
    next
}

/// Applies a partial update to the field matching `id`.
pub fn update_field(form: &FormDefinition, id: &str, patch: &FieldPatch) -> FormResult<FormDefinition> {
    let mut next = form.clone();
    let field = next
        .fields
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| FormError::FieldNotFound(id.to_string()))?;

    if let Some(label) = &patch.label {
        field.label.clone_from(label);
    }
    if let Some(field_type) = patch.field_type {
        if field_type != field.field_type() {
            field.kind = field.kind.retyped(field_type);
        }
    }
    if let Some(required) = patch.is_required {
        field.is_required = required;
    }
    if let Some(placeholder) = &patch.placeholder {
        field.placeholder.clone_from(placeholder);
    }
    if let Some(help_text) = &patch.help_text {
        field.help_text.clone_from(help_text);
    }
    Ok(next)
}

/// Removes the field matching `id` and renumbers the remainder to the
/// dense range `[0, n - 1)` in their prior relative order.
pub fn delete_field(form: &FormDefinition, id: &str) -> FormResult<FormDefinition> {
    let position = form
        .position(id)
        .ok_or_else(|| FormError::FieldNotFound(id.to_string()))?;
    let mut next = form.clone();
    next.fields.remove(position);
    renumber(&mut next.fields);
    Ok(next)
}

/// Swaps the field matching `id` with its ordering neighbor.
///
/// Moves past either boundary clamp to no-ops: `up` at `order = 0` and
/// `down` at `order = n - 1` return the definition unchanged.
pub fn move_field(form: &FormDefinition, id: &str, direction: Direction) -> FormResult<FormDefinition> {
    let position = form
        .position(id)
        .ok_or_else(|| FormError::FieldNotFound(id.to_string()))?;

    let neighbor = match direction {
        Direction::Up if position > 0 => position - 1,
        Direction::Down if position + 1 < form.fields.len() => position + 1,
        // Boundary clamp, not an error.
        _ => return Ok(form.clone()),
    };

    let mut next = form.clone();
    next.fields.swap(position, neighbor);
    renumber(&mut next.fields);
    Ok(next)
}

/// Accesses the option list of the field matching `id`, treating a field
/// without options as having every index out of range.
fn options_of<'a>(
    form: &'a mut FormDefinition,
    id: &str,
    index: usize,
) -> FormResult<&'a mut Vec<String>> {
    let field = form
        .fields
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| FormError::FieldNotFound(id.to_string()))?;
    field.kind.options_mut().ok_or(FormError::IndexOutOfRange {
        field: id.to_string(),
        index,
    })
}

/// Appends an empty option row to the field matching `id`.
pub fn add_option(form: &FormDefinition, id: &str) -> FormResult<FormDefinition> {
    let mut next = form.clone();
    options_of(&mut next, id, 0)?.push(String::new());
    Ok(next)
}

/// Replaces the option text at `index` on the field matching `id`.
pub fn update_option(
    form: &FormDefinition,
    id: &str,
    index: usize,
    value: impl Into<String>,
) -> FormResult<FormDefinition> {
    let mut next = form.clone();
    let options = options_of(&mut next, id, index)?;
    let slot = options
        .get_mut(index)
        .ok_or(FormError::IndexOutOfRange {
            field: id.to_string(),
            index,
        })?;
    *slot = value.into();
    Ok(next)
}

/// Removes the option at `index` on the field matching `id`.
///
/// The final remaining option cannot be deleted: option-bearing fields
/// keep at least one editable row.
pub fn delete_option(form: &FormDefinition, id: &str, index: usize) -> FormResult<FormDefinition> {
    let mut next = form.clone();
    let options = options_of(&mut next, id, index)?;
    if index >= options.len() || options.len() == 1 {
        return Err(FormError::IndexOutOfRange {
            field: id.to_string(),
            index,
        });
    }
    options.remove(index);
    Ok(next)
}

/// The interactive editing surface over a form definition.
///
/// Wraps the current definition and applies the module-level operations
/// as state transitions. Invalid targets degrade to logged no-ops rather
/// than errors; programmatic callers wanting errors use the `try_`
/// variants or the module-level functions directly.
///
/// When constructed with [`FormBuilder::with_submissions`], destructive
/// edits, deleting a field or changing its type, are refused with
/// [`FormError::FieldInUse`], since stored submissions reference field
/// ids as answer keys.
#[derive(Debug, Clone)]
pub struct FormBuilder {
    form: FormDefinition,
    has_submissions: bool,
}

impl FormBuilder {
    /// Creates a builder over an existing definition.
    pub const fn new(form: FormDefinition) -> Self {
        Self {
            form,
            has_submissions: false,
        }
    }

    /// Marks the definition as having stored submissions, arming the
    /// destructive-edit guard.
    #[must_use]
    pub const fn with_submissions(mut self) -> Self {
        self.has_submissions = true;
        self
    }

    /// Returns the current definition.
    pub const fn form(&self) -> &FormDefinition {
        &self.form
    }

    /// Consumes the builder, returning the current definition.
    pub fn into_form(self) -> FormDefinition {
        self.form
    }

    /// Appends a new field and returns its generated id.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        self.form = add_field(&self.form, field_type);
        self.form.fields[self.form.fields.len() - 1].id.clone()
    }

    /// Strict partial update; refuses type changes under the guard.
    pub fn try_update_field(&mut self, id: &str, patch: &FieldPatch) -> FormResult<()> {
        if self.has_submissions {
            if let Some(field_type) = patch.field_type {
                let current = self
                    .form
                    .field(id)
                    .ok_or_else(|| FormError::FieldNotFound(id.to_string()))?;
                if field_type != current.field_type() {
                    return Err(FormError::FieldInUse(id.to_string()));
                }
            }
        }
        self.form = update_field(&self.form, id, patch)?;
        Ok(())
    }

    /// Partial update; invalid targets are logged no-ops.
    pub fn update_field(&mut self, id: &str, patch: &FieldPatch) {
        if let Err(error) = self.try_update_field(id, patch) {
            debug!(%error, "update_field ignored");
        }
    }

    /// Strict delete; refused under the guard.
    pub fn try_delete_field(&mut self, id: &str) -> FormResult<()> {
        if self.has_submissions && self.form.field(id).is_some() {
            return Err(FormError::FieldInUse(id.to_string()));
        }
        self.form = delete_field(&self.form, id)?;
        Ok(())
    }

    /// Delete; a missing id is a logged no-op.
    pub fn delete_field(&mut self, id: &str) {
        if let Err(error) = self.try_delete_field(id) {
            debug!(%error, "delete_field ignored");
        }
    }

    /// Strict neighbor swap; boundary moves succeed unchanged.
    pub fn try_move_field(&mut self, id: &str, direction: Direction) -> FormResult<()> {
        self.form = move_field(&self.form, id, direction)?;
        Ok(())
    }

    /// Neighbor swap; a missing id is a logged no-op, boundary moves clamp.
    pub fn move_field(&mut self, id: &str, direction: Direction) {
        if let Err(error) = self.try_move_field(id, direction) {
            debug!(%error, "move_field ignored");
        }
    }

    /// Strict option append.
    pub fn try_add_option(&mut self, id: &str) -> FormResult<()> {
        self.form = add_option(&self.form, id)?;
        Ok(())
    }

    /// Option append; invalid targets are logged no-ops.
    pub fn add_option(&mut self, id: &str) {
        if let Err(error) = self.try_add_option(id) {
            debug!(%error, "add_option ignored");
        }
    }

    /// Strict option text replacement.
    pub fn try_update_option(
        &mut self,
        id: &str,
        index: usize,
        value: impl Into<String>,
    ) -> FormResult<()> {
        self.form = update_option(&self.form, id, index, value)?;
        Ok(())
    }

    /// Option text replacement; invalid targets are logged no-ops.
    pub fn update_option(&mut self, id: &str, index: usize, value: impl Into<String>) {
        if let Err(error) = self.try_update_option(id, index, value) {
            debug!(%error, "update_option ignored");
        }
    }

    /// Strict option removal; the last remaining option stays.
    pub fn try_delete_option(&mut self, id: &str, index: usize) -> FormResult<()> {
        self.form = delete_option(&self.form, id, index)?;
        Ok(())
    }

    /// Option removal; invalid targets are logged no-ops.
    pub fn delete_option(&mut self, id: &str, index: usize) {
        if let Err(error) = self.try_delete_option(id, index) {
            debug!(%error, "delete_option ignored");
        }
    }
}
