//! Field schema and form definition value types.
//!
//! A [`FormDefinition`] is an ordered collection of [`FieldSchema`]s plus
//! form-level metadata. Field-type-dependent configuration lives in the
//! [`FieldKind`] tagged union so that illegal states, such as an option
//! list on a `number` field, are unrepresentable.
//!
//! These are pure value types: construction and equality only. All editing
//! goes through the operations in [`crate::builder`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of field type names.
///
/// `FieldType` is the bare discriminant: it appears in update patches,
/// error payloads, and anywhere a field's behavior class is named without
/// its configuration. The configuration-carrying counterpart is
/// [`FieldKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A single-line free-text input.
    ShortText,
    /// A multi-line free-text input.
    LongText,
    /// An email address input.
    Email,
    /// A phone number input.
    Phone,
    /// A numeric input.
    Number,
    /// A calendar date input.
    Date,
    /// A single choice from a drop-down menu.
    Dropdown,
    /// Zero or more choices from a set of checkboxes.
    Checkbox,
    /// A single choice from a set of radio buttons.
    Radio,
}

impl FieldType {
    /// Returns `true` if fields of this type carry an option list.
    pub const fn has_options(self) -> bool {
        matches!(self, Self::Dropdown | Self::Checkbox | Self::Radio)
    }

    /// Returns the default [`FieldKind`] for this type.
    ///
    /// Option-bearing types are initialized with a single empty option so
    /// the editor always has an editable row.
    pub fn blank_kind(self) -> FieldKind {
        match self {
            Self::ShortText => FieldKind::ShortText,
            Self::LongText => FieldKind::LongText,
            Self::Email => FieldKind::Email,
            Self::Phone => FieldKind::Phone,
            Self::Number => FieldKind::Number,
            Self::Date => FieldKind::Date,
            Self::Dropdown => FieldKind::Dropdown {
                options: vec![String::new()],
            },
            Self::Checkbox => FieldKind::Checkbox {
                options: vec![String::new()],
            },
            Self::Radio => FieldKind::Radio {
                options: vec![String::new()],
            },
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ShortText => "short_text",
            Self::LongText => "long_text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Number => "number",
            Self::Date => "date",
            Self::Dropdown => "dropdown",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
        };
        write!(f, "{name}")
    }
}

/// The type of a field together with its type-specific configuration.
///
/// Serialized as an internally tagged union on `field_type`, so a field's
/// wire shape is flat: `{"field_type": "dropdown", "options": [...]}` for
/// option-bearing kinds and `{"field_type": "email"}` for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field_type", rename_all = "snake_case")]
pub enum FieldKind {
    /// A single-line free-text input.
    ShortText,
    /// A multi-line free-text input.
    LongText,
    /// An email address input.
    Email,
    /// A phone number input.
    Phone,
    /// A numeric input.
    Number,
    /// A calendar date input.
    Date,
    /// A single choice from a drop-down menu.
    Dropdown {
        /// The selectable options, in display order.
        options: Vec<String>,
    },
    /// Zero or more choices from a set of checkboxes.
    Checkbox {
        /// The selectable options, in display order.
        options: Vec<String>,
    },
    /// A single choice from a set of radio buttons.
    Radio {
        /// The selectable options, in display order.
        options: Vec<String>,
    },
}

impl FieldKind {
    /// Returns the bare type discriminant of this kind.
    pub const fn field_type(&self) -> FieldType {
        match self {
            Self::ShortText => FieldType::ShortText,
            Self::LongText => FieldType::LongText,
            Self::Email => FieldType::Email,
            Self::Phone => FieldType::Phone,
            Self::Number => FieldType::Number,
            Self::Date => FieldType::Date,
            Self::Dropdown { .. } => FieldType::Dropdown,
            Self::Checkbox { .. } => FieldType::Checkbox,
            Self::Radio { .. } => FieldType::Radio,
        }
    }

    /// Returns the option list, or `None` for kinds that carry none.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::Dropdown { options } | Self::Checkbox { options } | Self::Radio { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    /// Returns a mutable reference to the option list, if any.
    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::Dropdown { options } | Self::Checkbox { options } | Self::Radio { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    /// Converts this kind to a new field type.
    ///
    /// Changing away from an option-bearing kind discards the options;
    /// changing into one initializes them. Between two option-bearing
    /// kinds the options carry over; they remain compatible
    /// configuration.
    pub fn retyped(&self, new_type: FieldType) -> Self {
        match (self.options(), new_type) {
            (Some(options), FieldType::Dropdown) => Self::Dropdown {
                options: options.to_vec(),
            },
            (Some(options), FieldType::Checkbox) => Self::Checkbox {
                options: options.to_vec(),
            },
            (Some(options), FieldType::Radio) => Self::Radio {
                options: options.to_vec(),
            },
            _ => new_type.blank_kind(),
        }
    }
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The typed description of one form input.
///
/// Identity (`id`) is assigned at creation and never reused after
/// deletion. `order` is maintained by the builder operations as a dense
/// zero-based position within the owning [`FormDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Stable identity, unique within a form definition. Backends that
    /// omit ids on hydration get a freshly generated one.
    #[serde(default = "generate_id")]
    pub id: String,
    /// Human-readable prompt. May be empty mid-edit; must be non-empty
    /// for the definition to be publishable.
    #[serde(default)]
    pub label: String,
    /// The field type and its type-specific configuration.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether the submission validator requires an answer.
    #[serde(default)]
    pub is_required: bool,
    /// Display hint shown inside an empty input. No effect on validation.
    #[serde(default)]
    pub placeholder: String,
    /// Display hint shown alongside the input. No effect on validation.
    #[serde(default)]
    pub help_text: String,
    /// Zero-based position within the form, dense and unique.
    pub order: usize,
}

impl FieldSchema {
    /// Creates a new field of the given type at the given position.
    ///
    /// The field gets a generated UUID identity, an empty label, and is
    /// not required. Option-bearing types start with one empty option.
    pub fn new(field_type: FieldType, order: usize) -> Self {
        Self {
            id: generate_id(),
            label: String::new(),
            kind: field_type.blank_kind(),
            is_required: false,
            placeholder: String::new(),
            help_text: String::new(),
            order,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets whether this field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.is_required = required;
        self
    }

    /// Sets the placeholder hint.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Returns the bare field type.
    pub const fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// Returns the option list, or `None` for non-option fields.
    pub fn options(&self) -> Option<&[String]> {
        self.kind.options()
    }
}

/// The ordered set of field schemas plus form-level metadata for one event.
///
/// A definition is created empty (or with the conventional starter set),
/// edited exclusively through [`crate::builder`] operations, and persisted
/// as an atomic unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Form title. Must be non-empty for the definition to be publishable.
    #[serde(default)]
    pub title: String,
    /// Free text shown above the fields.
    #[serde(default)]
    pub description: String,
    /// Free text shown to the end user after a successful submission.
    #[serde(default)]
    pub confirmation_message: String,
    /// If true, submissions without an authenticated identity are accepted.
    #[serde(default)]
    pub allow_guest_registration: bool,
    /// The field schemas, unique on `id`, ordered by `order`.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl FormDefinition {
    /// Creates an empty form definition with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            confirmation_message: String::new(),
            allow_guest_registration: false,
            fields: Vec::new(),
        }
    }

    /// Creates a definition with the conventional starter set: a required
    /// short-text name field and a required email field.
    pub fn starter(title: impl Into<String>) -> Self {
        let mut form = Self::new(title);
        form.fields = vec![
            FieldSchema::new(FieldType::ShortText, 0)
                .label("Name")
                .required(true),
            FieldSchema::new(FieldType::Email, 1)
                .label("Email")
                .required(true),
        ];
        form
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the confirmation message.
    #[must_use]
    pub fn confirmation_message(mut self, message: impl Into<String>) -> Self {
        self.confirmation_message = message.into();
        self
    }

    /// Sets whether guest registration is allowed.
    #[must_use]
    pub const fn allow_guests(mut self, allow: bool) -> Self {
        self.allow_guest_registration = allow;
        self
    }

    /// Looks up a field by id.
    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Returns the index of a field in the `fields` vector.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Returns every publish blocker at once, or an empty list if the
    /// definition is publishable.
    ///
    /// Blockers: empty title, fields with empty labels, and option-bearing
    /// fields whose options are all blank.
    pub fn publish_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Form title must not be empty.".to_string());
        }
        for field in &self.fields {
            if field.label.trim().is_empty() {
                errors.push(format!("Field {} has no label.", field.order + 1));
            }
            if let Some(options) = field.options() {
                if options.iter().all(|o| o.trim().is_empty()) {
                    errors.push(format!(
                        "Field {} ({}) has no usable options.",
                        field.order + 1,
                        field.field_type()
                    ));
                }
            }
        }
        errors
    }

    /// Returns `true` if [`Self::publish_errors`] is empty.
    pub fn is_publishable(&self) -> bool {
        self.publish_errors().is_empty()
    }
}
