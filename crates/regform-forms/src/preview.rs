//! Preview projection: a display-only view of a form definition.
//!
//! [`project`] maps a [`FormDefinition`] to a [`FormPreview`]: one
//! disabled, non-interactive control per field, in field order, so an
//! administrator can visually confirm the built form before publishing.
//! No validation executes and the definition is never mutated.
//!
//! Each control also renders to a disabled HTML string in the manner of a
//! widget system, so an editing surface can drop the preview straight
//! into a page.

use serde::Serialize;

use crate::schema::{FieldKind, FormDefinition};

/// The HTML input mode for single-line controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// `<input type="text">`.
    Text,
    /// `<input type="email">`.
    Email,
    /// `<input type="tel">`.
    Phone,
    /// `<input type="number">`.
    Number,
    /// `<input type="date">`.
    Date,
}

impl InputMode {
    /// The HTML `type` attribute value.
    pub const fn html_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "tel",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

/// A disabled, display-only control in the preview tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum PreviewControl {
    /// A single-line input.
    SingleLine {
        /// The HTML input mode.
        mode: InputMode,
    },
    /// A multi-line input.
    MultiLine,
    /// A single-choice drop-down menu.
    Menu {
        /// The selectable options, in display order.
        options: Vec<String>,
    },
    /// A single-choice set of radio buttons.
    OptionButtons {
        /// The selectable options, in display order.
        options: Vec<String>,
    },
    /// A multi-choice set of checkboxes.
    MultiSelect {
        /// The selectable options, in display order.
        options: Vec<String>,
    },
}

/// One field of the preview tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewField {
    /// The underlying field's id.
    pub field_id: String,
    /// The field's prompt.
    pub label: String,
    /// Whether the required marker is shown. Display only; nothing is
    /// validated in preview mode.
    pub is_required: bool,
    /// Placeholder hint, empty if unset.
    pub placeholder: String,
    /// Help text, empty if unset.
    pub help_text: String,
    /// The disabled control.
    pub control: PreviewControl,
}

/// The full preview tree for a form definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormPreview {
    /// The form title.
    pub title: String,
    /// Free text shown above the fields.
    pub description: String,
    /// The preview fields, in field order.
    pub fields: Vec<PreviewField>,
}

/// Projects a form definition to its preview tree.
///
/// Pure: the definition is read, never mutated, and the projection holds
/// owned copies. Fields appear in `order`, regardless of their position
/// in the backing vector.
pub fn project(form: &FormDefinition) -> FormPreview {
    let mut fields: Vec<&crate::schema::FieldSchema> = form.fields.iter().collect();
    fields.sort_by_key(|f| f.order);

    let fields = fields
        .into_iter()
        .map(|field| {
            let control = match &field.kind {
                FieldKind::ShortText => PreviewControl::SingleLine {
                    mode: InputMode::Text,
                },
                FieldKind::LongText => PreviewControl::MultiLine,
                FieldKind::Email => PreviewControl::SingleLine {
                    mode: InputMode::Email,
                },
                FieldKind::Phone => PreviewControl::SingleLine {
                    mode: InputMode::Phone,
                },
                FieldKind::Number => PreviewControl::SingleLine {
                    mode: InputMode::Number,
                },
                FieldKind::Date => PreviewControl::SingleLine {
                    mode: InputMode::Date,
                },
                FieldKind::Dropdown { options } => PreviewControl::Menu {
                    options: options.clone(),
                },
                FieldKind::Radio { options } => PreviewControl::OptionButtons {
                    options: options.clone(),
                },
                FieldKind::Checkbox { options } => PreviewControl::MultiSelect {
                    options: options.clone(),
                },
            };
            PreviewField {
                field_id: field.id.clone(),
                label: field.label.clone(),
                is_required: field.is_required,
                placeholder: field.placeholder.clone(),
                help_text: field.help_text.clone(),
                control,
            }
        })
        .collect();

    FormPreview {
        title: form.title.clone(),
        description: form.description.clone(),
        fields,
    }
}

/// Escapes text for interpolation into HTML content or attributes.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl PreviewControl {
    /// Renders the control as a disabled HTML string.
    pub fn render_html(&self, placeholder: &str) -> String {
        match self {
            Self::SingleLine { mode } => format!(
                r#"<input type="{}" placeholder="{}" disabled="disabled" />"#,
                mode.html_type(),
                escape(placeholder)
            ),
            Self::MultiLine => format!(
                r#"<textarea placeholder="{}" disabled="disabled"></textarea>"#,
                escape(placeholder)
            ),
            Self::Menu { options } => {
                let items: Vec<String> = options
                    .iter()
                    .map(|o| format!("<option>{}</option>", escape(o)))
                    .collect();
                format!(
                    r#"<select disabled="disabled">{}</select>"#,
                    items.join("")
                )
            }
            Self::OptionButtons { options } => choice_inputs("radio", options),
            Self::MultiSelect { options } => choice_inputs("checkbox", options),
        }
    }
}

fn choice_inputs(input_type: &str, options: &[String]) -> String {
    let items: Vec<String> = options
        .iter()
        .map(|o| {
            format!(
                r#"<label><input type="{input_type}" disabled="disabled" />{}</label>"#,
                escape(o)
            )
        })
        .collect();
    items.join("")
}

impl PreviewField {
    /// Renders the field row: label (with required marker), control, and
    /// help text.
    pub fn render_html(&self) -> String {
        let marker = if self.is_required {
            r#"<span class="required-marker">*</span>"#
        } else {
            ""
        };
        let help = if self.help_text.is_empty() {
            String::new()
        } else {
            format!(r#"<p class="help-text">{}</p>"#, escape(&self.help_text))
        };
        format!(
            r#"<div class="preview-field"><label>{}{marker}</label>{}{help}</div>"#,
            escape(&self.label),
            self.control.render_html(&self.placeholder)
        )
    }
}

impl FormPreview {
    /// Renders the whole preview: title, description, and field rows.
    pub fn render_html(&self) -> String {
        let mut html = format!("<h2>{}</h2>", escape(&self.title));
        if !self.description.is_empty() {
            html.push_str(&format!("<p>{}</p>", escape(&self.description)));
        }
        for field in &self.fields {
            html.push_str(&field.render_html());
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{add_field, update_field, update_option, FieldPatch};
    use crate::schema::{FieldType, FormDefinition};

    fn sample_form() -> FormDefinition {
        let form = FormDefinition::starter("Fest").description("Join us");
        let form = add_field(&form, FieldType::Dropdown);
        let meal = form.fields[2].id.clone();
        let form = update_field(&form, &meal, &FieldPatch::new().label("Meal")).unwrap();
        let form = update_option(&form, &meal, 0, "Vegan").unwrap();
        let form = add_field(&form, FieldType::LongText);
        let notes = form.fields[3].id.clone();
        update_field(&form, &notes, &FieldPatch::new().label("Notes")).unwrap()
    }

    #[test]
    fn test_project_maps_controls() {
        let preview = project(&sample_form());
        assert_eq!(preview.title, "Fest");
        assert_eq!(preview.fields.len(), 4);
        assert_eq!(
            preview.fields[0].control,
            PreviewControl::SingleLine {
                mode: InputMode::Text
            }
        );
        assert_eq!(
            preview.fields[1].control,
            PreviewControl::SingleLine {
                mode: InputMode::Email
            }
        );
        assert_eq!(
            preview.fields[2].control,
            PreviewControl::Menu {
                options: vec!["Vegan".into()]
            }
        );
        assert_eq!(preview.fields[3].control, PreviewControl::MultiLine);
    }

    #[test]
    fn test_project_is_pure() {
        let form = sample_form();
        let before = form.clone();
        let _ = project(&form);
        assert_eq!(form, before);
    }

    #[test]
    fn test_project_required_marker() {
        let preview = project(&sample_form());
        assert!(preview.fields[0].is_required);
        assert!(!preview.fields[2].is_required);
    }

    #[test]
    fn test_project_respects_order_over_vector_position() {
        let mut form = FormDefinition::starter("Fest");
        form.fields.swap(0, 1); // backend may hydrate out of order
        let preview = project(&form);
        assert_eq!(preview.fields[0].label, "Name");
        assert_eq!(preview.fields[1].label, "Email");
    }

    #[test]
    fn test_render_html_disabled_everywhere() {
        let html = project(&sample_form()).render_html();
        let inputs = html.matches("disabled=\"disabled\"").count();
        assert_eq!(inputs, 4);
    }

    #[test]
    fn test_render_html_controls() {
        let html = project(&sample_form()).render_html();
        assert!(html.contains(r#"<input type="text""#));
        assert!(html.contains(r#"<input type="email""#));
        assert!(html.contains("<select"));
        assert!(html.contains("<option>Vegan</option>"));
        assert!(html.contains("<textarea"));
        assert!(html.contains(r#"<span class="required-marker">*</span>"#));
    }

    #[test]
    fn test_render_html_radio_and_checkbox() {
        let form = add_field(&FormDefinition::new("Fest"), FieldType::Radio);
        let id = form.fields[0].id.clone();
        let form = update_option(&form, &id, 0, "Yes").unwrap();
        let html = project(&form).render_html();
        assert!(html.contains(r#"<input type="radio" disabled="disabled" />Yes"#));

        let form = add_field(&FormDefinition::new("Fest"), FieldType::Checkbox);
        let html = project(&form).render_html();
        assert!(html.contains(r#"<input type="checkbox""#));
    }

    #[test]
    fn test_render_html_escapes() {
        let form = FormDefinition::new("A & B <script>");
        let html = project(&form).render_html();
        assert!(html.contains("A &amp; B &lt;script&gt;"));
    }

    #[test]
    fn test_phone_number_date_modes() {
        let form = add_field(&FormDefinition::new("Fest"), FieldType::Phone);
        let form = add_field(&form, FieldType::Number);
        let form = add_field(&form, FieldType::Date);
        let preview = project(&form);
        let modes: Vec<&PreviewControl> = preview.fields.iter().map(|f| &f.control).collect();
        assert_eq!(
            modes,
            vec![
                &PreviewControl::SingleLine {
                    mode: InputMode::Phone
                },
                &PreviewControl::SingleLine {
                    mode: InputMode::Number
                },
                &PreviewControl::SingleLine {
                    mode: InputMode::Date
                },
            ]
        );
        let html = preview.render_html();
        assert!(html.contains(r#"type="tel""#));
        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"type="date""#));
    }
}
