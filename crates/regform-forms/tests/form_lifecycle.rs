//! Integration tests for the build -> preview -> publish -> submit pipeline.
//!
//! These tests exercise the complete form lifecycle, covering:
//! 1. Interactive building with ordering invariants
//! 2. Preview projection of the built definition
//! 3. Publishing through the store
//! 4. End-user submission validation and persistence
//! 5. The destructive-edit guard once submissions exist

use regform_core::error::FormError;
use regform_core::value::Value;
use regform_forms::builder::{Direction, FieldPatch, FormBuilder};
use regform_forms::preview::{project, PreviewControl};
use regform_forms::schema::{FieldType, FormDefinition};
use regform_forms::store::{publish, submit, FormStore, MemoryStore, SubmitOutcome};
use regform_forms::validation::{RawAnswer, Submission};

// ============================================================================
// Shared helpers
// ============================================================================

/// Builds the registration form used throughout: the starter name+email
/// set plus a required meal dropdown and an optional notes field.
fn build_event_form() -> FormDefinition {
    let mut builder = FormBuilder::new(
        FormDefinition::starter("Harbor Festival")
            .description("Annual open-air festival at the old harbor.")
            .confirmation_message("Thanks for registering — see you at the harbor!")
            .allow_guests(true),
    );

    let meal = builder.add_field(FieldType::Dropdown);
    builder.update_field(&meal, &FieldPatch::new().label("Meal choice").required(true));
    builder.update_option(&meal, 0, "Standard");
    builder.add_option(&meal);
    builder.update_option(&meal, 1, "Vegetarian");
    builder.add_option(&meal);
    builder.update_option(&meal, 2, "Vegan");

    let notes = builder.add_field(FieldType::LongText);
    builder.update_field(
        &notes,
        &FieldPatch::new()
            .label("Anything we should know?")
            .placeholder("Accessibility needs, arrival time, ..."),
    );

    builder.into_form()
}

fn answers_for(form: &FormDefinition, pairs: &[(usize, RawAnswer)]) -> Submission {
    pairs
        .iter()
        .map(|(index, raw)| (form.fields[*index].id.clone(), raw.clone()))
        .collect()
}

// ============================================================================
// Building
// ============================================================================

#[test]
fn test_built_form_has_dense_ordering() {
    let form = build_event_form();
    assert_eq!(form.fields.len(), 4);
    for (index, field) in form.fields.iter().enumerate() {
        assert_eq!(field.order, index);
    }
    assert!(form.is_publishable());
}

#[test]
fn test_reordering_session_keeps_invariant() {
    let mut builder = FormBuilder::new(build_event_form());
    let meal = builder.form().fields[2].id.clone();
    builder.move_field(&meal, Direction::Up);
    builder.move_field(&meal, Direction::Up);
    builder.move_field(&meal, Direction::Up); // boundary clamp
    assert_eq!(builder.form().position(&meal), Some(0));
    for (index, field) in builder.form().fields.iter().enumerate() {
        assert_eq!(field.order, index);
    }
}

#[test]
fn test_delete_then_rebuild_never_reuses_ids() {
    let mut builder = FormBuilder::new(build_event_form());
    let meal = builder.form().fields[2].id.clone();
    builder.delete_field(&meal);
    let replacement = builder.add_field(FieldType::Dropdown);
    assert_ne!(replacement, meal);
    assert_eq!(builder.form().fields.len(), 4);
}

// ============================================================================
// Preview
// ============================================================================

#[test]
fn test_preview_of_built_form() {
    let form = build_event_form();
    let preview = project(&form);

    assert_eq!(preview.title, "Harbor Festival");
    assert_eq!(preview.fields.len(), 4);
    assert_eq!(
        preview.fields[2].control,
        PreviewControl::Menu {
            options: vec!["Standard".into(), "Vegetarian".into(), "Vegan".into()]
        }
    );
    assert!(preview.fields[2].is_required);
    assert_eq!(preview.fields[3].control, PreviewControl::MultiLine);

    let html = preview.render_html();
    assert!(html.contains("Harbor Festival"));
    assert!(html.contains("<option>Vegan</option>"));
    assert!(!html.contains(r#"<input type="text" value"#)); // nothing populated
}

// ============================================================================
// Publish + submit
// ============================================================================

#[tokio::test]
async fn test_full_lifecycle_accepted_submission() {
    let store = MemoryStore::new();
    let form = build_event_form();
    publish(&store, "harbor-2026", &form).await.unwrap();

    let submission = answers_for(
        &form,
        &[
            (0, RawAnswer::One("Alice".into())),
            (1, RawAnswer::One("alice@example.com".into())),
            (2, RawAnswer::One("Vegan".into())),
        ],
    );
    let outcome = submit(&store, "harbor-2026", &submission, None).await.unwrap();

    match outcome {
        SubmitOutcome::Accepted(receipt) => {
            assert_eq!(
                receipt.confirmation_message,
                "Thanks for registering — see you at the harbor!"
            );
        }
        SubmitOutcome::Rejected(errors) => panic!("unexpected rejection: {errors:?}"),
    }
    assert_eq!(store.submission_count("harbor-2026"), 1);
}

#[tokio::test]
async fn test_rejected_submission_reports_every_field() {
    let store = MemoryStore::new();
    let form = build_event_form();
    publish(&store, "harbor-2026", &form).await.unwrap();

    // Missing name, bad email, unknown meal.
    let submission = answers_for(
        &form,
        &[
            (1, RawAnswer::One("not-an-email".into())),
            (2, RawAnswer::One("Fish".into())),
        ],
    );
    let outcome = submit(&store, "harbor-2026", &submission, None).await.unwrap();

    match outcome {
        SubmitOutcome::Rejected(errors) => {
            assert_eq!(errors.len(), 3);
            assert_eq!(errors[0].field_id, form.fields[0].id);
            assert_eq!(errors[1].field_id, form.fields[1].id);
            assert_eq!(errors[2].field_id, form.fields[2].id);
        }
        SubmitOutcome::Accepted(_) => panic!("expected rejection"),
    }
    assert_eq!(store.submission_count("harbor-2026"), 0);
}

#[tokio::test]
async fn test_answer_key_set_is_stable() {
    let store = MemoryStore::new();
    let form = build_event_form();
    publish(&store, "harbor-2026", &form).await.unwrap();

    // Notes left unanswered: the stored answer set still carries its key.
    let submission = answers_for(
        &form,
        &[
            (0, RawAnswer::One("Bob".into())),
            (1, RawAnswer::One("bob@example.com".into())),
            (2, RawAnswer::One("Standard".into())),
        ],
    );
    submit(&store, "harbor-2026", &submission, None).await.unwrap();

    let outcome = regform_forms::validate(&form, &submission);
    let regform_forms::ValidationOutcome::Accepted { answers } = outcome else {
        panic!("expected acceptance");
    };
    assert_eq!(answers.len(), form.fields.len());
    assert_eq!(answers[&form.fields[3].id], Value::NoAnswer);
}

#[tokio::test]
async fn test_guest_gate_through_submit() {
    let store = MemoryStore::new();
    let mut form = build_event_form();
    form.allow_guest_registration = false;
    publish(&store, "members-only", &form).await.unwrap();

    let submission = answers_for(
        &form,
        &[
            (0, RawAnswer::One("Carol".into())),
            (1, RawAnswer::One("carol@example.com".into())),
            (2, RawAnswer::One("Vegan".into())),
        ],
    );

    let anonymous = submit(&store, "members-only", &submission, None).await.unwrap();
    assert!(matches!(anonymous, SubmitOutcome::Rejected(_)));
    assert_eq!(store.submission_count("members-only"), 0);

    let signed_in = submit(&store, "members-only", &submission, Some("user-42"))
        .await
        .unwrap();
    assert!(matches!(signed_in, SubmitOutcome::Accepted(_)));
}

// ============================================================================
// Editing after submissions exist
// ============================================================================

#[tokio::test]
async fn test_guard_armed_from_store_counts() {
    let store = MemoryStore::new();
    let form = build_event_form();
    publish(&store, "harbor-2026", &form).await.unwrap();

    let submission = answers_for(
        &form,
        &[
            (0, RawAnswer::One("Dana".into())),
            (1, RawAnswer::One("dana@example.com".into())),
            (2, RawAnswer::One("Vegan".into())),
        ],
    );
    submit(&store, "harbor-2026", &submission, None).await.unwrap();

    let fetched = store.fetch_definition("harbor-2026").await.unwrap();
    let mut builder = FormBuilder::new(fetched);
    if store.submission_count("harbor-2026") > 0 {
        builder = builder.with_submissions();
    }

    let meal = builder.form().fields[2].id.clone();
    assert!(matches!(
        builder.try_delete_field(&meal),
        Err(FormError::FieldInUse(_))
    ));
    assert!(matches!(
        builder.try_update_field(&meal, &FieldPatch::new().field_type(FieldType::ShortText)),
        Err(FormError::FieldInUse(_))
    ));

    // Cosmetic edits stay possible and can be re-published.
    builder
        .try_update_field(&meal, &FieldPatch::new().label("Meal preference"))
        .unwrap();
    publish(&store, "harbor-2026", builder.form()).await.unwrap();
}

// ============================================================================
// Wire shape
// ============================================================================

#[test]
fn test_definition_wire_shape_round_trip() {
    let form = build_event_form();
    let json = serde_json::to_value(&form).unwrap();

    assert_eq!(json["title"], "Harbor Festival");
    assert_eq!(json["allow_guest_registration"], true);
    let fields = json["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[2]["field_type"], "dropdown");
    assert_eq!(
        fields[2]["options"],
        serde_json::json!(["Standard", "Vegetarian", "Vegan"])
    );
    assert!(fields[0].get("options").is_none());
    assert_eq!(fields[3]["order"], 3);

    let back: FormDefinition = serde_json::from_value(json).unwrap();
    assert_eq!(back, form);
}

#[test]
fn test_submission_wire_shape() {
    let raw = r#"{"f1": "a@b.com", "transport": ["bus", "train"]}"#;
    let submission: Submission = serde_json::from_str(raw).unwrap();
    assert_eq!(submission["f1"], RawAnswer::One("a@b.com".into()));
    assert_eq!(
        submission["transport"],
        RawAnswer::Many(vec!["bus".into(), "train".into()])
    );
}
