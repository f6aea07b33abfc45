//! Persistence interface and the submission flow.
//!
//! The core never talks to a transport directly; it needs exactly three
//! calls from its persistence collaborator, captured by [`FormStore`]:
//! save a definition, fetch a definition, and store a validated answer
//! set. Definitions persist as atomic units (no field-level persistence)
//! and concurrent editors of the same definition resolve
//! last-write-wins.
//!
//! [`publish`] and [`submit`] wire the store to the schema checks and the
//! validator. [`MemoryStore`] is an in-process implementation for tests
//! and demos.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};

use regform_core::error::{FormError, FormResult};
use regform_core::value::Value;

use crate::schema::FormDefinition;
use crate::validation::{validate_submission, Submission, SubmissionError, ValidationOutcome};

/// A validated, normalized answer set keyed by field id.
pub type AnswerSet = BTreeMap<String, Value>;

/// The persistence collaborator behind the form system.
///
/// Implementations are transport-specific (HTTP client, database, ...);
/// failures surface as [`FormError::PersistenceFailure`] with the
/// collaborator's message carried verbatim; the administrator sees it
/// and retries, it is never swallowed.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Creates or replaces the form definition for an event.
    async fn save_definition(&self, event_id: &str, form: &FormDefinition) -> FormResult<()>;

    /// Fetches the stored form definition for an event.
    async fn fetch_definition(&self, event_id: &str) -> FormResult<FormDefinition>;

    /// Stores one validated answer set for an event.
    async fn save_submission(&self, event_id: &str, answers: &AnswerSet) -> FormResult<()>;
}

/// Returned to the end user after an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    /// The form's confirmation message.
    pub confirmation_message: String,
}

/// The result of [`submit`]: accepted with a receipt, or rejected with
/// the complete field-keyed error list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The submission was validated and stored.
    Accepted(SubmissionReceipt),
    /// The submission was rejected; nothing was stored.
    Rejected(Vec<SubmissionError>),
}

/// Publishes a form definition: checks the publish blockers, then saves.
///
/// Returns [`FormError::NotPublishable`] with every blocker if the
/// definition is incomplete; persistence failures propagate verbatim.
pub async fn publish(
    store: &dyn FormStore,
    event_id: &str,
    form: &FormDefinition,
) -> FormResult<()> {
    let blockers = form.publish_errors();
    if !blockers.is_empty() {
        return Err(FormError::NotPublishable(blockers));
    }
    match store.save_definition(event_id, form).await {
        Ok(()) => {
            info!(event = event_id, fields = form.fields.len(), "form definition published");
            Ok(())
        }
        Err(err) => {
            error!(event = event_id, error = %err, "failed to persist form definition");
            Err(err)
        }
    }
}

/// Handles one end-user submission: fetches the definition, validates the
/// answers against it, and stores the normalized answer set on success.
///
/// A rejected submission never touches the store. `identity` is the
/// authenticated identity, if any; the definition's guest-registration
/// flag decides whether `None` is acceptable.
pub async fn submit(
    store: &dyn FormStore,
    event_id: &str,
    submission: &Submission,
    identity: Option<&str>,
) -> FormResult<SubmitOutcome> {
    let form = store.fetch_definition(event_id).await?;

    match validate_submission(&form, submission, identity) {
        ValidationOutcome::Accepted { answers } => {
            store.save_submission(event_id, &answers).await?;
            info!(event = event_id, "submission accepted");
            Ok(SubmitOutcome::Accepted(SubmissionReceipt {
                confirmation_message: form.confirmation_message,
            }))
        }
        ValidationOutcome::Rejected { errors } => {
            info!(event = event_id, errors = errors.len(), "submission rejected");
            Ok(SubmitOutcome::Rejected(errors))
        }
    }
}

/// An in-process store keyed by event id.
///
/// Holds definitions and submissions in memory behind locks so it can be
/// shared across tasks. Also counts stored submissions per event, which
/// editors use to arm the destructive-edit guard
/// ([`crate::builder::FormBuilder::with_submissions`]).
#[derive(Debug, Default)]
pub struct MemoryStore {
    definitions: RwLock<HashMap<String, FormDefinition>>,
    submissions: RwLock<HashMap<String, Vec<AnswerSet>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored submissions for an event.
    pub fn submission_count(&self, event_id: &str) -> usize {
        self.submissions
            .read()
            .map(|map| map.get(event_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

fn poisoned() -> FormError {
    FormError::PersistenceFailure("store lock poisoned".to_string())
}

#[async_trait]
impl FormStore for MemoryStore {
    async fn save_definition(&self, event_id: &str, form: &FormDefinition) -> FormResult<()> {
        let mut definitions = self.definitions.write().map_err(|_| poisoned())?;
        definitions.insert(event_id.to_string(), form.clone());
        Ok(())
    }

    async fn fetch_definition(&self, event_id: &str) -> FormResult<FormDefinition> {
        let definitions = self.definitions.read().map_err(|_| poisoned())?;
        definitions
            .get(event_id)
            .cloned()
            .ok_or_else(|| FormError::DefinitionNotFound(event_id.to_string()))
    }

    async fn save_submission(&self, event_id: &str, answers: &AnswerSet) -> FormResult<()> {
        let mut submissions = self.submissions.write().map_err(|_| poisoned())?;
        submissions
            .entry(event_id.to_string())
            .or_default()
            .push(answers.clone());
        Ok(())
    }
}
