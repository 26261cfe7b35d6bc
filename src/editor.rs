//! The admin editor: create, edit, duplicate, publish and delete agenda
//! entries
//!
//! The form is a small state machine (`Idle` or `Editing`) over an
//! [`EventStore`]. Submitting validates locally first, so an incomplete
//! form never reaches the store; publish toggling and deletion are
//! single-shot actions outside the form.

use chrono::NaiveDate;
use thiserror::Error;

use crate::event::{Event, EventId, EventKind, EventMap, EventRecord, Title};
use crate::localization::{translate, Language};
use crate::projection;
use crate::store::{EventPatch, EventStore, StoreError};

/// A required form field was left empty. Reported inline, blocks the
/// submit, mutates nothing remote.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Error)]
pub enum EditorError {
    /// `submit` was called with no edit in progress
    #[error("no edit is in progress")]
    NotEditing,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The in-progress form state
#[derive(Clone, Debug, PartialEq)]
pub struct EventDraft {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub title: Title,
    pub moderator: String,
    pub speakers: String,
    pub kind: EventKind,
    pub published: bool,
}

impl EventDraft {
    /// The defaults a fresh form opens with: the given day, a 09:00-17:00
    /// slot, an empty title, a published session.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            title: Title::default(),
            moderator: String::new(),
            speakers: String::new(),
            kind: EventKind::default(),
            published: true,
        }
    }

    /// Load an existing event into the form
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            date: record.date.clone(),
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            title: record.title.clone(),
            moderator: record.moderator.clone(),
            speakers: record.speakers.clone(),
            kind: record.kind,
            published: record.published,
        }
    }

    /// The complete record this form state describes
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            title: self.title.clone(),
            moderator: self.moderator.clone(),
            speakers: self.speakers.clone(),
            kind: self.kind,
            published: self.published,
        }
    }

    /// Check the required fields: date, both times, and the title (every
    /// language variant of it when the title is multilingual).
    ///
    /// Note that no ordering between start and end time is enforced, and
    /// overlaps with other events are not checked either.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.date.is_empty() {
            missing.push("date");
        }
        if self.start_time.is_empty() {
            missing.push("startTime");
        }
        if self.end_time.is_empty() {
            missing.push("endTime");
        }
        match &self.title {
            Title::Plain(text) => {
                if text.is_empty() {
                    missing.push("title");
                }
            }
            Title::Localized(variants) => {
                for (language, field) in [
                    (Language::En, "title (en)"),
                    (Language::Fr, "title (fr)"),
                    (Language::Pt, "title (pt)"),
                ]
                .iter()
                {
                    if variants.get(language).map_or(true, |text| text.is_empty()) {
                        missing.push(field);
                    }
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

/// What a submit will do with the draft
#[derive(Clone, Debug, PartialEq)]
pub enum EditTarget {
    /// Create a new event; the store assigns the id on submit
    New,
    /// Patch this existing event with the full form state
    Existing(EventId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditorState {
    Idle,
    Editing { target: EditTarget, draft: EventDraft },
}

/// The result of a successful submit
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Created { id: EventId, published: bool },
    Updated,
    /// The edited event was deleted under us. Nothing was written; the
    /// next snapshot reconciles the listing.
    TargetVanished,
}

impl SubmitOutcome {
    /// The localized notice to show for this outcome
    pub fn notice(&self, language: Language) -> &'static str {
        match self {
            SubmitOutcome::Created { published: true, .. } => translate(language, "eventPublished"),
            SubmitOutcome::Created { published: false, .. } => translate(language, "eventDraft"),
            SubmitOutcome::Updated => translate(language, "eventUpdated"),
            // The target is gone, which is what the deletion notice says
            SubmitOutcome::TargetVanished => translate(language, "eventDeleted"),
        }
    }
}

/// The admin-surface editor over an event store
pub struct AdminEditor<S: EventStore> {
    store: S,
    state: EditorState,
}

impl<S: EventStore> AdminEditor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: EditorState::Idle,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The form being edited, for the embedder to bind inputs to
    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> {
        match &mut self.state {
            EditorState::Idle => None,
            EditorState::Editing { draft, .. } => Some(draft),
        }
    }

    /// The full admin listing (drafts included) of a snapshot
    pub fn list(&self, events: &EventMap) -> Vec<Event> {
        projection::project_all(events)
    }

    /// Open an empty form with today's defaults
    pub fn open_for_create(&mut self) {
        self.open_for_create_on(chrono::Local::now().date_naive());
    }

    /// Open an empty form with the given day's defaults
    pub fn open_for_create_on(&mut self, today: NaiveDate) {
        self.state = EditorState::Editing {
            target: EditTarget::New,
            draft: EventDraft::with_defaults(today),
        };
    }

    /// Load an existing event for editing
    pub fn open_for_edit(&mut self, event: &Event) {
        self.state = EditorState::Editing {
            target: EditTarget::Existing(event.id().clone()),
            draft: EventDraft::from_record(event.record()),
        };
    }

    /// Load a copy of an existing event into a create form: same fields,
    /// copy-marked title, not published. The copy gets its own id when it
    /// is submitted.
    pub fn duplicate(&mut self, event: &Event) {
        let mut draft = EventDraft::from_record(event.record());
        draft.title = draft.title.with_copy_marker();
        draft.published = false;
        self.state = EditorState::Editing {
            target: EditTarget::New,
            draft,
        };
    }

    /// Discard the in-progress edit
    pub fn cancel(&mut self) {
        self.state = EditorState::Idle;
    }

    /// Validate the draft, then write it to the store.
    ///
    /// On validation failure or a failed write the draft stays open, so
    /// the admin can fix or resubmit it. A patch whose target vanished
    /// returns [`SubmitOutcome::TargetVanished`] and closes the form:
    /// there is nothing left to write to.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, EditorError> {
        let (target, draft) = match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::Idle => return Err(EditorError::NotEditing),
            EditorState::Editing { target, draft } => (target, draft),
        };

        if let Err(err) = draft.validate() {
            self.state = EditorState::Editing { target, draft };
            return Err(err.into());
        }

        let record = draft.to_record();
        match target {
            EditTarget::New => match self.store.create(record).await {
                Ok(id) => {
                    let published = draft.published;
                    Ok(SubmitOutcome::Created { id, published })
                }
                Err(err) => {
                    log::warn!("Unable to create the event: {}", err);
                    self.state = EditorState::Editing {
                        target: EditTarget::New,
                        draft,
                    };
                    Err(err.into())
                }
            },
            EditTarget::Existing(id) => {
                match self.store.patch(&id, EventPatch::from_record(&record)).await {
                    Ok(()) => Ok(SubmitOutcome::Updated),
                    Err(StoreError::NotFound(_)) => {
                        log::info!("Event {} vanished while it was being edited", id);
                        Ok(SubmitOutcome::TargetVanished)
                    }
                    Err(err) => {
                        log::warn!("Unable to update event {}: {}", id, err);
                        self.state = EditorState::Editing {
                            target: EditTarget::Existing(id),
                            draft,
                        };
                        Err(err.into())
                    }
                }
            }
        }
    }

    /// Flip an event between published and draft. Single-shot, does not
    /// touch the form state.
    pub async fn toggle_published(
        &self,
        id: &EventId,
        currently_published: bool,
    ) -> Result<(), StoreError> {
        self.store
            .patch(id, EventPatch::published(!currently_published))
            .await
    }

    /// Remove an event. Single-shot, idempotent, does not touch the form
    /// state. The admin surface asks for confirmation first (the
    /// [`confirm_delete_prompt`](Self::confirm_delete_prompt) string).
    pub async fn delete(&self, id: &EventId) -> Result<(), StoreError> {
        self.store.delete(id).await
    }

    /// The localized confirmation prompt for a deletion
    pub fn confirm_delete_prompt(&self, language: Language) -> &'static str {
        translate(language, "confirmDelete")
    }
}
