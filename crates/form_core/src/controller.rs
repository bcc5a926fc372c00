//! Form controller: owns the draft record and the edit target, and turns
//! discrete user actions into record-store calls.

use shared::{
    domain::{FeedbackRecord, Rating, RatingField, RecordId, TextField},
    error::StoreError,
};
use storage::{KeyValueStore, RecordStore};
use tracing::debug;

use crate::error::FormError;

/// One user action, queued by the UI and applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    SetText { field: TextField, value: String },
    SetRating { field: RatingField, rating: Rating },
    Submit,
    BeginEdit(usize),
    CancelEdit,
    Delete(usize),
}

impl FormMessage {
    fn name(&self) -> &'static str {
        match self {
            FormMessage::SetText { .. } => "set_text",
            FormMessage::SetRating { .. } => "set_rating",
            FormMessage::Submit => "submit",
            FormMessage::BeginEdit(_) => "begin_edit",
            FormMessage::CancelEdit => "cancel_edit",
            FormMessage::Delete(_) => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Appended { index: usize },
    Updated { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    DraftChanged,
    Submitted(SubmitOutcome),
    EditStarted { index: usize },
    EditCancelled,
    Deleted { index: usize, record: FeedbackRecord },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EditTarget {
    index: usize,
    id: RecordId,
}

#[derive(Debug, Default)]
pub struct FormController {
    draft: FeedbackRecord,
    editing: Option<EditTarget>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &FeedbackRecord {
        &self.draft
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.editing.map(|target| target.index)
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Feedback"
        } else {
            "Submit Feedback"
        }
    }

    /// Sets a text field by its wire name (`firstName`, `source`, ...).
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = TextField::from_wire_name(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.set_text(field, value.into());
        Ok(())
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        self.draft.set_text(field, value);
    }

    /// Sets `registrationRating` or `navigationRating` to a value in 1-5.
    pub fn set_rating(&mut self, name: &str, value: u8) -> Result<(), FormError> {
        let field = RatingField::from_wire_name(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let rating = Rating::new(value).ok_or_else(|| FormError::InvalidRating {
            field: name.to_string(),
            value,
        })?;
        self.set_rating_field(field, rating);
        Ok(())
    }

    pub fn set_rating_field(&mut self, field: RatingField, rating: Rating) {
        self.draft.set_rating(field, Some(rating));
    }

    /// Appends the draft, or overwrites the record being edited, then resets
    /// the draft and leaves edit mode. On error nothing changes.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut RecordStore<S>,
    ) -> Result<SubmitOutcome, StoreError> {
        let outcome = match self.editing {
            Some(target) => {
                let index = store
                    .position_of(target.id)
                    .ok_or(StoreError::EditTargetMissing { id: target.id })?;
                store.replace_at(index, self.draft.clone())?;
                SubmitOutcome::Updated { index }
            }
            None => SubmitOutcome::Appended {
                index: store.append(self.draft.clone())?,
            },
        };

        self.editing = None;
        self.draft = FeedbackRecord::default();
        Ok(outcome)
    }

    /// Loads record `index` into the draft and makes it the edit target.
    pub fn begin_edit<S: KeyValueStore>(
        &mut self,
        index: usize,
        store: &RecordStore<S>,
    ) -> Result<(), StoreError> {
        let record = store
            .get(index)
            .cloned()
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: store.len(),
            })?;
        self.editing = Some(EditTarget {
            index,
            id: record.id,
        });
        self.draft = record;
        Ok(())
    }

    /// Leaves edit mode; the draft keeps whatever was typed.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Removes record `index`. The edit target follows its record to the new
    /// position, or is cleared when the edited record itself is removed.
    pub fn delete<S: KeyValueStore>(
        &mut self,
        index: usize,
        store: &mut RecordStore<S>,
    ) -> Result<FeedbackRecord, StoreError> {
        let removed = store.remove_at(index)?;

        if let Some(target) = self.editing {
            self.editing = store
                .position_of(target.id)
                .map(|index| EditTarget { index, id: target.id });
            if self.editing.is_none() {
                debug!(index, "record under edit was deleted; leaving edit mode");
            }
        }

        Ok(removed)
    }

    pub fn apply<S: KeyValueStore>(
        &mut self,
        message: FormMessage,
        store: &mut RecordStore<S>,
    ) -> Result<FormEffect, FormError> {
        let name = message.name();
        let effect = match message {
            FormMessage::SetText { field, value } => {
                self.set_text(field, value);
                FormEffect::DraftChanged
            }
            FormMessage::SetRating { field, rating } => {
                self.set_rating_field(field, rating);
                FormEffect::DraftChanged
            }
            FormMessage::Submit => FormEffect::Submitted(self.submit(store)?),
            FormMessage::BeginEdit(index) => {
                self.begin_edit(index, store)?;
                FormEffect::EditStarted { index }
            }
            FormMessage::CancelEdit => {
                self.cancel_edit();
                FormEffect::EditCancelled
            }
            FormMessage::Delete(index) => {
                let record = self.delete(index, store)?;
                FormEffect::Deleted { index, record }
            }
        };

        debug!(message = name, edit_index = ?self.edit_index(), "applied form message");
        Ok(effect)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
