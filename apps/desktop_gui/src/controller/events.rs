//! Status messages and error modeling for the desktop form.

use form_core::{FormEffect, FormError, SubmitOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Storage,
    StaleSelection,
    Input,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn from_form_error(err: &FormError) -> Self {
        let category = match err {
            FormError::Store(store_err) if store_err.is_contract_violation() => {
                UiErrorCategory::StaleSelection
            }
            FormError::Store(_) => UiErrorCategory::Storage,
            FormError::UnknownField(_) | FormError::InvalidRating { .. } => UiErrorCategory::Input,
        };
        Self {
            category,
            message: err.to_string(),
        }
    }

    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Storage,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Storage => "Storage",
            UiErrorCategory::StaleSelection => "Record changed",
            UiErrorCategory::Input => "Input",
        }
    }
}

/// Status-line text for a completed action; typing produces none.
pub fn status_for_effect(effect: &FormEffect) -> Option<String> {
    match effect {
        FormEffect::DraftChanged => None,
        FormEffect::Submitted(SubmitOutcome::Appended { index }) => {
            Some(format!("Feedback submitted as record {}", index + 1))
        }
        FormEffect::Submitted(SubmitOutcome::Updated { index }) => {
            Some(format!("Record {} updated", index + 1))
        }
        FormEffect::EditStarted { index } => Some(format!("Editing record {}", index + 1)),
        FormEffect::EditCancelled => Some("Edit cancelled".to_string()),
        FormEffect::Deleted { index, record } => {
            let name = format!("{} {}", record.first_name, record.last_name);
            let name = name.trim();
            if name.is_empty() {
                Some(format!("Deleted record {}", index + 1))
            } else {
                Some(format!("Deleted record {} ({name})", index + 1))
            }
        }
    }
}
