//! Applies queued UI form messages, one at a time, to the controller and store.

use form_core::{FormController, FormMessage};
use storage::{KeyValueStore, RecordStore};

use crate::controller::events::{status_for_effect, UiError};

pub fn dispatch_form_message<S: KeyValueStore>(
    form: &mut FormController,
    store: &mut RecordStore<S>,
    message: FormMessage,
    status: &mut String,
) -> Result<(), UiError> {
    match form.apply(message, store) {
        Ok(effect) => {
            if let Some(text) = status_for_effect(&effect) {
                tracing::info!(status = %text, records = store.len(), "form action completed");
                *status = text;
            }
            Ok(())
        }
        Err(err) => {
            tracing::warn!(error = %err, "form action failed");
            Err(UiError::from_form_error(&err))
        }
    }
}

/// Drains `queue` in order. Stops at the first failure so later messages
/// never act on indices that assumed the failed one succeeded.
pub fn dispatch_queued<S: KeyValueStore>(
    form: &mut FormController,
    store: &mut RecordStore<S>,
    queue: &mut Vec<FormMessage>,
    status: &mut String,
) -> Result<(), UiError> {
    for message in queue.drain(..) {
        dispatch_form_message(form, store, message, status)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
