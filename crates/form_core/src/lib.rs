//! Draft-record state, edit tracking, and rating-picker display rules for the
//! feedback form. Independent of any UI toolkit.

pub mod controller;
pub mod error;
pub mod rating;

pub use controller::{FormController, FormEffect, FormMessage, SubmitOutcome};
pub use error::FormError;
pub use rating::{icon_highlight, IconHighlight, RatingFace, RatingPickerState, RATING_FACES};
