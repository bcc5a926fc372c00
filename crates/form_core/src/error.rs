use shared::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("rating {value} for '{field}' is outside 1-5")]
    InvalidRating { field: String, value: u8 },
    #[error(transparent)]
    Store(#[from] StoreError),
}
