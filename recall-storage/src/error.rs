use recall_core::errors::{RecallError, StorageError};

/// Wrap a message as a `RecallError::StoreUnavailable(StorageError::Sqlite)`.
pub fn to_storage_error(message: impl Into<String>) -> RecallError {
    RecallError::StoreUnavailable(StorageError::Sqlite {
        message: message.into(),
    })
}

pub(crate) fn rusqlite_err(e: rusqlite::Error) -> RecallError {
    to_storage_error(e.to_string())
}
