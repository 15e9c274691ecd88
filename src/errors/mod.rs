//! Error handling module for the album store.
//!
//! All errors are non-fatal by policy: the store falls back to safe defaults
//! or rejects the single offending operation, then surfaces a user-visible
//! notice. Nothing in here aborts the process.

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const STORAGE_READ_ERROR: &str = "STORAGE_READ_ERROR";
    pub const STORAGE_WRITE_ERROR: &str = "STORAGE_WRITE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Persisted record could not be read or parsed
    StorageRead(String),
    /// Persisted record could not be written (e.g. quota/disk failure)
    StorageWrite(String),
    /// Rejected operation: bad import shape, empty guestbook fields,
    /// unsupported upload, invalid BGM URL
    Validation(String),
}

impl StoreError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::StorageRead(_) => codes::STORAGE_READ_ERROR,
            StoreError::StorageWrite(_) => codes::STORAGE_WRITE_ERROR,
            StoreError::Validation(_) => codes::VALIDATION_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            StoreError::StorageRead(msg) => msg,
            StoreError::StorageWrite(msg) => msg,
            StoreError::Validation(msg) => msg,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        StoreError::StorageRead(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        StoreError::Validation(format!("JSON error: {}", err))
    }
}
