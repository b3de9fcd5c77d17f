use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Browser storage could not be opened (no window, privacy mode)
    #[error("local storage unavailable")]
    StorageUnavailable,
    /// Writing a record to storage failed
    #[error("failed to write '{key}': {reason}")]
    StorageWrite { key: String, reason: String },
    /// Error during JSON serialization
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// No global `window` (not running in a browser page)
    #[error("no window")]
    NoWindow,
    /// Page markup lacks an element the bound view requires
    #[error("missing element: '#{0}'")]
    MissingElement(String),
    /// Element exists but is not the expected control type
    #[error("element '#{0}' has the wrong type")]
    WrongElementType(String),
}
