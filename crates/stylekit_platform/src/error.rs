//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Persistent storage cannot be used (private mode, disabled, quota)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Clipboard write was refused or no clipboard exists
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// Element handle does not belong to the document
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// Page description could not be parsed or is inconsistent
    #[error("Invalid page description: {0}")]
    PageDescription(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
