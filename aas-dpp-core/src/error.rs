//! Store error types.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while reading or writing the AAS record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record exists for the requested id.
    #[error("AAS not found: {0}")]
    NotFound(String),
    /// A recognized submodel payload failed its field checks.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// An opaque submodel payload was not a JSON object.
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// The asset id cannot be used as a file name.
    #[error("Invalid asset ID: {0}")]
    InvalidAssetId(String),
    /// I/O error reading or writing the backing file.
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),
    /// The record could not be serialized.
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}
