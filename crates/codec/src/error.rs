//! Codec error types
//!
//! A whole-import failure (no name anchor, malformed JSON) is distinct
//! from "imported, but some optional fields defaulted" - the latter is not
//! an error at all, only a diagnostic.

use thiserror::Error;

/// Errors from statblock and JSON round-tripping.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The statblock has no `## Name` line; the name anchors the format,
    /// so nothing can be recovered.
    #[error("Parse failed: no creature name found in statblock")]
    ParseFailed,

    /// The JSON object has no usable `name` field.
    #[error("Import rejected: missing or empty name field")]
    MissingName,

    /// Underlying JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
