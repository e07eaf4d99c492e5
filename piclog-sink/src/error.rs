//! Typed error types for piclog-sink.
//!
//! This module provides structured error types so callers at the crate boundary
//! can match on specific error variants instead of relying on opaque `anyhow`
//! strings. Every variant propagates unchanged to the caller; the sink performs
//! no local recovery, retries, or rollback of already-created directories.

use thiserror::Error;

/// Top-level error type for the image log sink.
///
/// Covers the failure categories a host may want to distinguish:
/// - payload decoding (base64, image bytes)
/// - filesystem preparation (directory creation)
/// - output encoding and writing
#[derive(Debug, Error)]
pub enum SinkError {
    /// The event message was not valid base64.
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes were not a recognizable image.
    #[error("image decode failed: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// The output directory tree could not be created.
    #[error("directory create failed for '{path}': {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The image could not be encoded as JPEG.
    #[error("JPEG encode failed for '{path}': {source}")]
    ImageEncode {
        /// Destination file path.
        path: String,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },

    /// The output file could not be created or written.
    #[error("image write failed for '{path}': {source}")]
    Write {
        /// Destination file path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
