use thiserror::Error;

use crate::cursor::CursorError;
use crate::transform::TransformError;

/// Errors returned by map decoding and encoding.
///
/// Every error aborts the whole call; no partial document or buffer is
/// returned.
///
/// # Examples
/// ```
/// use dlm_core::{DlmError, decode_map};
///
/// let err = decode_map(&[77], None).unwrap_err();
/// assert!(matches!(err, DlmError::TruncatedStream(_)));
/// assert!(err.to_string().contains("truncated stream"));
/// ```
#[derive(Debug, Error)]
pub enum DlmError {
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },
    #[error("unsupported map version {version}")]
    UnsupportedVersion { version: u8 },
    #[error("truncated stream: {0}")]
    TruncatedStream(#[from] CursorError),
    #[error("map is encrypted but no decryption key was supplied")]
    MissingDecryptionKey,
    #[error("unknown element type {value} at body offset {offset}")]
    UnknownElementType { value: u8, offset: usize },
    #[error("{remaining} trailing bytes after the cell grid")]
    TrailingData { remaining: usize },
    #[error("cell grid must hold {expected} entries, got {actual}")]
    GridSize { expected: usize, actual: usize },
    #[error("too many {what}: {count} (max {max})")]
    TooManyEntries {
        what: &'static str,
        count: usize,
        max: usize,
    },
    #[error("{what} value {value} does not fit the version {version} layout")]
    ValueOutOfRange {
        what: &'static str,
        value: i64,
        version: u8,
    },
    #[error("{field} is not stored before version {min_version} (map is version {version})")]
    UnsupportedField {
        field: &'static str,
        version: u8,
        min_version: u8,
    },
    #[error("{field} is required at version {version}")]
    MissingField { field: &'static str, version: u8 },
    #[error("ground checksum is carried through but never validated")]
    ChecksumNotValidated,
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
