use thiserror::Error;

/// Errors returned by cursor reads, writes and seeks.
///
/// # Examples
/// ```
/// use dlm_core::cursor::{ByteReader, CursorError};
///
/// let mut reader = ByteReader::new(&[0x01]);
/// let err = reader.read_u16().unwrap_err();
/// assert_eq!(err, CursorError::OutOfData { offset: 0, needed: 2, available: 1 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("out of data at offset {offset}: need {needed} bytes, {available} available")]
    OutOfData {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("position {position} is past the end of a {len}-byte buffer")]
    InvalidPosition { position: usize, len: usize },
}
