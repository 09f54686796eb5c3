//! Positioned big-endian byte access.
//!
//! `ByteReader` borrows an input buffer and never reads past its end;
//! `ByteWriter` owns an output buffer and can seek back to stamp fields whose
//! value is only known once later data has been produced. Neither type knows
//! anything about map formats.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::CursorError;
pub use reader::ByteReader;
pub use writer::ByteWriter;
