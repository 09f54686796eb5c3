//! Whole-buffer transforms applied around the map body.
//!
//! - `compress`: zlib inflate/deflate of the complete stream
//! - `cipher`: repeating-key XOR over the encrypted body span
//!
//! Both operate on owned buffers and keep no state between calls.

pub mod cipher;
pub mod compress;
pub mod error;

pub use cipher::{MapKey, xor_cipher};
pub use compress::{DEFAULT_LEVEL, deflate, inflate, looks_compressed};
pub use error::TransformError;
