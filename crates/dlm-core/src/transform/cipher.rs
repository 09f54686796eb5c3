use std::fmt;
use std::str::FromStr;

use super::error::TransformError;

/// Non-empty key for the repeating-key XOR cipher.
///
/// The key is supplied out-of-band by the caller and never stored in a
/// decoded document. `Debug` output does not reveal the key bytes.
///
/// # Examples
/// ```
/// use dlm_core::transform::{MapKey, TransformError};
///
/// let key: MapKey = "key".parse()?;
/// let mut data = *b"hello";
/// key.apply(&mut data);
/// key.apply(&mut data);
/// assert_eq!(&data, b"hello");
///
/// assert!(matches!(MapKey::new(Vec::new()), Err(TransformError::EmptyKey)));
/// # Ok::<(), TransformError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MapKey(Vec<u8>);

impl MapKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TransformError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TransformError::EmptyKey);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// XOR `data` in place; byte `i` is combined with key byte `i % len`.
    pub fn apply(&self, data: &mut [u8]) {
        for (byte, k) in data.iter_mut().zip(self.0.iter().cycle()) {
            *byte ^= k;
        }
    }
}

impl FromStr for MapKey {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes())
    }
}

impl fmt::Debug for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapKey(<{} bytes>)", self.0.len())
    }
}

/// XOR `data` against `key` repeated to length.
///
/// The cipher is an involution: applying it twice with the same key returns
/// the input.
pub fn xor_cipher(data: &[u8], key: &[u8]) -> Result<Vec<u8>, TransformError> {
    let key = MapKey::new(key)?;
    let mut out = data.to_vec();
    key.apply(&mut out);
    Ok(out)
}
