use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("cipher key must not be empty")]
    EmptyKey,
    #[error("zlib inflate failed: {0}")]
    Inflate(std::io::Error),
    #[error("zlib deflate failed: {0}")]
    Deflate(std::io::Error),
    #[error("invalid zlib level {level} (expected 0..=9)")]
    InvalidLevel { level: u32 },
}
