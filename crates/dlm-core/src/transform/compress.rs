use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use super::error::TransformError;

pub const DEFAULT_LEVEL: u32 = 6;

/// Inflate a complete zlib stream.
pub fn inflate(input: &[u8]) -> Result<Vec<u8>, TransformError> {
    let mut out = Vec::with_capacity(input.len().saturating_mul(4));
    ZlibDecoder::new(input)
        .read_to_end(&mut out)
        .map_err(TransformError::Inflate)?;
    Ok(out)
}

/// Deflate a complete buffer into a zlib stream at `level` (0..=9).
pub fn deflate(input: &[u8], level: u32) -> Result<Vec<u8>, TransformError> {
    if level > 9 {
        return Err(TransformError::InvalidLevel { level });
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(input).map_err(TransformError::Deflate)?;
    encoder.finish().map_err(TransformError::Deflate)
}

/// Whether `input` starts with a plausible zlib header (RFC 1950: deflate
/// method, header checksum divisible by 31).
pub fn looks_compressed(input: &[u8]) -> bool {
    match input {
        [cmf, flg, ..] => cmf & 0x0f == 8 && (u16::from(*cmf) << 8 | u16::from(*flg)) % 31 == 0,
        _ => false,
    }
}
