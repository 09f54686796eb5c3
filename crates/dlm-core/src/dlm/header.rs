//! Clear-text header and the encrypted body span that follows it.

use std::borrow::Cow;

use log::debug;

use super::error::DlmError;
use super::layout::{Gated, MAP_MAGIC, has, is_supported, min_version};
use crate::cursor::{ByteReader, ByteWriter};
use crate::transform::MapKey;
use crate::{Encryption, MapHeader};

/// Reject a magic/version pair the codec cannot read or write.
pub fn check_header(header: &MapHeader) -> Result<(), DlmError> {
    if header.magic != MAP_MAGIC {
        return Err(DlmError::MalformedHeader {
            reason: format!("magic {} (expected {MAP_MAGIC})", header.magic),
        });
    }
    if !is_supported(header.version) {
        return Err(DlmError::UnsupportedVersion {
            version: header.version,
        });
    }
    Ok(())
}

pub fn read_header(r: &mut ByteReader<'_>) -> Result<(MapHeader, Encryption), DlmError> {
    let magic = r.read_u8()?;
    let version = r.read_u8()?;
    let header = MapHeader {
        magic,
        version,
        map_id: 0,
    };
    check_header(&header)?;
    let header = MapHeader {
        map_id: r.read_u32()?,
        ..header
    };

    let encryption = if has(version, Gated::Encryption) {
        Encryption {
            encrypted: r.read_bool()?,
            version: r.read_u8()?,
            data_len: r.read_i32()?,
        }
    } else {
        Encryption::default()
    };
    if encryption.data_len < 0 {
        return Err(DlmError::MalformedHeader {
            reason: format!("negative body length {}", encryption.data_len),
        });
    }

    debug!(
        "map {} version {} encrypted={} body_len={}",
        header.map_id, version, encryption.encrypted, encryption.data_len
    );
    Ok((header, encryption))
}

/// Body bytes following the header.
///
/// Encrypted bodies are exactly `data_len` bytes and are decrypted into an
/// owned buffer; nothing may follow them. Clear bodies run to the end of the
/// stream and are borrowed.
pub fn read_body<'a>(
    r: &mut ByteReader<'a>,
    encryption: &Encryption,
    key: Option<&MapKey>,
) -> Result<Cow<'a, [u8]>, DlmError> {
    if !encryption.encrypted {
        return Ok(Cow::Borrowed(r.read_rest()));
    }
    let key = key.ok_or(DlmError::MissingDecryptionKey)?;
    let len = usize::try_from(encryption.data_len).map_err(|_| DlmError::MalformedHeader {
        reason: format!("negative body length {}", encryption.data_len),
    })?;
    let mut body = r.read_bytes(len)?.to_vec();
    if !r.is_empty() {
        return Err(DlmError::TrailingData {
            remaining: r.remaining(),
        });
    }
    key.apply(&mut body);
    Ok(Cow::Owned(body))
}

/// Emit the header followed by `body`, encrypting it when the map declares
/// encryption and stamping its length from version 7 on.
pub fn write_header_and_body(
    out: &mut ByteWriter,
    header: &MapHeader,
    encryption: &Encryption,
    mut body: Vec<u8>,
    key: Option<&MapKey>,
) -> Result<(), DlmError> {
    check_header(header)?;
    if !has(header.version, Gated::Encryption) {
        let field = if encryption.encrypted {
            Some("encryption")
        } else if encryption.version != 0 {
            Some("cipher version tag")
        } else {
            None
        };
        if let Some(field) = field {
            return Err(DlmError::UnsupportedField {
                field,
                version: header.version,
                min_version: min_version(Gated::Encryption),
            });
        }
    }
    out.write_u8(header.magic);
    out.write_u8(header.version);
    out.write_u32(header.map_id);

    if !has(header.version, Gated::Encryption) {
        out.write_bytes(&body);
        return Ok(());
    }

    let data_len = i32::try_from(body.len()).map_err(|_| DlmError::TooManyEntries {
        what: "body bytes",
        count: body.len(),
        max: i32::MAX as usize,
    })?;
    if encryption.encrypted {
        key.ok_or(DlmError::MissingDecryptionKey)?.apply(&mut body);
    }

    out.write_bool(encryption.encrypted);
    out.write_u8(encryption.version);
    let len_at = out.position();
    out.write_i32(0);
    out.write_bytes(&body);
    let end = out.position();
    out.set_position(len_at)?;
    out.write_i32(data_len);
    out.set_position(end)?;

    debug!(
        "wrote map {} version {} encrypted={} body_len={}",
        header.map_id, header.version, encryption.encrypted, data_len
    );
    Ok(())
}
