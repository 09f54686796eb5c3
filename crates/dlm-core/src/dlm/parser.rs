use log::debug;

use super::error::DlmError;
use super::fixture::{read_fixtures, write_fixtures};
use super::grid::{arrow_index, read_grid, write_grid};
use super::header::{check_header, read_body, read_header, write_header_and_body};
use super::layer::{read_layers, write_layers};
use super::reader::MapReader;
use super::scene::{
    read_audio, read_presentation, read_topology, write_audio, write_presentation, write_topology,
};
use super::writer::MapWriter;
use crate::cursor::{ByteReader, ByteWriter};
use crate::transform::MapKey;
use crate::{Encryption, MapDocument, MapHeader};

/// Decode an uncompressed map stream.
///
/// This is the relaxed entry point: `key` may be `None`, and is only
/// demanded once the header declares an encrypted body. `MapCodec` is the
/// strict one and refuses to exist without a non-empty key. Trailing bytes
/// after the last grid entry are rejected.
///
/// # Examples
/// ```
/// use dlm_core::{MapDocument, decode_map, encode_map};
///
/// let doc = MapDocument::new(6, 12);
/// let bytes = encode_map(&doc, None)?;
/// assert_eq!(decode_map(&bytes, None)?, doc);
/// # Ok::<(), dlm_core::DlmError>(())
/// ```
pub fn decode_map(input: &[u8], key: Option<&MapKey>) -> Result<MapDocument, DlmError> {
    let mut r = ByteReader::new(input);
    let (header, encryption) = read_header(&mut r)?;
    let body = read_body(&mut r, &encryption, key)?;

    let mut body_reader = MapReader::new(&body, header.version);
    let doc = read_map_body(&mut body_reader, header, encryption)?;
    if !body_reader.is_empty() {
        return Err(DlmError::TrailingData {
            remaining: body_reader.remaining(),
        });
    }
    Ok(doc)
}

/// Encode a document into an uncompressed map stream.
///
/// Like `decode_map`, `key` may be `None` and is only demanded when the
/// document asks for encryption. The body is serialized first so its length
/// can be stamped into the header; `encryption.data_len` of the document is
/// ignored.
///
/// A document carrying a value its version has no room for (encryption
/// before version 7, a gated group or grid byte below its threshold, a
/// reverb preset with reverb off) is rejected rather than truncated, as is a
/// gated group left `None` at a version that stores it.
pub fn encode_map(doc: &MapDocument, key: Option<&MapKey>) -> Result<Vec<u8>, DlmError> {
    check_header(&doc.header)?;
    let mut body = MapWriter::new(doc.header.version);
    write_map_body(&mut body, doc)?;
    let body = body.into_inner().into_inner();

    let mut out = ByteWriter::with_capacity(body.len() + 12);
    write_header_and_body(&mut out, &doc.header, &doc.encryption, body, key)?;
    Ok(out.into_inner())
}

fn read_map_body(
    r: &mut MapReader<'_>,
    header: MapHeader,
    encryption: Encryption,
) -> Result<MapDocument, DlmError> {
    let topology = read_topology(r)?;
    let presentation = read_presentation(r)?;
    let audio = read_audio(r)?;
    let background_fixtures = read_fixtures(r)?;
    let foreground_fixtures = read_fixtures(r)?;
    let reserved = r.read_i32()?;
    let ground_checksum = r.read_i32()?;
    let layers = read_layers(r)?;
    let cells = read_grid(r)?;
    let arrows = arrow_index(&cells, header.version);

    debug!(
        "map {}: {} background / {} foreground fixtures, {} layers",
        header.map_id,
        background_fixtures.len(),
        foreground_fixtures.len(),
        layers.len()
    );

    Ok(MapDocument {
        header,
        encryption,
        topology,
        presentation,
        audio,
        background_fixtures,
        foreground_fixtures,
        reserved,
        ground_checksum,
        layers,
        cells,
        arrows,
    })
}

fn write_map_body(w: &mut MapWriter, doc: &MapDocument) -> Result<(), DlmError> {
    write_topology(w, &doc.topology);
    write_presentation(w, &doc.presentation)?;
    write_audio(w, &doc.audio)?;
    write_fixtures(w, &doc.background_fixtures, "background fixtures")?;
    write_fixtures(w, &doc.foreground_fixtures, "foreground fixtures")?;
    w.write_i32(doc.reserved);
    w.write_i32(doc.ground_checksum);
    write_layers(w, &doc.layers)?;
    write_grid(w, &doc.cells)
}
