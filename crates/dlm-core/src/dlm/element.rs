use super::error::DlmError;
use super::layout::{ELEMENT_GRAPHICAL, ELEMENT_SOUND};
use super::reader::MapReader;
use super::writer::MapWriter;
use crate::{Element, GraphicalElement, SoundElement};

/// Decode one element: a discriminator byte then the matching payload.
///
/// Elements carry no length prefix, so an unknown discriminator cannot be
/// skipped and fails the decode.
pub fn read_element(r: &mut MapReader<'_>) -> Result<Element, DlmError> {
    let offset = r.position();
    match r.read_u8()? {
        ELEMENT_GRAPHICAL => Ok(Element::Graphical(read_graphical(r)?)),
        ELEMENT_SOUND => Ok(Element::Sound(read_sound(r)?)),
        value => Err(DlmError::UnknownElementType { value, offset }),
    }
}

pub fn write_element(w: &mut MapWriter, element: &Element) -> Result<(), DlmError> {
    w.write_u8(element.element_type());
    match element {
        Element::Graphical(graphical) => write_graphical(w, graphical),
        Element::Sound(sound) => {
            write_sound(w, sound);
            Ok(())
        }
    }
}

fn read_triple(r: &mut MapReader<'_>) -> Result<[u8; 3], DlmError> {
    let bytes = r.read_bytes(3)?;
    Ok([bytes[0], bytes[1], bytes[2]])
}

fn read_graphical(r: &mut MapReader<'_>) -> Result<GraphicalElement, DlmError> {
    Ok(GraphicalElement {
        element_id: r.read_u32()?,
        hue: read_triple(r)?,
        shadow: read_triple(r)?,
        offset_x: r.read_element_offset()?,
        offset_y: r.read_element_offset()?,
        altitude: r.read_i8()?,
        identifier: r.read_u32()?,
    })
}

fn write_graphical(w: &mut MapWriter, element: &GraphicalElement) -> Result<(), DlmError> {
    w.write_u32(element.element_id);
    w.write_bytes(&element.hue);
    w.write_bytes(&element.shadow);
    w.write_element_offset(element.offset_x, "graphical offset x")?;
    w.write_element_offset(element.offset_y, "graphical offset y")?;
    w.write_i8(element.altitude);
    w.write_u32(element.identifier);
    Ok(())
}

fn read_sound(r: &mut MapReader<'_>) -> Result<SoundElement, DlmError> {
    Ok(SoundElement {
        sound_id: r.read_i32()?,
        base_volume: r.read_i16()?,
        full_volume_distance: r.read_i32()?,
        null_volume_distance: r.read_i32()?,
        min_delay_between_loops: r.read_i16()?,
        max_delay_between_loops: r.read_i16()?,
    })
}

fn write_sound(w: &mut MapWriter, element: &SoundElement) {
    w.write_i32(element.sound_id);
    w.write_i16(element.base_volume);
    w.write_i32(element.full_volume_distance);
    w.write_i32(element.null_volume_distance);
    w.write_i16(element.min_delay_between_loops);
    w.write_i16(element.max_delay_between_loops);
}
