//! Scene metadata: identity, neighbours, presentation and audio.

use super::error::DlmError;
use super::layout::{Gated, NO_REVERB_PRESET};
use super::reader::MapReader;
use super::writer::MapWriter;
use crate::{Audio, Presentation, Topology, Zoom};

pub fn read_topology(r: &mut MapReader<'_>) -> Result<Topology, DlmError> {
    Ok(Topology {
        relative_id: r.read_u32()?,
        map_type: r.read_u8()?,
        sub_area_id: r.read_i32()?,
        top_neighbour_id: r.read_i32()?,
        bottom_neighbour_id: r.read_i32()?,
        left_neighbour_id: r.read_i32()?,
        right_neighbour_id: r.read_i32()?,
        shadow_bonus_on_entities: r.read_i32()?,
    })
}

pub fn write_topology(w: &mut MapWriter, topology: &Topology) {
    w.write_u32(topology.relative_id);
    w.write_u8(topology.map_type);
    w.write_i32(topology.sub_area_id);
    w.write_i32(topology.top_neighbour_id);
    w.write_i32(topology.bottom_neighbour_id);
    w.write_i32(topology.left_neighbour_id);
    w.write_i32(topology.right_neighbour_id);
    w.write_i32(topology.shadow_bonus_on_entities);
}

pub fn read_presentation(r: &mut MapReader<'_>) -> Result<Presentation, DlmError> {
    let background = r.read_gated(Gated::BackgroundColor, |r| r.read_rgb())?;
    let zoom = r.read_gated(Gated::Zoom, |r| {
        Ok(Zoom {
            scale: r.read_u16()?,
            offset_x: r.read_i16()?,
            offset_y: r.read_i16()?,
        })
    })?;
    Ok(Presentation { background, zoom })
}

/// A gated group must be `Some` exactly when the version carries it.
pub fn write_presentation(w: &mut MapWriter, presentation: &Presentation) -> Result<(), DlmError> {
    w.reject_ungated(
        Gated::BackgroundColor,
        "background color",
        presentation.background.is_some(),
    )?;
    w.reject_ungated(Gated::Zoom, "zoom", presentation.zoom.is_some())?;
    w.write_gated(Gated::BackgroundColor, |w| {
        let rgb = presentation
            .background
            .ok_or_else(|| missing("background color", w.version()))?;
        w.write_rgb(rgb);
        Ok(())
    })?;
    w.write_gated(Gated::Zoom, |w| {
        let zoom = presentation
            .zoom
            .ok_or_else(|| missing("zoom", w.version()))?;
        w.write_u16(zoom.scale);
        w.write_i16(zoom.offset_x);
        w.write_i16(zoom.offset_y);
        Ok(())
    })
}

fn missing(field: &'static str, version: u8) -> DlmError {
    DlmError::MissingField { field, version }
}

pub fn read_audio(r: &mut MapReader<'_>) -> Result<Audio, DlmError> {
    let use_low_pass_filter = r.read_bool()?;
    let use_reverb = r.read_bool()?;
    let preset_id = if use_reverb {
        r.read_i32()?
    } else {
        NO_REVERB_PRESET
    };
    Ok(Audio {
        use_low_pass_filter,
        use_reverb,
        preset_id,
    })
}

/// The preset id is only stored while reverb is on; otherwise it must be
/// `NO_REVERB_PRESET`.
pub fn write_audio(w: &mut MapWriter, audio: &Audio) -> Result<(), DlmError> {
    if !audio.use_reverb && audio.preset_id != NO_REVERB_PRESET {
        return Err(DlmError::ValueOutOfRange {
            what: "reverb preset without reverb",
            value: i64::from(audio.preset_id),
            version: w.version(),
        });
    }
    w.write_bool(audio.use_low_pass_filter);
    w.write_bool(audio.use_reverb);
    if audio.use_reverb {
        w.write_i32(audio.preset_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_audio, read_presentation, write_audio, write_presentation};
    use crate::dlm::DlmError;
    use crate::dlm::reader::MapReader;
    use crate::dlm::writer::MapWriter;
    use crate::{Audio, NO_REVERB_PRESET, Presentation, Rgb, Zoom};

    fn full_presentation() -> Presentation {
        Presentation {
            background: Some(Rgb {
                red: 10,
                green: 20,
                blue: 30,
            }),
            zoom: Some(Zoom {
                scale: 150,
                offset_x: -12,
                offset_y: 8,
            }),
        }
    }

    fn presentation_for(version: u8) -> Presentation {
        let full = full_presentation();
        Presentation {
            background: full.background.filter(|_| version >= 3),
            zoom: full.zoom.filter(|_| version >= 4),
        }
    }

    #[test]
    fn presentation_width_per_version() {
        for (version, len) in [(2u8, 0usize), (3, 3), (4, 9), (9, 9)] {
            let mut w = MapWriter::new(version);
            write_presentation(&mut w, &presentation_for(version)).unwrap();
            assert_eq!(w.len(), len, "version {version}");
        }
    }

    #[test]
    fn absent_groups_decode_as_none() {
        let empty: [u8; 0] = [];
        let mut r = MapReader::new(&empty, 2);
        let presentation = read_presentation(&mut r).unwrap();
        assert_eq!(presentation, Presentation::default());

        let mut w = MapWriter::new(3);
        write_presentation(&mut w, &presentation_for(3)).unwrap();
        let bytes = w.into_inner().into_inner();
        let mut r = MapReader::new(&bytes, 3);
        let presentation = read_presentation(&mut r).unwrap();
        assert_eq!(presentation.packed_color(), Some(0x0a141e));
        assert!(presentation.zoom.is_none());
    }

    #[test]
    fn group_beyond_version_is_rejected() {
        let mut w = MapWriter::new(3);
        let err = write_presentation(&mut w, &full_presentation()).unwrap_err();
        assert!(matches!(
            err,
            DlmError::UnsupportedField {
                field: "zoom",
                version: 3,
                min_version: 4,
            }
        ));
        assert!(w.is_empty());
    }

    #[test]
    fn carried_group_must_be_present() {
        let mut w = MapWriter::new(4);
        let presentation = Presentation {
            background: None,
            ..full_presentation()
        };
        let err = write_presentation(&mut w, &presentation).unwrap_err();
        assert!(matches!(
            err,
            DlmError::MissingField {
                field: "background color",
                version: 4,
            }
        ));
    }

    #[test]
    fn reverb_preset_only_when_enabled() {
        let mut w = MapWriter::new(8);
        write_audio(
            &mut w,
            &Audio {
                use_low_pass_filter: true,
                use_reverb: false,
                preset_id: NO_REVERB_PRESET,
            },
        )
        .unwrap();
        let bytes = w.into_inner().into_inner();
        assert_eq!(bytes, vec![1, 0]);

        let mut r = MapReader::new(&bytes, 8);
        let audio = read_audio(&mut r).unwrap();
        assert_eq!(audio.preset_id, NO_REVERB_PRESET);

        let mut w = MapWriter::new(8);
        let with_reverb = Audio {
            use_low_pass_filter: false,
            use_reverb: true,
            preset_id: 17,
        };
        write_audio(&mut w, &with_reverb).unwrap();
        let bytes = w.into_inner().into_inner();
        assert_eq!(bytes, vec![0, 1, 0, 0, 0, 17]);
        let mut r = MapReader::new(&bytes, 8);
        assert_eq!(read_audio(&mut r).unwrap(), with_reverb);
    }

    #[test]
    fn stray_preset_is_rejected() {
        let mut w = MapWriter::new(2);
        let err = write_audio(
            &mut w,
            &Audio {
                use_low_pass_filter: false,
                use_reverb: false,
                preset_id: 17,
            },
        )
        .unwrap_err();
        assert!(matches!(err, DlmError::ValueOutOfRange { value: 17, .. }));
        assert!(w.is_empty());
    }
}
