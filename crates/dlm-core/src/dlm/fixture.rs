use super::error::DlmError;
use super::reader::MapReader;
use super::writer::MapWriter;
use crate::Fixture;

/// Byte-counted list of fixed-width fixture records.
pub fn read_fixtures(r: &mut MapReader<'_>) -> Result<Vec<Fixture>, DlmError> {
    let count = usize::from(r.read_u8()?);
    let mut fixtures = Vec::with_capacity(count);
    for _ in 0..count {
        fixtures.push(read_fixture(r)?);
    }
    Ok(fixtures)
}

pub fn write_fixtures(
    w: &mut MapWriter,
    fixtures: &[Fixture],
    what: &'static str,
) -> Result<(), DlmError> {
    w.write_count_u8(fixtures.len(), what)?;
    for fixture in fixtures {
        write_fixture(w, fixture);
    }
    Ok(())
}

fn read_fixture(r: &mut MapReader<'_>) -> Result<Fixture, DlmError> {
    Ok(Fixture {
        fixture_id: r.read_i32()?,
        offset_x: r.read_i16()?,
        offset_y: r.read_i16()?,
        rotation: r.read_i16()?,
        x_scale: r.read_i16()?,
        y_scale: r.read_i16()?,
        red_multiplier: r.read_i8()?,
        green_multiplier: r.read_i8()?,
        blue_multiplier: r.read_i8()?,
        alpha: r.read_u8()?,
    })
}

fn write_fixture(w: &mut MapWriter, fixture: &Fixture) {
    w.write_i32(fixture.fixture_id);
    w.write_i16(fixture.offset_x);
    w.write_i16(fixture.offset_y);
    w.write_i16(fixture.rotation);
    w.write_i16(fixture.x_scale);
    w.write_i16(fixture.y_scale);
    w.write_i8(fixture.red_multiplier);
    w.write_i8(fixture.green_multiplier);
    w.write_i8(fixture.blue_multiplier);
    w.write_u8(fixture.alpha);
}
