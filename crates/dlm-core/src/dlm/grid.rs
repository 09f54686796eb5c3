use super::error::DlmError;
use super::layout::{ARROW_BOTTOM, ARROW_LEFT, ARROW_RIGHT, ARROW_TOP, GRID_CELLS, Gated, has};
use super::reader::MapReader;
use super::writer::MapWriter;
use crate::{ArrowIndex, CellData};

/// Read the fixed grid, iterating positions `0..GRID_CELLS`.
pub fn read_grid(r: &mut MapReader<'_>) -> Result<Vec<CellData>, DlmError> {
    let mut cells = Vec::with_capacity(GRID_CELLS);
    for _ in 0..GRID_CELLS {
        cells.push(read_cell_data(r)?);
    }
    Ok(cells)
}

pub fn write_grid(w: &mut MapWriter, cells: &[CellData]) -> Result<(), DlmError> {
    if cells.len() != GRID_CELLS {
        return Err(DlmError::GridSize {
            expected: GRID_CELLS,
            actual: cells.len(),
        });
    }
    w.reject_ungated(
        Gated::MovementZone,
        "movement zone",
        cells.iter().any(|cell| cell.move_zone != 0),
    )?;
    w.reject_ungated(
        Gated::ArrowBits,
        "arrow bits",
        cells.iter().any(|cell| cell.arrow_bits != 0),
    )?;
    for cell in cells {
        write_cell_data(w, cell);
    }
    Ok(())
}

fn read_cell_data(r: &mut MapReader<'_>) -> Result<CellData, DlmError> {
    let floor = r.read_i8()?;
    let losmov = r.read_u8()?;
    let speed = r.read_i8()?;
    let map_change_data = r.read_u8()?;
    let move_zone = r
        .read_gated(Gated::MovementZone, |r| Ok(r.read_u8()?))?
        .unwrap_or_default();
    let arrow_bits = r
        .read_gated(Gated::ArrowBits, |r| Ok(r.read_u8()?))?
        .unwrap_or_default();
    Ok(CellData {
        floor,
        losmov,
        speed,
        map_change_data,
        move_zone,
        arrow_bits,
    })
}

fn write_cell_data(w: &mut MapWriter, cell: &CellData) {
    w.write_i8(cell.floor);
    w.write_u8(cell.losmov);
    w.write_i8(cell.speed);
    w.write_u8(cell.map_change_data);
    if w.has(Gated::MovementZone) {
        w.write_u8(cell.move_zone);
    }
    if w.has(Gated::ArrowBits) {
        w.write_u8(cell.arrow_bits);
    }
}

/// Per-direction lists of grid positions whose arrow bit is set.
pub fn arrow_index(cells: &[CellData], version: u8) -> ArrowIndex {
    let mut index = ArrowIndex::default();
    if !has(version, Gated::ArrowBits) {
        return index;
    }
    for (cell_id, cell) in (0u16..).zip(cells) {
        let arrows = cell.arrows();
        for (bit, list) in [
            (ARROW_TOP, &mut index.top),
            (ARROW_BOTTOM, &mut index.bottom),
            (ARROW_LEFT, &mut index.left),
            (ARROW_RIGHT, &mut index.right),
        ] {
            if arrows & bit != 0 {
                list.push(cell_id);
            }
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::{arrow_index, read_grid, write_grid};
    use crate::CellData;
    use crate::dlm::DlmError;
    use crate::dlm::layout::GRID_CELLS;
    use crate::dlm::reader::MapReader;
    use crate::dlm::writer::MapWriter;

    fn grid_len(version: u8) -> usize {
        let mut w = MapWriter::new(version);
        write_grid(&mut w, &vec![CellData::default(); GRID_CELLS]).unwrap();
        w.len()
    }

    #[test]
    fn entry_width_follows_version() {
        assert_eq!(grid_len(5), GRID_CELLS * 4);
        assert_eq!(grid_len(6), GRID_CELLS * 5);
        assert_eq!(grid_len(7), GRID_CELLS * 5);
        assert_eq!(grid_len(8), GRID_CELLS * 6);
    }

    #[test]
    fn grid_must_have_every_position() {
        let mut w = MapWriter::new(8);
        let err = write_grid(&mut w, &[CellData::default()]).unwrap_err();
        assert!(matches!(
            err,
            DlmError::GridSize {
                expected: GRID_CELLS,
                actual: 1,
            }
        ));
    }

    #[test]
    fn bottom_and_right_bits_index_only_those_directions() {
        let mut cells = vec![CellData::default(); GRID_CELLS];
        cells[77].arrow_bits = 0b1010;
        let index = arrow_index(&cells, 8);
        assert!(!index.top.contains(&77));
        assert!(!index.left.contains(&77));
        assert_eq!(index.bottom, vec![77]);
        assert_eq!(index.right, vec![77]);
    }

    #[test]
    fn arrows_are_absent_before_version_eight() {
        let mut cells = vec![CellData::default(); GRID_CELLS];
        cells[0].arrow_bits = 0b1111;
        assert!(arrow_index(&cells, 7).is_empty());
    }

    #[test]
    fn grid_round_trips_at_version_nine() {
        let mut cells = vec![CellData::default(); GRID_CELLS];
        for (i, cell) in cells.iter_mut().enumerate() {
            cell.floor = (i % 5) as i8 - 2;
            cell.losmov = (i % 256) as u8;
            cell.move_zone = (i % 3) as u8;
            cell.arrow_bits = (i % 16) as u8;
        }
        let mut w = MapWriter::new(9);
        write_grid(&mut w, &cells).unwrap();
        let bytes = w.into_inner().into_inner();

        let mut r = MapReader::new(&bytes, 9);
        assert_eq!(read_grid(&mut r).unwrap(), cells);
        assert!(r.is_empty());
    }

    #[test]
    fn values_beyond_version_are_rejected() {
        let mut cells = vec![CellData::default(); GRID_CELLS];
        cells[40].move_zone = 9;
        let mut w = MapWriter::new(5);
        assert!(matches!(
            write_grid(&mut w, &cells).unwrap_err(),
            DlmError::UnsupportedField {
                field: "movement zone",
                min_version: 6,
                ..
            }
        ));
        assert!(w.is_empty());

        let mut cells = vec![CellData::default(); GRID_CELLS];
        cells[40].arrow_bits = 0b0001;
        let mut w = MapWriter::new(7);
        assert!(matches!(
            write_grid(&mut w, &cells).unwrap_err(),
            DlmError::UnsupportedField {
                field: "arrow bits",
                min_version: 8,
                ..
            }
        ));
    }

    #[test]
    fn short_grid_is_truncated() {
        let bytes = vec![0u8; GRID_CELLS * 4 - 1];
        let mut r = MapReader::new(&bytes, 1);
        assert!(matches!(
            read_grid(&mut r).unwrap_err(),
            DlmError::TruncatedStream(_)
        ));
    }
}
