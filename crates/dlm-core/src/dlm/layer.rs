use log::trace;

use super::element::{read_element, write_element};
use super::error::DlmError;
use super::reader::MapReader;
use super::writer::MapWriter;
use crate::{Cell, Layer};

/// Byte-counted list of layers, each holding its cells and their elements.
pub fn read_layers(r: &mut MapReader<'_>) -> Result<Vec<Layer>, DlmError> {
    let count = usize::from(r.read_u8()?);
    let mut layers = Vec::with_capacity(count);
    for _ in 0..count {
        layers.push(read_layer(r)?);
    }
    Ok(layers)
}

pub fn write_layers(w: &mut MapWriter, layers: &[Layer]) -> Result<(), DlmError> {
    w.write_count_u8(layers.len(), "layers")?;
    for layer in layers {
        write_layer(w, layer)?;
    }
    Ok(())
}

fn read_layer(r: &mut MapReader<'_>) -> Result<Layer, DlmError> {
    let layer_id = r.read_i32()?;
    let count = r.read_count_i16("layer cell count")?;
    trace!("layer {layer_id}: {count} cells");
    let mut cells = Vec::with_capacity(count);
    for _ in 0..count {
        cells.push(read_cell(r)?);
    }
    Ok(Layer { layer_id, cells })
}

fn write_layer(w: &mut MapWriter, layer: &Layer) -> Result<(), DlmError> {
    w.write_i32(layer.layer_id);
    w.write_count_i16(layer.cells.len(), "cells in a layer")?;
    for cell in &layer.cells {
        write_cell(w, cell)?;
    }
    Ok(())
}

fn read_cell(r: &mut MapReader<'_>) -> Result<Cell, DlmError> {
    let cell_id = r.read_i16()?;
    let count = r.read_count_i16("cell element count")?;
    let mut elements = Vec::with_capacity(count);
    for _ in 0..count {
        elements.push(read_element(r)?);
    }
    Ok(Cell { cell_id, elements })
}

fn write_cell(w: &mut MapWriter, cell: &Cell) -> Result<(), DlmError> {
    w.write_i16(cell.cell_id);
    w.write_count_i16(cell.elements.len(), "elements in a cell")?;
    for element in &cell.elements {
        write_element(w, element)?;
    }
    Ok(())
}
