use std::ops::{Deref, DerefMut};

use super::error::DlmError;
use super::layout::{Gated, has, min_version};
use crate::Rgb;
use crate::cursor::ByteWriter;

/// Body writer carrying the map version; mirror of `MapReader`.
pub struct MapWriter {
    inner: ByteWriter,
    version: u8,
}

impl MapWriter {
    pub fn new(version: u8) -> Self {
        Self {
            inner: ByteWriter::new(),
            version,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn has(&self, field: Gated) -> bool {
        has(self.version, field)
    }

    pub fn into_inner(self) -> ByteWriter {
        self.inner
    }

    /// Run `write` only when the version carries `field`.
    pub fn write_gated(
        &mut self,
        field: Gated,
        write: impl FnOnce(&mut Self) -> Result<(), DlmError>,
    ) -> Result<(), DlmError> {
        if self.has(field) { write(self) } else { Ok(()) }
    }

    /// Fail when a document carries a value for `field` at a version that
    /// has no room for it on the wire.
    pub fn reject_ungated(
        &self,
        field: Gated,
        what: &'static str,
        present: bool,
    ) -> Result<(), DlmError> {
        if present && !self.has(field) {
            return Err(DlmError::UnsupportedField {
                field: what,
                version: self.version,
                min_version: min_version(field),
            });
        }
        Ok(())
    }

    pub fn write_count_u8(&mut self, count: usize, what: &'static str) -> Result<(), DlmError> {
        let count = u8::try_from(count).map_err(|_| DlmError::TooManyEntries {
            what,
            count,
            max: usize::from(u8::MAX),
        })?;
        self.write_u8(count);
        Ok(())
    }

    pub fn write_count_i16(&mut self, count: usize, what: &'static str) -> Result<(), DlmError> {
        let count = i16::try_from(count).map_err(|_| DlmError::TooManyEntries {
            what,
            count,
            max: i16::MAX as usize,
        })?;
        self.write_i16(count);
        Ok(())
    }

    pub fn write_rgb(&mut self, rgb: Rgb) {
        self.write_u8(rgb.red);
        self.write_u8(rgb.green);
        self.write_u8(rgb.blue);
    }

    pub fn write_element_offset(&mut self, value: i16, what: &'static str) -> Result<(), DlmError> {
        if self.has(Gated::WideElementOffsets) {
            self.write_i16(value);
            return Ok(());
        }
        let narrow = i8::try_from(value).map_err(|_| DlmError::ValueOutOfRange {
            what,
            value: i64::from(value),
            version: self.version,
        })?;
        self.write_i8(narrow);
        Ok(())
    }
}

impl Deref for MapWriter {
    type Target = ByteWriter;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for MapWriter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::MapWriter;
    use crate::dlm::DlmError;
    use crate::dlm::layout::Gated;

    #[test]
    fn narrow_offset_must_fit_a_byte() {
        let mut writer = MapWriter::new(4);
        writer.write_element_offset(-5, "offset x").unwrap();
        assert_eq!(writer.as_slice(), &[0xfb]);

        let err = writer.write_element_offset(200, "offset x").unwrap_err();
        assert!(matches!(
            err,
            DlmError::ValueOutOfRange {
                value: 200,
                version: 4,
                ..
            }
        ));
    }

    #[test]
    fn wide_offset_uses_two_bytes() {
        let mut writer = MapWriter::new(5);
        writer.write_element_offset(200, "offset x").unwrap();
        assert_eq!(writer.as_slice(), &[0x00, 0xc8]);
    }

    #[test]
    fn ungated_values_are_rejected() {
        let writer = MapWriter::new(5);
        writer
            .reject_ungated(Gated::MovementZone, "movement zone", false)
            .unwrap();
        let err = writer
            .reject_ungated(Gated::MovementZone, "movement zone", true)
            .unwrap_err();
        assert!(matches!(
            err,
            DlmError::UnsupportedField {
                field: "movement zone",
                version: 5,
                min_version: 6,
            }
        ));
        MapWriter::new(6)
            .reject_ungated(Gated::MovementZone, "movement zone", true)
            .unwrap();
    }

    #[test]
    fn u8_count_overflow_is_reported() {
        let mut writer = MapWriter::new(8);
        let err = writer.write_count_u8(256, "layers").unwrap_err();
        assert!(matches!(
            err,
            DlmError::TooManyEntries {
                what: "layers",
                count: 256,
                max: 255,
            }
        ));
        assert!(writer.is_empty());
    }
}
