use std::ops::{Deref, DerefMut};

use super::error::DlmError;
use super::layout::{Gated, has};
use crate::Rgb;
use crate::cursor::ByteReader;

/// Body reader carrying the map version alongside the cursor.
///
/// Dereferences to `ByteReader` for primitive reads; adds the conventions
/// shared by the body sections (version gates, counts, colors).
pub struct MapReader<'a> {
    inner: ByteReader<'a>,
    version: u8,
}

impl<'a> MapReader<'a> {
    pub fn new(data: &'a [u8], version: u8) -> Self {
        Self {
            inner: ByteReader::new(data),
            version,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn has(&self, field: Gated) -> bool {
        has(self.version, field)
    }

    /// Run `read` only when the version carries `field`.
    pub fn read_gated<T>(
        &mut self,
        field: Gated,
        read: impl FnOnce(&mut Self) -> Result<T, DlmError>,
    ) -> Result<Option<T>, DlmError> {
        if self.has(field) {
            read(self).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Non-negative 16-bit count.
    pub fn read_count_i16(&mut self, what: &'static str) -> Result<usize, DlmError> {
        let count = self.read_i16()?;
        usize::try_from(count).map_err(|_| DlmError::ValueOutOfRange {
            what,
            value: i64::from(count),
            version: self.version,
        })
    }

    pub fn read_rgb(&mut self) -> Result<Rgb, DlmError> {
        Ok(Rgb {
            red: self.read_u8()?,
            green: self.read_u8()?,
            blue: self.read_u8()?,
        })
    }

    /// Graphical element offset: one signed byte before the widening, two
    /// after.
    pub fn read_element_offset(&mut self) -> Result<i16, DlmError> {
        if self.has(Gated::WideElementOffsets) {
            Ok(self.read_i16()?)
        } else {
            Ok(i16::from(self.read_i8()?))
        }
    }
}

impl<'a> Deref for MapReader<'a> {
    type Target = ByteReader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for MapReader<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
