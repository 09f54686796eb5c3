use super::error::CursorError;

/// Sequential big-endian reader over a borrowed buffer.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute offset. The end of the buffer is a valid position.
    pub fn set_position(&mut self, position: usize) -> Result<(), CursorError> {
        if position > self.data.len() {
            return Err(CursorError::InvalidPosition {
                position,
                len: self.data.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CursorError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(CursorError::OutOfData {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Consume everything up to the end of the buffer.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, CursorError> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    /// One byte, nonzero is `true`.
    pub fn read_bool(&mut self) -> Result<bool, CursorError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, CursorError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, CursorError> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CursorError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, CursorError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::ByteReader;
    use crate::cursor::CursorError;

    #[test]
    fn reads_big_endian_integers() {
        let data = [0x01, 0x02, 0xff, 0xfe, 0x00, 0x00, 0x01, 0x00, 0x80];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 0x0102);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_u32().unwrap(), 0x0000_0100);
        assert_eq!(reader.read_i8().unwrap(), -128);
        assert!(reader.is_empty());
    }

    #[test]
    fn bool_is_any_nonzero_byte() {
        let mut reader = ByteReader::new(&[0, 1, 7]);
        assert!(!reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
    }

    #[test]
    fn read_past_end_fails_without_advancing() {
        let mut reader = ByteReader::new(&[0xaa, 0xbb, 0xcc]);
        reader.read_u8().unwrap();
        let err = reader.read_i32().unwrap_err();
        assert_eq!(
            err,
            CursorError::OutOfData {
                offset: 1,
                needed: 4,
                available: 2,
            }
        );
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u16().unwrap(), 0xbbcc);
    }

    #[test]
    fn set_position_allows_end_but_not_beyond() {
        let mut reader = ByteReader::new(&[1, 2, 3]);
        reader.set_position(3).unwrap();
        assert!(reader.is_empty());
        let err = reader.set_position(4).unwrap_err();
        assert!(matches!(err, CursorError::InvalidPosition { .. }));
        reader.set_position(1).unwrap();
        assert_eq!(reader.read_rest(), &[2, 3]);
    }
}
