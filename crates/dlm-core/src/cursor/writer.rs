use super::error::CursorError;

/// Big-endian writer over an owned, growable buffer.
///
/// Writes at the current position overwrite existing bytes and extend the
/// buffer when they run past its end.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
    pos: usize,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), CursorError> {
        if position > self.buf.len() {
            return Err(CursorError::InvalidPosition {
                position,
                len: self.buf.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let overlap = (self.buf.len() - self.pos).min(bytes.len());
        self.buf[self.pos..self.pos + overlap].copy_from_slice(&bytes[..overlap]);
        self.buf.extend_from_slice(&bytes[overlap..]);
        self.pos += bytes.len();
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.write_bytes(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_bytes(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_bytes(&value.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::ByteWriter;
    use crate::cursor::CursorError;

    #[test]
    fn writes_big_endian_integers() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0x0102);
        writer.write_i16(-2);
        writer.write_i32(256);
        writer.write_bool(true);
        writer.write_i8(-1);
        assert_eq!(
            writer.into_inner(),
            vec![0x01, 0x02, 0xff, 0xfe, 0x00, 0x00, 0x01, 0x00, 0x01, 0xff]
        );
    }

    #[test]
    fn seek_back_overwrites_in_place() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xaa);
        let stamp = writer.position();
        writer.write_i32(0);
        writer.write_u8(0xbb);
        let end = writer.position();

        writer.set_position(stamp).unwrap();
        writer.write_i32(0x0102_0304);
        writer.set_position(end).unwrap();
        writer.write_u8(0xcc);

        assert_eq!(writer.as_slice(), &[0xaa, 1, 2, 3, 4, 0xbb, 0xcc]);
    }

    #[test]
    fn overwrite_may_extend_the_buffer() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0xffff);
        writer.set_position(1).unwrap();
        writer.write_u16(0x0102);
        assert_eq!(writer.as_slice(), &[0xff, 0x01, 0x02]);
    }

    #[test]
    fn set_position_past_end_fails() {
        let mut writer = ByteWriter::new();
        writer.write_u8(1);
        let err = writer.set_position(2).unwrap_err();
        assert_eq!(err, CursorError::InvalidPosition { position: 2, len: 1 });
    }
}
