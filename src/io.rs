use alloc::vec::Vec;

use crate::Error;

/// Little-endian reads at absolute offsets within a byte buffer.
pub(crate) trait TableRead {
    fn read_bytes_at(&self, offset: usize, len: usize) -> Result<&[u8], Error>;

    fn read_u16_at(&self, offset: usize) -> Result<u16, Error> {
        let bytes = self.read_bytes_at(offset, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32_at(&self, offset: usize) -> Result<u32, Error> {
        let bytes = self.read_bytes_at(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl TableRead for [u8] {
    fn read_bytes_at(&self, offset: usize, len: usize) -> Result<&[u8], Error> {
        let end = offset.checked_add(len).ok_or(Error::UnexpectedEof)?;
        self.get(offset..end).ok_or(Error::UnexpectedEof)
    }
}

/// Little-endian appends.
pub(crate) trait TableWrite {
    fn write_bytes(&mut self, bytes: &[u8]);

    fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }
}

impl TableWrite for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}
