//! Position-tracking byte reader for the .osr binary layout.

use crate::error::{Error, Result};

/// Sequential little-endian reader over a replay file's bytes.
///
/// Besides the primitive reads it knows the two .osr composites: the
/// nullable length-prefixed string (flag byte + ULEB128 length) and
/// the length-prefixed byte array.
pub struct ReplayBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReplayBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(count).ok_or(Error::TruncatedReplay {
            position: self.pos,
            count,
            length: self.data.len(),
        })?;
        if end > self.data.len() {
            return Err(Error::TruncatedReplay {
                position: self.pos,
                count,
                length: self.data.len(),
            });
        }
        let result = &self.data[self.pos..end];
        self.pos = end;
        Ok(result)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.read_bytes(8)?;
        Ok(i64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    fn read_uleb128(&mut self) -> Result<u32> {
        let mut value = 0u32;
        let mut shift = 0;
        loop {
            let byte = self.read_u8()?;
            value |= ((byte & 0x7f) as u32) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            // A u32 length fits in five 7-bit groups; anything longer
            // is corrupt data, not a longer length.
            if shift >= 32 {
                return Err(Error::ReplayDecode(
                    "over-long ULEB128 length prefix".to_string(),
                ));
            }
        }
    }

    /// Nullable string: a 0x00 flag byte means absent, 0x0b means a
    /// ULEB128 byte length followed by UTF-8 data.
    pub fn read_string(&mut self) -> Result<Option<String>> {
        match self.read_u8()? {
            0x00 => Ok(None),
            0x0b => {
                let length = self.read_uleb128()? as usize;
                let bytes = self.read_bytes(length)?;
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|e| Error::ReplayDecode(format!("invalid UTF-8 string: {e}")))?;
                Ok(Some(text))
            }
            flag => Err(Error::ReplayDecode(format!(
                "invalid string flag byte {flag:#04x}"
            ))),
        }
    }

    /// Byte array prefixed by a signed 32-bit length; non-positive
    /// lengths mean absent.
    pub fn read_byte_array(&mut self) -> Result<Option<&'a [u8]>> {
        let length = self.read_i32()?;
        if length <= 0 {
            return Ok(None);
        }
        Ok(Some(self.read_bytes(length as usize)?))
    }
}
