use std::io::{Read, Seek};

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::StreamDecoder;
use crate::{endian::Endianness, Result};

/// Renders each byte as two lowercase hex digits, after passing it through `arrange`
fn hex_string(bytes: &[u8], arrange: impl Fn(u8) -> u8) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02x}", arrange(*byte)))
        .collect()
}

/// Decodes a UTF-16 payload as returned by [`StreamDecoder::read_string16`]
///
/// [`Endianness::Native`] is taken as machine order. A dangling odd byte is ignored and unpaired
/// surrogates become `U+FFFD`.
pub fn decode_utf16(bytes: &[u8], order: Endianness) -> String {
    let units = bytes.chunks_exact(2).map(|pair| match order.resolve() {
        Endianness::Big => BigEndian::read_u16(pair),
        _ => LittleEndian::read_u16(pair),
    });

    char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

impl<R: Read + Seek> StreamDecoder<R> {
    /// Reads `length` bytes as an 8-bit string, removing trailing NUL bytes
    pub fn read_string8(&mut self, length: i64) -> Result<Vec<u8>> {
        self.read_string8_trimmed(length, b"\0")
    }

    /// Reads `length` bytes as an 8-bit string, removing any trailing bytes found in `strip_chars`
    pub fn read_string8_trimmed(&mut self, length: i64, strip_chars: &[u8]) -> Result<Vec<u8>> {
        let mut value = self.read(length)?;
        let kept = value
            .iter()
            .rposition(|byte| !strip_chars.contains(byte))
            .map_or(0, |index| index + 1);
        value.truncate(kept);
        Ok(value)
    }

    /// Reads `length` bytes as a 16-bit string, removing terminating `00 00` pairs
    ///
    /// If the data starts with a byte order mark, `order` is set to the order it declares and, when
    /// `trim_order` is set, the mark is removed. Without a mark `order` is left as the caller passed
    /// it. The bytes are returned as read; use [`decode_utf16`] to turn them into text.
    pub fn read_string16(
        &mut self,
        length: i64,
        order: &mut Endianness,
        trim_order: bool,
    ) -> Result<Vec<u8>> {
        let bytes = self.read(length)?;
        if bytes.len() < 2 {
            return Ok(Vec::new());
        }

        let mut value = bytes.as_slice();

        let detected = match value[..2] {
            [0xfe, 0xff] => Some(Endianness::Big),
            [0xff, 0xfe] => Some(Endianness::Little),
            _ => None,
        };

        if let Some(detected) = detected {
            *order = detected;
            if trim_order {
                value = &value[2..];
            }
        }

        while let Some(rest) = value.strip_suffix(&[0, 0]) {
            value = rest;
        }

        Ok(value.to_vec())
    }

    /// Reads `length` bytes of UTF-16 text, honoring and removing a leading byte order mark
    pub fn read_utf16_string(&mut self, length: i64) -> Result<String> {
        let mut order = Endianness::Native;
        let bytes = self.read_string16(length, &mut order, true)?;
        Ok(decode_utf16(&bytes, order))
    }

    /// Reads `length` bytes as a hexadecimal string, high nibble first
    pub fn read_hhex(&mut self, length: i64) -> Result<String> {
        let bytes = self.read(length)?;
        Ok(hex_string(&bytes, |byte| byte))
    }

    /// Reads `length` bytes as a hexadecimal string, low nibble first
    pub fn read_lhex(&mut self, length: i64) -> Result<String> {
        let bytes = self.read(length)?;
        Ok(hex_string(&bytes, |byte| byte.rotate_left(4)))
    }

    /// Reads a 16-byte GUID and renders it as `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
    ///
    /// The first three fields are stored little-endian, the last eight bytes as-is.
    pub fn read_guid(&mut self) -> Result<String> {
        let bytes = self.read_fixed::<16>()?;

        let data1 = LittleEndian::read_u32(&bytes[0..4]);
        let data2 = LittleEndian::read_u16(&bytes[4..6]);
        let data3 = LittleEndian::read_u16(&bytes[6..8]);
        let data4 = hex_string(&bytes[8..], |byte| byte);

        Ok(format!(
            "{data1:08x}-{data2:04x}-{data3:04x}-{}-{}",
            &data4[..4],
            &data4[4..]
        ))
    }
}
