use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};

use crate::{
    endian::{is_little_endian, Endianness},
    io::{probe_size, ReadCountExt},
    Error, Result,
};

mod field;
mod text;

pub use field::{Field, FieldValue};
pub use text::decode_utf16;

/// Typed, offset-tracked access to a seekable byte stream
///
/// The decoder owns the stream and measures its length once, when it is created. Every read starts
/// at the stream's cursor and moves it forward by the number of bytes consumed. Reads can be made in
/// little-endian, big-endian or machine order:
///
/// ```
/// use std::io::Cursor;
/// use stream_reader::StreamDecoder;
///
/// let mut decoder = StreamDecoder::new(Cursor::new(vec![0x12u8, 0x34, 0x12, 0x34])).unwrap();
/// assert_eq!(decoder.read_uint16_le().unwrap(), 0x3412);
/// assert_eq!(decoder.read_uint16_be().unwrap(), 0x1234);
/// assert!(!decoder.available().unwrap());
/// ```
///
/// Once [`StreamDecoder::close`] has been called, every operation that needs the stream fails with
/// [`Error::InvalidStream`].
#[derive(Debug)]
pub struct StreamDecoder<R> {
    /// The wrapped stream, `None` once closed
    stream: Option<R>,

    /// Length of the stream in bytes, as measured at construction
    size: u64,
}

/// Declares `_le` and `_be` readers for each listed type
macro_rules! decl_ordered {
    ($($name:ident => $t:ident, $width:literal);* $(;)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Reads ", $width, " bytes of little-endian ordered data as `", stringify!($t), "`")]
                pub fn [<read_ $name _le>](&mut self) -> Result<$t> {
                    let bytes = self.read_fixed::<{ $width }>()?;
                    Ok(LittleEndian::[<read_ $t>](&bytes))
                }

                #[doc = concat!("Reads ", $width, " bytes of big-endian ordered data as `", stringify!($t), "`")]
                pub fn [<read_ $name _be>](&mut self) -> Result<$t> {
                    let bytes = self.read_fixed::<{ $width }>()?;
                    Ok(BigEndian::[<read_ $t>](&bytes))
                }
            )*
        }
    }
}

/// Declares machine ordered readers for each listed type
macro_rules! decl_native {
    ($($name:ident => $t:ident, $width:literal);* $(;)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Reads ", $width, " bytes of machine ordered data as `", stringify!($t), "`")]
                pub fn [<read_ $name>](&mut self) -> Result<$t> {
                    let bytes = self.read_fixed::<{ $width }>()?;
                    Ok(NativeEndian::[<read_ $t>](&bytes))
                }
            )*
        }
    }
}

impl<R: Read + Seek> StreamDecoder<R> {
    /// Wraps `stream`, measuring its length without moving its cursor
    ///
    /// Fails with [`Error::InvalidResourceType`] if the stream cannot report its position or be
    /// seeked to its end.
    pub fn new(mut stream: R) -> Result<Self> {
        let size = probe_size(&mut stream).map_err(Error::InvalidResourceType)?;
        log::debug!("wrapped stream of {size:#x} bytes");

        Ok(Self {
            stream: Some(stream),
            size,
        })
    }

    /// Gets the wrapped stream, failing if it has been closed
    fn stream(&mut self) -> Result<&mut R> {
        self.stream.as_mut().ok_or(Error::InvalidStream)
    }

    /// Reads exactly `N` bytes, as needed by the fixed-width decoders
    fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.stream()?.read_count_array::<N>()
    }

    /// Returns a reference to the wrapped stream, or `None` if it has been closed
    pub fn get_ref(&self) -> Option<&R> {
        self.stream.as_ref()
    }

    /// Unwraps the decoder, returning the stream if it is still open
    pub fn into_inner(self) -> Option<R> {
        self.stream
    }

    /// Whether [`StreamDecoder::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Closes the stream. Closing an already closed decoder has no effect.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            log::debug!("closed stream");
        }
    }

    /// Moves the cursor back to the start of the stream
    pub fn reset(&mut self) -> Result<()> {
        self.stream()?.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// The current cursor position
    pub fn offset(&mut self) -> Result<u64> {
        Ok(self.stream()?.stream_position()?)
    }

    /// Moves the cursor to `offset`
    ///
    /// A negative `offset` is counted from the end of the stream, so `-4` points at the last four
    /// bytes. The position is not clamped: moving past the end is allowed, later reads just return
    /// less data.
    pub fn set_offset(&mut self, offset: i64) -> Result<()> {
        let size = self.size;
        let stream = self.stream()?;

        let position = if offset < 0 {
            (size as i64).saturating_add(offset)
        } else {
            offset
        };

        let position = u64::try_from(position).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("offset {offset} points before the start of the stream"),
            )
        })?;

        log::trace!("seeking to {position:#x}");
        stream.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Length of the stream in bytes, as measured when the decoder was created
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether the cursor is still before the end of the stream
    pub fn available(&mut self) -> Result<bool> {
        Ok(self.offset()? < self.size)
    }

    /// Number of bytes between the cursor and the end of the stream
    pub fn remaining(&mut self) -> Result<u64> {
        Ok(self.size.saturating_sub(self.offset()?))
    }

    /// Byte order of the running machine
    pub fn endianness(&self) -> Endianness {
        Endianness::machine()
    }

    /// Moves the cursor `size` bytes forward
    pub fn skip(&mut self, size: i64) -> Result<()> {
        if size < 0 {
            return Err(Error::Domain("Size"));
        }

        let stream = self.stream()?;
        if size == 0 {
            return Ok(());
        }

        log::trace!("skipping {size:#x} bytes");
        stream.seek(SeekFrom::Current(size))?;
        Ok(())
    }

    /// Reads up to `length` bytes
    ///
    /// Fewer bytes are returned only when the end of the stream is reached. Reading `0` bytes never
    /// touches the stream.
    pub fn read(&mut self, length: i64) -> Result<Vec<u8>> {
        if length < 0 {
            return Err(Error::Domain("Length"));
        }

        if length == 0 {
            return Ok(Vec::new());
        }

        let count = usize::try_from(length).unwrap_or(usize::MAX);
        self.stream()?.read_up_to(count)
    }

    /// Reads 1 byte as a signed 8-bit integer
    pub fn read_int8(&mut self) -> Result<i8> {
        let [byte] = self.read_fixed::<1>()?;
        Ok(byte as i8)
    }

    /// Reads 1 byte as an unsigned 8-bit integer
    pub fn read_uint8(&mut self) -> Result<u8> {
        let [byte] = self.read_fixed::<1>()?;
        Ok(byte)
    }

    decl_ordered! {
        int16 => i16, 2;
        uint16 => u16, 2;
        int32 => i32, 4;
        uint32 => u32, 4;
        int64 => i64, 8;
        uint64 => u64, 8;
        float => f32, 4;
        double => f64, 8;
    }

    decl_native! {
        int16 => i16, 2;
        uint16 => u16, 2;
        int32 => i32, 4;
        uint32 => u32, 4;
    }

    /// Reads 3 bytes in `order` and widens them into a machine ordered 32-bit value
    ///
    /// The pad byte goes to the low end of the machine word, so the 24 bits end up in the top of
    /// the 32-bit value and the sign bit lands on bit 31.
    fn read_int24_padded(&mut self, order: Endianness) -> Result<[u8; 4]> {
        let mut raw = self.read_fixed::<3>()?;
        order.to_machine(&mut raw);

        Ok(if is_little_endian() {
            [0, raw[0], raw[1], raw[2]]
        } else {
            [raw[0], raw[1], raw[2], 0]
        })
    }

    /// Reads 3 bytes of little-endian ordered data as a signed 24-bit integer, shifted into the
    /// top of an `i32`
    pub fn read_int24_le(&mut self) -> Result<i32> {
        let bytes = self.read_int24_padded(Endianness::Little)?;
        Ok(NativeEndian::read_i32(&bytes))
    }

    /// Reads 3 bytes of big-endian ordered data as a signed 24-bit integer, shifted into the top
    /// of an `i32`
    pub fn read_int24_be(&mut self) -> Result<i32> {
        let bytes = self.read_int24_padded(Endianness::Big)?;
        Ok(NativeEndian::read_i32(&bytes))
    }

    /// Reads 3 bytes of machine ordered data as a signed 24-bit integer, shifted into the top of
    /// an `i32`
    pub fn read_int24(&mut self) -> Result<i32> {
        let bytes = self.read_int24_padded(Endianness::Native)?;
        Ok(NativeEndian::read_i32(&bytes))
    }

    /// Reads 3 bytes of little-endian ordered data as an unsigned 24-bit integer, shifted into the
    /// top of a `u32`
    pub fn read_uint24_le(&mut self) -> Result<u32> {
        let bytes = self.read_int24_padded(Endianness::Little)?;
        Ok(NativeEndian::read_u32(&bytes))
    }

    /// Reads 3 bytes of big-endian ordered data as an unsigned 24-bit integer, shifted into the top
    /// of a `u32`
    pub fn read_uint24_be(&mut self) -> Result<u32> {
        let bytes = self.read_int24_padded(Endianness::Big)?;
        Ok(NativeEndian::read_u32(&bytes))
    }

    /// Reads 3 bytes of machine ordered data as an unsigned 24-bit integer, shifted into the top of
    /// a `u32`
    pub fn read_uint24(&mut self) -> Result<u32> {
        let bytes = self.read_int24_padded(Endianness::Native)?;
        Ok(NativeEndian::read_u32(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn decoder(bytes: &[u8]) -> StreamDecoder<Cursor<Vec<u8>>> {
        StreamDecoder::new(Cursor::new(bytes.to_vec())).unwrap()
    }

    #[test]
    fn construction_keeps_the_cursor() {
        let mut cursor = Cursor::new(vec![0u8; 32]);
        cursor.set_position(7);

        let mut decoder = StreamDecoder::new(cursor).unwrap();
        assert_eq!(decoder.size(), 32);
        assert_eq!(decoder.offset().unwrap(), 7);
    }

    #[test]
    fn size_is_fixed_at_construction() {
        let mut decoder = decoder(&[1, 2, 3, 4]);
        decoder.set_offset(10).unwrap();
        assert_eq!(decoder.size(), 4);
        assert_eq!(decoder.offset().unwrap(), 10);
        assert!(decoder.read(4).unwrap().is_empty());
    }

    #[test]
    fn negative_offsets_count_from_the_end() {
        let mut decoder = decoder(&[0, 1, 2, 3, 4, 5, 6, 7]);
        decoder.set_offset(-3).unwrap();
        assert_eq!(decoder.offset().unwrap(), 5);
        assert_eq!(decoder.read_uint8().unwrap(), 5);

        assert!(matches!(decoder.set_offset(-9), Err(Error::Io(_))));
    }

    #[test]
    fn twenty_four_bit_values_are_top_aligned() {
        let mut decoder = decoder(&[0x01, 0x02, 0x03, 0x01, 0x02, 0x03, 0xff, 0xff, 0xff]);
        assert_eq!(decoder.read_uint24_le().unwrap(), 0x0302_0100);
        assert_eq!(decoder.read_uint24_be().unwrap(), 0x0102_0300);
        assert_eq!(decoder.read_int24_le().unwrap(), -256);
    }

    #[test]
    fn fixed_width_decoders_reject_short_reads() {
        let mut decoder = decoder(&[0x01, 0x02, 0x03]);
        assert!(matches!(
            decoder.read_uint32_le(),
            Err(Error::UnexpectedEof {
                expected: 4,
                found: 3
            })
        ));
        assert!(matches!(
            decoder.read_uint8(),
            Err(Error::UnexpectedEof {
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn sixty_four_bit_values_keep_full_precision() {
        let mut decoder = decoder(&[0xff; 16]);
        assert_eq!(decoder.read_int64_le().unwrap(), -1);
        assert_eq!(decoder.read_uint64_be().unwrap(), u64::MAX);
    }

    #[test]
    fn into_inner_returns_the_stream_until_closed() {
        let open = decoder(&[1, 2]);
        assert!(open.get_ref().is_some());
        assert_eq!(open.into_inner().unwrap().into_inner(), [1, 2]);

        let mut closed = decoder(&[1, 2]);
        closed.close();
        assert!(closed.is_closed());
        assert!(closed.into_inner().is_none());
    }

    #[test]
    fn skip_checks_the_stream_even_for_zero() {
        let mut closed = decoder(b"0123");
        closed.close();

        assert!(matches!(closed.skip(-1), Err(Error::Domain("Size"))));
        assert!(matches!(closed.skip(0), Err(Error::InvalidStream)));
        assert!(matches!(closed.skip(2), Err(Error::InvalidStream)));
    }
}
