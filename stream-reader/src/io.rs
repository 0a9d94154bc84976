use std::io::{self, Read, Seek, SeekFrom};

use crate::{Error, Result};

const MAX_PREALLOCATION: usize = 0x10000;

/// Extension trait to allow easier reading of raw stream data
pub(crate) trait ReadCountExt {
    /// Reads up to `count` bytes, stopping early only at the end of the stream
    fn read_up_to(&mut self, count: usize) -> Result<Vec<u8>>;

    /// Reads exactly `N` bytes
    ///
    /// A short read is reported as [`Error::UnexpectedEof`]; the bytes that were available have still
    /// been consumed.
    fn read_count_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_up_to(N)?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::UnexpectedEof {
                expected: N,
                found: bytes.len(),
            })
    }
}

impl<R: Read> ReadCountExt for R {
    fn read_up_to(&mut self, count: usize) -> Result<Vec<u8>> {
        // `count` is caller controlled, cap what gets allocated up front
        let mut data = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        self.by_ref().take(count as u64).read_to_end(&mut data)?;
        log::trace!("read {:#x} of {:#x} requested bytes", data.len(), count);
        Ok(data)
    }
}

/// Measures the total length of a stream, leaving its cursor where it was
pub(crate) fn probe_size<S: Seek>(stream: &mut S) -> io::Result<u64> {
    let position = stream.stream_position()?;
    let size = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(position))?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn read_up_to_stops_at_end() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        assert_eq!(cursor.read_up_to(2).unwrap(), [1, 2]);
        assert_eq!(cursor.read_up_to(5).unwrap(), [3]);
        assert!(cursor.read_up_to(5).unwrap().is_empty());
    }

    #[test]
    fn read_count_array_reports_short_reads() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        assert_eq!(cursor.read_count_array::<2>().unwrap(), [1, 2]);

        match cursor.read_count_array::<4>() {
            Err(Error::UnexpectedEof { expected, found }) => {
                assert_eq!(expected, 4);
                assert_eq!(found, 1);
            }
            other => panic!("expected an end of stream error, got {other:?}"),
        }
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn probe_size_restores_position() {
        let mut cursor = Cursor::new(vec![0u8; 10]);
        cursor.set_position(4);
        assert_eq!(probe_size(&mut cursor).unwrap(), 10);
        assert_eq!(cursor.position(), 4);
    }
}
