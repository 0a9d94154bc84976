//! Typed decoding of seekable byte streams
//!
//! [`StreamDecoder`] wraps anything that is [`Read`](std::io::Read) + [`Seek`](std::io::Seek) and
//! reads fixed-width integers, IEEE 754 floats, NUL padded and BOM prefixed strings, hex dumps and
//! GUIDs from it, with the byte order chosen per read.
//!
//! ```
//! use std::io::Cursor;
//! use stream_reader::StreamDecoder;
//!
//! let mut decoder = StreamDecoder::new(Cursor::new(b"0123456789012345".to_vec())).unwrap();
//! assert_eq!(decoder.read_guid().unwrap(), "33323130-3534-3736-3839-303132333435");
//! ```

pub mod decoder;
pub mod endian;
pub mod error;
pub mod file;

mod io;

pub use decoder::{decode_utf16, Field, FieldValue, StreamDecoder};
pub use endian::{is_big_endian, is_little_endian, Endianness};
pub use error::{Error, Result};
pub use file::FileReader;
