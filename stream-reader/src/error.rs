use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors produced while decoding a stream
#[derive(Debug, Error)]
pub enum Error {
    /// The provided stream could not report its position or length
    #[error("Invalid resource type (only seekable streams are supported)")]
    InvalidResourceType(#[source] io::Error),

    /// The stream has already been closed
    #[error("Cannot operate on a closed stream")]
    InvalidStream,

    /// A length or size argument was negative
    #[error("{0} cannot be negative")]
    Domain(&'static str),

    /// The file source could not open the path for reading
    #[error("Unable to open file for reading: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Read access to a field that does not exist
    #[error("Unknown field: {0}")]
    FieldNotFound(String),

    /// Write access to a field that does not exist or is read-only
    #[error("Unknown field: {0}")]
    InvalidArgument(String),

    /// A fixed-width decoder ran into the end of the stream
    #[error("Unexpected end of stream: expected {expected} bytes, found {found}")]
    UnexpectedEof { expected: usize, found: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_error_kinds() {
        assert_eq!(
            Error::InvalidStream.to_string(),
            "Cannot operate on a closed stream"
        );
        assert_eq!(
            Error::Domain("Length").to_string(),
            "Length cannot be negative"
        );
        assert_eq!(
            Error::FieldNotFound("foo".into()).to_string(),
            "Unknown field: foo"
        );

        let err = Error::FileNotFound {
            path: PathBuf::from("missing.bin"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(
            err.to_string(),
            "Unable to open file for reading: missing.bin"
        );
    }

    #[test]
    fn io_errors_convert_transparently() {
        let err: Error = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
