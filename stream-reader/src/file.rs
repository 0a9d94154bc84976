use std::{
    fs::{self, File, OpenOptions},
    io,
    path::Path,
};

use crate::{Error, Result, StreamDecoder};

/// A decoder over a file on disk. The file is closed when the decoder is closed or dropped.
pub type FileReader = StreamDecoder<File>;

impl StreamDecoder<File> {
    /// Opens the file at `path` for reading
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, OpenOptions::new().read(true))
    }

    /// Opens the file at `path` with the provided options
    ///
    /// The path must name an existing regular file. Any failure to open it is reported as
    /// [`Error::FileNotFound`].
    pub fn open_with(path: impl AsRef<Path>, options: &OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        let not_found = |source| Error::FileNotFound {
            path: path.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(path).map_err(not_found)?;
        if !metadata.is_file() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        let file = options.open(path).map_err(not_found)?;
        log::debug!("opened {} for reading", path.display());

        Self::new(file)
    }
}
