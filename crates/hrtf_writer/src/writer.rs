//! Persist packed HRTF files.
//!
//! Writes are not atomic.  If the write fails partway through, whatever was written stays on disk and it is up to the
//! caller to clean up, or to write to a temporary path and rename.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::packer::PackedHrtf;

#[derive(Debug, thiserror::Error, derive_more::IsVariant)]
pub enum WriteError {
    #[error("Unable to open {} for writing", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write {len} bytes to {destination}")]
    Write {
        destination: String,
        len: usize,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    /// The I/O error which caused this failure.
    pub fn io_error(&self) -> &std::io::Error {
        match self {
            WriteError::Open { source, .. } => source,
            WriteError::Write { source, .. } => source,
        }
    }
}

/// Write all of `packed` to `sink`, then flush it.
///
/// `destination` only names the sink in errors.
pub fn write_to<W: Write>(
    packed: &PackedHrtf,
    sink: &mut W,
    destination: &str,
) -> Result<(), WriteError> {
    let wrap = |source| WriteError::Write {
        destination: destination.to_string(),
        len: packed.len(),
        source,
    };

    sink.write_all(packed.as_bytes()).map_err(wrap)?;
    sink.flush().map_err(wrap)?;
    Ok(())
}

/// Create or truncate the file at `path` and write `packed` to it.
///
/// The file is closed on return whether or not the write succeeded.
pub fn write_file(packed: &PackedHrtf, path: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = path.as_ref();

    let mut file = File::create(path).map_err(|source| WriteError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_to(packed, &mut file, &path.display().to_string())?;

    log::debug!("Wrote {} bytes to {}", packed.len(), path.display());
    Ok(())
}
