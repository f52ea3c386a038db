//! Cover images are opaque bytes here. These helpers only move them between
//! files and memory; decoding is left to whatever renders them.

use std::fs;
use std::path::Path;

use crate::error::{Result, TrackerError};

/// Read an encoded image file into memory.
pub fn read_cover_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| TrackerError::Cover {
        path: path.to_path_buf(),
        source,
    })
}

/// Write cover bytes back out, replacing any existing file.
pub fn write_cover_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, bytes).map_err(|source| TrackerError::Cover {
        path: path.to_path_buf(),
        source,
    })
}
