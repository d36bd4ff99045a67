use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::PersistenceError;

/// Write a complete new version of `path` into a uniquely named temp file
/// beside it, then rename that over the old one. On any error the previous
/// file is left as it was and the temp file is removed.
pub(crate) fn replace_file<F>(path: &Path, write: F) -> Result<(), PersistenceError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), PersistenceError>,
{
    let name = path.file_name().ok_or_else(|| PersistenceError::Io {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(PersistenceError::io(parent))?;

    let mut prefix = OsString::from(".");
    prefix.push(name);
    prefix.push(".");

    // Dropped (and deleted) on every early return below.
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(PersistenceError::io(parent))?;
    let tmp_path = tmp.path().to_path_buf();

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush().map_err(PersistenceError::io(&tmp_path))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(PersistenceError::io(&tmp_path))?;

    tmp.persist(path).map_err(|e| PersistenceError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
