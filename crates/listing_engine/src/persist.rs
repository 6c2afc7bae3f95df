use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("target has no file name: {}", .0.display())]
    NoFileName(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Make sure `dir` is a directory, creating it and its parents if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => fs::create_dir_all(dir)
            .map_err(|e| PersistError::OutputDir(format!("{}: {e}", dir.display()))),
        Err(err) => Err(PersistError::OutputDir(format!("{}: {err}", dir.display()))),
    }
}

/// Writes whole files through a temp file in the target's directory that is
/// then renamed over the target.
#[derive(Debug, Clone, Default)]
pub struct AtomicFileWriter;

impl AtomicFileWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, target: &Path, content: impl AsRef<[u8]>) -> Result<PathBuf, PersistError> {
        if target.file_name().is_none() {
            return Err(PersistError::NoFileName(target.to_path_buf()));
        }
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        ensure_output_dir(&dir)?;

        let mut staged = NamedTempFile::new_in(&dir)?;
        staged.write_all(content.as_ref())?;
        staged.as_file_mut().sync_all()?;
        staged
            .persist(target)
            .map_err(|e| PersistError::Io(e.error))?;
        Ok(target.to_path_buf())
    }
}
