//! Local copy of the remote table.
//!
//! Holds the verbatim payload of the last successful fetch. The file is only
//! ever replaced whole: a new payload is written to a temporary file next to
//! the target and renamed over it, so readers see either the old or the new
//! content and never a mix.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the cached bytes, `None` if there is no cache yet
    pub fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::FileUnreadable {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Open the cache for reading
    pub fn open(&self) -> Result<File> {
        File::open(&self.path).map_err(|source| Error::FileUnreadable {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the cache with `text` unless it already holds exactly that.
    ///
    /// Returns `true` if the file was written.
    pub fn write_if_changed(&self, text: &str) -> Result<bool> {
        // An unreadable cache is treated as different and overwritten
        let unchanged = match self.read() {
            Ok(Some(existing)) => existing == text.as_bytes(),
            Ok(None) => false,
            Err(e) => {
                debug!("Existing cache unreadable, replacing: {}", e);
                false
            }
        };

        if unchanged {
            debug!("Cache at {} is up to date", self.path.display());
            return Ok(false);
        }

        self.replace(text.as_bytes())
            .map_err(|source| Error::CacheWrite {
                path: self.path.clone(),
                source,
            })?;
        info!("Saved positional table to {}", self.path.display());
        Ok(true)
    }

    fn replace(&self, bytes: &[u8]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
