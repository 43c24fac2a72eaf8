//! Path-backed raw data files used by the CLI.
//!
//! These only remember where the data lives; nothing is read from disk.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::project::data::RawDataFile;

/// A raw data file known by its path. Its name is the path's base name.
#[derive(Debug)]
pub struct PathDataFile {
    path: PathBuf,
    name: String,
    closed: AtomicBool,
}

impl PathDataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            path,
            name,
            closed: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl RawDataFile for PathDataFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn close(&self) -> io::Result<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("Closed raw data file {}", self.path.display());
        }
        Ok(())
    }
}
