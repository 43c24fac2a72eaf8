//! Data Source and Result Set Interfaces
//!
//! Raw data files and peak lists are implemented elsewhere; the project
//! only needs the small capabilities below to track them.

use std::fmt;
use std::io;

/// A loaded raw dataset registered with a project.
///
/// The project that a file is added to becomes its releaser: once a file
/// is removed through [`Project::remove_file`](crate::Project::remove_file)
/// it is closed there, and callers must not close it themselves.
pub trait RawDataFile: fmt::Debug + Send + Sync {
    /// Stable name of the file. Parameter values are keyed by this name.
    fn name(&self) -> &str;

    /// Release the resources held by this file. Must be idempotent.
    fn close(&self) -> io::Result<()>;
}

/// A derived analysis result computed from one or more raw data files.
pub trait PeakList: fmt::Debug + Send + Sync {
    /// Name of the peak list, for display.
    fn name(&self) -> &str;

    /// Whether `file` is one of the raw data files this list was derived from.
    fn has_raw_data_file(&self, file: &dyn RawDataFile) -> bool;
}
