//! Project State
//!
//! The in-memory state of one analysis session: registered raw data files,
//! peak lists derived from them, a per-file parameter matrix, and the file
//! the project is saved to.
//!
//! Every mutation is applied first and then reported to the injected
//! [`EventDispatcher`]. Getters return snapshots, never live views.
//!
//! A `Project` has a single owner; mutation goes through `&mut self` and
//! callers that share it across threads must wrap it in their own lock.

pub mod config;
pub mod data;
pub mod event;
pub mod manager;
pub mod parameter;
pub mod registry;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::Result;
use config::ProjectConfig;
use data::{PeakList, RawDataFile};
use event::{EventDispatcher, ProjectEvent};
use parameter::{ParameterMatrix, ParameterRef, ParameterValue};
use registry::{Owned, Registry, Shared};

/// State of one analysis session.
pub struct Project {
    parameters: ParameterMatrix,

    /// Raw data files. The project closes them when they are removed.
    data_files: Registry<dyn RawDataFile, Owned>,

    /// Peak lists. Never closed by the project.
    peak_lists: Registry<dyn PeakList, Shared>,

    /// File backing this project, `None` until first saved.
    project_file: Option<PathBuf>,

    config: ProjectConfig,

    dispatcher: Arc<dyn EventDispatcher>,
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name())
            .field("project_file", &self.project_file)
            .field("data_files", &self.data_files)
            .field("peak_lists", &self.peak_lists)
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Project {
    /// Create an empty, unsaved project that reports to `dispatcher`.
    pub fn new(dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self::with_config(dispatcher, ProjectConfig::default())
    }

    pub fn with_config(dispatcher: Arc<dyn EventDispatcher>, config: ProjectConfig) -> Self {
        Self {
            parameters: ParameterMatrix::default(),
            data_files: Registry::default(),
            peak_lists: Registry::default(),
            project_file: None,
            config,
            dispatcher,
        }
    }

    fn fire(&self, event: ProjectEvent) {
        self.dispatcher.fire(self, event);
    }

    // === Parameters ===

    /// Register a parameter. Re-adding keeps its existing values.
    pub fn add_parameter(&mut self, parameter: &ParameterRef) {
        self.parameters.add(parameter);
    }

    /// Unregister a parameter and discard its values. No-op if absent.
    pub fn remove_parameter(&mut self, parameter: &ParameterRef) {
        if self.parameters.remove(parameter) {
            debug!("Removed parameter '{}'", parameter);
        }
    }

    pub fn has_parameter(&self, parameter: &ParameterRef) -> bool {
        self.parameters.contains(parameter)
    }

    /// Registered parameters. The order is unspecified.
    pub fn parameters(&self) -> Vec<ParameterRef> {
        self.parameters.parameters()
    }

    /// Set the value of `parameter` for `file`, registering the parameter
    /// if needed.
    ///
    /// Values are keyed by `file.name()`: files sharing a name share values.
    pub fn set_parameter_value(
        &mut self,
        parameter: &ParameterRef,
        file: &dyn RawDataFile,
        value: impl Into<ParameterValue>,
    ) {
        self.parameters.set(parameter, file.name(), value.into());
    }

    /// Value of `parameter` for `file`.
    ///
    /// `None` if the parameter is not registered. A registered parameter
    /// with no explicit value for this file yields its default.
    pub fn parameter_value(
        &self,
        parameter: &ParameterRef,
        file: &dyn RawDataFile,
    ) -> Option<ParameterValue> {
        self.parameters.get(parameter, file.name())
    }

    /// Explicitly set values of `parameter`, keyed by file name.
    pub fn parameter_values(&self, parameter: &ParameterRef) -> Option<HashMap<String, ParameterValue>> {
        self.parameters.explicit_values(parameter)
    }

    // === Raw data files ===

    /// Register a raw data file. The same file may be added more than once.
    pub fn add_file(&mut self, file: Arc<dyn RawDataFile>) {
        debug!("Adding raw data file '{}'", file.name());
        self.data_files.push(file);
        self.fire(ProjectEvent::DataFileAdded);
    }

    /// Remove the first registration of `file` and close it.
    ///
    /// Returns `Ok(false)` without closing anything if `file` is not
    /// registered. If closing fails the file is still removed, the event
    /// still fires, and the close error is returned. A listener that panics
    /// on that event unwinds through this call, so the panic reaches the
    /// caller and the close error is lost; the file stays removed either way.
    pub fn remove_file(&mut self, file: &Arc<dyn RawDataFile>) -> Result<bool> {
        let outcome = self.data_files.remove(file);
        match &outcome {
            Ok(false) => return Ok(false),
            Ok(true) => debug!("Removed raw data file '{}'", file.name()),
            Err(e) => warn!("Removed raw data file '{}' but release failed: {}", file.name(), e),
        }
        self.fire(ProjectEvent::DataFileRemoved);
        outcome
    }

    /// Registered raw data files, in insertion order.
    pub fn data_files(&self) -> Vec<Arc<dyn RawDataFile>> {
        self.data_files.snapshot()
    }

    pub fn has_data_file(&self, file: &Arc<dyn RawDataFile>) -> bool {
        self.data_files.contains(file)
    }

    // === Peak lists ===

    pub fn add_peak_list(&mut self, peak_list: Arc<dyn PeakList>) {
        debug!("Adding peak list '{}'", peak_list.name());
        self.peak_lists.push(peak_list);
        self.fire(ProjectEvent::PeakListAdded);
    }

    /// Remove the first registration of `peak_list`. Returns false, without
    /// firing an event, if it was not registered.
    pub fn remove_peak_list(&mut self, peak_list: &Arc<dyn PeakList>) -> bool {
        // Shared entries have no release step, so removal cannot fail. If
        // that ever changes this must propagate the error like remove_file.
        let outcome = self.peak_lists.remove(peak_list);
        debug_assert!(outcome.is_ok(), "shared entries have no release step");
        let removed = matches!(outcome, Ok(true));
        if removed {
            debug!("Removed peak list '{}'", peak_list.name());
            self.fire(ProjectEvent::PeakListRemoved);
        }
        removed
    }

    /// All peak lists, in insertion order.
    pub fn peak_lists(&self) -> Vec<Arc<dyn PeakList>> {
        self.peak_lists.snapshot()
    }

    /// Peak lists derived from `file`, in insertion order.
    pub fn peak_lists_for(&self, file: &dyn RawDataFile) -> Vec<Arc<dyn PeakList>> {
        self.peak_lists.filtered(|pl| pl.has_raw_data_file(file))
    }

    // === Identity ===

    /// File backing this project, or `None` for an unsaved project.
    pub fn project_file(&self) -> Option<&Path> {
        self.project_file.as_deref()
    }

    /// Bind the project to `file`. Fires `NameChanged` on every call, even
    /// when the location is unchanged.
    pub(crate) fn set_project_file(&mut self, file: Option<PathBuf>) {
        self.project_file = file;
        info!("Project is now '{}'", self.name());
        self.fire(ProjectEvent::NameChanged);
    }

    /// Display name: the configured untitled name, or the project file's
    /// base name without the project extension.
    pub fn name(&self) -> String {
        self.config.display_name(self.project_file())
    }

    /// Detach every raw data file and peak list, closing the files and
    /// firing one removal event per entry.
    pub(crate) fn clear(&mut self) -> Result<()> {
        let (files, files_outcome) = self.data_files.drain();
        for _ in &files {
            self.fire(ProjectEvent::DataFileRemoved);
        }

        let (peak_lists, _) = self.peak_lists.drain();
        for _ in &peak_lists {
            self.fire(ProjectEvent::PeakListRemoved);
        }

        debug!(
            "Cleared {} raw data file(s) and {} peak list(s)",
            files.len(),
            peak_lists.len()
        );
        files_outcome
    }
}
