//! Project Manager
//!
//! Owns the current project of a session together with the listeners
//! that follow it. Replacing the project keeps the listeners.

use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use crate::error::Result;
use crate::project::config::ProjectConfig;
use crate::project::event::{EventDispatcher, ListenerRegistry, ProjectEvent, ProjectListener};
use crate::project::Project;

/// Session owner of the current [`Project`].
#[derive(Debug)]
pub struct ProjectManager {
    listeners: Arc<ListenerRegistry>,
    config: ProjectConfig,
    current: Project,
}

impl Default for ProjectManager {
    fn default() -> Self {
        Self::new(ProjectConfig::default())
    }
}

impl ProjectManager {
    /// Start a session with an empty, unsaved project.
    pub fn new(config: ProjectConfig) -> Self {
        let listeners = Arc::new(ListenerRegistry::new());
        let current = Self::fresh_project(&listeners, &config);
        Self {
            listeners,
            config,
            current,
        }
    }

    fn fresh_project(listeners: &Arc<ListenerRegistry>, config: &ProjectConfig) -> Project {
        let dispatcher: Arc<dyn EventDispatcher> = listeners.clone();
        Project::with_config(dispatcher, config.clone())
    }

    pub fn add_listener(&self, listener: Arc<dyn ProjectListener>) {
        self.listeners.add(listener);
    }

    pub fn remove_listener(&self, listener: &Arc<dyn ProjectListener>) -> bool {
        self.listeners.remove(listener)
    }

    pub fn current_project(&self) -> &Project {
        &self.current
    }

    pub fn current_project_mut(&mut self) -> &mut Project {
        &mut self.current
    }

    /// Replace the current project with an empty one.
    ///
    /// The old project is dropped as it is; its raw data files are not
    /// closed. Use [`close_project`](Self::close_project) to release them.
    pub fn new_project(&mut self) -> &mut Project {
        self.current = Self::fresh_project(&self.listeners, &self.config);
        info!("Started new project");
        self.listeners.fire(&self.current, ProjectEvent::NameChanged);
        &mut self.current
    }

    /// Bind the current project to the file it is saved to.
    pub fn set_project_file(&mut self, file: impl Into<PathBuf>) {
        self.current.set_project_file(Some(file.into()));
    }

    /// Release everything in the current project and start an empty one.
    ///
    /// Every raw data file is closed even if some fail; the first close
    /// error is returned after the new project is in place.
    pub fn close_project(&mut self) -> Result<()> {
        info!("Closing project '{}'", self.current.name());
        let outcome = self.current.clear();
        self.new_project();
        outcome
    }
}
