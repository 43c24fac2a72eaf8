//! MZproject - Session Project State
//!
//! Holds the state of one mass-spectrometry analysis session:
//! - Raw data files loaded into the session (closed by the project on removal)
//! - Peak lists derived from those files
//! - A per-file matrix of user-defined parameters with default fallback
//! - The project file the session is saved to, which determines its name
//!
//! # Architecture
//!
//! A [`Project`] applies each mutation and then reports it to an injected
//! [`EventDispatcher`]. The [`ProjectManager`] owns the current project and
//! a [`ListenerRegistry`] that outlives project replacement.

pub mod cli;
pub mod error;
pub mod project;

pub use error::{ProjectError, Result};
pub use project::config::ProjectConfig;
pub use project::data::{PeakList, RawDataFile};
pub use project::event::{
    EventDispatcher, ListenerRegistry, NullDispatcher, ProjectEvent, ProjectListener,
};
pub use project::manager::ProjectManager;
pub use project::parameter::{Parameter, ParameterRef, ParameterValue, SimpleParameter};
pub use project::Project;
