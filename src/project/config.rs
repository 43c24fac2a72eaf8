//! Project configuration.
//!
//! Controls how a project names itself. Loaded from a JSON file or taken
//! from defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProjectError, Result};

/// Display name of a project with no backing file.
pub const DEFAULT_UNTITLED_NAME: &str = "New project";

/// Extension of saved project files, stripped from display names.
pub const DEFAULT_PROJECT_EXTENSION: &str = ".mzmine";

/// Settings for project naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Name shown while the project is not bound to a file.
    pub untitled_name: String,

    /// Suffix removed from the file name when deriving the display name.
    /// Matched exactly, case-sensitive.
    pub project_extension: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            untitled_name: DEFAULT_UNTITLED_NAME.to_string(),
            project_extension: DEFAULT_PROJECT_EXTENSION.to_string(),
        }
    }
}

impl ProjectConfig {
    /// Load and validate a config from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ProjectError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ProjectConfig = serde_json::from_str(&content)?;
        config.validate()?;

        log::debug!("Loaded project config from {}", path.display());
        Ok(config)
    }

    /// Check field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.untitled_name.trim().is_empty() {
            return Err(ProjectError::InvalidConfig {
                reason: "untitled_name must not be empty".to_string(),
            });
        }

        if !self.project_extension.starts_with('.') || self.project_extension.len() < 2 {
            return Err(ProjectError::InvalidConfig {
                reason: format!(
                    "project_extension must start with '.' and name an extension, got '{}'",
                    self.project_extension
                ),
            });
        }

        Ok(())
    }

    /// Derive the display name for a project bound to `location`.
    ///
    /// The location's base name, with the project extension removed when
    /// it is an exact suffix. Anything else is shown unchanged.
    pub fn display_name(&self, location: Option<&Path>) -> String {
        let Some(location) = location else {
            return self.untitled_name.clone();
        };

        let base = location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.to_string_lossy().into_owned());

        match base.strip_suffix(self.project_extension.as_str()) {
            Some(stem) => stem.to_string(),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_values() {
        let config = ProjectConfig::default();
        assert_eq!(config.untitled_name, "New project");
        assert_eq!(config.project_extension, ".mzmine");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_display_name_unbound() {
        let config = ProjectConfig::default();
        assert_eq!(config.display_name(None), "New project");
    }

    #[test]
    fn test_display_name_strips_extension() {
        let config = ProjectConfig::default();
        let path = PathBuf::from("/data/projects/Run1.mzmine");
        assert_eq!(config.display_name(Some(&path)), "Run1");
    }

    #[test]
    fn test_display_name_keeps_other_extension() {
        let config = ProjectConfig::default();
        let path = PathBuf::from("/data/projects/Run1.dat");
        assert_eq!(config.display_name(Some(&path)), "Run1.dat");
    }

    #[test]
    fn test_display_name_suffix_is_case_sensitive() {
        let config = ProjectConfig::default();
        let path = PathBuf::from("Run1.MZMINE");
        assert_eq!(config.display_name(Some(&path)), "Run1.MZMINE");
    }

    #[test]
    fn test_display_name_strips_only_trailing_suffix() {
        let config = ProjectConfig::default();
        let path = PathBuf::from("Run1.mzmine.bak");
        assert_eq!(config.display_name(Some(&path)), "Run1.mzmine.bak");

        let path = PathBuf::from("a.mzmine.mzmine");
        assert_eq!(config.display_name(Some(&path)), "a.mzmine");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"untitled_name": "Untitled session"}}"#).unwrap();

        let config = ProjectConfig::load(file.path()).unwrap();
        assert_eq!(config.untitled_name, "Untitled session");
        assert_eq!(config.project_extension, ".mzmine");
    }

    #[test]
    fn test_load_rejects_bad_extension() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"project_extension": "mzmine"}}"#).unwrap();

        let result = ProjectConfig::load(file.path());
        assert!(matches!(result, Err(ProjectError::InvalidConfig { .. })));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = ProjectConfig::load(file.path());
        assert!(matches!(result, Err(ProjectError::ConfigParse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ProjectConfig::load(Path::new("/nonexistent/mzproject.json"));
        assert!(matches!(result, Err(ProjectError::ConfigRead { .. })));
    }
}
