//! CLI Command Implementations

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use log::info;

use crate::cli::files::PathDataFile;
use crate::cli::{Assignment, Declaration};
use crate::project::config::ProjectConfig;
use crate::project::data::RawDataFile;
use crate::project::manager::ProjectManager;
use crate::project::parameter::{ParameterRef, ParameterValue, SimpleParameter};
use crate::project::Project;

/// Build a session from the given inputs and print its state.
pub fn describe(
    config: ProjectConfig,
    files: &[PathBuf],
    project_file: Option<&Path>,
    declarations: &[Declaration],
    assignments: &[Assignment],
) -> Result<()> {
    let mut manager = ProjectManager::new(config);
    build_session(&mut manager, files, project_file, declarations, assignments)?;
    print!("{}", render(manager.current_project(), declarations, assignments));
    manager.close_project()?;
    Ok(())
}

/// Print the display name a project saved at `path` would have.
pub fn name(config: ProjectConfig, path: &Path) -> Result<()> {
    println!("{}", config.display_name(Some(path)));
    Ok(())
}

/// Populate the current project of `manager`.
///
/// Parameters are declared in argument order; `--set` values for
/// undeclared parameters register them with a null default.
pub fn build_session(
    manager: &mut ProjectManager,
    files: &[PathBuf],
    project_file: Option<&Path>,
    declarations: &[Declaration],
    assignments: &[Assignment],
) -> Result<Vec<(String, ParameterRef)>> {
    if let Some(path) = project_file {
        manager.set_project_file(path);
    }

    let project = manager.current_project_mut();
    for path in files {
        info!("Loading raw data file: {}", path.display());
        project.add_file(Arc::new(PathDataFile::new(path)));
    }

    let mut parameters: Vec<(String, ParameterRef)> = Vec::new();
    for decl in declarations {
        if parameters.iter().any(|(name, _)| name == &decl.name) {
            bail!("parameter '{}' declared more than once", decl.name);
        }
        let parameter = ParameterRef::new(SimpleParameter::new(&decl.name, decl.default.clone()));
        project.add_parameter(&parameter);
        parameters.push((decl.name.clone(), parameter));
    }

    let by_name: HashMap<String, Arc<dyn RawDataFile>> = project
        .data_files()
        .into_iter()
        .map(|f| (f.name().to_string(), f))
        .collect();

    for assignment in assignments {
        let Some(file) = by_name.get(&assignment.file) else {
            bail!(
                "cannot set '{}' for '{}': no such raw data file",
                assignment.parameter,
                assignment.file
            );
        };

        let existing = parameters
            .iter()
            .find(|(name, _)| name == &assignment.parameter)
            .map(|(_, p)| p.clone());
        let parameter = match existing {
            Some(p) => p,
            None => {
                let p = ParameterRef::new(SimpleParameter::new(
                    &assignment.parameter,
                    ParameterValue::Null,
                ));
                parameters.push((assignment.parameter.clone(), p.clone()));
                p
            }
        };

        project.set_parameter_value(&parameter, file.as_ref(), assignment.value.clone());
    }

    Ok(parameters)
}

/// Render the state of `project` as printed by `describe`.
pub fn render(
    project: &Project,
    declarations: &[Declaration],
    assignments: &[Assignment],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Project: {}\n", project.name()));
    match project.project_file() {
        Some(path) => out.push_str(&format!("Location: {}\n", path.display())),
        None => out.push_str("Location: (unsaved)\n"),
    }

    let files = project.data_files();
    out.push_str(&format!("Raw data files ({}):\n", files.len()));
    for file in &files {
        out.push_str(&format!("    {}\n", file.name()));
    }

    let mut parameters = project.parameters();
    // The project keeps no order; list declared parameters first, then by name.
    let rank = |p: &ParameterRef| {
        let declared = declarations.iter().position(|d| d.name == p.name());
        let assigned = || {
            assignments
                .iter()
                .position(|a| a.parameter == p.name())
                .map(|i| declarations.len() + i)
        };
        declared.or_else(assigned).unwrap_or(usize::MAX)
    };
    parameters.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.name().cmp(b.name())));

    out.push_str(&format!("Parameters ({}):\n", parameters.len()));
    for parameter in &parameters {
        out.push_str(&format!(
            "    {} (default {})\n",
            parameter.name(),
            parameter.default_value()
        ));
        let explicit = project.parameter_values(parameter).unwrap_or_default();
        for file in &files {
            let Some(value) = project.parameter_value(parameter, file.as_ref()) else {
                continue;
            };
            let marker = if explicit.contains_key(file.name()) { "" } else { " (default)" };
            out.push_str(&format!("        {} = {}{}\n", file.name(), value, marker));
        }
    }

    out
}
