//! CLI Module
//!
//! Command-line interface for inspecting MZproject session state.

pub mod commands;
pub mod files;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::project::parameter::ParameterValue;

/// MZproject - session state for mass-spectrometry analysis projects
#[derive(Parser, Debug)]
#[command(name = "mzproject")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file with project settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a session in memory and print its state
    #[command(name = "describe")]
    Describe {
        /// Raw data file to load (repeatable)
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// Project file the session is bound to
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Parameter declaration, NAME=DEFAULT (repeatable)
        #[arg(long = "param", value_parser = parse_declaration)]
        params: Vec<Declaration>,

        /// Parameter value, NAME:FILE=VALUE (repeatable)
        #[arg(long = "set", value_parser = parse_assignment)]
        values: Vec<Assignment>,
    },

    /// Print the display name of a project saved at PATH
    #[command(name = "name")]
    Name {
        /// Project file path
        path: PathBuf,
    },
}

/// A `--param` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub default: ParameterValue,
}

/// A `--set` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub parameter: String,
    pub file: String,
    pub value: ParameterValue,
}

/// Parse a value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> ParameterValue {
    serde_json::from_str(raw).unwrap_or_else(|_| ParameterValue::String(raw.to_string()))
}

fn parse_declaration(raw: &str) -> std::result::Result<Declaration, String> {
    let (name, default) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=DEFAULT, got '{}'", raw))?;
    if name.is_empty() {
        return Err("parameter name must not be empty".to_string());
    }
    Ok(Declaration {
        name: name.to_string(),
        default: parse_value(default),
    })
}

fn parse_assignment(raw: &str) -> std::result::Result<Assignment, String> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME:FILE=VALUE, got '{}'", raw))?;
    let (parameter, file) = target
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:FILE before '=', got '{}'", target))?;
    if parameter.is_empty() || file.is_empty() {
        return Err("parameter and file names must not be empty".to_string());
    }
    Ok(Assignment {
        parameter: parameter.to_string(),
        file: file.to_string(),
        value: parse_value(value),
    })
}
