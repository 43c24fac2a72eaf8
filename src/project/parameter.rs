//! Project Parameters
//!
//! Parameters are user-defined metadata fields (condition, replicate, ...)
//! that take one value per raw data file. The project stores them in a
//! matrix keyed by parameter identity, then by raw data file name.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Value stored for a (parameter, raw data file) pair.
pub type ParameterValue = serde_json::Value;

/// A named metadata field with a declared default.
pub trait Parameter: fmt::Debug + Send + Sync {
    /// Human-readable name. Not used for lookup.
    fn name(&self) -> &str;

    /// Value reported for raw data files with no explicit value.
    fn default_value(&self) -> ParameterValue;
}

/// Shared handle to a parameter, compared and hashed by identity.
///
/// Two separately created parameters are distinct keys even when their
/// names and defaults are equal; clones of one handle are the same key.
#[derive(Debug, Clone)]
pub struct ParameterRef(Arc<dyn Parameter>);

impl ParameterRef {
    pub fn new(parameter: impl Parameter + 'static) -> Self {
        Self(Arc::new(parameter))
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl std::ops::Deref for ParameterRef {
    type Target = dyn Parameter;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for ParameterRef {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ParameterRef {}

impl Hash for ParameterRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Display for ParameterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name())
    }
}

/// A plain parameter with a fixed default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleParameter {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub default: ParameterValue,
}

impl SimpleParameter {
    pub fn new(name: impl Into<String>, default: impl Into<ParameterValue>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            default: default.into(),
        }
    }
}

impl Parameter for SimpleParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> ParameterValue {
        self.default.clone()
    }
}

/// Parameter -> raw data file name -> value.
///
/// Values are keyed by file *name*: two distinct files that share a name
/// read and write the same slot.
#[derive(Debug, Default)]
pub(crate) struct ParameterMatrix {
    values: HashMap<ParameterRef, HashMap<String, ParameterValue>>,
}

impl ParameterMatrix {
    /// Register `parameter` with no values. Existing values are kept.
    pub fn add(&mut self, parameter: &ParameterRef) {
        self.values.entry(parameter.clone()).or_default();
    }

    /// Returns true if the parameter was registered.
    pub fn remove(&mut self, parameter: &ParameterRef) -> bool {
        self.values.remove(parameter).is_some()
    }

    pub fn contains(&self, parameter: &ParameterRef) -> bool {
        self.values.contains_key(parameter)
    }

    /// Registered parameters, in no particular order.
    pub fn parameters(&self) -> Vec<ParameterRef> {
        self.values.keys().cloned().collect()
    }

    /// Store a value, registering the parameter first if needed.
    pub fn set(&mut self, parameter: &ParameterRef, file_name: &str, value: ParameterValue) {
        self.values
            .entry(parameter.clone())
            .or_default()
            .insert(file_name.to_string(), value);
    }

    /// `None` if the parameter is not registered, otherwise the explicit
    /// value or the parameter's default.
    pub fn get(&self, parameter: &ParameterRef, file_name: &str) -> Option<ParameterValue> {
        let values = self.values.get(parameter)?;
        Some(
            values
                .get(file_name)
                .cloned()
                .unwrap_or_else(|| parameter.default_value()),
        )
    }

    pub fn explicit_values(&self, parameter: &ParameterRef) -> Option<HashMap<String, ParameterValue>> {
        self.values.get(parameter).cloned()
    }
}
