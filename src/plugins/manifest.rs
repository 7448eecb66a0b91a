//! Plugin manifest definition

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::application::errors::ImportError;

/// Contents of a plugin file.
///
/// ```yaml
/// module: presence   # catalog key, defaults to the file stem
/// interval: 60000    # tasks only, milliseconds
/// once: true         # events only
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PluginManifest {
    /// Catalog key of the module to load
    #[serde(default)]
    pub module: Option<String>,

    /// Override the task repeat period (ms)
    #[serde(default)]
    pub interval: Option<u64>,

    /// Override whether an event listener runs once
    #[serde(default)]
    pub once: Option<bool>,
}

impl PluginManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ImportError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, ImportError> {
        // An empty file means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ImportError::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Catalog key, falling back to the file stem
    pub fn module_key(&self, path: &Path) -> Option<String> {
        self.module.clone().or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
    }
}
