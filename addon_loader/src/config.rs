use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::dependency::LibraryDependency;
use crate::error::ConfigError;

/// Loader settings read from the application TOML file.
///
/// Unrelated tables (such as `[logging]`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoaderConfig {
    #[serde(default)]
    pub loader: LoaderSection,

    /// Addon name to the names of the addons it requires.
    #[serde(default)]
    pub dependencies: LibraryDependency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoaderSection {
    /// Directories searched for addon libraries, in order.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    /// Whether `ADDON_LOADER_PATH` directories are searched before
    /// `search_paths`. Default: true.
    #[serde(default = "default_use_env_path")]
    pub use_env_path: bool,
}

fn default_use_env_path() -> bool {
    true
}

impl Default for LoaderSection {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            use_env_path: default_use_env_path(),
        }
    }
}

impl LoaderConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        content.parse()
    }
}

impl FromStr for LoaderConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}
