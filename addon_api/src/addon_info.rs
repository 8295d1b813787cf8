use serde::Deserialize;

/// Describes an addon as known to the addon manager.
///
/// The loader only reads it. Where the descriptor comes from (a manifest file,
/// a built-in table) is up to the manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddonInfo {
    /// Unique name of the addon. Used as registry key, as the library file stem
    /// and as the suffix of the versioned entry symbol.
    pub unique_name: String,

    /// Kind of loader responsible for this addon, e.g. "SharedLibrary".
    #[serde(default = "default_addon_type", rename = "type")]
    pub addon_type: String,

    /// Human readable name. Defaults to the unique name when absent.
    #[serde(default)]
    pub name: Option<String>,

    /// Optional version string of the addon.
    #[serde(default)]
    pub version: Option<String>,
}

/// Default value for the `type` field ("SharedLibrary").
fn default_addon_type() -> String {
    "SharedLibrary".to_string()
}

impl AddonInfo {
    /// Creates a shared-library addon descriptor with only a unique name.
    pub fn new(unique_name: impl Into<String>) -> Self {
        Self {
            unique_name: unique_name.into(),
            addon_type: default_addon_type(),
            name: None,
            version: None,
        }
    }

    pub fn with_type(mut self, addon_type: impl Into<String>) -> Self {
        self.addon_type = addon_type.into();
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.unique_name)
    }
}
