use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading an addon library.
///
/// None of them is cached: the next load of the same addon starts over.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Addon {addon}: no factory entry point found: {message}")]
    SymbolResolution { addon: String, message: String },

    #[error("Addon {addon}: factory construction returned nothing")]
    FactoryConstruction { addon: String },

    #[error("Addon {addon}: library not found (searched {})", display_paths(.searched))]
    LibraryNotFound { addon: String, searched: Vec<PathBuf> },

    #[error("Addon {addon}: failed to open library at {}: {message}", .path.display())]
    LibraryOpen {
        addon: String,
        path: PathBuf,
        message: String,
    },
}

impl LoadError {
    /// Unique name of the addon whose load failed.
    pub fn addon(&self) -> &str {
        match self {
            LoadError::SymbolResolution { addon, .. }
            | LoadError::FactoryConstruction { addon }
            | LoadError::LibraryNotFound { addon, .. }
            | LoadError::LibraryOpen { addon, .. } => addon,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no search paths".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while reading the loader configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read loader config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse loader config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_searched_paths() {
        let err = LoadError::LibraryNotFound {
            addon: "pinyin".into(),
            searched: vec![PathBuf::from("/a/libpinyin.so"), PathBuf::from("/b/libpinyin.so")],
        };
        assert_eq!(
            err.to_string(),
            "Addon pinyin: library not found (searched /a/libpinyin.so, /b/libpinyin.so)"
        );
        assert_eq!(err.addon(), "pinyin");
    }

    #[test]
    fn not_found_without_search_paths() {
        let err = LoadError::LibraryNotFound {
            addon: "lua".into(),
            searched: Vec::new(),
        };
        assert!(err.to_string().ends_with("(searched no search paths)"));
    }

    #[test]
    fn factory_message_is_stable() {
        let err = LoadError::FactoryConstruction { addon: "lua".into() };
        assert_eq!(err.to_string(), "Addon lua: factory construction returned nothing");
    }
}
