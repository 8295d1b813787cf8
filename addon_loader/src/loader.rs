//! Loads each addon library at most once and keeps its factory.

use std::collections::{HashMap, HashSet};

use addon_api::{AddonInfo, ManagerContext};
use liblogger::{log_debug, log_info};

use crate::config::LoaderConfig;
use crate::dependency::{self, LibraryDependency};
use crate::error::LoadError;
use crate::factory::{FactoryRef, LibraryFactoryResolver};
use crate::native::{Libloading, NativeModule};
use crate::path_resolver::{AddonPathResolver, StandardPath};

/// Type string of [`SharedLibraryLoader`], matched against `AddonInfo::addon_type`.
pub const SHARED_LIBRARY_LOADER_TYPE: &str = "SharedLibrary";

/// A kind of addon loader.
///
/// The addon manager holds one loader per kind and routes each descriptor to
/// the loader whose `loader_type` equals the descriptor's `addon_type`.
pub trait AddonLoader {
    fn loader_type(&self) -> &'static str;

    /// Returns the factory for `info`, loading it if needed.
    fn load(&mut self, info: &AddonInfo, manager: ManagerContext) -> Result<FactoryRef<'_>, LoadError>;
}

/// Loader for addons shipped as shared libraries.
///
/// Successfully loaded libraries stay mapped until the loader is dropped.
/// Failed loads leave nothing behind and are attempted again in full on the
/// next call. No internal locking: `load` takes `&mut self`.
pub struct SharedLibraryLoader<N: NativeModule = Libloading, P: AddonPathResolver = StandardPath> {
    native: N,
    paths: P,
    registry: HashMap<String, LibraryFactoryResolver<N::Handle>>,
    dependency: LibraryDependency,
}

impl SharedLibraryLoader {
    /// Loader over `libloading`, searching the `ADDON_LOADER_PATH` directories.
    pub fn new(dependency: LibraryDependency) -> Self {
        let paths = StandardPath::from_config(&Default::default());
        Self::with_parts(dependency, Libloading, paths)
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::with_parts(
            config.dependencies.clone(),
            Libloading,
            StandardPath::from_config(&config.loader),
        )
    }
}

impl<N: NativeModule, P: AddonPathResolver> SharedLibraryLoader<N, P> {
    pub fn with_parts(dependency: LibraryDependency, native: N, paths: P) -> Self {
        Self {
            native,
            paths,
            registry: HashMap::new(),
            dependency,
        }
    }

    pub fn loader_type(&self) -> &'static str {
        SHARED_LIBRARY_LOADER_TYPE
    }

    /// Returns the factory of `info`, opening its library on first use.
    ///
    /// `manager` is accepted for the loader interface and not looked at.
    pub fn load(&mut self, info: &AddonInfo, _manager: ManagerContext) -> Result<FactoryRef<'_>, LoadError> {
        let name = &info.unique_name;

        if self.registry.contains_key(name) {
            log_debug!(&format!("Addon {} already loaded", name));
            return Ok(self.registry[name].factory());
        }

        let path = self.paths.locate(name).ok_or_else(|| LoadError::LibraryNotFound {
            addon: name.clone(),
            searched: self.paths.candidates(name),
        })?;

        let library = self.native.open(&path).map_err(|message| LoadError::LibraryOpen {
            addon: name.clone(),
            path: path.clone(),
            message,
        })?;

        let resolver = LibraryFactoryResolver::new(info, library)?;

        log_info!(
            &format!("Loaded addon {} via {:?} entry", name, resolver.entry_symbol()),
            Some(path.display().to_string())
        );

        let resolver = self.registry.entry(name.clone()).or_insert(resolver);
        Ok(resolver.factory())
    }

    /// Factory of an addon that is already loaded.
    pub fn factory(&self, unique_name: &str) -> Option<FactoryRef<'_>> {
        self.registry.get(unique_name).map(LibraryFactoryResolver::factory)
    }

    pub fn is_loaded(&self, unique_name: &str) -> bool {
        self.registry.contains_key(unique_name)
    }

    /// Unique names of all loaded addons, in no particular order.
    pub fn loaded(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    pub fn dependency(&self) -> &LibraryDependency {
        &self.dependency
    }

    /// Addons `unique_name` requires, empty when none are declared.
    pub fn dependencies_of(&self, unique_name: &str) -> &HashSet<String> {
        dependency::dependencies_of(&self.dependency, unique_name)
    }

    pub fn path_resolver(&self) -> &P {
        &self.paths
    }
}

impl<N: NativeModule, P: AddonPathResolver> AddonLoader for SharedLibraryLoader<N, P> {
    fn loader_type(&self) -> &'static str {
        SHARED_LIBRARY_LOADER_TYPE
    }

    fn load(&mut self, info: &AddonInfo, manager: ManagerContext) -> Result<FactoryRef<'_>, LoadError> {
        SharedLibraryLoader::load(self, info, manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn reports_shared_library_type() {
        let loader = SharedLibraryLoader::with_parts(
            LibraryDependency::new(),
            Libloading,
            StandardPath::default(),
        );
        assert_eq!(loader.loader_type(), "SharedLibrary");

        let as_trait: &dyn AddonLoader = &loader;
        assert_eq!(as_trait.loader_type(), "SharedLibrary");
    }

    #[test]
    fn missing_library_lists_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = SharedLibraryLoader::with_parts(
            LibraryDependency::new(),
            Libloading,
            StandardPath::new(vec![dir.path().to_path_buf()]),
        );

        let err = loader
            .load(&AddonInfo::new("pinyin"), ManagerContext::detached())
            .unwrap_err();

        match err {
            LoadError::LibraryNotFound { addon, searched } => {
                assert_eq!(addon, "pinyin");
                assert_eq!(searched, vec![dir.path().join(crate::library_file_name("pinyin"))]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!loader.is_loaded("pinyin"));
        assert_eq!(loader.loaded().count(), 0);
    }

    #[test]
    fn config_builds_search_paths_and_dependencies() {
        let config: LoaderConfig = r#"
            [loader]
            search_paths = ["/opt/addons"]
            use_env_path = false

            [dependencies]
            pinyin = ["punctuation"]
        "#
        .parse()
        .unwrap();

        let loader = SharedLibraryLoader::from_config(&config);

        assert_eq!(loader.path_resolver().search_paths(), [PathBuf::from("/opt/addons")]);
        assert!(loader.dependencies_of("pinyin").contains("punctuation"));
        assert!(loader.dependencies_of("punctuation").is_empty());
    }
}
