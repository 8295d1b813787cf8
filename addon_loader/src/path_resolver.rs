use std::env;
use std::path::{Path, PathBuf};

use crate::config::LoaderSection;

/// Environment variable holding extra addon directories, searched first.
pub const ADDON_PATH_ENV: &str = "ADDON_LOADER_PATH";

/// Returns the library file name of an addon for the current platform
/// (e.g. libfoo.so, libfoo.dylib, foo.dll).
pub fn library_file_name(unique_name: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{}.dll", unique_name)
    } else if cfg!(target_os = "macos") {
        format!("lib{}.dylib", unique_name)
    } else {
        format!("lib{}.so", unique_name)
    }
}

/// Turns an addon's unique name into the path of its library.
pub trait AddonPathResolver {
    /// Every path the library may live at, in search order.
    fn candidates(&self, unique_name: &str) -> Vec<PathBuf>;

    /// The first candidate that exists as a file.
    fn locate(&self, unique_name: &str) -> Option<PathBuf> {
        self.candidates(unique_name)
            .into_iter()
            .find(|path| path.is_file())
    }
}

/// Searches an ordered list of addon directories.
#[derive(Debug, Clone, Default)]
pub struct StandardPath {
    search_paths: Vec<PathBuf>,
}

impl StandardPath {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Directories from the loader config, preceded by those in
    /// `ADDON_LOADER_PATH` when the section allows it.
    pub fn from_config(section: &LoaderSection) -> Self {
        let mut search_paths = Vec::new();

        if section.use_env_path {
            if let Some(value) = env::var_os(ADDON_PATH_ENV) {
                search_paths.extend(env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()));
            }
        }
        search_paths.extend(section.search_paths.iter().cloned());

        Self { search_paths }
    }

    pub fn add_search_path(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl AddonPathResolver for StandardPath {
    fn candidates(&self, unique_name: &str) -> Vec<PathBuf> {
        let file_name = library_file_name(unique_name);
        self.search_paths
            .iter()
            .map(|folder| folder.join(&file_name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn file_name_follows_platform_convention() {
        #[cfg(target_os = "linux")]
        assert_eq!(library_file_name("pinyin"), "libpinyin.so");

        #[cfg(target_os = "macos")]
        assert_eq!(library_file_name("pinyin"), "libpinyin.dylib");

        #[cfg(windows)]
        assert_eq!(library_file_name("pinyin"), "pinyin.dll");
    }

    #[test]
    fn candidates_keep_search_order() {
        let paths = StandardPath::new(vec![PathBuf::from("/first"), PathBuf::from("/second")]);
        let file_name = library_file_name("lua");

        assert_eq!(
            paths.candidates("lua"),
            vec![Path::new("/first").join(&file_name), Path::new("/second").join(&file_name)]
        );
    }

    #[test]
    fn locate_returns_first_existing_file() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let third = tempfile::tempdir().unwrap();
        let file_name = library_file_name("clipboard");
        fs::write(second.path().join(&file_name), b"").unwrap();
        fs::write(third.path().join(&file_name), b"").unwrap();

        let mut paths = StandardPath::default();
        paths
            .add_search_path(first.path())
            .add_search_path(second.path())
            .add_search_path(third.path());

        assert_eq!(paths.locate("clipboard"), Some(second.path().join(&file_name)));
    }

    #[test]
    fn locate_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(library_file_name("quickphrase"))).unwrap();

        let paths = StandardPath::new(vec![dir.path().to_path_buf()]);
        assert_eq!(paths.locate("quickphrase"), None);
    }

    #[test]
    fn config_paths_without_env() {
        let section = LoaderSection {
            search_paths: vec![PathBuf::from("/opt/addons")],
            use_env_path: false,
        };
        assert_eq!(StandardPath::from_config(&section).search_paths(), [PathBuf::from("/opt/addons")]);
    }
}
