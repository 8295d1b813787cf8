use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Addon name to the set of addon names it requires.
///
/// Supplied once when the loader is built and never changed by it. Ordering
/// loads and rejecting cycles is left to the addon manager.
pub type LibraryDependency = HashMap<String, HashSet<String>>;

static NO_DEPENDENCIES: Lazy<HashSet<String>> = Lazy::new(HashSet::new);

/// Declared requirements of `unique_name`, empty when nothing is declared.
pub fn dependencies_of<'a>(dependency: &'a LibraryDependency, unique_name: &str) -> &'a HashSet<String> {
    dependency.get(unique_name).unwrap_or(&*NO_DEPENDENCIES)
}
