pub mod config;
pub mod dependency;
mod entry;
pub mod error;
pub mod factory;
pub mod loader;
pub mod native;
pub mod path_resolver;

pub use config::LoaderConfig;
pub use dependency::LibraryDependency;
pub use error::{ConfigError, LoadError};
pub use factory::{versioned_entry_name, EntrySymbol, FactoryRef, LibraryFactoryResolver};
pub use loader::{AddonLoader, SharedLibraryLoader, SHARED_LIBRARY_LOADER_TYPE};
pub use native::{Libloading, LibloadingHandle, ModuleHandle, NativeModule, RawSymbol};
pub use path_resolver::{library_file_name, AddonPathResolver, StandardPath};
