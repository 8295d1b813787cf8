//! Narrow interface over the platform's dynamic loader.
//!
//! The resolver only needs two things from a loaded module: open it and look a
//! symbol up by name. Keeping that behind traits lets the fallback logic run
//! against in-memory modules in tests, and keeps `libloading` in one place.

use std::ffi::c_void;
use std::fmt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use libloading::{Library, Symbol};

/// Address of a resolved symbol. Never null.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawSymbol(NonNull<c_void>);

impl RawSymbol {
    pub fn new(address: *const c_void) -> Option<Self> {
        NonNull::new(address as *mut c_void).map(Self)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

impl fmt::Debug for RawSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawSymbol({:p})", self.0)
    }
}

/// A module that has been mapped into the process.
///
/// Dropping the handle releases the module.
pub trait ModuleHandle {
    /// Looks `name` up, returning the loader's diagnostic when it is missing.
    fn resolve(&self, name: &str) -> Result<RawSymbol, String>;
}

/// Opens modules from disk.
pub trait NativeModule {
    type Handle: ModuleHandle;

    /// Maps the module at `path`, returning the loader's diagnostic on failure.
    fn open(&self, path: &Path) -> Result<Self::Handle, String>;
}

/// Production backend built on `libloading`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Libloading;

/// A library opened through [`Libloading`].
#[derive(Debug)]
pub struct LibloadingHandle {
    library: Library,
    path: PathBuf,
}

impl LibloadingHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NativeModule for Libloading {
    type Handle = LibloadingHandle;

    fn open(&self, path: &Path) -> Result<LibloadingHandle, String> {
        let library = open_library(path).map_err(|e| e.to_string())?;
        Ok(LibloadingHandle {
            library,
            path: path.to_path_buf(),
        })
    }
}

impl ModuleHandle for LibloadingHandle {
    fn resolve(&self, name: &str) -> Result<RawSymbol, String> {
        // SAFETY: the symbol is only read as an address here; giving it a type is
        // left to `entry::entry_point_from_symbol`.
        let symbol: Symbol<*mut c_void> =
            unsafe { self.library.get(name.as_bytes()) }.map_err(|e| e.to_string())?;
        RawSymbol::new(*symbol).ok_or_else(|| format!("{}: symbol {} is null", self.path.display(), name))
    }
}

// RTLD_NOW: unresolved imports fail the open, not the first call into the addon.
#[cfg(unix)]
fn open_library(path: &Path) -> Result<Library, libloading::Error> {
    use libloading::os::unix::{Library as UnixLibrary, RTLD_LOCAL, RTLD_NOW};

    // SAFETY: running the library's initializers is the point of loading an addon.
    unsafe { UnixLibrary::open(Some(path), RTLD_NOW | RTLD_LOCAL) }.map(Library::from)
}

#[cfg(not(unix))]
fn open_library(path: &Path) -> Result<Library, libloading::Error> {
    // SAFETY: see the unix variant.
    unsafe { Library::new(path) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_symbol_rejects_null() {
        assert!(RawSymbol::new(std::ptr::null()).is_none());
    }

    #[test]
    fn open_reports_missing_file() {
        let err = Libloading
            .open(Path::new("/nonexistent/libmissing_addon.so"))
            .unwrap_err();
        assert!(!err.is_empty());
    }
}
