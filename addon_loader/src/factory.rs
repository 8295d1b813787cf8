//! Turns an opened addon library into its factory.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use addon_api::{AddonFactory, AddonInfo, ADDON_FACTORY_ENTRY};

use crate::entry::entry_point_from_symbol;
use crate::error::LoadError;
use crate::native::ModuleHandle;

/// Name of the per-addon entry symbol, `<ADDON_FACTORY_ENTRY>_<unique_name>`.
pub fn versioned_entry_name(unique_name: &str) -> String {
    format!("{}_{}", ADDON_FACTORY_ENTRY, unique_name)
}

/// Which entry symbol a library was loaded through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySymbol {
    /// `<ADDON_FACTORY_ENTRY>_<unique_name>`
    Versioned,
    /// Bare `<ADDON_FACTORY_ENTRY>` exported by single-addon libraries.
    Legacy,
}

/// Borrowed view of a factory owned by an addon library.
///
/// The library keeps the factory alive; the resolver keeps the library mapped.
/// The lifetime ties this view to the resolver (and so to the loader holding
/// it), which is as long as the pointer is known to be valid.
#[derive(Clone, Copy)]
pub struct FactoryRef<'a> {
    factory: NonNull<AddonFactory>,
    _library: PhantomData<&'a AddonFactory>,
}

impl<'a> FactoryRef<'a> {
    fn new(factory: NonNull<AddonFactory>) -> Self {
        Self {
            factory,
            _library: PhantomData,
        }
    }

    /// Raw pointer for handing the factory across the FFI boundary.
    ///
    /// The pointer stays valid only while the owning loader is alive.
    pub fn as_ptr(self) -> *const AddonFactory {
        self.factory.as_ptr()
    }

    pub fn get(self) -> &'a AddonFactory {
        // SAFETY: non-null by construction, and the library that owns the factory
        // stays mapped for at least 'a.
        unsafe { self.factory.as_ref() }
    }
}

impl PartialEq for FactoryRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.factory == other.factory
    }
}

impl Eq for FactoryRef<'_> {}

impl fmt::Debug for FactoryRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FactoryRef({:p})", self.factory)
    }
}

/// An opened addon library together with the factory it produced.
///
/// Dropping the resolver closes the library, which invalidates the factory.
pub struct LibraryFactoryResolver<H> {
    library: H,
    factory: NonNull<AddonFactory>,
    entry_symbol: EntrySymbol,
}

impl<H: ModuleHandle> LibraryFactoryResolver<H> {
    /// Resolves the entry point of `library` for `info` and calls it.
    ///
    /// The versioned symbol is tried first, then the legacy one. When both are
    /// missing the error carries the loader's diagnostic for the legacy lookup.
    pub fn new(info: &AddonInfo, library: H) -> Result<Self, LoadError> {
        let versioned = versioned_entry_name(&info.unique_name);

        let (symbol, entry_symbol) = match library.resolve(&versioned) {
            Ok(symbol) => (symbol, EntrySymbol::Versioned),
            Err(_) => match library.resolve(ADDON_FACTORY_ENTRY) {
                Ok(symbol) => (symbol, EntrySymbol::Legacy),
                Err(message) => {
                    return Err(LoadError::SymbolResolution {
                        addon: info.unique_name.clone(),
                        message,
                    })
                }
            },
        };

        // SAFETY: the binary contract with addon libraries fixes the signature of
        // both entry symbols, and `library` is held for as long as the factory.
        let factory = unsafe {
            let entry = entry_point_from_symbol(symbol);
            entry()
        };

        let factory = NonNull::new(factory as *mut AddonFactory).ok_or_else(|| {
            LoadError::FactoryConstruction {
                addon: info.unique_name.clone(),
            }
        })?;

        Ok(Self {
            library,
            factory,
            entry_symbol,
        })
    }

    pub fn factory(&self) -> FactoryRef<'_> {
        FactoryRef::new(self.factory)
    }

    pub fn entry_symbol(&self) -> EntrySymbol {
        self.entry_symbol
    }

    pub fn library(&self) -> &H {
        &self.library
    }
}

impl<H> fmt::Debug for LibraryFactoryResolver<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryFactoryResolver")
            .field("factory", &self.factory)
            .field("entry_symbol", &self.entry_symbol)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::RawSymbol;
    use addon_api::{AddonInstance, AddonManager};
    use std::collections::HashMap;
    use std::ffi::c_void;
    use std::ptr;

    extern "C" fn create(_manager: *mut AddonManager) -> *mut AddonInstance {
        ptr::null_mut()
    }

    static VERSIONED: AddonFactory = AddonFactory::new(create);
    static LEGACY: AddonFactory = AddonFactory::new(create);

    extern "C" fn versioned_entry() -> *const AddonFactory {
        &VERSIONED
    }

    extern "C" fn legacy_entry() -> *const AddonFactory {
        &LEGACY
    }

    extern "C" fn null_entry() -> *const AddonFactory {
        ptr::null()
    }

    #[derive(Default)]
    struct TableModule(HashMap<String, RawSymbol>);

    impl TableModule {
        fn with(mut self, name: &str, entry: extern "C" fn() -> *const AddonFactory) -> Self {
            let symbol = RawSymbol::new(entry as *const c_void).unwrap();
            self.0.insert(name.to_string(), symbol);
            self
        }
    }

    impl ModuleHandle for TableModule {
        fn resolve(&self, name: &str) -> Result<RawSymbol, String> {
            self.0
                .get(name)
                .copied()
                .ok_or_else(|| format!("undefined symbol: {}", name))
        }
    }

    #[test]
    fn versioned_name_appends_unique_name() {
        assert_eq!(versioned_entry_name("pinyin"), "addon_factory_instance_pinyin");
    }

    #[test]
    fn prefers_versioned_symbol() {
        let module = TableModule::default()
            .with("addon_factory_instance_pinyin", versioned_entry)
            .with("addon_factory_instance", legacy_entry);

        let resolver = LibraryFactoryResolver::new(&AddonInfo::new("pinyin"), module).unwrap();

        assert_eq!(resolver.entry_symbol(), EntrySymbol::Versioned);
        assert_eq!(resolver.factory().as_ptr(), &VERSIONED as *const AddonFactory);
    }

    #[test]
    fn falls_back_to_legacy_symbol() {
        let module = TableModule::default().with("addon_factory_instance", legacy_entry);

        let resolver = LibraryFactoryResolver::new(&AddonInfo::new("pinyin"), module).unwrap();

        assert_eq!(resolver.entry_symbol(), EntrySymbol::Legacy);
        assert_eq!(resolver.factory().as_ptr(), &LEGACY as *const AddonFactory);
    }

    #[test]
    fn other_addons_symbol_is_not_used() {
        let module = TableModule::default().with("addon_factory_instance_lua", versioned_entry);

        let err = LibraryFactoryResolver::new(&AddonInfo::new("pinyin"), module).unwrap_err();

        match err {
            LoadError::SymbolResolution { addon, message } => {
                assert_eq!(addon, "pinyin");
                assert_eq!(message, "undefined symbol: addon_factory_instance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_factory_is_rejected() {
        let module = TableModule::default().with("addon_factory_instance_pinyin", null_entry);

        let err = LibraryFactoryResolver::new(&AddonInfo::new("pinyin"), module).unwrap_err();

        assert!(matches!(err, LoadError::FactoryConstruction { ref addon } if addon == "pinyin"));
    }

    #[test]
    fn factory_ref_is_repeatable() {
        let module = TableModule::default().with("addon_factory_instance_pinyin", versioned_entry);
        let resolver = LibraryFactoryResolver::new(&AddonInfo::new("pinyin"), module).unwrap();

        assert_eq!(resolver.factory(), resolver.factory());
        assert_eq!(resolver.factory().get().abi_version, addon_api::ADDON_ABI_VERSION);
    }
}
