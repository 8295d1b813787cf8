/// Name of the symbol every addon library exports to hand out its factory.
///
/// Libraries that bundle several addons export one symbol per addon, named
/// `<ADDON_FACTORY_ENTRY>_<unique_name>`. Older single-addon libraries export
/// only the bare name. The host tries the versioned name first.
pub const ADDON_FACTORY_ENTRY: &str = "addon_factory_instance";

/// ABI revision of [`AddonFactory`]. Bumped whenever its layout changes.
pub const ADDON_ABI_VERSION: u32 = 1;

/// Opaque handle to the host's addon manager.
///
/// Only ever seen behind a pointer. The host passes it through to
/// [`AddonFactory::create`] without the loader looking inside.
#[repr(C)]
pub struct AddonManager {
    _private: [u8; 0],
}

/// Opaque addon instance produced by a factory.
#[repr(C)]
pub struct AddonInstance {
    _private: [u8; 0],
}

/// Factory object returned by an addon library's entry point.
///
/// The factory is owned by the library that returned it. It usually lives in a
/// `static` inside that library and stays valid for as long as the library is
/// mapped into the process.
#[repr(C)]
#[derive(Debug)]
pub struct AddonFactory {
    /// Must equal [`ADDON_ABI_VERSION`] of the headers the addon was built with.
    pub abi_version: u32,

    /// Builds one addon instance for the given manager.
    ///
    /// Returns null when the addon refuses to start.
    pub create: extern "C" fn(manager: *mut AddonManager) -> *mut AddonInstance,
}

impl AddonFactory {
    /// Builds a factory for the current ABI revision.
    pub const fn new(
        create: extern "C" fn(manager: *mut AddonManager) -> *mut AddonInstance,
    ) -> Self {
        Self {
            abi_version: ADDON_ABI_VERSION,
            create,
        }
    }
}

/// Signature of the exported entry point, versioned or legacy.
pub type AddonFactoryEntry = unsafe extern "C" fn() -> *const AddonFactory;
