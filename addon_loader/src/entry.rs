use addon_api::AddonFactoryEntry;

use crate::native::RawSymbol;

/// Reinterprets a resolved entry symbol as the factory entry function.
///
/// This is the only place a symbol address is turned into something callable.
///
/// # Safety
/// `symbol` must be the address of a function with the [`AddonFactoryEntry`]
/// signature, and the module it came from must stay mapped while the returned
/// function is in use.
pub(crate) unsafe fn entry_point_from_symbol(symbol: RawSymbol) -> AddonFactoryEntry {
    std::mem::transmute::<*mut std::ffi::c_void, AddonFactoryEntry>(symbol.as_ptr())
}
