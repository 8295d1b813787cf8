/// Exports an addon factory entry point from a `cdylib`.
///
/// The versioned form takes the full symbol name, which must be
/// `addon_factory_instance_<unique_name>` for the host to find it:
///
/// ```ignore
/// extern "C" fn create(manager: *mut AddonManager) -> *mut AddonInstance { ... }
///
/// addon_api::declare_addon_factory!(addon_factory_instance_sample, create);
/// ```
///
/// `legacy` exports the bare `addon_factory_instance` symbol instead, for
/// libraries that carry a single addon and must also load on older hosts.
/// A library can use both forms, but only one `legacy` per library.
#[macro_export]
macro_rules! declare_addon_factory {
    (legacy, $create_fn:path) => {
        #[no_mangle]
        pub extern "C" fn addon_factory_instance() -> *const $crate::AddonFactory {
            static FACTORY: $crate::AddonFactory = $crate::AddonFactory::new($create_fn);
            &FACTORY
        }
    };
    ($entry:ident, $create_fn:path) => {
        #[no_mangle]
        pub extern "C" fn $entry() -> *const $crate::AddonFactory {
            static FACTORY: $crate::AddonFactory = $crate::AddonFactory::new($create_fn);
            &FACTORY
        }
    };
}
