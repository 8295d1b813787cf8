//! Minimal addon library.
//!
//! Built as `libaddon_sample.so` (or the platform equivalent) and exports both
//! `addon_factory_instance_addon_sample` and the legacy bare entry symbol.

use addon_api::{declare_addon_factory, AddonInstance, AddonManager};
use liblogger::log_info;

/// State of one sample addon instance.
pub struct SampleAddon {
    pub manager: *mut AddonManager,
    pub greeting: &'static str,
}

extern "C" fn create(manager: *mut AddonManager) -> *mut AddonInstance {
    log_info!("Creating sample addon instance");
    let addon = Box::new(SampleAddon {
        manager,
        greeting: "hello from addon_sample",
    });
    Box::into_raw(addon) as *mut AddonInstance
}

/// Frees an instance returned by the sample factory.
///
/// # Safety
/// `instance` must come from this library's factory and not be freed twice.
pub unsafe fn destroy(instance: *mut AddonInstance) {
    if !instance.is_null() {
        drop(Box::from_raw(instance as *mut SampleAddon));
    }
}

declare_addon_factory!(addon_factory_instance_addon_sample, create);
declare_addon_factory!(legacy, create);
