use std::ptr;

use crate::AddonManager;

/// Opaque manager pointer handed to addon loaders.
///
/// Loaders accept it for interface compatibility and pass it along untouched.
/// A detached context carries a null pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerContext(*mut AddonManager);

impl ManagerContext {
    pub const fn detached() -> Self {
        Self(ptr::null_mut())
    }

    pub const fn from_raw(manager: *mut AddonManager) -> Self {
        Self(manager)
    }

    pub const fn as_ptr(self) -> *mut AddonManager {
        self.0
    }

    pub fn is_detached(self) -> bool {
        self.0.is_null()
    }
}

impl Default for ManagerContext {
    fn default() -> Self {
        Self::detached()
    }
}
