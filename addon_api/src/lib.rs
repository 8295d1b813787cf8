pub mod addon_factory;
pub mod addon_info;
pub mod addon_macros;
pub mod manager_context;

pub use addon_factory::{
    AddonFactory, AddonFactoryEntry, AddonInstance, AddonManager, ADDON_ABI_VERSION,
    ADDON_FACTORY_ENTRY,
};
pub use addon_info::AddonInfo;
pub use manager_context::ManagerContext;
