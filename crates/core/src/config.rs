use serde::{Deserialize, Serialize};

/// Runtime toggles and defaults. Read-only to the core logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub enabled: bool,
    pub split_in_crafting: bool,
    pub split_in_shop: bool,
    pub default_crafting_amount: u32,
    pub default_shop_amount: u32,
    /// Upper bound applied to every kind's max stack size at load time.
    pub max_stacking_number: u32,
    pub debug: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            split_in_crafting: true,
            split_in_shop: true,
            default_crafting_amount: 1,
            default_shop_amount: 5,
            max_stacking_number: 999,
            debug: false,
        }
    }
}
