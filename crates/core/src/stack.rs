use crate::ItemDef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One stack of a single item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: String,
    pub quantity: u32,
    pub max_stack: u32,
    /// Unit value, carried from the kind definition.
    #[serde(default)]
    pub value: i64,
    /// Number of items stored inside, for container kinds.
    #[serde(default)]
    pub contained: u32,
    /// Kind-specific mutable attributes. Irrelevant to splitting.
    #[serde(default)]
    pub vars: HashMap<String, f64>,
}

impl ItemStack {
    pub fn new(def: &ItemDef, quantity: u32) -> Self {
        Self {
            id: def.id.clone(),
            quantity,
            max_stack: def.max_stack,
            value: def.value,
            contained: 0,
            vars: HashMap::new(),
        }
    }

    /// Whether the two stacks may merge or split between each other.
    /// A container holding anything never stacks, not even with itself.
    pub fn can_stack_with(&self, other: &ItemStack) -> bool {
        if self.contained > 0 || other.contained > 0 {
            return false;
        }
        self.id == other.id && self.max_stack > 1
    }

    /// Whether the kind stacks at all.
    pub fn self_stackable(&self) -> bool {
        self.can_stack_with(self)
    }

    pub fn headroom(&self) -> u32 {
        self.max_stack.saturating_sub(self.quantity)
    }

    pub fn is_full(&self) -> bool {
        self.quantity >= self.max_stack
    }
}
