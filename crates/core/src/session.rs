use crate::{ItemStack, SplitConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The single stack currently "in hand", pending placement.
///
/// Owned by the interaction session and threaded explicitly through every
/// commit; at most one commit may mutate it per input event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cursor {
    held: Option<ItemStack>,
}

impl Cursor {
    pub fn held(&self) -> Option<&ItemStack> {
        self.held.as_ref()
    }

    pub fn held_mut(&mut self) -> Option<&mut ItemStack> {
        self.held.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    pub fn quantity(&self) -> u32 {
        self.held.as_ref().map_or(0, |stack| stack.quantity)
    }

    pub fn set(&mut self, stack: ItemStack) {
        self.held = Some(stack);
    }

    pub fn take(&mut self) -> Option<ItemStack> {
        self.held.take()
    }

    /// Merge a freshly acquired stack into the held entry. Fails without
    /// mutating when the cursor holds something incompatible.
    pub fn absorb(&mut self, stack: ItemStack) -> bool {
        match self.held.as_mut() {
            None => {
                self.held = Some(stack);
                true
            }
            Some(held) => {
                if !held.can_stack_with(&stack) {
                    return false;
                }
                held.quantity += stack.quantity;
                true
            }
        }
    }
}

/// Per-currency balances. Currencies are item-kind-like string keys so
/// shops trading in tokens or gems work the same as money shops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    funds: HashMap<String, i64>,
}

impl Wallet {
    pub fn amount(&self, currency: &str) -> i64 {
        self.funds.get(currency).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, currency: &str, amount: i64) {
        *self.funds.entry(currency.to_string()).or_insert(0) += amount;
    }

    /// Deducts only when the full amount is covered.
    pub fn spend(&mut self, currency: &str, amount: i64) -> bool {
        let balance = self.funds.entry(currency.to_string()).or_insert(0);
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        true
    }
}

/// Shared mutable state of one interaction session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cursor: Cursor,
    pub wallet: Wallet,
    pub config: SplitConfig,
}

impl Session {
    pub fn new(config: SplitConfig) -> Self {
        Self {
            cursor: Cursor::default(),
            wallet: Wallet::default(),
            config,
        }
    }
}
