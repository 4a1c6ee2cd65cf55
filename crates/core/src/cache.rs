use crate::{ItemStack, SlotCollection};

/// Cached copy of a live slot collection.
///
/// `refresh` re-derives the copy only when a cheap fingerprint of the live
/// contents moved, so repeated calls between mutations cost one string
/// comparison instead of an O(n) clone. The fingerprint encodes identity and
/// quantity per occupied slot, so in-place quantity edits are still caught.
#[derive(Debug, Clone, Default)]
pub struct SlotCache {
    items: Vec<Option<ItemStack>>,
    fingerprint: String,
    non_empty: usize,
}

impl SlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the cache actually re-derived its copy.
    pub fn refresh(&mut self, live: &SlotCollection) -> bool {
        let fingerprint = fingerprint_of(live);
        if fingerprint == self.fingerprint && self.items.len() == live.len() {
            return false;
        }
        self.items = live.iter().cloned().collect();
        self.non_empty = live.non_empty_count();
        self.fingerprint = fingerprint;
        log::trace!("slot cache refreshed, {} slots occupied", self.non_empty);
        true
    }

    pub fn items(&self) -> &[Option<ItemStack>] {
        &self.items
    }

    pub fn non_empty_count(&self) -> usize {
        self.non_empty
    }
}

fn fingerprint_of(live: &SlotCollection) -> String {
    let mut out = String::with_capacity(live.len() * 8);
    for slot in live.iter() {
        match slot {
            Some(stack) => {
                out.push_str(&stack.id);
                out.push(':');
                out.push_str(&stack.quantity.to_string());
            }
            None => out.push('_'),
        }
        out.push('|');
    }
    out
}
