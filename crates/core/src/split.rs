use crate::{Cursor, Event, EventBus, ItemStack, SlotCache, SlotCollection, SlotLayout};

#[derive(Debug, Clone)]
struct Selection {
    slot: usize,
    item_id: String,
    x: i32,
    y: i32,
}

/// Generic split interaction over one slot collection.
///
/// Two-phase: `select` snapshots the pointer and hovered stack, `commit`
/// applies a clamped amount later. The collection may be mutated by other
/// systems in between, so every commit re-validates against the live slots
/// and no-ops when the snapshot went stale.
#[derive(Debug, Default)]
pub struct SplitTarget {
    selection: Option<Selection>,
    cache: SlotCache,
}

impl SplitTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a live collection when the owning page opens.
    pub fn init(&mut self, live: &SlotCollection) {
        self.selection = None;
        self.cache.refresh(live);
    }

    /// Drop any pending selection.
    pub fn reset(&mut self) {
        self.selection = None;
    }

    /// Record the pointer position and the stack hovered there. No mutation.
    pub fn select(&mut self, slots: &SlotCollection, layout: &SlotLayout, x: i32, y: i32) {
        self.selection = layout.index_at(x, y).and_then(|slot| {
            slots.get(slot).map(|stack| Selection {
                slot,
                item_id: stack.id.clone(),
                x,
                y,
            })
        });
    }

    /// The selected stack, if it still matches the selection snapshot.
    pub fn hovered<'a>(&self, slots: &'a SlotCollection) -> Option<&'a ItemStack> {
        let selection = self.selection.as_ref()?;
        let stack = slots.get(selection.slot)?;
        (stack.id == selection.item_id).then_some(stack)
    }

    /// Coordinates captured at selection time.
    pub fn selected_at(&self) -> Option<(i32, i32)> {
        self.selection.as_ref().map(|sel| (sel.x, sel.y))
    }

    /// Whether a split is currently legal: a hovered stack with more than
    /// one unit, and a cursor that is empty or compatible with headroom.
    pub fn can_split(&self, slots: &SlotCollection, cursor: &Cursor) -> bool {
        let Some(stack) = self.hovered(slots) else {
            return false;
        };
        if stack.quantity <= 1 {
            return false;
        }
        match cursor.held() {
            None => true,
            Some(held) => stack.can_stack_with(held) && !held.is_full(),
        }
    }

    /// Half the hovered stack, rounded up. Doubles as the prompt default
    /// and as the amount applied when the prompt is dismissed.
    pub fn default_amount(&self, slots: &SlotCollection) -> u32 {
        self.hovered(slots)
            .map_or(0, |stack| (stack.quantity + 1) / 2)
    }

    /// Apply the default split, for the cancelled/dismissed prompt path.
    pub fn cancel(&mut self, slots: &mut SlotCollection, cursor: &mut Cursor, events: &mut EventBus) {
        let amount = self.default_amount(slots);
        if amount > 0 {
            self.commit(slots, cursor, events, amount as i64);
        }
    }

    /// Move `amount` units from the selected stack to the cursor.
    ///
    /// The amount is clamped to `[0, hovered quantity]` and then to the held
    /// stack's remaining capacity. All clamping happens before the native
    /// pick-up so a split that resolves to zero touches nothing. Returns the
    /// quantity actually moved.
    pub fn commit(
        &mut self,
        slots: &mut SlotCollection,
        cursor: &mut Cursor,
        events: &mut EventBus,
        amount: i64,
    ) -> u32 {
        let Some(selection) = self.selection.clone() else {
            return 0;
        };
        let Some(stack) = slots.get(selection.slot) else {
            return 0;
        };
        if stack.id != selection.item_id || stack.quantity == 0 {
            log::trace!("split selection went stale for {}", selection.item_id);
            return 0;
        }

        let hovered_count = stack.quantity;
        let max_stack = stack.max_stack;
        let held_count = cursor.quantity();

        let mut amount = amount.clamp(0, hovered_count as i64) as u32;
        if held_count + amount > max_stack {
            amount = max_stack.saturating_sub(held_count);
        }
        if amount == 0 {
            return 0;
        }

        if !slots.pick_up_one(selection.slot, cursor) {
            return 0;
        }
        // The arithmetic below overwrites the single unit the pick-up moved.
        if let Some(held) = cursor.held_mut() {
            held.quantity = held_count + amount;
        }
        let remaining = hovered_count - amount;
        if remaining == 0 {
            slots.clear_slot(selection.slot);
        } else if let Some(stack) = slots.get_mut(selection.slot) {
            stack.quantity = remaining;
        }

        self.cache.refresh(slots);
        events.push(Event::StackSplit {
            item: selection.item_id.clone(),
            amount,
            remaining,
            held: held_count + amount,
        });
        log::trace!(
            "split {} x{amount}, {remaining} left in slot {}",
            selection.item_id,
            selection.slot
        );
        self.selection = None;
        amount
    }

    /// Occupied-slot count from the last cache refresh, for diagnostics.
    pub fn non_empty_count(&self) -> usize {
        self.cache.non_empty_count()
    }
}
