use crate::{Cursor, ItemStack};
use serde::{Deserialize, Serialize};

/// Fixed-capacity, index-addressable sequence of optional stacks.
///
/// Removing a stack leaves a hole at its index; later entries never shift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotCollection {
    slots: Vec<Option<ItemStack>>,
}

impl SlotCollection {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(index).and_then(|slot| slot.as_mut())
    }

    /// Place a stack, replacing whatever the slot held.
    pub fn set(&mut self, index: usize, stack: Option<ItemStack>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = stack;
        }
    }

    /// Empty a slot in place, preserving the indices of every other entry.
    pub fn clear_slot(&mut self, index: usize) -> Option<ItemStack> {
        self.slots.get_mut(index).and_then(|slot| slot.take())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<ItemStack>> {
        self.slots.iter()
    }

    pub fn non_empty_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total quantity of one item kind across all slots.
    pub fn count_id(&self, id: &str) -> u64 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.id == id)
            .map(|stack| stack.quantity as u64)
            .sum()
    }

    /// Remove up to `count` units of a kind, clearing slots that reach zero.
    /// Returns how many units were actually removed.
    pub fn remove_id(&mut self, id: &str, count: u64) -> u64 {
        let mut remaining = count;
        for index in 0..self.slots.len() {
            if remaining == 0 {
                break;
            }
            let Some(stack) = self.slots[index].as_mut() else {
                continue;
            };
            if stack.id != id {
                continue;
            }
            let taken = (stack.quantity as u64).min(remaining);
            stack.quantity -= taken as u32;
            remaining -= taken;
            if stack.quantity == 0 {
                self.slots[index] = None;
            }
        }
        count - remaining
    }

    /// Native pick-up primitive: move one unit from a slot into the cursor.
    /// Establishes the held entry when the cursor is empty; otherwise the
    /// unit merges into a compatible held stack with spare capacity.
    pub fn pick_up_one(&mut self, index: usize, cursor: &mut Cursor) -> bool {
        let Some(stack) = self.get(index) else {
            return false;
        };
        match cursor.held() {
            None => {
                let mut unit = stack.clone();
                unit.quantity = 1;
                cursor.set(unit);
            }
            Some(held) => {
                if !held.can_stack_with(stack) || held.is_full() {
                    return false;
                }
                if let Some(held) = cursor.held_mut() {
                    held.quantity += 1;
                }
            }
        }
        if let Some(stack) = self.get_mut(index) {
            stack.quantity = stack.quantity.saturating_sub(1);
            if stack.quantity == 0 {
                self.clear_slot(index);
            }
        }
        true
    }
}

/// Screen-space grid occupied by a slot collection. Maps pointer
/// coordinates to slot indices and back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlotLayout {
    pub x: i32,
    pub y: i32,
    pub columns: usize,
    pub rows: usize,
    pub cell_width: i32,
    pub cell_height: i32,
}

impl SlotLayout {
    pub fn grid(x: i32, y: i32, columns: usize, rows: usize, cell: i32) -> Self {
        Self {
            x,
            y,
            columns,
            rows,
            cell_width: cell,
            cell_height: cell,
        }
    }

    pub fn width(&self) -> i32 {
        self.columns as i32 * self.cell_width
    }

    pub fn height(&self) -> i32 {
        self.rows as i32 * self.cell_height
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.width() && py < self.y + self.height()
    }

    pub fn index_at(&self, px: i32, py: i32) -> Option<usize> {
        if !self.contains(px, py) {
            return None;
        }
        let col = ((px - self.x) / self.cell_width) as usize;
        let row = ((py - self.y) / self.cell_height) as usize;
        Some(row * self.columns + col)
    }

    pub fn origin_of(&self, index: usize) -> (i32, i32) {
        let col = (index % self.columns) as i32;
        let row = (index / self.columns) as i32;
        (self.x + col * self.cell_width, self.y + row * self.cell_height)
    }
}
