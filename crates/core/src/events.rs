use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    StackSplit {
        item: String,
        amount: u32,
        remaining: u32,
        held: u32,
    },
    ItemsBought {
        item: String,
        amount: u32,
        cost: i64,
        currency: String,
    },
    ListingSoldOut {
        item: String,
    },
    ItemsSold {
        item: String,
        amount: u32,
        proceeds: i64,
    },
    /// Cosmetic coin burst for a sale. `coins` is already capped; large
    /// sales emit no burst at all.
    CoinsFlung {
        coins: u32,
        x: i32,
        y: i32,
    },
    Crafted {
        recipe: String,
        count: u32,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
