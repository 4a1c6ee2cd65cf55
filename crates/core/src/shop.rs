use crate::{Event, EventBus, ItemStack, Session, SlotCollection, SlotLayout};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Sales above this quantity skip the coin burst entirely.
const ANIMATION_CUTOFF: u32 = 50;
/// Coin particles saturate here no matter how large the sale.
const COIN_CAP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockCount {
    Finite(u32),
    Infinite,
}

/// Barter cost for listings priced in items instead of currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeCost {
    pub item_id: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEntry {
    pub price: i64,
    pub stock: StockCount,
    #[serde(default)]
    pub trade: Option<TradeCost>,
}

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("nothing for sale under id {0}")]
    UnknownListing(String),
    #[error("cannot afford the purchase")]
    InsufficientFunds,
    #[error("cursor holds an incompatible item")]
    CursorOccupied,
}

/// One shop context: currency kind, stock table, for-sale listing and the
/// buy-back fraction applied when the player sells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopState {
    currency: String,
    sell_fraction: f64,
    stock: HashMap<String, StockEntry>,
    for_sale: Vec<ItemStack>,
}

impl ShopState {
    pub fn new(currency: &str, sell_fraction: f64) -> Self {
        Self {
            currency: currency.to_string(),
            sell_fraction,
            stock: HashMap::new(),
            for_sale: Vec::new(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn sell_fraction(&self) -> f64 {
        self.sell_fraction
    }

    pub fn add_listing(&mut self, template: ItemStack, entry: StockEntry) {
        self.stock.insert(template.id.clone(), entry);
        self.for_sale.push(template);
    }

    pub fn stock_entry(&self, item_id: &str) -> Option<&StockEntry> {
        self.stock.get(item_id)
    }

    pub fn for_sale(&self) -> &[ItemStack] {
        &self.for_sale
    }

    pub fn listing(&self, index: usize) -> Option<&ItemStack> {
        self.for_sale.get(index)
    }

    /// Whether the shop buys an item back from the player.
    pub fn buys(&self, stack: &ItemStack) -> bool {
        stack.value > 0
    }

    /// Drop an exhausted listing from both the stock table and the
    /// for-sale list.
    pub fn remove_listing(&mut self, item_id: &str) {
        self.stock.remove(item_id);
        self.for_sale.retain(|listing| listing.id != item_id);
    }

    /// Native purchase primitive: collects payment, moves the goods onto
    /// the cursor and decrements stock. Returns true when the listing is
    /// now exhausted and should be removed.
    pub fn purchase(
        &mut self,
        item_id: &str,
        amount: u32,
        inventory: &mut SlotCollection,
        session: &mut Session,
        events: &mut EventBus,
    ) -> Result<bool, ShopError> {
        let template = self
            .for_sale
            .iter()
            .find(|listing| listing.id == item_id)
            .cloned()
            .ok_or_else(|| ShopError::UnknownListing(item_id.to_string()))?;

        let mut goods = template;
        goods.quantity = amount;
        if let Some(held) = session.cursor.held() {
            if !held.can_stack_with(&goods) {
                return Err(ShopError::CursorOccupied);
            }
        }

        // Missing stock entries degrade to a single-unit cash listing.
        let entry = match self.stock.get(item_id) {
            Some(entry) => entry.clone(),
            None => {
                log::error!("listing {item_id} has no stock entry, assuming stock of 1");
                StockEntry {
                    price: goods.value.max(1),
                    stock: StockCount::Finite(1),
                    trade: None,
                }
            }
        };

        let (cost, paid_in) = if entry.price > 0 {
            let cost = entry.price * amount as i64;
            if !session.wallet.spend(&self.currency, cost) {
                return Err(ShopError::InsufficientFunds);
            }
            (cost, self.currency.clone())
        } else if let Some(trade) = &entry.trade {
            let need = trade.count.max(1) as u64 * amount as u64;
            if inventory.count_id(&trade.item_id) < need {
                return Err(ShopError::InsufficientFunds);
            }
            inventory.remove_id(&trade.item_id, need);
            (need as i64, trade.item_id.clone())
        } else {
            log::trace!("listing {item_id} is free, no payment collected");
            (0, self.currency.clone())
        };

        let exhausted = match entry.stock {
            StockCount::Infinite => false,
            StockCount::Finite(count) => {
                let left = count.saturating_sub(amount);
                if let Some(entry) = self.stock.get_mut(item_id) {
                    entry.stock = StockCount::Finite(left);
                }
                left == 0
            }
        };

        // Checked above; absorb cannot fail here.
        session.cursor.absorb(goods);
        events.push(Event::ItemsBought {
            item: item_id.to_string(),
            amount,
            cost,
            currency: paid_in,
        });
        Ok(exhausted)
    }
}

/// A shop interaction: constructed per click, evaluated once, then either
/// committed with a confirmed amount or abandoned. Evaluations are memoized
/// per instance; a new click builds a new action so stale maxima are never
/// reused across input events.
pub trait ShopAction {
    /// Whether the action is currently legal. Idempotent, cached.
    fn can_perform(
        &mut self,
        shop: &ShopState,
        inventory: &SlotCollection,
        session: &Session,
    ) -> bool;

    /// Default quantity to seed the amount prompt with.
    fn default_amount(&self) -> u32;

    /// Commit the action for a user-entered amount, clamped to whatever is
    /// legal. Returns the quantity actually transacted.
    fn perform(
        &mut self,
        shop: &mut ShopState,
        inventory: &mut SlotCollection,
        session: &mut Session,
        events: &mut EventBus,
        amount: i64,
        location: (i32, i32),
    ) -> u32;
}

/// Purchase of a for-sale listing.
#[derive(Debug, Clone)]
pub struct BuyAction {
    listing: ItemStack,
    can_perform: Option<bool>,
    max_purchasable: Option<u32>,
    default_amount: u32,
}

impl BuyAction {
    pub fn new(listing: ItemStack) -> Self {
        Self {
            listing,
            can_perform: None,
            max_purchasable: None,
            default_amount: 0,
        }
    }

    /// Resolve the listing under the pointer and build the action.
    pub fn create(
        shop: &ShopState,
        sale_layout: &SlotLayout,
        inventory: &SlotCollection,
        session: &Session,
        x: i32,
        y: i32,
    ) -> Option<BuyAction> {
        let index = sale_layout.index_at(x, y)?;
        let listing = shop.listing(index)?.clone();
        let mut action = BuyAction::new(listing);
        if action.can_perform(shop, inventory, session) {
            action.default_amount = session
                .config
                .default_shop_amount
                .min(action.max_purchasable(shop, inventory, session));
        }
        Some(action)
    }

    /// Largest quantity the player can buy right now: what the currency (or
    /// barter items) affords, capped by remaining stock. Computed once.
    pub fn max_purchasable(
        &mut self,
        shop: &ShopState,
        inventory: &SlotCollection,
        session: &Session,
    ) -> u32 {
        if let Some(max) = self.max_purchasable {
            return max;
        }

        let (price, stock, trade) = match shop.stock_entry(&self.listing.id) {
            Some(entry) => (entry.price, entry.stock, entry.trade.clone()),
            None => {
                log::error!(
                    "no stock entry for listing {}, assuming stock of 1",
                    self.listing.id
                );
                (self.listing.value, StockCount::Finite(1), None)
            }
        };
        let in_stock = match stock {
            StockCount::Finite(count) => count,
            StockCount::Infinite => u32::MAX,
        };

        let (funds, unit) = if price > 0 {
            (session.wallet.amount(shop.currency()), price)
        } else if let Some(trade) = trade {
            // Barter listing: the trade item is the currency and the trade
            // count the price. Never divide by a non-positive price.
            (
                inventory.count_id(&trade.item_id) as i64,
                trade.count.max(1) as i64,
            )
        } else {
            log::error!(
                "listing {} has no positive price and no trade cost",
                self.listing.id
            );
            (0, 1)
        };

        let affordable = (funds / unit).clamp(0, u32::MAX as i64) as u32;
        let max = affordable.min(in_stock);
        self.max_purchasable = Some(max);
        max
    }
}

impl ShopAction for BuyAction {
    fn can_perform(
        &mut self,
        shop: &ShopState,
        inventory: &SlotCollection,
        session: &Session,
    ) -> bool {
        if let Some(cached) = self.can_perform {
            return cached;
        }
        let cursor_ok = match session.cursor.held() {
            None => true,
            Some(held) => held.can_stack_with(&self.listing) && !held.is_full(),
        };
        let ok = self.listing.self_stackable()
            && cursor_ok
            && self.max_purchasable(shop, inventory, session) > 0;
        self.can_perform = Some(ok);
        ok
    }

    fn default_amount(&self) -> u32 {
        self.default_amount
    }

    fn perform(
        &mut self,
        shop: &mut ShopState,
        inventory: &mut SlotCollection,
        session: &mut Session,
        events: &mut EventBus,
        amount: i64,
        _location: (i32, i32),
    ) -> u32 {
        let max = self.max_purchasable(shop, inventory, session);
        let mut amount = amount.clamp(0, max as i64) as u32;
        let headroom = self
            .listing
            .max_stack
            .saturating_sub(session.cursor.quantity());
        amount = amount.min(headroom);
        if amount == 0 {
            log::trace!("purchase of {} resolved to zero, aborted", self.listing.id);
            return 0;
        }
        match shop.purchase(&self.listing.id, amount, inventory, session, events) {
            Ok(true) => {
                shop.remove_listing(&self.listing.id);
                events.push(Event::ListingSoldOut {
                    item: self.listing.id.clone(),
                });
                amount
            }
            Ok(false) => amount,
            Err(err) => {
                log::warn!("purchase of {} failed: {err}", self.listing.id);
                0
            }
        }
    }
}

/// Sale of a stack from the player's inventory section.
#[derive(Debug, Clone)]
pub struct SellAction {
    item_id: String,
    slot: usize,
    can_perform: Option<bool>,
    default_amount: u32,
}

impl SellAction {
    /// Resolve the inventory stack under the pointer and build the action.
    pub fn create(
        inventory: &SlotCollection,
        layout: &SlotLayout,
        x: i32,
        y: i32,
    ) -> Option<SellAction> {
        let slot = layout.index_at(x, y)?;
        let stack = inventory.get(slot)?;
        Some(SellAction {
            item_id: stack.id.clone(),
            slot,
            can_perform: None,
            default_amount: (stack.quantity + 1) / 2,
        })
    }

    fn live<'a>(&self, inventory: &'a SlotCollection) -> Option<&'a ItemStack> {
        let stack = inventory.get(self.slot)?;
        (stack.id == self.item_id).then_some(stack)
    }
}

impl ShopAction for SellAction {
    fn can_perform(
        &mut self,
        shop: &ShopState,
        inventory: &SlotCollection,
        session: &Session,
    ) -> bool {
        if let Some(cached) = self.can_perform {
            return cached;
        }
        let ok = session.config.split_in_shop
            && self
                .live(inventory)
                .is_some_and(|stack| shop.buys(stack) && stack.quantity > 1);
        self.can_perform = Some(ok);
        ok
    }

    fn default_amount(&self) -> u32 {
        self.default_amount
    }

    fn perform(
        &mut self,
        shop: &mut ShopState,
        inventory: &mut SlotCollection,
        session: &mut Session,
        events: &mut EventBus,
        amount: i64,
        location: (i32, i32),
    ) -> u32 {
        let Some(stack) = self.live(inventory) else {
            log::trace!("sell selection went stale for {}", self.item_id);
            return 0;
        };
        let amount = amount.clamp(0, stack.quantity as i64) as u32;
        if amount == 0 {
            return 0;
        }
        let unit_value = stack.value;

        if let Some(stack) = inventory.get_mut(self.slot) {
            stack.quantity -= amount;
            if stack.quantity == 0 {
                inventory.clear_slot(self.slot);
            }
        }

        let proceeds = (shop.sell_fraction() * (unit_value * amount as i64) as f64).floor() as i64;
        session.wallet.credit(shop.currency(), proceeds);
        events.push(Event::ItemsSold {
            item: self.item_id.clone(),
            amount,
            proceeds,
        });

        if amount <= ANIMATION_CUTOFF {
            let coins = (amount / 8 + 2).min(COIN_CAP);
            events.push(Event::CoinsFlung {
                coins,
                x: location.0,
                y: location.1,
            });
        }
        amount
    }
}
