use serde::{Deserialize, Serialize};

pub use stacksplit_core::{
    Content, IngredientDef, ItemDef, RecipeDef, SplitConfig, StockCount, StockEntry, TradeCost,
};

/// One for-sale line of a shop fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockDef {
    pub item_id: String,
    #[serde(default)]
    pub price: i64,
    /// Absent means infinite stock.
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub trade_item: Option<String>,
    #[serde(default)]
    pub trade_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopDef {
    pub currency: String,
    #[serde(default = "default_sell_fraction")]
    pub sell_fraction: f64,
    pub listings: Vec<StockDef>,
}

fn default_sell_fraction() -> f64 {
    0.5
}
