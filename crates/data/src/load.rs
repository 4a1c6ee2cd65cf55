use crate::schema::{ShopDef, StockDef};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use stacksplit_core::{Content, ItemDef, RecipeDef, ShopState, SplitConfig, StockCount, StockEntry, TradeCost};
use std::fs;
use std::path::Path;

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

pub fn load_config(path: &Path) -> anyhow::Result<SplitConfig> {
    load_json(path)
}

/// Load item and recipe definitions, clamping every kind's max stack to the
/// configured stacking ceiling and validating recipe references.
pub fn load_content(dir: &Path, config: &SplitConfig) -> anyhow::Result<Content> {
    let mut items: Vec<ItemDef> = load_json(&dir.join("items.json"))?;
    let recipes: Vec<RecipeDef> = load_json(&dir.join("recipes.json"))?;

    for item in &mut items {
        if item.max_stack == 0 {
            bail!("item {} has a zero max stack", item.id);
        }
        item.max_stack = item.max_stack.min(config.max_stacking_number);
    }

    let content = Content { items, recipes };
    for recipe in &content.recipes {
        if content.item_by_id(&recipe.output).is_none() {
            bail!("recipe {} outputs unknown item {}", recipe.id, recipe.output);
        }
        for ingredient in &recipe.ingredients {
            if content.item_by_id(&ingredient.item_id).is_none() {
                bail!(
                    "recipe {} uses unknown ingredient {}",
                    recipe.id,
                    ingredient.item_id
                );
            }
        }
    }
    Ok(content)
}

/// Build a live shop from a fixture, resolving listing templates against
/// the content registry.
pub fn load_shop(path: &Path, content: &Content) -> anyhow::Result<ShopState> {
    let def: ShopDef = load_json(path)?;
    let mut shop = ShopState::new(&def.currency, def.sell_fraction);
    for listing in &def.listings {
        let template = content
            .make_stack(&listing.item_id, 1)
            .with_context(|| format!("shop lists unknown item {}", listing.item_id))?;
        shop.add_listing(template, stock_entry(listing));
    }
    Ok(shop)
}

fn stock_entry(listing: &StockDef) -> StockEntry {
    let stock = match listing.stock {
        Some(count) => StockCount::Finite(count),
        None => StockCount::Infinite,
    };
    let trade = listing.trade_item.as_ref().map(|item_id| TradeCost {
        item_id: item_id.clone(),
        count: listing.trade_count.unwrap_or(1),
    });
    StockEntry {
        price: listing.price,
        stock,
        trade,
    }
}
