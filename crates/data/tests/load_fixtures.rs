use stacksplit_core::{SplitConfig, StockCount};
use stacksplit_data::{load_config, load_content, load_shop};
use std::path::{Path, PathBuf};

fn assets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

#[test]
fn bundled_config_matches_the_defaults() {
    let config = load_config(&assets().join("config.json")).unwrap();
    let defaults = SplitConfig::default();
    assert_eq!(config.enabled, defaults.enabled);
    assert_eq!(config.default_shop_amount, defaults.default_shop_amount);
    assert_eq!(config.max_stacking_number, defaults.max_stacking_number);
}

#[test]
fn bundled_content_loads_and_resolves() {
    let content = load_content(&assets(), &SplitConfig::default()).unwrap();
    assert!(content.item_by_id("wood").is_some());
    let torch = content.recipe_by_id("torch").unwrap();
    assert_eq!(torch.output_count, 3);
    assert_eq!(torch.ingredients.len(), 2);
    let stack = content.make_stack("wood", 5).unwrap();
    assert_eq!(stack.quantity, 5);
    assert_eq!(stack.max_stack, 99);
}

#[test]
fn stacking_ceiling_clamps_item_definitions() {
    let mut config = SplitConfig::default();
    config.max_stacking_number = 50;
    let content = load_content(&assets(), &config).unwrap();
    assert!(content.items.iter().all(|item| item.max_stack <= 50));
    // Kinds below the ceiling keep their own limit.
    assert_eq!(content.item_by_id("sword").unwrap().max_stack, 1);
}

#[test]
fn bundled_shop_builds_with_every_listing() {
    let content = load_content(&assets(), &SplitConfig::default()).unwrap();
    let shop = load_shop(&assets().join("shop.json"), &content).unwrap();
    assert_eq!(shop.currency(), "gold");
    assert_eq!(shop.for_sale().len(), 5);

    let seeds = shop.stock_entry("seed_parsnip").unwrap();
    assert_eq!(seeds.stock, StockCount::Infinite);

    let gem = shop.stock_entry("gem_emerald").unwrap();
    assert_eq!(gem.price, 0);
    let trade = gem.trade.as_ref().unwrap();
    assert_eq!(trade.item_id, "wood");
    assert_eq!(trade.count, 30);
}

#[test]
fn dangling_recipe_references_are_rejected() {
    let dir = std::env::temp_dir().join("stacksplit-bad-content");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("items.json"),
        r#"[{ "id": "wood", "name": "Wood", "max_stack": 99 }]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("recipes.json"),
        r#"[{ "id": "plank", "name": "Plank", "output": "plank",
             "ingredients": [{ "item_id": "wood", "count": 2 }] }]"#,
    )
    .unwrap();

    let err = load_content(&dir, &SplitConfig::default()).unwrap_err();
    assert!(err.to_string().contains("unknown item"));
}

#[test]
fn zero_max_stack_is_rejected() {
    let dir = std::env::temp_dir().join("stacksplit-zero-stack");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("items.json"),
        r#"[{ "id": "wood", "name": "Wood", "max_stack": 0 }]"#,
    )
    .unwrap();
    std::fs::write(dir.join("recipes.json"), "[]").unwrap();

    let err = load_content(&dir, &SplitConfig::default()).unwrap_err();
    assert!(err.to_string().contains("zero max stack"));
}

#[test]
fn shop_listing_unknown_items_are_rejected() {
    let content = load_content(&assets(), &SplitConfig::default()).unwrap();
    let path = std::env::temp_dir().join("stacksplit-bad-shop.json");
    std::fs::write(
        &path,
        r#"{ "currency": "gold", "listings": [{ "item_id": "unobtainium", "price": 5 }] }"#,
    )
    .unwrap();

    let err = load_shop(&path, &content).unwrap_err();
    assert!(err.to_string().contains("unobtainium"));
}
