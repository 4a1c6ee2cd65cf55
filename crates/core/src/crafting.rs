use crate::{Content, Cursor, Event, EventBus, RecipeDef, SlotCollection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CraftError {
    #[error("unknown output item: {0}")]
    UnknownItem(String),
    #[error("missing ingredients for {0}")]
    MissingIngredients(String),
    #[error("output does not stack with the held item")]
    HeldMismatch,
}

/// Total units of one kind across the inventory and any linked containers.
pub fn available_count(sources: &[&SlotCollection], item_id: &str) -> u64 {
    sources.iter().map(|slots| slots.count_id(item_id)).sum()
}

/// How many times the recipe can be crafted from the combined sources.
pub fn craftable_count(recipe: &RecipeDef, sources: &[&SlotCollection]) -> u32 {
    recipe
        .ingredients
        .iter()
        .map(|ingredient| {
            let need = ingredient.count.max(1) as u64;
            (available_count(sources, &ingredient.item_id) / need).min(u32::MAX as u64) as u32
        })
        .min()
        .unwrap_or(0)
}

pub fn has_ingredients(recipe: &RecipeDef, sources: &[&SlotCollection]) -> bool {
    craftable_count(recipe, sources) >= 1
}

/// Consume ingredients for `count` crafts, drawing from the inventory first
/// and only then from the linked containers.
fn consume_ingredients(
    recipe: &RecipeDef,
    count: u32,
    inventory: &mut SlotCollection,
    containers: &mut [SlotCollection],
) {
    for ingredient in &recipe.ingredients {
        let mut need = ingredient.count.max(1) as u64 * count as u64;
        need -= inventory.remove_id(&ingredient.item_id, need);
        for container in containers.iter_mut() {
            if need == 0 {
                break;
            }
            need -= container.remove_id(&ingredient.item_id, need);
        }
        debug_assert!(need == 0, "ingredient availability checked before consuming");
    }
}

/// Craft `count` outputs onto the cursor in a single batch.
///
/// Availability and cursor compatibility are re-checked here because the
/// sources may have shifted between the prompt opening and the amount being
/// confirmed; a stale request fails without consuming anything.
pub fn craft(
    content: &Content,
    recipe: &RecipeDef,
    count: u32,
    inventory: &mut SlotCollection,
    containers: &mut [SlotCollection],
    cursor: &mut Cursor,
    events: &mut EventBus,
) -> Result<u32, CraftError> {
    if count == 0 {
        return Ok(0);
    }
    let output = content
        .make_stack(&recipe.output, recipe.output_count.max(1) * count)
        .ok_or_else(|| CraftError::UnknownItem(recipe.output.clone()))?;

    if let Some(held) = cursor.held() {
        if !held.can_stack_with(&output) {
            return Err(CraftError::HeldMismatch);
        }
    }

    {
        let mut sources: Vec<&SlotCollection> = vec![&*inventory];
        sources.extend(containers.iter());
        if craftable_count(recipe, &sources) < count {
            return Err(CraftError::MissingIngredients(recipe.id.clone()));
        }
    }

    consume_ingredients(recipe, count, inventory, containers);
    // Checked against the held item above; absorb cannot fail.
    cursor.absorb(output);
    events.push(Event::Crafted {
        recipe: recipe.id.clone(),
        count,
    });
    log::trace!("crafted {} x{count}", recipe.id);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IngredientDef, ItemDef, ItemStack};

    fn content() -> Content {
        Content {
            items: vec![
                ItemDef {
                    id: "wood".into(),
                    name: "Wood".into(),
                    max_stack: 99,
                    value: 2,
                    container: false,
                },
                ItemDef {
                    id: "plank".into(),
                    name: "Plank".into(),
                    max_stack: 99,
                    value: 5,
                    container: false,
                },
            ],
            recipes: vec![RecipeDef {
                id: "plank".into(),
                name: "Plank".into(),
                output: "plank".into(),
                output_count: 1,
                ingredients: vec![IngredientDef {
                    item_id: "wood".into(),
                    count: 2,
                }],
            }],
        }
    }

    fn stack(content: &Content, id: &str, quantity: u32) -> ItemStack {
        content.make_stack(id, quantity).unwrap()
    }

    #[test]
    fn craftable_count_spans_containers() {
        let content = content();
        let recipe = content.recipe_by_id("plank").unwrap();
        let mut inventory = SlotCollection::with_capacity(4);
        inventory.set(0, Some(stack(&content, "wood", 4)));
        let mut fridge = SlotCollection::with_capacity(4);
        fridge.set(2, Some(stack(&content, "wood", 3)));
        assert_eq!(craftable_count(recipe, &[&inventory, &fridge]), 3);
    }

    #[test]
    fn craft_consumes_inventory_before_containers() {
        let content = content();
        let recipe = content.recipe_by_id("plank").unwrap().clone();
        let mut inventory = SlotCollection::with_capacity(2);
        inventory.set(0, Some(stack(&content, "wood", 4)));
        let mut containers = vec![SlotCollection::with_capacity(2)];
        containers[0].set(0, Some(stack(&content, "wood", 3)));
        let mut cursor = Cursor::default();
        let mut events = EventBus::default();

        let crafted = craft(
            &content,
            &recipe,
            3,
            &mut inventory,
            &mut containers,
            &mut cursor,
            &mut events,
        )
        .unwrap();
        assert_eq!(crafted, 3);
        assert_eq!(cursor.quantity(), 3);
        assert_eq!(inventory.count_id("wood"), 0);
        assert_eq!(containers[0].count_id("wood"), 1);
    }

    #[test]
    fn craft_refuses_mismatched_held_item() {
        let content = content();
        let recipe = content.recipe_by_id("plank").unwrap().clone();
        let mut inventory = SlotCollection::with_capacity(2);
        inventory.set(0, Some(stack(&content, "wood", 8)));
        let mut cursor = Cursor::default();
        cursor.set(stack(&content, "wood", 1));
        let mut events = EventBus::default();

        let result = craft(
            &content,
            &recipe,
            1,
            &mut inventory,
            &mut [],
            &mut cursor,
            &mut events,
        );
        assert!(matches!(result, Err(CraftError::HeldMismatch)));
        assert_eq!(inventory.count_id("wood"), 8);
    }

    #[test]
    fn stale_request_fails_without_consuming() {
        let content = content();
        let recipe = content.recipe_by_id("plank").unwrap().clone();
        let mut inventory = SlotCollection::with_capacity(2);
        inventory.set(0, Some(stack(&content, "wood", 2)));
        let mut cursor = Cursor::default();
        let mut events = EventBus::default();

        let result = craft(
            &content,
            &recipe,
            2,
            &mut inventory,
            &mut [],
            &mut cursor,
            &mut events,
        );
        assert!(matches!(result, Err(CraftError::MissingIngredients(_))));
        assert_eq!(inventory.count_id("wood"), 2);
        assert!(cursor.is_empty());
    }
}
