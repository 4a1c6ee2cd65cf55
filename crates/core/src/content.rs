use crate::ItemStack;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub max_stack: u32,
    /// Base unit value, used as the sell-back price basis.
    #[serde(default)]
    pub value: i64,
    /// Container kinds refuse to stack while they hold anything.
    #[serde(default)]
    pub container: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDef {
    pub item_id: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDef {
    pub id: String,
    pub name: String,
    pub output: String,
    #[serde(default = "default_output_count")]
    pub output_count: u32,
    pub ingredients: Vec<IngredientDef>,
}

fn default_output_count() -> u32 {
    1
}

#[derive(Debug, Clone, Default)]
pub struct Content {
    pub items: Vec<ItemDef>,
    pub recipes: Vec<RecipeDef>,
}

impl Content {
    pub fn item_by_id(&self, id: &str) -> Option<&ItemDef> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn recipe_by_id(&self, id: &str) -> Option<&RecipeDef> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Instantiate a stack of a known item kind.
    pub fn make_stack(&self, id: &str, quantity: u32) -> Option<ItemStack> {
        self.item_by_id(id).map(|def| ItemStack::new(def, quantity))
    }
}
