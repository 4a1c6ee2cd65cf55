use crate::{Content, ShopState, SlotCollection, SlotLayout};
use serde::{Deserialize, Serialize};

/// Stable tag for a concrete interface type. Stands in for the host's
/// runtime page classes; subclass relationships become explicit ancestor
/// lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    MenuWithInventory,
    ItemGrab,
    Chest,
    Crafting,
    Cooking,
    Shop,
}

impl PageKind {
    /// Ancestor tags, nearest first.
    pub fn ancestors(self) -> &'static [PageKind] {
        match self {
            PageKind::ItemGrab => &[PageKind::MenuWithInventory],
            PageKind::Chest => &[PageKind::ItemGrab, PageKind::MenuWithInventory],
            PageKind::Cooking => &[PageKind::Crafting],
            _ => &[],
        }
    }

    /// Strict-subclass test against another tag.
    pub fn is_descendant_of(self, other: PageKind) -> bool {
        self.ancestors().contains(&other)
    }
}

/// One live interface instance, as the typed view the core needs.
#[derive(Debug)]
pub struct Page {
    pub kind: PageKind,
    pub body: PageBody,
}

#[derive(Debug)]
pub enum PageBody {
    Grab(GrabPage),
    Crafting(CraftingPage),
    Shop(ShopPage),
}

/// Generic item-grab page: one inventory grid, nothing else.
#[derive(Debug)]
pub struct GrabPage {
    pub inventory: SlotCollection,
    pub layout: SlotLayout,
}

/// Crafting or cooking page: inventory plus a recipe list, optionally
/// linked to extra ingredient containers (the fridge and friends).
#[derive(Debug)]
pub struct CraftingPage {
    pub content: Content,
    pub inventory: SlotCollection,
    pub layout: SlotLayout,
    pub containers: Vec<SlotCollection>,
    /// Recipe currently under the pointer, maintained by the host.
    pub hovered_recipe: Option<String>,
}

/// Shop page: for-sale listing above the player's inventory section.
#[derive(Debug)]
pub struct ShopPage {
    pub shop: ShopState,
    pub inventory: SlotCollection,
    pub layout: SlotLayout,
    pub sale_layout: SlotLayout,
}

impl Page {
    pub fn grab(kind: PageKind, page: GrabPage) -> Self {
        Self {
            kind,
            body: PageBody::Grab(page),
        }
    }

    pub fn crafting(kind: PageKind, page: CraftingPage) -> Self {
        Self {
            kind,
            body: PageBody::Crafting(page),
        }
    }

    pub fn shop(page: ShopPage) -> Self {
        Self {
            kind: PageKind::Shop,
            body: PageBody::Shop(page),
        }
    }

    /// The page's inventory section, when it has one.
    pub fn inventory(&self) -> Option<&SlotCollection> {
        match &self.body {
            PageBody::Grab(page) => Some(&page.inventory),
            PageBody::Crafting(page) => Some(&page.inventory),
            PageBody::Shop(page) => Some(&page.inventory),
        }
    }
}
