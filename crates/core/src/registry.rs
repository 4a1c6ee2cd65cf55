use crate::handlers::{CraftingPageHandler, GrabPageHandler, PageHandler, ShopPageHandler};
use crate::PageKind;
use std::collections::HashMap;

/// The closed set of handler kinds, each with its factory. Replaces
/// reflection-built singletons with an explicit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Grab,
    Crafting,
    Shop,
}

impl HandlerKind {
    fn build(self) -> Box<dyn PageHandler> {
        match self {
            HandlerKind::Grab => Box::<GrabPageHandler>::default(),
            HandlerKind::Crafting => Box::<CraftingPageHandler>::default(),
            HandlerKind::Shop => Box::<ShopPageHandler>::default(),
        }
    }
}

/// Opaque ticket for a registered handler instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(usize);

/// Maps a page's type tag, or an external page name, to the singleton
/// handler that owns it.
///
/// Resolution tries an exact tag match first, then walks the registrations
/// in insertion order looking for one the page descends from, so the
/// first-registered ancestor wins.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn PageHandler>>,
    singletons: HashMap<HandlerKind, HandlerId>,
    by_kind: Vec<(PageKind, HandlerId)>,
    by_name: HashMap<String, HandlerId>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the standard pages and the known external
    /// page names from other mods.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PageKind::Crafting, HandlerKind::Crafting);
        registry.register(PageKind::ItemGrab, HandlerKind::Grab);
        registry.register(PageKind::MenuWithInventory, HandlerKind::Grab);
        registry.register(PageKind::Shop, HandlerKind::Shop);
        registry.register_known_externals();
        registry
    }

    /// Foreign pages we know behave like plain item grabs.
    pub fn register_known_externals(&mut self) {
        self.register_named("CJBItemSpawner.Framework.ItemMenu", HandlerKind::Grab);
    }

    fn singleton(&mut self, kind: HandlerKind) -> HandlerId {
        if let Some(id) = self.singletons.get(&kind) {
            return *id;
        }
        let id = HandlerId(self.handlers.len());
        self.handlers.push(kind.build());
        self.singletons.insert(kind, id);
        id
    }

    pub fn register(&mut self, page: PageKind, handler: HandlerKind) {
        let id = self.singleton(handler);
        self.register_instance_id(page, id);
    }

    /// Register a caller-built handler instance for one page tag.
    pub fn register_instance(&mut self, page: PageKind, handler: Box<dyn PageHandler>) {
        let id = HandlerId(self.handlers.len());
        self.handlers.push(handler);
        self.register_instance_id(page, id);
    }

    fn register_instance_id(&mut self, page: PageKind, id: HandlerId) {
        if let Some(slot) = self.by_kind.iter_mut().find(|(kind, _)| *kind == page) {
            log::warn!("redefining handler for {page:?}");
            slot.1 = id;
            return;
        }
        self.by_kind.push((page, id));
    }

    pub fn register_named(&mut self, name: &str, handler: HandlerKind) {
        if self.by_name.contains_key(name) {
            log::warn!("redefining handler for {name}");
        }
        let id = self.singleton(handler);
        self.by_name.insert(name.to_string(), id);
    }

    pub fn resolve(&self, page: PageKind) -> Option<HandlerId> {
        if let Some((_, id)) = self.by_kind.iter().find(|(kind, _)| *kind == page) {
            return Some(*id);
        }
        self.by_kind
            .iter()
            .find(|(kind, _)| page.is_descendant_of(*kind))
            .map(|(_, id)| *id)
    }

    pub fn resolve_named(&self, name: &str) -> Option<HandlerId> {
        self.by_name.get(name).copied()
    }

    pub fn get_mut(&mut self, id: HandlerId) -> Option<&mut dyn PageHandler> {
        self.handlers.get_mut(id.0).map(|handler| &mut **handler as &mut dyn PageHandler)
    }
}
