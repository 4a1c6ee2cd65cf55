use stacksplit_core::{
    Content, CraftingPage, CraftingPageHandler, Event, EventBus, GrabPage, HandlerKind,
    HandlerRegistry, IngredientDef, InputHandled, ItemDef, Page, PageBody, PageHandler, PageKind,
    RecipeDef, Session, ShopPage, ShopState, SlotCollection, SlotLayout, SplitConfig,
};

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
                id: "stone".into(),
                name: "Stone".into(),
                max_stack: 99,
                value: 2,
                container: false,
            },
            ItemDef {
                id: "plank".into(),
                name: "Plank".into(),
                max_stack: 99,
                value: 6,
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

fn layout() -> SlotLayout {
    SlotLayout::grid(0, 0, 4, 2, 16)
}

fn crafting_page(inventory_wood: u32, container_wood: u32) -> Page {
    let content = content();
    let mut inventory = SlotCollection::with_capacity(8);
    if inventory_wood > 0 {
        inventory.set(0, Some(content.make_stack("wood", inventory_wood).unwrap()));
    }
    let mut fridge = SlotCollection::with_capacity(4);
    if container_wood > 0 {
        fridge.set(0, Some(content.make_stack("wood", container_wood).unwrap()));
    }
    Page::crafting(
        PageKind::Crafting,
        CraftingPage {
            content,
            inventory,
            layout: layout(),
            containers: vec![fridge],
            hovered_recipe: Some("plank".into()),
        },
    )
}

#[test]
fn exact_tags_resolve_to_their_handlers() {
    let registry = HandlerRegistry::with_defaults();
    assert!(registry.resolve(PageKind::Crafting).is_some());
    assert!(registry.resolve(PageKind::ItemGrab).is_some());
    assert!(registry.resolve(PageKind::Shop).is_some());
    assert_ne!(
        registry.resolve(PageKind::Crafting),
        registry.resolve(PageKind::Shop)
    );
}

#[test]
fn unregistered_tags_fall_back_to_an_ancestor() {
    let registry = HandlerRegistry::with_defaults();
    // Chest and Cooking are never registered directly.
    assert_eq!(
        registry.resolve(PageKind::Chest),
        registry.resolve(PageKind::ItemGrab)
    );
    assert_eq!(
        registry.resolve(PageKind::Cooking),
        registry.resolve(PageKind::Crafting)
    );
}

#[test]
fn singletons_are_shared_across_tags() {
    let registry = HandlerRegistry::with_defaults();
    assert_eq!(
        registry.resolve(PageKind::ItemGrab),
        registry.resolve(PageKind::MenuWithInventory)
    );
}

#[test]
fn first_registered_ancestor_wins() {
    let mut registry = HandlerRegistry::new();
    registry.register(PageKind::MenuWithInventory, HandlerKind::Grab);
    registry.register(PageKind::ItemGrab, HandlerKind::Shop);
    // Chest descends from both; registration order decides.
    assert_eq!(
        registry.resolve(PageKind::Chest),
        registry.resolve(PageKind::MenuWithInventory)
    );
}

#[test]
fn re_registering_a_tag_replaces_its_handler() {
    let mut registry = HandlerRegistry::new();
    registry.register(PageKind::Shop, HandlerKind::Grab);
    registry.register(PageKind::Shop, HandlerKind::Shop);
    let id = registry.resolve(PageKind::Shop).unwrap();

    let page = Page::shop(ShopPage {
        shop: ShopState::new("gold", 0.5),
        inventory: SlotCollection::with_capacity(4),
        layout: layout(),
        sale_layout: layout(),
    });
    let session = Session::new(SplitConfig::default());
    let handler = registry.get_mut(id).unwrap();
    assert!(handler.open(&page, &session));
}

#[test]
fn named_pages_resolve_to_registered_handlers() {
    let registry = HandlerRegistry::with_defaults();
    let id = registry.resolve_named("CJBItemSpawner.Framework.ItemMenu");
    assert_eq!(id, registry.resolve(PageKind::ItemGrab));
    assert!(registry.resolve_named("SomeMod.UnknownMenu").is_none());
}

#[test]
fn open_refuses_the_wrong_page_kind() {
    let page = Page::grab(
        PageKind::ItemGrab,
        GrabPage {
            inventory: SlotCollection::with_capacity(4),
            layout: layout(),
        },
    );
    let session = Session::new(SplitConfig::default());
    let mut handler = CraftingPageHandler::default();
    assert!(!handler.open(&page, &session));
}

#[test]
fn close_is_idempotent() {
    let page = crafting_page(4, 0);
    let session = Session::new(SplitConfig::default());
    let mut handler = CraftingPageHandler::default();
    assert!(handler.open(&page, &session));
    handler.close();
    handler.close();
    assert!(handler.open(&page, &session));
}

#[test]
fn batch_craft_spans_inventory_and_containers() {
    let mut page = crafting_page(4, 3);
    let mut session = Session::new(SplitConfig::default());
    let mut events = EventBus::default();

    let mut handler = CraftingPageHandler::default();
    handler.open(&page, &session);
    // 7 wood at 2 apiece crafts 3; the default comes from config.
    assert_eq!(
        handler.open_split_menu(&page, &session, 200, 50),
        InputHandled::Consumed { default_amount: 1 }
    );
    handler.stack_amount_entered(&mut page, &mut session, &mut events, 10);

    assert_eq!(session.cursor.quantity(), 3);
    assert_eq!(session.cursor.held().map(|s| s.id.as_str()), Some("plank"));
    let PageBody::Crafting(crafting) = &page.body else {
        panic!("not a crafting page");
    };
    assert_eq!(crafting.inventory.count_id("wood"), 0);
    assert_eq!(crafting.containers[0].count_id("wood"), 1);

    let drained: Vec<Event> = events.drain().collect();
    assert_eq!(
        drained,
        vec![Event::Crafted {
            recipe: "plank".into(),
            count: 3,
        }]
    );
}

#[test]
fn craft_hotkey_needs_a_hovered_recipe() {
    let mut page = crafting_page(4, 0);
    let PageBody::Crafting(crafting) = &mut page.body else {
        panic!("not a crafting page");
    };
    crafting.hovered_recipe = None;
    let session = Session::new(SplitConfig::default());

    let mut handler = CraftingPageHandler::default();
    handler.open(&page, &session);
    assert_eq!(
        handler.open_split_menu(&page, &session, 200, 50),
        InputHandled::NotHandled
    );
}

#[test]
fn craft_hotkey_refuses_a_mismatched_held_item() {
    let page = crafting_page(8, 0);
    let mut session = Session::new(SplitConfig::default());
    session.cursor.set(content().make_stack("stone", 1).unwrap());

    let mut handler = CraftingPageHandler::default();
    handler.open(&page, &session);
    assert_eq!(
        handler.open_split_menu(&page, &session, 200, 50),
        InputHandled::NotHandled
    );
}

#[test]
fn craft_batch_is_capped_by_held_headroom() {
    let mut page = crafting_page(90, 90);
    let mut session = Session::new(SplitConfig::default());
    session.cursor.set(content().make_stack("plank", 95).unwrap());

    let mut handler = CraftingPageHandler::default();
    handler.open(&page, &session);
    let handled = handler.open_split_menu(&page, &session, 200, 50);
    assert!(handled.consumed());

    let mut events = EventBus::default();
    handler.stack_amount_entered(&mut page, &mut session, &mut events, 50);
    // 90 crafts of ingredients, but only 4 units fit on the cursor.
    assert_eq!(session.cursor.quantity(), 99);
}

#[test]
fn crafting_toggle_disables_the_hotkey() {
    let page = crafting_page(8, 0);
    let mut config = SplitConfig::default();
    config.split_in_crafting = false;
    let session = Session::new(config);

    let mut handler = CraftingPageHandler::default();
    handler.open(&page, &session);
    assert_eq!(
        handler.open_split_menu(&page, &session, 200, 50),
        InputHandled::NotHandled
    );
}

#[test]
fn cancel_abandons_a_pending_craft() {
    let mut page = crafting_page(8, 0);
    let mut session = Session::new(SplitConfig::default());
    let mut events = EventBus::default();

    let mut handler = CraftingPageHandler::default();
    handler.open(&page, &session);
    assert!(handler.open_split_menu(&page, &session, 200, 50).consumed());
    handler.cancel(&mut page, &mut session, &mut events);
    handler.stack_amount_entered(&mut page, &mut session, &mut events, 4);

    let PageBody::Crafting(crafting) = &page.body else {
        panic!("not a crafting page");
    };
    assert_eq!(crafting.inventory.count_id("wood"), 8);
    assert!(session.cursor.is_empty());
    assert_eq!(events.drain().count(), 0);
}

#[test]
fn stale_craft_degrades_to_a_noop() {
    let mut page = crafting_page(8, 0);
    let mut session = Session::new(SplitConfig::default());
    let mut events = EventBus::default();

    let mut handler = CraftingPageHandler::default();
    handler.open(&page, &session);
    assert!(handler.open_split_menu(&page, &session, 200, 50).consumed());
    // The ingredients vanish while the prompt is up.
    let PageBody::Crafting(crafting) = &mut page.body else {
        panic!("not a crafting page");
    };
    crafting.inventory.remove_id("wood", 8);
    handler.stack_amount_entered(&mut page, &mut session, &mut events, 4);

    assert!(session.cursor.is_empty());
    assert_eq!(events.drain().count(), 0);
}

#[test]
fn registry_drives_a_full_page_lifecycle() {
    let mut registry = HandlerRegistry::with_defaults();
    let mut page = crafting_page(4, 3);
    let mut session = Session::new(SplitConfig::default());
    let mut events = EventBus::default();

    let id = registry.resolve(page.kind).unwrap();
    let handler = registry.get_mut(id).unwrap();
    assert!(handler.open(&page, &session));
    assert!(handler.open_split_menu(&page, &session, 200, 50).consumed());
    handler.stack_amount_entered(&mut page, &mut session, &mut events, 3);
    handler.close();

    assert_eq!(session.cursor.quantity(), 3);
}
