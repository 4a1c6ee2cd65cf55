use stacksplit_core::{
    Content, CraftingPage, EventBus, GrabPage, HandlerId, HandlerRegistry, InputHandled, Page,
    PageBody, PageKind, Session, ShopPage, ShopState, SlotCollection, SlotLayout,
};
use stacksplit_data::{load_config, load_content, load_shop};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const INVENTORY_CAPACITY: usize = 36;
const FRIDGE_CAPACITY: usize = 9;

struct OpenPage {
    page: Page,
    handler: HandlerId,
    prompt: Option<u32>,
}

struct App {
    session: Session,
    content: Content,
    registry: HandlerRegistry,
    shop: ShopState,
    inventory: SlotCollection,
    fridge: SlotCollection,
    open: Option<OpenPage>,
    events: EventBus,
}

impl App {
    fn inventory_layout() -> SlotLayout {
        SlotLayout::grid(0, 100, 12, 3, 32)
    }

    fn sale_layout(rows: usize) -> SlotLayout {
        SlotLayout::grid(400, 0, 1, rows.max(1), 32)
    }

    fn give(&mut self, target: &str, item: &str, quantity: u32) -> Result<(), String> {
        if self.open.is_some() {
            return Err("close the current page first".into());
        }
        let stack = self
            .content
            .make_stack(item, quantity)
            .ok_or_else(|| format!("unknown item: {item}"))?;
        let slots = match target {
            "inv" => &mut self.inventory,
            "fridge" => &mut self.fridge,
            other => return Err(format!("unknown target: {other}")),
        };
        let free = (0..slots.len())
            .find(|&index| slots.get(index).is_none())
            .ok_or("no free slot")?;
        slots.set(free, Some(stack));
        Ok(())
    }

    fn open_page(&mut self, name: &str) -> Result<(), String> {
        if self.open.is_some() {
            return Err("a page is already open".into());
        }
        let inventory = std::mem::take(&mut self.inventory);
        let layout = Self::inventory_layout();
        let page = match name {
            "grab" | "chest" => {
                let kind = if name == "chest" {
                    PageKind::Chest
                } else {
                    PageKind::ItemGrab
                };
                Page::grab(kind, GrabPage { inventory, layout })
            }
            "crafting" | "cooking" => {
                let kind = if name == "cooking" {
                    PageKind::Cooking
                } else {
                    PageKind::Crafting
                };
                let containers = if name == "cooking" {
                    vec![std::mem::take(&mut self.fridge)]
                } else {
                    Vec::new()
                };
                Page::crafting(
                    kind,
                    CraftingPage {
                        content: self.content.clone(),
                        inventory,
                        layout,
                        containers,
                        hovered_recipe: None,
                    },
                )
            }
            "shop" => Page::shop(ShopPage {
                shop: self.shop.clone(),
                inventory,
                layout,
                sale_layout: Self::sale_layout(self.shop.for_sale().len()),
            }),
            other => {
                self.inventory = inventory;
                return Err(format!("unknown page: {other}"));
            }
        };

        let Some(handler) = self.registry.resolve(page.kind) else {
            let kind = page.kind;
            self.recover_page_state(page);
            return Err(format!("no handler registered for {kind:?}"));
        };
        let bound = self
            .registry
            .get_mut(handler)
            .map(|h| h.open(&page, &self.session))
            .unwrap_or(false);
        if !bound {
            let kind = page.kind;
            self.recover_page_state(page);
            return Err(format!("handler refused page {kind:?}"));
        }
        self.open = Some(OpenPage {
            page,
            handler,
            prompt: None,
        });
        Ok(())
    }

    /// Move the inventory (and fridge) out of a page back into the app.
    fn recover_page_state(&mut self, page: Page) {
        match page.body {
            PageBody::Grab(grab) => self.inventory = grab.inventory,
            PageBody::Crafting(mut crafting) => {
                self.inventory = crafting.inventory;
                if let Some(fridge) = crafting.containers.pop() {
                    self.fridge = fridge;
                }
            }
            PageBody::Shop(shop_page) => {
                self.inventory = shop_page.inventory;
                self.shop = shop_page.shop;
            }
        }
    }

    fn close_page(&mut self) -> Result<(), String> {
        let open = self.open.take().ok_or("no page open")?;
        if let Some(handler) = self.registry.get_mut(open.handler) {
            handler.close();
        }
        self.recover_page_state(open.page);
        Ok(())
    }

    fn click(&mut self, x: i32, y: i32) -> Result<(), String> {
        let open = self.open.as_mut().ok_or("no page open")?;
        let handler = self
            .registry
            .get_mut(open.handler)
            .ok_or("handler vanished")?;
        match handler.inventory_clicked(&open.page, &self.session, x, y) {
            InputHandled::Consumed { default_amount } => {
                open.prompt = Some(default_amount);
                println!("amount? [default {default_amount}] (use: enter <n> | cancel)");
            }
            InputHandled::NotHandled => println!("click fell through to default behavior"),
        }
        Ok(())
    }

    fn hotkey(&mut self, x: i32, y: i32) -> Result<(), String> {
        let open = self.open.as_mut().ok_or("no page open")?;
        let handler = self
            .registry
            .get_mut(open.handler)
            .ok_or("handler vanished")?;
        match handler.open_split_menu(&open.page, &self.session, x, y) {
            InputHandled::Consumed { default_amount } => {
                open.prompt = Some(default_amount);
                println!("amount? [default {default_amount}] (use: enter <n> | cancel)");
            }
            InputHandled::NotHandled => println!("hotkey fell through to default behavior"),
        }
        Ok(())
    }

    fn enter(&mut self, amount: i64) -> Result<(), String> {
        let open = self.open.as_mut().ok_or("no page open")?;
        if open.prompt.take().is_none() {
            return Err("no amount prompt is open".into());
        }
        let handler = self
            .registry
            .get_mut(open.handler)
            .ok_or("handler vanished")?;
        handler.stack_amount_entered(&mut open.page, &mut self.session, &mut self.events, amount);
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), String> {
        let open = self.open.as_mut().ok_or("no page open")?;
        if open.prompt.take().is_none() {
            return Err("no amount prompt is open".into());
        }
        let handler = self
            .registry
            .get_mut(open.handler)
            .ok_or("handler vanished")?;
        handler.cancel(&mut open.page, &mut self.session, &mut self.events);
        Ok(())
    }

    fn slot_coords(&self, slot: usize) -> (i32, i32) {
        let (x, y) = Self::inventory_layout().origin_of(slot);
        (x + 1, y + 1)
    }

    fn sale_coords(&self, index: usize) -> (i32, i32) {
        let rows = match self.open.as_ref().map(|open| &open.page.body) {
            Some(PageBody::Shop(shop_page)) => shop_page.shop.for_sale().len(),
            _ => self.shop.for_sale().len(),
        };
        let (x, y) = Self::sale_layout(rows).origin_of(index);
        (x + 1, y + 1)
    }

    fn hover(&mut self, recipe: &str) -> Result<(), String> {
        let open = self.open.as_mut().ok_or("no page open")?;
        let PageBody::Crafting(crafting) = &mut open.page.body else {
            return Err("not a crafting page".into());
        };
        crafting.hovered_recipe = Some(recipe.to_string());
        Ok(())
    }

    fn print_state(&self) {
        let currency = self.shop.currency();
        println!("wallet: {} {currency}", self.session.wallet.amount(currency));
        match self.session.cursor.held() {
            Some(held) => println!("cursor: {} x{}", held.id, held.quantity),
            None => println!("cursor: empty"),
        }
        let (inventory, label) = match self.open.as_ref().map(|open| &open.page.body) {
            Some(PageBody::Grab(page)) => (&page.inventory, "page inventory"),
            Some(PageBody::Crafting(page)) => (&page.inventory, "page inventory"),
            Some(PageBody::Shop(page)) => (&page.inventory, "page inventory"),
            None => (&self.inventory, "inventory"),
        };
        println!("{label} ({} occupied):", inventory.non_empty_count());
        for (index, slot) in inventory.iter().enumerate() {
            if let Some(stack) = slot {
                println!("  [{index:2}] {} x{}", stack.id, stack.quantity);
            }
        }
        if let Some(PageBody::Shop(page)) = self.open.as_ref().map(|open| &open.page.body) {
            println!("for sale:");
            for (index, listing) in page.shop.for_sale().iter().enumerate() {
                let entry = page.shop.stock_entry(&listing.id);
                let price = entry.map_or(0, |entry| entry.price);
                println!("  ({index}) {} @ {price}", listing.id);
            }
        }
    }

    fn drain_events(&mut self) {
        for event in self.events.drain() {
            match serde_json::to_string(&event) {
                Ok(line) => println!("event: {line}"),
                Err(_) => println!("event: {event:?}"),
            }
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  open <grab|chest|crafting|cooking|shop>   open a page");
    println!("  close                                     close the page");
    println!("  split <slot>        modifier-click an inventory slot");
    println!("  sell <slot>         same as split, on a shop page");
    println!("  buy <index>         hotkey a for-sale listing");
    println!("  craft <recipe>      hover a recipe and hit the split hotkey");
    println!("  click <x> <y>       raw inventory click");
    println!("  hotkey <x> <y>      raw split hotkey");
    println!("  enter <amount>      confirm the amount prompt");
    println!("  cancel              dismiss the amount prompt");
    println!("  give <inv|fridge> <item> <qty>            add items");
    println!("  money <amount>      credit the wallet");
    println!("  state | help | quit");
}

fn run_command(app: &mut App, line: &str) -> Result<bool, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let parse_usize = |value: &str| value.parse::<usize>().map_err(|_| "expected a number".to_string());
    let parse_i64 = |value: &str| value.parse::<i64>().map_err(|_| "expected a number".to_string());
    match parts.as_slice() {
        [] => {}
        ["quit"] | ["exit"] => return Ok(false),
        ["help"] | ["?"] => print_help(),
        ["state"] => app.print_state(),
        ["open", name] => app.open_page(name)?,
        ["close"] => app.close_page()?,
        ["split", slot] | ["sell", slot] => {
            let (x, y) = app.slot_coords(parse_usize(slot)?);
            app.click(x, y)?;
        }
        ["buy", index] => {
            let (x, y) = app.sale_coords(parse_usize(index)?);
            app.hotkey(x, y)?;
        }
        ["craft", recipe] => {
            app.hover(recipe)?;
            app.hotkey(200, 50)?;
        }
        ["click", x, y] => app.click(parse_i64(x)? as i32, parse_i64(y)? as i32)?,
        ["hotkey", x, y] => app.hotkey(parse_i64(x)? as i32, parse_i64(y)? as i32)?,
        ["enter", amount] => app.enter(parse_i64(amount)?)?,
        ["cancel"] => app.cancel()?,
        ["give", target, item, quantity] => {
            let quantity = parse_i64(quantity)?;
            if quantity <= 0 {
                return Err("quantity must be positive".into());
            }
            app.give(target, item, quantity as u32)?;
        }
        ["money", amount] => {
            let currency = app.shop.currency().to_string();
            app.session.wallet.credit(&currency, parse_i64(amount)?);
        }
        _ => return Err(format!("unknown command: {line} (try 'help')")),
    }
    Ok(true)
}

fn main() -> anyhow::Result<()> {
    let assets: PathBuf = std::env::args().nth(1).unwrap_or_else(|| "assets".into()).into();
    let config = load_config(&assets.join("config.json"))?;

    let mut builder = env_logger::Builder::from_default_env();
    if config.debug && std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Trace);
    }
    builder.init();

    let content = load_content(&assets, &config)?;
    let shop = load_shop(&assets.join("shop.json"), &content)?;

    let mut app = App {
        session: Session::new(config),
        content,
        registry: HandlerRegistry::with_defaults(),
        shop,
        inventory: SlotCollection::with_capacity(INVENTORY_CAPACITY),
        fridge: SlotCollection::with_capacity(FRIDGE_CAPACITY),
        open: None,
        events: EventBus::default(),
    };
    let currency = app.shop.currency().to_string();
    app.session.wallet.credit(&currency, 500);
    let _ = app.give("inv", "wood", 40);
    let _ = app.give("inv", "stone", 10);
    let _ = app.give("inv", "fiber", 10);
    let _ = app.give("fridge", "wood", 5);
    let _ = app.give("fridge", "fiber", 6);

    println!("stack-split demo. 'help' lists commands.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match run_command(&mut app, line.trim()) {
            Ok(true) => app.drain_events(),
            Ok(false) => break,
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}
