use crate::{EventBus, Page, Session, SlotCollection, SlotLayout, SplitTarget};

mod crafting;
mod grab;
mod shop;

pub use crafting::CraftingPageHandler;
pub use grab::GrabPageHandler;
pub use shop::ShopPageHandler;

/// Outcome of offering an input event to a handler. `NotHandled` lets the
/// event fall through to the host's default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHandled {
    NotHandled,
    Consumed { default_amount: u32 },
}

impl InputHandled {
    pub fn consumed(&self) -> bool {
        matches!(self, InputHandled::Consumed { .. })
    }
}

/// Per-page-type adapter wiring the split and shop interactions into one
/// interface's click/hotkey/cancel lifecycle.
///
/// Lifecycle: `open` binds to a live page (or refuses it), then any number
/// of `inventory_clicked`/`open_split_menu` selections each followed by
/// `stack_amount_entered` or `cancel`, then `close`. Handlers are
/// singletons reused across every page of their type.
pub trait PageHandler {
    /// Bind to a live page. Returns false when the page is not the kind
    /// this handler services, telling the caller to try another handler.
    fn open(&mut self, page: &Page, session: &Session) -> bool;

    /// The inventory section was modifier-clicked at a pointer position.
    fn inventory_clicked(
        &mut self,
        page: &Page,
        session: &Session,
        x: i32,
        y: i32,
    ) -> InputHandled;

    /// The split hotkey fired at a pointer position. Page-specific.
    fn open_split_menu(&mut self, page: &Page, session: &Session, x: i32, y: i32) -> InputHandled;

    /// The user confirmed an amount in the prompt.
    fn stack_amount_entered(
        &mut self,
        page: &mut Page,
        session: &mut Session,
        events: &mut EventBus,
        amount: i64,
    );

    /// The prompt was dismissed without a number.
    fn cancel(&mut self, page: &mut Page, session: &mut Session, events: &mut EventBus);

    /// Release all bound state. Idempotent.
    fn close(&mut self);
}

/// Shared inventory-click logic: select the hovered stack and consume the
/// click when a split is legal right now.
fn split_click(
    split: &mut SplitTarget,
    slots: &SlotCollection,
    layout: &SlotLayout,
    session: &Session,
    x: i32,
    y: i32,
) -> InputHandled {
    if !session.config.enabled {
        return InputHandled::NotHandled;
    }
    split.select(slots, layout, x, y);
    if split.can_split(slots, &session.cursor) {
        InputHandled::Consumed {
            default_amount: split.default_amount(slots),
        }
    } else {
        InputHandled::NotHandled
    }
}
