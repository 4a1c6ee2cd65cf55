use super::{split_click, InputHandled, PageHandler};
use crate::{EventBus, Page, PageBody, Session, SplitTarget};

/// Handler for generic item-grab pages: chests, loot windows, anything
/// that is just an inventory grid.
#[derive(Debug, Default)]
pub struct GrabPageHandler {
    split: SplitTarget,
    bound: bool,
}

impl PageHandler for GrabPageHandler {
    fn open(&mut self, page: &Page, _session: &Session) -> bool {
        let PageBody::Grab(grab) = &page.body else {
            return false;
        };
        self.split.init(&grab.inventory);
        self.bound = true;
        true
    }

    fn inventory_clicked(
        &mut self,
        page: &Page,
        session: &Session,
        x: i32,
        y: i32,
    ) -> InputHandled {
        debug_assert!(self.bound, "inventory_clicked on an unbound handler");
        let PageBody::Grab(grab) = &page.body else {
            return InputHandled::NotHandled;
        };
        split_click(&mut self.split, &grab.inventory, &grab.layout, session, x, y)
    }

    fn open_split_menu(&mut self, _page: &Page, _session: &Session, _x: i32, _y: i32) -> InputHandled {
        // Grab pages only react to inventory clicks.
        InputHandled::NotHandled
    }

    fn stack_amount_entered(
        &mut self,
        page: &mut Page,
        session: &mut Session,
        events: &mut EventBus,
        amount: i64,
    ) {
        let PageBody::Grab(grab) = &mut page.body else {
            return;
        };
        self.split
            .commit(&mut grab.inventory, &mut session.cursor, events, amount);
    }

    fn cancel(&mut self, page: &mut Page, session: &mut Session, events: &mut EventBus) {
        let PageBody::Grab(grab) = &mut page.body else {
            return;
        };
        self.split
            .cancel(&mut grab.inventory, &mut session.cursor, events);
    }

    fn close(&mut self) {
        self.split.reset();
        self.bound = false;
    }
}
