use super::{InputHandled, PageHandler};
use crate::{BuyAction, EventBus, Page, PageBody, SellAction, Session, ShopAction, SlotCache};

/// Handler for shop pages: buys from the listing, sells from the
/// inventory section. One action lives from click to confirmed amount.
#[derive(Default)]
pub struct ShopPageHandler {
    cache: SlotCache,
    bound: bool,
    pending: Option<(Box<dyn ShopAction>, (i32, i32))>,
}

impl PageHandler for ShopPageHandler {
    fn open(&mut self, page: &Page, _session: &Session) -> bool {
        let PageBody::Shop(shop) = &page.body else {
            return false;
        };
        self.cache.refresh(&shop.inventory);
        self.pending = None;
        self.bound = true;
        true
    }

    /// A click in the inventory section starts a sale.
    fn inventory_clicked(
        &mut self,
        page: &Page,
        session: &Session,
        x: i32,
        y: i32,
    ) -> InputHandled {
        debug_assert!(self.bound, "inventory_clicked on an unbound handler");
        if !session.config.enabled || !session.config.split_in_shop {
            return InputHandled::NotHandled;
        }
        let PageBody::Shop(shop_page) = &page.body else {
            return InputHandled::NotHandled;
        };
        let Some(mut action) = SellAction::create(&shop_page.inventory, &shop_page.layout, x, y)
        else {
            return InputHandled::NotHandled;
        };
        if !action.can_perform(&shop_page.shop, &shop_page.inventory, session) {
            return InputHandled::NotHandled;
        }
        let default_amount = action.default_amount();
        self.pending = Some((Box::new(action), (x, y)));
        InputHandled::Consumed { default_amount }
    }

    /// A click on the for-sale listing starts a purchase.
    fn open_split_menu(&mut self, page: &Page, session: &Session, x: i32, y: i32) -> InputHandled {
        if !session.config.enabled || !session.config.split_in_shop {
            return InputHandled::NotHandled;
        }
        let PageBody::Shop(shop_page) = &page.body else {
            return InputHandled::NotHandled;
        };
        let Some(mut action) = BuyAction::create(
            &shop_page.shop,
            &shop_page.sale_layout,
            &shop_page.inventory,
            session,
            x,
            y,
        ) else {
            return InputHandled::NotHandled;
        };
        if !action.can_perform(&shop_page.shop, &shop_page.inventory, session) {
            return InputHandled::NotHandled;
        }
        let default_amount = action.default_amount();
        self.pending = Some((Box::new(action), (x, y)));
        InputHandled::Consumed { default_amount }
    }

    fn stack_amount_entered(
        &mut self,
        page: &mut Page,
        session: &mut Session,
        events: &mut EventBus,
        amount: i64,
    ) {
        let Some((mut action, location)) = self.pending.take() else {
            return;
        };
        let PageBody::Shop(shop_page) = &mut page.body else {
            return;
        };
        action.perform(
            &mut shop_page.shop,
            &mut shop_page.inventory,
            session,
            events,
            amount,
            location,
        );
        if self.cache.refresh(&shop_page.inventory) {
            log::trace!(
                "shop inventory changed, {} slots occupied",
                self.cache.non_empty_count()
            );
        }
    }

    fn cancel(&mut self, _page: &mut Page, _session: &mut Session, _events: &mut EventBus) {
        // A dismissed prompt abandons the action with no mutation.
        self.pending = None;
    }

    fn close(&mut self) {
        self.pending = None;
        self.bound = false;
    }
}
