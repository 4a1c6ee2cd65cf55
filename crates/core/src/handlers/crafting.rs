use super::{split_click, InputHandled, PageHandler};
use crate::{crafting, EventBus, Page, PageBody, Session, SlotCollection, SplitTarget};

#[derive(Debug, Clone)]
struct PendingCraft {
    recipe_id: String,
    max: u32,
    /// Click location snapshotted when the prompt opened, replayed at
    /// commit so pointer movement during the prompt changes nothing.
    x: i32,
    y: i32,
}

/// Handler for crafting and cooking pages: splits in the inventory section
/// and batch-crafts from the recipe grid.
#[derive(Debug, Default)]
pub struct CraftingPageHandler {
    split: SplitTarget,
    bound: bool,
    /// Which sub-interaction the last consumed input belongs to.
    inventory_last: bool,
    pending: Option<PendingCraft>,
}

impl PageHandler for CraftingPageHandler {
    fn open(&mut self, page: &Page, _session: &Session) -> bool {
        let PageBody::Crafting(crafting) = &page.body else {
            return false;
        };
        self.split.init(&crafting.inventory);
        self.inventory_last = false;
        self.pending = None;
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
        let PageBody::Crafting(crafting) = &page.body else {
            return InputHandled::NotHandled;
        };
        self.inventory_last = true;
        split_click(
            &mut self.split,
            &crafting.inventory,
            &crafting.layout,
            session,
            x,
            y,
        )
    }

    /// Validate the hovered recipe and compute the maximum craftable count
    /// from the inventory plus any linked containers.
    fn open_split_menu(&mut self, page: &Page, session: &Session, x: i32, y: i32) -> InputHandled {
        if !session.config.enabled || !session.config.split_in_crafting {
            return InputHandled::NotHandled;
        }
        let PageBody::Crafting(crafting_page) = &page.body else {
            return InputHandled::NotHandled;
        };
        self.inventory_last = false;

        let Some(recipe_id) = crafting_page.hovered_recipe.as_deref() else {
            return InputHandled::NotHandled;
        };
        let Some(recipe) = crafting_page.content.recipe_by_id(recipe_id) else {
            log::warn!("hovered recipe {recipe_id} is not in the content registry");
            return InputHandled::NotHandled;
        };
        let Some(output) = crafting_page
            .content
            .make_stack(&recipe.output, recipe.output_count.max(1))
        else {
            log::warn!("recipe {recipe_id} outputs unknown item {}", recipe.output);
            return InputHandled::NotHandled;
        };

        // A held item must match what the recipe produces.
        if let Some(held) = session.cursor.held() {
            if held.id != output.id {
                return InputHandled::NotHandled;
            }
        }
        if !output.self_stackable() {
            return InputHandled::NotHandled;
        }

        let sources: Vec<&SlotCollection> = std::iter::once(&crafting_page.inventory)
            .chain(crafting_page.containers.iter())
            .collect();
        let mut max = crafting::craftable_count(recipe, &sources);
        if let Some(held) = session.cursor.held() {
            max = max.min(held.headroom() / recipe.output_count.max(1));
        }
        if max == 0 {
            return InputHandled::NotHandled;
        }

        self.pending = Some(PendingCraft {
            recipe_id: recipe.id.clone(),
            max,
            x,
            y,
        });
        InputHandled::Consumed {
            default_amount: session.config.default_crafting_amount.clamp(1, max),
        }
    }

    fn stack_amount_entered(
        &mut self,
        page: &mut Page,
        session: &mut Session,
        events: &mut EventBus,
        amount: i64,
    ) {
        if self.inventory_last {
            let PageBody::Crafting(crafting_page) = &mut page.body else {
                return;
            };
            self.split.commit(
                &mut crafting_page.inventory,
                &mut session.cursor,
                events,
                amount,
            );
            return;
        }

        let Some(pending) = self.pending.take() else {
            return;
        };
        let PageBody::Crafting(crafting_page) = &mut page.body else {
            return;
        };
        let count = amount.clamp(0, pending.max as i64) as u32;
        if count == 0 {
            return;
        }
        let Some(recipe) = crafting_page.content.recipe_by_id(&pending.recipe_id).cloned() else {
            log::warn!("pending recipe {} vanished from content", pending.recipe_id);
            return;
        };
        // Replay the snapshotted click once, with the whole batch.
        log::trace!(
            "replaying craft click at ({}, {}) for {count} x {}",
            pending.x,
            pending.y,
            recipe.id
        );
        let result = crafting::craft(
            &crafting_page.content,
            &recipe,
            count,
            &mut crafting_page.inventory,
            &mut crafting_page.containers,
            &mut session.cursor,
            events,
        );
        if let Err(err) = result {
            // Sources shifted while the prompt was up; degrade to a no-op.
            log::warn!("craft of {} aborted: {err}", recipe.id);
        }
    }

    fn cancel(&mut self, page: &mut Page, session: &mut Session, events: &mut EventBus) {
        if self.inventory_last {
            let PageBody::Crafting(crafting_page) = &mut page.body else {
                return;
            };
            self.split
                .cancel(&mut crafting_page.inventory, &mut session.cursor, events);
        } else {
            // Abandoning a pending craft mutates nothing.
            self.pending = None;
        }
    }

    fn close(&mut self) {
        self.split.reset();
        self.pending = None;
        self.inventory_last = false;
        self.bound = false;
    }
}
