use std::collections::HashSet;

use super::*;
use crate::error::MoveError;

impl Level {
    /// Empty columns take anything. Category cards float onto any pile; word
    /// cards need a top card (category or word) of their own category.
    pub fn can_place_on_tableau(&self, moving: CardId, dest_top: Option<CardId>) -> bool {
        let Some(card) = self.card(moving) else {
            return false;
        };
        let Some(top_id) = dest_top else {
            return true;
        };
        let Some(top) = self.card(top_id) else {
            return false;
        };
        match &card.kind {
            CardKind::Category { .. } => true,
            CardKind::Word { category_id } => top.category_id() == category_id,
        }
    }

    pub fn can_place_on_slot(&self, card_id: CardId, slot_index: usize) -> bool {
        self.check_slot_placement(&[card_id], slot_index).is_ok()
    }

    pub fn draw_or_recycle(&mut self) -> DrawResult {
        if let Some(card_id) = self.stock.pop() {
            self.set_face_up(card_id, true);
            self.waste.push(card_id);
            return DrawResult::DrewFromStock;
        }

        if self.waste.is_empty() {
            return DrawResult::NoOp;
        }

        while let Some(card_id) = self.waste.pop() {
            self.set_face_up(card_id, false);
            self.stock.push(card_id);
        }
        DrawResult::RecycledWaste
    }

    /// Moves the top card of `from`.
    pub fn move_card(
        &mut self,
        from: MoveSource,
        to: MoveTarget,
    ) -> Result<MoveOutcome, MoveError> {
        let card_id = match from {
            MoveSource::Waste => self.waste_top(),
            MoveSource::Tableau { column } => {
                let pile = self.tableau.get(column).ok_or(MoveError::NoSuchColumn(column))?;
                pile.last().copied()
            }
        }
        .ok_or(MoveError::EmptySource)?;
        self.move_run(from, to, &[card_id])
    }

    /// Moves `run` (bottom card first) as a unit. Every check happens before
    /// the first mutation, so an `Err` leaves the level exactly as it was.
    pub fn move_run(
        &mut self,
        from: MoveSource,
        to: MoveTarget,
        run: &[CardId],
    ) -> Result<MoveOutcome, MoveError> {
        let Some(&bottom) = run.first() else {
            return Err(MoveError::EmptySource);
        };
        self.check_source(from, run)?;

        match to {
            MoveTarget::Tableau { column } => {
                if from == (MoveSource::Tableau { column }) {
                    return Err(MoveError::SameColumn);
                }
                let dest = self.tableau.get(column).ok_or(MoveError::NoSuchColumn(column))?;
                if !self.can_place_on_tableau(bottom, dest.last().copied()) {
                    return Err(MoveError::Rejected(bottom));
                }
            }
            MoveTarget::Slot { slot_index } => self.check_slot_placement(run, slot_index)?,
        }

        self.detach(from, run.len());
        for &card_id in run {
            self.set_face_up(card_id, true);
        }
        let slot_event = match to {
            MoveTarget::Tableau { column } => {
                self.tableau[column].extend_from_slice(run);
                None
            }
            MoveTarget::Slot { slot_index } => Some(self.attach_to_slot(slot_index, run)),
        };
        self.reveal_source_top(from);

        Ok(MoveOutcome {
            moved: run.to_vec(),
            slot_event,
        })
    }

    /// Clears a completing slot and returns how many cards it held.
    pub fn finalize_slot(&mut self, slot_index: usize) -> Option<usize> {
        let slot = self.slots.get_mut(slot_index)?;
        if !slot.is_completing {
            return None;
        }
        let cleared = slot.card_count();
        slot.clear();
        Some(cleared)
    }

    /// True when every card id appears exactly once across the piles and
    /// slots, and every slot respects its category and required count.
    pub fn is_consistent(&self) -> bool {
        if self
            .cards
            .iter()
            .enumerate()
            .any(|(idx, card)| card.id.index() != idx)
        {
            return false;
        }

        // Listed categories and card categories must agree.
        if !self
            .categories
            .iter()
            .all(|def| self.required_words.contains_key(&def.id))
        {
            return false;
        }
        if !self.cards.iter().all(|card| {
            self.categories
                .iter()
                .any(|def| def.id == card.category_id())
        }) {
            return false;
        }

        let placed = self.placed_card_ids();
        if placed.len() != self.cards.len() {
            return false;
        }
        let mut seen = HashSet::with_capacity(placed.len());
        if !placed
            .iter()
            .all(|id| id.index() < self.cards.len() && seen.insert(*id))
        {
            return false;
        }

        self.slots.iter().all(|slot| match slot.category_card_id {
            None => slot.pile.is_empty(),
            Some(category_card) => {
                let Some(category) = self.card(category_card).filter(|card| card.is_category())
                else {
                    return false;
                };
                let required = self.required_for(category.category_id());
                slot.pile.len() <= required
                    && slot.pile.iter().all(|id| {
                        self.card(*id).is_some_and(|card| {
                            card.is_word() && card.category_id() == category.category_id()
                        })
                    })
            }
        })
    }

    fn check_source(&self, from: MoveSource, run: &[CardId]) -> Result<(), MoveError> {
        match from {
            MoveSource::Waste => {
                if self.waste.is_empty() {
                    return Err(MoveError::EmptySource);
                }
                if run.len() != 1 || self.waste.last() != run.first() {
                    return Err(MoveError::RunMismatch);
                }
            }
            MoveSource::Tableau { column } => {
                let pile = self.tableau.get(column).ok_or(MoveError::NoSuchColumn(column))?;
                if pile.is_empty() {
                    return Err(MoveError::EmptySource);
                }
                if !pile.ends_with(run) {
                    return Err(MoveError::RunMismatch);
                }
                for &card_id in run {
                    let card = self.card(card_id).ok_or(MoveError::UnknownCard(card_id))?;
                    if !card.face_up {
                        return Err(MoveError::FaceDown(card_id));
                    }
                }
            }
        }
        Ok(())
    }

    fn check_slot_placement(&self, run: &[CardId], slot_index: usize) -> Result<(), MoveError> {
        let slot = self
            .slots
            .get(slot_index)
            .ok_or(MoveError::NoSuchSlot(slot_index))?;
        if slot.is_completing {
            return Err(MoveError::SlotCompleting(slot_index));
        }
        let Some(&bottom) = run.first() else {
            return Err(MoveError::EmptySource);
        };

        let Some(category_card) = slot.category_card_id else {
            let card = self.card(bottom).ok_or(MoveError::UnknownCard(bottom))?;
            if run.len() != 1 || !card.is_category() {
                return Err(MoveError::SlotNeedsCategory(bottom));
            }
            return Ok(());
        };

        let category = self
            .card(category_card)
            .filter(|card| card.is_category())
            .ok_or(MoveError::Rejected(bottom))?;
        for &card_id in run {
            let card = self.card(card_id).ok_or(MoveError::UnknownCard(card_id))?;
            if !card.is_word() || card.category_id() != category.category_id() {
                return Err(MoveError::Rejected(card_id));
            }
        }
        if slot.pile.len() + run.len() > self.required_for(category.category_id()) {
            return Err(MoveError::SlotFull(slot_index));
        }
        Ok(())
    }

    fn detach(&mut self, from: MoveSource, count: usize) {
        let pile = match from {
            MoveSource::Waste => &mut self.waste,
            MoveSource::Tableau { column } => &mut self.tableau[column],
        };
        let keep = pile.len().saturating_sub(count);
        pile.truncate(keep);
    }

    fn attach_to_slot(&mut self, slot_index: usize, run: &[CardId]) -> SlotEvent {
        let placing_category = self.slots[slot_index].category_card_id.is_none();
        let category_card = if placing_category {
            run[0]
        } else {
            self.slots[slot_index].category_card_id.unwrap_or(run[0])
        };
        let category_id = self.cards[category_card.index()].category_id().to_string();
        let required = self.required_for(&category_id);

        let slot = &mut self.slots[slot_index];
        if placing_category {
            slot.category_card_id = Some(category_card);
            slot.pile.clear();
        } else {
            slot.pile.extend_from_slice(run);
        }

        // A zero-word category completes as soon as its card lands.
        if slot.pile.len() >= required {
            slot.is_completing = true;
            return SlotEvent::Completed {
                slot_index,
                category_id,
            };
        }
        SlotEvent::Placed {
            card_id: run[run.len() - 1],
            slot_index,
        }
    }

    fn reveal_source_top(&mut self, from: MoveSource) {
        if let MoveSource::Tableau { column } = from {
            if let Some(top) = self.tableau_top(column) {
                self.set_face_up(top, true);
            }
        }
    }

    fn set_face_up(&mut self, card_id: CardId, face_up: bool) {
        if let Some(card) = self.card_mut(card_id) {
            card.face_up = face_up;
        }
    }
}
