use serde::Serialize;

use crate::game::{CardId, GameStatus, Level};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: CardId,
    pub label: String,
    pub is_category: bool,
    pub face_up: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub category_label: Option<String>,
    pub filled: usize,
    pub required: usize,
    pub is_completing: bool,
}

impl SlotView {
    pub fn progress(&self) -> String {
        match &self.category_label {
            Some(label) => format!("{label} {}/{}", self.filled, self.required),
            None => "(empty)".to_string(),
        }
    }
}

/// Read-only snapshot for renderers. Face-down cards keep their id but lose
/// their label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameViewModel {
    pub seed: u32,
    pub status: GameStatus,
    pub columns: Vec<Vec<CardView>>,
    pub slots: Vec<SlotView>,
    pub stock_count: usize,
    pub waste_count: usize,
    pub waste_top: Option<CardView>,
    pub remaining_cards: usize,
}

impl GameViewModel {
    pub fn new(level: &Level, status: GameStatus) -> Self {
        let card_view = |id: CardId| -> Option<CardView> {
            let card = level.card(id)?;
            Some(CardView {
                id,
                label: if card.face_up {
                    card.label().to_string()
                } else {
                    String::new()
                },
                is_category: card.face_up && card.is_category(),
                face_up: card.face_up,
            })
        };

        let slots = level
            .slots
            .iter()
            .map(|slot| {
                let category = slot.category_card_id.and_then(|id| level.card(id));
                SlotView {
                    category_label: category.map(|card| card.word.clone()),
                    filled: slot.pile.len(),
                    required: category.map_or(0, |card| level.required_for(card.category_id())),
                    is_completing: slot.is_completing,
                }
            })
            .collect();

        Self {
            seed: level.seed,
            status,
            columns: level
                .tableau
                .iter()
                .map(|pile| pile.iter().filter_map(|id| card_view(*id)).collect())
                .collect(),
            slots,
            stock_count: level.stock.len(),
            waste_count: level.waste.len(),
            waste_top: level.waste_top().and_then(card_view),
            remaining_cards: level.remaining_cards(),
        }
    }
}
