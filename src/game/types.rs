use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type CategoryId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CardKind {
    #[serde(rename_all = "camelCase")]
    Category { category_id: CategoryId },
    #[serde(rename_all = "camelCase")]
    Word { category_id: CategoryId },
}

impl CardKind {
    pub fn category_id(&self) -> &str {
        match self {
            Self::Category { category_id } | Self::Word { category_id } => category_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub word: String,
    #[serde(flatten)]
    pub kind: CardKind,
    pub face_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Card {
    pub fn category_id(&self) -> &str {
        self.kind.category_id()
    }

    pub fn is_category(&self) -> bool {
        matches!(self.kind, CardKind::Category { .. })
    }

    pub fn is_word(&self) -> bool {
        matches!(self.kind, CardKind::Word { .. })
    }

    pub fn label(&self) -> &str {
        self.image.as_deref().unwrap_or(&self.word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryDef {
    pub id: CategoryId,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub category_card_id: Option<CardId>,
    pub pile: Vec<CardId>,
    #[serde(default)]
    pub is_completing: bool,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.category_card_id.is_none()
    }

    /// Cards physically held by the slot; the completing flag is not a card.
    pub fn card_count(&self) -> usize {
        usize::from(self.category_card_id.is_some()) + self.pile.len()
    }

    pub fn clear(&mut self) {
        self.category_card_id = None;
        self.pile.clear();
        self.is_completing = false;
    }
}

/// One dealt game. Every card id lives in exactly one of: a tableau column,
/// the stock, the waste, a slot's category position or a slot's pile.
///
/// `cards` is indexed by `CardId`. Column, stock and waste vectors keep their
/// top card last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub seed: u32,
    pub categories: Vec<CategoryDef>,
    pub cards: Vec<Card>,
    pub required_words: BTreeMap<CategoryId, usize>,
    pub tableau: Vec<Vec<CardId>>,
    pub stock: Vec<CardId>,
    pub waste: Vec<CardId>,
    pub slots: Vec<Slot>,
}

impl Level {
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index()).filter(|card| card.id == id)
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index()).filter(|card| card.id == id)
    }

    pub fn required_for(&self, category_id: &str) -> usize {
        self.required_words.get(category_id).copied().unwrap_or(0)
    }

    pub fn category_label(&self, category_id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.label.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.tableau.len()
    }

    pub fn tableau_top(&self, col: usize) -> Option<CardId> {
        self.tableau.get(col).and_then(|pile| pile.last().copied())
    }

    pub fn waste_top(&self) -> Option<CardId> {
        self.waste.last().copied()
    }

    pub fn tableau_card_count(&self) -> usize {
        self.tableau.iter().map(Vec::len).sum()
    }

    pub fn remaining_cards(&self) -> usize {
        self.tableau_card_count()
            + self.stock.len()
            + self.waste.len()
            + self.slots.iter().map(Slot::card_count).sum::<usize>()
    }

    pub fn is_won(&self) -> bool {
        self.remaining_cards() == 0
    }

    /// Every placed card id in a fixed order: tableau columns, stock, waste,
    /// then each slot's category card followed by its pile.
    pub fn placed_card_ids(&self) -> Vec<CardId> {
        let mut ids = Vec::with_capacity(self.cards.len());
        for column in &self.tableau {
            ids.extend(column.iter().copied());
        }
        ids.extend(self.stock.iter().copied());
        ids.extend(self.waste.iter().copied());
        for slot in &self.slots {
            ids.extend(slot.category_card_id);
            ids.extend(slot.pile.iter().copied());
        }
        ids
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Idle,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn id(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InProgress => "inProgress",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    pub fn status_for(level: &Level) -> Self {
        if level.is_won() {
            Self::Won
        } else {
            Self::InProgress
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MoveSource {
    Tableau { column: usize },
    Waste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MoveTarget {
    Tableau { column: usize },
    #[serde(rename_all = "camelCase")]
    Slot { slot_index: usize },
}

impl MoveTarget {
    pub fn is_slot(self) -> bool {
        matches!(self, Self::Slot { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent {
    Placed {
        card_id: CardId,
        slot_index: usize,
    },
    Completed {
        slot_index: usize,
        category_id: CategoryId,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: Vec<CardId>,
    pub slot_event: Option<SlotEvent>,
}

impl MoveOutcome {
    pub fn completed_slot(&self) -> Option<usize> {
        match self.slot_event {
            Some(SlotEvent::Completed { slot_index, .. }) => Some(slot_index),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawResult {
    DrewFromStock,
    RecycledWaste,
    NoOp,
}
