use std::collections::HashSet;
use std::fmt::Write;

use crate::game::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopVerdict {
    /// Some waste or tableau top fits a slot; the loop memory was reset.
    MovesAvailable,
    /// No slot move, and this board signature is new since the last reset.
    FirstSighting,
    /// No slot move, and this exact signature was already seen: the game is
    /// lost.
    Repeated,
}

/// True as soon as the waste top or any tableau top can go onto any slot.
pub fn has_any_slot_move(level: &Level) -> bool {
    let sources = level
        .waste_top()
        .into_iter()
        .chain((0..level.column_count()).filter_map(|col| level.tableau_top(col)));
    for card_id in sources {
        if (0..level.slots.len()).any(|slot_index| level.can_place_on_slot(card_id, slot_index)) {
            return true;
        }
    }
    false
}

/// Stock and waste order, tableau tops and per-slot
/// `(category card, pile length, completing)`. Two boards are the same for
/// loss purposes iff these strings are equal.
pub fn draw_loop_key(level: &Level) -> String {
    fn join(ids: impl Iterator<Item = String>) -> String {
        ids.collect::<Vec<_>>().join(",")
    }

    let mut key = String::new();
    let _ = write!(
        key,
        "stock:{}|waste:{}|tops:{}|slots:",
        join(level.stock.iter().map(|id| id.0.to_string())),
        join(level.waste.iter().map(|id| id.0.to_string())),
        join(
            (0..level.column_count())
                .map(|col| level.tableau_top(col).map(|id| id.0.to_string()).unwrap_or_default())
        ),
    );
    key.push_str(&join(level.slots.iter().map(|slot| {
        format!(
            "{}:{}:{}",
            slot.category_card_id
                .map(|id| id.0.to_string())
                .unwrap_or_default(),
            slot.pile.len(),
            u8::from(slot.is_completing)
        )
    })));
    key
}

/// Signatures seen since the last slot progress.
#[derive(Debug, Clone, Default)]
pub struct DrawLoopTracker {
    seen: HashSet<String>,
}

impl DrawLoopTracker {
    pub fn observe(&mut self, level: &Level) -> LoopVerdict {
        if has_any_slot_move(level) {
            self.seen.clear();
            return LoopVerdict::MovesAvailable;
        }
        if self.seen.insert(draw_loop_key(level)) {
            LoopVerdict::FirstSighting
        } else {
            LoopVerdict::Repeated
        }
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
