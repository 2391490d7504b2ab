use crate::game::{CardId, MoveSource, MoveTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    NewGame {
        seed: Option<u32>,
    },
    ResetLevel,
    Draw,
    MoveCard {
        from: MoveSource,
        to: MoveTarget,
    },
    MoveCards {
        from: MoveSource,
        to: MoveTarget,
        card_ids: Vec<CardId>,
    },
    Undo,
    ClearError,
}

impl EngineCommand {
    /// Moves the top `count` cards of `from`, bottom card first.
    pub fn move_top(
        from: MoveSource,
        to: MoveTarget,
        count: usize,
        tableau: &[Vec<CardId>],
        waste: &[CardId],
    ) -> Self {
        if count <= 1 {
            return Self::MoveCard { from, to };
        }
        let pile = match from {
            MoveSource::Waste => waste,
            MoveSource::Tableau { column } => tableau.get(column).map_or(&[][..], Vec::as_slice),
        };
        let start = pile.len().saturating_sub(count);
        Self::MoveCards {
            from,
            to,
            card_ids: pile[start..].to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCommandResult {
    pub changed: bool,
}

impl EngineCommandResult {
    pub const fn unchanged() -> Self {
        Self { changed: false }
    }

    pub const fn changed() -> Self {
        Self { changed: true }
    }
}
