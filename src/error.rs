use thiserror::Error;

use crate::game::CardId;

/// Startup-time problems with the content bank or configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("category bank is empty")]
    EmptyBank,

    #[error("category bank has a duplicate category id \"{0}\"")]
    DuplicateCategoryId(String),

    #[error("categories must have at least {min} unique items; invalid: {details}")]
    UndersizedCategories { min: usize, details: String },

    #[error("category banks do not have enough playable categories (need >= {need}, got {got})")]
    NotEnoughCategories { need: usize, got: usize },

    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why the rules engine refused a move. The level is untouched whenever one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no card to move")]
    EmptySource,

    #[error("no tableau column {0}")]
    NoSuchColumn(usize),

    #[error("no slot {0}")]
    NoSuchSlot(usize),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("source and destination are the same column")]
    SameColumn,

    #[error("selected cards are not the top of the source pile")]
    RunMismatch,

    #[error("card {0} is face down")]
    FaceDown(CardId),

    #[error("slot {0} is completing")]
    SlotCompleting(usize),

    #[error("an empty slot takes exactly one category card")]
    SlotNeedsCategory(CardId),

    #[error("slot {0} is already full")]
    SlotFull(usize),

    #[error("card {0} does not belong there")]
    Rejected(CardId),
}

impl MoveError {
    pub fn card_id(&self) -> Option<CardId> {
        match self {
            Self::UnknownCard(id)
            | Self::FaceDown(id)
            | Self::SlotNeedsCategory(id)
            | Self::Rejected(id) => Some(*id),
            _ => None,
        }
    }
}
