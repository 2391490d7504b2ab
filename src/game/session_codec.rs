use serde::{Deserialize, Serialize};

use super::*;

const SAVE_VERSION: u32 = 1;

/// The resumable save slot: the level and its status, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedGame {
    pub version: u32,
    pub level: Level,
    pub status: GameStatus,
}

pub fn encode_persisted_game(level: &Level, status: GameStatus) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        version: u32,
        level: &'a Level,
        status: GameStatus,
    }

    serde_json::to_string(&Borrowed {
        version: SAVE_VERSION,
        level,
        status,
    })
}

/// Absent, unparsable, version-mismatched or internally inconsistent saves
/// all decode to `None`.
pub fn decode_persisted_game(raw: &str) -> Option<PersistedGame> {
    if raw.trim().is_empty() {
        return None;
    }
    let game: PersistedGame = serde_json::from_str(raw).ok()?;
    if game.version != SAVE_VERSION || game.status == GameStatus::Idle {
        return None;
    }
    if game.level.slots.len() != game.level.tableau.len() || !game.level.is_consistent() {
        return None;
    }
    Some(game)
}
