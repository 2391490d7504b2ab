use crate::engine::session::{GameSession, LastAction};
use crate::game::GameStatus;

/// One line for the status bar. Errors win over actions, actions over the
/// generic per-status hint.
pub fn build_status_text(session: &GameSession) -> String {
    if let Some(err) = session.last_error() {
        return format!("Move refused: {}.", err.message);
    }

    let Some(level) = session.level() else {
        return "No game yet. Start a new game to deal a level.".to_string();
    };

    match session.status() {
        GameStatus::Won => return "You won! Every category has been completed.".to_string(),
        GameStatus::Lost => {
            return "No more moves: the stock cycles without progress. Undo or start again."
                .to_string()
        }
        GameStatus::Idle | GameStatus::InProgress => {}
    }

    if let Some(level_up) = session.last_level_up() {
        if let Some(title) = &level_up.new_title {
            return format!("Level {} reached. New title: {title}!", level_up.new_level);
        }
    }

    match session.last_action() {
        Some(LastAction::SlotCompleted { category_id, .. }) => {
            let label = level.category_label(category_id).unwrap_or(category_id);
            format!("Category complete: {label}.")
        }
        Some(LastAction::SlotPlaced {
            card_id,
            slot_index,
            ..
        }) => {
            let word = level.card(*card_id).map_or("card", |card| card.label());
            format!("Placed {word} on S{}.", slot_index + 1)
        }
        None => format!(
            "{} cards left. Stock {}, waste {}.",
            level.remaining_cards(),
            level.stock.len(),
            level.waste.len()
        ),
    }
}
