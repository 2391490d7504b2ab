//! Thin façade over the game session.
//!
//! Front-ends send `EngineCommand`s through here instead of calling session
//! methods one by one, so every surface shares the same command vocabulary.

use crate::engine::commands::{EngineCommand, EngineCommandResult};
use crate::engine::session::GameSession;
use crate::engine::view_model::GameViewModel;
use crate::error::ConfigError;

fn changed_or_unchanged(changed: bool) -> EngineCommandResult {
    if changed {
        EngineCommandResult::changed()
    } else {
        EngineCommandResult::unchanged()
    }
}

/// Only level generation can fail with an error; rejected moves come back
/// as `unchanged` with the reason in `GameSession::last_error`.
pub fn execute_command(
    session: &mut GameSession,
    command: EngineCommand,
) -> Result<EngineCommandResult, ConfigError> {
    let result = match command {
        EngineCommand::NewGame { seed } => {
            session.new_game(seed)?;
            EngineCommandResult::changed()
        }
        EngineCommand::ResetLevel => {
            session.reset_level()?;
            EngineCommandResult::changed()
        }
        EngineCommand::Draw => changed_or_unchanged(session.draw()),
        EngineCommand::MoveCard { from, to } => changed_or_unchanged(session.move_card(from, to)),
        EngineCommand::MoveCards { from, to, card_ids } => {
            changed_or_unchanged(session.move_cards(from, to, &card_ids))
        }
        EngineCommand::Undo => changed_or_unchanged(session.undo()),
        EngineCommand::ClearError => {
            let had_error = session.last_error().is_some();
            session.clear_error();
            changed_or_unchanged(had_error)
        }
    };
    Ok(result)
}

pub fn view_model(session: &GameSession) -> Option<GameViewModel> {
    session.level().map(|level| GameViewModel::new(level, session.status()))
}
