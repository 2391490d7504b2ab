//! The game state machine.
//!
//! `GameSession` owns the current level and everything transient around it:
//! the undo history, the last error and action for feedback layers, the
//! draw-loop memory and the pending slot finalizations. Every mutating
//! operation clones the level, applies a rules-engine call to the clone and
//! then either commits it or throws it away.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bank::ContentBank;
use crate::config::{GeneratorConfig, SessionConfig};
use crate::engine::history::{History, HistoryEntry};
use crate::engine::loss_analysis::{DrawLoopTracker, LoopVerdict};
use crate::engine::progression::{LevelUp, Progression};
use crate::error::{ConfigError, MoveError};
use crate::game::{
    decode_persisted_game, encode_persisted_game, generate_level, CardId, CategoryId, GameStatus,
    Level, MoveOutcome, MoveSource, MoveTarget, PersistedGame, SlotEvent,
};
use crate::trace;

/// Milliseconds on some monotonic-enough timeline. Injected so tests can
/// drive completion timing by hand.
pub type Clock = fn() -> u64;

pub fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameError {
    pub message: String,
    pub card_id: Option<CardId>,
    pub at: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastAction {
    SlotPlaced {
        card_id: CardId,
        slot_index: usize,
        at: u64,
    },
    SlotCompleted {
        slot_index: usize,
        category_id: CategoryId,
        at: u64,
    },
}

/// A deferred slot finalization. Only honoured while `epoch` still matches
/// the session's epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCompletion {
    pub slot_index: usize,
    pub epoch: u64,
    pub completed_at: u64,
    pub due_at: u64,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    bank: ContentBank,
    generator: GeneratorConfig,
    config: SessionConfig,
    clock: Clock,
    level: Option<Level>,
    status: GameStatus,
    history: History,
    last_error: Option<GameError>,
    last_action: Option<LastAction>,
    draw_loop: DrawLoopTracker,
    epoch: u64,
    pending: Vec<PendingCompletion>,
    progression: Progression,
    last_level_up: Option<LevelUp>,
}

impl GameSession {
    pub fn new(bank: ContentBank, generator: GeneratorConfig, config: SessionConfig) -> Self {
        let history = History::new(config.history_limit);
        Self {
            bank,
            generator,
            config,
            clock: wall_clock_ms,
            level: None,
            status: GameStatus::Idle,
            history,
            last_error: None,
            last_action: None,
            draw_loop: DrawLoopTracker::default(),
            epoch: 0,
            pending: Vec::new(),
            progression: Progression::default(),
            last_level_up: None,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&GameError> {
        self.last_error.as_ref()
    }

    pub fn last_action(&self) -> Option<&LastAction> {
        self.last_action.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn pending_completions(&self) -> &[PendingCompletion] {
        &self.pending
    }

    pub fn next_completion_due(&self) -> Option<u64> {
        self.pending.iter().map(|ticket| ticket.due_at).min()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// The level-up produced by the most recent finalization, if any.
    pub fn last_level_up(&self) -> Option<&LevelUp> {
        self.last_level_up.as_ref()
    }

    pub fn bank(&self) -> &ContentBank {
        &self.bank
    }

    pub fn new_game(&mut self, seed: Option<u32>) -> Result<(), ConfigError> {
        let level = generate_level(&self.bank, seed, &self.generator)?;
        self.start(level, GameStatus::InProgress);
        Ok(())
    }

    /// Deals the current seed again; with no level yet this is a fresh game.
    pub fn reset_level(&mut self) -> Result<(), ConfigError> {
        let seed = self.level.as_ref().map(|level| level.seed);
        self.new_game(seed)
    }

    pub fn draw(&mut self) -> bool {
        if self.status != GameStatus::InProgress {
            return false;
        }
        let Some(current) = self.level.as_ref() else {
            return false;
        };

        let mut next = current.clone();
        let result = next.draw_or_recycle();
        let mut status = GameStatus::status_for(&next);
        if status == GameStatus::Won {
            self.draw_loop.clear();
        } else if self.draw_loop.observe(&next) == LoopVerdict::Repeated {
            status = GameStatus::Lost;
            trace::event(
                "game:lost",
                format!("seed={} signatures={}", next.seed, self.draw_loop.len()),
            );
        }

        trace::event("draw", format!("{result:?}"));
        self.commit(next, status);
        self.last_action = None;
        true
    }

    pub fn move_card(&mut self, from: MoveSource, to: MoveTarget) -> bool {
        self.apply_move(to, |level| level.move_card(from, to))
    }

    pub fn move_cards(&mut self, from: MoveSource, to: MoveTarget, card_ids: &[CardId]) -> bool {
        if card_ids.is_empty() {
            return false;
        }
        self.apply_move(to, |level| level.move_run(from, to, card_ids))
    }

    fn apply_move(
        &mut self,
        to: MoveTarget,
        apply: impl FnOnce(&mut Level) -> Result<MoveOutcome, MoveError>,
    ) -> bool {
        if self.status != GameStatus::InProgress {
            return false;
        }
        let Some(current) = self.level.as_ref() else {
            return false;
        };

        let now = (self.clock)();
        let mut next = current.clone();
        let outcome = match apply(&mut next) {
            Ok(outcome) => outcome,
            Err(err) => {
                trace::event("move:rejected", &err);
                self.last_error = Some(GameError {
                    message: err.to_string(),
                    card_id: err.card_id(),
                    at: now,
                });
                self.last_action = None;
                return false;
            }
        };

        let status = GameStatus::status_for(&next);
        self.commit(next, status);
        if to.is_slot() {
            self.draw_loop.clear();
        }

        self.last_action = match outcome.slot_event {
            Some(SlotEvent::Placed {
                card_id,
                slot_index,
            }) => Some(LastAction::SlotPlaced {
                card_id,
                slot_index,
                at: now,
            }),
            Some(SlotEvent::Completed {
                slot_index,
                category_id,
            }) => {
                trace::event(
                    "slot:completed",
                    format!("slot={slot_index} category={category_id}"),
                );
                self.schedule_completion(slot_index, now);
                Some(LastAction::SlotCompleted {
                    slot_index,
                    category_id,
                    at: now,
                })
            }
            None => None,
        };
        true
    }

    /// Pushes the committed-over state to history and installs `next`.
    fn commit(&mut self, next: Level, status: GameStatus) {
        if let Some(previous) = self.level.replace(next) {
            self.history.push(HistoryEntry {
                level: previous,
                status: self.status,
                progression: self.progression.clone(),
            });
        }
        self.status = status;
        self.last_error = None;
    }

    fn schedule_completion(&mut self, slot_index: usize, completed_at: u64) {
        self.pending.retain(|ticket| ticket.slot_index != slot_index);
        self.pending.push(PendingCompletion {
            slot_index,
            epoch: self.epoch,
            completed_at,
            due_at: completed_at + self.config.completion_delay_ms,
        });
    }

    /// Clears a completing slot. A ticket from an older epoch, or for a slot
    /// that is no longer completing, does nothing.
    pub fn finalize_slot_completion(&mut self, ticket: PendingCompletion) -> bool {
        if ticket.epoch != self.epoch {
            trace::event(
                "slot:finalize-stale",
                format!("slot={} epoch={} current={}", ticket.slot_index, ticket.epoch, self.epoch),
            );
            return false;
        }
        self.pending
            .retain(|pending| pending.slot_index != ticket.slot_index);
        if self.status != GameStatus::InProgress {
            return false;
        }
        let Some(level) = self.level.as_mut() else {
            return false;
        };
        let Some(cleared) = level.finalize_slot(ticket.slot_index) else {
            return false;
        };

        self.status = GameStatus::status_for(level);
        self.last_error = None;
        self.draw_loop.clear();
        trace::event(
            "slot:finalized",
            format!("slot={} cards={cleared}", ticket.slot_index),
        );

        let level_up = self.progression.award_points(cleared);
        self.last_level_up = (level_up.levels_gained > 0).then_some(level_up);

        if self.status == GameStatus::Won {
            trace::event("game:won", format!("seed={}", level.seed));
        }
        true
    }

    /// Finalizes every pending completion due at or before `now`.
    pub fn run_due_completions(&mut self, now: u64) -> usize {
        let due: Vec<PendingCompletion> = self
            .pending
            .iter()
            .filter(|ticket| ticket.due_at <= now)
            .copied()
            .collect();
        due.into_iter()
            .filter(|ticket| self.finalize_slot_completion(*ticket))
            .count()
    }

    /// Finalizes everything pending without waiting.
    pub fn flush_completions(&mut self) -> usize {
        let all = std::mem::take(&mut self.pending);
        all.into_iter()
            .filter(|ticket| self.finalize_slot_completion(*ticket))
            .count()
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        self.level = Some(entry.level);
        self.status = entry.status;
        self.progression = entry.progression;
        self.last_error = None;
        self.last_action = None;
        self.last_level_up = None;
        self.draw_loop.clear();
        self.bump_epoch();
        self.rearm_completing_slots();
        trace::event(
            "undo",
            format!("status={} history={}", self.status.id(), self.history.len()),
        );
        true
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn encode(&self) -> Option<String> {
        let level = self.level.as_ref()?;
        encode_persisted_game(level, self.status).ok()
    }

    pub fn restore(&mut self, game: PersistedGame) {
        trace::event(
            "session:restored",
            format!("seed={} status={}", game.level.seed, game.status.id()),
        );
        self.start(game.level, game.status);
        self.rearm_completing_slots();
    }

    /// Writes the save slot. Returns `false` when there is no game to save.
    pub fn save_to_path(&self, path: &Path) -> std::io::Result<bool> {
        let Some(raw) = self.encode() else {
            return Ok(false);
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, raw)?;
        Ok(true)
    }

    /// Resumes from the save slot. Missing or corrupt saves leave the
    /// session untouched and return `false`.
    pub fn load_from_path(&mut self, path: &Path) -> bool {
        let Ok(raw) = fs::read_to_string(path) else {
            return false;
        };
        match decode_persisted_game(&raw) {
            Some(game) => {
                self.restore(game);
                true
            }
            None => {
                trace::event("session:discarded", path.display());
                false
            }
        }
    }

    fn start(&mut self, level: Level, status: GameStatus) {
        self.level = Some(level);
        self.status = status;
        self.history.clear();
        self.last_error = None;
        self.last_action = None;
        self.last_level_up = None;
        self.draw_loop.clear();
        self.bump_epoch();
    }

    fn bump_epoch(&mut self) {
        self.epoch += 1;
        self.pending.clear();
    }

    fn rearm_completing_slots(&mut self) {
        let now = (self.clock)();
        let completing: Vec<usize> = self
            .level
            .iter()
            .flat_map(|level| level.slots.iter().enumerate())
            .filter(|(_, slot)| slot.is_completing)
            .map(|(slot_index, _)| slot_index)
            .collect();
        for slot_index in completing {
            self.schedule_completion(slot_index, now);
        }
    }
}
