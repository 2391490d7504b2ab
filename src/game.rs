//! Level data, the seeded generator and the placement rules.
//!
//! Everything here is deterministic and free of I/O; the state machine in
//! `engine::session` clones a `Level`, applies one of these operations and
//! either commits or discards the clone.

mod rng;
mod rules;
mod session_codec;
mod setup;
mod types;

pub use rng::Mulberry32;
pub use session_codec::{decode_persisted_game, encode_persisted_game, PersistedGame};
pub use setup::{generate_level, seed_from_clock, DealLayout};
pub use types::*;

#[cfg(test)]
mod tests;
