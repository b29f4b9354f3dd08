#![allow(missing_docs)]

//! Player roster, starting tickets and setup snapshots.

pub mod economy;
pub mod game;
mod models;
pub mod roster;

pub use economy::{CardEconomy, CardSet};
pub use game::{GameSession, SeededSession};
pub use models::{GameState, PlayerRecord, Role};
pub use roster::{
    PlayerRoster, MAX_PLAYERS, MIN_PLAYERS, RANDOM_POSITION_TOKEN, RANDOM_STATIONS,
};
