#![warn(clippy::all, missing_docs)]

//! Session core for a hidden-movement pursuit board game.
//!
//! This crate hosts the station catalogue, the player roster, the starting
//! ticket economy and the immutable setup snapshots consumed by the
//! terminal UI and any future frontends. Only game setup is modelled.

pub mod board;
pub mod config;
pub mod models;
pub mod session;

pub use board::{CatalogueError, StationIndex};
pub use config::AppConfig;
pub use models::{Station, StationId, TicketKind, TransportType};
pub use session::{
    CardEconomy, CardSet, GameSession, GameState, PlayerRecord, PlayerRoster, Role, SeededSession,
};
