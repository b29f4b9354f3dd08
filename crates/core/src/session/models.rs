#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use super::economy::{CardEconomy, CardSet};
use crate::models::StationId;

/// Side a participant plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Mister X, always roster slot 0.
    Fugitive,
    /// A detective.
    Pursuer,
}

/// One seat in the roster. Records are replaced, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub display_name: String,
    pub role: Role,
    pub station_id: StationId,
}

impl PlayerRecord {
    /// Create the record for roster slot `ordinal`.
    pub fn for_slot(ordinal: usize, station_id: StationId) -> Self {
        if ordinal == 0 {
            Self {
                display_name: "Mister X".to_string(),
                role: Role::Fugitive,
                station_id,
            }
        } else {
            Self {
                display_name: format!("Player: {ordinal}"),
                role: Role::Pursuer,
                station_id,
            }
        }
    }

    /// Copy of this record standing on another station.
    pub fn with_station(&self, station_id: StationId) -> Self {
        Self {
            station_id,
            ..self.clone()
        }
    }
}

/// Immutable snapshot of a session, rebuilt wholesale on every roster change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    turn: u32,
    player_locs: Vec<StationId>,
    player_cards: Vec<CardSet>,
    current_player: usize,
    victory_flag: bool,
}

impl GameState {
    /// Setup-phase snapshot for `players`: turn zero, fugitive to act,
    /// no winner.
    pub fn setup(players: &[PlayerRecord]) -> Self {
        let roster_size = players.len();
        Self {
            turn: 0,
            player_locs: players.iter().map(|player| player.station_id).collect(),
            player_cards: players
                .iter()
                .map(|player| CardEconomy::starting_cards(player.role, roster_size))
                .collect(),
            current_player: 0,
            victory_flag: false,
        }
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Station of each player, indexed like the roster.
    pub fn player_locs(&self) -> &[StationId] {
        &self.player_locs
    }

    /// Tickets of each player, indexed like the roster.
    pub fn player_cards(&self) -> &[CardSet] {
        &self.player_cards
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn victory_flag(&self) -> bool {
        self.victory_flag
    }

    pub fn player_count(&self) -> usize {
        self.player_locs.len()
    }
}
