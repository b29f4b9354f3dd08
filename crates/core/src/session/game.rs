use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::models::GameState;
use super::roster::PlayerRoster;
use crate::board::{CatalogueError, StationIndex};
use crate::config::AppConfig;
use crate::models::{Station, StationId};

/// Owner of the roster and the current snapshot.
///
/// Every successful setup command replaces the snapshot; rejected commands
/// leave it untouched. No snapshot exists until the first player is added.
/// Only the setup phase is modelled: there is no start, turn advance or
/// replay.
#[derive(Debug)]
pub struct GameSession<R> {
    stations: StationIndex,
    roster: PlayerRoster<R>,
    state: Option<GameState>,
}

/// Session dealing stations from a ChaCha stream, as built from config.
pub type SeededSession = GameSession<ChaCha8Rng>;

impl SeededSession {
    /// Load the catalogue named in `config` and seed the station dealer
    /// from `rng_seed`, or from OS entropy when none is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogueError> {
        let rng = match config.rng_seed {
            Some(seed) => {
                info!(seed, "Seeding station dealer");
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_entropy(),
        };
        Self::load(&config.catalogue_path, rng)
    }
}

impl<R: Rng> GameSession<R> {
    /// Session over an already loaded catalogue.
    pub fn new(stations: StationIndex, rng: R) -> Self {
        Self {
            stations,
            roster: PlayerRoster::new(rng),
            state: None,
        }
    }

    /// Read the catalogue at `path` and start an empty session.
    pub fn load(path: impl AsRef<Path>, rng: R) -> Result<Self, CatalogueError> {
        let stations = StationIndex::load(path)?;
        Ok(Self::new(stations, rng))
    }

    pub fn add_player(&mut self) -> bool {
        let changed = self.roster.add_player();
        if changed {
            self.rebuild();
        }
        changed
    }

    pub fn delete_player(&mut self) -> bool {
        let changed = self.roster.delete_player();
        if changed {
            self.rebuild();
        }
        changed
    }

    /// See [`PlayerRoster::set_position`].
    pub fn set_position(&mut self, index: usize, raw_value: &str) -> bool {
        let changed = self.roster.set_position(index, raw_value);
        if changed {
            self.rebuild();
        }
        changed
    }

    /// Replace the snapshot with one built from the current roster.
    ///
    /// Idempotent. Does nothing while the roster is empty, so the session
    /// never exposes a placeholder snapshot.
    pub fn rebuild(&mut self) -> Option<&GameState> {
        if self.roster.is_empty() {
            return None;
        }
        let state = GameState::setup(self.roster.players());
        debug!(
            players = state.player_count(),
            locations = ?state.player_locs(),
            "Snapshot rebuilt"
        );
        self.state = Some(state);
        self.state.as_ref()
    }

    /// Latest snapshot. Re-fetch after every command instead of caching.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn roster(&self) -> &PlayerRoster<R> {
        &self.roster
    }

    pub fn stations(&self) -> &StationIndex {
        &self.stations
    }

    /// Board station under each player's marker, indexed like the roster.
    /// `None` where the player stands on an id the catalogue lacks.
    pub fn marker_positions(&self) -> Vec<Option<Station>> {
        self.state
            .as_ref()
            .map(|state| {
                state
                    .player_locs()
                    .iter()
                    .map(|id| self.stations.coords_of(*id).copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First station under a pointer click, if any.
    pub fn station_at(&self, x: i32, y: i32) -> Option<StationId> {
        self.stations.query_box(x, y).first().map(|station| station.id)
    }
}
