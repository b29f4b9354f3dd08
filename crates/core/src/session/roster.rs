use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use tracing::debug;

use super::models::PlayerRecord;
use crate::models::StationId;

/// Largest roster: the fugitive plus five pursuers.
pub const MAX_PLAYERS: usize = 6;
/// Smallest playable roster: the fugitive plus two pursuers.
pub const MIN_PLAYERS: usize = 3;
/// Stations eligible for a random starting position.
pub const RANDOM_STATIONS: RangeInclusive<StationId> = 1..=199;
/// Position token that restores a slot's cached random station.
pub const RANDOM_POSITION_TOKEN: &str = "RNG";

static STATION_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("failed to compile station id regex"));

/// Ordered participants and their starting stations.
///
/// Every slot remembers the station it was randomly dealt, so a manual
/// override can later be undone with [`RANDOM_POSITION_TOKEN`]. Fresh draws
/// avoid earlier random draws only; a station set by hand is not excluded.
#[derive(Debug, Clone)]
pub struct PlayerRoster<R> {
    players: Vec<PlayerRecord>,
    random_draws: Vec<StationId>,
    rng: R,
}

impl<R: Rng> PlayerRoster<R> {
    /// Empty roster drawing random stations from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            players: Vec::new(),
            random_draws: Vec::new(),
            rng,
        }
    }

    /// Append a player on a freshly drawn station. Returns false when the
    /// roster is already full.
    pub fn add_player(&mut self) -> bool {
        let ordinal = self.players.len();
        if ordinal >= MAX_PLAYERS {
            debug!(players = ordinal, "Roster full; add ignored");
            return false;
        }

        let station_id = self.draw_station();
        self.players.push(PlayerRecord::for_slot(ordinal, station_id));
        self.random_draws.push(station_id);
        debug!(slot = ordinal, station = station_id, "Player added");
        true
    }

    /// Drop the last player and its cached draw. Returns false at the
    /// minimum roster size.
    pub fn delete_player(&mut self) -> bool {
        let count = self.players.len();
        if count <= MIN_PLAYERS {
            debug!(players = count, "Roster at minimum; delete ignored");
            return false;
        }

        self.players.pop();
        self.random_draws.pop();
        debug!(players = count - 1, "Player removed");
        true
    }

    /// Move slot `index` to the station described by `raw_value`: either
    /// [`RANDOM_POSITION_TOKEN`] or a decimal station id. The id is not
    /// checked against the catalogue.
    ///
    /// Returns false, leaving the roster untouched, for an unknown slot or
    /// a value that is not all digits.
    pub fn set_position(&mut self, index: usize, raw_value: &str) -> bool {
        let Some(current) = self.players.get(index) else {
            debug!(slot = index, "Unknown roster slot; position ignored");
            return false;
        };

        let station_id = if raw_value == RANDOM_POSITION_TOKEN {
            self.random_draws[index]
        } else if STATION_DIGITS_RE.is_match(raw_value) {
            match raw_value.parse::<StationId>() {
                Ok(id) => id,
                Err(err) => {
                    debug!(slot = index, raw_value, %err, "Station id out of range");
                    return false;
                }
            }
        } else {
            debug!(slot = index, raw_value, "Malformed position rejected");
            return false;
        };

        let moved = current.with_station(station_id);
        self.players[index] = moved;
        debug!(slot = index, station = station_id, "Player repositioned");
        true
    }

    /// Players in seat order, fugitive first.
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Player in slot `index`, if seated.
    pub fn get(&self, index: usize) -> Option<&PlayerRecord> {
        self.players.get(index)
    }

    /// Station randomly dealt to slot `index`, regardless of any manual
    /// override since.
    pub fn random_draw(&self, index: usize) -> Option<StationId> {
        self.random_draws.get(index).copied()
    }

    /// Number of seated players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True before the first player is added.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn draw_station(&mut self) -> StationId {
        loop {
            let candidate = self.rng.gen_range(RANDOM_STATIONS);
            if !self.random_draws.contains(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn roster(seed: u64) -> PlayerRoster<ChaCha8Rng> {
        PlayerRoster::new(ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn random_draws_are_distinct_and_in_range() {
        for seed in 0..50 {
            let mut roster = roster(seed);
            while roster.add_player() {}

            assert_eq!(roster.len(), MAX_PLAYERS);
            let draws: HashSet<StationId> =
                (0..roster.len()).filter_map(|i| roster.random_draw(i)).collect();
            assert_eq!(draws.len(), MAX_PLAYERS);
            assert!(draws.iter().all(|id| RANDOM_STATIONS.contains(id)));
        }
    }

    #[test]
    fn names_follow_slot_order() {
        let mut roster = roster(1);
        for _ in 0..3 {
            roster.add_player();
        }
        let names: Vec<&str> = roster
            .players()
            .iter()
            .map(|player| player.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Mister X", "Player: 1", "Player: 2"]);
    }

    #[test]
    fn capacity_and_floor_are_no_ops() {
        let mut roster = roster(2);
        for _ in 0..MAX_PLAYERS {
            assert!(roster.add_player());
        }
        assert!(!roster.add_player());
        assert_eq!(roster.len(), MAX_PLAYERS);

        for _ in MIN_PLAYERS..MAX_PLAYERS {
            assert!(roster.delete_player());
        }
        assert!(!roster.delete_player());
        assert_eq!(roster.len(), MIN_PLAYERS);
    }

    #[test]
    fn delete_discards_cached_draw() {
        let mut roster = roster(3);
        for _ in 0..4 {
            roster.add_player();
        }
        assert!(roster.random_draw(3).is_some());
        roster.delete_player();
        assert_eq!(roster.random_draw(3), None);
    }

    #[test]
    fn manual_position_then_random_restore() {
        let mut roster = roster(4);
        for _ in 0..3 {
            roster.add_player();
        }
        let dealt = roster.random_draw(1).unwrap();

        assert!(roster.set_position(1, "150"));
        assert_eq!(roster.players()[1].station_id, 150);
        assert_eq!(roster.random_draw(1), Some(dealt));

        assert!(roster.set_position(1, RANDOM_POSITION_TOKEN));
        assert_eq!(roster.players()[1].station_id, dealt);
    }

    #[test]
    fn manual_position_skips_catalogue_check() {
        let mut roster = roster(5);
        for _ in 0..3 {
            roster.add_player();
        }
        assert!(roster.set_position(2, "0"));
        assert!(roster.set_position(2, "4500"));
        assert_eq!(roster.players()[2].station_id, 4500);
    }

    #[test]
    fn malformed_positions_are_rejected() {
        let mut roster = roster(6);
        for _ in 0..3 {
            roster.add_player();
        }
        let before = roster.players().to_vec();

        for raw in ["abc", "", "-5", "12a", " 12", "rng", "99999999999"] {
            assert!(!roster.set_position(0, raw), "accepted {raw:?}");
        }
        assert!(!roster.set_position(7, "10"));
        assert_eq!(roster.players(), before.as_slice());
    }

    #[test]
    fn manual_positions_may_collide() {
        let mut roster = roster(7);
        for _ in 0..3 {
            roster.add_player();
        }
        let taken = roster.players()[0].station_id.to_string();
        assert!(roster.set_position(1, &taken));
        assert_eq!(roster.players()[0].station_id, roster.players()[1].station_id);
    }
}
