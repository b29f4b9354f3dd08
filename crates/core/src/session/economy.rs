use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::models::Role;
use crate::models::TicketKind;

/// Tickets held by one player, keyed by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardSet(BTreeMap<TicketKind, u32>);

impl CardSet {
    /// Number of tickets of `kind`; zero when the kind is not present.
    pub fn get(&self, kind: TicketKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TicketKind, u32)> + '_ {
        self.0.iter().map(|(kind, count)| (*kind, *count))
    }
}

impl FromIterator<(TicketKind, u32)> for CardSet {
    fn from_iter<I: IntoIterator<Item = (TicketKind, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Starting ticket allotments. There is no spending or refund; every
/// allotment is computed from scratch.
pub struct CardEconomy;

impl CardEconomy {
    /// Tickets a player of `role` starts with in a roster of `roster_size`.
    ///
    /// The fugitive receives one black ticket per pursuer, so the count
    /// follows the roster as players are added and removed.
    pub fn starting_cards(role: Role, roster_size: usize) -> CardSet {
        match role {
            Role::Fugitive => {
                let pursuers = roster_size.saturating_sub(1) as u32;
                CardSet::from_iter([
                    (TicketKind::Taxi, 4),
                    (TicketKind::Bus, 3),
                    (TicketKind::Tube, 3),
                    (TicketKind::Black, pursuers),
                    (TicketKind::DoubleMove, 2),
                ])
            }
            Role::Pursuer => CardSet::from_iter([
                (TicketKind::Taxi, 10),
                (TicketKind::Bus, 8),
                (TicketKind::Tube, 4),
                (TicketKind::Black, 0),
                (TicketKind::DoubleMove, 0),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fugitive_black_tickets_track_pursuers() {
        for size in 3..=6 {
            let cards = CardEconomy::starting_cards(Role::Fugitive, size);
            assert_eq!(cards.get(TicketKind::Black), size as u32 - 1);
            assert_eq!(cards.get(TicketKind::Taxi), 4);
            assert_eq!(cards.get(TicketKind::Bus), 3);
            assert_eq!(cards.get(TicketKind::Tube), 3);
            assert_eq!(cards.get(TicketKind::DoubleMove), 2);
        }
    }

    #[test]
    fn pursuer_allotment_ignores_roster_size() {
        let small = CardEconomy::starting_cards(Role::Pursuer, 3);
        let large = CardEconomy::starting_cards(Role::Pursuer, 6);
        assert_eq!(small, large);
        assert_eq!(small.get(TicketKind::Taxi), 10);
        assert_eq!(small.get(TicketKind::Bus), 8);
        assert_eq!(small.get(TicketKind::Tube), 4);
        assert_eq!(small.get(TicketKind::Black), 0);
        assert_eq!(small.get(TicketKind::DoubleMove), 0);
        assert_eq!(small.total(), 22);
    }

    #[test]
    fn card_set_serialises_as_kind_map() {
        let cards = CardEconomy::starting_cards(Role::Fugitive, 4);
        let value = serde_json::to_value(&cards).unwrap();
        assert_eq!(value["black"], 3);
        assert_eq!(value["double-move"], 2);
    }
}
