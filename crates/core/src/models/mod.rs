//! Shared domain models.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a board station.
pub type StationId = u32;

/// A board position in map-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    /// Station number printed on the board.
    pub id: StationId,
    /// Horizontal pixel offset on the board image.
    pub x: i32,
    /// Vertical pixel offset on the board image.
    pub y: i32,
}

/// Ways of travelling between stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    /// Taxi route, the densest network.
    Taxi,
    /// Bus route.
    Bus,
    /// Underground line.
    Tube,
    /// River crossing, only usable by the fugitive.
    Boat,
}

impl TransportType {
    /// Ticket spent to travel by this mode. Boat crossings take a black ticket.
    pub fn ticket_kind(self) -> TicketKind {
        match self {
            TransportType::Taxi => TicketKind::Taxi,
            TransportType::Bus => TicketKind::Bus,
            TransportType::Tube => TicketKind::Tube,
            TransportType::Boat => TicketKind::Black,
        }
    }
}

/// Kinds of ticket a player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketKind {
    /// Taxi ticket.
    Taxi,
    /// Bus ticket.
    Bus,
    /// Tube ticket.
    Tube,
    /// Black ticket, hides the transport used.
    Black,
    /// Lets the fugitive move twice in one turn.
    DoubleMove,
}

impl TicketKind {
    /// Every ticket kind in display order.
    pub const ALL: [TicketKind; 5] = [
        TicketKind::Taxi,
        TicketKind::Bus,
        TicketKind::Tube,
        TicketKind::Black,
        TicketKind::DoubleMove,
    ];

    /// Short user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            TicketKind::Taxi => "taxi",
            TicketKind::Bus => "bus",
            TicketKind::Tube => "tube",
            TicketKind::Black => "black",
            TicketKind::DoubleMove => "x2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boat_crossings_use_black_tickets() {
        assert_eq!(TransportType::Boat.ticket_kind(), TicketKind::Black);
        assert_eq!(TransportType::Tube.ticket_kind(), TicketKind::Tube);
    }

    #[test]
    fn ticket_kinds_serialise_in_kebab_case() {
        let encoded = serde_json::to_string(&TicketKind::DoubleMove).unwrap();
        assert_eq!(encoded, "\"double-move\"");
    }

    #[test]
    fn station_ignores_unknown_fields() {
        let station: Station =
            serde_json::from_str(r#"{"x": 10, "y": 20, "id": 3, "label": "Soho"}"#).unwrap();
        assert_eq!(station, Station { id: 3, x: 10, y: 20 });
    }
}
