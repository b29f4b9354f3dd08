//! Station catalogue loading and spatial lookups.

/// Catalogue file parsing.
pub mod loader;
/// Spatial and id queries over the loaded catalogue.
pub mod index;

pub use index::{StationIndex, HIT_BOX_HALF_WIDTH};
pub use loader::CatalogueError;
