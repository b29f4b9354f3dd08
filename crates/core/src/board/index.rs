use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use super::loader::{read_catalogue, CatalogueError};
use crate::models::{Station, StationId};

/// Half the side length of the square used to hit-test pointer clicks.
pub const HIT_BOX_HALF_WIDTH: u32 = 23;

/// Read-only catalogue of board stations, ordered by ascending `y`.
///
/// The ordering only makes iteration deterministic; stations are always
/// identified by `id`, never by position in the list.
#[derive(Debug, Clone)]
pub struct StationIndex {
    stations: Vec<Station>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl StationIndex {
    /// Load the catalogue file once. There is no reload path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let stations = read_catalogue(path)?;
        let mut index = Self::from_stations(stations);
        index.source = Some(path.to_path_buf());
        info!(
            stations = index.len(),
            path = %path.display(),
            "Station catalogue loaded"
        );
        Ok(index)
    }

    /// Build an index from stations already in memory.
    pub fn from_stations(mut stations: Vec<Station>) -> Self {
        stations.sort_by_key(|station| station.y);
        Self {
            stations,
            source: None,
            loaded_at: Utc::now(),
        }
    }

    /// Every station whose coordinates lie within the square hit box
    /// centred on `(x, y)`. Empty when nothing is close enough.
    pub fn query_box(&self, x: i32, y: i32) -> Vec<Station> {
        self.stations
            .iter()
            .filter(|station| {
                station.x.abs_diff(x) <= HIT_BOX_HALF_WIDTH
                    && station.y.abs_diff(y) <= HIT_BOX_HALF_WIDTH
            })
            .copied()
            .collect()
    }

    /// Look up a station by id.
    pub fn coords_of(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|station| station.id == id)
    }

    /// All stations in ascending `y` order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of stations in the catalogue.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True when the catalogue holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// File the catalogue was read from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// When the index was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn station(id: StationId, x: i32, y: i32) -> Station {
        Station { id, x, y }
    }

    #[test]
    fn load_sorts_by_vertical_position() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("station_locations.json");
        fs::write(
            &path,
            r#"[{"x": 1, "y": 300, "id": 1}, {"x": 2, "y": 100, "id": 2}, {"x": 3, "y": 200, "id": 3}]"#,
        )?;

        let index = StationIndex::load(&path)?;
        let order: Vec<StationId> = index.stations().iter().map(|s| s.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(index.source(), Some(path.as_path()));
        Ok(())
    }

    #[test]
    fn query_box_hits_single_station() {
        let index = StationIndex::from_stations(vec![station(5, 100, 100)]);
        assert_eq!(index.query_box(100, 100), vec![station(5, 100, 100)]);
        assert!(index.query_box(1000, 1000).is_empty());
    }

    #[test]
    fn query_box_is_a_square_not_a_circle() {
        let index = StationIndex::from_stations(vec![
            station(1, 50, 50),
            station(2, 74, 50),
            station(3, 73, 73),
        ]);

        // (73, 73) sits in the corner, about 32 px away, and still counts.
        let hits: Vec<StationId> = index.query_box(50, 50).iter().map(|s| s.id).collect();
        assert_eq!(hits, vec![1, 3]);

        let hits: Vec<StationId> = index.query_box(50 + 23, 50).iter().map(|s| s.id).collect();
        assert_eq!(hits, vec![1, 2, 3]);
    }

    #[test]
    fn coords_of_unknown_id_is_absent() {
        let index = StationIndex::from_stations(vec![station(1, 10, 10)]);
        assert_eq!(index.coords_of(1), Some(&station(1, 10, 10)));
        assert_eq!(index.coords_of(99), None);
    }
}
