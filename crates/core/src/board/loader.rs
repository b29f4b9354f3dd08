use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::models::Station;

/// Failure to produce a station catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// The catalogue file could not be read.
    #[error("station catalogue {} is unreadable", path.display())]
    Unreadable {
        /// File that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file was read but is not a list of `{x, y, id}` records.
    #[error("station catalogue {} is malformed", path.display())]
    Malformed {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Read and decode the catalogue at `path`, preserving file order.
pub fn read_catalogue(path: &Path) -> Result<Vec<Station>, CatalogueError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogueError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalogue(&contents).map_err(|source| CatalogueError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode catalogue JSON. Extra fields are ignored; a record missing
/// `x`, `y` or `id` fails the whole parse.
pub fn parse_catalogue(contents: &str) -> Result<Vec<Station>, serde_json::Error> {
    serde_json::from_str(contents)
}
