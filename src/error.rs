//! Error types for the board battle solver.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading boards, tile sets or configuration.
///
/// Illegal swaps and empty searches are not errors; those are ordinary
/// `None` / empty results from the engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid number of rows: expected {expected}, found {found}")]
    InvalidRowCount { expected: usize, found: usize },

    #[error("row {row} has {found} tiles (expected {expected})")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("flat board has {found} tiles (expected {expected})")]
    InvalidFlatLength { expected: usize, found: usize },

    #[error("unrecognized tile code '{code}' at ({x}, {y})")]
    UnrecognizedTileCode { code: char, x: usize, y: usize },

    #[error("tile set must define at least one tile type")]
    EmptyTileSet,

    #[error("tile set defines {found} tile types (at most {max} supported)")]
    TooManyTileTypes { max: usize, found: usize },

    #[error("tile code '{code}' is used by more than one tile type")]
    DuplicateTileCode { code: char },

    #[error("preferred tile code '{code}' is not in the tile set")]
    UnknownPreferredTile { code: char },

    #[error("the process-wide tile set has already been installed")]
    TileSetAlreadyInstalled,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
