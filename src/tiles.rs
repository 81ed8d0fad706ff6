//! Tile types and the configurable tile set.
//!
//! The engine only ever sees `TileType` indices. What those indices mean
//! (their names and one-character display codes) lives in a `TileSet`,
//! which is installed once per process and never changes afterwards.
use crate::error::{Error, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::fmt;

/// Upper bound on the number of tile types a tile set may define.
///
/// Per-type statistics are kept in fixed arrays of this size.
pub const MAX_TILE_TYPES: usize = 16;

/// Identifies one kind of tile on the board.
///
/// This is an index into the active `TileSet`; the engine compares tiles
/// only by this index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileType(u8);

impl TileType {
    /// Creates a tile type from its index in the tile set.
    ///
    /// # Panics
    /// Panics if `index >= MAX_TILE_TYPES`.
    pub fn new(index: u8) -> Self {
        assert!(
            (index as usize) < MAX_TILE_TYPES,
            "tile index {} out of range",
            index
        );
        TileType(index)
    }

    /// Returns the index of this tile type in the tile set.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One entry of a tile set: a human readable name and a display code.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TileEntry {
    pub name: String,
    pub code: char,
}

impl TileEntry {
    pub fn new(name: &str, code: char) -> Self {
        TileEntry {
            name: name.to_string(),
            code,
        }
    }
}

/// The ordered set of tile types a deployment recognises.
///
/// The position of an entry is its `TileType` index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSet {
    entries: Vec<TileEntry>,
}

impl TileSet {
    /// Builds a tile set, checking that it is non-empty, fits in
    /// `MAX_TILE_TYPES` and that no display code is reused.
    pub fn new(entries: Vec<TileEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyTileSet);
        }
        if entries.len() > MAX_TILE_TYPES {
            return Err(Error::TooManyTileTypes {
                max: MAX_TILE_TYPES,
                found: entries.len(),
            });
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.code == entry.code) {
                return Err(Error::DuplicateTileCode { code: entry.code });
            }
        }
        Ok(TileSet { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the display code of `tile`, or `'?'` if the index is not
    /// part of this set.
    pub fn code(&self, tile: TileType) -> char {
        self.entries.get(tile.index()).map_or('?', |e| e.code)
    }

    pub fn name(&self, tile: TileType) -> Option<&str> {
        self.entries.get(tile.index()).map(|e| e.name.as_str())
    }

    /// Looks up the tile type whose display code is `code`.
    pub fn parse_code(&self, code: char) -> Option<TileType> {
        self.entries
            .iter()
            .position(|e| e.code == code)
            .map(|i| TileType(i as u8))
    }

    /// Iterates over all tile types of this set in index order.
    pub fn iter(&self) -> impl Iterator<Item = TileType> + '_ {
        (0..self.entries.len()).map(|i| TileType(i as u8))
    }
}

impl Default for TileSet {
    /// The tile set of the reference game: blue, green, purple, red,
    /// skull and yellow.
    fn default() -> Self {
        TileSet {
            entries: vec![
                TileEntry::new("blue", 'B'),
                TileEntry::new("green", 'G'),
                TileEntry::new("purple", 'P'),
                TileEntry::new("red", 'R'),
                TileEntry::new("skull", 'S'),
                TileEntry::new("yellow", 'Y'),
            ],
        }
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}={}", e.code, e.name))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

static TILE_SET: OnceCell<TileSet> = OnceCell::new();

/// Installs the process-wide tile set.
///
/// Must happen before anything reads `global()`; once a set is in place
/// (installed or defaulted) it cannot be replaced.
pub fn install(set: TileSet) -> Result<()> {
    TILE_SET
        .set(set)
        .map_err(|_| Error::TileSetAlreadyInstalled)
}

/// Returns the process-wide tile set, defaulting it on first use.
pub fn global() -> &'static TileSet {
    TILE_SET.get_or_init(TileSet::default)
}
