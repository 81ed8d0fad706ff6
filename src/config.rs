//! File-backed configuration.
//!
//! A configuration file is JSON; every section and field is optional:
//!
//! ```json
//! {
//!   "tiles": [
//!     { "name": "blue", "code": "B" },
//!     { "name": "purple", "code": "P" }
//!   ],
//!   "search": { "result_cap": 100, "shuffle": true, "seed": null },
//!   "ranking": {
//!     "criteria": ["stun", "preferred_locks", "total_locks", "fewer_steps"],
//!     "preferred_tile": "P"
//!   }
//! }
//! ```
use crate::error::{Error, Result};
use crate::ranking::{Criterion, Ranking, DEFAULT_CRITERIA, DEFAULT_PREFERRED_CODE};
use crate::solver::SearchConfig;
use crate::tiles::{TileEntry, TileSet};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tile types in index order; empty means the default tile set.
    pub tiles: Vec<TileEntry>,
    pub search: SearchConfig,
    pub ranking: RankingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub criteria: Vec<Criterion>,
    /// Display code of the preferred tile type, if any.
    pub preferred_tile: Option<char>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            criteria: DEFAULT_CRITERIA.to_vec(),
            preferred_tile: Some(DEFAULT_PREFERRED_CODE),
        }
    }
}

impl Config {
    /// Reads a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Config> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the configured tile set, or the default one when the
    /// configuration lists no tiles.
    pub fn tile_set(&self) -> Result<TileSet> {
        if self.tiles.is_empty() {
            Ok(TileSet::default())
        } else {
            TileSet::new(self.tiles.clone())
        }
    }

    /// Builds the configured ranking, resolving the preferred tile code
    /// against `tile_set`.
    pub fn ranking(&self, tile_set: &TileSet) -> Result<Ranking> {
        let preferred = match self.ranking.preferred_tile {
            Some(code) => Some(
                tile_set
                    .parse_code(code)
                    .ok_or(Error::UnknownPreferredTile { code })?,
            ),
            None => None,
        };
        Ok(Ranking::new(self.ranking.criteria.clone(), preferred))
    }
}
