//! # Board Battle Solver Library
//!
//! This library models the 7x5 tile board of the board battle mini-game
//! and searches it for the sequence of swaps that clears the most tiles.
//!
//! It is used by two binaries:
//! - `ai_solver`: reads one classified board and prints the best swap
//!   sequence as `x1 y1 x2 y2` lines for the input driver to replay.
//! - `search_bench`: measures search latency over seeded random boards.
//!
//! ## Modules
//! - `tiles`: tile type identifiers and the process-wide, configurable tile set.
//! - `engine`: the `Board`, its lock (match) mask and swap legality.
//! - `solver`: the depth-first search over reachable boards (`Solver`).
//! - `ranking`: terminal result statistics and the configurable comparator.
//! - `cache`: an optional memo of solved boards in front of the solver.
//! - `config`: JSON configuration for tiles, search and ranking.
//! - `utils`: text formats for boards.
//! - `error`: the crate's error type.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod solver;
pub mod tiles;
pub mod utils;

pub use error::{Error, Result};
