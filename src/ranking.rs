//! Ranking of terminal search results.
//!
//! A `SearchResult` is a swap path together with the board it ends on and
//! a few statistics about that board. A `Ranking` orders results by an
//! ordered list of `Criterion`s; the first criterion that tells two
//! results apart decides.
use crate::engine::Board;
use crate::solver::SwapStep;
use crate::tiles::{self, TileType, MAX_TILE_TYPES};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

/// A fully expanded search path and the terminal board it reaches.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Swaps to perform, in order.
    pub steps: Vec<SwapStep>,
    /// Board after all swaps; no legal swap remains on it.
    pub final_board: Board,
    /// Number of locked tiles on `final_board`.
    pub total_locks: usize,
    /// Locked tiles on `final_board` per tile type index.
    pub locks_per_tile: [usize; MAX_TILE_TYPES],
    /// Whether a full row or column of `final_board` is a single tile type.
    pub has_stun: bool,
}

impl SearchResult {
    pub fn new(steps: Vec<SwapStep>, final_board: Board) -> Self {
        SearchResult {
            total_locks: final_board.total_locks(),
            locks_per_tile: final_board.locks_per_tile(),
            has_stun: final_board.has_stun(),
            steps,
            final_board,
        }
    }

    /// Locked tiles of `tile` on the final board; zero when no tile is given.
    pub fn locks_of(&self, tile: Option<TileType>) -> usize {
        tile.map_or(0, |t| self.locks_per_tile[t.index()])
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} steps; {} locks; stun={}",
            self.steps.len(),
            self.total_locks,
            self.has_stun
        )
    }
}

/// One way of preferring a result over another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// A final board with a uniform row or column wins.
    Stun,
    /// More locked tiles of the preferred tile type wins.
    PreferredLocks,
    /// More locked tiles overall wins.
    TotalLocks,
    /// A shorter swap path wins.
    FewerSteps,
}

impl Criterion {
    /// Compares `a` against `b`; `Greater` means `a` is better.
    fn compare(self, a: &SearchResult, b: &SearchResult, preferred: Option<TileType>) -> Ordering {
        match self {
            Criterion::Stun => a.has_stun.cmp(&b.has_stun),
            Criterion::PreferredLocks => a.locks_of(preferred).cmp(&b.locks_of(preferred)),
            Criterion::TotalLocks => a.total_locks.cmp(&b.total_locks),
            Criterion::FewerSteps => b.steps.len().cmp(&a.steps.len()),
        }
    }
}

/// Criteria used when none are configured.
pub const DEFAULT_CRITERIA: [Criterion; 4] = [
    Criterion::Stun,
    Criterion::PreferredLocks,
    Criterion::TotalLocks,
    Criterion::FewerSteps,
];

/// Code of the tile type the default ranking favours.
pub const DEFAULT_PREFERRED_CODE: char = 'P';

/// A strict, configurable order over search results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    criteria: Vec<Criterion>,
    preferred: Option<TileType>,
}

impl Ranking {
    /// Creates a ranking that applies `criteria` in order.
    ///
    /// `preferred` is the tile type counted by `Criterion::PreferredLocks`;
    /// with `None` that criterion never separates two results.
    pub fn new(criteria: Vec<Criterion>, preferred: Option<TileType>) -> Self {
        Ranking {
            criteria,
            preferred,
        }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn preferred(&self) -> Option<TileType> {
        self.preferred
    }

    /// Compares two results. `Greater` means `a` ranks above `b`.
    ///
    /// The relation is antisymmetric: `compare(a, b)` is always the
    /// reverse of `compare(b, a)`.
    pub fn compare(&self, a: &SearchResult, b: &SearchResult) -> Ordering {
        for criterion in &self.criteria {
            let ord = criterion.compare(a, b, self.preferred);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Returns the best result, or `None` for an empty slice.
    ///
    /// When several results tie on every criterion, the earliest one wins.
    pub fn best<'a>(&self, results: &'a [SearchResult]) -> Option<&'a SearchResult> {
        results.iter().reduce(|best, candidate| {
            if self.compare(candidate, best) == Ordering::Greater {
                candidate
            } else {
                best
            }
        })
    }
}

impl Default for Ranking {
    /// Stun first, then locks of the purple tile, then total locks, then
    /// the shorter path.
    fn default() -> Self {
        Ranking::new(
            DEFAULT_CRITERIA.to_vec(),
            tiles::global().parse_code(DEFAULT_PREFERRED_CODE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn step(x1: usize, y1: usize, x2: usize, y2: usize) -> SwapStep {
        SwapStep { x1, y1, x2, y2 }
    }

    fn purple() -> Option<TileType> {
        tiles::global().parse_code('P')
    }

    // Row 1 is all green: 7 locks, stun.
    fn stun_result() -> SearchResult {
        let board = board_from_str_array(&[
            "BGPRSYB", "GGGGGGG", "PRSYBGP", "RSYBGPR", "SYBGPRS",
        ])
        .unwrap();
        SearchResult::new(vec![step(0, 0, 1, 0)], board)
    }

    // Three purple locks, nothing else.
    fn purple_result() -> SearchResult {
        let board = board_from_str_array(&[
            "BGPRSYB", "GPRSYBG", "PPPBGPR", "PRSYBGP", "RSYBGPY",
        ])
        .unwrap();
        SearchResult::new(vec![step(0, 0, 1, 0)], board)
    }

    // Four blue locks in column 6.
    fn four_locks_result() -> SearchResult {
        let board = board_from_str_array(&[
            "BGPRSYB", "GPRSYBB", "PRSYBGB", "RSYBGPB", "SYBGPRS",
        ])
        .unwrap();
        SearchResult::new(vec![step(0, 0, 1, 0)], board)
    }

    // Three yellow locks.
    fn three_locks_result(steps: usize) -> SearchResult {
        let board = board_from_str_array(&[
            "BGPRSYB", "GPRSYBG", "YYYBGPR", "PRSYBGP", "RSYBGPY",
        ])
        .unwrap();
        SearchResult::new(vec![step(0, 0, 1, 0); steps], board)
    }

    #[test]
    fn test_result_statistics() {
        let result = purple_result();
        assert_eq!(result.total_locks, 3);
        assert_eq!(result.locks_of(purple()), 3);
        assert_eq!(result.locks_of(None), 0);
        assert!(!result.has_stun);
        assert!(stun_result().has_stun);
        assert_eq!(stun_result().total_locks, 7);
        assert_eq!(format!("{}", purple_result()), "1 steps; 3 locks; stun=false");
    }

    #[test]
    fn test_stun_beats_everything_else() {
        let ranking = Ranking::default();
        assert_eq!(ranking.compare(&stun_result(), &purple_result()), Ordering::Greater);
        assert_eq!(ranking.compare(&purple_result(), &stun_result()), Ordering::Less);
    }

    #[test]
    fn test_preferred_locks_break_stun_tie() {
        let ranking = Ranking::default();
        // Neither has a stun; purple wins despite fewer total locks.
        assert_eq!(
            ranking.compare(&purple_result(), &four_locks_result()),
            Ordering::Greater
        );
    }

    #[test]
    fn test_total_locks_break_preferred_tie() {
        let ranking = Ranking::default();
        assert_eq!(
            ranking.compare(&four_locks_result(), &three_locks_result(1)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_fewer_steps_break_total_tie() {
        let ranking = Ranking::default();
        assert_eq!(
            ranking.compare(&three_locks_result(1), &three_locks_result(2)),
            Ordering::Greater
        );
        let without_steps = Ranking::new(
            vec![Criterion::Stun, Criterion::PreferredLocks, Criterion::TotalLocks],
            purple(),
        );
        assert_eq!(
            without_steps.compare(&three_locks_result(1), &three_locks_result(2)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_reordered_criteria() {
        let ranking = Ranking::new(vec![Criterion::TotalLocks, Criterion::PreferredLocks], purple());
        assert_eq!(
            ranking.compare(&four_locks_result(), &purple_result()),
            Ordering::Greater
        );
    }

    #[test]
    fn test_no_preferred_tile_falls_through() {
        let ranking = Ranking::new(DEFAULT_CRITERIA.to_vec(), None);
        assert_eq!(
            ranking.compare(&four_locks_result(), &purple_result()),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let results = vec![
            stun_result(),
            purple_result(),
            four_locks_result(),
            three_locks_result(1),
            three_locks_result(3),
        ];
        let rankings = vec![
            Ranking::default(),
            Ranking::new(vec![Criterion::TotalLocks], None),
            Ranking::new(vec![], None),
        ];
        for ranking in &rankings {
            for a in &results {
                for b in &results {
                    assert_eq!(ranking.compare(a, b), ranking.compare(b, a).reverse());
                }
            }
        }
    }

    #[test]
    fn test_best_picks_maximum() {
        let results = vec![three_locks_result(1), purple_result(), four_locks_result()];
        let best = Ranking::default().best(&results).unwrap();
        assert_eq!(best.locks_of(purple()), 3);
    }

    #[test]
    fn test_best_is_stable_on_ties() {
        let results = vec![three_locks_result(2), three_locks_result(2)];
        let best = Ranking::default().best(&results).unwrap();
        assert!(std::ptr::eq(best, &results[0]));
    }

    #[test]
    fn test_best_of_empty_is_none() {
        assert!(Ranking::default().best(&[]).is_none());
    }
}
