use crate::engine::{Board, BOARD_HEIGHT, BOARD_WIDTH, SWAP_DIRECTIONS};
use crate::ranking::{Ranking, SearchResult};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// Default number of terminal results after which the search stops.
pub const DEFAULT_RESULT_CAP: usize = 100;

/// One swap of the solution path: exchange `(x1, y1)` with `(x2, y2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapStep {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl SwapStep {
    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (self.x1, self.y1, self.x2, self.y2)
    }
}

impl fmt::Display for SwapStep {
    /// Formats the step as `x1 y1 x2 y2`, the line format consumed by the
    /// input driver.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Tuning knobs of a search.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Stop expanding once this many terminal results are collected.
    pub result_cap: usize,
    /// Try candidate swaps in random order at every node.
    pub shuffle: bool,
    /// Seed for the shuffle; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            result_cap: DEFAULT_RESULT_CAP,
            shuffle: true,
            seed: None,
        }
    }
}

/// Counters describing the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Board states whose candidate swaps were tried.
    pub expanded: usize,
    /// Candidate swaps rejected by `Board::swap`.
    pub illegal_swaps: usize,
    /// Legal swaps leading to a board already seen in this search.
    pub revisits: usize,
    /// Terminal results recorded.
    pub terminals: usize,
    /// Whether the result cap stopped the search early.
    pub cap_reached: bool,
}

/// Depth-first search over the swap graph of a board.
///
/// The visited set and result list belong to one `search` call and are
/// reset at its start, so a `Solver` can be reused for successive boards
/// but must not be shared by concurrent searches.
pub struct Solver {
    config: SearchConfig,
    candidates: Vec<(isize, isize, isize, isize)>,
    rng: SmallRng,
    visited: HashSet<Board>,
    results: Vec<SearchResult>,
    stats: SearchStats,
}

impl Solver {
    /// Creates a solver. A `result_cap` of zero is raised to one so that a
    /// search always yields at least one result.
    pub fn new(mut config: SearchConfig) -> Self {
        config.result_cap = config.result_cap.max(1);
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut candidates = Vec::with_capacity(BOARD_WIDTH * BOARD_HEIGHT * SWAP_DIRECTIONS.len());
        for x in 0..BOARD_WIDTH as isize {
            for y in 0..BOARD_HEIGHT as isize {
                for &(dx, dy) in SWAP_DIRECTIONS.iter() {
                    candidates.push((x, y, dx, dy));
                }
            }
        }

        Solver {
            config,
            candidates,
            rng,
            visited: HashSet::new(),
            results: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the last `search` call.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of distinct boards seen by the last `search` call, the start included.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Enumerates terminal states reachable from `board`.
    ///
    /// A state is terminal when none of its legal swaps leads to a board
    /// not yet seen in this search. Each result carries the swap path from
    /// `board` to that state. If `board` has no legal swap the single
    /// result has an empty path and `board` itself as final board.
    ///
    /// Once `result_cap` results are collected no new branch is expanded;
    /// the results gathered so far are returned.
    pub fn search(&mut self, board: &Board) -> Vec<SearchResult> {
        self.visited.clear();
        self.results.clear();
        self.stats = SearchStats::default();

        self.visited.insert(board.clone());
        let mut path = Vec::new();
        self.dfs(board, &mut path);

        info!(
            "search finished: {} results, {} states expanded, {} illegal swaps, {} revisits",
            self.results.len(),
            self.stats.expanded,
            self.stats.illegal_swaps,
            self.stats.revisits
        );
        if self.stats.cap_reached {
            warn!(
                "result cap of {} reached, search stopped early",
                self.config.result_cap
            );
        }
        std::mem::take(&mut self.results)
    }

    /// Searches from `board` and returns the result `ranking` puts first.
    pub fn decide_best(&mut self, board: &Board, ranking: &Ranking) -> SearchResult {
        let results = self.search(board);
        ranking
            .best(&results)
            .cloned()
            .unwrap_or_else(|| SearchResult::new(Vec::new(), board.clone()))
    }

    /// Searches from `board` and returns only the best swap path.
    ///
    /// An empty path means no move is available.
    pub fn solve(&mut self, board: &Board, ranking: &Ranking) -> Vec<SwapStep> {
        self.decide_best(board, ranking).steps
    }

    fn dfs(&mut self, board: &Board, path: &mut Vec<SwapStep>) {
        self.stats.expanded += 1;

        let mut order = self.candidates.clone();
        if self.config.shuffle {
            order.shuffle(&mut self.rng);
        }

        let mut any_swappable = false;
        for (x, y, dx, dy) in order {
            if self.results.len() >= self.config.result_cap {
                self.stats.cap_reached = true;
                return;
            }

            let next = match board.swap(x, y, x + dx, y + dy) {
                Some(next) => next,
                None => {
                    self.stats.illegal_swaps += 1;
                    continue;
                }
            };
            if !self.visited.insert(next.clone()) {
                self.stats.revisits += 1;
                continue;
            }
            any_swappable = true;

            path.push(SwapStep {
                x1: x as usize,
                y1: y as usize,
                x2: (x + dx) as usize,
                y2: (y + dy) as usize,
            });
            self.dfs(&next, path);
            path.pop();
        }

        if !any_swappable {
            let result = SearchResult::new(path.clone(), board.clone());
            self.stats.terminals += 1;
            debug!("terminal result #{}: {}", self.results.len() + 1, result);
            self.results.push(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn seeded(seed: u64) -> SearchConfig {
        SearchConfig {
            seed: Some(seed),
            ..SearchConfig::default()
        }
    }

    fn has_legal_swap(board: &Board) -> bool {
        (0..BOARD_WIDTH as isize).any(|x| {
            (0..BOARD_HEIGHT as isize).any(|y| {
                SWAP_DIRECTIONS
                    .iter()
                    .any(|&(dx, dy)| board.swap(x, y, x + dx, y + dy).is_some())
            })
        })
    }

    fn replay(board: &Board, steps: &[SwapStep]) -> Option<Board> {
        let mut current = board.clone();
        for s in steps {
            current = current.swap(s.x1 as isize, s.y1 as isize, s.x2 as isize, s.y2 as isize)?;
        }
        Some(current)
    }

    #[test]
    fn test_swap_step_display() {
        let s = SwapStep { x1: 3, y1: 1, x2: 4, y2: 2 };
        assert_eq!(s.to_string(), "3 1 4 2");
        assert_eq!(s.as_tuple(), (3, 1, 4, 2));
    }

    #[test]
    fn test_search_board_without_legal_swaps() {
        // Every row is a full run, so every tile is locked and nothing can move.
        let board = board_from_str_array(&[
            "BBBBBBB", "GGGGGGG", "PPPPPPP", "RRRRRRR", "SSSSSSS",
        ])
        .unwrap();
        assert!(!has_legal_swap(&board));

        let mut solver = Solver::new(seeded(1));
        let results = solver.search(&board);
        assert_eq!(results.len(), 1);
        assert!(results[0].steps.is_empty());
        assert_eq!(results[0].final_board, board);
        assert_eq!(solver.stats().expanded, 1);
        assert!(!solver.stats().cap_reached);

        assert!(solver.solve(&board, &Ranking::default()).is_empty());
    }

    #[test]
    fn test_best_path_is_replayable() {
        let ranking = Ranking::default();
        let mut checked = 0;
        for seed in 0..40 {
            let board = Board::random_with_seed(seed, 6);
            if !has_legal_swap(&board) {
                continue;
            }
            let mut solver = Solver::new(seeded(seed));
            let best = solver.decide_best(&board, &ranking);
            assert!(!best.steps.is_empty(), "seed {}", seed);
            let replayed = replay(&board, &best.steps).expect("best path must replay");
            assert_eq!(replayed, best.final_board);
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_every_result_is_replayable_and_terminal() {
        let board = Board::random_with_seed(3, 5);
        let mut solver = Solver::new(seeded(3));
        let results = solver.search(&board);
        assert!(!results.is_empty());
        for result in &results {
            let replayed = replay(&board, &result.steps).expect("path must replay");
            assert_eq!(replayed, result.final_board);
            assert_eq!(result.total_locks, result.final_board.total_locks());
        }
    }

    #[test]
    fn test_search_never_expands_a_state_twice() {
        let board = Board::random_with_seed(11, 5);
        let mut solver = Solver::new(seeded(11));
        let results = solver.search(&board);

        let stats = solver.stats();
        assert_eq!(stats.expanded, solver.visited_count());
        assert_eq!(stats.terminals, results.len());

        let distinct: HashSet<&Board> = results.iter().map(|r| &r.final_board).collect();
        assert_eq!(distinct.len(), results.len());
    }

    #[test]
    fn test_seeded_search_is_deterministic() {
        let board = Board::random_with_seed(5, 6);
        let first = Solver::new(seeded(99)).search(&board);
        let second = Solver::new(seeded(99)).search(&board);
        let paths = |rs: &[SearchResult]| rs.iter().map(|r| r.steps.clone()).collect::<Vec<_>>();
        assert_eq!(paths(&first), paths(&second));
    }

    #[test]
    fn test_unshuffled_search_ignores_seed() {
        let board = Board::random_with_seed(8, 6);
        let config = |seed| SearchConfig {
            shuffle: false,
            seed: Some(seed),
            ..SearchConfig::default()
        };
        let first = Solver::new(config(1)).search(&board);
        let second = Solver::new(config(2)).search(&board);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.steps, b.steps);
        }
    }

    #[test]
    fn test_result_cap_bounds_search() {
        let mut capped = false;
        for seed in 0..20 {
            let board = Board::random_with_seed(seed, 5);
            let mut solver = Solver::new(SearchConfig {
                result_cap: 5,
                ..seeded(seed)
            });
            let results = solver.search(&board);
            assert!(!results.is_empty());
            assert!(results.len() <= 5);
            if solver.stats().cap_reached {
                assert_eq!(results.len(), 5);
                capped = true;
            }
        }
        assert!(capped, "no board produced more than 5 terminal states");
    }

    #[test]
    fn test_zero_cap_still_yields_a_result() {
        let board = Board::random_with_seed(2, 6);
        let mut solver = Solver::new(SearchConfig {
            result_cap: 0,
            ..seeded(2)
        });
        assert_eq!(solver.config().result_cap, 1);
        assert_eq!(solver.search(&board).len(), 1);
    }

    #[test]
    fn test_state_is_reset_between_searches() {
        let board = board_from_str_array(&[
            "BBGBPRS", "GPRSYBG", "PRSYBGP", "RSYBGPR", "SYBGPRS",
        ])
        .unwrap();
        assert!(has_legal_swap(&board));

        let mut solver = Solver::new(seeded(4));
        let first = solver.search(&board);
        let second = solver.search(&board);
        assert!(first.iter().all(|r| !r.steps.is_empty()));
        assert!(second.iter().all(|r| !r.steps.is_empty()));
        assert_eq!(solver.stats().terminals, second.len());

        let other = Board::random_with_seed(21, 6);
        for result in solver.search(&other) {
            assert!(replay(&other, &result.steps).is_some());
        }
    }

    #[test]
    fn test_decide_best_prefers_higher_total_locks() {
        let board = Board::random_with_seed(13, 6);
        let ranking = Ranking::new(vec![crate::ranking::Criterion::TotalLocks], None);
        let mut solver = Solver::new(seeded(13));
        let results = solver.search(&board);
        let max_locks = results.iter().map(|r| r.total_locks).max().unwrap();

        let mut solver = Solver::new(seeded(13));
        let best = solver.decide_best(&board, &ranking);
        assert_eq!(best.total_locks, max_locks);
    }
}
