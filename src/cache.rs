//! Memoisation of solved boards.
//!
//! `SolveCache` sits in front of the solver: asking for the same board
//! twice (by structural equality) returns the stored path instead of
//! searching again. Every miss runs a fresh `Solver`, so searches never
//! share visited sets, and the cache itself is behind a `Mutex` so one
//! instance can serve several threads.
use crate::engine::Board;
use crate::ranking::Ranking;
use crate::solver::{SearchConfig, Solver, SwapStep};
use log::debug;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Number of boards remembered when no capacity is given.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

#[derive(Default)]
struct CacheState {
    entries: HashMap<Board, Vec<SwapStep>>,
    // Insertion order, oldest first.
    order: VecDeque<Board>,
    hits: u64,
    misses: u64,
}

pub struct SolveCache {
    config: SearchConfig,
    ranking: Ranking,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl SolveCache {
    pub fn new(config: SearchConfig, ranking: Ranking) -> Self {
        SolveCache::with_capacity(config, ranking, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` boards (at least one).
    /// When full, the oldest entry is evicted.
    pub fn with_capacity(config: SearchConfig, ranking: Ranking, capacity: usize) -> Self {
        SolveCache {
            config,
            ranking,
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Returns the best swap path for `board`, searching only if this
    /// board has not been solved before.
    pub fn solve(&self, board: &Board) -> Vec<SwapStep> {
        {
            let mut state = self.lock();
            if let Some(steps) = state.entries.get(board).cloned() {
                state.hits += 1;
                debug!("solve cache hit ({} steps)", steps.len());
                return steps;
            }
            state.misses += 1;
        }

        // Search without holding the lock.
        let steps = Solver::new(self.config.clone()).solve(board, &self.ranking);

        let mut state = self.lock();
        if !state.entries.contains_key(board) {
            if state.order.len() >= self.capacity {
                if let Some(oldest) = state.order.pop_front() {
                    state.entries.remove(&oldest);
                }
            }
            state.order.push_back(board.clone());
            state.entries.insert(board.clone(), steps.clone());
        }
        steps
    }

    pub fn hits(&self) -> u64 {
        self.lock().hits
    }

    pub fn misses(&self) -> u64 {
        self.lock().misses
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets all stored boards. Hit and miss counters are kept.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A panic in another thread cannot leave the map half-updated.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
