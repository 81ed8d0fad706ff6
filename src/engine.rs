//! Board model for the board battle mini-game.
//!
//! This module defines:
//! - `Board`: a fixed 7x5 grid of `TileType`s together with its derived
//!   lock mask (which tiles are part of a three-in-a-row match).
//! - Swap legality and application, the only way a board changes.
//! - The board dimensions and the canonical swap directions used by the solver.
//!
//! Coordinates are `(x, y)` with `x` the column (`0..BOARD_WIDTH`) and `y`
//! the row (`0..BOARD_HEIGHT`), `(0, 0)` being the top-left cell.
use crate::tiles::{self, TileType, MAX_TILE_TYPES};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 7;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 5;

/// Minimum length of a straight run of identical tiles that locks them.
pub const MIN_MATCH: usize = 3;

/// The four swap directions the solver tries from every cell, as `(dx, dy)`:
/// right, down-left, down and down-right.
///
/// Swapping A with B is the same move as swapping B with A, so the other
/// four of the eight neighbours never need to be enumerated.
pub const SWAP_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// A value per board cell, indexed `[x][y]`.
pub type Grid<T> = [[T; BOARD_HEIGHT]; BOARD_WIDTH];

/// One board state: tile types plus the lock mask derived from them.
///
/// Boards are never mutated after construction. `swap` returns a new
/// board and leaves the original untouched, so search branches can share
/// nothing.
///
/// Equality and hashing consider the tile grid only. The lock mask is a
/// pure function of the grid, so two equal grids always have equal masks.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid<TileType>,
    locked: Grid<bool>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid.hash(state);
    }
}

/// Accumulates consecutive equal tiles along one scan line and locks the
/// run when it reaches `MIN_MATCH`.
struct StreakFinder {
    run: [(usize, usize); BOARD_WIDTH],
    len: usize,
    tile: Option<TileType>,
}

impl StreakFinder {
    fn new() -> Self {
        StreakFinder {
            run: [(0, 0); BOARD_WIDTH],
            len: 0,
            tile: None,
        }
    }

    fn add(&mut self, grid: &Grid<TileType>, locked: &mut Grid<bool>, x: usize, y: usize) {
        let tile = grid[x][y];
        if self.tile != Some(tile) {
            self.finish(locked);
        }
        self.tile = Some(tile);
        self.run[self.len] = (x, y);
        self.len += 1;
    }

    fn finish(&mut self, locked: &mut Grid<bool>) {
        if self.len >= MIN_MATCH {
            for &(x, y) in &self.run[..self.len] {
                locked[x][y] = true;
            }
        }
        self.len = 0;
    }
}

impl Board {
    /// Creates a board from a typed grid and computes its lock mask.
    ///
    /// # Arguments
    /// * `grid`: tile types indexed `[x][y]`.
    pub fn from_grid(grid: Grid<TileType>) -> Self {
        let mut board = Board {
            grid,
            locked: [[false; BOARD_HEIGHT]; BOARD_WIDTH],
        };
        board.update_locks();
        board
    }

    /// Builds a board from raw tile-type codes as produced by the screen
    /// classifier, one slice per column (`columns[x][y]`).
    ///
    /// Malformed input is a bug in the caller, not something to recover from.
    ///
    /// # Panics
    /// Panics if there are not exactly `BOARD_WIDTH` columns of
    /// `BOARD_HEIGHT` values, or if a value is not a tile index of the
    /// process-wide tile set.
    ///
    /// # Examples
    /// ```
    /// use board_battle_solver::engine::Board;
    /// let columns = vec![vec![0u8, 1, 2, 3, 4]; 7];
    /// let board = Board::parse(&columns);
    /// assert_eq!(board.total_locks(), 7 * 5);
    /// ```
    pub fn parse<C: AsRef<[u8]>>(columns: &[C]) -> Self {
        assert_eq!(
            columns.len(),
            BOARD_WIDTH,
            "board must have {} columns",
            BOARD_WIDTH
        );
        let tile_count = tiles::global().len();
        let mut grid = [[TileType::new(0); BOARD_HEIGHT]; BOARD_WIDTH];
        for (x, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            assert_eq!(
                column.len(),
                BOARD_HEIGHT,
                "column {} must have {} cells",
                x,
                BOARD_HEIGHT
            );
            for (y, &value) in column.iter().enumerate() {
                assert!(
                    (value as usize) < tile_count,
                    "unknown tile code {} at ({}, {})",
                    value,
                    x,
                    y
                );
                grid[x][y] = TileType::new(value);
            }
        }
        Board::from_grid(grid)
    }

    /// Creates a random board drawing from the first `tile_count` tile types.
    ///
    /// The same seed always yields the same board, which keeps tests and
    /// benchmarks reproducible.
    ///
    /// # Panics
    /// Panics if `tile_count` is zero or larger than `MAX_TILE_TYPES`.
    pub fn random_with_seed(seed: u64, tile_count: usize) -> Self {
        assert!(
            tile_count > 0 && tile_count <= MAX_TILE_TYPES,
            "tile count {} out of range",
            tile_count
        );
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = [[TileType::new(0); BOARD_HEIGHT]; BOARD_WIDTH];
        for column in grid.iter_mut() {
            for cell in column.iter_mut() {
                *cell = TileType::new(rng.gen_range(0..tile_count as u8));
            }
        }
        Board::from_grid(grid)
    }

    /// Returns whether `(x, y)` lies on the board.
    pub fn in_range(x: isize, y: isize) -> bool {
        x >= 0 && (x as usize) < BOARD_WIDTH && y >= 0 && (y as usize) < BOARD_HEIGHT
    }

    /// Returns the tile at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn get_tile(&self, x: usize, y: usize) -> TileType {
        self.grid[x][y]
    }

    /// Returns whether the tile at `(x, y)` is part of a match.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn is_locked(&self, x: usize, y: usize) -> bool {
        self.locked[x][y]
    }

    pub fn grid(&self) -> &Grid<TileType> {
        &self.grid
    }

    pub fn locked_mask(&self) -> &Grid<bool> {
        &self.locked
    }

    /// Attempts to swap the tiles at `(x1, y1)` and `(x2, y2)`.
    ///
    /// The swap is legal only if both cells are on the board, neither is
    /// locked, and after the exchange at least one of the two cells is
    /// locked (the swap created a match).
    ///
    /// # Returns
    /// * `Some(board)`: the board after the swap, with a freshly computed lock mask.
    /// * `None`: the swap is illegal. `self` is never modified either way.
    pub fn swap(&self, x1: isize, y1: isize, x2: isize, y2: isize) -> Option<Board> {
        if !Board::in_range(x1, y1) || !Board::in_range(x2, y2) {
            return None;
        }
        let (x1, y1, x2, y2) = (x1 as usize, y1 as usize, x2 as usize, y2 as usize);

        if self.locked[x1][y1] || self.locked[x2][y2] {
            return None;
        }

        let mut grid = self.grid;
        let tmp = grid[x1][y1];
        grid[x1][y1] = grid[x2][y2];
        grid[x2][y2] = tmp;

        let swapped = Board::from_grid(grid);
        if !swapped.locked[x1][y1] && !swapped.locked[x2][y2] {
            return None;
        }
        Some(swapped)
    }

    /// Counts the locked tiles on the board.
    pub fn total_locks(&self) -> usize {
        self.locked.iter().flatten().filter(|&&l| l).count()
    }

    /// Counts the locked tiles of each tile type, indexed by `TileType::index`.
    pub fn locks_per_tile(&self) -> [usize; MAX_TILE_TYPES] {
        let mut counts = [0; MAX_TILE_TYPES];
        for x in 0..BOARD_WIDTH {
            for y in 0..BOARD_HEIGHT {
                if self.locked[x][y] {
                    counts[self.grid[x][y].index()] += 1;
                }
            }
        }
        counts
    }

    /// Returns whether some full row or full column holds a single tile type.
    ///
    /// Clearing a whole line stuns the opponent in the game.
    pub fn has_stun(&self) -> bool {
        let uniform_row = (0..BOARD_HEIGHT)
            .any(|y| (1..BOARD_WIDTH).all(|x| self.grid[x][y] == self.grid[0][y]));
        let uniform_column = (0..BOARD_WIDTH)
            .any(|x| (1..BOARD_HEIGHT).all(|y| self.grid[x][y] == self.grid[x][0]));
        uniform_row || uniform_column
    }

    /// Recomputes the lock mask from scratch: every column top to bottom,
    /// then every row left to right. Both passes only ever set cells.
    fn update_locks(&mut self) {
        self.locked = [[false; BOARD_HEIGHT]; BOARD_WIDTH];

        for x in 0..BOARD_WIDTH {
            let mut finder = StreakFinder::new();
            for y in 0..BOARD_HEIGHT {
                finder.add(&self.grid, &mut self.locked, x, y);
            }
            finder.finish(&mut self.locked);
        }

        for y in 0..BOARD_HEIGHT {
            let mut finder = StreakFinder::new();
            for x in 0..BOARD_WIDTH {
                finder.add(&self.grid, &mut self.locked, x, y);
            }
            finder.finish(&mut self.locked);
        }
    }
}

impl fmt::Display for Board {
    /// Prints column numbers, then one line per row. Each cell shows its
    /// tile code followed by `*` when locked.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tile_set = tiles::global();
        write!(f, "  ")?;
        for x in 0..BOARD_WIDTH {
            write!(f, "{:<3}", x)?;
        }
        for y in 0..BOARD_HEIGHT {
            write!(f, "\n{:<2}", y)?;
            for x in 0..BOARD_WIDTH {
                let marker = if self.locked[x][y] { '*' } else { ' ' };
                write!(f, "{}{} ", tile_set.code(self.grid[x][y]), marker)?;
            }
        }
        Ok(())
    }
}
