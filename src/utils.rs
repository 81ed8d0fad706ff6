use crate::engine::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::{Error, Result};
use crate::tiles::{self, TileSet, TileType};

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from the top (row 0), and each
/// character is the display code of a tile in the process-wide tile set.
/// Exactly `BOARD_HEIGHT` rows of `BOARD_WIDTH` codes are required.
///
/// # Returns
/// * `Ok(Board)` with its lock mask computed.
/// * `Err(Error)` if the row count or a row length is wrong, or a code is
///   not in the tile set.
///
/// # Examples
/// ```
/// use board_battle_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&[
///     "BGPRSYB",
///     "GPRSYBG",
///     "YYYBGPR",
///     "PRSYBGP",
///     "RSYBGPY",
/// ])
/// .unwrap();
/// assert_eq!(board.total_locks(), 3);
///
/// assert!(board_from_str_array(&["BGPRSYB"]).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board> {
    board_from_str_array_with(rows, tiles::global())
}

/// Same as `board_from_str_array`, resolving codes against `tile_set`.
pub fn board_from_str_array_with(rows: &[&str], tile_set: &TileSet) -> Result<Board> {
    if rows.len() != BOARD_HEIGHT {
        return Err(Error::InvalidRowCount {
            expected: BOARD_HEIGHT,
            found: rows.len(),
        });
    }

    let mut grid = [[TileType::new(0); BOARD_HEIGHT]; BOARD_WIDTH];
    for (y, row) in rows.iter().enumerate() {
        let count = row.chars().count();
        if count != BOARD_WIDTH {
            return Err(Error::InvalidRowLength {
                row: y,
                expected: BOARD_WIDTH,
                found: count,
            });
        }
        for (x, code) in row.chars().enumerate() {
            grid[x][y] = tile_set
                .parse_code(code)
                .ok_or(Error::UnrecognizedTileCode { code, x, y })?;
        }
    }
    Ok(Board::from_grid(grid))
}

/// Parses a board given as `BOARD_WIDTH * BOARD_HEIGHT` tile codes in
/// row-major order. Whitespace (including newlines) is ignored, so both
/// `"BGPRSYB..."` and the five-line row form are accepted.
pub fn board_from_flat_str(s: &str) -> Result<Board> {
    board_from_flat_str_with(s, tiles::global())
}

/// Same as `board_from_flat_str`, resolving codes against `tile_set`.
pub fn board_from_flat_str_with(s: &str, tile_set: &TileSet) -> Result<Board> {
    let codes: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if codes.len() != BOARD_WIDTH * BOARD_HEIGHT {
        return Err(Error::InvalidFlatLength {
            expected: BOARD_WIDTH * BOARD_HEIGHT,
            found: codes.len(),
        });
    }

    let mut grid = [[TileType::new(0); BOARD_HEIGHT]; BOARD_WIDTH];
    for (i, &code) in codes.iter().enumerate() {
        let (x, y) = (i % BOARD_WIDTH, i / BOARD_WIDTH);
        grid[x][y] = tile_set
            .parse_code(code)
            .ok_or(Error::UnrecognizedTileCode { code, x, y })?;
    }
    Ok(Board::from_grid(grid))
}

/// Renders a board as its flat row-major code string.
pub fn board_to_flat_string(board: &Board) -> String {
    let tile_set = tiles::global();
    let mut out = String::with_capacity(BOARD_WIDTH * BOARD_HEIGHT);
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            out.push(tile_set.code(board.get_tile(x, y)));
        }
    }
    out
}
