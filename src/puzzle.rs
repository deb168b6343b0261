use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Side length of the board.
pub const SIZE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// The empty cell is represented by 0.
pub const BLANK: u8 = 0;

/// Tiles in row-major order, blank last.
pub const GOAL: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, BLANK];

/// Direction the blank travels. The tile on the far side slides the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Every direction, in the order legal moves are enumerated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// `(row, col)` delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// One immutable 3x3 configuration.
///
/// Cells are stored row-major. Every constructor checks that the cells are
/// a permutation of `1..=8` plus one [`BLANK`], and every transition keeps it
/// that way, so a `Board` can be hashed and compared structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELLS],
}

impl Board {
    /// Build a board from row-major cells.
    pub fn new(cells: [u8; CELLS]) -> Result<Self> {
        let mut seen = [false; CELLS];
        for &value in &cells {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(Error::TileOutOfRange { value })?;
            if *slot {
                return Err(Error::DuplicateTile { value });
            }
            *slot = true;
        }
        Ok(Self { cells })
    }

    /// Build a board from a grid of rows, checking its shape first.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != SIZE {
            return Err(Error::InvalidShape { rows: rows.len() });
        }

        let mut cells = [BLANK; CELLS];
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != SIZE {
                return Err(Error::InvalidRowLength {
                    row: i,
                    got: row.len(),
                });
            }
            cells[i * SIZE..(i + 1) * SIZE].copy_from_slice(row);
        }

        Self::new(cells)
    }

    pub fn goal() -> Self {
        Self { cells: GOAL }
    }

    /// A uniformly random board from the goal's parity class.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells = GOAL;
        loop {
            cells.shuffle(rng);
            let board = Self { cells };
            if board.is_solvable() {
                return board;
            }
        }
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIZE + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(SIZE)
    }

    pub fn is_goal(&self) -> bool {
        self.cells == GOAL
    }

    /// Position of `value`, which is a tile number or [`BLANK`].
    ///
    /// # Panics
    ///
    /// Panics if `value` is not on the board, which construction rules out
    /// for every value in `0..=8`.
    pub fn locate(&self, value: u8) -> (usize, usize) {
        let index = self
            .cells
            .iter()
            .position(|&cell| cell == value)
            .unwrap_or_else(|| panic!("value {value} missing from board {:?}", self.cells));
        (index / SIZE, index % SIZE)
    }

    pub fn blank(&self) -> (usize, usize) {
        self.locate(BLANK)
    }

    /// Directions the blank can travel without leaving the board.
    ///
    /// Corners allow two moves, edges three and the center four.
    pub fn legal_moves(&self) -> Vec<Move> {
        let (row, col) = self.blank();
        Move::ALL
            .into_iter()
            .filter(|&dir| Self::target(row, col, dir).is_some())
            .collect()
    }

    /// Board reached by sliding the blank in `direction`.
    pub fn apply_move(&self, direction: Move) -> Result<Self> {
        let (row, col) = self.blank();
        match Self::target(row, col, direction) {
            Some(target) => Ok(self.swap_blank(row * SIZE + col, target)),
            None => Err(Error::IllegalMove {
                direction,
                row,
                col,
            }),
        }
    }

    /// Every legal move paired with the board it produces.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board)> + '_ {
        let (row, col) = self.blank();
        let from = row * SIZE + col;
        Move::ALL.into_iter().filter_map(move |dir| {
            Self::target(row, col, dir).map(|to| (dir, self.swap_blank(from, to)))
        })
    }

    /// Sum of Manhattan distances of every tile from its goal cell.
    ///
    /// Admissible and consistent: one move shifts exactly one tile by one
    /// cell, so the value changes by exactly one per move.
    pub fn heuristic(&self) -> u32 {
        let mut distance = 0;
        for (index, &value) in self.cells.iter().enumerate() {
            if value != BLANK {
                let (row, col) = (index / SIZE, index % SIZE);
                let target_row = (value as usize - 1) / SIZE;
                let target_col = (value as usize - 1) % SIZE;
                distance += row.abs_diff(target_row) + col.abs_diff(target_col);
            }
        }
        distance as u32
    }

    /// Whether the goal is reachable from this board.
    ///
    /// On an odd-width board only tile moves across rows change the
    /// inversion count, and always by an even amount, so parity is invariant.
    pub fn is_solvable(&self) -> bool {
        Self::count_inversions(&self.cells) % 2 == 0
    }

    fn count_inversions(flattened: &[u8]) -> usize {
        flattened
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }

    fn target(row: usize, col: usize, dir: Move) -> Option<usize> {
        let (dr, dc) = dir.as_offset();
        let new_row = row.checked_add_signed(dr).filter(|&r| r < SIZE)?;
        let new_col = col.checked_add_signed(dc).filter(|&c| c < SIZE)?;
        Some(new_row * SIZE + new_col)
    }

    fn swap_blank(&self, from: usize, to: usize) -> Self {
        let mut cells = self.cells;
        cells.swap(from, to);
        Self { cells }
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse nine cells separated by whitespace, commas or `/`.
    /// `_`, `.` and `0` all mean the blank.
    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.len() != CELLS {
            return Err(Error::InvalidCellCount {
                got: tokens.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [BLANK; CELLS];
        for (cell, token) in cells.iter_mut().zip(&tokens) {
            *cell = match *token {
                "_" | "." => BLANK,
                other => other.parse().map_err(|_| Error::InvalidToken {
                    token: other.to_string(),
                    context: s.to_string(),
                })?,
            };
        }

        Self::new(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (i, &val) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                if val == BLANK {
                    write!(f, "_")?;
                } else {
                    write!(f, "{}", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_goal_is_goal_with_zero_heuristic() {
        let goal = Board::goal();
        assert!(goal.is_goal());
        assert_eq!(goal.heuristic(), 0);
        assert_eq!(goal.blank(), (2, 2));
    }

    #[test]
    fn test_from_rows_rejects_bad_shape() {
        let err = Board::from_rows(&[vec![1u8, 2, 3], vec![4, 5, 6]]).unwrap_err();
        assert_eq!(err, Error::InvalidShape { rows: 2 });

        let err = Board::from_rows(&[vec![1u8, 2, 3], vec![4, 5], vec![6, 7, 8, 0]]).unwrap_err();
        assert_eq!(err, Error::InvalidRowLength { row: 1, got: 2 });
    }

    #[test]
    fn test_new_rejects_duplicates_and_out_of_range() {
        assert_eq!(
            Board::new([1, 2, 3, 4, 5, 6, 7, 7, 0]).unwrap_err(),
            Error::DuplicateTile { value: 7 }
        );
        assert_eq!(
            Board::new([1, 2, 3, 4, 5, 6, 7, 9, 0]).unwrap_err(),
            Error::TileOutOfRange { value: 9 }
        );
        assert_eq!(
            Board::new([1, 2, 3, 4, 5, 6, 7, 0, 0]).unwrap_err(),
            Error::DuplicateTile { value: 0 }
        );
    }

    #[test]
    fn test_parse_accepts_separators_and_blank_markers() {
        let a = board("1 2 3 / 4 5 6 / 7 8 _");
        let b = board("1,2,3,4,5,6,7,8,0");
        let c = board("1 2 3\n4 5 6\n7 8 .");
        assert_eq!(a, Board::goal());
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "1 2 3".parse::<Board>(),
            Err(Error::InvalidCellCount { got: 3, .. })
        ));
        assert!(matches!(
            "1 2 3 4 5 6 7 x _".parse::<Board>(),
            Err(Error::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Board::goal().to_string(), "1 2 3\n4 5 6\n7 8 _\n");
    }

    #[test]
    fn test_legal_move_counts_by_blank_position() {
        // Blank at every cell: corners 2, edges 3, center 4.
        let expected = [2, 3, 2, 3, 4, 3, 2, 3, 2];
        for (index, &count) in expected.iter().enumerate() {
            let mut cells = GOAL;
            cells.swap(index, CELLS - 1);
            let b = Board::new(cells).unwrap();
            assert_eq!(b.legal_moves().len(), count, "blank at {index}");
        }
    }

    #[test]
    fn test_apply_move_swaps_blank() {
        let b = board("1 2 3 / 4 5 6 / 7 _ 8");
        assert_eq!(b.apply_move(Move::Right).unwrap(), Board::goal());
        assert_eq!(
            b.apply_move(Move::Left).unwrap(),
            board("1 2 3 / 4 5 6 / _ 7 8")
        );
    }

    #[test]
    fn test_apply_illegal_move_fails() {
        let err = Board::goal().apply_move(Move::Down).unwrap_err();
        assert_eq!(
            err,
            Error::IllegalMove {
                direction: Move::Down,
                row: 2,
                col: 2
            }
        );
    }

    #[test]
    fn test_move_then_opposite_restores_board() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let b = Board::shuffled(&mut rng);
            for dir in b.legal_moves() {
                let moved = b.apply_move(dir).unwrap();
                assert_ne!(moved, b);
                assert_eq!(moved.apply_move(dir.opposite()).unwrap(), b);
            }
        }
    }

    #[test]
    fn test_heuristic_changes_by_one_per_move() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let b = Board::shuffled(&mut rng);
            for (_, next) in b.successors() {
                assert_eq!(b.heuristic().abs_diff(next.heuristic()), 1);
            }
        }
    }

    #[test]
    fn test_heuristic_known_value() {
        // 8 is one column away, 7 is one column away.
        assert_eq!(board("1 2 3 / 4 5 6 / 8 7 _").heuristic(), 2);
        assert_eq!(board("_ 2 3 / 4 5 6 / 7 8 1").heuristic(), 4);
    }

    #[test]
    fn test_successors_match_legal_moves() {
        let b = board("1 2 3 / 4 _ 6 / 7 5 8");
        let moves: Vec<Move> = b.successors().map(|(m, _)| m).collect();
        assert_eq!(moves, b.legal_moves());
        for (m, next) in b.successors() {
            assert_eq!(Ok(next), b.apply_move(m));
        }
    }

    #[test]
    fn test_solvability_parity() {
        assert!(Board::goal().is_solvable());
        assert!(!board("2 1 3 / 4 5 6 / 7 8 _").is_solvable());
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert!(Board::shuffled(&mut rng).is_solvable());
        }
    }

    #[test]
    fn test_locate() {
        let b = board("7 4 8 / 5 3 2 / _ 1 6");
        assert_eq!(b.locate(BLANK), (2, 0));
        assert_eq!(b.locate(8), (0, 2));
        assert_eq!(b.get(1, 1), 3);
    }
}
