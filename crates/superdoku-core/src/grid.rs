//! The 9×9 cell grid and its consistency rules.
//!
//! This module provides [`Grid`], which owns the 81 cell values of a Sudoku
//! board and answers the row/column/box uniqueness queries the solver is
//! built on. The grid itself never searches; it only stores cells and
//! evaluates rules.
//!
//! # Boundary format
//!
//! Puzzles cross the crate boundary as flat row-major sequences of `u8`
//! values in the range 0-9, where 0 is an empty cell. [`Grid::from_values`]
//! imports such a sequence and [`Grid::values`] exports one.
//!
//! # Text format
//!
//! For fixtures and display, grids also parse from and render to text:
//! digits stand for themselves, `0`, `_`, and `.` are empty cells, and
//! whitespace is ignored.
//!
//! # Examples
//!
//! ```
//! use superdoku_core::{Digit, Grid, Position};
//!
//! let mut grid = Grid::new();
//! grid.set(Position::new(0, 0), Some(Digit::D5));
//!
//! // 5 now conflicts along its row, column, and box
//! assert!(!grid.row_allows(Position::new(8, 0), Digit::D5));
//! assert!(grid.row_allows(Position::new(8, 0), Digit::D6));
//! ```

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use crate::{digit::Digit, position::Position};

/// Selects which scanned cells the box predicate exempts from conflicting
/// with the candidate.
///
/// The row and column predicates always exempt exactly the target cell.
/// Historically the box predicate instead exempted every box cell sharing
/// the target's row or column; [`BoxRule::SharedLines`] reproduces that
/// behavior, [`BoxRule::ExactCell`] aligns the box predicate with the other
/// two.
///
/// The two rules only differ when [`Grid::box_allows`] is used on its own.
/// Combined with the row and column predicates, as in
/// [`Grid::placement_allowed`], they accept exactly the same placements:
/// every box cell the broad rule exempts lies in the target's row or column
/// and is therefore still scanned by one of the other predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BoxRule {
    /// Only the target cell itself is exempt from the duplicate scan.
    #[default]
    ExactCell,
    /// Box cells sharing the target's row or column are also exempt.
    SharedLines,
}

impl BoxRule {
    fn exempts(self, target: Position, scanned: Position) -> bool {
        match self {
            Self::ExactCell => scanned == target,
            Self::SharedLines => scanned.y() == target.y() || scanned.x() == target.x(),
        }
    }
}

/// Error returned when importing a flat value sequence fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// A value outside the range 0-9 was supplied.
    #[display("invalid cell value {value} at index {index}")]
    InvalidCellValue {
        /// Row-major index of the offending value.
        index: usize,
        /// The out-of-range value.
        value: u8,
    },
}

/// Error returned when parsing a grid from text fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    /// The text contains a character that is neither a cell nor whitespace.
    #[display("invalid character {character:?} in grid text")]
    InvalidCharacter {
        /// The offending character.
        character: char,
    },
    /// The text does not contain exactly 81 cells.
    #[display("expected 81 cells, found {count}")]
    WrongCellCount {
        /// Number of cell characters found.
        count: usize,
    },
}

/// A 9×9 Sudoku board.
///
/// Always holds exactly 81 cells, each either empty or a [`Digit`]. Cells
/// are addressed by [`Position`] and stored in row-major order.
///
/// Importing a puzzle performs no legality checking beyond the value range:
/// a freshly loaded grid may already violate Sudoku uniqueness, which
/// [`is_consistent`](Grid::is_consistent) detects.
///
/// # Examples
///
/// ```
/// use superdoku_core::{Grid, Position};
///
/// let grid = Grid::from_values(&[5, 3, 0, 0, 7])?;
/// assert_eq!(grid[Position::new(0, 0)].map(u8::from), Some(5));
/// assert_eq!(grid[Position::new(2, 0)], None);
/// assert!(!grid.is_complete());
/// # Ok::<(), superdoku_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Option<Digit>; 81],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid with all 81 cells unset.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [None; 81] }
    }

    /// Imports a grid from a row-major flat value sequence.
    ///
    /// Cells are filled from the start of `values`; 0 leaves a cell empty.
    /// A sequence shorter than 81 values leaves the remaining trailing cells
    /// empty, and values past the 81st are ignored entirely. No Sudoku
    /// legality checking is performed.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidCellValue`] if any of the first 81 values
    /// lies outside the range 0-9. Out-of-range values are never clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use superdoku_core::Grid;
    ///
    /// let grid = Grid::from_values(&[1, 2, 3])?;
    /// assert_eq!(grid.values()[..3], [1, 2, 3]);
    /// assert!(grid.values()[3..].iter().all(|&v| v == 0));
    ///
    /// assert!(Grid::from_values(&[10]).is_err());
    /// # Ok::<(), superdoku_core::GridError>(())
    /// ```
    pub fn from_values(values: &[u8]) -> Result<Self, GridError> {
        let mut cells = [None; 81];
        for (index, &value) in values.iter().take(81).enumerate() {
            match value {
                0 => {}
                1..=9 => cells[index] = Some(Digit::from_value(value)),
                _ => return Err(GridError::InvalidCellValue { index, value }),
            }
        }
        Ok(Self { cells })
    }

    /// Exports the grid as a row-major flat value sequence.
    ///
    /// Empty cells export as 0. Feeding the result back through
    /// [`from_values`](Grid::from_values) reproduces the grid exactly.
    #[must_use]
    pub fn values(&self) -> [u8; 81] {
        let mut values = [0; 81];
        for (value, cell) in values.iter_mut().zip(&self.cells) {
            if let Some(digit) = cell {
                *value = digit.value();
            }
        }
        values
    }

    /// Returns the cell at the given position.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()]
    }

    /// Sets the cell at the given position, `None` emptying it.
    pub fn set(&mut self, pos: Position, cell: Option<Digit>) {
        self.cells[pos.index()] = cell;
    }

    /// Empties every cell.
    ///
    /// The grid stays fully allocated; only the cell contents reset.
    pub fn clear(&mut self) {
        self.cells = [None; 81];
    }

    /// Checks that `digit` does not already appear in the row of `pos`.
    ///
    /// Cells in the target column are exempt, so a digit stored at `pos`
    /// itself never conflicts with placing the same digit there again.
    #[must_use]
    pub fn row_allows(&self, pos: Position, digit: Digit) -> bool {
        for scanned in Position::ROWS[usize::from(pos.y())] {
            if scanned.x() != pos.x() && self[scanned] == Some(digit) {
                return false;
            }
        }
        true
    }

    /// Checks that `digit` does not already appear in the column of `pos`.
    ///
    /// Cells in the target row are exempt, mirroring
    /// [`row_allows`](Grid::row_allows).
    #[must_use]
    pub fn column_allows(&self, pos: Position, digit: Digit) -> bool {
        for scanned in Position::COLUMNS[usize::from(pos.x())] {
            if scanned.y() != pos.y() && self[scanned] == Some(digit) {
                return false;
            }
        }
        true
    }

    /// Checks that `digit` does not already appear in the 3×3 box of `pos`,
    /// subject to the exemptions of `rule`.
    #[must_use]
    pub fn box_allows(&self, pos: Position, digit: Digit, rule: BoxRule) -> bool {
        for scanned in Position::BOXES[usize::from(pos.box_index())] {
            if !rule.exempts(pos, scanned) && self[scanned] == Some(digit) {
                return false;
            }
        }
        true
    }

    /// Checks that placing `digit` at `pos` passes the row, column, and box
    /// rules together.
    ///
    /// This is the predicate the solver consults for every candidate. It
    /// accepts the same placements under either [`BoxRule`].
    #[must_use]
    pub fn placement_allowed(&self, pos: Position, digit: Digit, rule: BoxRule) -> bool {
        self.row_allows(pos, digit)
            && self.column_allows(pos, digit)
            && self.box_allows(pos, digit, rule)
    }

    /// Returns `true` if no cell is empty.
    ///
    /// Completeness says nothing about legality; combine with
    /// [`is_consistent`](Grid::is_consistent) to recognize a solution.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns `true` if no filled cell duplicates a digit in its row,
    /// column, or box.
    ///
    /// Empty cells are skipped, so a partially filled grid can be
    /// consistent.
    ///
    /// # Examples
    ///
    /// ```
    /// use superdoku_core::Grid;
    ///
    /// // Two 5s in the top row
    /// let grid = Grid::from_values(&[5, 5])?;
    /// assert!(!grid.is_consistent());
    /// # Ok::<(), superdoku_core::GridError>(())
    /// ```
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        for pos in Position::ALL {
            if let Some(digit) = self[pos]
                && !self.placement_allowed(pos, digit, BoxRule::ExactCell)
            {
                return false;
            }
        }
        true
    }

    /// Returns `true` if the grid is a solution: complete and consistent.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.is_consistent()
    }
}

impl Index<Position> for Grid {
    type Output = Option<Digit>;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.index()]
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses a grid from text.
    ///
    /// Cells are read left to right, top to bottom: `1`-`9` are digits, and
    /// `0`, `_`, and `.` are empty cells. Whitespace is ignored wherever it
    /// appears, so fixtures may be laid out in rows and groups freely. The
    /// text must contain exactly 81 cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; 81];
        let mut count = 0;
        for character in s.chars() {
            if character.is_ascii_whitespace() {
                continue;
            }
            let cell = match character {
                '0' | '_' | '.' => None,
                '1'..='9' => {
                    #[expect(clippy::cast_possible_truncation)]
                    let value = character as u8 - b'0';
                    Some(Digit::from_value(value))
                }
                _ => return Err(ParseGridError::InvalidCharacter { character }),
            };
            if count < 81 {
                cells[count] = cell;
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseGridError::WrongCellCount { count });
        }
        Ok(Self { cells })
    }
}

impl Display for Grid {
    /// Renders nine rows of nine cells, `_` for empty, with cells grouped
    /// in threes. The output parses back into an equal grid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..9u8 {
            if y > 0 {
                f.write_str("\n")?;
            }
            for x in 0..9u8 {
                if x > 0 && x % 3 == 0 {
                    f.write_str(" ")?;
                }
                match self[Position::new(x, y)] {
                    Some(digit) => write!(f, "{digit}")?,
                    None => f.write_str("_")?,
                }
            }
        }
        Ok(())
    }
}
