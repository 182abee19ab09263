//! Core data structures for Sudoku puzzles.
//!
//! This crate provides the grid representation shared by everything that
//! manipulates Sudoku boards: a type-safe digit, a board position, and the
//! 9×9 grid with its row/column/box uniqueness rules. Search strategy lives
//! elsewhere; the grid only stores cells and answers rule queries.
//!
//! # Overview
//!
//! - [`digit`]: Type-safe representation of Sudoku digits 1-9; empty cells
//!   are `Option::None`
//! - [`position`]: Board coordinates with row-major indexing and row,
//!   column, and box membership tables
//! - [`grid`]: The [`Grid`] itself with import/export of flat 81-value
//!   sequences, a text fixture format, and the consistency predicates,
//!   including the configurable [`BoxRule`] for the box scan
//!
//! # Examples
//!
//! ```
//! use superdoku_core::{Digit, Grid, Position};
//!
//! let grid = Grid::from_values(&[5, 3, 0, 0, 7])?;
//!
//! // Rule queries drive candidate filtering
//! let pos = Position::new(2, 0);
//! assert!(!grid.row_allows(pos, Digit::D5));
//! assert!(grid.row_allows(pos, Digit::D1));
//!
//! // The boundary format round-trips
//! let exported = grid.values();
//! assert_eq!(Grid::from_values(&exported)?, grid);
//! # Ok::<(), superdoku_core::GridError>(())
//! ```

pub mod digit;
pub mod grid;
pub mod position;

// Re-export commonly used types
pub use self::{
    digit::Digit,
    grid::{BoxRule, Grid, GridError, ParseGridError},
    position::Position,
};
