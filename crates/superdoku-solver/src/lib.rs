//! Solving algorithms for `superdoku` grids.
//!
//! The only strategy offered is [`BacktrackSolver`], a deterministic
//! depth-first search: cells are visited in row-major order, candidate
//! digits are tried in ascending order, and dead ends are undone cell by
//! cell. Solvable boards always end up at their lexicographically first
//! completion; boards with no completion report
//! [`SolveOutcome::Unsolvable`] and are left untouched.
//!
//! ```
//! use superdoku_core::Grid;
//! use superdoku_solver::{BacktrackSolver, SolveOutcome};
//!
//! let mut grid: Grid = "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! "
//! .parse()?;
//!
//! let outcome = BacktrackSolver::new().solve(&mut grid);
//! assert_eq!(outcome, SolveOutcome::Solved);
//! assert!(grid.is_solved());
//! # Ok::<(), superdoku_core::ParseGridError>(())
//! ```

pub mod backtrack;

pub use self::backtrack::{BacktrackSolver, SolveOutcome, SolveStats};
