//! Example demonstrating puzzle solving from the command line.
//!
//! This example shows how to:
//! - Parse a board from its text form
//! - Run the backtracking solver and inspect the outcome
//! - Collect search statistics and timing
//!
//! # Usage
//!
//! Solve the built-in demonstration puzzle:
//!
//! ```sh
//! cargo run --example solve_puzzle
//! ```
//!
//! Solve a board given as 81 row-major cells, where `0`, `.` or `_` mark
//! empty cells and whitespace is ignored:
//!
//! ```sh
//! cargo run --example solve_puzzle -- \
//!     --board "4__3____1_9__6____7____5______1__28_______6__5_______3_2______9____4____8______7_"
//! ```
//!
//! Select the legacy box scan (only observable through the isolated box
//! predicate; solve results are identical):
//!
//! ```sh
//! cargo run --example solve_puzzle -- --box-rule shared-lines
//! ```
//!
//! Timing and search statistics are logged at info level:
//!
//! ```sh
//! RUST_LOG=info cargo run --example solve_puzzle
//! ```

use std::{process, time::Instant};

use clap::{Parser, ValueEnum};
use superdoku_core::{BoxRule, Grid};
use superdoku_solver::{BacktrackSolver, SolveOutcome, SolveStats};

const DEMO_BOARD: &str =
    "53__7____6__195____98____6_8___6___34__8_3__17___2___6_6____28____419__5____8__79";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BoxRuleKind {
    ExactCell,
    SharedLines,
}

impl From<BoxRuleKind> for BoxRule {
    fn from(kind: BoxRuleKind) -> Self {
        match kind {
            BoxRuleKind::ExactCell => Self::ExactCell,
            BoxRuleKind::SharedLines => Self::SharedLines,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board as 81 row-major cells; `0`, `.` or `_` mark empty cells.
    #[arg(long, value_name = "CELLS", default_value = DEMO_BOARD)]
    board: String,

    /// Box scan used by the isolated box predicate.
    #[arg(long, value_name = "RULE", default_value = "exact-cell")]
    box_rule: BoxRuleKind,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut grid: Grid = match args.board.parse() {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Invalid board: {err}");
            process::exit(2);
        }
    };

    println!("Problem:");
    println!("{grid}");
    println!();

    let solver = BacktrackSolver::with_box_rule(args.box_rule.into());
    let mut stats = SolveStats::new();
    let start = Instant::now();
    let outcome = solver.solve_with_stats(&mut grid, &mut stats);
    let elapsed = start.elapsed();

    log::info!(
        "{outcome} in {elapsed:?} ({} placements, {} backtracks)",
        stats.placements(),
        stats.backtracks()
    );

    match outcome {
        SolveOutcome::Solved => {
            println!("Solution:");
            println!("{grid}");
        }
        SolveOutcome::Unsolvable => {
            eprintln!("No solution exists for this board.");
            process::exit(1);
        }
        SolveOutcome::Canceled => unreachable!("no cancellation flag was set"),
    }
}
