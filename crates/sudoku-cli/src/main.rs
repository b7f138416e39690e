//! `solve`: reads a puzzle file, runs the constraint-graph solver to a
//! fixed point, and prints the resulting grid. Only the exit codes are a
//! contract (§6): 0 solved, 1 on argument/file error, 2 on an
//! unsatisfiable puzzle.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sudoku_core::{Puzzle, SolverConfig, SolverError, TextParser};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve a text-encoded Sudoku puzzle", long_about = None)]
struct Args {
    /// Path to a puzzle file in the rendering-contract text format.
    file: PathBuf,

    /// Magnitude (box side) of the grid; 3 gives the familiar 9x9 puzzle.
    #[arg(default_value_t = 3)]
    charset: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read {}: {}", args.file.display(), err);
            return ExitCode::from(1);
        }
    };

    let parser = match TextParser::parse(args.charset, &text) {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let mut puzzle = match Puzzle::from_parser(&parser) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let mut driver = SolverConfig::default().build_driver();
    match driver.solve(&mut puzzle) {
        Ok(_) => {
            print!("{puzzle}");
            if puzzle.is_solved() {
                ExitCode::from(0)
            } else {
                println!("(partial solution, no deduction applies further)");
                ExitCode::from(0)
            }
        }
        Err(SolverError::Unsatisfiable(fact_id)) => {
            eprintln!("error: puzzle is unsatisfiable (fact {fact_id:?} has no surviving claims)");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
