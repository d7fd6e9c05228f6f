//! Command-line interface orchestration for the warden simulator.
//!
//! The CLI offers a single `run` command that executes the Monte Carlo
//! estimation with a chosen backend and renders the resulting statistics.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, RunCommand, RunMode, render_summary, run_cli,
};
