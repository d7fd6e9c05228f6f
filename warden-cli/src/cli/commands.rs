//! Command implementations and argument parsing for the warden CLI.

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::thread;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use warden_core::{
    CLASSIC_PRISONERS, EstimatorResult, ExecutionMode, SimulationBuilder, WardenError,
};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "warden",
    about = "Estimate the 100 prisoners escape probability by Monte Carlo simulation."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the simulation and print the estimated statistics.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Total number of trials to simulate.
    #[arg(long)]
    pub trials: u64,

    /// Execution backend.
    #[arg(long, value_enum, default_value = "sequential")]
    pub mode: RunMode,

    /// Worker count for parallel modes (defaults to available parallelism).
    #[arg(long)]
    pub workers: Option<NonZeroUsize>,

    /// Number of prisoners (and boxes) per trial.
    #[arg(long, default_value_t = CLASSIC_PRISONERS)]
    pub prisoners: usize,

    /// Boxes each prisoner may open (defaults to half the prisoner count).
    #[arg(long)]
    pub max_opens: Option<usize>,
}

/// Execution backends selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Run every trial on the main thread.
    Sequential,
    /// One OS thread per worker.
    Threads,
    /// Rayon work-stealing pool.
    Rayon,
}

impl RunMode {
    /// Maps the CLI selection onto the core execution mode.
    #[must_use]
    pub const fn execution_mode(self) -> ExecutionMode {
        match self {
            Self::Sequential => ExecutionMode::Sequential,
            Self::Threads => ExecutionMode::Threads,
            Self::Rayon => ExecutionMode::Rayon,
        }
    }

    /// Returns the label used in log fields and the rendered summary.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Threads => "threads",
            Self::Rayon => "rayon",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core simulation failed.
    #[error(transparent)]
    Core(#[from] WardenError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Backend the run executed on.
    pub mode: RunMode,
    /// Number of workers the trials were split across.
    pub workers: NonZeroUsize,
    /// Estimated statistics produced by the core.
    pub result: EstimatorResult,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the simulation cannot be configured or run.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use warden_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["warden", "run", "--trials", "100"]);
/// let summary = run_cli(cli).expect("run must succeed");
/// assert_eq!(summary.result.trials(), 100);
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(trials = command.trials, mode = command.mode.label(), workers = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let workers = resolve_workers(command.mode, command.workers);
    Span::current().record("workers", field::display(workers));

    let prisoners = command.prisoners;
    let max_opens = command.max_opens.unwrap_or((prisoners / 2).max(1));
    let simulation = SimulationBuilder::new()
        .with_prisoners(prisoners)
        .with_max_opens(max_opens)
        .with_capacity(prisoners)
        .with_workers(workers.get())
        .with_execution_mode(command.mode.execution_mode())
        .build()?;

    let result = simulation.estimate(command.trials)?;
    info!(
        successes = result.successes(),
        mean = result.mean(),
        "command completed"
    );
    Ok(ExecutionSummary {
        mode: command.mode,
        workers,
        result,
    })
}

/// Chooses the worker count: sequential runs stay single-worker, parallel
/// runs fall back to the machine's available parallelism.
pub(super) fn resolve_workers(mode: RunMode, requested: Option<NonZeroUsize>) -> NonZeroUsize {
    if matches!(mode, RunMode::Sequential) {
        return NonZeroUsize::MIN;
    }
    requested.unwrap_or_else(|| thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Degenerate statistics (one trial or fewer) render as `undefined`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "mode: {}", summary.mode.label())?;
    writeln!(writer, "workers: {}", summary.workers)?;
    writeln!(writer, "trials: {}", summary.result.trials())?;
    writeln!(writer, "successes: {}", summary.result.successes())?;
    writeln!(writer, "mean: {:.6}", summary.result.mean())?;
    match summary.result.variance() {
        Some(variance) => writeln!(writer, "variance: {variance:.6}")?,
        None => writeln!(writer, "variance: undefined")?,
    }
    match summary.result.confidence_interval() {
        Some(interval) => writeln!(
            writer,
            "95% CI: [{:.6}, {:.6}]",
            interval.lower(),
            interval.upper()
        )?,
        None => writeln!(writer, "95% CI: undefined")?,
    }
    Ok(())
}
