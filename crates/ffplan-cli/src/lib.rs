use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::info;

use ffplan::prelude::*;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no task file given, pass --task <FILE>")]
    MissingTask,
    #[error("task error: {0}")]
    Task(#[from] TaskError),
    #[error("search error: {0}")]
    Search(#[from] SearchError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Classical STRIPS planner (FF heuristic)", long_about = None)]
pub struct Cli {
    /// Search driver; without one the planner does nothing
    #[arg(value_enum)]
    pub mode: Option<Mode>,
    /// JSON task file
    #[arg(long)]
    pub task: Option<PathBuf>,
    /// Annealing RNG seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Best-first wall-clock budget in seconds
    #[arg(long, default_value_t = SearchConfig::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
    /// State arena capacity in 64-bit words
    #[arg(long, default_value_t = ArenaConfig::DEFAULT_CAPACITY_WORDS)]
    pub arena_words: usize,
    /// Annealing start temperature
    #[arg(long, default_value_t = AnnealConfig::DEFAULT_INITIAL_TEMPERATURE)]
    pub temperature: f64,
    /// Annealing cooling ratio per iteration
    #[arg(long, default_value_t = AnnealConfig::DEFAULT_COOLING_RATIO)]
    pub cooling: f64,
    /// Longest action trace annealing may build
    #[arg(long, default_value_t = AnnealConfig::DEFAULT_MAX_TRACE_LEN)]
    pub max_trace_len: usize,
    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Greedy best-first search
    Gbfs,
    /// Simulated annealing
    Sa,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..SearchConfig::default()
        }
    }

    fn anneal_config(&self) -> AnnealConfig {
        AnnealConfig {
            initial_temperature: self.temperature,
            cooling_ratio: self.cooling,
            seed: self.seed,
            max_trace_len: self.max_trace_len,
            ..AnnealConfig::default()
        }
    }
}

/// Load the task, run the chosen driver and print the result to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let Some(mode) = cli.mode else {
        writeln!(out, "no search mode given, expected `gbfs` or `sa`")?;
        return Ok(());
    };
    let path = cli.task.as_ref().ok_or(CliError::MissingTask)?;
    let task = StripsTask::load(path)?;
    info!(
        path = %path.display(),
        facts = task.fact_count(),
        actions = task.action_count(),
        ?mode,
        "planning"
    );

    let arena = ArenaConfig::new(cli.arena_words);
    let outcome = match mode {
        Mode::Gbfs => BestFirstSearch::new(&task, &arena, cli.search_config())?.run()?,
        Mode::Sa => SimulatedAnnealing::new(&task, &arena, cli.anneal_config())?.run()?,
    };
    print_outcome(&task, &outcome, out)
}

fn print_outcome<W: Write>(task: &StripsTask, outcome: &SearchOutcome, out: &mut W) -> Result<()> {
    match outcome {
        SearchOutcome::Solved(plan) => {
            out.write_all(task.format_plan(plan.actions()).as_bytes())?;
        }
        SearchOutcome::NoSolution => writeln!(out, "No solution found.")?,
        SearchOutcome::Timeout => {
            writeln!(out, "timeout")?;
            writeln!(out, "No solution found.")?;
        }
        SearchOutcome::Cooled => writeln!(out, "temperature floor reached")?,
    }
    Ok(())
}
