// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use std::path::{Path, PathBuf};
use std::time::Duration;

use backtrack_trace::problems::{render_board, Cell, Combinations, NQueens, Permutations, WordGrid};
use backtrack_trace::two_pointer::{two_sum, two_sum_sorted};
use backtrack_trace::{
    BacktrackingEngine, Combinator, PacedObserver, Problem, ProblemError, SearchConfig, SearchError,
    SearchReport, SearchStatus, Side, StepBudget, TimeBudget,
};
use clap::{ArgAction, Parser, Subcommand};
use log::{error, info, LevelFilter};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Stop at the first solution.
    #[arg(long, global = true)]
    first_only: bool,

    /// Stop once this many solutions have been found.
    #[arg(long, global = true)]
    max_solutions: Option<usize>,

    /// Do not search below this depth.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Cancel the search after this many recursive calls.
    #[arg(long, global = true)]
    max_steps: Option<u64>,

    /// Cancel the search after this many milliseconds.
    #[arg(long, global = true)]
    time_limit_ms: Option<u64>,

    /// Pause this many milliseconds at every recursive call.
    #[arg(long, global = true, default_value_t = 0)]
    delay_ms: u64,

    /// Write the full trace (steps, tree, metrics) to this file as JSON.
    #[arg(long, global = true)]
    trace_json: Option<PathBuf>,

    /// Print the summary only, not the solutions.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log more; repeat for more detail. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// All k-subsets of 1..=n.
    Combinations { n: usize, k: usize },

    /// All orderings of the given distinct items.
    Permutations { items: Vec<String> },

    /// All placements of n non-attacking queens.
    Queens {
        n: usize,

        /// Log the column and diagonal check behind each rejected placement.
        #[arg(long)]
        constraints: bool,
    },

    /// Trace words through adjacent cells of a letter grid.
    WordSearch {
        /// Grid rows, comma separated, e.g. CATS,ORAT,DOGS,MATH.
        #[arg(long, value_delimiter = ',', required = true)]
        grid: Vec<String>,

        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Find two numbers adding up to a target.
    TwoSum {
        #[arg(long, allow_hyphen_values = true)]
        target: i64,

        /// Use converging pointers on ascending input and print every move.
        #[arg(long)]
        sorted: bool,

        #[arg(allow_negative_numbers = true, required = true)]
        nums: Vec<i64>,
    },
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        let mut config = SearchConfig::new().stop_after_first(self.first_only);
        if let Some(limit) = self.max_solutions {
            config = config.max_solutions(limit);
        }
        if let Some(depth) = self.max_depth {
            config = config.max_depth(depth);
        }
        config
    }

    fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error("invalid problem: {0}")]
    Problem(#[from] ProblemError),
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not export the trace: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn configure_logging(level_filter: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level_filter)
        .parse_default_env()
        .init();
}

fn main() {
    let args = Args::parse();
    configure_logging(args.level_filter());

    if let Err(e) = run(&args) {
        error!("Execution failed, error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> CliResult<()> {
    match &args.command {
        Command::Combinations { n, k } => {
            let problem = Combinations::new(*n, *k)?;
            let report = search(args, args.search_config(), &problem, &mut problem.initial_state());
            print_solutions(args, &report, |solution| format!("{:?}", solution));
            finish(args, &report)
        }
        Command::Permutations { items } => {
            let problem = Permutations::new(items.clone())?;
            let report = search(args, args.search_config(), &problem, &mut problem.initial_state());
            print_solutions(args, &report, |solution| solution.join(" "));
            finish(args, &report)
        }
        Command::Queens { n, constraints } => {
            let mut problem = NQueens::new(*n)?;
            if *constraints {
                problem = problem.with_constraint_reports();
            }
            let report = search(args, args.search_config(), &problem, &mut problem.initial_state());
            print_solutions(args, &report, |board| format!("{:?}\n{}", board, render_board(board)));
            finish(args, &report)
        }
        Command::WordSearch { grid, words } => {
            let grid = WordGrid::from_rows(grid.as_slice())?;
            let config = args.search_config().stop_after_first(true);
            let mut reports: Vec<SearchReport<Cell>> = Vec::with_capacity(words.len());
            for word in words {
                let problem = grid.word(word)?;
                let report = search(args, config, &problem, &mut problem.initial_state());
                match report.solutions.first() {
                    Some(path) => println!("{}: {}", word, format_path(path)),
                    None => println!("{}: not found", word),
                }
                let outcome = check(&report);
                reports.push(report);
                if outcome.is_err() {
                    export(args, &reports)?;
                    return outcome;
                }
            }
            export(args, &reports)
        }
        Command::TwoSum {
            target,
            sorted,
            nums,
        } => {
            if *sorted {
                let trace = two_sum_sorted(nums, *target);
                if !args.quiet {
                    for step in &trace.moves {
                        println!(
                            "left {} right {} sum {}: {}",
                            step.left, step.right, step.sum, step.action
                        );
                    }
                }
                print_pair(trace.pair);
                export(args, &trace)
            } else {
                let pair = two_sum(nums, *target);
                print_pair(pair);
                export(args, &pair)
            }
        }
    }
}

/// Run one search with the termination and pacing options of `args`.
fn search<P>(args: &Args, config: SearchConfig, problem: &P, state: &mut P::State) -> SearchReport<P::Choice>
where
    P: Problem,
{
    let engine = BacktrackingEngine::new(config);
    let mut observer = PacedObserver::new((), Duration::from_millis(args.delay_ms));
    let mut termination = Combinator::new(
        args.max_steps.map(StepBudget::new),
        args.time_limit_ms
            .map(|ms| TimeBudget::starting_now(Duration::from_millis(ms))),
    );

    let report = engine.run(problem, state, &mut observer, &mut termination);
    match termination.stopped_by() {
        Some(Side::First) => info!(
            "{}: step budget of {} calls used up",
            problem.name(),
            args.max_steps.unwrap_or_default()
        ),
        Some(Side::Second) => info!(
            "{}: time limit of {} ms reached",
            problem.name(),
            args.time_limit_ms.unwrap_or_default()
        ),
        None => {}
    }
    print_summary(problem.name(), &report);
    report
}

/// Export the trace of a search, then report its failure if it failed.
fn finish<C: Serialize>(args: &Args, report: &SearchReport<C>) -> CliResult<()> {
    export(args, report)?;
    check(report)
}

fn check<C>(report: &SearchReport<C>) -> CliResult<()> {
    match report.error() {
        Some(e) => Err(e.clone().into()),
        None => Ok(()),
    }
}

fn print_summary<C>(name: &str, report: &SearchReport<C>) {
    let status = match &report.status {
        SearchStatus::Exhausted => "exhausted",
        SearchStatus::StoppedEarly => "stopped early",
        SearchStatus::Cancelled => "cancelled",
        SearchStatus::Failed(_) => "failed",
    };
    let metrics = &report.metrics;
    println!(
        "{}: {} with {} solutions, {} steps, {} backtracks, {} pruned, {} rejected, max depth {}, {:?} ({})",
        name,
        status,
        metrics.solution_count,
        metrics.total_steps,
        metrics.backtrack_count,
        metrics.pruning_count,
        metrics.constraint_rejections,
        metrics.max_depth,
        metrics.elapsed,
        metrics.complexity_hint(),
    );
}

fn print_solutions<C, F>(args: &Args, report: &SearchReport<C>, format: F)
where
    F: Fn(&[C]) -> String,
{
    if args.quiet {
        return;
    }
    for solution in &report.solutions {
        println!("{}", format(solution));
    }
}

fn print_pair(pair: Option<(usize, usize)>) {
    match pair {
        Some((i, j)) => println!("[{}, {}]", i, j),
        None => println!("no pair"),
    }
}

fn format_path(path: &[Cell]) -> String {
    path.iter()
        .map(Cell::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn export<T: Serialize + ?Sized>(args: &Args, value: &T) -> CliResult<()> {
    if let Some(path) = &args.trace_json {
        write_json(path, value)?;
        info!("trace written to {}", path.display());
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
