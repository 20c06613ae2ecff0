//! `mine-solver-bench`: repeated-trial benchmark harness. Reproduces
//! `original_source/benchmark.py`'s preset sweeps and shared-seed comparisons.
//! Parallelizes across boards with `std::thread` scoped threads -- never across
//! a single board, per `spec.md` §5.

use std::thread;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use mine_solver::{backend_for, Board, BoardSolver, BoardState, GenSettings};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    Easy,
    Medium,
    Expert,
    Custom,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Dense,
    SparseLsmr,
}

impl From<BackendArg> for BoardSolver {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Dense => BoardSolver::DenseLstsq,
            BackendArg::SparseLsmr => BoardSolver::SparseLsmr,
        }
    }
}

/// Run repeated solver trials and report win rate and timing, mirroring
/// `original_source/benchmark.py`.
#[derive(Debug, Parser)]
#[command(name = "mine-solver-bench")]
struct Args {
    #[arg(long, value_enum, default_value_t = Preset::Easy)]
    preset: Preset,

    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    mines: Option<usize>,

    #[arg(long, default_value_t = 100)]
    repeats: usize,

    /// Base seed. With `--shared-seeds`, trial `i` uses `seed + i` for every
    /// backend under comparison, so backends are compared on identical boards.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    shared_seeds: bool,

    #[arg(long, value_enum, default_value_t = BackendArg::Dense)]
    backend: BackendArg,

    #[arg(long)]
    force_start_area: bool,

    #[arg(long)]
    json: bool,

    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum BenchArgsError {
    #[error("--preset custom requires --width, --height, and --mines")]
    MissingCustomDimensions,
    #[error("--repeats must be at least 1")]
    ZeroRepeats,
}

fn resolve_dimensions(args: &Args) -> Result<(usize, usize, usize), BenchArgsError> {
    match args.preset {
        Preset::Easy => Ok((9, 9, 10)),
        Preset::Medium => Ok((16, 16, 40)),
        Preset::Expert => Ok((30, 16, 99)),
        Preset::Custom => match (args.width, args.height, args.mines) {
            (Some(w), Some(h), Some(m)) => Ok((w, h, m)),
            _ => Err(BenchArgsError::MissingCustomDimensions),
        },
    }
}

#[derive(Debug, Serialize)]
struct BenchmarkReport {
    width: usize,
    height: usize,
    mines: usize,
    repeats: usize,
    wins: usize,
    losses: usize,
    win_rate: f64,
    total_seconds: f64,
    average_seconds: f64,
}

fn run_benchmark(
    width: usize,
    height: usize,
    mines: usize,
    repeats: usize,
    seed: Option<u64>,
    // Accepted for CLI/benchmark.py compatibility: comparing two invocations
    // (e.g. one per `--backend`) under `--shared-seeds` is meaningful because
    // both use the same `seed + i` sequence and land on identical boards.
    // Within a single run the per-trial seed always advances regardless.
    _shared_seeds: bool,
    solver: BoardSolver,
    force_start_area: bool,
) -> BenchmarkReport {
    let started = Instant::now();

    // `std::thread::scope` keeps boards fully independent (spec.md §5: "no
    // state is shared across boards") while letting the harness parallelize.
    let results: Vec<BoardState> = thread::scope(|scope| {
        let handles: Vec<_> = (0..repeats)
            .map(|i| {
                scope.spawn(move || {
                    // Every trial gets its own board even under a fixed base
                    // `--seed`: `original_source/benchmark.py::get_next_seed`
                    // never reruns the same board `repeats` times, it either
                    // pops a distinct seed off a shared list or draws a fresh
                    // one. `--shared-seeds` only matters across separate
                    // invocations being compared (e.g. one per `--backend`),
                    // where each needs the same `seed + i` sequence to land on
                    // identical boards; within one run the seed always
                    // advances per trial.
                    let trial_seed = seed.map(|s| s.wrapping_add(i as u64));
                    let mut settings = GenSettings::new(mines);
                    if let Some(s) = trial_seed {
                        settings = settings.with_seed(s);
                    }
                    if force_start_area {
                        settings = settings.with_force_start_area(true);
                    }
                    let mut board = Board::with_backend(backend_for(solver));
                    board.configure_and_solve(width, height, settings).state
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let wins = results.iter().filter(|s| **s == BoardState::Won).count();
    let losses = results.iter().filter(|s| **s == BoardState::Lost).count();
    let total_seconds = started.elapsed().as_secs_f64();

    BenchmarkReport {
        width,
        height,
        mines,
        repeats,
        wins,
        losses,
        win_rate: wins as f64 / repeats as f64,
        total_seconds,
        average_seconds: total_seconds / repeats as f64,
    }
}

fn display_results(report: &BenchmarkReport) {
    println!(
        "{}x{} / {} mines -- {} trials: {} wins, {} losses ({:.1}% win rate), {:.3}s total ({:.4}s/trial)",
        report.width,
        report.height,
        report.mines,
        report.repeats,
        report.wins,
        report.losses,
        report.win_rate * 100.0,
        report.total_seconds,
        report.average_seconds,
    );
}

fn main() -> Result<(), BenchArgsError> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    if args.repeats == 0 {
        return Err(BenchArgsError::ZeroRepeats);
    }

    let (width, height, mines) = resolve_dimensions(&args)?;

    let report = run_benchmark(
        width,
        height,
        mines,
        args.repeats,
        args.seed,
        args.shared_seeds,
        args.backend.into(),
        args.force_start_area,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).expect("report serializes"));
    } else {
        display_results(&report);
    }

    Ok(())
}
