use anyhow::{bail, Result};
use board_battle_solver::engine::Board;
use board_battle_solver::ranking::Ranking;
use board_battle_solver::solver::{SearchConfig, Solver, DEFAULT_RESULT_CAP};
use board_battle_solver::tiles;
use clap::Parser;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Measures search latency on seeded random boards", long_about = None)]
struct Args {
    /// Number of random boards to solve
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; board i uses start_seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Result cap passed to the solver
    #[clap(long, default_value_t = DEFAULT_RESULT_CAP)]
    cap: usize,

    /// Number of tile types drawn on the random boards
    #[clap(long, default_value_t = 6)]
    tiles: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let tile_count = tiles::global().len();
    if args.tiles == 0 || args.tiles > tile_count {
        bail!("--tiles must be between 1 and {}", tile_count);
    }

    let ranking = Ranking::default();
    let mut total_time = Duration::ZERO;
    let mut worst_time = Duration::ZERO;
    let mut total_expanded = 0;
    let mut capped = 0;

    println!("Solving {} boards (cap {})...", args.boards, args.cap);

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx;
        let board = Board::random_with_seed(seed, args.tiles);
        let mut solver = Solver::new(SearchConfig {
            result_cap: args.cap,
            shuffle: true,
            seed: Some(seed),
        });

        let stopwatch = Instant::now();
        let best = solver.decide_best(&board, &ranking);
        let elapsed = stopwatch.elapsed();

        let stats = solver.stats();
        total_time += elapsed;
        worst_time = worst_time.max(elapsed);
        total_expanded += stats.expanded;
        if stats.cap_reached {
            capped += 1;
        }

        println!(
            "  Board {:<4} (Seed: {:<6}) {:>8.2} ms, {:>7} expanded, {:>4} results, best: {}",
            board_idx,
            seed,
            elapsed.as_secs_f64() * 1000.0,
            stats.expanded,
            stats.terminals,
            best
        );
    }

    if args.boards > 0 {
        let n = args.boards as f64;
        println!("\n--- Benchmark Complete ---");
        println!(
            "Average: {:.2} ms, {:.0} states expanded per board",
            total_time.as_secs_f64() * 1000.0 / n,
            total_expanded as f64 / n
        );
        println!("Worst:   {:.2} ms", worst_time.as_secs_f64() * 1000.0);
        println!("Boards that hit the result cap: {}", capped);
    }
    Ok(())
}
