use anyhow::{Context, Result};
use board_battle_solver::config::Config;
use board_battle_solver::solver::Solver;
use board_battle_solver::tiles;
use board_battle_solver::utils::board_from_flat_str;
use clap::Parser;
use log::info;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file (tile set, search and ranking settings)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Stop the search after this many terminal results
    #[clap(long)]
    cap: Option<usize>,

    /// Seed for the candidate swap shuffle
    #[clap(long)]
    seed: Option<u64>,

    /// Try candidate swaps in raster order instead of shuffling
    #[clap(long)]
    no_shuffle: bool,

    /// Board file: 5 rows of 7 tile codes, or 35 codes on one line.
    /// Read from stdin when omitted.
    board_file: Option<PathBuf>,
}

fn read_board_text(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read board file {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read board from stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let tile_set = config.tile_set()?;
    let ranking = config.ranking(&tile_set)?;
    tiles::install(tile_set)?;
    info!("tile set: {}", tiles::global());

    let mut search = config.search.clone();
    if let Some(cap) = args.cap {
        search.result_cap = cap;
    }
    if args.seed.is_some() {
        search.seed = args.seed;
    }
    if args.no_shuffle {
        search.shuffle = false;
    }

    let text = read_board_text(args.board_file.as_ref())?;
    let board = board_from_flat_str(&text).context("invalid board")?;
    info!("initial board:\n{}", board);

    let mut solver = Solver::new(search);
    let best = solver.decide_best(&board, &ranking);
    let stats = solver.stats();
    info!(
        "best of {} terminal results: {} ({} states expanded)",
        stats.terminals, best, stats.expanded
    );
    info!("final board:\n{}", best.final_board);

    if best.steps.is_empty() {
        info!("no move available");
    }
    for step in &best.steps {
        println!("{}", step);
    }
    Ok(())
}
