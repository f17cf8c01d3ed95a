use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use lazors::config::{parse_workers, SearchConfig};
use lazors::{bff, render, SearchOutcome};

#[derive(Parser)]
#[command(author, version, about = "Solve a Lazors puzzle given as a .bff file", long_about = None)]
struct Args {
    /// Puzzle file
    puzzle: PathBuf,

    /// Worker threads, or "auto"; overrides LAZORS_WORKERS. 1 gives the deterministic search
    #[arg(short = 'w', long = "workers")]
    workers: Option<String>,

    /// Also write a picture of the solution to this PNG file
    #[arg(long = "png")]
    png: Option<PathBuf>,
}

fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.workers {
        Some(workers) => SearchConfig::with_workers(parse_workers(workers)?),
        None => SearchConfig::from_env()?,
    };

    let board = bff::load(&args.puzzle)
        .with_context(|| format!("cannot load {}", args.puzzle.display()))?;
    info!("loaded {}", args.puzzle.display());
    print!("{}", board);
    println!();

    match board.solve(&config)? {
        SearchOutcome::Found(placement) => {
            print!("{}", board.show(&placement));
            if let Some(png) = &args.png {
                render::save(&board, &placement, png)
                    .with_context(|| format!("cannot write {}", png.display()))?;
                info!("picture written to {}", png.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        SearchOutcome::NotFound => {
            println!("no solution");
            Ok(ExitCode::from(2))
        }
    }
}

fn main() -> ExitCode {
    // defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
