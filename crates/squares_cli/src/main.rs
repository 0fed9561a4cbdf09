//! Command-line front end for the point store.
//!
//! # Responsibility
//! - Map subcommands onto `PointService` use-cases over a SQLite file.
//! - Keep output line-oriented and deterministic for scripting.

mod config;

use clap::{Parser, Subcommand};
use config::AppConfig;
use log::error;
use squares_core::db::open_db;
use squares_core::{
    init_logging, Coordinate, PointId, PointService, SquareEngine, SqlitePointRepository,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "squares", version, about = "Store integer points and list the squares they form")]
struct Cli {
    /// JSON config file (log level, log dir, engine tuning).
    #[arg(long)]
    config: Option<PathBuf>,
    /// SQLite database file; created when missing.
    db: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every stored point as `id x y`.
    List,
    /// Add one point.
    #[command(allow_negative_numbers = true)]
    Add { x: i32, y: i32 },
    /// Move an existing point.
    #[command(allow_negative_numbers = true)]
    Update { id: PointId, x: i32, y: i32 },
    /// Delete a point by ID.
    Delete { id: PointId },
    /// Import a JSON array of `{"x": .., "y": ..}` objects.
    Import { file: PathBuf },
    /// Print every square, one per line, corners sorted by (x, y).
    Squares,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load(cli.config.as_deref())?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = open_db(&cli.db)?;
    let repo = SqlitePointRepository::try_new(&conn)?;
    let service = PointService::with_engine(repo, SquareEngine::with_config(&config.engine)?);

    match cli.command {
        Command::List => {
            for point in service.list_points()? {
                println!("{} {} {}", point.id, point.x, point.y);
            }
        }
        Command::Add { x, y } => {
            let point = service.add_point(Coordinate::new(x, y))?;
            println!("{} {} {}", point.id, point.x, point.y);
        }
        Command::Update { id, x, y } => {
            let point = service.update_point(id, Coordinate::new(x, y))?;
            println!("{} {} {}", point.id, point.x, point.y);
        }
        Command::Delete { id } => {
            service.delete_point(id)?;
            println!("deleted {id}");
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            let candidates: Vec<Coordinate> = serde_json::from_str(&text)?;
            let summary = service.import_points(&candidates)?;
            println!(
                "submitted={} imported={} skipped={}",
                summary.submitted,
                summary.imported.len(),
                summary.skipped
            );
        }
        Command::Squares => {
            let mut squares = service.compute_squares()?.to_vec();
            squares.sort_by_key(|square| square.key());
            for square in &squares {
                let corners: Vec<String> = square
                    .corners()
                    .iter()
                    .map(|corner| format!("{},{}", corner.x, corner.y))
                    .collect();
                println!("{}", corners.join(" "));
            }
            println!("total={}", squares.len());
        }
    }

    Ok(())
}
