//! Brickstore CLI
//!
//! Command-line interface for the LEGO set store

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "brickstore")]
#[command(about = "Brickstore - LEGO set aggregates in SQLite", long_about = None)]
struct Cli {
    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    Init,
    /// Save a new LEGO set
    Add(commands::sets::AddArgs),
    /// Print one LEGO set
    Show(commands::sets::IdArgs),
    /// Print every LEGO set
    List,
    /// Delete a LEGO set with its manual and models
    Remove(commands::sets::IdArgs),
    /// Print the physical table and column names in use
    Columns,
}

fn main() {
    let cli = Cli::parse();

    let result = commands::context::Context::open(cli.db, cli.config).and_then(|mut ctx| {
        match cli.command {
            Commands::Init => commands::schema::init(&mut ctx),
            Commands::Add(args) => commands::sets::add(&mut ctx, args),
            Commands::Show(args) => commands::sets::show(&ctx, args),
            Commands::List => commands::sets::list(&ctx),
            Commands::Remove(args) => commands::sets::remove(&mut ctx, args),
            Commands::Columns => commands::schema::columns(&ctx),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
