use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

mod config;
mod dataset;
mod error;
mod logging;
mod stages;

use crate::config::Config;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "etl_employees")]
#[command(about = "Daily employee ETL pipeline: source check, transform, load")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the raw input file is present
    SourceCheck,
    /// Clean and enrich the raw dataset into the processed file
    Transform,
    /// Replace the destination table with the processed dataset
    Load,
    /// Run all three stages in order
    Run,
}

fn run_source_check(config: &Config) -> Result<()> {
    stages::source_check(config)?;
    println!("✅ {} is ready", config.raw_path.display());
    Ok(())
}

fn run_transform(config: &Config) -> Result<()> {
    let summary = stages::transform(config)?;
    println!("\n📊 Transform results:");
    println!("   Rows read: {}", summary.rows_read);
    println!("   Dropped (invalid salary): {}", summary.dropped_invalid_salary);
    println!("   Dropped (below threshold): {}", summary.dropped_below_threshold);
    println!("   Rows written: {}", summary.rows_written);
    println!("   Output file: {}", config.processed_path.display());
    Ok(())
}

fn run_load(config: &Config) -> Result<()> {
    let summary = stages::load(config)?;
    println!("\n📊 Load results:");
    println!("   Rows loaded: {}", summary.rows_loaded);
    println!("   Table: {}", summary.table);
    println!("   Store: {}", config.store_path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load(&path)?,
        None => Config::load_or_default()?,
    };

    let result = match cli.command {
        Commands::SourceCheck => {
            println!("🔎 Checking raw source file...");
            run_source_check(&config)
        }
        Commands::Transform => {
            println!("🔄 Running transform stage...");
            run_transform(&config)
        }
        Commands::Load => {
            println!("📥 Running load stage...");
            run_load(&config)
        }
        Commands::Run => {
            println!("🚀 Running full pipeline (source check + transform + load)...");
            run_source_check(&config)
                .and_then(|_| run_transform(&config))
                .and_then(|_| run_load(&config))
                .map(|_| {
                    info!("pipeline finished");
                    println!("\n✅ Full pipeline completed successfully!");
                })
        }
    };

    if let Err(e) = result {
        error!("Stage failed: {}", e);
        println!("❌ Stage failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
