//! PanelSplit CLI — plan grids and drive panel export runs.
//!
//! Usage:
//!   panelsplit plan <WIDTH> <HEIGHT> [OPTIONS]   Show the grid plan for a canvas
//!   panelsplit split [OPTIONS]                   Run a split against the memory engine
//!   panelsplit config                            Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "panelsplit",
    about = "Split a canvas into independently exported panels",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cut boundaries and cells for a canvas
    Plan {
        /// Canvas width in pixels
        width: f64,

        /// Canvas height in pixels
        height: f64,

        /// Row count
        #[arg(short, long, default_value = "2")]
        rows: u32,

        /// Column count
        #[arg(short, long, default_value = "2")]
        columns: u32,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a canvas into panels using the in-memory engine
    Split {
        /// Canvas width in pixels
        #[arg(long, default_value = "1000")]
        width: f64,

        /// Canvas height in pixels
        #[arg(long, default_value = "800")]
        height: f64,

        /// Row count (defaults from configuration)
        #[arg(short, long)]
        rows: Option<u32>,

        /// Column count (defaults from configuration)
        #[arg(short, long)]
        columns: Option<u32>,

        /// Output directory for panel artifacts
        #[arg(short, long)]
        output: PathBuf,

        /// Simulate a document with a locked background layer
        #[arg(long)]
        background_layer: bool,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    panelsplit_common::logging::init_logging(&panelsplit_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Plan {
            width,
            height,
            rows,
            columns,
            json,
        } => commands::plan::run(width, height, rows, columns, json),
        Commands::Split {
            width,
            height,
            rows,
            columns,
            output,
            background_layer,
        } => commands::split::run(width, height, rows, columns, output, background_layer).await,
        Commands::Config => commands::config::run(),
    }
}
