use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Combine lat/lon named tiles into a single grid image
#[derive(Parser)]
#[command(name = "tilegrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing tile images (e.g. N09E092.png)
    #[arg(
        short = 'd',
        long,
        env = "TILEGRID_INPUT_DIR",
        default_value = ".",
        global = true
    )]
    input_dir: PathBuf,

    /// Log per-tile details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the composite grid image
    Combine {
        /// Output filename, relative to the input directory unless absolute
        #[arg(
            short,
            long,
            env = "TILEGRID_OUTPUT",
            default_value = tilegrid::DEFAULT_OUTPUT
        )]
        output: String,

        /// Print a JSON summary instead of progress output
        #[arg(short, long)]
        json: bool,
    },

    /// List tiles found in the input directory
    List,

    /// List grid cells that have no tile file
    Missing {
        /// Print every missing filename instead of the first 20
        #[arg(short, long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "tilegrid=debug"
    } else {
        "tilegrid=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Combine { output, json } => commands::combine::run(cli.input_dir, output, json),
        Commands::List => commands::list::run(cli.input_dir),
        Commands::Missing { all } => commands::missing::run(cli.input_dir, all),
    }
}
