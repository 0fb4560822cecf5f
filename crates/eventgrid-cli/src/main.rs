use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "eventgrid", version, about = "Calendar event column layout")]
struct Cli {
    /// Config file to use instead of ~/.config/eventgrid/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group numeric events into overlap clusters
    Clusters(commands::layout::InputArgs),
    /// Lay out one day of numeric events into columns
    Layout {
        #[command(flatten)]
        input: commands::layout::InputArgs,
        /// Cap columns per cluster (overrides overflow.max_columns)
        #[arg(long)]
        max_columns: Option<usize>,
    },
    /// Bucket timestamped events by day and lay out every day
    Bucket {
        #[command(flatten)]
        input: commands::layout::InputArgs,
        /// Cap columns per cluster (overrides overflow.max_columns)
        #[arg(long)]
        max_columns: Option<usize>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("EVENTGRID_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Clusters(input) => commands::layout::run_clusters(&input),
        Commands::Layout { input, max_columns } => {
            commands::layout::run_layout(&input, max_columns, config_path)
        }
        Commands::Bucket { input, max_columns } => {
            commands::layout::run_bucket(&input, max_columns, config_path)
        }
        Commands::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
