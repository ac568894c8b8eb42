use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "timelane-cli", version, about = "Timelane CLI")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,
    /// Path to a config file (defaults to ~/.config/timelane/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lane assignment
    Lanes {
        #[command(subcommand)]
        action: commands::lanes::LanesAction,
    },
    /// Window geometry: item rectangles and ruler marks
    View {
        #[command(subcommand)]
        action: commands::view::ViewAction,
    },
    /// Pointer gesture replay
    Gesture {
        #[command(subcommand)]
        action: commands::gesture::GestureAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // try_init so a second initialization (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Lanes { action } => commands::lanes::run(action),
        Commands::View { action } => commands::view::run(action, config_path),
        Commands::Gesture { action } => commands::gesture::run(action, config_path),
        Commands::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
