use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "runner-prices", version, about = "CI runner price table")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the price page server (default)
    Serve,

    /// Load the prices once and write the HTML page
    Render {
        /// Minutes to multiply every default price by
        #[arg(short, long)]
        minutes: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load the prices once and print them for a number of minutes
    Calculate {
        /// Minutes to multiply every default price by
        #[arg(short, long)]
        minutes: String,
    },

    /// Check configuration file validity
    Check,

    /// Show version information
    Version,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
