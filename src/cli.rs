use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "steamdb-offline")]
#[command(about = "List locally installed Steam games without network access")]
#[command(version)]
#[command(author = "Khaled Developer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Specify configuration file path (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Main steamapps directory (defaults to the platform install location)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub steamapps: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Enumerate installed games and write them to a JSON file (default)
    Scan {
        /// Output JSON file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Show install path, size and last update for each game
        #[arg(short, long)]
        detailed: bool,

        /// Skip manifests that fail to parse instead of aborting
        #[arg(long)]
        skip_malformed: bool,

        /// Keep Steamworks redistributable packages
        #[arg(long)]
        include_redistributables: bool,
    },

    /// List discovered Steam library folders
    Libraries,

    /// Parse a single appmanifest file and print its fields as JSON
    Manifest {
        /// Path to an appmanifest_*.acf file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Scan {
            output: None,
            detailed: false,
            skip_malformed: false,
            include_redistributables: false,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
