mod commands;

use steamdb_offline::cli::{Cli, Commands};
use steamdb_offline::config::Config;
use steamdb_offline::error::Result;
use steamdb_offline::games::ScanOptions;
use steamdb_offline::logger;
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let args = Cli::parse_args();

    // Initialize logging system
    logger::init(args.verbose)?;

    debug!("steamdb-offline CLI starting");

    match run(args) {
        Ok(_) => {
            info!("Operation completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Operation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let mut config = Config::load_optional(args.config.as_deref())?;
    if let Some(steamapps) = args.steamapps {
        config.steamapps = Some(steamapps);
    }

    match args.command.unwrap_or_default() {
        Commands::Scan {
            output,
            detailed,
            skip_malformed,
            include_redistributables,
        } => commands::scan::execute(
            &config,
            output,
            detailed,
            ScanOptions {
                skip_malformed,
                include_redistributables,
            },
        ),

        Commands::Libraries => commands::libraries::execute(&config),

        Commands::Manifest { file } => commands::manifest::execute(&file),
    }
}
