//! suckson CLI application
//!
//! Scaffolds a new project from a remote template archive.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use suckson_cli::cli::{handle_init, print_error, Cli, Commands};
use suckson_cli::config::AppConfig;
use suckson_cli::errors::Result;

#[tokio::main]
async fn main() -> ExitCode {
    // No process::exit: blocking extraction tasks must finish first
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed ({}): {}", e.category(), e);
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize logging based on verbosity
    init_logging(&cli);

    info!("suckson v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load(cli.global.config.clone()).await?;
    if let Some(mirror) = &cli.global.mirror {
        config.set_mirror(mirror.as_str());
    }

    // Execute the appropriate command
    match cli.command {
        Commands::Init(args) => {
            info!("Executing init command");
            handle_init(args, &config, cli.global.quiet).await
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    // Create environment filter
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("suckson_cli={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    // Initialize subscriber
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
