//! Command handlers for the suckson CLI
//!
//! Handlers translate parsed arguments into calls on the application layer
//! and report the outcome to the user.

use std::time::Instant;

use tracing::info;

use crate::app::{InitOutcome, Initializer, TemplateFetcher, TerminalPrompter};
use crate::cli::output::{print_next_steps, print_success};
use crate::cli::{InitArgs, ProgressDisplay};
use crate::config::AppConfig;
use crate::errors::Result;

/// Handle the init command
///
/// Resolves the target directory, collects answers, downloads the template
/// and patches its manifest. A cancelled overwrite is not an error.
pub async fn handle_init(args: InitArgs, config: &AppConfig, quiet: bool) -> Result<()> {
    let start_time = Instant::now();
    let request = args.to_request();
    info!(
        "Starting init for '{}' (force: {})",
        request.project_name, request.force_overwrite
    );

    let fetcher = TemplateFetcher::new(config.fetcher_config())?;
    let initializer = Initializer::new(fetcher);
    let base_dir = std::env::current_dir()?;
    let mut prompter = TerminalPrompter::new();
    let display = ProgressDisplay::new(quiet);

    match initializer
        .run(&request, &base_dir, &mut prompter, &display)
        .await?
    {
        InitOutcome::Cancelled => {
            info!("Init cancelled by user");
            if !quiet {
                println!("Operation cancelled");
            }
        }
        InitOutcome::Completed(summary) => {
            info!(
                "Init completed in {:?}: {} files in {}",
                start_time.elapsed(),
                summary.files,
                summary.destination.display()
            );
            print_success("Project initialization completed!");
            if !quiet {
                print_next_steps(&request.project_name);
            }
        }
    }

    Ok(())
}
