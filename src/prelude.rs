//! Prelude module for the suckson library
//!
//! Re-exports the items needed to drive an initialization from code with a
//! single `use suckson_cli::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use suckson_cli::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let initializer = Initializer::new(TemplateFetcher::new(config.fetcher_config())?);
//!
//!     let base_dir = std::env::current_dir()?;
//!     let request = InitRequest::new("demo", false);
//!     let mut prompter = TerminalPrompter::new();
//!     initializer.run(&request, &base_dir, &mut prompter, &NullSink).await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Initialization flow
pub use crate::app::{
    AnswerSet, EventSink, FetcherConfig, InitEvent, InitOutcome, InitRequest, InitSummary,
    Initializer, NullSink, Prompter, Template, TemplateFetcher, TerminalPrompter,
};

// Configuration
pub use crate::config::AppConfig;
