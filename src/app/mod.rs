//! Core application logic for suckson
//!
//! This module contains the initialization flow and its stages: target
//! resolution, interactive answers, template acquisition (HTTP client and
//! archive extraction) and manifest patching.
//!
//! # Examples
//!
//! ```rust,no_run
//! use suckson_cli::app::{
//!     FetcherConfig, InitOutcome, InitRequest, Initializer, NullSink, TemplateFetcher,
//!     TerminalPrompter,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = TemplateFetcher::new(FetcherConfig::default())?;
//! let initializer = Initializer::new(fetcher);
//! let request = InitRequest::new("demo", false);
//!
//! let base_dir = std::env::current_dir()?;
//! let mut prompter = TerminalPrompter::new();
//! match initializer.run(&request, &base_dir, &mut prompter, &NullSink).await? {
//!     InitOutcome::Completed(summary) => println!("Created {}", summary.destination.display()),
//!     InitOutcome::Cancelled => println!("Nothing to do"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod acquire;
pub mod archive;
pub mod client;
pub mod events;
pub mod init;
pub mod manifest;
pub mod models;
pub mod prompt;
pub mod target;

// Re-export main public API
pub use acquire::{remediation_hints, FetcherConfig, TemplateFetcher, TemplateSources};
pub use client::{ClientConfig, TemplateClient};
pub use events::{EventSink, InitEvent, NullSink};
pub use init::{InitOutcome, InitSummary, Initializer};
pub use manifest::{patch_manifest, Manifest};
pub use models::{AnswerSet, InitRequest, Template};
pub use prompt::{Prompter, TerminalPrompter};
pub use target::{resolve_target, ConflictChoice, TargetResolution};
