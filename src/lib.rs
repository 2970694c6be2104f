//! suckson library
//!
//! Scaffolds a new project from a remote template archive: resolves the
//! destination directory, asks for project metadata, downloads and extracts
//! the template under a time budget, and patches the project's `package.json`.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
