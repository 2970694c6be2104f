//! Command-line interface components
//!
//! This module contains CLI-specific code for suckson, including argument
//! parsing, progress display, and status output.

pub mod args;
pub mod commands;
pub mod output;
pub mod progress;

pub use args::{Cli, Commands, GlobalArgs, InitArgs};
pub use commands::handle_init;
pub use output::{print_error, print_success};
pub use progress::ProgressDisplay;
