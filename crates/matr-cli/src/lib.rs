//! matr CLI library.
//!
//! Argument parsing, configuration layering and file plumbing around
//! [`matr_core`].

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::Cli;
pub use convert::{execute_convert, execute_convert_to};
pub use error::{CliError, Result};
pub use output::Formatter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
