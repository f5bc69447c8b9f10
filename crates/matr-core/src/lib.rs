//! matr core
//!
//! Turns tab-delimited `source\ttarget\tscore` records into a dense square
//! matrix over every key seen.
//!
//! The pipeline has three phases:
//! - **Accumulate**: each line is parsed ([`record`]) and ingested into a
//!   [`ScoreGraph`], which rejects conflicting duplicates and, in symmetric
//!   mode, mismatched reverse pairs
//! - **Resolve**: the self-score policy fills or overwrites every (k, k)
//! - **Emit**: keys are sorted by byte order and the matrix is written in
//!   wide or long style
//!
//! Scores are opaque text. `"10"` and `"10.0"` are different scores.
//!
//! # Examples
//!
//! ```
//! use matr_core::{Matrix, MatrixConfig};
//!
//! let input = ["h1\th2\tscore", "a\tb\t10", "b\tc\t20"];
//! let matrix = Matrix::from_lines(input, MatrixConfig::default()).unwrap();
//!
//! let lines: Vec<String> = matrix.lines().collect();
//! assert_eq!(lines[0], "\ta\tb\tc");
//! assert_eq!(lines[1], "a\t100\t10\tna");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod emitter;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod record;
pub mod resolver;

pub use config::{MatrixConfig, Mode, OutputStyle};
pub use emitter::Row;
pub use error::{MatrixError, Result};
pub use graph::{ScoreGraph, SortedKeys};
pub use pipeline::{Matrix, MatrixBuilder, MatrixStats};
pub use record::{parse_line, ParsedLine, Record};
pub use resolver::resolve_self_scores;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
