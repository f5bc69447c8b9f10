//! Input and output plumbing for the CLI.

use crate::error::{CliError, Result};
use colored::*;
use matr_core::MatrixStats;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Open the input as a line source.
///
/// `-` reads stdin. Any other path must exist.
pub fn open_source(infile: &str) -> Result<Box<dyn BufRead>> {
    if infile == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let path = Path::new(infile);
    if !path.exists() {
        return Err(CliError::SourceUnavailable(format!(
            "infile '{}' does not exist",
            infile
        )));
    }

    let file = File::open(path)
        .map_err(|e| CliError::SourceUnavailable(format!("infile '{}': {}", infile, e)))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Open the output sink: a file when given, stdout otherwise.
pub fn open_sink(outfile: Option<&Path>) -> Result<Box<dyn Write>> {
    match outfile {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Formats messages written to stderr.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        let text = format!("Error: {}", message);
        if self.color_enabled {
            text.red().to_string()
        } else {
            text
        }
    }

    /// Format a run summary.
    pub fn summary(&self, stats: &MatrixStats) -> String {
        let text = format!("✓ {}", stats);
        if self.color_enabled {
            text.green().to_string()
        } else {
            text
        }
    }
}
