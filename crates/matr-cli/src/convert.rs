//! The conversion run: resolve config, read input, emit the matrix.

use crate::cli::Cli;
use crate::config;
use crate::error::{CliError, Result};
use crate::output;
use matr_core::{Matrix, MatrixStats};
use std::io::{BufRead, Write};
use tracing::info;

/// Execute a conversion, writing to the sink named by the arguments.
///
/// The sink is only opened after the whole input has been accepted, so a
/// failed run never truncates an existing output file.
pub fn execute_convert(cli: &Cli) -> Result<MatrixStats> {
    let matrix = build_matrix(cli)?;
    let mut sink = output::open_sink(cli.outfile.as_deref())?;
    write_matrix(&matrix, &mut sink)
}

/// Execute a conversion, writing to `writer` regardless of `--outfile`.
pub fn execute_convert_to<W: Write>(cli: &Cli, writer: &mut W) -> Result<MatrixStats> {
    let matrix = build_matrix(cli)?;
    write_matrix(&matrix, writer)
}

fn build_matrix(cli: &Cli) -> Result<Matrix> {
    let config = config::resolve(cli)?;
    let source = output::open_source(&cli.infile)?;

    info!(infile = %cli.infile, "Reading pairwise scores");
    Matrix::try_from_lines(source.lines().map(|line| line.map_err(CliError::from)), config)
}

fn write_matrix<W: Write>(matrix: &Matrix, writer: &mut W) -> Result<MatrixStats> {
    let written = matrix.write_to(writer)?;
    writer.flush()?;
    info!("Wrote {} lines", written);
    Ok(*matrix.stats())
}
