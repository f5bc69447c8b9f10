//! Configuration resolution for the CLI.
//!
//! Built-in defaults, then an optional TOML file, then command-line flags.
//! Each later layer only overrides what it actually sets.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use matr_core::{MatrixConfig, Mode};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a matrix configuration from a TOML file.
pub fn load_file(path: &Path) -> Result<MatrixConfig> {
    if !path.exists() {
        return Err(CliError::Config(format!(
            "config file '{}' does not exist",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path)?;
    let config: MatrixConfig = toml::from_str(&contents)?;
    debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Resolve the configuration for one run from the parsed arguments.
pub fn resolve(cli: &Cli) -> Result<MatrixConfig> {
    let mut config = match &cli.config {
        Some(path) => load_file(path)?,
        None => MatrixConfig::default(),
    };

    apply_overrides(&mut config, cli);
    debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Apply command-line overrides on top of `config`.
fn apply_overrides(config: &mut MatrixConfig, cli: &Cli) {
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if cli.ensure_symmetry {
        config.mode = Mode::AvaSymmetric;
    }
    if let Some(self_score) = &cli.self_score {
        config.self_score = self_score.clone();
    }
    if let Some(ensure) = cli.ensure_self_scores() {
        config.ensure_self_scores = ensure;
    }
    if cli.no_header {
        config.no_header = true;
    }
    if let Some(missing) = &cli.na_replace {
        config.missing_score = missing.clone();
    }
    if let Some(style) = cli.output_style {
        config.output_style = style.into();
    }
    if cli.keep_header {
        config.keep_header = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use matr_core::OutputStyle;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["matr", "--infile", "in.tsv"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = resolve(&parse(&[])).unwrap();
        assert_eq!(config, MatrixConfig::default());
    }

    #[test]
    fn test_flag_overrides() {
        let cli = parse(&[
            "--mode",
            "ava_symmetric",
            "--self-score",
            "1",
            "--no-ensure-self-scores",
            "--no-header",
            "--na-replace",
            "0",
            "--output-style",
            "long",
            "--keep-header",
        ]);
        let config = resolve(&cli).unwrap();

        assert_eq!(config.mode, Mode::AvaSymmetric);
        assert_eq!(config.self_score, "1");
        assert!(!config.ensure_self_scores);
        assert!(config.no_header);
        assert_eq!(config.missing_score, "0");
        assert_eq!(config.output_style, OutputStyle::Long);
        assert!(config.keep_header);
    }

    #[test]
    fn test_invalid_output_style_in_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "output_style = \"tall\"").unwrap();

        let path = file.path().to_str().unwrap();
        let err = resolve(&parse(&["--config", path])).unwrap_err();
        assert!(matches!(err, CliError::Toml(_)));
    }

    #[test]
    fn test_integer_self_score_in_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "self_score = 100").unwrap();
        writeln!(file, "na_replace = 0").unwrap();

        let path = file.path().to_str().unwrap();
        let config = resolve(&parse(&["--config", path])).unwrap();
        assert_eq!(config.self_score, "100");
        assert_eq!(config.missing_score, "0");
    }

    #[test]
    fn test_ensure_symmetry_flag() {
        let config = resolve(&parse(&["--ensure-symmetry"])).unwrap();
        assert_eq!(config.mode, Mode::AvaSymmetric);
    }

    #[test]
    fn test_file_then_flags() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "self_score = \"1.0\"").unwrap();
        writeln!(file, "missing_score = \"-\"").unwrap();
        writeln!(file, "output_style = \"long\"").unwrap();

        let path = file.path().to_str().unwrap();
        let config = resolve(&parse(&["--config", path, "--output-style", "wide"])).unwrap();

        assert_eq!(config.self_score, "1.0");
        assert_eq!(config.missing_score, "-");
        assert_eq!(config.output_style, OutputStyle::Wide);
    }

    #[test]
    fn test_missing_config_file() {
        let err = resolve(&parse(&["--config", "/nonexistent/matr.toml"])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"sideways\"").unwrap();

        let path = file.path().to_str().unwrap();
        let err = resolve(&parse(&["--config", path])).unwrap_err();
        assert!(matches!(err, CliError::Toml(_)));
    }
}
