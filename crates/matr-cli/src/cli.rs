//! CLI argument definitions and parsing.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// matr - Turn pairwise tab-delimited scores into a dense matrix.
#[derive(Debug, Parser)]
#[command(name = "matr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file of source<TAB>target<TAB>score lines ('-' for stdin)
    #[arg(short, long)]
    pub infile: String,

    /// Write the matrix here instead of stdout
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "MATR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ingestion mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Shorthand for --mode ava_symmetric
    #[arg(long, conflicts_with = "mode")]
    pub ensure_symmetry: bool,

    /// Score for every key paired with itself
    #[arg(short, long)]
    pub self_score: Option<String>,

    /// Overwrite self-scores given in the input
    #[arg(long, overrides_with = "no_ensure_self_scores")]
    pub ensure_self_scores: bool,

    /// Keep self-scores given in the input, only fill missing ones
    #[arg(long, overrides_with = "ensure_self_scores")]
    pub no_ensure_self_scores: bool,

    /// Treat the first line as data rather than a header
    #[arg(long)]
    pub no_header: bool,

    /// Value written for pairs with no score
    #[arg(short = 'n', long, visible_alias = "missing-score")]
    pub na_replace: Option<String>,

    /// Output style
    #[arg(short = 'S', long, value_enum)]
    pub output_style: Option<OutputStyleArg>,

    /// Repeat the input header as the first line of long output
    #[arg(long)]
    pub keep_header: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored error output
    #[arg(long)]
    pub no_color: bool,
}

/// Ingestion mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Directed scores only (default)
    #[value(name = "ava")]
    Ava,
    /// Mirror every score and require reverse pairs to agree
    #[value(name = "ava_symmetric")]
    AvaSymmetric,
}

/// Output style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputStyleArg {
    /// Dense table with a header row (default)
    Wide,
    /// One source/target/score line per pair
    Long,
}

impl From<ModeArg> for matr_core::Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Ava => matr_core::Mode::Ava,
            ModeArg::AvaSymmetric => matr_core::Mode::AvaSymmetric,
        }
    }
}

impl From<OutputStyleArg> for matr_core::OutputStyle {
    fn from(style: OutputStyleArg) -> Self {
        match style {
            OutputStyleArg::Wide => matr_core::OutputStyle::Wide,
            OutputStyleArg::Long => matr_core::OutputStyle::Long,
        }
    }
}

impl Cli {
    /// Self-score policy from the flag pair, if either was given
    pub fn ensure_self_scores(&self) -> Option<bool> {
        if self.no_ensure_self_scores {
            Some(false)
        } else if self.ensure_self_scores {
            Some(true)
        } else {
            None
        }
    }

    /// Whether input comes from stdin
    pub fn reads_stdin(&self) -> bool {
        self.infile == "-"
    }
}
