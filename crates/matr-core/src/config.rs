//! Matrix configuration
//!
//! A fully resolved [`MatrixConfig`] is what the pipeline consumes. It can be
//! built in code, or deserialized from any serde format (the CLI uses TOML).
//! Every field has a default, so a partial document is valid.

use crate::error::{MatrixError, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// How records relate to their reverse pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Directed only: (a, b) says nothing about (b, a)
    #[default]
    Ava,
    /// Every edge is mirrored and explicit reverse edges must agree
    AvaSymmetric,
}

impl Mode {
    /// Get the mode name as it appears in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Ava => "ava",
            Mode::AvaSymmetric => "ava_symmetric",
        }
    }

    /// Whether edges are mirrored on ingest
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Mode::AvaSymmetric)
    }
}

impl FromStr for Mode {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ava" => Ok(Mode::Ava),
            "ava_symmetric" => Ok(Mode::AvaSymmetric),
            other => Err(MatrixError::Config(format!(
                "mode must be either ava or ava_symmetric, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the emitted matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Dense table: one header row of keys, one row per key
    #[default]
    Wide,
    /// One `source\ttarget\tscore` line per ordered pair
    Long,
}

impl OutputStyle {
    /// Get the style name as it appears in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputStyle::Wide => "wide",
            OutputStyle::Long => "long",
        }
    }
}

impl FromStr for OutputStyle {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wide" => Ok(OutputStyle::Wide),
            "long" => Ok(OutputStyle::Long),
            other => Err(MatrixError::Config(format!(
                "output style must be either wide or long, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved configuration for one matrix run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Directed or symmetric ingestion
    #[serde(default)]
    pub mode: Mode,

    /// Score written for every (k, k) pair
    #[serde(default = "default_self_score", deserialize_with = "score_token")]
    pub self_score: String,

    /// Overwrite self-scores from the input (true) or only fill gaps (false)
    #[serde(default = "default_true")]
    pub ensure_self_scores: bool,

    /// Treat the first line as data rather than a header
    #[serde(default)]
    pub no_header: bool,

    /// Placeholder for pairs with no recorded score
    #[serde(
        default = "default_missing_score",
        alias = "na_replace",
        deserialize_with = "score_token"
    )]
    pub missing_score: String,

    /// Wide or long output
    #[serde(default)]
    pub output_style: OutputStyle,

    /// Reproduce the captured header as the first line of long output
    #[serde(default)]
    pub keep_header: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            self_score: default_self_score(),
            ensure_self_scores: true,
            no_header: false,
            missing_score: default_missing_score(),
            output_style: OutputStyle::default(),
            keep_header: false,
        }
    }
}

impl MatrixConfig {
    /// Whether line 0 of the input is a header
    pub fn has_header(&self) -> bool {
        !self.no_header
    }

    /// Whether a captured header should be written back out
    pub fn emits_header(&self) -> bool {
        self.has_header() && self.keep_header && self.output_style == OutputStyle::Long
    }
}

fn default_self_score() -> String {
    "100".to_string()
}

fn default_missing_score() -> String {
    "na".to_string()
}

fn default_true() -> bool {
    true
}

/// Scores are opaque text, but config files may spell them as bare numbers.
fn score_token<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScoreToken;

    impl de::Visitor<'_> for ScoreToken {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a score as a string, integer or float")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        // Debug keeps the fraction, so 100.0 stays "100.0" rather than "100".
        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
            Ok(format!("{v:?}"))
        }
    }

    deserializer.deserialize_any(ScoreToken)
}
