//! Error types for matrix construction

use thiserror::Error;

/// Result type alias for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors that abort a matrix run.
///
/// Every variant is fatal. Nothing is emitted once one of these is raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A configuration value outside its recognized set
    #[error("Configuration error: {0}")]
    Config(String),

    /// The same source--target pair was given twice with different scores
    #[error(
        "source--target ({source_key}--{target}) was repeated with a different score. \
         Old score was {old_score}, and the new score was {new_score}."
    )]
    DuplicateConflict {
        /// Source key of the repeated pair
        source_key: String,
        /// Target key of the repeated pair
        target: String,
        /// Score recorded first
        old_score: String,
        /// Score that disagreed with it
        new_score: String,
    },

    /// Symmetric mode saw (s, t) and (t, s) with different scores
    #[error(
        "target--source ({target}--{source_key}) is specified separately from \
         source--target ({source_key}--{target}), but their scores do not match \
         ({existing_score} vs {new_score}). The matrix is not symmetric."
    )]
    AsymmetricScores {
        /// Source key of the record being ingested
        source_key: String,
        /// Target key of the record being ingested
        target: String,
        /// Score already stored for (target, source)
        existing_score: String,
        /// Score of the record being ingested
        new_score: String,
    },

    /// A data line did not split into exactly three tab-separated fields
    #[error("line {line_number}: expected 3 tab-separated fields, found {field_count}")]
    MalformedRecord {
        /// 1-based line number in the input
        line_number: usize,
        /// Number of fields the line actually had
        field_count: usize,
    },
}

impl MatrixError {
    /// Whether this error is an integrity violation in the input data
    /// (as opposed to a bad configuration).
    pub fn is_integrity(&self) -> bool {
        !matches!(self, MatrixError::Config(_))
    }
}
