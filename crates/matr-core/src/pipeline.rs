//! Three-phase matrix pipeline: accumulate, resolve, emit.

use crate::config::MatrixConfig;
use crate::emitter::{self, Row};
use crate::error::{MatrixError, Result};
use crate::graph::{ScoreGraph, SortedKeys};
use crate::record::{parse_line, ParsedLine};
use crate::resolver::resolve_self_scores;
use std::fmt;
use std::io::Write;
use tracing::{debug, info};

/// Counts collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixStats {
    /// Input lines seen, including header and blanks
    pub lines_read: usize,
    /// Data records ingested
    pub records: usize,
    /// Empty lines skipped
    pub blank_lines: usize,
    /// Whether a header line was captured
    pub header_captured: bool,
    /// Distinct keys
    pub keys: usize,
    /// Stored scores after self-score resolution
    pub edges: usize,
    /// Self-scores written by the resolver
    pub self_scores_written: usize,
}

impl MatrixStats {
    /// Number of cells in the dense matrix
    pub fn cells(&self) -> usize {
        self.keys * self.keys
    }

    /// Cells that will render as the missing score
    pub fn missing_cells(&self) -> usize {
        self.cells().saturating_sub(self.edges)
    }
}

impl fmt::Display for MatrixStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records, {} keys, {} of {} cells filled ({} self-scores written)",
            self.records,
            self.keys,
            self.edges,
            self.cells(),
            self.self_scores_written
        )
    }
}

/// Accumulates input lines into a score graph.
///
/// Feed lines in input order with [`push_line`](Self::push_line), then call
/// [`finish`](Self::finish) once the input is exhausted.
#[derive(Debug)]
pub struct MatrixBuilder {
    config: MatrixConfig,
    graph: ScoreGraph,
    header: Option<String>,
    stats: MatrixStats,
}

impl MatrixBuilder {
    /// Create a builder for the given configuration
    pub fn new(config: MatrixConfig) -> Self {
        Self {
            config,
            graph: ScoreGraph::new(),
            header: None,
            stats: MatrixStats::default(),
        }
    }

    /// Parse and ingest the next input line.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let index = self.stats.lines_read;
        self.stats.lines_read += 1;

        match parse_line(line, index, self.config.has_header())? {
            ParsedLine::Header(header) => {
                debug!(header = %header, "Captured header line");
                self.header = Some(header);
                self.stats.header_captured = true;
            }
            ParsedLine::Blank => {
                debug!("Skipping blank line {}", index + 1);
                self.stats.blank_lines += 1;
            }
            ParsedLine::Record(record) => {
                self.graph.ingest(record, self.config.mode)?;
                self.stats.records += 1;
            }
        }

        Ok(())
    }

    /// Number of lines pushed so far
    pub fn lines_read(&self) -> usize {
        self.stats.lines_read
    }

    /// Freeze the key set and apply the self-score policy.
    pub fn finish(mut self) -> Matrix {
        let keys = self.graph.sorted_keys();
        self.stats.self_scores_written = resolve_self_scores(&mut self.graph, &keys, &self.config);
        self.stats.keys = keys.len();
        self.stats.edges = self.graph.edge_count();

        info!(
            mode = %self.config.mode,
            output_style = %self.config.output_style,
            "Matrix ready: {}",
            self.stats
        );

        Matrix {
            config: self.config,
            graph: self.graph,
            keys,
            header: self.header,
            stats: self.stats,
        }
    }
}

/// A fully accumulated and resolved matrix, ready to emit.
#[derive(Debug)]
pub struct Matrix {
    config: MatrixConfig,
    graph: ScoreGraph,
    keys: SortedKeys,
    header: Option<String>,
    stats: MatrixStats,
}

impl Matrix {
    /// Build a matrix from in-memory lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use matr_core::{Matrix, MatrixConfig};
    ///
    /// let lines = ["h1\th2\tscore", "a\tb\t10", "b\tc\t20"];
    /// let matrix = Matrix::from_lines(lines, MatrixConfig::default()).unwrap();
    ///
    /// assert_eq!(matrix.score("a", "b"), "10");
    /// assert_eq!(matrix.score("b", "a"), "na");
    /// assert_eq!(matrix.score("c", "c"), "100");
    /// ```
    pub fn from_lines<I, S>(lines: I, config: MatrixConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = MatrixBuilder::new(config);
        for line in lines {
            builder.push_line(line.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Build a matrix from fallible lines, such as `BufRead::lines`.
    ///
    /// The first read error or integrity violation stops the run.
    pub fn try_from_lines<I, S, E>(lines: I, config: MatrixConfig) -> std::result::Result<Self, E>
    where
        I: IntoIterator<Item = std::result::Result<S, E>>,
        S: AsRef<str>,
        E: From<MatrixError>,
    {
        let mut builder = MatrixBuilder::new(config);
        for line in lines {
            builder.push_line(line?.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Output lines in the configured style
    pub fn lines(&self) -> Box<dyn Iterator<Item = String> + '_> {
        emitter::emit(&self.graph, &self.keys, &self.config, self.header.as_deref())
    }

    /// Wide rows, one per key, without the column header
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        emitter::rows(&self.graph, &self.keys, &self.config.missing_score)
    }

    /// Write every output line, newline-terminated.
    ///
    /// Returns the number of lines written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        let mut written = 0;
        for line in self.lines() {
            writeln!(writer, "{}", line)?;
            written += 1;
        }
        Ok(written)
    }

    /// Stored score for (source, target), if any
    pub fn get(&self, source: &str, target: &str) -> Option<&str> {
        self.graph.get(source, target)
    }

    /// Score for (source, target) as it will be emitted
    pub fn score(&self, source: &str, target: &str) -> &str {
        self.graph.get_or(source, target, &self.config.missing_score)
    }

    /// Keys in emission order
    pub fn keys(&self) -> &SortedKeys {
        &self.keys
    }

    /// Header captured from the input, if any
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Run counts
    pub fn stats(&self) -> &MatrixStats {
        &self.stats
    }

    /// Configuration this matrix was built with
    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::{Mode, OutputStyle};
    use proptest::prelude::*;

    fn record_lines() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(("[a-dA-D]{1,2}", "[a-dA-D]{1,2}", "[0-9]{1,3}"), 0..20).prop_map(
            |records| {
                records
                    .into_iter()
                    .map(|(s, t, score)| format!("{}\t{}\t{}", s, t, score))
                    .collect()
            },
        )
    }

    fn headerless(style: OutputStyle) -> MatrixConfig {
        MatrixConfig {
            no_header: true,
            output_style: style,
            ..MatrixConfig::default()
        }
    }

    proptest! {
        /// Property: identical input and configuration give identical output
        #[test]
        fn test_output_is_deterministic(lines in record_lines(), long in any::<bool>()) {
            let style = if long { OutputStyle::Long } else { OutputStyle::Wide };
            let first = Matrix::from_lines(&lines, headerless(style));
            let second = Matrix::from_lines(&lines, headerless(style));

            match (first, second) {
                (Ok(a), Ok(b)) => {
                    let a: Vec<String> = a.lines().collect();
                    let b: Vec<String> = b.lines().collect();
                    prop_assert_eq!(a, b);
                }
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                _ => prop_assert!(false, "runs disagreed on success"),
            }
        }

        /// Property: a run fails exactly when some directed pair has two scores
        #[test]
        fn test_conflict_iff_mismatched_duplicate(lines in record_lines()) {
            let mut seen: std::collections::HashMap<(String, String), String> =
                std::collections::HashMap::new();
            let mut expect_conflict = false;
            for line in &lines {
                let fields: Vec<&str> = line.split('\t').collect();
                let pair = (fields[0].to_string(), fields[1].to_string());
                match seen.get(&pair) {
                    Some(score) if score != fields[2] => expect_conflict = true,
                    _ => {
                        seen.insert(pair, fields[2].to_string());
                    }
                }
            }

            let result = Matrix::from_lines(&lines, headerless(OutputStyle::Wide));
            prop_assert_eq!(result.is_err(), expect_conflict);
            if let Err(e) = result {
                prop_assert!(
                    matches!(e, MatrixError::DuplicateConflict { .. }),
                    "unexpected error kind: {:?}",
                    e
                );
            }
        }

        /// Property: keys are strictly increasing in byte order
        #[test]
        fn test_keys_sorted_and_unique(lines in record_lines()) {
            if let Ok(matrix) = Matrix::from_lines(&lines, headerless(OutputStyle::Wide)) {
                let keys = matrix.keys().as_slice();
                prop_assert!(keys.windows(2).all(|w| w[0].as_bytes() < w[1].as_bytes()));
            }
        }

        /// Property: the dense matrix is square and complete in both styles
        #[test]
        fn test_matrix_is_complete(lines in record_lines()) {
            if let Ok(matrix) = Matrix::from_lines(&lines, headerless(OutputStyle::Wide)) {
                let n = matrix.keys().len();
                let wide: Vec<String> = matrix.lines().collect();
                prop_assert_eq!(wide.len(), n + 1);
                for line in &wide {
                    prop_assert_eq!(line.split('\t').count(), n + 1);
                }

                let long = Matrix::from_lines(&lines, headerless(OutputStyle::Long)).unwrap();
                prop_assert_eq!(long.lines().count(), n * n);
            }
        }

        /// Property: with ensure_self_scores every diagonal cell is self_score
        #[test]
        fn test_diagonal_is_self_score(lines in record_lines(), self_score in "[a-z]{1,4}") {
            let config = MatrixConfig {
                self_score: self_score.clone(),
                ..headerless(OutputStyle::Wide)
            };
            if let Ok(matrix) = Matrix::from_lines(&lines, config) {
                for key in matrix.keys() {
                    prop_assert_eq!(matrix.score(key, key), self_score.as_str());
                }
            }
        }

        /// Property: symmetric runs that succeed read the same both ways
        #[test]
        fn test_symmetric_runs_are_symmetric(lines in record_lines()) {
            let config = MatrixConfig {
                mode: Mode::AvaSymmetric,
                ..headerless(OutputStyle::Wide)
            };
            if let Ok(matrix) = Matrix::from_lines(&lines, config) {
                for s in matrix.keys() {
                    for t in matrix.keys() {
                        prop_assert_eq!(matrix.score(s, t), matrix.score(t, s));
                    }
                }
            }
        }
    }
}
