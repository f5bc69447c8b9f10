//! Matrix emission
//!
//! Output is produced lazily, one line at a time, so a wide matrix over N
//! keys costs O(N²) work but only O(N) memory beyond the graph itself.

use crate::config::{MatrixConfig, OutputStyle};
use crate::graph::{ScoreGraph, SortedKeys};

/// One row of the wide matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    /// Row key
    pub key: &'a str,
    /// One cell per key, in key order
    pub cells: Vec<&'a str>,
}

impl Row<'_> {
    /// Render the row as a tab-delimited line
    pub fn to_line(&self) -> String {
        let mut line = String::from(self.key);
        for cell in &self.cells {
            line.push('\t');
            line.push_str(cell);
        }
        line
    }
}

/// Emit the matrix in the configured style.
///
/// `header` is the line captured from the input, written first in long
/// style when [`MatrixConfig::emits_header`] allows it.
pub fn emit<'a>(
    graph: &'a ScoreGraph,
    keys: &'a SortedKeys,
    config: &'a MatrixConfig,
    header: Option<&'a str>,
) -> Box<dyn Iterator<Item = String> + 'a> {
    match config.output_style {
        OutputStyle::Wide => Box::new(wide_lines(graph, keys, &config.missing_score)),
        OutputStyle::Long => {
            let header = header.filter(|_| config.emits_header());
            Box::new(long_lines(graph, keys, &config.missing_score, header))
        }
    }
}

/// Wide rows without the column header line
pub fn rows<'a>(
    graph: &'a ScoreGraph,
    keys: &'a SortedKeys,
    missing_score: &'a str,
) -> impl Iterator<Item = Row<'a>> + 'a {
    keys.iter().map(move |source| Row {
        key: source.as_str(),
        cells: keys
            .iter()
            .map(|target| graph.get_or(source, target, missing_score))
            .collect(),
    })
}

/// Wide lines: a header row of keys behind an empty corner cell, then one
/// line per key.
pub fn wide_lines<'a>(
    graph: &'a ScoreGraph,
    keys: &'a SortedKeys,
    missing_score: &'a str,
) -> impl Iterator<Item = String> + 'a {
    let column_header = Row {
        key: "",
        cells: keys.iter().map(String::as_str).collect(),
    }
    .to_line();

    std::iter::once(column_header).chain(rows(graph, keys, missing_score).map(|row| row.to_line()))
}

/// Long lines: the optional header, then every ordered pair source-major.
pub fn long_lines<'a>(
    graph: &'a ScoreGraph,
    keys: &'a SortedKeys,
    missing_score: &'a str,
    header: Option<&'a str>,
) -> impl Iterator<Item = String> + 'a {
    let pairs = keys.iter().flat_map(move |source| {
        keys.iter().map(move |target| {
            format!(
                "{}\t{}\t{}",
                source,
                target,
                graph.get_or(source, target, missing_score)
            )
        })
    });

    header.map(str::to_string).into_iter().chain(pairs)
}
