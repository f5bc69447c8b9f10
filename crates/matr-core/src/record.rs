//! Record parsing

use crate::error::{MatrixError, Result};

/// One pairwise score from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Row key
    pub source: String,
    /// Column key
    pub target: String,
    /// Opaque score token
    pub score: String,
}

impl Record {
    /// Create a new record
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        score: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            score: score.into(),
        }
    }
}

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// The first line of an input that carries a header, verbatim
    Header(String),
    /// A data line
    Record(Record),
    /// A line with no content
    Blank,
}

/// Parse a raw line given its 0-based index.
///
/// Line 0 is a header when `has_header` is set. Data lines must split on
/// `\t` into exactly three fields; anything else is a
/// [`MatrixError::MalformedRecord`].
pub fn parse_line(line: &str, index: usize, has_header: bool) -> Result<ParsedLine> {
    let line = chomp(line);

    if index == 0 && has_header {
        return Ok(ParsedLine::Header(line.to_string()));
    }

    if line.is_empty() {
        return Ok(ParsedLine::Blank);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    match fields.as_slice() {
        [source, target, score] => Ok(ParsedLine::Record(Record::new(*source, *target, *score))),
        _ => Err(MatrixError::MalformedRecord {
            line_number: index + 1,
            field_count: fields.len(),
        }),
    }
}

/// Strip one trailing `\n` or `\r\n`.
fn chomp(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
