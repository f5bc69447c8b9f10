//! Score graph accumulation
//!
//! [`ScoreGraph`] is an explicit two-level map (source → target → score)
//! plus the set of every key seen on either side of a record. Entries are
//! only ever added or re-validated during ingestion; the one mutation that
//! replaces a stored value is [`ScoreGraph::set`], used by the self-score
//! pass.

use crate::config::Mode;
use crate::error::{MatrixError, Result};
use crate::record::Record;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Directed graph of opaque scores keyed by (source, target).
#[derive(Debug, Clone, Default)]
pub struct ScoreGraph {
    edges: HashMap<String, HashMap<String, String>>,
    keys: HashSet<String>,
    // (source, target) pairs that exist only as the mirror of a reverse record
    mirrored: HashSet<(String, String)>,
    edge_count: usize,
}

impl ScoreGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one record.
    ///
    /// Both keys join the key set. A stored (source, target) score that
    /// differs from `record.score` is a [`MatrixError::DuplicateConflict`],
    /// unless that stored score is the mirror of an explicit (target, source)
    /// record, in which case it is a [`MatrixError::AsymmetricScores`].
    /// In symmetric mode the reverse edge is checked the same way and then
    /// mirrored.
    ///
    /// Both checks run before anything is stored, so a failed ingest leaves
    /// the edges untouched.
    pub fn ingest(&mut self, record: Record, mode: Mode) -> Result<()> {
        let Record {
            source,
            target,
            score,
        } = record;

        if let Some(old) = self.get(&source, &target) {
            if old != score {
                let old = old.to_string();
                if self.is_mirrored(&source, &target) {
                    return Err(MatrixError::AsymmetricScores {
                        source_key: source,
                        target,
                        existing_score: old,
                        new_score: score,
                    });
                }
                return Err(MatrixError::DuplicateConflict {
                    source_key: source,
                    target,
                    old_score: old,
                    new_score: score,
                });
            }
        }

        if mode.is_symmetric() {
            if let Some(existing) = self.get(&target, &source) {
                if existing != score {
                    return Err(MatrixError::AsymmetricScores {
                        source_key: source,
                        target,
                        existing_score: existing.to_string(),
                        new_score: score,
                    });
                }
            }
        }

        trace!(source = %source, target = %target, score = %score, "ingest");

        self.keys.insert(source.clone());
        self.keys.insert(target.clone());

        if !self.insert_if_absent(&source, &target, &score) && !self.mirrored.is_empty() {
            // Now given explicitly, so a later mismatch is a plain duplicate.
            self.mirrored.remove(&(source.clone(), target.clone()));
        }
        if mode.is_symmetric() && self.insert_if_absent(&target, &source, &score) {
            self.mirrored.insert((target, source));
        }

        Ok(())
    }

    /// Whether (source, target) was stored only by mirroring
    pub fn is_mirrored(&self, source: &str, target: &str) -> bool {
        self.mirrored.contains(&(source.to_string(), target.to_string()))
    }

    /// Store `score` for (source, target) unless a score is already there.
    ///
    /// Returns true when the value was inserted.
    pub fn insert_if_absent(&mut self, source: &str, target: &str, score: &str) -> bool {
        let row = self.row_mut(source);
        if row.contains_key(target) {
            return false;
        }
        row.insert(target.to_string(), score.to_string());
        self.edge_count += 1;
        true
    }

    /// Store `score` for (source, target), returning the replaced value.
    pub fn set(&mut self, source: &str, target: &str, score: &str) -> Option<String> {
        let previous = self
            .row_mut(source)
            .insert(target.to_string(), score.to_string());
        if previous.is_none() {
            self.edge_count += 1;
        }
        previous
    }

    /// Look up the score for (source, target)
    pub fn get(&self, source: &str, target: &str) -> Option<&str> {
        self.edges
            .get(source)
            .and_then(|row| row.get(target))
            .map(String::as_str)
    }

    /// Look up the score for (source, target), falling back to `default`
    pub fn get_or<'a>(&'a self, source: &str, target: &str, default: &'a str) -> &'a str {
        self.get(source, target).unwrap_or(default)
    }

    /// Whether `key` appeared as a source or target
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct keys seen
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of stored (source, target) scores
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Freeze the key set into byte-ordered sequence
    pub fn sorted_keys(&self) -> SortedKeys {
        let mut keys: Vec<String> = self.keys.iter().cloned().collect();
        keys.sort_unstable();
        SortedKeys(keys)
    }

    fn row_mut(&mut self, source: &str) -> &mut HashMap<String, String> {
        self.edges.entry(source.to_string()).or_default()
    }
}

/// Every key of a graph, sorted by byte order.
///
/// This ordering drives rows, columns and long-format enumeration alike.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortedKeys(Vec<String>);

impl SortedKeys {
    /// Keys as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate keys in order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SortedKeys {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
