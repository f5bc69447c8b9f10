//! Self-score resolution

use crate::config::MatrixConfig;
use crate::graph::{ScoreGraph, SortedKeys};
use tracing::{debug, warn};

/// Apply the self-score policy to every key.
///
/// With `ensure_self_scores` every (k, k) becomes `self_score`, replacing
/// whatever the input said. Without it, only missing (k, k) entries are
/// filled and explicit ones are left alone.
///
/// Returns the number of self-scores written.
pub fn resolve_self_scores(
    graph: &mut ScoreGraph,
    keys: &SortedKeys,
    config: &MatrixConfig,
) -> usize {
    let mut written = 0;

    for key in keys {
        if config.ensure_self_scores {
            match graph.set(key, key, &config.self_score) {
                Some(previous) if previous != config.self_score => {
                    warn!(
                        key = %key,
                        previous = %previous,
                        self_score = %config.self_score,
                        "Overwriting explicit self-score"
                    );
                    written += 1;
                }
                Some(_) => {}
                None => written += 1,
            }
        } else if graph.insert_if_absent(key, key, &config.self_score) {
            written += 1;
        }
    }

    debug!("Resolved self-scores: {} of {} keys written", written, keys.len());
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::record::Record;

    fn graph_with(records: &[(&str, &str, &str)]) -> ScoreGraph {
        let mut graph = ScoreGraph::new();
        for (s, t, score) in records {
            graph.ingest(Record::new(*s, *t, *score), Mode::Ava).unwrap();
        }
        graph
    }

    #[test]
    fn test_ensure_overwrites_explicit_self_score() {
        let mut graph = graph_with(&[("a", "a", "5"), ("a", "b", "10")]);
        let keys = graph.sorted_keys();
        let config = MatrixConfig::default();

        let written = resolve_self_scores(&mut graph, &keys, &config);

        assert_eq!(graph.get("a", "a"), Some("100"));
        assert_eq!(graph.get("b", "b"), Some("100"));
        assert_eq!(written, 2);
    }

    #[test]
    fn test_fill_only_preserves_explicit_self_score() {
        let mut graph = graph_with(&[("a", "a", "5"), ("a", "b", "10")]);
        let keys = graph.sorted_keys();
        let config = MatrixConfig {
            ensure_self_scores: false,
            ..MatrixConfig::default()
        };

        let written = resolve_self_scores(&mut graph, &keys, &config);

        assert_eq!(graph.get("a", "a"), Some("5"));
        assert_eq!(graph.get("b", "b"), Some("100"));
        assert_eq!(written, 1);
    }

    #[test]
    fn test_matching_explicit_self_score_not_counted() {
        let mut graph = graph_with(&[("a", "a", "100")]);
        let keys = graph.sorted_keys();

        let written = resolve_self_scores(&mut graph, &keys, &MatrixConfig::default());

        assert_eq!(graph.get("a", "a"), Some("100"));
        assert_eq!(written, 0);
    }

    #[test]
    fn test_only_diagonal_touched() {
        let mut graph = graph_with(&[("a", "b", "10"), ("b", "c", "20")]);
        let keys = graph.sorted_keys();
        resolve_self_scores(&mut graph, &keys, &MatrixConfig::default());

        assert_eq!(graph.get("a", "c"), None);
        assert_eq!(graph.get("c", "a"), None);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_empty_graph() {
        let mut graph = ScoreGraph::new();
        let keys = graph.sorted_keys();
        assert_eq!(resolve_self_scores(&mut graph, &keys, &MatrixConfig::default()), 0);
    }
}
