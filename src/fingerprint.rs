//! Structural fingerprinting of call graphs
//!
//! A trace's call graph is walked in a fixed depth-first order and the
//! resulting node-id sequence is reduced to a string key. Traces with equal
//! keys are treated as having the same shape.
//!
//! # Branch-digit keys
//!
//! Node ids encode branch position (`"2.1"` is the first sub-call at depth 2).
//! The default key concatenates all ids in traversal order and keeps the
//! leading digit of every `<digit>.1` match:
//!
//! ```text
//! traversal:  1.1  2.1  3.1  2.2
//! joined:     "1.12.13.12.2"
//! matches:     1.1  2.1  3.1
//! key:        "123"
//! ```
//!
//! This is a heuristic. Two different shapes can share a key, e.g. when a
//! multi-digit id such as `"1.12"` runs into its neighbour in the joined
//! string. `FingerprintScheme::NodeSequence` hashes the full sequence instead.

use crate::call_graph::CallGraph;
use crate::config::FingerprintScheme;
use crate::trace::Trace;
use regex::Regex;
use std::collections::{HashSet, VecDeque};
use std::hash::Hasher;
use std::sync::OnceLock;

fn branch_digit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9])\.1").expect("branch digit pattern is valid"))
}

/// Walk the graph from its root and return node ids in first-seen order
///
/// The work list is a deque used as a stack: the front is taken, and the
/// node's children are pushed onto the front in reverse, so the first child
/// is processed next. A node reached again through another parent is not
/// emitted twice, but its children are still pushed.
pub fn traverse(graph: &CallGraph) -> Vec<&str> {
    let mut emitted = HashSet::new();
    let mut order = Vec::new();
    let mut work = VecDeque::from([graph.root()]);

    while let Some(idx) = work.pop_front() {
        let id = graph.id(idx);
        if emitted.insert(id) {
            order.push(id);
        }

        for child in graph.rev_children(idx) {
            work.push_front(child);
        }
    }

    order
}

/// Reduce a call graph to its grouping key
pub fn fingerprint_key(graph: &CallGraph, scheme: FingerprintScheme) -> String {
    let order = traverse(graph);

    match scheme {
        FingerprintScheme::BranchDigits => {
            let joined = order.concat();
            branch_digit_pattern()
                .captures_iter(&joined)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .collect()
        }
        FingerprintScheme::NodeSequence => {
            let mut hasher = fnv::FnvHasher::default();
            for id in &order {
                hasher.write(id.as_bytes());
                hasher.write(b"\0");
            }
            format!("{:016x}", hasher.finish())
        }
    }
}

/// Compute the trace's fingerprint and store it on the trace
///
/// The key is computed once; later calls return the stored value, whatever
/// scheme they pass.
pub fn fingerprint(trace: &mut Trace, scheme: FingerprintScheme) -> &str {
    if trace.hashval.is_none() {
        let key = fingerprint_key(&trace.dag, scheme);
        tracing::debug!(trace_id = %trace.trace_id, key = %key, "fingerprinted trace");
        trace.hashval = Some(key);
    }
    trace.hashval.as_deref().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[&str]) -> CallGraph {
        let mut graph = CallGraph::new(ids[0]);
        for pair in ids.windows(2) {
            graph.add_edge(pair[0], pair[1]);
        }
        graph
    }

    fn diamond() -> CallGraph {
        let mut graph = CallGraph::new("1.1");
        graph.add_edge("1.1", "2.1");
        graph.add_edge("1.1", "2.2");
        graph.add_edge("2.1", "3.1");
        graph.add_edge("2.2", "3.1");
        graph
    }

    #[test]
    fn test_traverse_single_node() {
        assert_eq!(traverse(&CallGraph::new("1.1")), vec!["1.1"]);
    }

    #[test]
    fn test_traverse_depth_first_forward_order() {
        let mut graph = CallGraph::new("1.1");
        graph.add_edge("1.1", "2.1");
        graph.add_edge("1.1", "2.2");
        graph.add_edge("2.1", "3.1");
        graph.add_edge("2.2", "3.2");

        assert_eq!(traverse(&graph), vec!["1.1", "2.1", "3.1", "2.2", "3.2"]);
    }

    #[test]
    fn test_traverse_fan_in_emitted_once() {
        let graph = diamond();
        let order = traverse(&graph);
        assert_eq!(order, vec!["1.1", "2.1", "3.1", "2.2"]);
    }

    #[test]
    fn test_traverse_fan_in_children_still_visited() {
        let mut graph = diamond();
        graph.add_edge("3.1", "4.1");

        let order = traverse(&graph);
        assert_eq!(order, vec!["1.1", "2.1", "3.1", "4.1", "2.2"]);
    }

    #[test]
    fn test_traverse_deterministic() {
        let graph = diamond();
        assert_eq!(traverse(&graph), traverse(&graph));
    }

    #[test]
    fn test_branch_digit_key_single_path() {
        let graph = chain(&["1.1", "2.1"]);
        assert_eq!(fingerprint_key(&graph, FingerprintScheme::BranchDigits), "12");
    }

    #[test]
    fn test_branch_digit_key_diamond() {
        assert_eq!(
            fingerprint_key(&diamond(), FingerprintScheme::BranchDigits),
            "123"
        );
    }

    #[test]
    fn test_branch_digit_key_ignores_non_first_children() {
        let mut graph = CallGraph::new("1.1");
        graph.add_edge("1.1", "2.1");
        graph.add_edge("1.1", "2.2");
        graph.add_edge("1.1", "2.3");

        assert_eq!(fingerprint_key(&graph, FingerprintScheme::BranchDigits), "12");
    }

    #[test]
    fn test_branch_digit_key_collision_is_possible() {
        // "1.12" + "3.1" joins to "1.123.1", which reads as "1.1" then "3.1"
        let a = chain(&["1.12", "3.1"]);
        let b = chain(&["1.1", "3.1"]);
        assert_eq!(
            fingerprint_key(&a, FingerprintScheme::BranchDigits),
            fingerprint_key(&b, FingerprintScheme::BranchDigits)
        );
        assert_ne!(
            fingerprint_key(&a, FingerprintScheme::NodeSequence),
            fingerprint_key(&b, FingerprintScheme::NodeSequence)
        );
    }

    #[test]
    fn test_node_sequence_key_format() {
        let key = fingerprint_key(&diamond(), FingerprintScheme::NodeSequence);
        assert_eq!(key.len(), 16);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, fingerprint_key(&diamond(), FingerprintScheme::NodeSequence));
    }

    #[test]
    fn test_fingerprint_is_write_once() {
        let mut trace = Trace::new("t1", chain(&["1.1", "2.1"]), 1.0, Vec::new());

        let first = fingerprint(&mut trace, FingerprintScheme::BranchDigits).to_string();
        assert_eq!(first, "12");
        assert_eq!(trace.hashval(), Some("12"));

        let second = fingerprint(&mut trace, FingerprintScheme::NodeSequence);
        assert_eq!(second, "12");
    }
}
