//! Call graph of a single trace
//!
//! A trace's service calls form a rooted DAG. Node labels are dotted-decimal
//! positions such as `"2.1"`, and a node may be reached from several parents
//! (a fan-in or "sync" point), so the graph is a petgraph `DiGraph` with one
//! node per label and parents refer to children by `NodeIndex`.
//!
//! ```text
//!        1.1
//!       /   \
//!     2.1   2.2
//!       \   /
//!        3.1      <- one node, two parents
//! ```
//!
//! # Example
//!
//! ```
//! use tracegroup::call_graph::CallGraph;
//!
//! let mut graph = CallGraph::new("1.1");
//! graph.add_edge("1.1", "2.1");
//! graph.add_edge("1.1", "2.2");
//! graph.add_edge("2.1", "3.1");
//! graph.add_edge("2.2", "3.1");
//!
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_count(), 4);
//! ```
//!
//! Acyclicity is assumed, never checked.

use petgraph::graph::DiGraph;
use petgraph::Direction;
use std::collections::HashMap;

pub use petgraph::graph::NodeIndex;

/// Rooted call DAG keyed by node label
#[derive(Debug, Clone)]
pub struct CallGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl CallGraph {
    /// Create a graph holding only its root node
    pub fn new(root_id: impl Into<String>) -> Self {
        let mut graph = DiGraph::new();
        let root_id = root_id.into();
        let root = graph.add_node(root_id.clone());
        Self {
            graph,
            index: HashMap::from([(root_id, root)]),
            root,
        }
    }

    /// Add a directed call edge, creating either endpoint if missing
    ///
    /// Children keep their insertion order. Adding an edge that already
    /// exists is a no-op, so a node's children form an ordered set.
    pub fn add_edge(&mut self, parent_id: &str, child_id: &str) -> NodeIndex {
        let parent = self.intern(parent_id);
        let child = self.intern(child_id);

        if self.graph.find_edge(parent, child).is_none() {
            self.graph.add_edge(parent, child, ());
        }
        child
    }

    fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Root node index
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Label of the node at `idx`
    ///
    /// Indices are only handed out by this graph, so a foreign index panics.
    pub fn id(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Children of `idx` in forward order
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self.rev_children(idx).collect();
        children.reverse();
        children
    }

    /// Children of `idx` in reverse order
    ///
    /// petgraph walks outgoing edges newest first, which is already the
    /// reverse of insertion order.
    pub fn rev_children(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    /// Look up a node by its label
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
