//! JSON trace loader
//!
//! Accepts an array of records produced by an upstream DAG builder:
//!
//! ```json
//! [
//!   {
//!     "traceId": "t1",
//!     "response": "153.2",
//!     "root": "1.1",
//!     "edges": [["1.1", "2.1"]],
//!     "fullEdges": ["1.1 -> 2.1 [label=\"120.0 us\"]"]
//!   }
//! ]
//! ```
//!
//! `edges` may be omitted, in which case the call graph is rebuilt from the
//! `fullEdges` descriptors in order. `root` defaults to the first parent.

use crate::call_graph::CallGraph;
use crate::stats::EdgeKey;
use crate::trace::{ResponseTime, Trace};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// One serialized trace
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRecord {
    pub trace_id: String,
    pub response: ResponseTime,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub edges: Vec<(String, String)>,
    #[serde(default)]
    pub full_edges: Vec<String>,
}

impl TraceRecord {
    /// Build the call graph and the `Trace`
    pub fn into_trace(self) -> Result<Trace> {
        let edges = if self.edges.is_empty() {
            self.full_edges
                .iter()
                .map(|d| {
                    d.parse::<EdgeKey>()
                        .map(|e| (e.parent, e.child))
                        .with_context(|| format!("trace {}", self.trace_id))
                })
                .collect::<Result<Vec<_>>>()?
        } else {
            self.edges
        };

        let root = match (self.root, edges.first()) {
            (Some(root), _) => root,
            (None, Some((parent, _))) => parent.clone(),
            (None, None) => bail!("Trace {} has neither a root nor any edges", self.trace_id),
        };

        let mut dag = CallGraph::new(root);
        for (parent, child) in &edges {
            dag.add_edge(parent, child);
        }

        Ok(Trace::new(self.trace_id, dag, self.response, self.full_edges))
    }
}

/// Parse traces from JSON text
///
/// Trace ids must be unique, since grouping files each id exactly once.
pub fn parse_traces(json: &str) -> Result<Vec<Trace>> {
    let records: Vec<TraceRecord> =
        serde_json::from_str(json).context("Failed to parse trace records")?;

    let mut seen = HashSet::new();
    let mut traces = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.trace_id.clone()) {
            bail!("Duplicate trace id: {}", record.trace_id);
        }
        traces.push(record.into_trace()?);
    }

    tracing::debug!(count = traces.len(), "loaded traces");
    Ok(traces)
}

/// Read and parse a JSON trace file
pub fn load_traces(path: &Path) -> Result<Vec<Trace>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_traces(&text)
}
