//! tracegroup - structural grouping of distributed call-graph traces
//!
//! Traces whose call graphs share a shape are comparable. This library
//! fingerprints each trace's call DAG, groups traces by fingerprint, and
//! computes response-time statistics per group, plus per-edge latency
//! statistics and a cross-edge covariance matrix for a chosen group.

pub mod analysis;
pub mod call_graph;
pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod grouping;
pub mod ingest;
pub mod stats;
pub mod trace;

pub use analysis::{AnalysisReport, Analyzer, GroupDetail};
pub use error::AnalysisError;
