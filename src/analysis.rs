//! Three-phase analysis pipeline
//!
//! ```text
//! traces ──fingerprint all──▶ hashval per trace
//!        ──group all────────▶ GroupIndex (key → [trace id])
//!        ──summarize all────▶ GroupStats per key
//! ```
//!
//! Each phase finishes for every trace before the next starts. Edge-level
//! statistics and covariance are computed on demand for one group with
//! [`Analyzer::group_detail`].

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::fingerprint::fingerprint;
use crate::grouping::GroupIndex;
use crate::stats::{
    covariance_matrix, edge_stats, summarize_all, CovarianceMatrix, EdgeLatencies, GroupStats,
};
use crate::trace::Trace;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Trace ids per fingerprint key
    pub index: GroupIndex,
    /// Response-time statistics per fingerprint key
    pub groups: BTreeMap<String, GroupStats>,
}

/// Edge-level view of a single group
#[derive(Debug, Clone, Serialize)]
pub struct GroupDetail {
    pub key: String,
    pub edges: EdgeLatencies,
    /// `None` when the group has fewer traces than `min_covariance_samples`
    pub covariance: Option<CovarianceMatrix>,
}

/// Runs the fingerprint → group → summarize pipeline
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Fingerprint, group and summarize `traces`
    ///
    /// Stops at the first error; no partial report is returned.
    pub fn run(&self, traces: &mut [Trace]) -> Result<AnalysisReport> {
        for trace in traces.iter_mut() {
            fingerprint(trace, self.config.scheme);
        }
        tracing::info!(traces = traces.len(), scheme = ?self.config.scheme, "fingerprinted traces");

        let mut index = GroupIndex::new();
        for trace in traces.iter() {
            index.group(trace)?;
        }
        tracing::info!(groups = index.len(), "grouped traces by structure");

        let groups = summarize_all(&index, traces, &self.config)?;
        tracing::info!(groups = groups.len(), "summarized groups");

        Ok(AnalysisReport { index, groups })
    }

    /// Edge statistics and covariance matrix for the group filed under `key`
    pub fn group_detail(
        &self,
        report: &AnalysisReport,
        key: &str,
        traces: &[Trace],
    ) -> Result<GroupDetail> {
        let size = report.index.get(key).map_or(0, <[String]>::len);
        let edges = edge_stats(&report.index, key, traces)?;

        let covariance = if size < self.config.min_covariance_samples {
            tracing::info!(group = key, traces = size, "too few traces for a covariance matrix");
            None
        } else if edges.is_empty() {
            tracing::info!(group = key, traces = size, "group has no edges, skipping covariance");
            None
        } else {
            Some(covariance_matrix(&edges, &self.config)?)
        };

        Ok(GroupDetail {
            key: key.to_string(),
            edges,
            covariance,
        })
    }
}

impl AnalysisReport {
    /// Statistics for one group
    pub fn group(&self, key: &str) -> Result<&GroupStats> {
        self.groups.get(key).ok_or_else(|| AnalysisError::EmptyGroup {
            group: key.to_string(),
        })
    }
}
