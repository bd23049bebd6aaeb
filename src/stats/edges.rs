// Per-edge latency statistics within one structural group
//
// Each trace carries descriptors such as
//
//     1.1 -> 2.1 [label="153.0 us"]
//
// from which the edge and its latency are pulled by pattern. Series are
// accumulated per edge across the group's traces.

use super::moments::{mean, sample_variance};
use crate::error::{AnalysisError, Result};
use crate::grouping::{lookup, GroupIndex};
use crate::trace::Trace;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn edge_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([0-9]+(?:\.[0-9]+)+) -> ([0-9]+(?:\.[0-9]+)+)")
            .expect("edge pattern is valid")
    })
}

fn latency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([0-9]+(?:\.[0-9]+)?) us").expect("latency pattern is valid")
    })
}

/// Directed call edge between two node ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub parent: String,
    pub child: String,
}

impl EdgeKey {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

impl FromStr for EdgeKey {
    type Err = AnalysisError;

    /// Find the first `"<id> -> <id>"` in `s`
    fn from_str(s: &str) -> Result<Self> {
        let caps = edge_pattern()
            .captures(s)
            .ok_or_else(|| AnalysisError::parse("edge", s))?;
        Ok(Self::new(&caps[1], &caps[2]))
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Pull the edge and its latency in microseconds out of one descriptor
///
/// ```
/// use tracegroup::stats::{parse_edge_descriptor, EdgeKey};
///
/// let (edge, us) = parse_edge_descriptor(r#"1.1 -> 2.1 [label="153.5 us"]"#).unwrap();
/// assert_eq!(edge, EdgeKey::new("1.1", "2.1"));
/// assert_eq!(us, 153.5);
/// ```
pub fn parse_edge_descriptor(descriptor: &str) -> Result<(EdgeKey, f64)> {
    let edge = descriptor.parse::<EdgeKey>()?;
    let caps = latency_pattern()
        .captures(descriptor)
        .ok_or_else(|| AnalysisError::parse("latency", descriptor))?;
    let latency = caps[1]
        .parse::<f64>()
        .map_err(|_| AnalysisError::parse("latency", descriptor))?;
    Ok((edge, latency))
}

/// Latency series and moments of a single edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStat {
    pub edge: EdgeKey,
    /// One latency per trace containing this edge, in bucket order
    pub series: Vec<f64>,
    pub average: f64,
    /// Sample variance over this edge's own series; 0 below two samples
    pub variance: f64,
}

/// Per-edge statistics for one group, in first-seen edge order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EdgeLatencies {
    edges: Vec<EdgeStat>,
    #[serde(skip)]
    position: HashMap<EdgeKey, usize>,
}

impl EdgeLatencies {
    fn push_sample(&mut self, edge: EdgeKey, latency: f64) {
        match self.position.get(&edge) {
            Some(&i) => self.edges[i].series.push(latency),
            None => {
                self.position.insert(edge.clone(), self.edges.len());
                self.edges.push(EdgeStat {
                    edge,
                    series: vec![latency],
                    average: 0.0,
                    variance: 0.0,
                });
            }
        }
    }

    fn finish(&mut self) {
        for stat in &mut self.edges {
            // series are never empty: an edge is only added with a sample
            stat.average = mean(&stat.series).unwrap_or_default();
            stat.variance = sample_variance(&stat.series, 2);
        }
    }

    pub fn get(&self, edge: &EdgeKey) -> Option<&EdgeStat> {
        self.position.get(edge).map(|&i| &self.edges[i])
    }

    pub fn series(&self, edge: &EdgeKey) -> Option<&[f64]> {
        self.get(edge).map(|s| s.series.as_slice())
    }

    pub fn average(&self, edge: &EdgeKey) -> Option<f64> {
        self.get(edge).map(|s| s.average)
    }

    pub fn variance(&self, edge: &EdgeKey) -> Option<f64> {
        self.get(edge).map(|s| s.variance)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgeStat> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<'a> IntoIterator for &'a EdgeLatencies {
    type Item = &'a EdgeStat;
    type IntoIter = std::slice::Iter<'a, EdgeStat>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl FromIterator<(EdgeKey, f64)> for EdgeLatencies {
    fn from_iter<I: IntoIterator<Item = (EdgeKey, f64)>>(samples: I) -> Self {
        let mut latencies = Self::default();
        for (edge, latency) in samples {
            latencies.push_sample(edge, latency);
        }
        latencies.finish();
        latencies
    }
}

/// Collect per-edge latency statistics for the group filed under `group`
///
/// All traces in the group are assumed to share one structure; this is not
/// checked here, but `covariance_matrix` rejects series of unequal length.
///
/// # Errors
/// * `EmptyGroup` if the index has no traces under `group`
/// * `NotFound` if a trace id does not resolve
/// * `Parse` if a descriptor lacks an edge or a latency
pub fn edge_stats(index: &GroupIndex, group: &str, traces: &[Trace]) -> Result<EdgeLatencies> {
    let bucket = index
        .get(group)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AnalysisError::EmptyGroup {
            group: group.to_string(),
        })?;

    let mut samples = Vec::new();
    for tid in bucket {
        let trace = lookup(tid, traces)?;
        for descriptor in &trace.full_edges {
            samples.push(parse_edge_descriptor(descriptor)?);
        }
    }

    let latencies: EdgeLatencies = samples.into_iter().collect();
    tracing::debug!(
        group,
        traces = bucket.len(),
        edges = latencies.len(),
        "collected edge latencies"
    );
    Ok(latencies)
}
