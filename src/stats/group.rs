// Response-time mean and variance per structural group

use super::moments::{mean, sample_variance};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::grouping::{lookup, GroupIndex};
use crate::trace::Trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one group's response times
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Number of traces in the group
    pub count: usize,
    pub average: f64,
    /// Sample variance; 0 below `AnalysisConfig::min_variance_samples`
    pub variance: f64,
}

/// Summarize the response times of the traces in one bucket
///
/// # Arguments
/// * `group` - Fingerprint key of the bucket (used in errors and logs)
/// * `bucket` - Trace ids filed under that key
/// * `traces` - Collection the ids are resolved against
///
/// # Errors
/// * `EmptyGroup` if `bucket` is empty
/// * `NotFound` if an id does not resolve
/// * `Parse` if a response time is not numeric
///
/// # Example
/// ```
/// use tracegroup::call_graph::CallGraph;
/// use tracegroup::config::AnalysisConfig;
/// use tracegroup::stats::summarize;
/// use tracegroup::trace::Trace;
///
/// let traces: Vec<Trace> = [("a", 10.0), ("b", 20.0), ("c", 30.0)]
///     .into_iter()
///     .map(|(id, rt)| Trace::new(id, CallGraph::new("1.1"), rt, Vec::new()))
///     .collect();
/// let bucket = vec!["a".to_string(), "b".to_string(), "c".to_string()];
///
/// let stats = summarize("1", &bucket, &traces, &AnalysisConfig::default()).unwrap();
/// assert_eq!(stats.average, 20.0);
/// assert_eq!(stats.variance, 100.0);
/// ```
pub fn summarize(
    group: &str,
    bucket: &[String],
    traces: &[Trace],
    config: &AnalysisConfig,
) -> Result<GroupStats> {
    let responses = bucket
        .iter()
        .map(|tid| lookup(tid, traces)?.response_time())
        .collect::<Result<Vec<f64>>>()?;

    let average = mean(&responses).ok_or_else(|| AnalysisError::EmptyGroup {
        group: group.to_string(),
    })?;
    let variance = sample_variance(&responses, config.min_variance_samples);

    if responses.len() < config.min_variance_samples {
        tracing::warn!(
            group,
            count = responses.len(),
            "group too small for variance, reporting 0"
        );
    }

    Ok(GroupStats {
        count: responses.len(),
        average,
        variance,
    })
}

/// Summarize every group in the index
pub fn summarize_all(
    index: &GroupIndex,
    traces: &[Trace],
    config: &AnalysisConfig,
) -> Result<BTreeMap<String, GroupStats>> {
    index
        .iter()
        .map(|(key, bucket)| Ok((key.to_string(), summarize(key, bucket, traces, config)?)))
        .collect()
}
