// Latency statistics over structural groups
//
// Three independent consumers of a GroupIndex:
// - group: mean/variance of total response time per group
// - edges: per-edge latency series, mean and variance within one group
// - covariance: covariance matrix across all edges of one group
//
// Small samples are a policy, not an error: a variance that cannot be
// estimated is reported as 0.

mod covariance;
mod edges;
mod group;
mod moments;

pub use covariance::{covariance_matrix, CovarianceMatrix};
pub use edges::{edge_stats, parse_edge_descriptor, EdgeKey, EdgeLatencies, EdgeStat};
pub use group::{summarize, summarize_all, GroupStats};
pub use moments::{mean, sample_variance};
