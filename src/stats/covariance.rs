// Cross-edge covariance matrix for one structural group
//
// Rows are edges, columns are traces. Entry (i, j) is the sample covariance
// (divisor n - 1) of edge i's and edge j's latency series, so the diagonal
// holds each edge's own variance.

use super::edges::{EdgeKey, EdgeLatencies};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use ndarray::{Array2, ArrayView1};
use serde::{Serialize, Serializer};

/// Symmetric covariance matrix aligned with `edges`
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    pub edges: Vec<EdgeKey>,
    pub values: Array2<f64>,
}

impl CovarianceMatrix {
    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.edges.len()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get((i, j)).copied()
    }

    /// Check `M[i][j] == M[j][i]` within `tolerance`
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.dimension();
        (0..n).all(|i| (0..i).all(|j| (self.values[[i, j]] - self.values[[j, i]]).abs() <= tolerance))
    }

    /// Matrix as nested rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.rows().into_iter().map(|r| r.to_vec()).collect()
    }
}

impl Serialize for CovarianceMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            edges: &'a [EdgeKey],
            matrix: Vec<Vec<f64>>,
        }

        Repr {
            edges: &self.edges,
            matrix: self.to_rows(),
        }
        .serialize(serializer)
    }
}

/// Build the covariance matrix across all edges of a group
///
/// # Errors
/// * `IncompatibleSeriesLength` if the edges' series differ in length,
///   which means the group was not structurally homogeneous
/// * `TooFewSamples` if there are no edges, or fewer samples per edge than
///   `config.min_covariance_samples`
pub fn covariance_matrix(
    latencies: &EdgeLatencies,
    config: &AnalysisConfig,
) -> Result<CovarianceMatrix> {
    let first = latencies
        .iter()
        .next()
        .ok_or(AnalysisError::TooFewSamples { samples: 0 })?;
    let n = first.series.len();

    for stat in latencies {
        if stat.series.len() != n {
            return Err(AnalysisError::IncompatibleSeriesLength {
                edge: stat.edge.to_string(),
                expected: n,
                found: stat.series.len(),
            });
        }
    }

    if n < config.min_covariance_samples.max(2) {
        return Err(AnalysisError::TooFewSamples { samples: n });
    }

    let k = latencies.len();
    let mut centered = Array2::<f64>::zeros((k, n));
    for (mut row, stat) in centered.rows_mut().into_iter().zip(latencies) {
        row.assign(&ArrayView1::from(stat.series.as_slice()));
        row -= stat.average;
    }

    let values = centered.dot(&centered.t()) / (n - 1) as f64;

    tracing::debug!(edges = k, samples = n, "computed covariance matrix");

    Ok(CovarianceMatrix {
        edges: latencies.iter().map(|s| s.edge.clone()).collect(),
        values,
    })
}
