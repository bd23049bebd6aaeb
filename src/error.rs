//! Error types for trace grouping and latency statistics

use thiserror::Error;

/// Errors raised by the analysis core
///
/// Every variant is fatal for the run: a trace that fails to parse or resolve
/// is never silently dropped, since that would skew the group's statistics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Failed to parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },

    #[error("Trace not found: {trace_id}")]
    NotFound { trace_id: String },

    #[error("Latency series for edge {edge} has {found} samples, expected {expected}")]
    IncompatibleSeriesLength {
        edge: String,
        expected: usize,
        found: usize,
    },

    #[error("Group {group:?} contains no traces")]
    EmptyGroup { group: String },

    #[error("Too few data points for a covariance matrix: {samples} per edge")]
    TooFewSamples { samples: usize },

    #[error("Trace {trace_id} has no fingerprint; fingerprint it before grouping")]
    MissingFingerprint { trace_id: String },
}

impl AnalysisError {
    pub(crate) fn parse(what: &'static str, input: impl Into<String>) -> Self {
        Self::Parse {
            what,
            input: input.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
