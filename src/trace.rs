//! Completed execution traces

use crate::call_graph::CallGraph;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Total response time as reported by the producer, textual or numeric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseTime {
    Number(f64),
    Text(String),
}

impl ResponseTime {
    /// Convert to a floating-point value
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Self::Number(v) => Ok(*v),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| AnalysisError::parse("response time", s.as_str())),
        }
    }
}

impl From<f64> for ResponseTime {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for ResponseTime {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for ResponseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One recorded execution with its call graph and edge latencies
#[derive(Debug, Clone)]
pub struct Trace {
    pub trace_id: String,
    pub dag: CallGraph,
    pub response: ResponseTime,
    /// Edge descriptors, each holding `"<id> -> <id>"` and `"<number> us"`
    pub full_edges: Vec<String>,
    pub(crate) hashval: Option<String>,
}

impl Trace {
    pub fn new(
        trace_id: impl Into<String>,
        dag: CallGraph,
        response: impl Into<ResponseTime>,
        full_edges: Vec<String>,
    ) -> Self {
        Self {
            trace_id: trace_id.into(),
            dag,
            response: response.into(),
            full_edges,
            hashval: None,
        }
    }

    /// Structural fingerprint, once `fingerprint` has run for this trace
    pub fn hashval(&self) -> Option<&str> {
        self.hashval.as_deref()
    }

    /// Response time parsed to `f64`
    pub fn response_time(&self) -> Result<f64> {
        self.response.as_f64()
    }
}
