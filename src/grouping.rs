//! Grouping of traces by structural fingerprint
//!
//! The index is an explicit value owned by one analysis run, so several runs
//! can coexist without sharing buckets.

use crate::error::{AnalysisError, Result};
use crate::trace::Trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from fingerprint key to trace ids, in arrival order per bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupIndex {
    categories: BTreeMap<String, Vec<String>>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a fingerprinted trace under its key
    ///
    /// # Errors
    ///
    /// `MissingFingerprint` if the trace has not been fingerprinted yet.
    pub fn group(&mut self, trace: &Trace) -> Result<()> {
        let key = trace
            .hashval()
            .ok_or_else(|| AnalysisError::MissingFingerprint {
                trace_id: trace.trace_id.clone(),
            })?;

        self.categories
            .entry(key.to_string())
            .or_default()
            .push(trace.trace_id.clone());
        Ok(())
    }

    /// Trace ids filed under `key`
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    /// Fingerprint keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct groups
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of trace ids across all groups
    pub fn trace_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

/// Find a trace by id with a linear scan
///
/// # Errors
///
/// `NotFound` if no trace in `traces` has this id.
pub fn lookup<'a>(trace_id: &str, traces: &'a [Trace]) -> Result<&'a Trace> {
    traces
        .iter()
        .find(|t| t.trace_id == trace_id)
        .ok_or_else(|| AnalysisError::NotFound {
            trace_id: trace_id.to_string(),
        })
}
