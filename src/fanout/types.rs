//! Aggregation state shared by all child streams of one fan-out

use crate::pagination::{RequestBag, RequestRecord};
use crate::types::Record;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Initial requests of streams that have not been reconciled yet
#[derive(Debug, Clone, Default)]
pub struct PendingRequests {
    entries: Vec<RequestRecord>,
}

impl PendingRequests {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the initial request of a stream
    pub fn push(&mut self, record: RequestRecord) {
        self.entries.push(record);
    }

    /// Remove the first entry whose URL equals `url`
    ///
    /// Returns whether an entry was removed.
    pub fn remove_first(&mut self, url: &str) -> bool {
        match self.entries.iter().position(|entry| entry.url == url) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every stream has been reconciled
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending entries in insertion order
    pub fn entries(&self) -> &[RequestRecord] {
        &self.entries
    }
}

/// Results and reconciliation state of one fan-out
///
/// Fires at most once: the first time the pending set is observed empty.
#[derive(Debug, Default)]
pub struct Aggregation {
    all_results: Vec<Record>,
    pending: PendingRequests,
    fired: bool,
}

impl Aggregation {
    /// Create an empty aggregation
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the initial request of a stream about to start
    pub fn register(&mut self, record: RequestRecord) {
        self.pending.push(record);
    }

    /// Fold in a finished stream
    ///
    /// Appends its results, then removes one pending entry per logged request
    /// with an equal URL; logged requests without a match are ignored.
    /// Returns `true` exactly once, on the call that leaves nothing pending.
    pub fn on_child_complete(&mut self, results: Vec<Record>, bag: Option<&RequestBag>) -> bool {
        if !results.is_empty() {
            self.all_results.extend(results);
        }

        if let Some(bag) = bag {
            for request in bag.requests() {
                self.pending.remove_first(&request.url);
            }
        }

        self.fire_if_drained()
    }

    /// Mark as fired if nothing is pending and it has not fired yet
    pub fn fire_if_drained(&mut self) -> bool {
        if self.fired || !self.pending.is_empty() {
            return false;
        }
        self.fired = true;
        true
    }

    /// Whether the aggregation has fired
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Pending set
    pub fn pending(&self) -> &PendingRequests {
        &self.pending
    }

    /// Results collected so far, in arrival order
    pub fn results(&self) -> &[Record] {
        &self.all_results
    }

    /// Take the collected results
    pub fn into_results(self) -> Vec<Record> {
        self.all_results
    }
}

/// Distinct parent ids read from `key` (dotted path, string or number)
///
/// Records without a usable id are skipped with a warning; repeated ids are
/// kept once, in first-seen order.
pub fn parent_ids(parents: &[Record], key: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for (index, record) in parents.iter().enumerate() {
        match extract_key(record, key) {
            Some(id) => {
                if seen.insert(id.clone()) {
                    ids.push(id);
                } else {
                    warn!(id = %id, "duplicate parent id skipped");
                }
            }
            None => warn!(index, key, "parent record has no usable id, skipped"),
        }
    }

    ids
}

fn extract_key(record: &Value, key: &str) -> Option<String> {
    let mut current = record;
    for part in key.split('.') {
        current = current.get(part)?;
    }

    match current {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
