//! Global-seen registry: one value namespace shared by all field kinds.
//!
//! A registry lives for exactly one processing run. It is created by the
//! caller, threaded into the deduplicator by `&mut` and into the pruner by `&`.

use std::collections::HashMap;

use crate::schema::FieldKind;

/// Where a value was first accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    /// Index of the rule in document order.
    pub rule: usize,
    pub kind: FieldKind,
}

/// Set of accepted values, each tagged with its [`Origin`].
#[derive(Debug, Default)]
pub struct Registry {
    seen: HashMap<String, Origin>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` unless it is already present.
    ///
    /// Returns `true` when the value was newly accepted. The origin of an
    /// existing entry is never overwritten.
    pub fn register(&mut self, value: &str, origin: Origin) -> bool {
        if self.seen.contains_key(value) {
            return false;
        }
        self.seen.insert(value.to_string(), origin);
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains_key(value)
    }

    /// Origin of an accepted value.
    pub fn origin(&self, value: &str) -> Option<Origin> {
        self.seen.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
