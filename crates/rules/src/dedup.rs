//! Field deduplicator: strips values already accepted by an earlier rule.
//!
//! Rules are visited in document order and, within a rule, fields in
//! [`FieldKind::ALL`] order. A scalar field whose value is already registered
//! is dropped. A list field is rewritten to its unregistered values (first
//! occurrence wins, relative order kept) and dropped when nothing remains.
//! Empty strings and empty lists are treated as absent.

use tracing::{debug, info};

use crate::registry::{Origin, Registry};
use crate::schema::{FieldKind, FieldValue, Rule};

/// Counters reported by [`deduplicate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// Values removed because they were already registered.
    pub duplicates_removed: usize,
    /// Fields removed from their rule entirely.
    pub fields_dropped: usize,
    /// Rules with at least one rewritten or dropped field.
    pub rules_changed: usize,
}

/// Result of deduplicating one field.
struct FieldOutcome {
    value: Option<FieldValue>,
    duplicates: usize,
    changed: bool,
}

/// Deduplicate every rule in place against `registry`.
///
/// Never reorders, inserts or removes rules; only narrows or drops fields.
pub fn deduplicate(rules: &mut [Rule], registry: &mut Registry) -> DedupStats {
    let mut stats = DedupStats::default();

    for (index, rule) in rules.iter_mut().enumerate() {
        let mut rule_changed = false;

        for kind in FieldKind::ALL {
            let slot = rule.field_mut(kind);
            let Some(value) = slot.take() else {
                continue;
            };

            let outcome = dedup_field(value, Origin { rule: index, kind }, registry);
            stats.duplicates_removed += outcome.duplicates;
            if outcome.value.is_none() {
                stats.fields_dropped += 1;
            }
            rule_changed |= outcome.changed;
            *slot = outcome.value;
        }

        if rule_changed {
            stats.rules_changed += 1;
            info!(rule = index, result = %rule, "deduplicated rule fields");
        }
    }

    stats
}

fn dedup_field(value: FieldValue, origin: Origin, registry: &mut Registry) -> FieldOutcome {
    match value {
        FieldValue::Single(value) => {
            if value.is_empty() {
                return FieldOutcome {
                    value: None,
                    duplicates: 0,
                    changed: true,
                };
            }
            if registry.register(&value, origin) {
                return FieldOutcome {
                    value: Some(FieldValue::Single(value)),
                    duplicates: 0,
                    changed: false,
                };
            }
            log_duplicate(&value, origin, registry);
            FieldOutcome {
                value: None,
                duplicates: 1,
                changed: true,
            }
        }
        FieldValue::List(values) => {
            let original_len = values.len();
            let mut duplicates = 0;
            let kept: Vec<String> = values
                .into_iter()
                .filter(|value| {
                    if value.is_empty() {
                        return false;
                    }
                    // Registering as we go also removes repeats within the list.
                    if registry.register(value, origin) {
                        return true;
                    }
                    log_duplicate(value, origin, registry);
                    duplicates += 1;
                    false
                })
                .collect();

            let changed = kept.is_empty() || kept.len() != original_len;
            FieldOutcome {
                value: (!kept.is_empty()).then_some(FieldValue::List(kept)),
                duplicates,
                changed,
            }
        }
    }
}

fn log_duplicate(value: &str, origin: Origin, registry: &Registry) {
    if let Some(first) = registry.origin(value) {
        debug!(
            value,
            rule = origin.rule,
            field = %origin.kind,
            first_rule = first.rule,
            first_field = %first.kind,
            "removing globally duplicated value"
        );
    }
}
