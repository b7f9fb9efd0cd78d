//! One deduplication run over a [`RuleSet`]: deduplicate, then prune.

use tracing::info;

use crate::dedup::{deduplicate, DedupStats};
use crate::prune::{prune, PrunePolicy, PrunedRule};
use crate::registry::Registry;
use crate::schema::RuleSet;

/// What a run changed.
#[derive(Debug, Clone)]
pub struct ProcessSummary {
    pub rules_before: usize,
    pub rules_after: usize,
    /// Distinct values accepted into the registry.
    pub unique_values: usize,
    pub dedup: DedupStats,
    pub pruned: Vec<PrunedRule>,
}

impl ProcessSummary {
    /// True when the run removed nothing.
    pub fn is_unchanged(&self) -> bool {
        self.dedup.rules_changed == 0 && self.pruned.is_empty()
    }
}

/// Deduplicate and prune `rule_set` in place.
///
/// The registry is scoped to this call.
pub fn process(rule_set: &mut RuleSet, policy: PrunePolicy) -> ProcessSummary {
    let rules_before = rule_set.rules.len();
    let mut registry = Registry::new();

    let dedup = deduplicate(&mut rule_set.rules, &mut registry);
    let outcome = prune(std::mem::take(&mut rule_set.rules), &registry, policy);
    rule_set.rules = outcome.kept;

    let summary = ProcessSummary {
        rules_before,
        rules_after: rule_set.rules.len(),
        unique_values: registry.len(),
        dedup,
        pruned: outcome.removed,
    };

    info!(
        rules_before = summary.rules_before,
        rules_after = summary.rules_after,
        unique_values = summary.unique_values,
        duplicates_removed = summary.dedup.duplicates_removed,
        rules_pruned = summary.pruned.len(),
        %policy,
        "rule-set processed"
    );

    summary
}
