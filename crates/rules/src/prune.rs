//! Redundant-rule pruner.
//!
//! Runs after [`crate::dedup::deduplicate`] and builds a fresh rule list from
//! the rules that do not qualify for removal. Survivors keep their relative
//! order. The registry is only read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::registry::Registry;
use crate::schema::{FieldKind, Rule};

/// Which rules the pruner removes besides empty ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrunePolicy {
    /// Remove only rules left without any non-empty field.
    #[default]
    Emptied,
    /// Also remove every rule whose sole field holds a sole registered value.
    ///
    /// After deduplication every surviving value is registered, so this
    /// removes all single-field, single-value rules, including the first
    /// declarer of a value.
    SingleValue,
}

impl fmt::Display for PrunePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrunePolicy::Emptied => write!(f, "emptied"),
            PrunePolicy::SingleValue => write!(f, "single-value"),
        }
    }
}

impl FromStr for PrunePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "emptied" => Ok(PrunePolicy::Emptied),
            "single-value" => Ok(PrunePolicy::SingleValue),
            other => Err(format!(
                "unknown prune policy: '{}' (expected 'emptied' or 'single-value')",
                other
            )),
        }
    }
}

/// Why a rule was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneReason {
    /// No field carries a value.
    Empty,
    /// Sole field with a sole value that is already registered.
    SingleValue { kind: FieldKind, value: String },
}

/// A removed rule together with its position in the input list.
#[derive(Debug, Clone, PartialEq)]
pub struct PrunedRule {
    pub index: usize,
    pub rule: Rule,
    pub reason: PruneReason,
}

#[derive(Debug, Default)]
pub struct PruneOutcome {
    pub kept: Vec<Rule>,
    pub removed: Vec<PrunedRule>,
}

/// A rule with no non-empty field at all.
pub fn is_empty_rule(rule: &Rule) -> bool {
    rule.is_empty()
}

/// The value of a rule that has exactly one non-empty field, when that field
/// is a domain field holding exactly one value present in `registry`.
///
/// Passthrough keys count as fields, so `{"domain": "a", "outbound": "x"}`
/// never qualifies.
pub fn sole_registered_value<'a>(
    rule: &'a Rule,
    registry: &Registry,
) -> Option<(FieldKind, &'a str)> {
    if rule.non_empty_field_count() != 1 {
        return None;
    }
    let (kind, value) = rule.fields().find(|(_, value)| !value.is_empty())?;
    let value = value.sole_value()?;
    registry.contains(value).then_some((kind, value))
}

fn removal_reason(rule: &Rule, registry: &Registry, policy: PrunePolicy) -> Option<PruneReason> {
    if is_empty_rule(rule) {
        return Some(PruneReason::Empty);
    }
    match policy {
        PrunePolicy::Emptied => None,
        PrunePolicy::SingleValue => {
            sole_registered_value(rule, registry).map(|(kind, value)| PruneReason::SingleValue {
                kind,
                value: value.to_string(),
            })
        }
    }
}

/// Split `rules` into survivors and removed rules.
pub fn prune(rules: Vec<Rule>, registry: &Registry, policy: PrunePolicy) -> PruneOutcome {
    let mut outcome = PruneOutcome::default();

    for (index, rule) in rules.into_iter().enumerate() {
        match removal_reason(&rule, registry, policy) {
            None => outcome.kept.push(rule),
            Some(reason) => {
                match &reason {
                    PruneReason::Empty => {
                        info!(rule = index, "removing rule left without values");
                    }
                    PruneReason::SingleValue { kind, value } => {
                        info!(
                            rule = index,
                            field = %kind,
                            value = %value,
                            content = %rule,
                            "removing single-value rule"
                        );
                    }
                }
                outcome.removed.push(PrunedRule {
                    index,
                    rule,
                    reason,
                });
            }
        }
    }

    outcome
}
