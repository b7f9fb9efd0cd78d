//! Top-level rule-set document: the `rules` array plus passthrough keys.

use serde_json::{Map, Value};

use crate::error::{DedupError, Result};

use super::Rule;

const RULES_KEY: &str = "rules";

/// A parsed rule-set document.
///
/// Keys other than `rules` are kept verbatim and in their original position,
/// so a `{"version": 1, "rules": [...]}` document is written back in the
/// same key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    /// Top-level object; holds a `null` placeholder where `rules` was.
    document: Map<String, Value>,
}

impl RuleSet {
    /// Build a document holding only the given rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            document: Map::new(),
        }
    }

    /// Parse a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| DedupError::malformed(e.to_string()))?;
        Self::from_value(value)
    }

    /// Split a JSON value into typed rules and passthrough keys.
    ///
    /// A document without a `rules` key yields an empty rule list.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut document) = value else {
            return Err(DedupError::malformed(
                "top-level value must be a JSON object",
            ));
        };

        let rules = match document.get_mut(RULES_KEY).map(Value::take) {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::from_value::<Rule>(item)
                        .map_err(|e| DedupError::malformed(format!("{RULES_KEY}[{i}]: {e}")))
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(DedupError::malformed(format!(
                    "'{RULES_KEY}' must be an array, found {}",
                    json_type_name(&other)
                )))
            }
        };

        Ok(Self { rules, document })
    }

    /// Passthrough top-level keys (excluding `rules`).
    pub fn extra(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.document.iter().filter(|(k, _)| k.as_str() != RULES_KEY)
    }

    /// Reassemble the full document.
    pub fn to_value(&self) -> Result<Value> {
        let rules =
            serde_json::to_value(&self.rules).map_err(|e| DedupError::malformed(e.to_string()))?;
        let mut document = self.document.clone();
        // Replaces the placeholder in place, or appends when the input had no `rules`.
        document.insert(RULES_KEY.to_string(), rules);
        Ok(Value::Object(document))
    }

    /// Pretty-printed JSON with 2-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.to_value()?)
            .map_err(|e| DedupError::malformed(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
