//! A single rule object and its field accessors.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{FieldKind, FieldValue};

/// One entry of the `rules` array.
///
/// The three domain fields are typed; every other key is carried verbatim in
/// `extra` so that unrelated settings survive a round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub domain: Option<FieldValue>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub domain_suffix: Option<FieldValue>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub domain_keyword: Option<FieldValue>,

    /// Passthrough keys (e.g. `ip_cidr`, `outbound`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A key that is present must hold a valid value; `null` is rejected.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

impl Rule {
    /// Borrow the value of a field kind.
    pub fn field(&self, kind: FieldKind) -> Option<&FieldValue> {
        match kind {
            FieldKind::Domain => self.domain.as_ref(),
            FieldKind::DomainSuffix => self.domain_suffix.as_ref(),
            FieldKind::DomainKeyword => self.domain_keyword.as_ref(),
        }
    }

    /// Mutable slot of a field kind.
    pub fn field_mut(&mut self, kind: FieldKind) -> &mut Option<FieldValue> {
        match kind {
            FieldKind::Domain => &mut self.domain,
            FieldKind::DomainSuffix => &mut self.domain_suffix,
            FieldKind::DomainKeyword => &mut self.domain_keyword,
        }
    }

    /// Builder-style setter, mostly useful in tests.
    pub fn with(mut self, kind: FieldKind, value: impl Into<FieldValue>) -> Self {
        *self.field_mut(kind) = Some(value.into());
        self
    }

    /// Present domain fields, in visiting order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldKind, &FieldValue)> {
        FieldKind::ALL
            .into_iter()
            .filter_map(move |kind| self.field(kind).map(|value| (kind, value)))
    }

    /// Number of non-empty fields, passthrough keys included.
    pub fn non_empty_field_count(&self) -> usize {
        let domain_fields = self.fields().filter(|(_, v)| !v.is_empty()).count();
        let passthrough = self.extra.values().filter(|v| is_truthy(v)).count();
        domain_fields + passthrough
    }

    /// True when no field of the rule carries a value.
    pub fn is_empty(&self) -> bool {
        self.non_empty_field_count() == 0
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
