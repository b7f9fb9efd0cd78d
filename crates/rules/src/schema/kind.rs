//! The three domain-matching field kinds a rule can carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field kinds, in the fixed order they are visited within a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Domain,
    DomainSuffix,
    DomainKeyword,
}

impl FieldKind {
    /// Every field kind, in visiting order.
    pub const ALL: [FieldKind; 3] = [
        FieldKind::Domain,
        FieldKind::DomainSuffix,
        FieldKind::DomainKeyword,
    ];

    /// JSON key used for this field inside a rule object.
    pub fn key(&self) -> &'static str {
        match self {
            FieldKind::Domain => "domain",
            FieldKind::DomainSuffix => "domain_suffix",
            FieldKind::DomainKeyword => "domain_keyword",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "domain" => Ok(FieldKind::Domain),
            "domain_suffix" => Ok(FieldKind::DomainSuffix),
            "domain_keyword" => Ok(FieldKind::DomainKeyword),
            other => Err(format!("unknown field kind: '{}'", other)),
        }
    }
}
