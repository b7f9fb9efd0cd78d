//! Rule-set document types with serde (de)serialization.
//!
//! - `RuleSet`: the top-level document, `rules` plus passthrough keys
//! - `Rule`: one rule object with the three typed domain fields
//! - `FieldValue`: a single string or a list of strings
//! - `FieldKind`: `domain`, `domain_suffix`, `domain_keyword`

mod document;
mod kind;
mod rule;
mod value;

pub use document::*;
pub use kind::*;
pub use rule::*;
pub use value::*;

#[cfg(test)]
mod tests;
