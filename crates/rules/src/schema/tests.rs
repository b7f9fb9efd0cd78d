//! Tests for schema types.

use serde_json::json;

use super::*;
use crate::error::DedupError;

const SING_BOX_RULE_SET: &str = r#"
{
  "version": 1,
  "rules": [
    {
      "domain": ["a.com", "b.com"],
      "domain_suffix": ".cn",
      "ip_cidr": ["10.0.0.0/8"]
    },
    {
      "domain_keyword": "ads"
    }
  ],
  "comment": "以上为规则"
}
"#;

#[test]
fn parse_rule_set_with_passthrough_keys() {
    let set = RuleSet::from_json_str(SING_BOX_RULE_SET).unwrap();
    assert_eq!(set.rules.len(), 2);

    let first = &set.rules[0];
    assert_eq!(first.domain, Some(FieldValue::from(vec!["a.com", "b.com"])));
    assert_eq!(first.domain_suffix, Some(FieldValue::from(".cn")));
    assert!(first.domain_keyword.is_none());
    assert_eq!(first.extra.get("ip_cidr"), Some(&json!(["10.0.0.0/8"])));

    let extra: Vec<&str> = set.extra().map(|(k, _)| k.as_str()).collect();
    assert_eq!(extra, vec!["version", "comment"]);
}

#[test]
fn top_level_key_order_survives_round_trip() {
    let set = RuleSet::from_json_str(SING_BOX_RULE_SET).unwrap();
    let value = set.to_value().unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["version", "rules", "comment"]);
}

#[test]
fn missing_rules_key_is_an_empty_list() {
    let set = RuleSet::from_json_str(r#"{"version": 2}"#).unwrap();
    assert!(set.rules.is_empty());

    let value = set.to_value().unwrap();
    assert_eq!(value, json!({"version": 2, "rules": []}));
}

#[test]
fn absent_fields_are_not_synthesized() {
    let set = RuleSet::from_json_str(r#"{"rules":[{"domain_keyword":"x"}]}"#).unwrap();
    let value = set.to_value().unwrap();
    assert_eq!(value, json!({"rules": [{"domain_keyword": "x"}]}));
}

#[test]
fn non_string_field_value_is_malformed() {
    let err = RuleSet::from_json_str(r#"{"rules":[{"domain": 42}]}"#).unwrap_err();
    match err {
        DedupError::MalformedDocument(msg) => {
            assert!(msg.starts_with("rules[0]"), "unexpected message: {msg}");
            assert!(msg.contains("a string or an array of strings"), "unexpected message: {msg}");
        }
        other => panic!("expected MalformedDocument, got {other:?}"),
    }
}

#[test]
fn list_with_non_string_entry_is_malformed() {
    let err = RuleSet::from_json_str(r#"{"rules":[{"domain_suffix": ["a.com", 1]}]}"#)
        .unwrap_err();
    assert!(matches!(err, DedupError::MalformedDocument(_)));
}

#[test]
fn null_field_value_is_malformed() {
    let err = RuleSet::from_json_str(r#"{"rules":[{"domain": null}]}"#).unwrap_err();
    assert!(matches!(err, DedupError::MalformedDocument(_)));
}

#[test]
fn rules_must_be_an_array_of_objects() {
    let err = RuleSet::from_json_str(r#"{"rules": {"domain": "a"}}"#).unwrap_err();
    match err {
        DedupError::MalformedDocument(msg) => assert!(msg.contains("an object")),
        other => panic!("expected MalformedDocument, got {other:?}"),
    }

    let err = RuleSet::from_json_str(r#"{"rules": ["a.com"]}"#).unwrap_err();
    assert!(matches!(err, DedupError::MalformedDocument(_)));
}

#[test]
fn invalid_json_and_non_object_documents_are_malformed() {
    assert!(matches!(
        RuleSet::from_json_str("{\"rules\": [").unwrap_err(),
        DedupError::MalformedDocument(_)
    ));
    assert!(matches!(
        RuleSet::from_json_str("[1, 2]").unwrap_err(),
        DedupError::MalformedDocument(_)
    ));
}

#[test]
fn field_value_accessors_skip_empty_strings() {
    let list = FieldValue::from(vec!["", "a.com", ""]);
    assert_eq!(list.values().collect::<Vec<_>>(), vec!["a.com"]);
    assert_eq!(list.sole_value(), Some("a.com"));
    assert!(!list.is_empty());

    assert!(FieldValue::from("").is_empty());
    assert!(FieldValue::List(Vec::new()).is_empty());
    assert_eq!(FieldValue::from(vec!["a", "b"]).sole_value(), None);
}

#[test]
fn non_empty_field_count_includes_passthrough_keys() {
    let rule: Rule = serde_json::from_value(json!({
        "domain": "a.com",
        "outbound": "direct",
        "invert": false,
        "ip_cidr": []
    }))
    .unwrap();
    assert_eq!(rule.non_empty_field_count(), 2);
    assert!(!rule.is_empty());

    assert!(Rule::default().is_empty());
    assert!(Rule::default().with(FieldKind::Domain, "").is_empty());
}

#[test]
fn field_kind_parses_json_keys() {
    for kind in FieldKind::ALL {
        assert_eq!(kind.key().parse::<FieldKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.key());
    }
    assert!("ip_cidr".parse::<FieldKind>().is_err());
}

#[test]
fn rule_display_is_compact_json() {
    let rule = Rule::default().with(FieldKind::DomainSuffix, vec!["a", "b"]);
    assert_eq!(rule.to_string(), r#"{"domain_suffix":["a","b"]}"#);
}

#[test]
fn pretty_output_keeps_non_ascii_and_two_space_indent() {
    let set = RuleSet::from_json_str(r#"{"rules":[{"domain":"例子.cn"}]}"#).unwrap();
    let json = set.to_json_pretty().unwrap();
    assert!(json.contains("例子.cn"));
    assert!(json.contains("\n  \"rules\""));
    assert!(json.ends_with('\n'));
}
