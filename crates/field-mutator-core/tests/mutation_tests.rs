//! Integration tests for the mutation engine: exercises the public API only.

use field_mutator_core::{
    format_value, from_value, get_fuzzing_strategies, large_values_strategy, lookup_nested,
    replace_field, replace_field_with_options, truncated_value, FieldAddress, FillerSet,
    MutationError, MutationOptions, MutationResult, MutationStrategy, SchemaConstraints,
    StrategyKind,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ── Strategy selection ──────────────────────────────────────────────────────

#[test]
fn test_from_value_documented_cases() {
    let empty = from_value(&json!(""));
    assert_eq!(empty.kind(), StrategyKind::Replace);
    assert_eq!(empty.payload(), Some(&json!("")));

    let leading = from_value(&json!("\u{0007}abc"));
    assert_eq!(leading.kind(), StrategyKind::Prefix);
    assert_eq!(leading.payload(), Some(&json!("abc")));

    let trailing = from_value(&json!("abc\u{0007}"));
    assert_eq!(trailing.kind(), StrategyKind::Trail);
    assert_eq!(trailing.payload(), Some(&json!("abc")));
}

#[test]
fn test_strategy_processing_documented_cases() {
    let z = |s: MutationStrategy| s.with_data("Z");
    assert_eq!(z(MutationStrategy::replace()).process(&json!("anything")).unwrap(), json!("Z"));
    assert_eq!(z(MutationStrategy::replace()).process(&json!("")).unwrap(), json!("Z"));
    assert_eq!(z(MutationStrategy::trail()).process(&json!("abc")).unwrap(), json!("abcZ"));
    assert_eq!(z(MutationStrategy::prefix()).process(&json!("abc")).unwrap(), json!("Zabc"));
}

// ── Catalog ─────────────────────────────────────────────────────────────────

#[test]
fn test_binary_field_yields_one_skip_regardless_of_fillers() {
    let constraints: SchemaConstraints =
        serde_json::from_value(json!({"type": "string", "format": "binary"})).unwrap();
    for fillers in [FillerSet::ControlChars, FillerSet::Separators] {
        let strategies = get_fuzzing_strategies(&constraints, fillers.values(), true);
        assert_eq!(strategies.len(), 1);
        assert!(strategies[0].is_skip());
    }
}

#[test]
fn test_enum_field_with_maintain_size_still_inserts() {
    let constraints: SchemaConstraints =
        serde_json::from_value(json!({"type": "string", "enum": ["OPEN", "CLOSED"]})).unwrap();
    let fillers = FillerSet::SingleCodePointEmojis.values();
    let strategies = get_fuzzing_strategies(&constraints, fillers, true);

    assert_eq!(strategies.len(), fillers.len());
    for (strategy, filler) in strategies.iter().zip(fillers) {
        assert_eq!(strategy.kind(), StrategyKind::Replace);
        let payload = strategy.payload().and_then(Value::as_str).unwrap();
        // Every base character survives; the filler is added on top.
        assert_eq!(payload, format!("OP{filler}EN"));
    }
}

#[test]
fn test_catalog_strategies_apply_to_documents() {
    let constraints = SchemaConstraints::string().with_length(Some(4), Some(4));
    let strategies = get_fuzzing_strategies(&constraints, &["\u{200B}"], false);
    let result = replace_field(r#"{"user":{"name":"Ada"}}"#, "user.name", &strategies[0]).unwrap();
    assert_eq!(result.document, "{\"user\":{\"name\":\"ab\u{200B}cd\"}}");
}

// ── Mutation ────────────────────────────────────────────────────────────────

#[test]
fn test_replace_field_broadcasts_over_nested_array() {
    let result = replace_field(
        r#"{"a":[{"b":1},{"b":2}]}"#,
        "a.b",
        &MutationStrategy::replace().with_data("X"),
    )
    .unwrap();
    assert_eq!(result.document, r#"{"a":[{"b":"X"},{"b":"X"}]}"#);
    assert_eq!(result.applied_value, json!("X"));
}

#[test]
fn test_replace_field_on_blank_document() {
    for strategy in [
        MutationStrategy::replace().with_data("X"),
        MutationStrategy::skip(),
        MutationStrategy::insert(),
    ] {
        let result = replace_field("", "any.path", &strategy).unwrap();
        assert_eq!(result, MutationResult::empty());
    }
}

#[test]
fn test_replace_field_root_array_with_nested_arrays() {
    let doc = r#"[{"ids":[1,2]},{"ids":[3]}]"#;
    let strategy = MutationStrategy::trail().with_data(" ");
    let result = replace_field(doc, "ids", &strategy).unwrap();
    assert_eq!(result.document, r#"[{"ids":["1 ","1 "]},{"ids":["1 "]}]"#);
    assert_eq!(result.applied_value, json!("1 "));
}

#[test]
fn test_replace_field_reports_invalid_path() {
    let err = replace_field(
        r#"{"a":{"b":1}}"#,
        "a.missing",
        &MutationStrategy::replace().with_data("X"),
    )
    .unwrap_err();
    match &err {
        MutationError::InvalidPath { path, .. } => assert_eq!(path, "$.a.missing"),
        other => panic!("Wrong error: {other:?}"),
    }
    assert_eq!(err.to_json()["code"], json!("invalid_path"));
}

#[test]
fn test_merge_fuzzing_with_leading_whitespace_value() {
    let options = MutationOptions {
        merge_fuzzing: true,
        ..MutationOptions::default()
    };
    let doc = r#"{"name":"  Ada"}"#;
    let result = replace_field_with_options(
        doc,
        "name",
        &MutationStrategy::replace().with_data("Bob"),
        &options,
    )
    .unwrap();
    // The existing value starts with separators: its core is prefixed to the payload.
    assert_eq!(result.applied_value, json!("AdaBob"));
    assert_eq!(result.document, r#"{"name":"AdaBob"}"#);
}

#[test]
fn test_mutation_result_serializes() {
    let result = replace_field(r#"{"a":"v"}"#, "a", &MutationStrategy::noop().with_data(5)).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json, json!({"document": "{\"a\":5}", "applied_value": 5}));
}

// ── Addresses ───────────────────────────────────────────────────────────────

#[test]
fn test_nested_name_lookup_is_read_only() {
    let doc = json!({"pet": {"owner": {"name": "Ada"}}});
    let address = FieldAddress::nested("pet#owner#name");
    assert_eq!(address.property_name(), Some("name"));
    assert_eq!(lookup_nested(&doc, "pet#owner#name"), Some(&json!("Ada")));
}

// ── Formatting ──────────────────────────────────────────────────────────────

#[test]
fn test_truncated_value_forty_plain_chars() {
    let payload: String = ('a'..='z').chain('A'..='N').collect();
    assert_eq!(payload.len(), 40);
    let strategy = MutationStrategy::replace().with_data(payload.as_str());
    assert_eq!(
        truncated_value(&strategy),
        format!("REPLACE with {}...", &payload[..30])
    );
}

#[test]
fn test_large_value_renders_truncated() {
    let strategy = &large_values_strategy(1_000)[0];
    let rendered = truncated_value(strategy);
    assert!(rendered.starts_with("REPLACE with ca"));
    assert!(rendered.ends_with("..."));
    assert_eq!(format_value("\u{00A9}"), "\\u00a9");
}
