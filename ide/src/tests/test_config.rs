use crate::{
    CollectorFlags, CollectorId, EditError, EngineConfig, FlagStore, OverloadRatio, TextEdit,
    apply_edits,
};
use analyzer::Span;

struct OnlyKeywords;

impl FlagStore for OnlyKeywords {
    fn is_enabled(&self, id: CollectorId) -> bool {
        id == CollectorId::Keywords
    }
}

#[test]
fn test_flags_are_read_once_from_the_store() {
    let config = EngineConfig::from_store(&OnlyKeywords);
    assert!(config.flags.is_enabled(CollectorId::Keywords));
    assert!(!config.flags.is_enabled(CollectorId::Methods));
    assert_eq!(config.ratio, OverloadRatio::Exact);
    assert_eq!(config.weights.assignable_penalty, 1000);
}

#[test]
fn test_config_serializes_with_snake_case_keys() {
    let json = serde_json::to_value(EngineConfig::default()).unwrap();
    assert_eq!(json["ratio"], "exact");
    assert_eq!(json["flags"]["member_invocations"], true);
    assert_eq!(json["weights"]["assignable_penalty"], 1000);
}

#[test]
fn test_partial_config_fills_in_defaults() {
    let config: EngineConfig = serde_json::from_str(r#"{ "ratio": "truncated" }"#).unwrap();
    assert_eq!(config.ratio, OverloadRatio::Truncated);
    assert_eq!(config.flags, CollectorFlags::all_enabled());

    let config: EngineConfig =
        serde_json::from_str(r#"{ "flags": { "keywords": true, "methods": false } }"#).unwrap();
    assert!(config.flags.is_enabled(CollectorId::Keywords));
    assert!(!config.flags.is_enabled(CollectorId::Methods));
    // Absent from the map.
    assert!(!config.flags.is_enabled(CollectorId::Literals));
}

#[test]
fn test_apply_edits_rejects_overlapping_ranges() {
    let edits = vec![
        TextEdit::replace(Span::new(0, 4), "x"),
        TextEdit::replace(Span::new(2, 6), "y"),
    ];
    assert_eq!(
        apply_edits("abcdefgh", edits, 0),
        Err(EditError::OverlappingEdits)
    );
}

#[test]
fn test_apply_edits_rejects_two_insertions_at_one_offset() {
    let edits = vec![TextEdit::insert(3, "a"), TextEdit::insert(3, "b")];
    assert_eq!(apply_edits("abcdef", edits, 0), Err(EditError::OverlappingEdits));
}

#[test]
fn test_apply_edits_rejects_invalid_input() {
    assert_eq!(
        apply_edits("abc", vec![TextEdit::insert(9, "x")], 0),
        Err(EditError::InvalidEditRange)
    );
    assert_eq!(
        apply_edits("abc", Vec::new(), 4),
        Err(EditError::InvalidCursor)
    );
    // Inside the two-byte `é`.
    assert_eq!(
        apply_edits("é", vec![TextEdit::insert(1, "x")], 0),
        Err(EditError::InvalidEditRange)
    );
}

#[test]
fn test_apply_edits_applies_and_rebases_cursor() {
    let edits = vec![
        TextEdit::insert(10, "\nimport java.util.List;"),
        TextEdit::insert(0, "package app;\n"),
    ];
    let out = apply_edits("class A {}", edits, 10).unwrap();
    assert_eq!(out.source, "package app;\nclass A {}\nimport java.util.List;");
    assert_eq!(out.cursor, 10 + 13 + 23);
}
