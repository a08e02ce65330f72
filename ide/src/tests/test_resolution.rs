use super::common::{index, t};
use crate::{
    Argument, CollectorFlags, CollectorId, EngineConfig, EngineError, Fragment, OverloadRatio,
    Request, Resolution, resolve,
};
use analyzer::parse;
use analyzer::semantic::{Index, builtin_library};

const OVERLOADS: &str = "class A { int f(int n) { return n; } int f(int n, String s) { return n; } int m() { int count = 1; return $0; } }";

#[test]
fn test_overloads_collapse_to_the_fully_resolved_one() {
    let fragment = t(OVERLOADS).expect_single("f");
    assert_eq!(fragment.display(), "f(int)");
    let Fragment::CallableInvocation(call) = fragment else {
        panic!("expected an invocation");
    };
    assert_eq!(call.args, vec![Argument::Symbol("count".into())]);
}

#[test]
fn test_overloads_without_expected_type() {
    let flags = CollectorFlags::all_enabled()
        .with(CollectorId::Keywords, false)
        .with(CollectorId::Modifiers, false)
        .with(CollectorId::PrimitiveTypes, false)
        .with(CollectorId::DeclaredTypes, false);
    let config = EngineConfig {
        flags,
        ..EngineConfig::default()
    };
    let fixture = t("class A { int f(int n) { return n; } int f(int n, String s) { return n; } void m() { int count = 1; $0 } }")
        .config(config);
    assert_eq!(fixture.expect_single("f").display(), "f(int)");
}

#[test]
fn test_qualified_abbreviation_lists_members_of_the_value() {
    let fixture = t("class ScriptBuilder { void appendPart(String part) {} void applyPatch(int patch) {} } class AppPanel {} class A { void m() { ScriptBuilder sb = new ScriptBuilder(); int aPoint = 0; $0 } }");
    assert_eq!(
        fixture.displays("sb.ap"),
        vec!["sb.appendPart(String)", "sb.applyPatch(int)"]
    );
}

#[test]
fn test_qualified_abbreviation_through_a_type() {
    let fixture = t("class A { void m() { int limit = $0; } }");
    assert_eq!(
        fixture.displays("i.mv"),
        vec!["Integer.MAX_VALUE", "Integer.MIN_VALUE"]
    );
}

#[test]
fn test_null_context_has_no_candidates() {
    let fixture = t("import java.ut$0il.List;\nclass A {}");
    assert_eq!(fixture.resolve("x"), Resolution::None);
}

#[test]
fn test_unknown_abbreviation_has_no_candidates() {
    let fixture = t("class A { void m() { $0 } }");
    assert_eq!(fixture.resolve("zzq"), Resolution::None);
}

#[test]
fn test_literal_filtered_by_expected_type() {
    let fixture = t("class A { void m() { boolean done = $0; } }");
    assert_eq!(fixture.expect_single("t").display(), "true");

    let fixture = t("class A { void m() { String name = $0; } }");
    assert_eq!(fixture.expect_single("n").display(), "null");
}

#[test]
fn test_member_slot_words_are_sorted() {
    let fixture = t("class A { $0 }");
    assert_eq!(fixture.displays("v"), vec!["void", "volatile"]);
}

#[test]
fn test_static_method_sees_only_static_fields() {
    let shown = t("class A { int total; static int tally; static void m() { $0 } }").displays("t");
    assert!(shown.contains(&"tally".to_string()), "{shown:?}");
    assert!(!shown.contains(&"total".to_string()), "{shown:?}");

    let shown = t("class A { int total; void m() { $0 } }").displays("t");
    assert!(shown.contains(&"total".to_string()), "{shown:?}");
}

#[test]
fn test_unit_keyword() {
    assert_eq!(t("$0").expect_single("e").display(), "enum");
}

#[test]
fn test_case_label_offers_enum_constants() {
    let fixture = t("enum Color { RED, DARK_GREEN } class Painter { void m(Color color) { switch (color) { case $0: } } }");
    assert_eq!(fixture.expect_single("dg").display(), "DARK_GREEN");
}

#[test]
fn test_static_import_keeps_only_fitting_overloads() {
    let fixture = t("import static java.lang.Math.max;\nclass Board { void compute(int width) { int top = $0; } }");
    let fragment = fixture.expect_single("m");
    assert_eq!(fragment.display(), "max(int, int)");
    let Fragment::CallableInvocation(call) = fragment else {
        panic!("expected an invocation");
    };
    assert_eq!(
        call.args,
        vec![Argument::Symbol("width".into()), Argument::Symbol("width".into())]
    );
}

#[test]
fn test_catch_clause_offers_exceptions_with_import() {
    let fixture = t("class Loader { void m() { try {} catch ($0 e) {} } }");
    let fragment = fixture.expect_single("i");
    assert_eq!(fragment.display(), "IOException");
    assert_eq!(fragment.import(), Some("java.io.IOException"));
}

const PARTIAL: &str = "class A { void g(int a, String b) {} void g(int a, String b, String c) {} void m() { int count = 1; $0 } }";

#[test]
fn test_partial_overloads_by_exact_ratio() {
    assert_eq!(t(PARTIAL).expect_single("g").display(), "g(int, String)");
}

#[test]
fn test_partial_overloads_by_truncated_ratio_keep_the_widest() {
    let config = EngineConfig {
        ratio: OverloadRatio::Truncated,
        ..EngineConfig::default()
    };
    let fixture = t(PARTIAL).config(config);
    assert_eq!(fixture.expect_single("g").display(), "g(int, String, String)");
}

#[test]
fn test_disabled_collector_contributes_nothing() {
    let config = EngineConfig {
        flags: CollectorFlags::all_enabled().with(CollectorId::Methods, false),
        ..EngineConfig::default()
    };
    assert_eq!(t(OVERLOADS).config(config).resolve("f"), Resolution::None);
}

#[test]
fn test_preconditions() {
    let fixture = t(OVERLOADS);
    let parsed = parse(&fixture.source);
    let model = index(&fixture.source);
    let config = EngineConfig::default();
    let request = Request {
        source: &fixture.source,
        parsed: &parsed,
        caret: fixture.caret,
        abbreviation: "f",
    };

    let unresolved = Index::from_source(&fixture.source, builtin_library());
    assert!(matches!(
        resolve(&request, &unresolved, &config),
        Err(EngineError::ModelNotResolved)
    ));

    let empty = Request {
        abbreviation: "",
        ..request
    };
    assert!(matches!(
        resolve(&empty, &model, &config),
        Err(EngineError::EmptyAbbreviation)
    ));

    let past_end = Request {
        caret: fixture.source.len() as u32 + 1,
        ..request
    };
    assert!(matches!(
        resolve(&past_end, &model, &config),
        Err(EngineError::CaretOutOfBounds { .. })
    ));
}
