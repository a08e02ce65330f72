use super::common::{Pick, index, t};
use crate::{Outcome, Request, insert};
use analyzer::parse;
use analyzer::syntax::render;

#[test]
fn test_return_expression_with_synthesized_argument() {
    let fixture = t("class A { int f(int n) { return n; } int f(int n, String s) { return n; } int m() { int count = 1; return $0; } }");
    let (source, cursor) = fixture.expanded("f");
    insta::assert_snapshot!(source, @"class A { int f(int n) { return n; } int f(int n, String s) { return n; } int m() { int count = 1; return f(count); } }");
    assert_eq!(&source[..cursor as usize], "class A { int f(int n) { return n; } int f(int n, String s) { return n; } int m() { int count = 1; return f(count)");
}

#[test]
fn test_statement_between_statements() {
    let fixture = t("class Counter { void resetAll() {} void m() { int count = 1; $0 count++; } }");
    let Outcome::Inserted(applied) = fixture.expand("ra") else {
        panic!("expected an insertion");
    };
    insta::assert_snapshot!(applied.source, @"class Counter { void resetAll() {} void m() { int count = 1; resetAll(); count++; } }");
    assert!(render(&applied.insertion.root).contains("{ int count = 1; resetAll(); count++; }"));
}

#[test]
fn test_missing_then_branch_is_filled() {
    let fixture = t("class Worker { void zapQueue() {} void m(boolean ready) { if (ready) $0 } }");
    let Outcome::Inserted(applied) = fixture.expand("zq") else {
        panic!("expected an insertion");
    };
    insta::assert_snapshot!(applied.source, @"class Worker { void zapQueue() {} void m(boolean ready) { if (ready) zapQueue(); } }");
    assert!(render(&applied.insertion.root).contains("if (ready) zapQueue();"));
}

#[test]
fn test_erroneous_argument_is_filled() {
    let fixture = t("class A { void take(int a, int b) {} void m() { int count = 1; take(1, $0); } }");
    let (source, _) = fixture.expanded("c");
    insta::assert_snapshot!(source, @"class A { void take(int a, int b) {} void m() { int count = 1; take(1, count); } }");
}

#[test]
fn test_invocation_without_erroneous_argument_fails_closed() {
    let fixture = t("class A { void take(int a) {} void m() { int count = 1; take($0); } }");
    assert_eq!(fixture.expect_single("c").display(), "count");
    assert_eq!(fixture.expand("c"), Outcome::NoInsertionPoint);
}

#[test]
fn test_variable_initializer() {
    let fixture = t("class A { void m() { int limit = $0; } }");
    let mut picker = Pick::nth(0);
    let Outcome::Inserted(applied) = fixture.expand_with("i.mv", &mut picker) else {
        panic!("expected an insertion");
    };
    assert_eq!(picker.shown, vec!["Integer.MAX_VALUE", "Integer.MIN_VALUE"]);
    insta::assert_snapshot!(applied.source, @"class A { void m() { int limit = Integer.MAX_VALUE; } }");
}

#[test]
fn test_case_label() {
    let fixture = t("enum Color { RED, DARK_GREEN } class Painter { void m(Color color) { switch (color) { case $0: } } }");
    let (source, _) = fixture.expanded("dg");
    insta::assert_snapshot!(source, @"enum Color { RED, DARK_GREEN } class Painter { void m(Color color) { switch (color) { case DARK_GREEN: } } }");
}

#[test]
fn test_constructor_with_import_after_package() {
    let fixture = t("package app;\nclass Store { void m() { Object table = new $0; } }");
    let (source, cursor) = fixture.expanded("hm");
    assert_eq!(
        source,
        "package app;\n\nimport java.util.HashMap;\nclass Store { void m() { Object table = new HashMap(); } }"
    );
    let end = source.find("HashMap()").map(|i| i + "HashMap()".len());
    assert_eq!(Some(cursor as usize), end);
}

#[test]
fn test_constructor_tree_carries_the_import() {
    let (source, caret) = super::common::caret("package app;\nclass Store { void m() { Object table = new $0; } }");
    let model = index(&source);
    let parsed = parse(&source);
    let request = Request {
        source: &source,
        parsed: &parsed,
        caret,
        abbreviation: "hm",
    };
    let crate::Resolution::Single(fragment) =
        crate::resolve(&request, &model, &Default::default()).unwrap()
    else {
        panic!("expected one candidate");
    };
    let insertion = insert(&request, &fragment).unwrap().unwrap();
    assert_eq!(insertion.edits.len(), 2);
    let rendered = render(&insertion.root);
    assert!(rendered.starts_with("package app; import java.util.HashMap; class Store"), "{rendered}");
    assert!(rendered.contains("Object table = new HashMap();"), "{rendered}");
}

#[test]
fn test_type_with_import_at_top_of_file() {
    let fixture = t("class Loader { void m() { try {} catch ($0 e) {} } }");
    let (source, _) = fixture.expanded("i");
    assert_eq!(
        source,
        "import java.io.IOException;\n\nclass Loader { void m() { try {} catch (IOException e) {} } }"
    );
}

#[test]
fn test_keyword_is_followed_by_a_space() {
    let (source, cursor) = t("$0").expanded("e");
    assert_eq!(source, "enum ");
    assert_eq!(cursor, 5);
}

#[test]
fn test_picker_chooses_among_candidates() {
    let fixture = t("class ScriptBuilder { void appendPart(String part) {} void applyPatch(int patch) {} } class A { void m() { ScriptBuilder sb = new ScriptBuilder(); int aPoint = 0; $0 } }");

    let mut picker = Pick::nth(1);
    let Outcome::Inserted(applied) = fixture.expand_with("sb.ap", &mut picker) else {
        panic!("expected an insertion");
    };
    assert_eq!(picker.shown, vec!["sb.appendPart(String)", "sb.applyPatch(int)"]);
    assert!(applied.source.contains("int aPoint = 0; sb.applyPatch(aPoint); }"), "{}", applied.source);

    assert_eq!(fixture.expand_with("sb.ap", &mut Pick::dismiss()), Outcome::Declined);
}

#[test]
fn test_no_candidates_leaves_the_document_alone() {
    let fixture = t("class A { void m() { $0 } }");
    assert_eq!(fixture.expand("zzq"), Outcome::NoCandidates);
}
