use crate::diagnostics::{DiagnosticCode, DiagnosticKind};
use crate::format_diagnostics;
use crate::parser::{parse, parse_expression};
use crate::syntax::{MISSING_MARKER, Role, SyntaxKind, SyntaxNode, render};

/// Wraps `body` in a method and returns the parsed method body.
fn body_of(body: &str) -> (String, SyntaxNode, usize) {
    let src = format!("class A {{ void m() {{ {body} }} }}");
    let out = parse(&src);
    let ty = out.unit.child(Role::Member).unwrap();
    let method = ty.child(Role::Member).unwrap();
    let block = method.child(Role::Body).unwrap().clone();
    (src, block, out.diagnostics.len())
}

fn missing_nodes(node: &SyntaxNode) -> Vec<&SyntaxNode> {
    node.descendants().filter(|n| n.is_missing()).collect()
}

#[test]
fn test_empty_argument_becomes_missing() {
    let out = parse_expression("f(a, )");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].kind, DiagnosticKind::Error);
    assert_eq!(out.diagnostics[0].code, DiagnosticCode::Parse);
    let args: Vec<_> = out.expr.children_with(Role::Argument).collect();
    assert_eq!(args.len(), 2);
    assert!(args[1].is_missing());
    assert_eq!(args[1].span.start, 5);
    assert!(args[1].span.is_empty());
}

#[test]
fn test_assignment_without_right_side() {
    let (src, block, diags) = body_of("x = ;");
    assert_eq!(diags, 1);
    let missing = missing_nodes(&block);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].role, Role::Right);
    assert_eq!(missing[0].span.start as usize, src.find(';').unwrap());
}

#[test]
fn test_if_without_then_statement() {
    let (_, block, diags) = body_of("if (ok)");
    assert!(diags >= 1);
    let stmt = block.child(Role::Statement).unwrap();
    assert_eq!(stmt.kind, SyntaxKind::IfStatement);
    assert!(stmt.child(Role::Then).is_some_and(SyntaxNode::is_missing));
}

#[test]
fn test_if_span_reaches_its_missing_branch() {
    let (src, block, _) = body_of("if (ok)   ");
    let stmt = block.child(Role::Statement).unwrap();
    let then = stmt.child(Role::Then).unwrap();
    assert_eq!(stmt.span.end, then.span.start);
    assert!(stmt.span.end as usize > src.find("ok)").unwrap() + 3);
}

#[test]
fn test_catch_parameter_without_type() {
    let (_, block, diags) = body_of("try {} catch ( e) {}");
    assert_eq!(diags, 0);
    let catch = block
        .child(Role::Statement)
        .and_then(|t| t.child(Role::Catch))
        .unwrap();
    let param = catch.child(Role::Parameter).unwrap();
    assert!(param.child(Role::Type).is_some_and(SyntaxNode::is_missing));
    assert_eq!(param.name(), Some("e"));
}

#[test]
fn test_empty_case_label() {
    let (_, block, _) = body_of("switch (k) { case : break; }");
    let switch = block.child(Role::Statement).unwrap();
    let case = switch.child(Role::Statement).unwrap();
    assert_eq!(case.kind, SyntaxKind::SwitchCase);
    assert!(case.child(Role::Expression).is_some_and(SyntaxNode::is_missing));
}

#[test]
fn test_missing_renders_with_marker() {
    let (_, block, _) = body_of("int[] xs = new int[];\nfoo(1, );");
    let rendered = render(&block);
    assert!(rendered.contains(&format!("foo(1, {MISSING_MARKER})")), "{rendered}");
}

#[test]
fn test_return_without_expression_is_not_an_error() {
    let (_, block, diags) = body_of("return;");
    assert_eq!(diags, 0);
    assert!(missing_nodes(&block).is_empty());
}

#[test]
fn test_stray_tokens_are_skipped() {
    let out = parse("class A { ) int x; }");
    assert_eq!(out.diagnostics.len(), 1);
    let ty = out.unit.child(Role::Member).unwrap();
    assert_eq!(ty.children_with(Role::Member).count(), 1);
}

#[test]
fn test_format_diagnostics_points_at_line_and_column() {
    let src = "class A {\n  void m() { x = ; }\n}";
    let out = parse(src);
    let formatted = format_diagnostics(src, out.diagnostics);
    insta::assert_snapshot!(formatted, @r"
    error: expected expression, found `;`
      --> <input>:2:18 [27..28]
    ");
}
