use crate::parser::{parse, parse_expression};
use crate::syntax::{Role, SyntaxKind, SyntaxNode, TreePath, render};
use crate::tests::common::trim_indent;

fn expr(src: &str) -> SyntaxNode {
    let out = parse_expression(src);
    assert!(out.diagnostics.is_empty(), "unexpected diagnostics: {:?}", out.diagnostics);
    out.expr
}

fn first_member(src: &str) -> SyntaxNode {
    let out = parse(src);
    assert!(out.diagnostics.is_empty(), "unexpected diagnostics: {:?}", out.diagnostics);
    let ty = out.unit.child(Role::Member).expect("type declaration").clone();
    ty.child(Role::Member).expect("member").clone()
}

#[test]
fn test_precedence_and_associativity() {
    let e = expr("a + b * c - d");
    assert_eq!(e.kind, SyntaxKind::InfixExpression);
    assert_eq!(e.text(), "-");
    let left = e.child(Role::Left).unwrap();
    assert_eq!(left.text(), "+");
    assert_eq!(left.child(Role::Right).unwrap().text(), "*");
}

#[test]
fn test_assignment_is_right_associative() {
    let e = expr("a = b += c");
    assert_eq!(e.kind, SyntaxKind::Assignment);
    assert_eq!(e.text(), "=");
    let right = e.child(Role::Right).unwrap();
    assert_eq!(right.kind, SyntaxKind::Assignment);
    assert_eq!(right.text(), "+=");
}

#[test]
fn test_shift_operators_from_gt_runs() {
    assert_eq!(expr("a >> b").text(), ">>");
    assert_eq!(expr("a >>> b").text(), ">>>");
    let e = expr("a >>= 2");
    assert_eq!(e.kind, SyntaxKind::Assignment);
    assert_eq!(e.text(), ">>=");
}

#[test]
fn test_instanceof_binds_tighter_than_logical_and() {
    let e = expr("a instanceof String && ok");
    assert_eq!(e.text(), "&&");
    let left = e.child(Role::Left).unwrap();
    assert_eq!(left.kind, SyntaxKind::InstanceofExpression);
    assert_eq!(left.child(Role::Left).unwrap().text(), "a");
    assert!(left.child(Role::Type).is_some());
}

#[test]
fn test_names_and_field_access() {
    let e = expr("a.b.c");
    assert_eq!(e.kind, SyntaxKind::QualifiedName);
    assert_eq!(e.qualified_name().as_deref(), Some("a.b.c"));

    let e = expr("f().x");
    assert_eq!(e.kind, SyntaxKind::FieldAccess);
    assert_eq!(e.child(Role::Receiver).unwrap().kind, SyntaxKind::MethodInvocation);
}

#[test]
fn test_method_invocation_children() {
    let e = expr("sb.append(x, 1)");
    assert_eq!(e.kind, SyntaxKind::MethodInvocation);
    assert_eq!(e.name(), Some("append"));
    assert_eq!(e.child(Role::Receiver).unwrap().text(), "sb");
    assert_eq!(e.children_with(Role::Argument).count(), 2);
}

#[test]
fn test_cast_versus_parenthesized() {
    assert_eq!(expr("(String) o").kind, SyntaxKind::CastExpression);
    assert_eq!(expr("(int) -1").kind, SyntaxKind::CastExpression);
    assert_eq!(expr("(a) + b").kind, SyntaxKind::InfixExpression);
    assert_eq!(expr("(a)").kind, SyntaxKind::ParenthesizedExpression);
}

#[test]
fn test_lambda_forms() {
    let e = expr("x -> x + 1");
    assert_eq!(e.kind, SyntaxKind::LambdaExpression);
    assert_eq!(e.children_with(Role::Parameter).count(), 1);

    let e = expr("(int a, int b) -> { return a; }");
    assert_eq!(e.kind, SyntaxKind::LambdaExpression);
    let params: Vec<_> = e.children_with(Role::Parameter).collect();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].kind, SyntaxKind::SingleVariableDeclaration);
    assert_eq!(e.child(Role::Body).unwrap().kind, SyntaxKind::Block);
}

#[test]
fn test_creation_forms() {
    let e = expr("new int[3][]");
    assert_eq!(e.kind, SyntaxKind::ArrayCreation);
    assert_eq!(e.children_with(Role::Dimension).count(), 2);

    let e = expr("new String[] { \"a\" }");
    assert_eq!(e.kind, SyntaxKind::ArrayCreation);
    assert_eq!(e.child(Role::Initializer).unwrap().kind, SyntaxKind::ArrayInitializer);

    let e = expr("new HashMap<String, Integer>()");
    assert_eq!(e.kind, SyntaxKind::ClassInstanceCreation);
    assert_eq!(e.child(Role::Type).unwrap().kind, SyntaxKind::ParameterizedType);
}

#[test]
fn test_type_literal_and_method_reference() {
    assert_eq!(expr("String.class").kind, SyntaxKind::TypeLiteral);
    assert_eq!(expr("int.class").kind, SyntaxKind::TypeLiteral);
    assert_eq!(expr("String::valueOf").kind, SyntaxKind::ExpressionMethodReference);
}

#[test]
fn test_compilation_unit_header() {
    let out = parse("package a.b;\nimport java.util.*;\nimport static java.lang.Math.max;\nclass A {}");
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
    let unit = &out.unit;
    let package = unit.child(Role::Package).unwrap();
    assert_eq!(
        package.child(Role::Name).and_then(SyntaxNode::qualified_name).as_deref(),
        Some("a.b")
    );
    let imports: Vec<_> = unit.children_with(Role::Import).collect();
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].text(), "*");
    assert!(imports[1].has_modifier("static"));
    assert_eq!(unit.child(Role::Member).unwrap().name(), Some("A"));
}

#[test]
fn test_class_members() {
    let src = trim_indent(
        r#"
        class A<T> extends B implements C, D {
            private static final int X = 1, Y;
            A(int x) {}
            <U> U pick(U... items) throws E { return null; }
            enum Color { RED, GREEN; int k; }
        }"#,
    );
    let out = parse(&src);
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
    let ty = out.unit.child(Role::Member).unwrap();
    assert_eq!(ty.text(), "class");
    assert_eq!(ty.children_with(Role::TypeParameter).count(), 1);
    assert!(ty.child(Role::SuperClass).is_some());
    assert_eq!(ty.children_with(Role::SuperInterface).count(), 2);

    let members: Vec<_> = ty.children_with(Role::Member).collect();
    assert_eq!(members.len(), 4);
    assert_eq!(members[0].kind, SyntaxKind::FieldDeclaration);
    assert!(members[0].has_modifier("static"));
    assert_eq!(members[0].children_with(Role::Fragment).count(), 2);

    assert_eq!(members[1].kind, SyntaxKind::MethodDeclaration);
    assert!(members[1].child(Role::ReturnType).is_none());

    let pick = members[2];
    assert_eq!(pick.name(), Some("pick"));
    assert_eq!(pick.child(Role::Parameter).unwrap().text(), "...");
    assert_eq!(pick.children_with(Role::Throws).count(), 1);

    assert_eq!(members[3].kind, SyntaxKind::EnumDeclaration);
    assert_eq!(members[3].children_with(Role::EnumConstant).count(), 2);
    assert_eq!(members[3].children_with(Role::Member).count(), 1);
}

#[test]
fn test_statements() {
    let method = first_member(&trim_indent(
        r#"
        class A {
            void m(int[] xs) {
                int n = 0;
                for (int i = 0; i < 3; i++) n++;
                for (int x : xs) {}
                while (n > 0) n--;
                switch (n) { case 1: break; default: }
                try (R r = open()) {} catch (IOException | RuntimeException e) {} finally {}
                label: do { continue label; } while (false);
                return;
            }
        }"#,
    ));
    let body = method.child(Role::Body).unwrap();
    let kinds: Vec<_> = body.children_with(Role::Statement).map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::VariableDeclarationStatement,
            SyntaxKind::ForStatement,
            SyntaxKind::EnhancedForStatement,
            SyntaxKind::WhileStatement,
            SyntaxKind::SwitchStatement,
            SyntaxKind::TryStatement,
            SyntaxKind::LabeledStatement,
            SyntaxKind::ReturnStatement,
        ]
    );

    let switch = body.children_with(Role::Statement).nth(4).unwrap();
    let cases: Vec<_> = switch
        .children_with(Role::Statement)
        .filter(|s| s.kind == SyntaxKind::SwitchCase)
        .collect();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[1].text(), "default");

    let try_stmt = body.children_with(Role::Statement).nth(5).unwrap();
    assert_eq!(try_stmt.children_with(Role::Resource).count(), 1);
    let catch = try_stmt.child(Role::Catch).unwrap();
    let param = catch.child(Role::Parameter).unwrap();
    assert_eq!(param.child(Role::Type).unwrap().kind, SyntaxKind::UnionType);
    assert!(try_stmt.child(Role::Finally).is_some());
}

#[test]
fn test_render_round_trips_through_parser() {
    let src = "class A { int f(int a) { return a * 2; } }";
    let rendered = render(&parse(src).unit);
    assert_eq!(rendered, src);
    assert_eq!(render(&parse(&rendered).unit), rendered);
}

#[test]
fn test_tree_path_reaches_innermost_node() {
    let src = "class A { void m() { foo(bar); } }";
    let out = parse(src);
    let offset = src.find("bar").unwrap() as u32 + 1;
    let path = TreePath::at(&out.unit, offset);
    assert_eq!(path.leaf().kind, SyntaxKind::SimpleName);
    assert_eq!(path.leaf().text(), "bar");
    let kinds: Vec<_> = path.nodes().iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::CompilationUnit,
            SyntaxKind::TypeDeclaration,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::Block,
            SyntaxKind::ExpressionStatement,
            SyntaxKind::MethodInvocation,
            SyntaxKind::SimpleName,
        ]
    );
}

#[test]
fn test_tree_path_rebuild_leaves_original_untouched() {
    let src = "class A { void m() { foo(bar); } }";
    let out = parse(src);
    let offset = src.find("bar").unwrap() as u32 + 1;
    let path = TreePath::at(&out.unit, offset);
    let replacement = SyntaxNode::detached(SyntaxKind::SimpleName).with_text("baz");
    let rebuilt = path.rebuild(path.leaf_depth(), replacement);
    assert_eq!(render(&rebuilt), "class A { void m() { foo(baz); } }");
    assert_eq!(render(&out.unit), src);
}
