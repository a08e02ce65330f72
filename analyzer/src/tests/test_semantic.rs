use crate::semantic::{
    ElementKind, Index, Origin, Phase, PrimitiveKind, SemanticModel, Ty, TypeInfo, builtin_library,
};
use crate::tests::common::{caret, index, trim_indent};

const SHAPES: &str = r#"
    package app;

    import java.util.*;

    class Shape {
        protected int sides;
        int area() { return 0; }
    }

    class Square extends Shape implements Comparable<Square> {
        private final List<String> names = new ArrayList<>();
        static int count;

        Square(int side) {}

        public int compareTo(Square other) { return 0; }

        void run(String label, int... extra) {
            int local = 1;
            var sb = new StringBuilder();
            for (String n : names) {
                $0
            }
        }
    }

    enum Color { RED, GREEN }
"#;

fn shapes() -> (Index, u32) {
    let (source, offset) = caret(&trim_indent(SHAPES));
    (index(&source), offset)
}

fn int() -> Ty {
    Ty::Primitive(PrimitiveKind::Int)
}

fn generic(name: &str, args: Vec<Ty>) -> Ty {
    Ty::Declared {
        name: name.into(),
        args,
    }
}

#[test]
fn test_queries_before_resolve_see_nothing() {
    let (source, offset) = caret(&trim_indent(SHAPES));
    let mut index = Index::from_source(&source, builtin_library());
    assert_eq!(index.phase(), Phase::Parsed);
    assert!(index.elements_in_scope(offset, &|_| true).is_empty());
    assert!(index.find_types(&|_| true).is_empty());

    index.resolve();
    assert_eq!(index.phase(), Phase::Resolved);
    index.resolve();
    assert_eq!(index.phase(), Phase::Resolved);
}

#[test]
fn test_package_and_imports() {
    let (index, _) = shapes();
    assert_eq!(index.package(), "app");
    assert_eq!(index.imports().len(), 1);
    assert_eq!(index.imports()[0].name, "java.util");
    assert!(index.imports()[0].on_demand);
}

#[test]
fn test_scope_is_innermost_first() {
    let (index, offset) = shapes();
    let names: Vec<String> = index
        .elements_in_scope(offset, &|_| true)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(
        names,
        vec!["n", "sb", "local", "label", "extra", "names", "count", "sides"]
    );
}

#[test]
fn test_scope_element_kinds_and_types() {
    let (index, offset) = shapes();
    let elements = index.elements_in_scope(offset, &|_| true);
    let find = |name: &str| elements.iter().find(|e| e.name == name).unwrap();

    assert_eq!(find("n").kind, ElementKind::LocalVariable);
    assert_eq!(find("n").ty, Ty::string());
    assert_eq!(find("sb").ty, Ty::declared("java.lang.StringBuilder"));
    assert_eq!(find("label").kind, ElementKind::Parameter);
    assert_eq!(find("extra").ty, Ty::Array(Box::new(int())));
    assert_eq!(find("names").kind, ElementKind::Field);
    assert_eq!(
        find("names").ty,
        generic("java.util.List", vec![Ty::string()])
    );
}

#[test]
fn test_scope_filter_is_applied() {
    let (index, offset) = shapes();
    let ints = index.elements_in_scope(offset, &|e| e.ty == int());
    let names: Vec<_> = ints.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["local", "count", "sides"]);
}

#[test]
fn test_locals_declared_after_the_caret_are_not_visible() {
    let (source, offset) = caret("class A { void m() { int a = 1; $0 int b = 2; } }");
    let index = index(&source);
    let names: Vec<_> = index
        .elements_in_scope(offset, &|_| true)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["a"]);
}

#[test]
fn test_catch_and_resource_variables() {
    let (source, offset) = caret(
        "class A { void m() { try (Scanner in = null) { $0 } catch (RuntimeException e) {} } }",
    );
    let index = index(&source);
    let elements = index.elements_in_scope(offset, &|_| true);
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].name, "in");
    assert_eq!(elements[0].kind, ElementKind::ResourceVariable);

    let (source, offset) =
        caret("class A { void m() { try {} catch (RuntimeException e) { $0 } } }");
    let index = crate::tests::common::index(&source);
    let elements = index.elements_in_scope(offset, &|_| true);
    assert_eq!(elements[0].kind, ElementKind::ExceptionParameter);
    assert_eq!(elements[0].ty, Ty::declared("java.lang.RuntimeException"));
}

#[test]
fn test_enum_constants_are_in_scope_inside_the_enum() {
    let (source, offset) = caret("enum Color { RED, GREEN; void m() { $0 } }");
    let index = index(&source);
    let elements = index.elements_in_scope(offset, &|_| true);
    let constants: Vec<_> = elements
        .iter()
        .filter(|e| e.kind == ElementKind::EnumConstant)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(constants, vec!["RED", "GREEN"]);
    assert_eq!(elements[0].ty, Ty::declared("Color"));
}

#[test]
fn test_library_enum_constants() {
    let level = TypeInfo::enumeration("lib.Level", Origin::Compile).with_enum_constants(&["LOW", "HIGH"]);
    let mut index = Index::from_source("class A {}", builtin_library().with_type(level));
    index.resolve();

    let level = index.type_named("lib.Level").unwrap();
    let constants: Vec<_> = level.enum_constants().map(|f| f.name.as_str()).collect();
    assert_eq!(constants, vec!["LOW", "HIGH"]);
    assert!(level.enum_constants().all(|f| f.is_static && f.ty == Ty::declared("lib.Level")));
}

#[test]
fn test_members_are_substituted_through_supertypes() {
    let (index, _) = shapes();
    let list = generic("java.util.ArrayList", vec![Ty::string()]);
    let members = index.members_of(&list);

    let get = members.methods.iter().find(|m| m.name == "get").unwrap();
    assert_eq!(get.ret, Ty::string());
    let iterator = members.methods.iter().find(|m| m.name == "iterator").unwrap();
    assert_eq!(
        iterator.ret,
        generic("java.util.Iterator", vec![Ty::string()])
    );
    assert!(members.methods.iter().any(|m| m.name == "hashCode"));
}

#[test]
fn test_source_type_members() {
    let (index, _) = shapes();
    let square = index.type_named("app.Square").unwrap();
    assert_eq!(square.superclass, Some(Ty::declared("app.Shape")));
    assert_eq!(
        square.interfaces,
        vec![generic("java.lang.Comparable", vec![Ty::declared("app.Square")])]
    );
    assert_eq!(square.constructors.len(), 1);
    let run = square.methods.iter().find(|m| m.name == "run").unwrap();
    assert_eq!(run.signature(), "run(String, int[])");

    let shape = index.type_named("app.Shape").unwrap();
    assert_eq!(shape.constructors.len(), 1, "default constructor");

    let color = index.type_named("app.Color").unwrap();
    let constants: Vec<_> = color.enum_constants().map(|f| f.name.as_str()).collect();
    assert_eq!(constants, vec!["RED", "GREEN"]);
}

#[test]
fn test_assignability() {
    let (index, _) = shapes();
    let long = Ty::Primitive(PrimitiveKind::Long);
    let integer = Ty::declared("java.lang.Integer");
    let square = Ty::declared("app.Square");
    let shape = Ty::declared("app.Shape");
    let strings = generic("java.util.ArrayList", vec![Ty::string()]);

    assert!(index.is_assignable(&int(), &long));
    assert!(!index.is_assignable(&long, &int()));
    assert!(index.is_assignable(&int(), &integer));
    assert!(index.is_assignable(&integer, &int()));
    assert!(index.is_assignable(&int(), &Ty::object()));
    assert!(index.is_assignable(&Ty::Null, &Ty::string()));
    assert!(!index.is_assignable(&Ty::Null, &int()));

    assert!(index.is_assignable(&square, &shape));
    assert!(!index.is_assignable(&shape, &square));
    assert!(index.is_assignable(
        &square,
        &generic("java.lang.Comparable", vec![square.clone()])
    ));
    assert!(index.is_assignable(&strings, &generic("java.util.List", vec![Ty::string()])));
    assert!(index.is_assignable(
        &strings,
        &generic("java.util.Collection", vec![Ty::string()])
    ));
    assert!(!index.is_assignable(
        &strings,
        &generic("java.util.List", vec![Ty::declared("java.lang.Integer")])
    ));

    assert!(index.is_assignable(&Ty::Array(Box::new(int())), &Ty::object()));
    assert!(index.is_assignable(&Ty::string(), &Ty::Unknown));
    assert!(!index.is_assignable(&Ty::Unknown, &Ty::string()));
    assert!(!index.is_assignable(&Ty::Void, &Ty::object()));
}

#[test]
fn test_type_of_snippet() {
    let (index, offset) = shapes();
    let ty = |snippet: &str| index.type_of_snippet(snippet, offset);

    assert_eq!(ty("sb.append(n)"), Ty::declared("java.lang.StringBuilder"));
    assert_eq!(ty("names.get(0)"), Ty::string());
    assert_eq!(ty("local + 1L"), Ty::Primitive(PrimitiveKind::Long));
    assert_eq!(ty("n.length() > 0"), Ty::Primitive(PrimitiveKind::Boolean));
    assert_eq!(ty("label + local"), Ty::string());
    assert_eq!(ty("count"), int());
    assert_eq!(ty("sides"), int());
    assert_eq!(ty("extra[0]"), int());
    assert_eq!(ty("new int[2]"), Ty::Array(Box::new(int())));
    assert_eq!(ty("this"), Ty::declared("app.Square"));
    assert_eq!(ty("Color.RED"), Ty::declared("app.Color"));
    assert_eq!(ty("Math.max(1, 2)"), int());
    assert_eq!(ty("null"), Ty::Null);
    assert_eq!(ty("nothing"), Ty::Unknown);
    assert_eq!(ty("f("), Ty::Unknown);
}

#[test]
fn test_resolve_type_name() {
    let (index, offset) = shapes();
    let name = |n: &str| index.resolve_type_name(n, offset).map(|t| t.name.as_str());

    assert_eq!(name("List"), Some("java.util.List"));
    assert_eq!(name("Map.Entry"), Some("java.util.Map.Entry"));
    assert_eq!(name("Shape"), Some("app.Shape"));
    assert_eq!(name("String"), Some("java.lang.String"));
    assert_eq!(name("java.io.File"), Some("java.io.File"));
    assert_eq!(name("File"), None);
}

#[test]
fn test_enclosing_type_and_method() {
    let (index, offset) = shapes();
    assert_eq!(index.enclosing_type(offset).map(|t| t.name.as_str()), Some("app.Square"));
    assert_eq!(index.enclosing_method(offset).map(|m| m.name.as_str()), Some("run"));
    assert!(index.enclosing_type(0).is_none());
    assert!(index.enclosing_method(0).is_none());
}

#[test]
fn test_nested_types_are_indexed() {
    let index = index("package p; class Outer { static class Inner { int v; } Inner make() { return null; } }");
    let inner = index.type_named("p.Outer.Inner").unwrap();
    assert_eq!(inner.display_name(), "Outer.Inner");
    assert_eq!(inner.outer.as_deref(), Some("p.Outer"));
    let outer = index.type_named("p.Outer").unwrap();
    let make = outer.methods.iter().find(|m| m.name == "make").unwrap();
    assert_eq!(make.ret, Ty::declared("p.Outer.Inner"));
}
