//! Candidate fragments: the closed set of things an abbreviation can expand to.
//!
//! A fragment carries everything needed to render itself and to build its syntax tree, so
//! synthesis never goes back to the semantic model. Equality and ordering are defined over
//! the display text.

use analyzer::Keyword;
use analyzer::semantic::{Element, FieldInfo, MethodInfo, PrimitiveKind};
use analyzer::syntax::{Role, SyntaxKind, SyntaxNode};
use std::cmp::Ordering;

/// A declared type as referenced from the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub qualified: String,
    /// How the type is spelled at the caret: `List`, or `Map.Entry` for a member type.
    pub display: String,
    /// Top-level type to import when the type is only reachable through a classpath-wide
    /// search.
    pub import: Option<String>,
}

impl TypeRef {
    pub fn simple_name(&self) -> &str {
        self.display.rsplit('.').next().unwrap_or(&self.display)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// A value in scope, by name.
    Value(String),
    /// A type, for static member access.
    Type(TypeRef),
}

impl Receiver {
    fn display(&self) -> &str {
        match self {
            Receiver::Value(name) => name,
            Receiver::Type(ty) => &ty.display,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    Method { receiver: Option<Receiver> },
    Constructor { ty: TypeRef },
}

/// A synthesized call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// An in-scope symbol.
    Symbol(String),
    /// A default literal for the parameter type.
    Default(&'static str),
}

impl Argument {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Argument::Symbol(_))
    }

    fn node(&self) -> SyntaxNode {
        match self {
            Argument::Symbol(name) => simple_name(name),
            Argument::Default(text) => literal(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub callee: Callee,
    pub method: MethodInfo,
    /// Filled in by ranking; empty while the candidate is still being collected.
    pub args: Vec<Argument>,
}

impl Invocation {
    pub fn arity(&self) -> usize {
        self.method.arity()
    }

    pub fn resolved_args(&self) -> usize {
        self.args.iter().filter(|a| a.is_resolved()).count()
    }

    /// Overloads of the same callable share a group key.
    pub(crate) fn group_key(&self) -> (Option<&str>, &str, bool) {
        match &self.callee {
            Callee::Method { receiver } => (
                receiver.as_ref().map(Receiver::display),
                self.method.name.as_str(),
                false,
            ),
            Callee::Constructor { ty } => (Some(ty.qualified.as_str()), "new", true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccess {
    /// `None` for an unqualified constant (a case label or a static import).
    pub owner: Option<Receiver>,
    pub field: FieldInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    True,
    False,
    Null,
}

impl Literal {
    pub fn text(self) -> &'static str {
        match self {
            Literal::True => "true",
            Literal::False => "false",
            Literal::Null => "null",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Fragment {
    Keyword(Keyword),
    Modifier(Keyword),
    PrimitiveType(PrimitiveKind),
    DeclaredType(TypeRef),
    ConstantOrFieldAccess(FieldAccess),
    CallableInvocation(Invocation),
    LocalElement(Element),
    Literal(Literal),
}

/// A synthesized fragment, ready to be placed by the insertion engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Built {
    Expr(SyntaxNode),
    Type(SyntaxNode),
    /// A keyword or modifier: inserted as text, the user keeps typing after it.
    Word(&'static str),
}

impl Fragment {
    /// The identifier the abbreviation is derived from.
    pub fn name(&self) -> &str {
        match self {
            Fragment::Keyword(kw) | Fragment::Modifier(kw) => kw.as_str(),
            Fragment::PrimitiveType(p) => p.keyword(),
            Fragment::DeclaredType(ty) => ty.simple_name(),
            Fragment::ConstantOrFieldAccess(access) => &access.field.name,
            Fragment::CallableInvocation(call) => match &call.callee {
                Callee::Method { .. } => &call.method.name,
                Callee::Constructor { ty } => ty.simple_name(),
            },
            Fragment::LocalElement(element) => &element.name,
            Fragment::Literal(lit) => lit.text(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Fragment::Keyword(kw) | Fragment::Modifier(kw) => kw.as_str().to_string(),
            Fragment::PrimitiveType(p) => p.keyword().to_string(),
            Fragment::DeclaredType(ty) => ty.display.clone(),
            Fragment::ConstantOrFieldAccess(access) => match &access.owner {
                Some(owner) => format!("{}.{}", owner.display(), access.field.name),
                None => access.field.name.clone(),
            },
            Fragment::CallableInvocation(call) => match &call.callee {
                Callee::Method {
                    receiver: Some(receiver),
                } => format!("{}.{}", receiver.display(), call.method.signature()),
                Callee::Method { receiver: None } => call.method.signature(),
                Callee::Constructor { ty } => {
                    let params: Vec<String> =
                        call.method.params.iter().map(|p| p.ty.to_string()).collect();
                    format!("new {}({})", ty.display, params.join(", "))
                }
            },
            Fragment::LocalElement(element) => element.name.clone(),
            Fragment::Literal(lit) => lit.text().to_string(),
        }
    }

    /// Top-level type the insertion must import, if any.
    pub fn import(&self) -> Option<&str> {
        let ty = match self {
            Fragment::DeclaredType(ty) => ty,
            Fragment::ConstantOrFieldAccess(FieldAccess {
                owner: Some(Receiver::Type(ty)),
                ..
            }) => ty,
            Fragment::CallableInvocation(Invocation { callee, .. }) => match callee {
                Callee::Method {
                    receiver: Some(Receiver::Type(ty)),
                } => ty,
                Callee::Constructor { ty } => ty,
                Callee::Method { .. } => return None,
            },
            _ => return None,
        };
        ty.import.as_deref()
    }

    pub(crate) fn synthesize(&self) -> Built {
        match self {
            Fragment::Keyword(Keyword::This) => {
                Built::Expr(SyntaxNode::detached(SyntaxKind::ThisExpression))
            }
            Fragment::Keyword(kw) | Fragment::Modifier(kw) => Built::Word(kw.as_str()),
            Fragment::PrimitiveType(p) => Built::Type(
                SyntaxNode::detached(SyntaxKind::PrimitiveType).with_text(p.keyword()),
            ),
            Fragment::DeclaredType(ty) => Built::Type(simple_type(&ty.display)),
            Fragment::ConstantOrFieldAccess(access) => Built::Expr(match &access.owner {
                Some(owner) => name_node(&format!("{}.{}", owner.display(), access.field.name)),
                None => simple_name(&access.field.name),
            }),
            Fragment::CallableInvocation(call) => Built::Expr(invocation_node(call)),
            Fragment::LocalElement(element) => Built::Expr(simple_name(&element.name)),
            Fragment::Literal(lit) => Built::Expr(literal(lit.text())),
        }
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.display() == other.display()
    }
}

impl Eq for Fragment {}

impl PartialOrd for Fragment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fragment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.display().cmp(&other.display())
    }
}

fn invocation_node(call: &Invocation) -> SyntaxNode {
    let args = call.args.iter().map(|a| a.node().in_role(Role::Argument));
    match &call.callee {
        Callee::Method { receiver } => {
            let mut children = Vec::new();
            if let Some(receiver) = receiver {
                children.push(name_node(receiver.display()).in_role(Role::Receiver));
            }
            children.push(simple_name(&call.method.name).in_role(Role::Name));
            children.extend(args);
            SyntaxNode::detached(SyntaxKind::MethodInvocation).with_children(children)
        }
        Callee::Constructor { ty } => {
            let mut children = vec![simple_type(&ty.display).in_role(Role::Type)];
            children.extend(args);
            SyntaxNode::detached(SyntaxKind::ClassInstanceCreation).with_children(children)
        }
    }
}

pub(crate) fn simple_name(name: &str) -> SyntaxNode {
    SyntaxNode::detached(SyntaxKind::SimpleName).with_text(name)
}

/// `a.b.c` as nested `QualifiedName`s.
pub(crate) fn name_node(dotted: &str) -> SyntaxNode {
    match dotted.rsplit_once('.') {
        Some((qualifier, name)) => SyntaxNode::detached(SyntaxKind::QualifiedName).with_children(vec![
            name_node(qualifier).in_role(Role::Qualifier),
            simple_name(name).in_role(Role::Name),
        ]),
        None => simple_name(dotted),
    }
}

fn simple_type(dotted: &str) -> SyntaxNode {
    SyntaxNode::detached(SyntaxKind::SimpleType)
        .with_children(vec![name_node(dotted).in_role(Role::Name)])
}

fn literal(text: &str) -> SyntaxNode {
    let kind = match text {
        "true" | "false" => SyntaxKind::BooleanLiteral,
        "null" => SyntaxKind::NullLiteral,
        _ => SyntaxKind::NumberLiteral,
    };
    SyntaxNode::detached(kind).with_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abbreviation::{abbreviate, matches};
    use analyzer::semantic::{ElementKind, ParamInfo, Ty};
    use analyzer::syntax::render;

    fn method(name: &str, params: &[(&str, Ty)]) -> MethodInfo {
        MethodInfo {
            name: name.into(),
            params: params
                .iter()
                .map(|(n, ty)| ParamInfo {
                    name: (*n).into(),
                    ty: ty.clone(),
                })
                .collect(),
            ret: Ty::Void,
            is_static: false,
            declaring: "app.Script".into(),
        }
    }

    fn type_ref(qualified: &str, display: &str) -> TypeRef {
        TypeRef {
            qualified: qualified.into(),
            display: display.into(),
            import: None,
        }
    }

    fn samples() -> Vec<Fragment> {
        vec![
            Fragment::Keyword(Keyword::While),
            Fragment::Modifier(Keyword::Final),
            Fragment::PrimitiveType(PrimitiveKind::Int),
            Fragment::DeclaredType(type_ref("java.util.Map.Entry", "Map.Entry")),
            Fragment::ConstantOrFieldAccess(FieldAccess {
                owner: Some(Receiver::Type(type_ref("java.lang.Integer", "Integer"))),
                field: FieldInfo {
                    name: "MAX_VALUE".into(),
                    ty: Ty::Primitive(PrimitiveKind::Int),
                    is_static: true,
                    is_final: true,
                    is_enum_constant: false,
                    declaring: "java.lang.Integer".into(),
                },
            }),
            Fragment::CallableInvocation(Invocation {
                callee: Callee::Method {
                    receiver: Some(Receiver::Value("sb".into())),
                },
                method: method("appendPart", &[("part", Ty::string())]),
                args: vec![Argument::Symbol("label".into())],
            }),
            Fragment::LocalElement(Element {
                name: "itemCount".into(),
                ty: Ty::Primitive(PrimitiveKind::Int),
                kind: ElementKind::LocalVariable,
                is_static: false,
            }),
            Fragment::Literal(Literal::Null),
        ]
    }

    #[test]
    fn every_fragment_matches_its_own_abbreviation() {
        for fragment in samples() {
            let name = fragment.name();
            assert!(matches(name, &abbreviate(name)), "{}", fragment.display());
        }
    }

    #[test]
    fn display_text() {
        let displays: Vec<String> = samples().iter().map(Fragment::display).collect();
        assert_eq!(
            displays,
            vec![
                "while",
                "final",
                "int",
                "Map.Entry",
                "Integer.MAX_VALUE",
                "sb.appendPart(String)",
                "itemCount",
                "null",
            ]
        );
    }

    #[test]
    fn synthesized_expressions_render_as_source() {
        let rendered: Vec<String> = samples()
            .iter()
            .filter_map(|f| match f.synthesize() {
                Built::Expr(node) | Built::Type(node) => Some(render(&node)),
                Built::Word(_) => None,
            })
            .collect();
        assert_eq!(
            rendered,
            vec![
                "int",
                "Map.Entry",
                "Integer.MAX_VALUE",
                "sb.appendPart(label)",
                "itemCount",
                "null",
            ]
        );
    }

    #[test]
    fn constructor_call_with_default_arguments() {
        let call = Fragment::CallableInvocation(Invocation {
            callee: Callee::Constructor {
                ty: type_ref("java.util.ArrayList", "ArrayList"),
            },
            method: method("ArrayList", &[("initialCapacity", Ty::Primitive(PrimitiveKind::Int))]),
            args: vec![Argument::Default("0")],
        });
        assert_eq!(call.display(), "new ArrayList(int)");
        assert_eq!(call.name(), "ArrayList");
        let Built::Expr(node) = call.synthesize() else {
            panic!("expected an expression");
        };
        assert_eq!(render(&node), "new ArrayList(0)");
    }

    #[test]
    fn equality_is_display_equality() {
        let a = Fragment::LocalElement(Element {
            name: "count".into(),
            ty: Ty::Primitive(PrimitiveKind::Int),
            kind: ElementKind::LocalVariable,
            is_static: false,
        });
        let b = Fragment::LocalElement(Element {
            name: "count".into(),
            ty: Ty::Primitive(PrimitiveKind::Long),
            kind: ElementKind::Field,
            is_static: false,
        });
        assert_eq!(a, b);
        assert!(Fragment::Literal(Literal::False) < Fragment::Literal(Literal::Null));
    }
}
