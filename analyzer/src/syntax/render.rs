//! Single-line source rendering of syntax nodes.
//!
//! Output is deterministic and uses one space between tokens where the language needs
//! separation. It is good enough to splice into a document; layout is left to a formatter.

use super::kind::{Role, SyntaxKind};
use super::node::{MISSING_MARKER, SyntaxNode};

pub fn render(node: &SyntaxNode) -> String {
    let mut out = String::new();
    Printer { out: &mut out }.node(node);
    out
}

struct Printer<'a> {
    out: &'a mut String,
}

impl Printer<'_> {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn opt(&mut self, node: &SyntaxNode, role: Role) {
        if let Some(child) = node.child(role) {
            self.node(child);
        }
    }

    fn list(&mut self, node: &SyntaxNode, role: Role, sep: &str) {
        for (i, child) in node.children_with(role).enumerate() {
            if i > 0 {
                self.push(sep);
            }
            self.node(child);
        }
    }

    /// Children in `role`, each followed by a space.
    fn prefixes(&mut self, node: &SyntaxNode, role: Role) {
        for child in node.children_with(role) {
            self.node(child);
            self.push(" ");
        }
    }

    fn type_params(&mut self, node: &SyntaxNode) {
        if node.child(Role::TypeParameter).is_some() {
            self.push("<");
            self.list(node, Role::TypeParameter, ", ");
            self.push(">");
        }
    }

    fn arguments(&mut self, node: &SyntaxNode) {
        self.push("(");
        self.list(node, Role::Argument, ", ");
        self.push(")");
    }

    fn body_members(&mut self, node: &SyntaxNode) {
        if node.child(Role::Member).is_none() {
            self.push("{}");
            return;
        }
        self.push("{ ");
        self.list(node, Role::Member, " ");
        self.push(" }");
    }

    fn statement_list(&mut self, node: &SyntaxNode) {
        if node.child(Role::Statement).is_none() {
            self.push("{}");
            return;
        }
        self.push("{ ");
        self.list(node, Role::Statement, " ");
        self.push(" }");
    }

    fn node(&mut self, node: &SyntaxNode) {
        use SyntaxKind::*;

        match node.kind {
            Missing => self.push(MISSING_MARKER),

            CompilationUnit => {
                let mut parts = Vec::new();
                for child in &node.children {
                    parts.push(render(child));
                }
                self.push(&parts.join(" "));
            }
            PackageDeclaration => {
                self.push("package ");
                self.opt(node, Role::Name);
                self.push(";");
            }
            ImportDeclaration => {
                self.push("import ");
                if node.has_modifier("static") {
                    self.push("static ");
                }
                self.opt(node, Role::Name);
                if node.text() == "*" {
                    self.push(".*");
                }
                self.push(";");
            }
            ModuleDeclaration => {
                self.push("module ");
                self.opt(node, Role::Name);
                self.push(" {}");
            }
            TypeDeclaration => {
                self.prefixes(node, Role::Modifier);
                self.push(if node.text().is_empty() { "class" } else { node.text() });
                self.push(" ");
                self.opt(node, Role::Name);
                self.type_params(node);
                if let Some(sup) = node.child(Role::SuperClass) {
                    self.push(" extends ");
                    self.node(sup);
                }
                if node.child(Role::SuperInterface).is_some() {
                    self.push(if node.text() == "interface" {
                        " extends "
                    } else {
                        " implements "
                    });
                    self.list(node, Role::SuperInterface, ", ");
                }
                self.push(" ");
                self.body_members(node);
            }
            EnumDeclaration => {
                self.prefixes(node, Role::Modifier);
                self.push("enum ");
                self.opt(node, Role::Name);
                if node.child(Role::SuperInterface).is_some() {
                    self.push(" implements ");
                    self.list(node, Role::SuperInterface, ", ");
                }
                self.push(" { ");
                self.list(node, Role::EnumConstant, ", ");
                if node.child(Role::Member).is_some() {
                    self.push("; ");
                    self.list(node, Role::Member, " ");
                }
                self.push(" }");
            }
            AnnotationTypeDeclaration => {
                self.prefixes(node, Role::Modifier);
                self.push("@interface ");
                self.opt(node, Role::Name);
                self.push(" ");
                self.body_members(node);
            }
            AnnotationTypeMemberDeclaration => {
                self.opt(node, Role::Type);
                self.push(" ");
                self.opt(node, Role::Name);
                self.push("();");
            }
            AnonymousClassDeclaration => self.body_members(node),
            EnumConstantDeclaration => {
                self.opt(node, Role::Name);
                if node.child(Role::Argument).is_some() {
                    self.arguments(node);
                }
                if let Some(body) = node.child(Role::Body) {
                    self.push(" ");
                    self.node(body);
                }
            }
            FieldDeclaration | VariableDeclarationStatement => {
                self.prefixes(node, Role::Modifier);
                self.opt(node, Role::Type);
                self.push(" ");
                self.list(node, Role::Fragment, ", ");
                self.push(";");
            }
            VariableDeclarationExpression => {
                self.prefixes(node, Role::Modifier);
                self.opt(node, Role::Type);
                self.push(" ");
                self.list(node, Role::Fragment, ", ");
            }
            MethodDeclaration => {
                self.prefixes(node, Role::Modifier);
                if node.child(Role::TypeParameter).is_some() {
                    self.type_params(node);
                    self.push(" ");
                }
                if let Some(ret) = node.child(Role::ReturnType) {
                    self.node(ret);
                    self.push(" ");
                }
                self.opt(node, Role::Name);
                self.push("(");
                self.list(node, Role::Parameter, ", ");
                self.push(")");
                if node.child(Role::Throws).is_some() {
                    self.push(" throws ");
                    self.list(node, Role::Throws, ", ");
                }
                match node.child(Role::Body) {
                    Some(body) => {
                        self.push(" ");
                        self.node(body);
                    }
                    None => self.push(";"),
                }
            }
            Initializer => {
                self.prefixes(node, Role::Modifier);
                self.opt(node, Role::Body);
            }
            SingleVariableDeclaration => {
                self.prefixes(node, Role::Modifier);
                self.opt(node, Role::Type);
                if node.text() == "..." {
                    self.push("...");
                }
                self.push(" ");
                self.opt(node, Role::Name);
            }
            VariableDeclarationFragment => {
                self.opt(node, Role::Name);
                if let Some(init) = node.child(Role::Initializer) {
                    self.push(" = ");
                    self.node(init);
                }
            }
            TypeParameter => {
                self.opt(node, Role::Name);
                if node.child(Role::Bound).is_some() {
                    self.push(" extends ");
                    self.list(node, Role::Bound, " & ");
                }
            }
            Modifier | SimpleName | BooleanLiteral | CharacterLiteral | NullLiteral
            | NumberLiteral | StringLiteral | TextBlock | PrimitiveType | TextElement => {
                self.push(node.text())
            }
            MarkerAnnotation => {
                self.push("@");
                self.opt(node, Role::Name);
            }
            NormalAnnotation => {
                self.push("@");
                self.opt(node, Role::Name);
                self.push("(");
                self.list(node, Role::Argument, ", ");
                self.push(")");
            }
            SingleMemberAnnotation => {
                self.push("@");
                self.opt(node, Role::Name);
                self.push("(");
                self.opt(node, Role::Expression);
                self.push(")");
            }
            MemberValuePair => {
                self.opt(node, Role::Name);
                self.push(" = ");
                self.opt(node, Role::Expression);
            }

            Block => self.statement_list(node),
            AssertStatement => {
                self.push("assert ");
                self.opt(node, Role::Condition);
                if let Some(msg) = node.child(Role::Message) {
                    self.push(" : ");
                    self.node(msg);
                }
                self.push(";");
            }
            BreakStatement | ContinueStatement => {
                self.push(if node.kind == BreakStatement { "break" } else { "continue" });
                if let Some(label) = node.child(Role::Label) {
                    self.push(" ");
                    self.node(label);
                }
                self.push(";");
            }
            ConstructorInvocation => {
                self.push("this");
                self.arguments(node);
                self.push(";");
            }
            SuperConstructorInvocation => {
                self.push("super");
                self.arguments(node);
                self.push(";");
            }
            DoStatement => {
                self.push("do ");
                self.opt(node, Role::Body);
                self.push(" while (");
                self.opt(node, Role::Condition);
                self.push(");");
            }
            EmptyStatement => self.push(";"),
            EnhancedForStatement => {
                self.push("for (");
                self.opt(node, Role::Parameter);
                self.push(" : ");
                self.opt(node, Role::Expression);
                self.push(") ");
                self.opt(node, Role::Body);
            }
            ExpressionStatement => {
                self.opt(node, Role::Expression);
                self.push(";");
            }
            ForStatement => {
                self.push("for (");
                self.list(node, Role::Init, ", ");
                self.push("; ");
                self.opt(node, Role::Condition);
                self.push("; ");
                self.list(node, Role::Update, ", ");
                self.push(") ");
                self.opt(node, Role::Body);
            }
            IfStatement => {
                self.push("if (");
                self.opt(node, Role::Condition);
                self.push(") ");
                self.opt(node, Role::Then);
                if let Some(els) = node.child(Role::Else) {
                    self.push(" else ");
                    self.node(els);
                }
            }
            LabeledStatement => {
                self.opt(node, Role::Label);
                self.push(": ");
                self.opt(node, Role::Body);
            }
            ReturnStatement => {
                self.push("return");
                if let Some(expr) = node.child(Role::Expression) {
                    self.push(" ");
                    self.node(expr);
                }
                self.push(";");
            }
            SwitchStatement | SwitchExpression => {
                self.push("switch (");
                self.opt(node, Role::Expression);
                self.push(") ");
                self.statement_list(node);
            }
            SwitchCase => {
                if node.text() == "default" {
                    self.push("default:");
                } else {
                    self.push("case ");
                    self.opt(node, Role::Expression);
                    self.push(":");
                }
            }
            SynchronizedStatement => {
                self.push("synchronized (");
                self.opt(node, Role::Expression);
                self.push(") ");
                self.opt(node, Role::Body);
            }
            ThrowStatement => {
                self.push("throw ");
                self.opt(node, Role::Expression);
                self.push(";");
            }
            TryStatement => {
                self.push("try ");
                if node.child(Role::Resource).is_some() {
                    self.push("(");
                    self.list(node, Role::Resource, "; ");
                    self.push(") ");
                }
                self.opt(node, Role::Body);
                for catch in node.children_with(Role::Catch) {
                    self.push(" ");
                    self.node(catch);
                }
                if let Some(finally) = node.child(Role::Finally) {
                    self.push(" finally ");
                    self.node(finally);
                }
            }
            CatchClause => {
                self.push("catch (");
                self.opt(node, Role::Parameter);
                self.push(") ");
                self.opt(node, Role::Body);
            }
            TypeDeclarationStatement => self.opt(node, Role::Member),
            WhileStatement => {
                self.push("while (");
                self.opt(node, Role::Condition);
                self.push(") ");
                self.opt(node, Role::Body);
            }
            YieldStatement => {
                self.push("yield ");
                self.opt(node, Role::Expression);
                self.push(";");
            }

            ArrayAccess => {
                self.opt(node, Role::Receiver);
                self.push("[");
                self.opt(node, Role::Index);
                self.push("]");
            }
            ArrayCreation => {
                self.push("new ");
                self.opt(node, Role::Type);
                for dim in node.children_with(Role::Dimension) {
                    self.push("[");
                    if dim.kind != Dimension {
                        self.node(dim);
                    }
                    self.push("]");
                }
                if let Some(init) = node.child(Role::Initializer) {
                    self.push(" ");
                    self.node(init);
                }
            }
            ArrayInitializer => {
                self.push("{");
                self.list(node, Role::Element, ", ");
                self.push("}");
            }
            Assignment | InfixExpression => {
                self.opt(node, Role::Left);
                self.push(" ");
                self.push(node.text());
                self.push(" ");
                self.opt(node, Role::Right);
            }
            CastExpression => {
                self.push("(");
                self.opt(node, Role::Type);
                self.push(") ");
                self.opt(node, Role::Operand);
            }
            ClassInstanceCreation => {
                if let Some(recv) = node.child(Role::Receiver) {
                    self.node(recv);
                    self.push(".");
                }
                self.push("new ");
                self.opt(node, Role::Type);
                self.arguments(node);
                if let Some(body) = node.child(Role::Body) {
                    self.push(" ");
                    self.node(body);
                }
            }
            ConditionalExpression => {
                self.opt(node, Role::Condition);
                self.push(" ? ");
                self.opt(node, Role::Then);
                self.push(" : ");
                self.opt(node, Role::Else);
            }
            FieldAccess => {
                self.opt(node, Role::Receiver);
                self.push(".");
                self.opt(node, Role::Name);
            }
            InstanceofExpression => {
                self.opt(node, Role::Left);
                self.push(" instanceof ");
                self.opt(node, Role::Type);
            }
            LambdaExpression => {
                self.push("(");
                self.list(node, Role::Parameter, ", ");
                self.push(") -> ");
                self.opt(node, Role::Body);
            }
            MethodInvocation => {
                if let Some(recv) = node.child(Role::Receiver) {
                    self.node(recv);
                    self.push(".");
                }
                self.opt(node, Role::Name);
                self.arguments(node);
            }
            ExpressionMethodReference => {
                self.opt(node, Role::Receiver);
                self.push("::");
                self.opt(node, Role::Name);
            }
            ParenthesizedExpression => {
                self.push("(");
                self.opt(node, Role::Expression);
                self.push(")");
            }
            PostfixExpression => {
                self.opt(node, Role::Operand);
                self.push(node.text());
            }
            PrefixExpression => {
                self.push(node.text());
                self.opt(node, Role::Operand);
            }
            QualifiedName | QualifiedType => {
                self.opt(node, Role::Qualifier);
                self.push(".");
                self.opt(node, Role::Name);
            }
            SuperFieldAccess => {
                self.push("super.");
                self.opt(node, Role::Name);
            }
            SuperMethodInvocation => {
                self.push("super.");
                self.opt(node, Role::Name);
                self.arguments(node);
            }
            ThisExpression => {
                if let Some(q) = node.child(Role::Qualifier) {
                    self.node(q);
                    self.push(".");
                }
                self.push("this");
            }
            TypeLiteral => {
                self.opt(node, Role::Type);
                self.push(".class");
            }

            ArrayType => {
                self.opt(node, Role::Element);
                self.push("[]");
            }
            IntersectionType => self.list(node, Role::Type, " & "),
            ParameterizedType => {
                self.opt(node, Role::Type);
                self.push("<");
                self.list(node, Role::TypeArgument, ", ");
                self.push(">");
            }
            SimpleType => self.opt(node, Role::Name),
            UnionType => self.list(node, Role::Type, " | "),
            WildcardType => {
                self.push("?");
                if let Some(bound) = node.child(Role::Bound) {
                    self.push(" ");
                    self.push(node.text());
                    self.push(" ");
                    self.node(bound);
                }
            }

            Javadoc => {
                self.push("/**");
                self.push(node.text());
                self.push("*/");
            }
            TagElement | MemberRef | MethodRef | MethodRefParameter => self.push(node.text()),
            LineComment => {
                self.push("//");
                self.push(node.text());
            }
            BlockComment => {
                self.push("/*");
                self.push(node.text());
                self.push("*/");
            }
            Dimension => self.push("[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, parse_expression};

    fn expr(src: &str) -> String {
        render(&parse_expression(src).expr)
    }

    #[test]
    fn renders_expressions_on_one_line() {
        assert_eq!(expr("a+b*c"), "a + b * c");
        assert_eq!(expr("sb.append( x ,1)"), "sb.append(x, 1)");
        assert_eq!(expr("x = y ? 1 : 2"), "x = y ? 1 : 2");
        assert_eq!(expr("(String) o"), "(String) o");
        assert_eq!(expr("new ArrayList<String>()"), "new ArrayList<String>()");
        assert_eq!(expr("!done"), "!done");
        assert_eq!(expr("i++"), "i++");
    }

    #[test]
    fn missing_renders_as_marker() {
        assert_eq!(expr("f(a, )"), "f(a, $missing$)");
        assert_eq!(render(&SyntaxNode::missing(Role::Expression, 0)), "$missing$");
    }

    #[test]
    fn renders_statements() {
        let out = parse("class A { void m() { if (a) return; else { x = 1; } } }");
        insta::assert_snapshot!(
            render(&out.unit),
            @"class A { void m() { if (a) return; else { x = 1; } } }"
        );
    }
}
