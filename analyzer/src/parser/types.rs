use super::Parser;
use crate::lexer::{Keyword, TokenKind};
use crate::syntax::{Role, SyntaxKind, SyntaxNode};

impl<'a> Parser<'a> {
    pub(super) fn at_primitive_type(&self) -> bool {
        matches!(self.cur().kind, TokenKind::Keyword(kw) if kw.is_primitive_type())
    }

    /// A type, or `Missing` when none starts here.
    pub(super) fn parse_type(&mut self, role: Role) -> SyntaxNode {
        if !(self.at_ident() || self.at_primitive_type()) {
            return self.missing(role, "type");
        }
        let start = self.start();
        let mut ty = self.parse_non_array_type();
        while self.at(&TokenKind::OpenBracket) && self.nth_is(1, &TokenKind::CloseBracket) {
            self.bump();
            self.bump();
            ty = SyntaxNode::new(SyntaxKind::ArrayType, self.span_from(start))
                .with_children(vec![ty.in_role(Role::Element)]);
        }
        ty.in_role(role)
    }

    /// Speculatively parses a type. On failure nothing is consumed and no diagnostic is kept.
    pub(super) fn try_type(&mut self) -> Option<SyntaxNode> {
        if !(self.at_ident() || self.at_primitive_type()) {
            return None;
        }
        let cp = self.checkpoint();
        let ty = self.parse_type(Role::Type);
        if self.diagnostics.len() > cp.diags || ty.contains_missing() {
            self.rewind(cp);
            return None;
        }
        Some(ty)
    }

    /// A primitive or class type without trailing `[]`.
    pub(super) fn parse_non_array_type(&mut self) -> SyntaxNode {
        if self.at_primitive_type() {
            return self.leaf(SyntaxKind::PrimitiveType, Role::Type);
        }

        let start = self.start();
        let name = self.ident(Role::Name);
        let mut ty = SyntaxNode::new(SyntaxKind::SimpleType, self.span_from(start))
            .with_children(vec![name]);

        loop {
            if self.at(&TokenKind::Lt) {
                let args = self.type_arguments();
                let mut children = vec![ty.in_role(Role::Type)];
                children.extend(args);
                ty = SyntaxNode::new(SyntaxKind::ParameterizedType, self.span_from(start))
                    .with_children(children);
                continue;
            }
            if self.at(&TokenKind::Dot) && matches!(self.nth(1).kind, TokenKind::Ident(_)) {
                self.bump();
                let last = self.ident(Role::Name);
                ty = if ty.kind == SyntaxKind::SimpleType {
                    // `a.b.C` stays a simple type over a qualified name.
                    let qualifier = ty
                        .children
                        .into_iter()
                        .next()
                        .map(|n| n.in_role(Role::Qualifier));
                    let mut parts: Vec<SyntaxNode> = qualifier.into_iter().collect();
                    parts.push(last);
                    let qualified =
                        SyntaxNode::new(SyntaxKind::QualifiedName, self.span_from(start))
                            .with_children(parts)
                            .in_role(Role::Name);
                    SyntaxNode::new(SyntaxKind::SimpleType, self.span_from(start))
                        .with_children(vec![qualified])
                } else {
                    SyntaxNode::new(SyntaxKind::QualifiedType, self.span_from(start))
                        .with_children(vec![ty.in_role(Role::Qualifier), last])
                };
                continue;
            }
            break;
        }
        ty
    }

    /// `<A, ? extends B>`; the diamond `<>` yields no arguments.
    fn type_arguments(&mut self) -> Vec<SyntaxNode> {
        let mut args = Vec::new();
        self.bump();
        if self.eat(&TokenKind::Gt) {
            return args;
        }
        loop {
            if self.at(&TokenKind::Question) {
                let start = self.start();
                self.bump();
                let mut wildcard = SyntaxNode::new(SyntaxKind::WildcardType, self.span_from(start));
                for kw in [Keyword::Extends, Keyword::Super] {
                    if self.eat_kw(kw) {
                        let bound = self.parse_type(Role::Bound);
                        wildcard = wildcard.with_text(kw.as_str());
                        wildcard.push(bound);
                        wildcard.span = self.span_from(start);
                        break;
                    }
                }
                args.push(wildcard.in_role(Role::TypeArgument));
            } else {
                args.push(self.parse_type(Role::TypeArgument));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::Gt, "`>`");
        args
    }

    /// `<T extends A & B, U>` on a type or method declaration.
    pub(super) fn type_parameters(&mut self) -> Vec<SyntaxNode> {
        let mut params = Vec::new();
        if !self.eat(&TokenKind::Lt) {
            return params;
        }
        loop {
            let start = self.start();
            let mut children = vec![self.ident(Role::Name)];
            if self.eat_kw(Keyword::Extends) {
                loop {
                    children.push(self.parse_type(Role::Bound));
                    if !self.eat(&TokenKind::Amp) {
                        break;
                    }
                }
            }
            params.push(
                SyntaxNode::new(SyntaxKind::TypeParameter, self.span_from(start))
                    .with_children(children)
                    .in_role(Role::TypeParameter),
            );
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::Gt, "`>`");
        params
    }
}
