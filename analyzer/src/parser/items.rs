use super::Parser;
use crate::lexer::{Keyword, TokenKind};
use crate::syntax::{Role, SyntaxKind, SyntaxNode};

impl<'a> Parser<'a> {
    pub(super) fn parse_compilation_unit(&mut self) -> SyntaxNode {
        let mut children = Vec::new();

        if self.at_kw(Keyword::Package) {
            let start = self.start();
            self.bump();
            let name = self.qualified_name(Role::Name);
            self.expect(&TokenKind::Semi, "`;`");
            children.push(
                SyntaxNode::new(SyntaxKind::PackageDeclaration, self.span_from(start))
                    .with_children(vec![name])
                    .in_role(Role::Package),
            );
        }

        while self.at_kw(Keyword::Import) {
            children.push(self.parse_import());
        }

        while !self.at(&TokenKind::Eof) {
            if self.eat(&TokenKind::Semi) {
                continue;
            }
            if self.at_type_declaration_start() {
                let start = self.start();
                let modifiers = self.parse_modifiers();
                children.push(self.parse_type_declaration(start, modifiers).in_role(Role::Member));
                continue;
            }
            let tok = self.cur().clone();
            self.emit_unexpected("type declaration", &tok);
            self.bump();
        }

        let end = self.cur().span.end;
        SyntaxNode::new(SyntaxKind::CompilationUnit, crate::Span::new(0, end))
            .with_children(children)
    }

    fn parse_import(&mut self) -> SyntaxNode {
        let start = self.start();
        self.bump();
        let mut children = Vec::new();
        if self.at_kw(Keyword::Static) {
            children.push(self.leaf(SyntaxKind::Modifier, Role::Modifier));
        }
        children.push(self.qualified_name(Role::Name));
        let mut on_demand = false;
        if self.at(&TokenKind::Dot) && self.nth_is(1, &TokenKind::Star) {
            self.bump();
            self.bump();
            on_demand = true;
        }
        self.expect(&TokenKind::Semi, "`;`");
        let import = SyntaxNode::new(SyntaxKind::ImportDeclaration, self.span_from(start))
            .with_children(children)
            .in_role(Role::Import);
        if on_demand { import.with_text("*") } else { import }
    }

    /// Whether modifiers/annotations followed by `class`, `interface`, `enum` or `@interface`
    /// start here.
    pub(super) fn at_type_declaration_start(&self) -> bool {
        let mut n = 0;
        loop {
            let tok = self.nth(n);
            match &tok.kind {
                TokenKind::Keyword(Keyword::Class | Keyword::Interface | Keyword::Enum) => {
                    return true;
                }
                TokenKind::At if self.nth(n + 1).is_keyword(Keyword::Interface) => return true,
                TokenKind::Keyword(kw) if kw.is_modifier() => n += 1,
                TokenKind::At => {
                    // Skip `@Name` and an optional parenthesized argument list.
                    n += 2;
                    while self.nth_is(n, &TokenKind::Dot) {
                        n += 2;
                    }
                    if self.nth_is(n, &TokenKind::OpenParen) {
                        let mut depth = 0usize;
                        loop {
                            match self.nth(n).kind {
                                TokenKind::OpenParen => depth += 1,
                                TokenKind::CloseParen => {
                                    depth -= 1;
                                    if depth == 0 {
                                        n += 1;
                                        break;
                                    }
                                }
                                TokenKind::Eof => return false,
                                _ => {}
                            }
                            n += 1;
                        }
                    }
                }
                _ => return false,
            }
        }
    }

    /// Keyword modifiers and annotations, in source order.
    pub(super) fn parse_modifiers(&mut self) -> Vec<SyntaxNode> {
        let mut modifiers = Vec::new();
        loop {
            match &self.cur().kind {
                TokenKind::Keyword(kw) if kw.is_modifier() => {
                    modifiers.push(self.leaf(SyntaxKind::Modifier, Role::Modifier));
                }
                TokenKind::At if !self.nth(1).is_keyword(Keyword::Interface) => {
                    modifiers.push(self.parse_annotation());
                }
                _ => break,
            }
        }
        modifiers
    }

    fn parse_annotation(&mut self) -> SyntaxNode {
        let start = self.start();
        self.bump();
        let name = self.qualified_name(Role::Name);
        if !self.at(&TokenKind::OpenParen) {
            return SyntaxNode::new(SyntaxKind::MarkerAnnotation, self.span_from(start))
                .with_children(vec![name])
                .in_role(Role::Modifier);
        }

        self.bump();
        let named = self.at_ident() && self.nth_is(1, &TokenKind::Eq);
        let mut children = vec![name];
        let kind = if named {
            while self.at_ident() {
                let pair_start = self.start();
                let key = self.ident(Role::Name);
                self.expect(&TokenKind::Eq, "`=`");
                let value = self.parse_expr_or_missing(Role::Expression, "annotation value");
                children.push(
                    SyntaxNode::new(SyntaxKind::MemberValuePair, self.span_from(pair_start))
                        .with_children(vec![key, value])
                        .in_role(Role::Argument),
                );
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            SyntaxKind::NormalAnnotation
        } else if self.at(&TokenKind::CloseParen) {
            SyntaxKind::NormalAnnotation
        } else {
            let value = if self.at(&TokenKind::OpenBrace) {
                self.parse_array_initializer(Role::Expression)
            } else {
                self.parse_expr_or_missing(Role::Expression, "annotation value")
            };
            children.push(value);
            SyntaxKind::SingleMemberAnnotation
        };
        self.expect(&TokenKind::CloseParen, "`)`");
        SyntaxNode::new(kind, self.span_from(start))
            .with_children(children)
            .in_role(Role::Modifier)
    }

    /// Class, interface, enum or annotation type declaration after its modifiers.
    pub(super) fn parse_type_declaration(
        &mut self,
        start: u32,
        modifiers: Vec<SyntaxNode>,
    ) -> SyntaxNode {
        let mut children = modifiers;

        if self.at(&TokenKind::At) {
            self.bump();
            self.bump();
            children.push(self.ident(Role::Name));
            children.extend(self.parse_class_body_members());
            return SyntaxNode::new(SyntaxKind::AnnotationTypeDeclaration, self.span_from(start))
                .with_children(children);
        }

        if self.eat_kw(Keyword::Enum) {
            children.push(self.ident(Role::Name));
            if self.eat_kw(Keyword::Implements) {
                children.extend(self.type_list(Role::SuperInterface));
            }
            children.extend(self.parse_enum_body());
            return SyntaxNode::new(SyntaxKind::EnumDeclaration, self.span_from(start))
                .with_children(children);
        }

        let flavor = if self.eat_kw(Keyword::Interface) {
            "interface"
        } else {
            self.bump();
            "class"
        };
        children.push(self.ident(Role::Name));
        children.extend(self.type_parameters());
        if self.eat_kw(Keyword::Extends) {
            if flavor == "interface" {
                children.extend(self.type_list(Role::SuperInterface));
            } else {
                children.push(self.parse_type(Role::SuperClass));
            }
        }
        if flavor == "class" && self.eat_kw(Keyword::Implements) {
            children.extend(self.type_list(Role::SuperInterface));
        }
        children.extend(self.parse_class_body_members());
        SyntaxNode::new(SyntaxKind::TypeDeclaration, self.span_from(start))
            .with_text(flavor)
            .with_children(children)
    }

    fn type_list(&mut self, role: Role) -> Vec<SyntaxNode> {
        let mut types = vec![self.parse_type(role)];
        while self.eat(&TokenKind::Comma) {
            types.push(self.parse_type(role));
        }
        types
    }

    /// `{ member* }` as `Member` children.
    pub(super) fn parse_class_body_members(&mut self) -> Vec<SyntaxNode> {
        let mut members = Vec::new();
        if !self.expect(&TokenKind::OpenBrace, "`{`") {
            return members;
        }
        while !self.at(&TokenKind::CloseBrace) && !self.at(&TokenKind::Eof) {
            if let Some(member) = self.parse_member() {
                members.push(member.in_role(Role::Member));
            }
        }
        self.expect(&TokenKind::CloseBrace, "`}`");
        members
    }

    fn parse_enum_body(&mut self) -> Vec<SyntaxNode> {
        let mut children = Vec::new();
        if !self.expect(&TokenKind::OpenBrace, "`{`") {
            return children;
        }
        while self.at_ident() || self.at(&TokenKind::At) {
            let start = self.start();
            let mut constant = self.parse_modifiers();
            constant.push(self.ident(Role::Name));
            if self.at(&TokenKind::OpenParen) {
                constant.extend(self.arguments());
            }
            if self.at(&TokenKind::OpenBrace) {
                let body_start = self.start();
                let members = self.parse_class_body_members();
                constant.push(
                    SyntaxNode::new(
                        SyntaxKind::AnonymousClassDeclaration,
                        self.span_from(body_start),
                    )
                    .with_children(members)
                    .in_role(Role::Body),
                );
            }
            children.push(
                SyntaxNode::new(SyntaxKind::EnumConstantDeclaration, self.span_from(start))
                    .with_children(constant)
                    .in_role(Role::EnumConstant),
            );
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if self.eat(&TokenKind::Semi) {
            while !self.at(&TokenKind::CloseBrace) && !self.at(&TokenKind::Eof) {
                if let Some(member) = self.parse_member() {
                    children.push(member.in_role(Role::Member));
                }
            }
        }
        self.expect(&TokenKind::CloseBrace, "`}`");
        children
    }

    /// One class-body member. Returns `None` for a stray token or `;`, which is consumed.
    fn parse_member(&mut self) -> Option<SyntaxNode> {
        if self.eat(&TokenKind::Semi) {
            return None;
        }
        let start = self.start();

        if self.at(&TokenKind::OpenBrace)
            || (self.at_kw(Keyword::Static) && self.nth_is(1, &TokenKind::OpenBrace))
        {
            let mut children = Vec::new();
            if self.at_kw(Keyword::Static) {
                children.push(self.leaf(SyntaxKind::Modifier, Role::Modifier));
            }
            children.push(self.parse_block(Role::Body));
            return Some(
                SyntaxNode::new(SyntaxKind::Initializer, self.span_from(start))
                    .with_children(children),
            );
        }

        if self.at_type_declaration_start() {
            let modifiers = self.parse_modifiers();
            return Some(self.parse_type_declaration(start, modifiers));
        }

        let mut children = self.parse_modifiers();
        children.extend(self.type_parameters());

        // Constructor: `Name (`.
        if self.at_ident() && self.nth_is(1, &TokenKind::OpenParen) {
            children.push(self.ident(Role::Name));
            return Some(self.parse_method_rest(start, children));
        }

        if !(self.at_ident() || self.at_primitive_type()) {
            if children.is_empty() {
                let tok = self.cur().clone();
                self.emit_unexpected("member declaration", &tok);
                self.bump();
                return None;
            }
            // Dangling modifiers: keep them as a field with a missing type.
            children.push(self.missing(Role::Type, "type"));
            return Some(
                SyntaxNode::new(SyntaxKind::FieldDeclaration, self.span_from(start))
                    .with_children(children),
            );
        }

        let ty = self.parse_type(Role::Type);
        if self.at_ident() && self.nth_is(1, &TokenKind::OpenParen) {
            children.push(ty.in_role(Role::ReturnType));
            children.push(self.ident(Role::Name));
            return Some(self.parse_method_rest(start, children));
        }

        children.push(ty);
        children.extend(self.variable_fragments());
        self.expect(&TokenKind::Semi, "`;`");
        Some(
            SyntaxNode::new(SyntaxKind::FieldDeclaration, self.span_from(start))
                .with_children(children),
        )
    }

    /// Parameters, `throws` and body of a method or constructor, after its name.
    fn parse_method_rest(&mut self, start: u32, mut children: Vec<SyntaxNode>) -> SyntaxNode {
        self.bump();
        while !self.at(&TokenKind::CloseParen) && !self.at(&TokenKind::Eof) {
            if self.at(&TokenKind::OpenBrace) || self.at(&TokenKind::Semi) {
                break;
            }
            children.push(self.parse_parameter(false));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::CloseParen, "`)`");
        while self.at(&TokenKind::OpenBracket) && self.nth_is(1, &TokenKind::CloseBracket) {
            self.bump();
            self.bump();
        }
        if self.eat_kw(Keyword::Throws) {
            children.extend(self.type_list(Role::Throws));
        }
        if self.at(&TokenKind::OpenBrace) {
            children.push(self.parse_block(Role::Body));
        } else {
            self.expect(&TokenKind::Semi, "`;` or method body");
        }
        SyntaxNode::new(SyntaxKind::MethodDeclaration, self.span_from(start))
            .with_children(children)
    }

    /// `[final] Type [...] name`. With `allow_missing_type`, a lone `name` gets a `Missing`
    /// type (as in `catch ( e)`).
    pub(super) fn parse_parameter(&mut self, allow_missing_type: bool) -> SyntaxNode {
        let start = self.start();
        let mut children = self.parse_modifiers();
        let lone_name = self.at_ident()
            && matches!(
                self.nth(1).kind,
                TokenKind::CloseParen | TokenKind::Comma | TokenKind::Eof
            );
        if allow_missing_type && lone_name {
            children.push(SyntaxNode::missing(Role::Type, self.start()));
        } else {
            let ty = if allow_missing_type {
                self.parse_catch_type()
            } else {
                self.parse_type(Role::Type)
            };
            children.push(ty);
        }
        let varargs = self.eat(&TokenKind::Ellipsis);
        let name = if self.at_ident() {
            self.ident(Role::Name)
        } else {
            self.missing(Role::Name, "parameter name")
        };
        children.push(name);
        let param = SyntaxNode::new(SyntaxKind::SingleVariableDeclaration, self.span_from(start))
            .with_children(children)
            .in_role(Role::Parameter);
        if varargs { param.with_text("...") } else { param }
    }

    /// `A | B` in a catch clause.
    fn parse_catch_type(&mut self) -> SyntaxNode {
        let start = self.start();
        let first = self.parse_type(Role::Type);
        if !self.at(&TokenKind::Pipe) {
            return first;
        }
        let mut alternatives = vec![first];
        while self.eat(&TokenKind::Pipe) {
            alternatives.push(self.parse_type(Role::Type));
        }
        SyntaxNode::new(SyntaxKind::UnionType, self.span_from(start))
            .with_children(alternatives)
            .in_role(Role::Type)
    }

    /// `a = 1, b[], c` as `Fragment` children.
    pub(super) fn variable_fragments(&mut self) -> Vec<SyntaxNode> {
        let mut fragments = Vec::new();
        loop {
            let start = self.start();
            let mut children = vec![self.ident(Role::Name)];
            while self.at(&TokenKind::OpenBracket) && self.nth_is(1, &TokenKind::CloseBracket) {
                self.bump();
                self.bump();
            }
            if self.eat(&TokenKind::Eq) {
                let init = if self.at(&TokenKind::OpenBrace) {
                    self.parse_array_initializer(Role::Initializer)
                } else {
                    self.parse_expr_or_missing(Role::Initializer, "initializer")
                };
                children.push(init);
            }
            fragments.push(
                SyntaxNode::new(SyntaxKind::VariableDeclarationFragment, self.span_from(start))
                    .with_children(children)
                    .in_role(Role::Fragment),
            );
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        fragments
    }
}
