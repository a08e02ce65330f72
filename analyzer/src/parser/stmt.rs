use super::Parser;
use crate::lexer::{Keyword, TokenKind};
use crate::syntax::{Role, SyntaxKind, SyntaxNode};

impl<'a> Parser<'a> {
    /// `{ statement* }`.
    pub(super) fn parse_block(&mut self, role: Role) -> SyntaxNode {
        let start = self.start();
        if !self.expect(&TokenKind::OpenBrace, "`{`") {
            return SyntaxNode::missing(role, start);
        }
        let mut statements = Vec::new();
        while !self.at(&TokenKind::CloseBrace) && !self.at(&TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt.in_role(Role::Statement));
            }
        }
        self.expect(&TokenKind::CloseBrace, "`}`");
        SyntaxNode::new(SyntaxKind::Block, self.span_from(start))
            .with_children(statements)
            .in_role(role)
    }

    /// A statement in a nested position (`if` branch, loop body): `Missing` when absent.
    fn parse_sub_statement(&mut self, role: Role) -> SyntaxNode {
        let start = self.start();
        match self.parse_statement() {
            Some(stmt) => stmt.in_role(role),
            None => SyntaxNode::missing(role, start),
        }
    }

    fn can_begin_statement(&self) -> bool {
        if self.can_begin_expr() || self.at_ident() {
            return true;
        }
        match &self.cur().kind {
            TokenKind::OpenBrace | TokenKind::Semi | TokenKind::At => true,
            TokenKind::Keyword(kw) => matches!(
                kw,
                Keyword::If
                    | Keyword::While
                    | Keyword::Do
                    | Keyword::For
                    | Keyword::Switch
                    | Keyword::Return
                    | Keyword::Break
                    | Keyword::Continue
                    | Keyword::Throw
                    | Keyword::Try
                    | Keyword::Synchronized
                    | Keyword::Assert
                    | Keyword::Class
                    | Keyword::Interface
                    | Keyword::Enum
                    | Keyword::Final
                    | Keyword::Abstract
                    | Keyword::Static
            ),
            _ => false,
        }
    }

    /// One statement. A token that cannot start a statement is reported and skipped.
    pub(super) fn parse_statement(&mut self) -> Option<SyntaxNode> {
        if !self.can_begin_statement() {
            let tok = self.cur().clone();
            self.emit_unexpected("statement", &tok);
            if !matches!(tok.kind, TokenKind::CloseBrace | TokenKind::Eof) {
                self.bump();
            }
            return None;
        }

        let start = self.start();
        let node = match self.cur().kind.clone() {
            TokenKind::OpenBrace => self.parse_block(Role::None),
            TokenKind::Semi => {
                self.bump();
                SyntaxNode::new(SyntaxKind::EmptyStatement, self.span_from(start))
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if(start),
            TokenKind::Keyword(Keyword::While) => {
                self.bump();
                let cond = self.paren_condition();
                let body = self.parse_sub_statement(Role::Body);
                SyntaxNode::new(SyntaxKind::WhileStatement, self.span_from(start))
                    .with_children(vec![cond, body])
            }
            TokenKind::Keyword(Keyword::Do) => {
                self.bump();
                let body = self.parse_sub_statement(Role::Body);
                let mut children = vec![body];
                if self.expect_kw(Keyword::While) {
                    children.push(self.paren_condition());
                } else {
                    children.push(SyntaxNode::missing(Role::Condition, self.start()));
                }
                self.expect(&TokenKind::Semi, "`;`");
                SyntaxNode::new(SyntaxKind::DoStatement, self.span_from(start))
                    .with_children(children)
            }
            TokenKind::Keyword(Keyword::For) => self.parse_for(start),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch(start),
            TokenKind::Keyword(Keyword::Return) => {
                self.bump();
                let mut children = Vec::new();
                if self.can_begin_expr() {
                    children.push(self.parse_expr().in_role(Role::Expression));
                }
                self.expect(&TokenKind::Semi, "`;`");
                SyntaxNode::new(SyntaxKind::ReturnStatement, self.span_from(start))
                    .with_children(children)
            }
            TokenKind::Keyword(kw @ (Keyword::Break | Keyword::Continue)) => {
                self.bump();
                let mut children = Vec::new();
                if self.at_ident() {
                    children.push(self.ident(Role::Label));
                }
                self.expect(&TokenKind::Semi, "`;`");
                let kind = if kw == Keyword::Break {
                    SyntaxKind::BreakStatement
                } else {
                    SyntaxKind::ContinueStatement
                };
                SyntaxNode::new(kind, self.span_from(start)).with_children(children)
            }
            TokenKind::Keyword(Keyword::Throw) => {
                self.bump();
                let expr = self.parse_expr_or_missing(Role::Expression, "expression");
                self.expect(&TokenKind::Semi, "`;`");
                SyntaxNode::new(SyntaxKind::ThrowStatement, self.span_from(start))
                    .with_children(vec![expr])
            }
            TokenKind::Keyword(Keyword::Try) => self.parse_try(start),
            TokenKind::Keyword(Keyword::Synchronized) if self.nth_is(1, &TokenKind::OpenParen) => {
                self.bump();
                self.bump();
                let lock = self.parse_expr_or_missing(Role::Expression, "expression");
                self.expect(&TokenKind::CloseParen, "`)`");
                let body = self.parse_block(Role::Body);
                SyntaxNode::new(SyntaxKind::SynchronizedStatement, self.span_from(start))
                    .with_children(vec![lock, body])
            }
            TokenKind::Keyword(Keyword::Assert) => {
                self.bump();
                let mut children =
                    vec![self.parse_expr_or_missing(Role::Condition, "expression")];
                if self.eat(&TokenKind::Colon) {
                    children.push(self.parse_expr_or_missing(Role::Message, "expression"));
                }
                self.expect(&TokenKind::Semi, "`;`");
                SyntaxNode::new(SyntaxKind::AssertStatement, self.span_from(start))
                    .with_children(children)
            }
            TokenKind::Keyword(Keyword::This | Keyword::Super)
                if self.nth_is(1, &TokenKind::OpenParen) =>
            {
                let kind = if self.at_kw(Keyword::This) {
                    SyntaxKind::ConstructorInvocation
                } else {
                    SyntaxKind::SuperConstructorInvocation
                };
                self.bump();
                let args = self.arguments();
                self.expect(&TokenKind::Semi, "`;`");
                SyntaxNode::new(kind, self.span_from(start)).with_children(args)
            }
            TokenKind::Ident(_) if self.nth_is(1, &TokenKind::Colon) => {
                let label = self.ident(Role::Label);
                self.bump();
                let body = self.parse_sub_statement(Role::Body);
                SyntaxNode::new(SyntaxKind::LabeledStatement, self.span_from(start))
                    .with_children(vec![label, body])
            }
            _ if self.at_type_declaration_start() => {
                let modifiers = self.parse_modifiers();
                let decl = self.parse_type_declaration(start, modifiers);
                SyntaxNode::new(SyntaxKind::TypeDeclarationStatement, self.span_from(start))
                    .with_children(vec![decl.in_role(Role::Member)])
            }
            _ => match self.try_local_declaration_head() {
                Some(head) => {
                    let mut children = head;
                    children.extend(self.variable_fragments());
                    self.expect(&TokenKind::Semi, "`;`");
                    SyntaxNode::new(SyntaxKind::VariableDeclarationStatement, self.span_from(start))
                        .with_children(children)
                }
                None => {
                    let expr = self.parse_expr_or_missing(Role::Expression, "expression");
                    self.expect(&TokenKind::Semi, "`;`");
                    SyntaxNode::new(SyntaxKind::ExpressionStatement, self.span_from(start))
                        .with_children(vec![expr])
                }
            },
        };
        Some(node)
    }

    fn expect_kw(&mut self, kw: Keyword) -> bool {
        if self.eat_kw(kw) {
            return true;
        }
        let tok = self.cur().clone();
        self.emit_unexpected(&format!("`{}`", kw.as_str()), &tok);
        false
    }

    /// Modifiers and type of a local variable declaration, when one starts here.
    ///
    /// A declaration is recognized by a type followed by an identifier, or by leading
    /// modifiers. Nothing is consumed otherwise.
    fn try_local_declaration_head(&mut self) -> Option<Vec<SyntaxNode>> {
        let cp = self.checkpoint();
        let mut children = self.parse_modifiers();
        let has_modifiers = !children.is_empty();

        match self.try_type() {
            Some(ty) if self.at_ident() || has_modifiers => {
                children.push(ty);
                Some(children)
            }
            None if has_modifiers => {
                children.push(self.missing(Role::Type, "type"));
                Some(children)
            }
            _ => {
                self.rewind(cp);
                None
            }
        }
    }

    /// `( expr )` in `Condition` role.
    fn paren_condition(&mut self) -> SyntaxNode {
        self.expect(&TokenKind::OpenParen, "`(`");
        let cond = self.parse_expr_or_missing(Role::Condition, "condition");
        self.expect(&TokenKind::CloseParen, "`)`");
        cond
    }

    fn parse_if(&mut self, start: u32) -> SyntaxNode {
        self.bump();
        let cond = self.paren_condition();
        let then = self.parse_sub_statement(Role::Then);
        let mut children = vec![cond, then];
        if self.eat_kw(Keyword::Else) {
            children.push(self.parse_sub_statement(Role::Else));
        }
        let mut span = self.span_from(start);
        // A missing branch keeps the statement open up to the slot reserved for it.
        if let Some(branch) = children.last().filter(|c| c.is_missing()) {
            span.end = span.end.max(branch.span.start);
        }
        SyntaxNode::new(SyntaxKind::IfStatement, span).with_children(children)
    }

    fn parse_for(&mut self, start: u32) -> SyntaxNode {
        self.bump();
        self.expect(&TokenKind::OpenParen, "`(`");

        let mut children = Vec::new();
        let init_start = self.start();
        if let Some(head) = self.try_local_declaration_head() {
            let mut head = head;
            if self.at_ident() && self.nth_is(1, &TokenKind::Colon) {
                head.push(self.ident(Role::Name));
                let param =
                    SyntaxNode::new(SyntaxKind::SingleVariableDeclaration, self.span_from(init_start))
                        .with_children(head)
                        .in_role(Role::Parameter);
                self.bump();
                let iterable = self.parse_expr_or_missing(Role::Expression, "expression");
                self.expect(&TokenKind::CloseParen, "`)`");
                let body = self.parse_sub_statement(Role::Body);
                return SyntaxNode::new(SyntaxKind::EnhancedForStatement, self.span_from(start))
                    .with_children(vec![param, iterable, body]);
            }
            head.extend(self.variable_fragments());
            children.push(
                SyntaxNode::new(
                    SyntaxKind::VariableDeclarationExpression,
                    self.span_from(init_start),
                )
                .with_children(head)
                .in_role(Role::Init),
            );
        } else if !self.at(&TokenKind::Semi) {
            loop {
                children.push(self.parse_expr_or_missing(Role::Init, "expression"));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::Semi, "`;`");

        if !self.at(&TokenKind::Semi) {
            children.push(self.parse_expr_or_missing(Role::Condition, "condition"));
        }
        self.expect(&TokenKind::Semi, "`;`");

        if !self.at(&TokenKind::CloseParen) {
            loop {
                children.push(self.parse_expr_or_missing(Role::Update, "expression"));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::CloseParen, "`)`");
        children.push(self.parse_sub_statement(Role::Body));
        SyntaxNode::new(SyntaxKind::ForStatement, self.span_from(start)).with_children(children)
    }

    fn parse_switch(&mut self, start: u32) -> SyntaxNode {
        self.bump();
        self.expect(&TokenKind::OpenParen, "`(`");
        let selector = self.parse_expr_or_missing(Role::Expression, "expression");
        self.expect(&TokenKind::CloseParen, "`)`");

        let mut children = vec![selector];
        if self.expect(&TokenKind::OpenBrace, "`{`") {
            while !self.at(&TokenKind::CloseBrace) && !self.at(&TokenKind::Eof) {
                let case_start = self.start();
                if self.eat_kw(Keyword::Case) {
                    let label = if self.at(&TokenKind::Colon) {
                        self.missing(Role::Expression, "case label")
                    } else {
                        self.parse_expr_or_missing(Role::Expression, "case label")
                    };
                    self.expect(&TokenKind::Colon, "`:`");
                    children.push(
                        SyntaxNode::new(SyntaxKind::SwitchCase, self.span_from(case_start))
                            .with_children(vec![label])
                            .in_role(Role::Statement),
                    );
                    continue;
                }
                if self.eat_kw(Keyword::Default) {
                    self.expect(&TokenKind::Colon, "`:`");
                    children.push(
                        SyntaxNode::new(SyntaxKind::SwitchCase, self.span_from(case_start))
                            .with_text("default")
                            .in_role(Role::Statement),
                    );
                    continue;
                }
                if let Some(stmt) = self.parse_statement() {
                    children.push(stmt.in_role(Role::Statement));
                }
            }
            self.expect(&TokenKind::CloseBrace, "`}`");
        }
        SyntaxNode::new(SyntaxKind::SwitchStatement, self.span_from(start)).with_children(children)
    }

    fn parse_try(&mut self, start: u32) -> SyntaxNode {
        self.bump();
        let mut children = Vec::new();

        if self.eat(&TokenKind::OpenParen) {
            while !self.at(&TokenKind::CloseParen) && !self.at(&TokenKind::Eof) {
                let res_start = self.start();
                match self.try_local_declaration_head() {
                    Some(mut head) => {
                        head.extend(self.variable_fragments());
                        children.push(
                            SyntaxNode::new(
                                SyntaxKind::VariableDeclarationExpression,
                                self.span_from(res_start),
                            )
                            .with_children(head)
                            .in_role(Role::Resource),
                        );
                    }
                    None => {
                        children.push(self.parse_expr_or_missing(Role::Resource, "resource"));
                    }
                }
                if !self.eat(&TokenKind::Semi) {
                    break;
                }
            }
            self.expect(&TokenKind::CloseParen, "`)`");
        }

        children.push(self.parse_block(Role::Body));

        while self.at_kw(Keyword::Catch) {
            let catch_start = self.start();
            self.bump();
            self.expect(&TokenKind::OpenParen, "`(`");
            let param = self.parse_parameter(true);
            self.expect(&TokenKind::CloseParen, "`)`");
            let body = self.parse_block(Role::Body);
            children.push(
                SyntaxNode::new(SyntaxKind::CatchClause, self.span_from(catch_start))
                    .with_children(vec![param, body])
                    .in_role(Role::Catch),
            );
        }

        if self.eat_kw(Keyword::Finally) {
            children.push(self.parse_block(Role::Finally));
        }

        SyntaxNode::new(SyntaxKind::TryStatement, self.span_from(start)).with_children(children)
    }
}
