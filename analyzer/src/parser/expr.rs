use super::Parser;
use crate::Span;
use crate::lexer::{Keyword, LitKind, TokenKind};
use crate::syntax::{Role, SyntaxKind, SyntaxNode};

/// Infix binding powers; higher binds tighter. All infix operators are left-associative.
fn infix_binding_power(kind: &TokenKind) -> Option<(u8, &'static str)> {
    use TokenKind::*;
    Some(match kind {
        OrOr => (1, "||"),
        AndAnd => (2, "&&"),
        Pipe => (3, "|"),
        Caret => (4, "^"),
        Amp => (5, "&"),
        EqEq => (6, "=="),
        Ne => (6, "!="),
        Lt => (7, "<"),
        Gt => (7, ">"),
        Le => (7, "<="),
        Ge => (7, ">="),
        Keyword(crate::lexer::Keyword::Instanceof) => (7, "instanceof"),
        Shl => (8, "<<"),
        Plus => (9, "+"),
        Minus => (9, "-"),
        Star => (10, "*"),
        Slash => (10, "/"),
        Percent => (10, "%"),
        _ => return None,
    })
}

const SHIFT_BP: u8 = 8;

impl<'a> Parser<'a> {
    pub(super) fn can_begin_expr(&self) -> bool {
        self.cur().can_begin_expr()
    }

    /// An expression, or `Missing` in `role` when none starts at the cursor.
    pub(super) fn parse_expr_or_missing(&mut self, role: Role, what: &str) -> SyntaxNode {
        if self.can_begin_expr() {
            self.parse_expr().in_role(role)
        } else {
            self.missing(role, what)
        }
    }

    pub(super) fn parse_expr(&mut self) -> SyntaxNode {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> SyntaxNode {
        let start = self.start();
        let lhs = self.parse_conditional();

        let op = match &self.cur().kind {
            TokenKind::Eq => Some("=".to_string()),
            TokenKind::CompoundAssign(sym) => Some(sym.text.clone()),
            // `>>=` and `>>>=` arrive as `>` tokens followed by `>=`.
            TokenKind::Gt if self.gt_run_ends_with_ge() => {
                Some(format!("{}=", ">".repeat(self.adjacent_gts() + 2)))
            }
            _ => None,
        };
        let Some(op) = op else {
            return lhs;
        };

        let tokens = if op.starts_with('>') { op.len() - 1 } else { 1 };
        for _ in 0..tokens {
            self.bump();
        }
        let rhs = self.parse_rhs_assignment();
        SyntaxNode::new(SyntaxKind::Assignment, self.span_from(start))
            .with_text(op)
            .with_children(vec![lhs.in_role(Role::Left), rhs.in_role(Role::Right)])
    }

    fn parse_rhs_assignment(&mut self) -> SyntaxNode {
        if self.can_begin_expr() {
            self.parse_assignment()
        } else {
            self.missing(Role::Right, "expression")
        }
    }

    fn parse_conditional(&mut self) -> SyntaxNode {
        let start = self.start();
        let cond = self.parse_infix(1);
        if !self.eat(&TokenKind::Question) {
            return cond;
        }
        let then = self.parse_expr_or_missing(Role::Then, "expression");
        self.expect(&TokenKind::Colon, "`:`");
        let els = if self.can_begin_expr() {
            self.parse_conditional().in_role(Role::Else)
        } else {
            self.missing(Role::Else, "expression")
        };
        SyntaxNode::new(SyntaxKind::ConditionalExpression, self.span_from(start)).with_children(
            vec![cond.in_role(Role::Condition), then, els],
        )
    }

    /// Number of `>` tokens directly following the current one with no gap.
    fn adjacent_gts(&self) -> usize {
        let mut n = 0;
        let mut prev = self.cur().span;
        while self.nth_is(n + 1, &TokenKind::Gt) && self.nth(n + 1).span.start == prev.end {
            prev = self.nth(n + 1).span;
            n += 1;
        }
        n
    }

    fn gt_run_ends_with_ge(&self) -> bool {
        let n = self.adjacent_gts();
        let after = self.nth(n + 1);
        after.kind == TokenKind::Ge && after.span.start == self.nth(n).span.end
    }

    /// The infix operator at the cursor with its binding power and token count.
    fn peek_infix(&self) -> Option<(u8, String, usize)> {
        if self.at(&TokenKind::Gt) {
            if self.gt_run_ends_with_ge() {
                return None;
            }
            let extra = self.adjacent_gts();
            if extra > 0 {
                let count = (extra + 1).min(3);
                return Some((SHIFT_BP, ">".repeat(count), count));
            }
        }
        infix_binding_power(&self.cur().kind).map(|(bp, op)| (bp, op.to_string(), 1))
    }

    fn parse_infix(&mut self, min_bp: u8) -> SyntaxNode {
        let start = self.start();
        let mut lhs = self.parse_unary();

        while let Some((bp, op, count)) = self.peek_infix() {
            if bp < min_bp {
                break;
            }
            for _ in 0..count {
                self.bump();
            }

            if op == "instanceof" {
                let ty = self.parse_type(Role::Type);
                lhs = SyntaxNode::new(SyntaxKind::InstanceofExpression, self.span_from(start))
                    .with_children(vec![lhs.in_role(Role::Left), ty]);
                continue;
            }

            let rhs = if self.can_begin_expr() {
                self.parse_infix(bp + 1).in_role(Role::Right)
            } else {
                self.missing(Role::Right, "expression")
            };
            lhs = SyntaxNode::new(SyntaxKind::InfixExpression, self.span_from(start))
                .with_text(op)
                .with_children(vec![lhs.in_role(Role::Left), rhs]);
        }
        lhs
    }

    fn parse_unary(&mut self) -> SyntaxNode {
        let start = self.start();
        let op = match self.cur().kind {
            TokenKind::Bang => "!",
            TokenKind::Tilde => "~",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::OpenParen => {
                if let Some(lambda) = self.try_lambda() {
                    return lambda;
                }
                if let Some(cast) = self.try_cast() {
                    return cast;
                }
                return self.parse_postfix();
            }
            TokenKind::Ident(_) if self.nth_is(1, &TokenKind::Arrow) => {
                let param = self.ident(Role::Parameter);
                self.bump();
                return self.lambda_body(start, vec![param]);
            }
            _ => return self.parse_postfix(),
        };
        self.bump();
        let operand = if self.can_begin_expr() {
            self.parse_unary().in_role(Role::Operand)
        } else {
            self.missing(Role::Operand, "expression")
        };
        SyntaxNode::new(SyntaxKind::PrefixExpression, self.span_from(start))
            .with_text(op)
            .with_children(vec![operand])
    }

    /// `(Type) operand`, tried only when the parenthesized tokens form a type.
    fn try_cast(&mut self) -> Option<SyntaxNode> {
        let start = self.start();
        let cp = self.checkpoint();
        self.bump();
        let primitive = self.at_primitive_type();
        let ty = self.try_type();
        let cast_ok = match ty {
            Some(_) if self.at(&TokenKind::CloseParen) => {
                let next = self.nth(1);
                let operand_start = match &next.kind {
                    TokenKind::Ident(_)
                    | TokenKind::Literal(_)
                    | TokenKind::OpenParen
                    | TokenKind::Bang
                    | TokenKind::Tilde => true,
                    TokenKind::Keyword(kw) => {
                        matches!(kw, Keyword::This | Keyword::Super | Keyword::New)
                    }
                    TokenKind::Plus | TokenKind::Minus => primitive,
                    _ => false,
                };
                // `(a) + b` with a non-primitive name is a parenthesized expression.
                operand_start
            }
            _ => false,
        };
        if !cast_ok {
            self.rewind(cp);
            return None;
        }
        let ty = ty?;
        self.bump();
        let operand = self.parse_unary().in_role(Role::Operand);
        Some(
            SyntaxNode::new(SyntaxKind::CastExpression, self.span_from(start))
                .with_children(vec![ty, operand]),
        )
    }

    /// `(a, b) -> body` or `(A a) -> body`, detected by the `->` after the matching `)`.
    fn try_lambda(&mut self) -> Option<SyntaxNode> {
        let mut depth = 0usize;
        let mut n = 0usize;
        loop {
            match self.nth(n).kind {
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Eof | TokenKind::Semi | TokenKind::OpenBrace => return None,
                _ => {}
            }
            n += 1;
        }
        if !self.nth_is(n + 1, &TokenKind::Arrow) {
            return None;
        }

        let start = self.start();
        self.bump();
        let mut params = Vec::new();
        while !self.at(&TokenKind::CloseParen) && !self.at(&TokenKind::Eof) {
            let typed = !(self.at_ident()
                && (self.nth_is(1, &TokenKind::Comma) || self.nth_is(1, &TokenKind::CloseParen)));
            if typed {
                params.push(self.parse_parameter(false));
            } else {
                params.push(self.ident(Role::Parameter));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::CloseParen, "`)`");
        self.expect(&TokenKind::Arrow, "`->`");
        Some(self.lambda_body(start, params))
    }

    fn lambda_body(&mut self, start: u32, mut children: Vec<SyntaxNode>) -> SyntaxNode {
        let body = if self.at(&TokenKind::OpenBrace) {
            self.parse_block(Role::Body)
        } else {
            self.parse_expr_or_missing(Role::Body, "lambda body")
        };
        children.push(body);
        SyntaxNode::new(SyntaxKind::LambdaExpression, self.span_from(start)).with_children(children)
    }

    fn parse_postfix(&mut self) -> SyntaxNode {
        let start = self.start();
        let mut expr = self.parse_primary();

        loop {
            match &self.cur().kind {
                TokenKind::Dot => {
                    self.bump();
                    if self.at_kw(Keyword::New) {
                        expr = self.parse_creation(start, Some(expr));
                        continue;
                    }
                    if self.at_kw(Keyword::This) {
                        self.bump();
                        expr = SyntaxNode::new(SyntaxKind::ThisExpression, self.span_from(start))
                            .with_children(vec![expr.in_role(Role::Qualifier)]);
                        continue;
                    }
                    if self.at_kw(Keyword::Class) {
                        self.bump();
                        let ty = name_to_type(expr);
                        expr = SyntaxNode::new(SyntaxKind::TypeLiteral, self.span_from(start))
                            .with_children(vec![ty.in_role(Role::Type)]);
                        continue;
                    }
                    let name = self.ident(Role::Name);
                    if self.at(&TokenKind::OpenParen) {
                        let mut children = vec![expr.in_role(Role::Receiver), name];
                        children.extend(self.arguments());
                        expr = SyntaxNode::new(SyntaxKind::MethodInvocation, self.span_from(start))
                            .with_children(children);
                    } else if expr.kind.is_name() && !name.is_missing() {
                        expr = SyntaxNode::new(SyntaxKind::QualifiedName, self.span_from(start))
                            .with_children(vec![expr.in_role(Role::Qualifier), name]);
                    } else {
                        expr = SyntaxNode::new(SyntaxKind::FieldAccess, self.span_from(start))
                            .with_children(vec![expr.in_role(Role::Receiver), name]);
                    }
                }
                TokenKind::OpenBracket => {
                    self.bump();
                    let index = self.parse_expr_or_missing(Role::Index, "index expression");
                    self.expect(&TokenKind::CloseBracket, "`]`");
                    expr = SyntaxNode::new(SyntaxKind::ArrayAccess, self.span_from(start))
                        .with_children(vec![expr.in_role(Role::Receiver), index]);
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.at(&TokenKind::PlusPlus) { "++" } else { "--" };
                    self.bump();
                    expr = SyntaxNode::new(SyntaxKind::PostfixExpression, self.span_from(start))
                        .with_text(op)
                        .with_children(vec![expr.in_role(Role::Operand)]);
                }
                TokenKind::ColonColon => {
                    self.bump();
                    let name = if self.at_kw(Keyword::New) {
                        let tok = self.bump();
                        SyntaxNode::new(SyntaxKind::SimpleName, tok.span)
                            .with_text("new")
                            .in_role(Role::Name)
                    } else {
                        self.ident(Role::Name)
                    };
                    expr = SyntaxNode::new(
                        SyntaxKind::ExpressionMethodReference,
                        self.span_from(start),
                    )
                    .with_children(vec![expr.in_role(Role::Receiver), name]);
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_primary(&mut self) -> SyntaxNode {
        let start = self.start();
        match self.cur().kind.clone() {
            TokenKind::Literal(lit) => {
                let kind = match lit.kind {
                    LitKind::Int | LitKind::Long | LitKind::Float | LitKind::Double => {
                        SyntaxKind::NumberLiteral
                    }
                    LitKind::Char => SyntaxKind::CharacterLiteral,
                    LitKind::String => SyntaxKind::StringLiteral,
                    LitKind::Bool => SyntaxKind::BooleanLiteral,
                    LitKind::Null => SyntaxKind::NullLiteral,
                };
                self.leaf(kind, Role::None)
            }
            TokenKind::Ident(_) => {
                let name = self.ident(Role::Name);
                if self.at(&TokenKind::OpenParen) {
                    let mut children = vec![name];
                    children.extend(self.arguments());
                    SyntaxNode::new(SyntaxKind::MethodInvocation, self.span_from(start))
                        .with_children(children)
                } else {
                    name.in_role(Role::None)
                }
            }
            TokenKind::OpenParen => {
                self.bump();
                let inner = self.parse_expr_or_missing(Role::Expression, "expression");
                self.expect(&TokenKind::CloseParen, "`)`");
                SyntaxNode::new(SyntaxKind::ParenthesizedExpression, self.span_from(start))
                    .with_children(vec![inner])
            }
            TokenKind::Keyword(Keyword::This) => {
                let tok = self.bump();
                SyntaxNode::new(SyntaxKind::ThisExpression, tok.span)
            }
            TokenKind::Keyword(Keyword::Super) => {
                self.bump();
                if !self.expect(&TokenKind::Dot, "`.`") {
                    return SyntaxNode::missing(Role::None, self.start());
                }
                let name = self.ident(Role::Name);
                if self.at(&TokenKind::OpenParen) {
                    let mut children = vec![name];
                    children.extend(self.arguments());
                    SyntaxNode::new(SyntaxKind::SuperMethodInvocation, self.span_from(start))
                        .with_children(children)
                } else {
                    SyntaxNode::new(SyntaxKind::SuperFieldAccess, self.span_from(start))
                        .with_children(vec![name])
                }
            }
            TokenKind::Keyword(Keyword::New) => self.parse_creation(start, None),
            TokenKind::Keyword(kw) if kw.is_primitive_type() => {
                let ty = self.parse_type(Role::Type);
                if self.at(&TokenKind::Dot) && self.nth(1).is_keyword(Keyword::Class) {
                    self.bump();
                    self.bump();
                    return SyntaxNode::new(SyntaxKind::TypeLiteral, self.span_from(start))
                        .with_children(vec![ty]);
                }
                let tok = self.cur().clone();
                self.emit_unexpected("`.class`", &tok);
                ty.in_role(Role::None)
            }
            _ => self.missing(Role::None, "expression"),
        }
    }

    /// `new T(args) [body]`, `new T[n][]` or `new T[] {init}`.
    fn parse_creation(&mut self, start: u32, outer: Option<SyntaxNode>) -> SyntaxNode {
        self.bump();
        let ty = if self.at_ident() || self.at_primitive_type() {
            self.parse_non_array_type().in_role(Role::Type)
        } else {
            self.missing(Role::Type, "type")
        };

        if self.at(&TokenKind::OpenBracket) {
            let mut children = vec![ty];
            while self.eat(&TokenKind::OpenBracket) {
                let dim_start = self.last_end();
                if self.eat(&TokenKind::CloseBracket) {
                    children.push(
                        SyntaxNode::new(SyntaxKind::Dimension, Span::new(dim_start, self.last_end()))
                            .in_role(Role::Dimension),
                    );
                    continue;
                }
                children.push(self.parse_expr_or_missing(Role::Dimension, "dimension expression"));
                self.expect(&TokenKind::CloseBracket, "`]`");
            }
            if self.at(&TokenKind::OpenBrace) {
                children.push(self.parse_array_initializer(Role::Initializer));
            }
            return SyntaxNode::new(SyntaxKind::ArrayCreation, self.span_from(start))
                .with_children(children);
        }

        let mut children = Vec::new();
        if let Some(outer) = outer {
            children.push(outer.in_role(Role::Receiver));
        }
        children.push(ty);
        if self.at(&TokenKind::OpenParen) {
            children.extend(self.arguments());
        } else {
            let tok = self.cur().clone();
            self.emit_unexpected("`(`", &tok);
        }
        if self.at(&TokenKind::OpenBrace) {
            let body_start = self.start();
            let members = self.parse_class_body_members();
            children.push(
                SyntaxNode::new(SyntaxKind::AnonymousClassDeclaration, self.span_from(body_start))
                    .with_children(members)
                    .in_role(Role::Body),
            );
        }
        SyntaxNode::new(SyntaxKind::ClassInstanceCreation, self.span_from(start))
            .with_children(children)
    }

    pub(super) fn parse_array_initializer(&mut self, role: Role) -> SyntaxNode {
        let start = self.start();
        self.bump();
        let mut elements = Vec::new();
        while !self.at(&TokenKind::CloseBrace) && !self.at(&TokenKind::Eof) {
            let element = if self.at(&TokenKind::OpenBrace) {
                self.parse_array_initializer(Role::Element)
            } else {
                self.parse_expr_or_missing(Role::Element, "expression")
            };
            elements.push(element);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::CloseBrace, "`}`");
        SyntaxNode::new(SyntaxKind::ArrayInitializer, self.span_from(start))
            .with_children(elements)
            .in_role(role)
    }

    /// `(a, b)` as `Argument` children. An empty slot between commas becomes `Missing`.
    pub(super) fn arguments(&mut self) -> Vec<SyntaxNode> {
        let mut args = Vec::new();
        self.bump();
        if self.eat(&TokenKind::CloseParen) {
            return args;
        }
        loop {
            args.push(self.parse_expr_or_missing(Role::Argument, "argument"));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::CloseParen, "`)`");
        args
    }
}

/// Reinterprets a name expression as a type (for `Name.class`).
fn name_to_type(expr: SyntaxNode) -> SyntaxNode {
    if expr.kind.is_name() {
        let span = expr.span;
        SyntaxNode::new(SyntaxKind::SimpleType, span).with_children(vec![expr.in_role(Role::Name)])
    } else {
        expr
    }
}
