//! Completion contexts: what the caret position allows.
//!
//! [`classify`] maps every syntax kind to exactly one [`CompletionContext`]. A context then
//! refines itself into a [`Slot`] by scanning the tokens between the start of its node and
//! the caret, and each slot owns the ordered collector pipeline that runs there.

use crate::collect::{CollectorKind, TypeFilter};
use analyzer::Keyword;
use analyzer::syntax::{Role, SyntaxKind, SyntaxNode, TreePath};

mod expected;
mod scan;

pub(crate) use expected::expected_type;
pub(crate) use scan::Scan;
use scan::Delimiter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// No completion behavior.
    Null,
    CompilationUnit,
    TypeDeclaration,
    EnumDeclaration,
    AnnotationTypeDeclaration,
    AnonymousClassBody,
    EnumConstant,
    FieldDeclaration,
    MethodDeclaration,
    Parameter,
    VariableFragment,
    VariableDeclaration,
    TypeParameter,
    Block,
    Assert,
    Invocation,
    InstanceCreation,
    Do,
    While,
    EnhancedFor,
    ExpressionStatement,
    For,
    If,
    Labeled,
    Return,
    Switch,
    SwitchCase,
    Synchronized,
    Throw,
    Yield,
    Try,
    Catch,
    UnionType,
    ArrayAccess,
    ArrayCreation,
    ArrayInitializer,
    Assignment,
    Cast,
    Conditional,
    Infix,
    Instanceof,
    Lambda,
    Parenthesized,
    Prefix,
    TypeArguments,
}

/// Total mapping from node kind to context.
pub fn classify(kind: SyntaxKind) -> CompletionContext {
    use CompletionContext as C;
    use SyntaxKind::*;

    match kind {
        CompilationUnit => C::CompilationUnit,
        TypeDeclaration => C::TypeDeclaration,
        EnumDeclaration => C::EnumDeclaration,
        AnnotationTypeDeclaration => C::AnnotationTypeDeclaration,
        AnonymousClassDeclaration => C::AnonymousClassBody,
        EnumConstantDeclaration => C::EnumConstant,
        FieldDeclaration => C::FieldDeclaration,
        MethodDeclaration => C::MethodDeclaration,
        SingleVariableDeclaration => C::Parameter,
        VariableDeclarationFragment => C::VariableFragment,
        VariableDeclarationStatement | VariableDeclarationExpression => C::VariableDeclaration,
        TypeParameter => C::TypeParameter,

        Block => C::Block,
        AssertStatement => C::Assert,
        MethodInvocation
        | SuperMethodInvocation
        | ConstructorInvocation
        | SuperConstructorInvocation => C::Invocation,
        ClassInstanceCreation => C::InstanceCreation,
        DoStatement => C::Do,
        WhileStatement => C::While,
        EnhancedForStatement => C::EnhancedFor,
        ExpressionStatement => C::ExpressionStatement,
        ForStatement => C::For,
        IfStatement => C::If,
        LabeledStatement => C::Labeled,
        ReturnStatement => C::Return,
        SwitchStatement | SwitchExpression => C::Switch,
        SwitchCase => C::SwitchCase,
        SynchronizedStatement => C::Synchronized,
        ThrowStatement => C::Throw,
        YieldStatement => C::Yield,
        TryStatement => C::Try,
        CatchClause => C::Catch,
        UnionType => C::UnionType,

        ArrayAccess => C::ArrayAccess,
        ArrayCreation => C::ArrayCreation,
        ArrayInitializer => C::ArrayInitializer,
        Assignment => C::Assignment,
        CastExpression => C::Cast,
        ConditionalExpression => C::Conditional,
        InfixExpression => C::Infix,
        InstanceofExpression => C::Instanceof,
        LambdaExpression => C::Lambda,
        ParenthesizedExpression => C::Parenthesized,
        PrefixExpression => C::Prefix,
        ParameterizedType => C::TypeArguments,

        PackageDeclaration | ImportDeclaration | ModuleDeclaration
        | AnnotationTypeMemberDeclaration | Initializer | Modifier | MarkerAnnotation
        | NormalAnnotation | SingleMemberAnnotation | MemberValuePair | BreakStatement
        | ContinueStatement | EmptyStatement | TypeDeclarationStatement | BooleanLiteral
        | CharacterLiteral | FieldAccess | ExpressionMethodReference | NullLiteral
        | NumberLiteral | PostfixExpression | QualifiedName | SimpleName | StringLiteral
        | SuperFieldAccess | TextBlock | ThisExpression | TypeLiteral | ArrayType
        | IntersectionType | PrimitiveType | QualifiedType | SimpleType | WildcardType
        | Javadoc | TagElement | TextElement | MemberRef | MethodRef | MethodRefParameter
        | LineComment | BlockComment | Dimension | Missing => C::Null,
    }
}

/// A caret position inside a context, after token scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// No applicable pipeline.
    None,
    CompilationUnit,
    /// Between a type's name and its body.
    TypeHeader,
    Members,
    Parameters,
    /// After a parameter list, before the body.
    AfterParameters,
    Types { filter: TypeFilter, primitives: bool },
    Statement,
    /// Directly after the opening brace of a switch body.
    SwitchStart,
    /// After a case label or a statement inside a switch body.
    SwitchStatement,
    CaseLabel,
    Expression,
    Condition,
    /// The type after `new`.
    InstanceCreation,
}

const STATEMENT_KEYWORDS: &[Keyword] = &[
    Keyword::Assert,
    Keyword::Break,
    Keyword::Continue,
    Keyword::Do,
    Keyword::For,
    Keyword::If,
    Keyword::New,
    Keyword::Return,
    Keyword::Switch,
    Keyword::Synchronized,
    Keyword::Throw,
    Keyword::Try,
    Keyword::While,
];
const LOCAL_MODIFIERS: &[Keyword] = &[Keyword::Final];
const MEMBER_MODIFIERS: &[Keyword] = &[
    Keyword::Public,
    Keyword::Protected,
    Keyword::Private,
    Keyword::Static,
    Keyword::Final,
    Keyword::Abstract,
    Keyword::Native,
    Keyword::Synchronized,
    Keyword::Transient,
    Keyword::Volatile,
    Keyword::Strictfp,
];
const MEMBER_KEYWORDS: &[Keyword] =
    &[Keyword::Class, Keyword::Interface, Keyword::Enum, Keyword::Void];
const UNIT_KEYWORDS: &[Keyword] = &[
    Keyword::Package,
    Keyword::Import,
    Keyword::Class,
    Keyword::Interface,
    Keyword::Enum,
];
const UNIT_MODIFIERS: &[Keyword] = &[Keyword::Public, Keyword::Abstract, Keyword::Final];
const HEADER_KEYWORDS: &[Keyword] = &[Keyword::Extends, Keyword::Implements];
const THROWS: &[Keyword] = &[Keyword::Throws];
const SWITCH_LABELS: &[Keyword] = &[Keyword::Case, Keyword::Default];

impl Slot {
    /// Ordered collectors for this slot. A qualified `owner.member` abbreviation selects
    /// the member pipeline instead.
    pub(crate) fn pipeline(self, qualified: bool) -> Vec<CollectorKind> {
        use CollectorKind as K;

        if qualified {
            return match self {
                Slot::Statement | Slot::SwitchStatement => vec![
                    K::MemberInvocations,
                    K::StaticFields,
                    K::InstanceFields,
                    K::MemberTypes,
                ],
                Slot::Expression | Slot::Condition | Slot::CaseLabel => {
                    vec![K::MemberInvocations, K::StaticFields, K::InstanceFields]
                }
                Slot::Types { .. } | Slot::Members | Slot::Parameters => vec![K::MemberTypes],
                Slot::None
                | Slot::CompilationUnit
                | Slot::TypeHeader
                | Slot::AfterParameters
                | Slot::SwitchStart
                | Slot::InstanceCreation => Vec::new(),
            };
        }

        match self {
            Slot::None => Vec::new(),
            Slot::CompilationUnit => vec![K::Keywords(UNIT_KEYWORDS), K::Modifiers(UNIT_MODIFIERS)],
            Slot::TypeHeader => vec![K::Keywords(HEADER_KEYWORDS)],
            Slot::Members => vec![
                K::Modifiers(MEMBER_MODIFIERS),
                K::Keywords(MEMBER_KEYWORDS),
                K::PrimitiveTypes,
                K::DeclaredTypes(TypeFilter::Any),
                K::InnerTypes(TypeFilter::Any),
            ],
            Slot::Parameters => vec![
                K::Modifiers(LOCAL_MODIFIERS),
                K::PrimitiveTypes,
                K::DeclaredTypes(TypeFilter::Any),
                K::InnerTypes(TypeFilter::Any),
            ],
            Slot::AfterParameters => vec![K::Keywords(THROWS)],
            Slot::Types { filter, primitives } => {
                let mut kinds = Vec::new();
                if primitives {
                    kinds.push(K::PrimitiveTypes);
                }
                kinds.push(K::DeclaredTypes(filter));
                kinds.push(K::InnerTypes(filter));
                kinds
            }
            Slot::Statement => statement_pipeline(),
            Slot::SwitchStart => vec![K::Keywords(SWITCH_LABELS)],
            Slot::SwitchStatement => {
                let mut kinds = vec![K::Keywords(SWITCH_LABELS)];
                kinds.extend(statement_pipeline());
                kinds
            }
            Slot::CaseLabel => vec![K::EnumConstants, K::LocalElements],
            Slot::Expression | Slot::Condition => vec![
                K::LocalElements,
                K::Methods,
                K::StaticImports,
                K::This,
                K::Literals,
            ],
            Slot::InstanceCreation => vec![K::Constructors],
        }
    }
}

fn statement_pipeline() -> Vec<CollectorKind> {
    use CollectorKind as K;
    vec![
        K::Keywords(STATEMENT_KEYWORDS),
        K::Modifiers(LOCAL_MODIFIERS),
        K::PrimitiveTypes,
        K::DeclaredTypes(TypeFilter::Any),
        K::InnerTypes(TypeFilter::Any),
        K::LocalElements,
        K::Methods,
        K::StaticImports,
        K::This,
    ]
}

/// The context enclosing the caret and the slot it refines to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Site<'a> {
    pub(crate) context: CompletionContext,
    pub(crate) slot: Slot,
    pub(crate) node: &'a SyntaxNode,
    pub(crate) depth: usize,
}

pub(crate) fn locate<'a>(path: &TreePath<'a>, scan: &Scan<'_>) -> Site<'a> {
    let depth = path.leaf_depth();
    let node = path.leaf();
    let parent = depth.checked_sub(1).and_then(|d| path.node(d));
    let context = classify(node.kind);
    let slot = refine(context, node, parent, scan);
    tracing::debug!(?context, ?slot, kind = ?node.kind, "classified caret");
    Site {
        context,
        slot,
        node,
        depth,
    }
}

fn refine(
    context: CompletionContext,
    node: &SyntaxNode,
    parent: Option<&SyntaxNode>,
    scan: &Scan<'_>,
) -> Slot {
    use CompletionContext as C;
    use Delimiter as D;

    let caret = scan.caret();
    let before = |set: &[Delimiter]| scan.delimiter_before(node, set);
    let any_types = Slot::Types {
        filter: TypeFilter::Any,
        primitives: true,
    };
    let exceptions = Slot::Types {
        filter: TypeFilter::Exceptions,
        primitives: false,
    };

    match context {
        C::Null => Slot::None,
        C::CompilationUnit => Slot::CompilationUnit,
        C::TypeDeclaration | C::EnumDeclaration => {
            match before(&[D::OpenBrace, D::CloseBrace, D::Semi, D::Comma]) {
                Some(D::CloseBrace | D::Semi) => Slot::Members,
                Some(D::OpenBrace | D::Comma) if context == C::EnumDeclaration => {
                    if scan.delimiter_before(node, &[D::Semi]).is_some() {
                        Slot::Members
                    } else {
                        // Enum constants declare new names.
                        Slot::None
                    }
                }
                Some(D::OpenBrace) => Slot::Members,
                _ => type_header(node, scan),
            }
        }
        C::AnnotationTypeDeclaration => match before(&[D::OpenBrace]) {
            Some(_) => Slot::Members,
            None => Slot::None,
        },
        C::AnonymousClassBody => Slot::Members,
        C::EnumConstant => match before(&[D::OpenParen, D::Comma]) {
            Some(_) => Slot::Expression,
            None => Slot::None,
        },
        C::FieldDeclaration => match before(&[D::Eq, D::Comma, D::Semi]) {
            Some(D::Eq) => Slot::Expression,
            Some(_) => Slot::None,
            None => Slot::Members,
        },
        C::MethodDeclaration => {
            let delimiter = before(&[
                D::OpenParen,
                D::Comma,
                D::CloseParen,
                D::OpenBrace,
                D::Semi,
                D::CloseBrace,
            ]);
            match delimiter {
                Some(D::OpenBrace | D::Semi | D::CloseBrace) | None => Slot::None,
                Some(_) if scan.keyword_between(node.span.start, Keyword::Throws) => exceptions,
                Some(D::CloseParen) => Slot::AfterParameters,
                Some(_) => Slot::Parameters,
            }
        }
        C::Parameter => {
            let before_name = node
                .child(Role::Name)
                .is_none_or(|name| name.is_missing() || caret <= name.span.start);
            if !before_name {
                Slot::None
            } else if parent.is_some_and(|p| p.kind == SyntaxKind::CatchClause) {
                exceptions
            } else {
                any_types
            }
        }
        C::VariableFragment => match before(&[D::Eq]) {
            Some(_) => Slot::Expression,
            None => Slot::None,
        },
        C::VariableDeclaration => match before(&[D::Eq, D::Comma, D::Semi]) {
            Some(D::Eq) => Slot::Expression,
            Some(_) => Slot::None,
            None => any_types,
        },
        C::TypeParameter => match scan.keyword_before(node, &[Keyword::Extends]) {
            Some(_) => Slot::Types {
                filter: TypeFilter::Any,
                primitives: false,
            },
            None => Slot::None,
        },
        C::Block => Slot::Statement,
        C::Assert => match before(&[D::Colon]) {
            Some(_) => Slot::Expression,
            None => Slot::Condition,
        },
        C::Invocation => match before(&[D::OpenParen, D::Comma]) {
            Some(_) => Slot::Expression,
            None => Slot::None,
        },
        C::InstanceCreation => match before(&[D::OpenParen, D::Comma]) {
            Some(_) => Slot::Expression,
            None => Slot::InstanceCreation,
        },
        C::Do => match before(&[D::OpenParen]) {
            Some(_) => Slot::Condition,
            None => Slot::Statement,
        },
        C::While => match before(&[D::OpenParen, D::CloseParen]) {
            Some(D::OpenParen) => Slot::Condition,
            Some(_) => Slot::Statement,
            None => Slot::None,
        },
        C::EnhancedFor => match before(&[D::OpenParen, D::Colon, D::CloseParen]) {
            Some(D::OpenParen) => any_types,
            Some(D::Colon) => Slot::Expression,
            Some(_) => Slot::Statement,
            None => Slot::None,
        },
        C::ExpressionStatement => Slot::Expression,
        C::For => match before(&[D::OpenParen, D::Semi, D::CloseParen]) {
            Some(D::OpenParen) => Slot::Expression,
            Some(D::Semi) if scan.semicolons_since(node.span.start) == 1 => Slot::Condition,
            Some(D::Semi) => Slot::Expression,
            Some(_) => Slot::Statement,
            None => Slot::None,
        },
        C::If => {
            let after_then = node
                .child(Role::Then)
                .is_some_and(|then| !then.is_missing() && then.span.end <= caret);
            if after_then {
                return Slot::Statement;
            }
            match before(&[D::OpenParen, D::CloseParen]) {
                Some(D::OpenParen) => Slot::Condition,
                Some(_) => Slot::Statement,
                None => Slot::None,
            }
        }
        C::Labeled => match before(&[D::Colon]) {
            Some(_) => Slot::Statement,
            None => Slot::None,
        },
        C::Return | C::Throw | C::Yield => Slot::Expression,
        C::Switch => match before(&[
            D::OpenParen,
            D::CloseParen,
            D::OpenBrace,
            D::Colon,
            D::Semi,
            D::CloseBrace,
        ]) {
            Some(D::OpenParen) => Slot::Expression,
            Some(D::OpenBrace) => Slot::SwitchStart,
            Some(D::Colon | D::Semi | D::CloseBrace) => Slot::SwitchStatement,
            _ => Slot::None,
        },
        C::SwitchCase => {
            if node.text() == "default" {
                Slot::None
            } else {
                Slot::CaseLabel
            }
        }
        C::Synchronized => match before(&[D::OpenParen]) {
            Some(_) => Slot::Expression,
            None => Slot::None,
        },
        C::Try => match before(&[D::OpenParen, D::Semi, D::CloseParen, D::OpenBrace]) {
            Some(D::OpenParen | D::Semi) => Slot::Types {
                filter: TypeFilter::Classes,
                primitives: false,
            },
            _ => Slot::None,
        },
        C::Catch => match before(&[D::OpenParen, D::CloseParen]) {
            Some(D::OpenParen) => exceptions,
            _ => Slot::None,
        },
        C::UnionType => exceptions,
        C::ArrayAccess => match before(&[D::OpenBracket]) {
            Some(_) => Slot::Expression,
            None => Slot::None,
        },
        C::ArrayCreation => match before(&[D::OpenBracket, D::OpenBrace, D::Comma]) {
            Some(_) => Slot::Expression,
            None => Slot::None,
        },
        C::ArrayInitializer | C::Assignment | C::Conditional | C::Infix | C::Parenthesized
        | C::Prefix => Slot::Expression,
        C::Cast => match before(&[D::OpenParen, D::CloseParen]) {
            Some(D::OpenParen) => any_types,
            Some(_) => Slot::Expression,
            None => Slot::None,
        },
        C::Instanceof => Slot::Types {
            filter: TypeFilter::Any,
            primitives: false,
        },
        C::Lambda => match before(&[D::Arrow]) {
            Some(_) => Slot::Expression,
            None => Slot::None,
        },
        C::TypeArguments => Slot::Types {
            filter: TypeFilter::Any,
            primitives: false,
        },
    }
}

/// Caret between a type declaration's name and its body.
fn type_header(node: &SyntaxNode, scan: &Scan<'_>) -> Slot {
    match scan.keyword_before(node, HEADER_KEYWORDS) {
        Some(Keyword::Extends) if node.text() == "interface" => Slot::Types {
            filter: TypeFilter::Interfaces,
            primitives: false,
        },
        Some(Keyword::Extends) => Slot::Types {
            filter: TypeFilter::Classes,
            primitives: false,
        },
        Some(_) => Slot::Types {
            filter: TypeFilter::Interfaces,
            primitives: false,
        },
        None if node.child(Role::Name).is_some_and(|n| n.span.end <= scan.caret()) => {
            Slot::TypeHeader
        }
        None => Slot::None,
    }
}
