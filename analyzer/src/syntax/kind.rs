//! Node kinds and child roles of the syntax tree.

/// Every node kind the grammar defines.
///
/// The set is closed: IDE code matches on it exhaustively, so adding a kind forces every
/// classifier and insertion rule to decide what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    // Declarations.
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    ModuleDeclaration,
    TypeDeclaration,
    EnumDeclaration,
    AnnotationTypeDeclaration,
    AnnotationTypeMemberDeclaration,
    AnonymousClassDeclaration,
    EnumConstantDeclaration,
    FieldDeclaration,
    MethodDeclaration,
    Initializer,
    SingleVariableDeclaration,
    VariableDeclarationFragment,
    TypeParameter,
    Modifier,
    MarkerAnnotation,
    NormalAnnotation,
    SingleMemberAnnotation,
    MemberValuePair,

    // Statements.
    Block,
    AssertStatement,
    BreakStatement,
    ConstructorInvocation,
    ContinueStatement,
    DoStatement,
    EmptyStatement,
    EnhancedForStatement,
    ExpressionStatement,
    ForStatement,
    IfStatement,
    LabeledStatement,
    ReturnStatement,
    SuperConstructorInvocation,
    SwitchStatement,
    SwitchCase,
    SynchronizedStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    TypeDeclarationStatement,
    VariableDeclarationStatement,
    WhileStatement,
    YieldStatement,

    // Expressions.
    ArrayAccess,
    ArrayCreation,
    ArrayInitializer,
    Assignment,
    BooleanLiteral,
    CastExpression,
    CharacterLiteral,
    ClassInstanceCreation,
    ConditionalExpression,
    FieldAccess,
    InfixExpression,
    InstanceofExpression,
    LambdaExpression,
    MethodInvocation,
    ExpressionMethodReference,
    NullLiteral,
    NumberLiteral,
    ParenthesizedExpression,
    PostfixExpression,
    PrefixExpression,
    QualifiedName,
    SimpleName,
    StringLiteral,
    SuperFieldAccess,
    SuperMethodInvocation,
    SwitchExpression,
    TextBlock,
    ThisExpression,
    TypeLiteral,
    VariableDeclarationExpression,

    // Types.
    ArrayType,
    IntersectionType,
    ParameterizedType,
    PrimitiveType,
    QualifiedType,
    SimpleType,
    UnionType,
    WildcardType,

    // Documentation and comments.
    Javadoc,
    TagElement,
    TextElement,
    MemberRef,
    MethodRef,
    MethodRefParameter,
    LineComment,
    BlockComment,

    // Miscellaneous.
    Dimension,
    /// Error-recovery placeholder for an absent expression, statement, type or name.
    Missing,
}

impl SyntaxKind {
    pub fn is_statement(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            Block
                | AssertStatement
                | BreakStatement
                | ConstructorInvocation
                | ContinueStatement
                | DoStatement
                | EmptyStatement
                | EnhancedForStatement
                | ExpressionStatement
                | ForStatement
                | IfStatement
                | LabeledStatement
                | ReturnStatement
                | SuperConstructorInvocation
                | SwitchStatement
                | SwitchCase
                | SynchronizedStatement
                | ThrowStatement
                | TryStatement
                | TypeDeclarationStatement
                | VariableDeclarationStatement
                | WhileStatement
                | YieldStatement
        )
    }

    pub fn is_type(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            ArrayType
                | IntersectionType
                | ParameterizedType
                | PrimitiveType
                | QualifiedType
                | SimpleType
                | UnionType
                | WildcardType
        )
    }

    pub fn is_name(self) -> bool {
        matches!(self, SyntaxKind::SimpleName | SyntaxKind::QualifiedName)
    }

    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::TypeDeclaration
                | SyntaxKind::EnumDeclaration
                | SyntaxKind::AnnotationTypeDeclaration
        )
    }
}

/// The structural slot a node fills inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The root, or a node that has not been placed yet.
    None,
    Package,
    Import,
    Member,
    Modifier,
    Name,
    Qualifier,
    Label,
    TypeParameter,
    Bound,
    SuperClass,
    SuperInterface,
    EnumConstant,
    Type,
    ReturnType,
    Parameter,
    Throws,
    Body,
    Fragment,
    Initializer,
    Statement,
    Expression,
    Condition,
    Then,
    Else,
    Init,
    Update,
    Message,
    Receiver,
    Argument,
    Left,
    Right,
    Operand,
    TypeArgument,
    Element,
    Index,
    Dimension,
    Resource,
    Catch,
    Finally,
}
