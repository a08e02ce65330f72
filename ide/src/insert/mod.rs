//! Synthesis and insertion.
//!
//! An expression fragment is spliced by climbing the tree path from the caret's node towards
//! the root until a node kind that can host it is found. That node is rebuilt around the new
//! fragment and every ancestor is rebuilt around it in turn; the original tree is never
//! touched. Keywords, modifiers and types are inserted as text followed by a space and the
//! document is reparsed, since they start a construct the user keeps typing.

use crate::edit::{Insertion, apply_edits};
use crate::error::EngineError;
use crate::fragment::{Built, Fragment};
use crate::text_edit::rebase_cursor;
use analyzer::syntax::{MISSING_MARKER, Role, SyntaxKind, SyntaxNode, TreePath, render};
use analyzer::{ParseOutput, Span, TextEdit, parse};

mod imports;

/// How a node kind takes part in insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertableKind {
    /// Statement lists, including switch bodies.
    Block,
    Return,
    Assert,
    /// `if`, `while` and `do`.
    Conditional,
    EnhancedFor,
    For,
    ExpressionStatement,
    SwitchCase,
    Catch,
    Variable,
    /// Argument lists of calls and enum constants.
    Invocation,
    Creation,
    Assignment,
    Parenthesized,
    /// `throw`, `yield`, `synchronized` and labeled statements.
    ExpressionSlot,
    /// Hosts keywords and types only.
    Declaration,
    /// Cannot host anything itself; insertion climbs to the parent.
    PassThrough,
    Null,
}

impl InsertableKind {
    fn of(kind: SyntaxKind) -> InsertableKind {
        use InsertableKind as I;
        use SyntaxKind::*;

        match kind {
            Block | SwitchStatement | SwitchExpression => I::Block,
            ReturnStatement => I::Return,
            AssertStatement => I::Assert,
            IfStatement | WhileStatement | DoStatement => I::Conditional,
            EnhancedForStatement => I::EnhancedFor,
            ForStatement => I::For,
            ExpressionStatement => I::ExpressionStatement,
            SwitchCase => I::SwitchCase,
            CatchClause => I::Catch,
            VariableDeclarationFragment => I::Variable,
            MethodInvocation
            | SuperMethodInvocation
            | ConstructorInvocation
            | SuperConstructorInvocation
            | EnumConstantDeclaration => I::Invocation,
            ClassInstanceCreation => I::Creation,
            Assignment => I::Assignment,
            ParenthesizedExpression => I::Parenthesized,
            ThrowStatement | YieldStatement | SynchronizedStatement | LabeledStatement => {
                I::ExpressionSlot
            }

            CompilationUnit | TypeDeclaration | EnumDeclaration | AnnotationTypeDeclaration
            | AnonymousClassDeclaration | FieldDeclaration | MethodDeclaration | Initializer
            | TypeDeclarationStatement | TryStatement => I::Declaration,

            ArrayAccess | ArrayCreation | ArrayInitializer | BooleanLiteral | CastExpression
            | CharacterLiteral | ConditionalExpression | FieldAccess | InfixExpression
            | InstanceofExpression | LambdaExpression | ExpressionMethodReference | NullLiteral
            | NumberLiteral | PostfixExpression | PrefixExpression | QualifiedName | SimpleName
            | StringLiteral | SuperFieldAccess | TextBlock | ThisExpression | TypeLiteral
            | VariableDeclarationExpression | VariableDeclarationStatement
            | SingleVariableDeclaration | ArrayType | IntersectionType | ParameterizedType
            | PrimitiveType | QualifiedType | SimpleType | UnionType | WildcardType
            | Dimension => I::PassThrough,

            PackageDeclaration | ImportDeclaration | ModuleDeclaration
            | AnnotationTypeMemberDeclaration | TypeParameter | Modifier | MarkerAnnotation
            | NormalAnnotation | SingleMemberAnnotation | MemberValuePair | BreakStatement
            | ContinueStatement | EmptyStatement | Javadoc | TagElement | TextElement
            | MemberRef | MethodRef | MethodRefParameter | LineComment | BlockComment
            | Missing => I::Null,
        }
    }
}

/// Where the fragment text goes and the tree that results, when known without reparsing.
struct Splice {
    edit: TextEdit,
    root: Option<SyntaxNode>,
}

/// Synthesizes `fragment` and splices it at `caret`.
///
/// `Ok(None)` means there is no legal insertion point; nothing is changed.
pub(crate) fn insert(
    source: &str,
    parsed: &ParseOutput,
    caret: u32,
    fragment: &Fragment,
) -> Result<Option<Insertion>, EngineError> {
    let splice = match fragment.synthesize() {
        Built::Word(word) => textual(source, caret, word, true),
        Built::Type(node) => textual(source, caret, &render(&node), false),
        Built::Expr(expr) => {
            let path = TreePath::at(&parsed.unit, caret);
            match climb(source, &path, caret, expr) {
                Some(splice) => splice,
                None => {
                    tracing::debug!(fragment = %fragment.display(), "no insertion point");
                    return Ok(None);
                }
            }
        }
    };

    let mut edits = vec![splice.edit.clone()];
    let mut import = None;
    if let Some(qualified) = fragment.import() {
        if !imports::already_imported(&parsed.unit, qualified) {
            let (edit, index) = imports::import_edit(&parsed.unit, qualified);
            tracing::debug!(import = qualified, "adding import");
            edits.push(edit);
            import = Some((index, qualified));
        }
    }
    edits.sort_by_key(|e| (e.range.start, e.range.end));
    let cursor = rebase_cursor(&edits, splice.edit.range.end);

    let root = match splice.root {
        Some(root) => match import {
            Some((index, qualified)) => {
                root.with_inserted_child(index, imports::import_node(qualified))
            }
            None => root,
        },
        None => parse(&apply_edits(source, edits.clone(), caret)?.source).unit,
    };

    Ok(Some(Insertion {
        edits,
        cursor,
        root,
    }))
}

fn textual(source: &str, caret: u32, text: &str, always_space: bool) -> Splice {
    let next = source.get(caret as usize..).and_then(|s| s.chars().next());
    let closer = next.is_some_and(|c| c.is_whitespace() || ")>],;".contains(c));
    let mut text = padded(source, caret, caret, text.to_string());
    if always_space || !closer {
        text.push(' ');
    }
    Splice {
        edit: TextEdit::insert(caret, text),
        root: None,
    }
}

/// Climbs from the caret's node to the first node kind that can host `expr`.
fn climb(source: &str, path: &TreePath<'_>, caret: u32, expr: SyntaxNode) -> Option<Splice> {
    let leaf = path.leaf_depth();
    for (depth, node) in path.ancestors() {
        let kind = InsertableKind::of(node.kind);
        tracing::trace!(?kind, depth, "insertion climb");

        let rewritten = match kind {
            InsertableKind::PassThrough => continue,
            InsertableKind::Null | InsertableKind::Declaration => return None,
            InsertableKind::Block if depth != leaf => return None,
            InsertableKind::Block => block(source, node, caret, expr),
            InsertableKind::Return => match adjacent_missing(source, node, caret) {
                Some(missing) => replace_missing(source, node, &missing, caret, expr),
                None if node.child(Role::Expression).is_none() => {
                    let edit = TextEdit::insert(caret, padded(source, caret, caret, render(&expr)));
                    let rebuilt = node.with_inserted_child(
                        node.children.len(),
                        expr.in_role(Role::Expression),
                    );
                    Some((edit, rebuilt))
                }
                None => None,
            },
            InsertableKind::Invocation => erroneous_argument(node, caret, expr),
            InsertableKind::Creation => creation(source, node, caret, expr),
            InsertableKind::Assert
            | InsertableKind::Conditional
            | InsertableKind::EnhancedFor
            | InsertableKind::For
            | InsertableKind::ExpressionStatement
            | InsertableKind::SwitchCase
            | InsertableKind::Catch
            | InsertableKind::Variable
            | InsertableKind::Assignment
            | InsertableKind::Parenthesized
            | InsertableKind::ExpressionSlot => {
                let missing = adjacent_missing(source, node, caret)?;
                replace_missing(source, node, &missing, caret, expr)
            }
        };

        let (edit, rebuilt) = rewritten?;
        return Some(Splice {
            edit,
            root: Some(path.rebuild(depth, rebuilt)),
        });
    }
    None
}

/// Statement index for an insertion at `caret`: before the first child starting at or after
/// the caret.
pub(crate) fn block_index(block: &SyntaxNode, caret: u32) -> usize {
    block.children.partition_point(|c| c.span.start < caret)
}

fn block(
    source: &str,
    node: &SyntaxNode,
    caret: u32,
    expr: SyntaxNode,
) -> Option<(TextEdit, SyntaxNode)> {
    if let Some(missing) = adjacent_missing(source, node, caret) {
        return replace_missing(source, node, &missing, caret, expr);
    }
    let index = block_index(node, caret);
    let statement = expression_statement(expr);
    tracing::debug!(index, "inserting statement");
    let edit = TextEdit::insert(caret, padded(source, caret, caret, render(&statement)));
    Some((edit, node.with_inserted_child(index, statement)))
}

/// The first argument still holding an unresolved marker. Without one there is no target.
fn erroneous_argument(
    node: &SyntaxNode,
    caret: u32,
    expr: SyntaxNode,
) -> Option<(TextEdit, SyntaxNode)> {
    let Some((index, argument)) = node
        .indexed_children_with(Role::Argument)
        .find(|(_, arg)| render(arg).contains(MISSING_MARKER))
    else {
        tracing::debug!("invocation has no erroneous argument");
        return None;
    };
    let mut path = vec![index];
    path.extend(argument.nearest_missing(caret)?);
    let missing = node.descendant(&path)?;
    let edit = TextEdit::insert(missing.span.start, render(&expr));
    Some((edit, node.with_descendant(&path, expr)))
}

/// `new |` with no type yet takes the whole constructor call; otherwise the arguments.
fn creation(
    source: &str,
    node: &SyntaxNode,
    caret: u32,
    expr: SyntaxNode,
) -> Option<(TextEdit, SyntaxNode)> {
    let untyped = node.child(Role::Type).is_none_or(SyntaxNode::is_missing);
    if untyped && expr.kind == SyntaxKind::ClassInstanceCreation {
        // The span of `new` stops before the whitespace the caret sits in.
        let span = Span::new(node.span.start, node.span.end.max(caret));
        let text = padded(source, span.start, span.end, render(&expr));
        return Some((TextEdit::replace(span, text), expr));
    }
    erroneous_argument(node, caret, expr)
}

/// Child-index path of a `Missing` inside `node` separated from the caret by whitespace only.
fn adjacent_missing(source: &str, node: &SyntaxNode, caret: u32) -> Option<Vec<usize>> {
    let path = node.nearest_missing(caret)?;
    let missing = node.descendant(&path)?;
    let (from, to) = if missing.span.start <= caret {
        (missing.span.start, caret)
    } else {
        (caret, missing.span.start)
    };
    let gap = source.get(from as usize..to as usize)?;
    gap.chars().all(char::is_whitespace).then_some(path)
}

fn replace_missing(
    source: &str,
    node: &SyntaxNode,
    path: &[usize],
    caret: u32,
    expr: SyntaxNode,
) -> Option<(TextEdit, SyntaxNode)> {
    let missing = node.descendant(path)?;
    let replacement = match missing.role {
        Role::Type | Role::ReturnType | Role::Name => return None,
        Role::Statement | Role::Then | Role::Else | Role::Body => expression_statement(expr),
        _ => expr,
    };
    let edit = TextEdit::insert(caret, padded(source, caret, caret, render(&replacement)));
    Some((edit, node.with_descendant(path, replacement)))
}

fn expression_statement(expr: SyntaxNode) -> SyntaxNode {
    SyntaxNode::detached(SyntaxKind::ExpressionStatement)
        .in_role(Role::Statement)
        .with_children(vec![expr.in_role(Role::Expression)])
}

/// Adds a space on either side where `text` would run into an adjacent identifier.
fn padded(source: &str, start: u32, end: u32, text: String) -> String {
    let ident = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    let before = source
        .get(..start as usize)
        .and_then(|s| s.chars().next_back());
    let after = source.get(end as usize..).and_then(|s| s.chars().next());

    let mut out = String::with_capacity(text.len() + 2);
    if before.is_some_and(ident) && text.starts_with(ident) {
        out.push(' ');
    }
    out.push_str(&text);
    if after.is_some_and(ident) && text.ends_with(ident) {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(start: u32, end: u32) -> SyntaxNode {
        SyntaxNode::new(SyntaxKind::ExpressionStatement, Span::new(start, end))
            .in_role(Role::Statement)
    }

    #[test]
    fn block_index_between_statements() {
        let block = SyntaxNode::new(SyntaxKind::Block, Span::new(0, 50))
            .with_children(vec![statement(10, 20), statement(40, 48)]);
        assert_eq!(block_index(&block, 25), 1);
        assert_eq!(block_index(&block, 5), 0);
        assert_eq!(block_index(&block, 49), 2);
        assert_eq!(block_index(&block, 10), 0);
    }

    #[test]
    fn padding_only_between_identifiers() {
        assert_eq!(padded("return;", 6, 6, "x".into()), " x");
        assert_eq!(padded("f(a, )", 5, 5, "b".into()), "b");
        assert_eq!(padded("a=b", 2, 2, "c".into()), "c ");
    }

    #[test]
    fn insertable_kinds() {
        assert_eq!(InsertableKind::of(SyntaxKind::SwitchStatement), InsertableKind::Block);
        assert_eq!(InsertableKind::of(SyntaxKind::InfixExpression), InsertableKind::PassThrough);
        assert_eq!(InsertableKind::of(SyntaxKind::ImportDeclaration), InsertableKind::Null);
        assert_eq!(
            InsertableKind::of(SyntaxKind::EnumConstantDeclaration),
            InsertableKind::Invocation
        );
    }
}
