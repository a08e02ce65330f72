use super::kind::{Role, SyntaxKind};
use crate::Span;

/// Rendered text of a [`SyntaxKind::Missing`] node: the unresolved/error marker.
pub const MISSING_MARKER: &str = "$missing$";

/// An immutable syntax tree node.
///
/// - `role` names the slot the node fills in its parent.
/// - `text` carries the spelling of leaves (names, literals, modifiers) and the operator or
///   flavor of interior nodes (`"+"` for an infix expression, `"class"` vs `"interface"`).
/// - `span` is a half-open byte range into the parsed source; synthesized nodes carry
///   [`Span::DETACHED`].
///
/// Nodes are never mutated in place. Rewrites build a new node (`with_child`,
/// `with_inserted_child`) and rebuild the ancestors through a [`super::TreePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub role: Role,
    pub span: Span,
    pub text: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, span: Span) -> SyntaxNode {
        SyntaxNode {
            kind,
            role: Role::None,
            span,
            text: None,
            children: Vec::new(),
        }
    }

    /// A synthesized node with no source position.
    pub fn detached(kind: SyntaxKind) -> SyntaxNode {
        SyntaxNode::new(kind, Span::DETACHED)
    }

    pub fn missing(role: Role, offset: u32) -> SyntaxNode {
        SyntaxNode::new(SyntaxKind::Missing, Span::empty(offset)).in_role(role)
    }

    pub fn in_role(mut self, role: Role) -> SyntaxNode {
        self.role = role;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> SyntaxNode {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> SyntaxNode {
        self.children = children;
        self
    }

    pub fn push(&mut self, child: SyntaxNode) {
        self.children.push(child);
    }

    pub fn is_missing(&self) -> bool {
        self.kind == SyntaxKind::Missing
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// First child filling `role`.
    pub fn child(&self, role: Role) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.role == role)
    }

    pub fn child_index(&self, role: Role) -> Option<usize> {
        self.children.iter().position(|c| c.role == role)
    }

    pub fn children_with(&self, role: Role) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.children.iter().filter(move |c| c.role == role)
    }

    /// `(index into children, child)` for every child filling `role`.
    pub fn indexed_children_with(
        &self,
        role: Role,
    ) -> impl Iterator<Item = (usize, &SyntaxNode)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.role == role)
    }

    /// Text of the `Name` child, when it is a simple name.
    pub fn name(&self) -> Option<&str> {
        let name = self.child(Role::Name)?;
        match name.kind {
            SyntaxKind::SimpleName => name.text.as_deref(),
            SyntaxKind::QualifiedName => name.child(Role::Name).and_then(|n| n.text.as_deref()),
            _ => None,
        }
    }

    /// Dotted spelling of a `SimpleName`/`QualifiedName` subtree.
    pub fn qualified_name(&self) -> Option<String> {
        match self.kind {
            SyntaxKind::SimpleName => self.text.clone(),
            SyntaxKind::QualifiedName => {
                let qualifier = self.child(Role::Qualifier)?.qualified_name()?;
                let name = self.child(Role::Name)?.text.as_deref()?;
                Some(format!("{qualifier}.{name}"))
            }
            _ => None,
        }
    }

    pub fn has_modifier(&self, keyword: &str) -> bool {
        self.children_with(Role::Modifier)
            .any(|m| m.kind == SyntaxKind::Modifier && m.text() == keyword)
    }

    /// Whether this node or any descendant is a `Missing` node.
    pub fn contains_missing(&self) -> bool {
        self.is_missing() || self.children.iter().any(SyntaxNode::contains_missing)
    }

    /// Whether a `Missing` descendant (or this node) sits exactly at `offset`.
    pub fn has_missing_at(&self, offset: u32) -> bool {
        if self.is_missing() {
            return self.span.start == offset;
        }
        self.children.iter().any(|c| c.has_missing_at(offset))
    }

    /// Child-index path (relative to `self`) of the `Missing` descendant closest to `offset`.
    ///
    /// Ties keep the first one in source order.
    pub fn nearest_missing(&self, offset: u32) -> Option<Vec<usize>> {
        fn walk(
            node: &SyntaxNode,
            offset: u32,
            prefix: &mut Vec<usize>,
            best: &mut Option<(u32, Vec<usize>)>,
        ) {
            for (idx, child) in node.children.iter().enumerate() {
                prefix.push(idx);
                if child.is_missing() {
                    let distance = child.span.start.abs_diff(offset);
                    if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                        *best = Some((distance, prefix.clone()));
                    }
                } else {
                    walk(child, offset, prefix, best);
                }
                prefix.pop();
            }
        }

        if self.is_missing() {
            return Some(Vec::new());
        }
        let mut best = None;
        walk(self, offset, &mut Vec::new(), &mut best);
        best.map(|(_, path)| path)
    }

    /// Descendant reached by following child indices.
    pub fn descendant(&self, path: &[usize]) -> Option<&SyntaxNode> {
        let mut node = self;
        for &idx in path {
            node = node.children.get(idx)?;
        }
        Some(node)
    }

    /// A copy of `self` with the child at `index` replaced.
    ///
    /// The replacement takes over the role of the child it replaces.
    pub fn with_child(&self, index: usize, replacement: SyntaxNode) -> SyntaxNode {
        let mut rebuilt = self.clone();
        if let Some(slot) = rebuilt.children.get_mut(index) {
            let role = slot.role;
            *slot = replacement.in_role(role);
        }
        rebuilt
    }

    /// A copy of `self` with `child` inserted at `index` (clamped to the child count).
    pub fn with_inserted_child(&self, index: usize, child: SyntaxNode) -> SyntaxNode {
        let mut rebuilt = self.clone();
        let index = index.min(rebuilt.children.len());
        rebuilt.children.insert(index, child);
        rebuilt
    }

    /// A copy of `self` with the descendant at `path` replaced, rebuilding every node on
    /// the way down.
    pub fn with_descendant(&self, path: &[usize], replacement: SyntaxNode) -> SyntaxNode {
        match path.split_first() {
            None => replacement.in_role(self.role),
            Some((&idx, rest)) => match self.children.get(idx) {
                Some(child) => self.with_child(idx, child.with_descendant(rest, replacement)),
                None => self.clone(),
            },
        }
    }

    /// Pre-order traversal of `self` and every descendant.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
