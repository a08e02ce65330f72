//! Ancestor chains from the compilation root down to the node enclosing an offset.

use super::node::SyntaxNode;

/// The ordered ancestor chain of syntax nodes covering an offset.
///
/// `nodes()[0]` is the root and `leaf()` is the innermost non-`Missing` node covering the
/// offset. A child covers offset `o` when `start < o < end`, or when it holds a `Missing`
/// descendant starting exactly at `o` (the empty slot the parser reserved there).
#[derive(Debug, Clone)]
pub struct TreePath<'a> {
    nodes: Vec<&'a SyntaxNode>,
    /// `indices[i]` is the child index of `nodes[i + 1]` inside `nodes[i]`.
    indices: Vec<usize>,
}

impl<'a> TreePath<'a> {
    pub fn at(root: &'a SyntaxNode, offset: u32) -> TreePath<'a> {
        let mut nodes = vec![root];
        let mut indices = Vec::new();
        let mut cur = root;

        loop {
            let next = cur.children.iter().enumerate().find(|(_, child)| {
                !child.is_missing()
                    && (child.span.strictly_contains(offset) || child.has_missing_at(offset))
            });
            match next {
                Some((idx, child)) => {
                    indices.push(idx);
                    nodes.push(child);
                    cur = child;
                }
                None => break,
            }
        }

        TreePath { nodes, indices }
    }

    pub fn root(&self) -> &'a SyntaxNode {
        self.nodes[0]
    }

    pub fn leaf(&self) -> &'a SyntaxNode {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn nodes(&self) -> &[&'a SyntaxNode] {
        &self.nodes
    }

    pub fn node(&self, depth: usize) -> Option<&'a SyntaxNode> {
        self.nodes.get(depth).copied()
    }

    /// Depth of the innermost node.
    pub fn leaf_depth(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Child index of the node at `depth` inside its parent (`None` for the root).
    pub fn index_in_parent(&self, depth: usize) -> Option<usize> {
        depth.checked_sub(1).and_then(|i| self.indices.get(i).copied())
    }

    /// Innermost-first `(depth, node)` pairs.
    pub fn ancestors(&self) -> impl Iterator<Item = (usize, &'a SyntaxNode)> + '_ {
        self.nodes.iter().copied().enumerate().rev()
    }

    /// Returns a new root in which the node at `depth` is replaced by `replacement`.
    ///
    /// Every ancestor above `depth` is rebuilt; nothing in the original tree changes.
    pub fn rebuild(&self, depth: usize, replacement: SyntaxNode) -> SyntaxNode {
        let depth = depth.min(self.leaf_depth());
        let mut rebuilt = replacement.in_role(self.nodes[depth].role);
        for d in (0..depth).rev() {
            rebuilt = self.nodes[d].with_child(self.indices[d], rebuilt);
        }
        rebuilt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;
    use crate::syntax::{Role, SyntaxKind};

    fn leaf(kind: SyntaxKind, start: u32, end: u32) -> SyntaxNode {
        SyntaxNode::new(kind, Span::new(start, end))
    }

    #[test]
    fn descends_to_innermost_strictly_covering_node() {
        let block = leaf(SyntaxKind::Block, 5, 30).with_children(vec![
            leaf(SyntaxKind::ExpressionStatement, 7, 12).in_role(Role::Statement),
            leaf(SyntaxKind::ExpressionStatement, 14, 20).in_role(Role::Statement),
        ]);
        let root = leaf(SyntaxKind::CompilationUnit, 0, 40).with_children(vec![block]);

        let path = TreePath::at(&root, 13);
        assert_eq!(path.leaf().kind, SyntaxKind::Block);
        assert_eq!(path.len(), 2);

        let path = TreePath::at(&root, 15);
        assert_eq!(path.leaf().kind, SyntaxKind::ExpressionStatement);
        assert_eq!(path.index_in_parent(2), Some(1));
    }

    #[test]
    fn missing_slot_at_offset_pulls_the_path_into_its_owner() {
        let stmt = leaf(SyntaxKind::ReturnStatement, 0, 8)
            .with_children(vec![SyntaxNode::missing(Role::Expression, 8)]);
        let root = leaf(SyntaxKind::Block, 0, 10).with_children(vec![stmt.in_role(Role::Statement)]);

        let path = TreePath::at(&root, 8);
        assert_eq!(path.leaf().kind, SyntaxKind::ReturnStatement);
    }

    #[test]
    fn rebuild_replaces_only_the_target() {
        let stmt = leaf(SyntaxKind::EmptyStatement, 2, 3).in_role(Role::Statement);
        let root = leaf(SyntaxKind::Block, 0, 6).with_children(vec![stmt.clone(), stmt]);

        let path = TreePath::at(&root, 1);
        assert_eq!(path.leaf_depth(), 0);

        let replaced = path.rebuild(0, leaf(SyntaxKind::Block, 0, 0));
        assert_eq!(replaced.kind, SyntaxKind::Block);
        assert!(replaced.children.is_empty());
        assert_eq!(root.children.len(), 2);
    }
}
