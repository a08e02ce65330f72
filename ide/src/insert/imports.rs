use crate::fragment::name_node;
use analyzer::TextEdit;
use analyzer::syntax::{Role, SyntaxKind, SyntaxNode};

/// Text edit and tree node adding `import qualified;` to the unit.
///
/// The declaration goes after the last import, else after the package declaration, else at
/// the top of the file.
pub(super) fn import_edit(unit: &SyntaxNode, qualified: &str) -> (TextEdit, usize) {
    let imports: Vec<(usize, &SyntaxNode)> = unit.indexed_children_with(Role::Import).collect();
    if let Some(&(index, last)) = imports.last() {
        return (
            TextEdit::insert(last.span.end, format!("\nimport {qualified};")),
            index + 1,
        );
    }
    match unit
        .children
        .iter()
        .position(|c| c.kind == SyntaxKind::PackageDeclaration)
    {
        Some(index) => (
            TextEdit::insert(
                unit.children[index].span.end,
                format!("\n\nimport {qualified};"),
            ),
            index + 1,
        ),
        None => (TextEdit::insert(0, format!("import {qualified};\n\n")), 0),
    }
}

pub(super) fn import_node(qualified: &str) -> SyntaxNode {
    SyntaxNode::detached(SyntaxKind::ImportDeclaration)
        .in_role(Role::Import)
        .with_children(vec![name_node(qualified).in_role(Role::Name)])
}

/// Whether `unit` already imports exactly `qualified`.
pub(super) fn already_imported(unit: &SyntaxNode, qualified: &str) -> bool {
    unit.children_with(Role::Import).any(|import| {
        !import.has_modifier("static")
            && import.text() != "*"
            && import
                .child(Role::Name)
                .and_then(SyntaxNode::qualified_name)
                .is_some_and(|name| name == qualified)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::parse;
    use analyzer::syntax::render;

    #[test]
    fn placement_follows_existing_header() {
        let unit = parse("package app;\nimport java.util.List;\nclass A {}").unit;
        let (edit, index) = import_edit(&unit, "java.util.Scanner");
        assert_eq!(edit.new_text, "\nimport java.util.Scanner;");
        assert_eq!(edit.range.start, 35);
        assert_eq!(index, 2);

        let unit = parse("package app;\nclass A {}").unit;
        let (edit, index) = import_edit(&unit, "java.util.Scanner");
        assert_eq!(edit.new_text, "\n\nimport java.util.Scanner;");
        assert_eq!(edit.range.start, 12);
        assert_eq!(index, 1);

        let unit = parse("class A {}").unit;
        let (edit, index) = import_edit(&unit, "java.util.Scanner");
        assert_eq!(edit.new_text, "import java.util.Scanner;\n\n");
        assert_eq!(edit.range.start, 0);
        assert_eq!(index, 0);
    }

    #[test]
    fn import_node_renders() {
        assert_eq!(render(&import_node("java.util.Scanner")), "import java.util.Scanner;");
    }

    #[test]
    fn detects_existing_import() {
        let unit = parse("import java.util.*;\nimport java.util.List;\nclass A {}").unit;
        assert!(already_imported(&unit, "java.util.List"));
        assert!(!already_imported(&unit, "java.util.Map"));
    }
}
