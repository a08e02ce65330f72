//! Validated edit transactions.
//!
//! Every edit is checked before any is applied, so an error leaves the document untouched.

use crate::error::EditError;
use crate::text_edit::apply_text_edits_bytes_with_cursor;
use analyzer::TextEdit;
use analyzer::syntax::SyntaxNode;

/// One insertion, ready to commit as a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// The splice or substitution, plus an import declaration when one is needed. Sorted by
    /// offset.
    pub edits: Vec<TextEdit>,
    /// Cursor after the inserted fragment, in post-edit coordinates.
    pub cursor: u32,
    /// The rewritten tree.
    pub root: SyntaxNode,
}

/// Result payload for edit operations in byte coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub source: String,
    pub cursor: u32,
}

/// Apply byte edits in source coordinates and rebase a byte cursor.
pub fn apply_edits(
    source: &str,
    mut edits: Vec<TextEdit>,
    cursor: u32,
) -> Result<ApplyResult, EditError> {
    edits.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(a.range.end.cmp(&b.range.end))
    });

    validate_cursor(source, cursor)?;
    validate_sorted_non_overlapping_edits(source, &edits)?;

    let (source, cursor) = apply_text_edits_bytes_with_cursor(source, &edits, cursor);
    tracing::trace!(edits = edits.len(), cursor, "applied edits");
    Ok(ApplyResult { source, cursor })
}

fn validate_cursor(source: &str, cursor: u32) -> Result<(), EditError> {
    let cursor = cursor as usize;
    if cursor > source.len() || !source.is_char_boundary(cursor) {
        return Err(EditError::InvalidCursor);
    }
    Ok(())
}

fn validate_sorted_non_overlapping_edits(
    source: &str,
    edits: &[TextEdit],
) -> Result<(), EditError> {
    let mut prev_end = 0u32;
    let source_len = u32::try_from(source.len()).map_err(|_| EditError::InvalidEditRange)?;

    for (index, edit) in edits.iter().enumerate() {
        if edit.range.end < edit.range.start || edit.range.end > source_len {
            return Err(EditError::InvalidEditRange);
        }

        if !source.is_char_boundary(edit.range.start as usize)
            || !source.is_char_boundary(edit.range.end as usize)
        {
            return Err(EditError::InvalidEditRange);
        }

        // Two insertions at the same offset would apply in an arbitrary order.
        if index > 0 && (edit.range.start < prev_end || edit.range.start == edits[index - 1].range.start) {
            return Err(EditError::OverlappingEdits);
        }

        prev_end = edit.range.end;
    }

    Ok(())
}
