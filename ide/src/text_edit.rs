use analyzer::TextEdit;

/// Rebases a byte cursor through edits given in original-document coordinates.
///
/// The caller must provide non-overlapping edits sorted by `(start, end)`.
///
/// Cursor rules:
/// - edits ending at or before the cursor shift it by their byte delta
/// - a cursor strictly inside a replaced range snaps to the edit `start`
pub(crate) fn rebase_cursor(edits: &[TextEdit], cursor: u32) -> u32 {
    let mut cursor = cursor;
    for edit in edits.iter().rev() {
        let start = edit.range.start;
        let end = edit.range.end;
        let replaced_len = end.saturating_sub(start);
        let inserted_len = edit.new_text.len() as u32;
        let delta = inserted_len as i64 - replaced_len as i64;

        if end <= cursor {
            cursor = if delta >= 0 {
                cursor.saturating_add(delta as u32)
            } else {
                cursor.saturating_sub((-delta) as u32)
            };
        } else if start < cursor && cursor < end {
            cursor = start;
        }
    }
    cursor
}

/// Applies byte-offset text edits and rebases a byte cursor through them.
///
/// Same preconditions as [`rebase_cursor`]; ranges must also be char boundaries of `source`.
/// Edits are applied in descending order so earlier offsets stay valid.
pub fn apply_text_edits_bytes_with_cursor(
    source: &str,
    edits: &[TextEdit],
    cursor: u32,
) -> (String, u32) {
    let mut updated = source.to_string();
    for edit in edits.iter().rev() {
        let start = edit.range.start as usize;
        let end = edit.range.end as usize;
        updated.replace_range(start..end, &edit.new_text);
    }
    (updated, rebase_cursor(edits, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::Span;

    #[test]
    fn insertion_at_cursor_moves_it_past_the_text() {
        let edits = vec![TextEdit::insert(2, "xy")];
        let (text, cursor) = apply_text_edits_bytes_with_cursor("abcd", &edits, 2);
        assert_eq!(text, "abxycd");
        assert_eq!(cursor, 4);
    }

    #[test]
    fn cursor_inside_replacement_snaps_to_start() {
        let edits = vec![TextEdit::replace(Span::new(1, 3), "Z")];
        let (text, cursor) = apply_text_edits_bytes_with_cursor("abcd", &edits, 2);
        assert_eq!(text, "aZd");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn edits_after_cursor_leave_it_alone() {
        let edits = vec![TextEdit::insert(0, "//"), TextEdit::insert(4, "!")];
        assert_eq!(rebase_cursor(&edits, 3), 5);
    }
}
