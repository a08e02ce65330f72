use crate::Span;

/// A single text edit in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn insert(offset: u32, text: impl Into<String>) -> TextEdit {
        TextEdit {
            range: Span::empty(offset),
            new_text: text.into(),
        }
    }

    pub fn replace(range: Span, text: impl Into<String>) -> TextEdit {
        TextEdit {
            range,
            new_text: text.into(),
        }
    }
}
