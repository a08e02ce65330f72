use thiserror::Error;

/// Edit validation failures. A failed validation leaves the document untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("invalid cursor")]
    InvalidCursor,
    #[error("invalid edit range")]
    InvalidEditRange,
    #[error("overlapping edits")]
    OverlappingEdits,
}

/// Call-contract violations. They abort the current cycle.
///
/// Finding no candidate, finding several, or finding no legal insertion point are outcomes,
/// not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("semantic model queried before it was resolved")]
    ModelNotResolved,
    #[error("empty abbreviation")]
    EmptyAbbreviation,
    #[error("caret {caret} is outside the document (length {len})")]
    CaretOutOfBounds { caret: u32, len: usize },
    #[error(transparent)]
    Edit(#[from] EditError),
}
