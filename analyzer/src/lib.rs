//! Front end for Java-like source: lexer, error-recovering parser, syntax tree and a
//! reference semantic model.
//!
//! Pipeline: lex → parse → resolve (semantic index) → IDE queries.
//! All spans are UTF-8 byte offsets into the original source, using `[start, end)`.
mod diagnostics;
mod lexer;
mod parser;
pub mod semantic;
mod source_map;
mod span;
pub mod syntax;
mod tests;
mod text_edit;

pub use diagnostics::format_diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind, Diagnostics};
pub use lexer::{Keyword, Lit, LitKind, Symbol, Token, TokenIdx, TokenKind, TokenRange};
pub use lexer::{LexOutput, lex, tokens_in_span};
pub use parser::{ExprOutput, ParseOutput, TokenQuery, parse, parse_expression};
pub use source_map::SourceMap;
pub use span::{Span, Spanned};
pub use text_edit::TextEdit;
