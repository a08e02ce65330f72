use crate::Span;
use crate::source_map::SourceMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Error,
}

/// Where a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
    Lex,
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Span,
}

#[derive(Default, Debug)]
pub struct Diagnostics {
    pub diags: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn emit(&mut self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        self.diags.push(Diagnostic {
            kind: DiagnosticKind::Error,
            code,
            message: message.into(),
            span,
        });
    }

    pub fn len(&self) -> usize {
        self.diags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diags.is_empty()
    }

    /// Drops diagnostics emitted after a speculative-parse checkpoint.
    pub fn truncate(&mut self, len: usize) {
        self.diags.truncate(len);
    }
}

pub fn format_diagnostics(source: &str, mut diags: Vec<Diagnostic>) -> String {
    use std::fmt::Write;

    diags.sort_by(|a, b| {
        (a.span.start, a.span.end, &a.message).cmp(&(b.span.start, b.span.end, &b.message))
    });
    let sm = SourceMap::new(source);

    let mut out = String::new();
    for d in diags {
        let (line, col) = sm.line_col(d.span.start);
        let _ = writeln!(&mut out, "error: {}", d.message);
        let _ = writeln!(
            &mut out,
            "  --> <input>:{}:{} [{}..{}]",
            line, col, d.span.start, d.span.end
        );
    }
    out
}
