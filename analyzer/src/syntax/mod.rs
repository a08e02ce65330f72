//! Immutable syntax tree.
//!
//! Spans are UTF-8 byte offsets into the parsed source and are half-open `[start, end)`.

mod kind;
mod node;
mod path;
mod render;

pub use kind::{Role, SyntaxKind};
pub use node::{Descendants, MISSING_MARKER, SyntaxNode};
pub use path::TreePath;
pub use render::render;
