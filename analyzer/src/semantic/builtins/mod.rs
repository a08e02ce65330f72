use super::Library;

#[macro_use]
mod macros;

mod io;
mod lang;
mod util;

/// Boot-path types of `java.lang`, `java.io` and `java.util`.
///
/// Only the members commonly reached for in code completion are listed.
pub fn builtin_library() -> Library {
    let mut types = lang::types();
    types.extend(io::types());
    types.extend(util::types());
    Library::new(types)
}

/// Shorthands for the type expressions the builtin tables spell out.
mod ty {
    use crate::semantic::{PrimitiveKind, Ty};

    pub fn boolean() -> Ty {
        Ty::Primitive(PrimitiveKind::Boolean)
    }
    pub fn char() -> Ty {
        Ty::Primitive(PrimitiveKind::Char)
    }
    pub fn int() -> Ty {
        Ty::Primitive(PrimitiveKind::Int)
    }
    pub fn long() -> Ty {
        Ty::Primitive(PrimitiveKind::Long)
    }
    pub fn float() -> Ty {
        Ty::Primitive(PrimitiveKind::Float)
    }
    pub fn double() -> Ty {
        Ty::Primitive(PrimitiveKind::Double)
    }
    pub fn byte() -> Ty {
        Ty::Primitive(PrimitiveKind::Byte)
    }
    pub fn short() -> Ty {
        Ty::Primitive(PrimitiveKind::Short)
    }
    pub fn void() -> Ty {
        Ty::Void
    }
    pub fn object() -> Ty {
        Ty::object()
    }
    pub fn string() -> Ty {
        Ty::string()
    }
    pub fn var(name: &str) -> Ty {
        Ty::Var(name.into())
    }
    pub fn named(name: &str) -> Ty {
        Ty::declared(name)
    }
    pub fn generic(name: &str, args: Vec<Ty>) -> Ty {
        Ty::Declared {
            name: name.into(),
            args,
        }
    }
    pub fn array(elem: Ty) -> Ty {
        Ty::Array(Box::new(elem))
    }
}
