//! Semantic model: types, members, scopes and assignability.
//!
//! The IDE consumes this module only through [`SemanticModel`]. [`Index`] is the reference
//! implementation, built from a [`crate::ParseOutput`] plus a [`Library`] of compiled and boot
//! types.

use serde::{Deserialize, Serialize};
use std::fmt;

mod assign;
#[macro_use]
mod builtins;
mod index;
mod infer;
mod library;
mod scope;

pub use builtins::builtin_library;
pub use index::Index;
pub use library::Library;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Char,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub fn from_keyword(text: &str) -> Option<PrimitiveKind> {
        PrimitiveKind::ALL.into_iter().find(|p| p.keyword() == text)
    }

    /// Qualified name of the boxed counterpart.
    pub fn boxed(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "java.lang.Boolean",
            PrimitiveKind::Byte => "java.lang.Byte",
            PrimitiveKind::Short => "java.lang.Short",
            PrimitiveKind::Char => "java.lang.Character",
            PrimitiveKind::Int => "java.lang.Integer",
            PrimitiveKind::Long => "java.lang.Long",
            PrimitiveKind::Float => "java.lang.Float",
            PrimitiveKind::Double => "java.lang.Double",
        }
    }

    pub fn unboxed(qualified: &str) -> Option<PrimitiveKind> {
        PrimitiveKind::ALL.into_iter().find(|p| p.boxed() == qualified)
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveKind::Boolean)
    }
}

/// A type as seen by the engine. Declared types carry their qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ty {
    Primitive(PrimitiveKind),
    Declared { name: String, args: Vec<Ty> },
    Array(Box<Ty>),
    /// A type variable; assignable to and from anything.
    Var(String),
    Null,
    Void,
    Unknown,
}

impl Ty {
    pub fn declared(name: impl Into<String>) -> Ty {
        Ty::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn object() -> Ty {
        Ty::declared("java.lang.Object")
    }

    pub fn string() -> Ty {
        Ty::declared("java.lang.String")
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Ty::Declared { .. } | Ty::Array(_) | Ty::Var(_) | Ty::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Ty::Primitive(PrimitiveKind::Boolean))
            || self.qualified_name() == Some("java.lang.Boolean")
    }

    pub fn qualified_name(&self) -> Option<&str> {
        match self {
            Ty::Declared { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Same type ignoring type arguments.
    pub fn same_erasure(&self, other: &Ty) -> bool {
        match (self, other) {
            (Ty::Declared { name: a, .. }, Ty::Declared { name: b, .. }) => a == b,
            (Ty::Array(a), Ty::Array(b)) => a.same_erasure(b),
            _ => self == other,
        }
    }

    /// Replaces type variables by the bindings in `subst`.
    pub fn substitute(&self, subst: &[(String, Ty)]) -> Ty {
        match self {
            Ty::Var(name) => subst
                .iter()
                .find(|(param, _)| param == name)
                .map(|(_, ty)| ty.clone())
                .unwrap_or_else(|| self.clone()),
            Ty::Declared { name, args } => Ty::Declared {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(subst)).collect(),
            },
            Ty::Array(elem) => Ty::Array(Box::new(elem.substitute(subst))),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Ty {
    /// Source spelling with simple names (`List<String>`, `int[]`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Primitive(p) => f.write_str(p.keyword()),
            Ty::Declared { name, args } => {
                f.write_str(name.rsplit('.').next().unwrap_or(name))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Ty::Array(elem) => write!(f, "{elem}[]"),
            Ty::Var(name) => f.write_str(name),
            Ty::Null => f.write_str("null"),
            Ty::Void => f.write_str("void"),
            Ty::Unknown => f.write_str("?"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// Where a declared type comes from: the current sources, the compile classpath or the
/// boot classpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Source,
    Compile,
    Boot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    pub ty: Ty,
    pub is_static: bool,
    pub is_final: bool,
    pub is_enum_constant: bool,
    /// Qualified name of the declaring type.
    pub declaring: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    pub ty: Ty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    pub params: Vec<ParamInfo>,
    /// `Ty::Void` for constructors and `void` methods.
    pub ret: Ty,
    pub is_static: bool,
    pub declaring: String,
}

impl MethodInfo {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// `name(int, String)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.ty.to_string()).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Qualified name; nested types use `.` (`java.util.Map.Entry`).
    pub name: String,
    pub simple_name: String,
    pub package: String,
    /// Qualified name of the enclosing type of a member type.
    pub outer: Option<String>,
    pub kind: TypeKind,
    pub superclass: Option<Ty>,
    pub interfaces: Vec<Ty>,
    pub type_params: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub constructors: Vec<MethodInfo>,
    pub origin: Origin,
}

impl TypeInfo {
    /// Name relative to the package: `Entry` nested in `Map` displays as `Map.Entry`.
    pub fn display_name(&self) -> &str {
        if self.package.is_empty() {
            &self.name
        } else {
            self.name
                .strip_prefix(self.package.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&self.simple_name)
        }
    }

    /// The type's own name as a [`Ty`], with its type parameters as arguments.
    pub fn as_ty(&self) -> Ty {
        Ty::Declared {
            name: self.name.clone(),
            args: self.type_params.iter().map(|p| Ty::Var(p.clone())).collect(),
        }
    }

    /// Qualified name of the top-level type this type is nested in (itself if top-level).
    pub fn top_level_name(&self) -> &str {
        let rest = self.display_name();
        let top = rest.split('.').next().unwrap_or(rest);
        let len = if self.package.is_empty() {
            top.len()
        } else {
            self.package.len() + 1 + top.len()
        };
        &self.name[..len.min(self.name.len())]
    }

    pub fn enum_constants(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|f| f.is_enum_constant)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Parameter,
    Field,
    LocalVariable,
    EnumConstant,
    ExceptionParameter,
    ResourceVariable,
}

/// A named value in scope at some offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub ty: Ty,
    pub kind: ElementKind,
    /// Static fields and enum constants.
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Imported type, package (on-demand) or static member owner.
    pub name: String,
    pub is_static: bool,
    pub on_demand: bool,
}

/// Fields and methods visible on a type, own members first, then inherited ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Members {
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parsed,
    Resolved,
}

/// The read-only boundary between the IDE engine and a semantic model.
///
/// Every query except [`SemanticModel::phase`] and [`SemanticModel::resolve`] expects the
/// model to be in [`Phase::Resolved`]; before that they answer as if nothing were declared.
pub trait SemanticModel {
    fn phase(&self) -> Phase;

    /// Moves the model to [`Phase::Resolved`]. Calling it again is a no-op.
    fn resolve(&mut self);

    /// Package of the compilation unit (`""` for the default package).
    fn package(&self) -> &str;

    fn imports(&self) -> &[Import];

    /// Values visible at `offset` matching `filter`, innermost first.
    fn elements_in_scope(&self, offset: u32, filter: &dyn Fn(&Element) -> bool) -> Vec<Element>;

    /// Declared type by qualified name.
    fn type_named(&self, qualified: &str) -> Option<&TypeInfo>;

    /// Declared types across the source, compile and boot paths matching `filter`.
    fn find_types(&self, filter: &dyn Fn(&TypeInfo) -> bool) -> Vec<&TypeInfo>;

    /// Type named `name` (simple or dotted) as visible from `offset`.
    fn resolve_type_name(&self, name: &str, offset: u32) -> Option<&TypeInfo>;

    fn members_of(&self, ty: &Ty) -> Members;

    fn is_assignable(&self, from: &Ty, to: &Ty) -> bool;

    /// Parses `snippet` as an expression in the scope at `offset` and returns its type.
    fn type_of_snippet(&self, snippet: &str, offset: u32) -> Ty;

    fn enclosing_type(&self, offset: u32) -> Option<&TypeInfo>;

    fn enclosing_method(&self, offset: u32) -> Option<&MethodInfo>;
}
