//! Candidate collection.
//! A pipeline is an ordered list of [`CollectorKind`]s; each appends the fragments of one
//! family that match the abbreviation. Collectors never remove or reorder what earlier ones
//! produced.

use crate::config::{CollectorFlags, CollectorId};
use crate::fragment::{Fragment, TypeRef};
use analyzer::Keyword;
use analyzer::semantic::{SemanticModel, Ty, TypeInfo, TypeKind};

mod elements;
mod members;
mod types;
mod words;

pub(crate) use members::{Owner, resolve_owners};

/// Which declared types a type position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Any,
    Classes,
    Interfaces,
    /// Types assignable to `java.lang.Throwable`.
    Exceptions,
}

impl TypeFilter {
    fn accepts(self, info: &TypeInfo, model: &dyn SemanticModel) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Classes => info.kind == TypeKind::Class,
            TypeFilter::Interfaces => info.kind == TypeKind::Interface,
            TypeFilter::Exceptions => {
                info.kind == TypeKind::Class
                    && model.is_assignable(&Ty::declared(info.name.clone()), &throwable())
            }
        }
    }
}

fn throwable() -> Ty {
    Ty::declared("java.lang.Throwable")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CollectorKind {
    Keywords(&'static [Keyword]),
    Modifiers(&'static [Keyword]),
    PrimitiveTypes,
    /// `true`, `false` and `null`.
    Literals,
    /// `this` in an instance context.
    This,
    LocalElements,
    DeclaredTypes(TypeFilter),
    InnerTypes(TypeFilter),
    /// Methods of the enclosing type.
    Methods,
    StaticImports,
    /// Constants of the expected enum type, unqualified.
    EnumConstants,
    Constructors,
    MemberInvocations,
    StaticFields,
    InstanceFields,
    MemberTypes,
}

impl CollectorKind {
    /// Capability flag gating this collector.
    pub(crate) fn id(self) -> CollectorId {
        match self {
            CollectorKind::Keywords(_) | CollectorKind::This => CollectorId::Keywords,
            CollectorKind::Modifiers(_) => CollectorId::Modifiers,
            CollectorKind::PrimitiveTypes => CollectorId::PrimitiveTypes,
            CollectorKind::Literals => CollectorId::Literals,
            CollectorKind::LocalElements => CollectorId::LocalElements,
            CollectorKind::DeclaredTypes(_) => CollectorId::DeclaredTypes,
            CollectorKind::InnerTypes(_) => CollectorId::InnerTypes,
            CollectorKind::Methods => CollectorId::Methods,
            CollectorKind::StaticImports => CollectorId::StaticImports,
            CollectorKind::EnumConstants => CollectorId::EnumConstants,
            CollectorKind::Constructors => CollectorId::Constructors,
            CollectorKind::MemberInvocations => CollectorId::MemberInvocations,
            CollectorKind::StaticFields => CollectorId::StaticFields,
            CollectorKind::InstanceFields => CollectorId::InstanceFields,
            CollectorKind::MemberTypes => CollectorId::MemberTypes,
        }
    }
}

/// Shared request every collector reads.
pub(crate) struct Collect<'a> {
    pub(crate) model: &'a dyn SemanticModel,
    pub(crate) caret: u32,
    /// The member part for a qualified abbreviation.
    pub(crate) abbreviation: &'a str,
    pub(crate) expected: Option<&'a Ty>,
    /// Resolved owners of a qualified abbreviation; empty otherwise.
    pub(crate) owners: &'a [Owner],
}

impl Collect<'_> {
    /// Whether a value of type `ty` fits the expected type.
    fn fits(&self, ty: &Ty) -> bool {
        self.expected
            .is_none_or(|expected| self.model.is_assignable(ty, expected))
    }

    fn type_ref(&self, info: &TypeInfo) -> TypeRef {
        type_ref(self.model, self.caret, info)
    }
}

/// How `info` is referenced from the caret, with the import it needs.
fn type_ref(model: &dyn SemanticModel, caret: u32, info: &TypeInfo) -> TypeRef {
    let display = info.display_name().to_string();
    let visible = model
        .resolve_type_name(&display, caret)
        .is_some_and(|found| found.name == info.name);
    TypeRef {
        qualified: info.name.clone(),
        display,
        import: (!visible).then(|| info.top_level_name().to_string()),
    }
}

/// Runs `pipeline` in order, skipping collectors whose flag is off.
pub(crate) fn run(
    pipeline: &[CollectorKind],
    request: &Collect<'_>,
    flags: &CollectorFlags,
) -> Vec<Fragment> {
    let mut out = Vec::new();
    for &kind in pipeline {
        if !flags.is_enabled(kind.id()) {
            tracing::trace!(?kind, "collector disabled");
            continue;
        }
        let before = out.len();
        collect(kind, request, &mut out);
        tracing::debug!(?kind, added = out.len() - before, "collector ran");
    }
    out
}

fn collect(kind: CollectorKind, request: &Collect<'_>, out: &mut Vec<Fragment>) {
    match kind {
        CollectorKind::Keywords(keywords) => words::keywords(keywords, request, out),
        CollectorKind::Modifiers(modifiers) => words::modifiers(modifiers, request, out),
        CollectorKind::PrimitiveTypes => words::primitive_types(request, out),
        CollectorKind::Literals => words::literals(request, out),
        CollectorKind::This => words::this(request, out),
        CollectorKind::LocalElements => elements::local_elements(request, out),
        CollectorKind::DeclaredTypes(filter) => types::declared_types(filter, request, out),
        CollectorKind::InnerTypes(filter) => types::inner_types(filter, request, out),
        CollectorKind::Methods => elements::methods(request, out),
        CollectorKind::StaticImports => elements::static_imports(request, out),
        CollectorKind::EnumConstants => elements::enum_constants(request, out),
        CollectorKind::Constructors => types::constructors(request, out),
        CollectorKind::MemberInvocations => members::invocations(request, out),
        CollectorKind::StaticFields => members::static_fields(request, out),
        CollectorKind::InstanceFields => members::instance_fields(request, out),
        CollectorKind::MemberTypes => members::member_types(request, out),
    }
}
