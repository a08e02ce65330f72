use super::{Collect, TypeFilter};
use crate::abbreviation::matches;
use crate::fragment::{Callee, Fragment, Invocation, TypeRef};
use analyzer::semantic::{MethodInfo, Ty, TypeInfo, TypeKind};

/// Top-level types from the source, compile and boot paths.
pub(super) fn declared_types(filter: TypeFilter, request: &Collect<'_>, out: &mut Vec<Fragment>) {
    let found = request.model.find_types(&|t| {
        t.outer.is_none()
            && matches(&t.simple_name, request.abbreviation)
            && filter.accepts(t, request.model)
    });
    out.extend(
        visible_first(request, found)
            .into_iter()
            .map(Fragment::DeclaredType),
    );
}

/// Member types, spelled `Outer.Inner` and matched by the inner name.
pub(super) fn inner_types(filter: TypeFilter, request: &Collect<'_>, out: &mut Vec<Fragment>) {
    let found = request.model.find_types(&|t| {
        t.outer.is_some()
            && matches(&t.simple_name, request.abbreviation)
            && filter.accepts(t, request.model)
    });
    out.extend(
        visible_first(request, found)
            .into_iter()
            .map(Fragment::DeclaredType),
    );
}

/// One candidate per constructor of every matching class.
pub(super) fn constructors(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    let found = request.model.find_types(&|t| {
        t.kind == TypeKind::Class && matches(&t.simple_name, request.abbreviation)
    });
    let mut found: Vec<(&TypeInfo, TypeRef)> =
        found.into_iter().map(|t| (t, request.type_ref(t))).collect();
    found.sort_by_key(|(_, ty)| ty.import.is_some());

    for (info, ty) in found {
        let constructors = if info.constructors.is_empty() {
            vec![implicit_constructor(info)]
        } else {
            info.constructors.clone()
        };
        for method in constructors {
            out.push(Fragment::CallableInvocation(Invocation {
                callee: Callee::Constructor { ty: ty.clone() },
                method,
                args: Vec::new(),
            }));
        }
    }
}

fn implicit_constructor(info: &TypeInfo) -> MethodInfo {
    MethodInfo {
        name: info.simple_name.clone(),
        params: Vec::new(),
        ret: Ty::Void,
        is_static: false,
        declaring: info.name.clone(),
    }
}

/// Types already reachable by their display name come before ones needing an import.
fn visible_first(request: &Collect<'_>, found: Vec<&TypeInfo>) -> Vec<TypeRef> {
    let mut refs: Vec<TypeRef> = found.into_iter().map(|t| request.type_ref(t)).collect();
    refs.sort_by_key(|ty| ty.import.is_some());
    refs
}
