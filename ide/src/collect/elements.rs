//! Values in scope: local elements, methods of the enclosing type, static imports and enum
//! constants.

use super::Collect;
use crate::abbreviation::matches;
use crate::fragment::{Callee, FieldAccess, Fragment, Invocation};
use analyzer::semantic::{ElementKind, FieldInfo, MethodInfo, Ty, TypeKind};

pub(super) fn local_elements(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    let static_only = request
        .model
        .enclosing_method(request.caret)
        .is_some_and(|m| m.is_static);
    let elements = request.model.elements_in_scope(request.caret, &|e| {
        let reachable = !static_only || e.kind != ElementKind::Field || e.is_static;
        reachable && matches(&e.name, request.abbreviation) && request.fits(&e.ty)
    });
    out.extend(elements.into_iter().map(Fragment::LocalElement));
}

pub(super) fn methods(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    let model = request.model;
    let Some(owner) = model.enclosing_type(request.caret) else {
        return;
    };
    let static_only = model
        .enclosing_method(request.caret)
        .is_some_and(|m| m.is_static);
    let methods = model.members_of(&owner.as_ty()).methods;
    out.extend(
        methods
            .into_iter()
            .filter(|m| (!static_only || m.is_static) && matches(&m.name, request.abbreviation))
            .map(unqualified_call),
    );
}

/// Members reachable through `import static`.
pub(super) fn static_imports(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    let model = request.model;
    for import in model.imports().iter().filter(|i| i.is_static) {
        let (owner, member) = if import.on_demand {
            (import.name.as_str(), None)
        } else {
            match import.name.rsplit_once('.') {
                Some((owner, member)) => (owner, Some(member)),
                None => continue,
            }
        };
        let members = model.members_of(&Ty::declared(owner));
        let wanted = |name: &str| {
            member.is_none_or(|m| m == name) && matches(name, request.abbreviation)
        };

        for field in members.fields {
            if field.is_static && wanted(&field.name) {
                out.push(unqualified_field(field));
            }
        }
        for method in members.methods {
            if method.is_static && wanted(&method.name) {
                out.push(unqualified_call(method));
            }
        }
    }
}

/// Constants of the expected enum type, as used in a case label.
pub(super) fn enum_constants(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    let Some(name) = request.expected.and_then(Ty::qualified_name) else {
        return;
    };
    let Some(info) = request.model.type_named(name) else {
        return;
    };
    if info.kind != TypeKind::Enum {
        return;
    }
    out.extend(
        info.enum_constants()
            .filter(|c| matches(&c.name, request.abbreviation))
            .cloned()
            .map(unqualified_field),
    );
}

fn unqualified_call(method: MethodInfo) -> Fragment {
    Fragment::CallableInvocation(Invocation {
        callee: Callee::Method { receiver: None },
        method,
        args: Vec::new(),
    })
}

fn unqualified_field(field: FieldInfo) -> Fragment {
    Fragment::ConstantOrFieldAccess(FieldAccess { owner: None, field })
}
