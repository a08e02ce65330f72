//! The `owner.member` family.
//!
//! The owner part resolves first: a value in scope wins, otherwise types are searched among
//! imported, same-package and classpath-wide types, in that priority order. The member part
//! is then matched against the owner's members only.

use super::{Collect, type_ref};
use crate::abbreviation::matches;
use crate::fragment::{Callee, FieldAccess, Fragment, Invocation, Receiver, TypeRef};
use analyzer::semantic::{SemanticModel, Ty, TypeInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Owner {
    Value { name: String, ty: Ty },
    Type(TypeRef),
}

/// Owners named by `owner`, either spelled out or abbreviated.
pub(crate) fn resolve_owners(model: &dyn SemanticModel, caret: u32, owner: &str) -> Vec<Owner> {
    let named = |name: &str| name == owner || matches(name, owner);

    let values = model.elements_in_scope(caret, &|e| named(&e.name));
    let value = values
        .iter()
        .find(|e| e.name == owner)
        .or_else(|| values.first());
    if let Some(value) = value {
        tracing::debug!(owner = %value.name, ty = %value.ty, "owner is a value");
        return vec![Owner::Value {
            name: value.name.clone(),
            ty: value.ty.clone(),
        }];
    }

    let found = model.find_types(&|t| named(&t.simple_name));
    let imported = |t: &TypeInfo| {
        t.package == "java.lang"
            || model.imports().iter().any(|i| {
                !i.is_static
                    && if i.on_demand {
                        t.outer.is_none() && i.name == t.package
                    } else {
                        i.name == t.name
                    }
            })
    };
    let tiers: [&dyn Fn(&TypeInfo) -> bool; 3] = [
        &imported,
        &|t| t.package == model.package(),
        &|_| true,
    ];

    for tier in tiers {
        let mut types: Vec<&TypeInfo> = found.iter().copied().filter(|t| tier(t)).collect();
        if types.is_empty() {
            continue;
        }
        if types.iter().any(|t| t.simple_name == owner) {
            types.retain(|t| t.simple_name == owner);
        }
        tracing::debug!(owners = types.len(), "owner is a type");
        return types
            .into_iter()
            .map(|t| Owner::Type(type_ref(model, caret, t)))
            .collect();
    }
    Vec::new()
}

/// Instance methods of a value owner, static methods of a type owner.
pub(super) fn invocations(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    for owner in request.owners {
        let (ty, receiver, want_static) = match owner {
            Owner::Value { name, ty } => (ty.clone(), Receiver::Value(name.clone()), false),
            Owner::Type(ty) => (
                Ty::declared(ty.qualified.clone()),
                Receiver::Type(ty.clone()),
                true,
            ),
        };
        for method in request.model.members_of(&ty).methods {
            if method.is_static == want_static && matches(&method.name, request.abbreviation) {
                out.push(Fragment::CallableInvocation(Invocation {
                    callee: Callee::Method {
                        receiver: Some(receiver.clone()),
                    },
                    method,
                    args: Vec::new(),
                }));
            }
        }
    }
}

pub(super) fn static_fields(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    for owner in request.owners {
        let Owner::Type(ty) = owner else {
            continue;
        };
        let fields = request
            .model
            .members_of(&Ty::declared(ty.qualified.clone()))
            .fields;
        out.extend(
            fields
                .into_iter()
                .filter(|f| f.is_static && matches(&f.name, request.abbreviation))
                .map(|field| {
                    Fragment::ConstantOrFieldAccess(FieldAccess {
                        owner: Some(Receiver::Type(ty.clone())),
                        field,
                    })
                }),
        );
    }
}

pub(super) fn instance_fields(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    for owner in request.owners {
        let Owner::Value { name, ty } = owner else {
            continue;
        };
        out.extend(
            request
                .model
                .members_of(ty)
                .fields
                .into_iter()
                .filter(|f| !f.is_static && matches(&f.name, request.abbreviation))
                .map(|field| {
                    Fragment::ConstantOrFieldAccess(FieldAccess {
                        owner: Some(Receiver::Value(name.clone())),
                        field,
                    })
                }),
        );
    }
}

/// Member types of a type owner, spelled through the owner.
pub(super) fn member_types(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    for owner in request.owners {
        let Owner::Type(ty) = owner else {
            continue;
        };
        let inner = request.model.find_types(&|t| {
            t.outer.as_deref() == Some(ty.qualified.as_str())
                && matches(&t.simple_name, request.abbreviation)
        });
        out.extend(inner.into_iter().map(|t| {
            Fragment::DeclaredType(TypeRef {
                qualified: t.name.clone(),
                display: format!("{}.{}", ty.display, t.simple_name),
                import: ty.import.clone(),
            })
        }));
    }
}
