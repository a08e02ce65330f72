//! Expected-type resolution: the type a fragment inserted at the caret should have.

use super::{CompletionContext, Scan, Site, Slot};
use analyzer::semantic::{MethodInfo, PrimitiveKind, SemanticModel, Ty};
use analyzer::syntax::{Role, SyntaxKind, SyntaxNode, TreePath, render};

/// `None` when the position puts no constraint on the type.
pub(crate) fn expected_type(
    site: &Site<'_>,
    path: &TreePath<'_>,
    scan: &Scan<'_>,
    model: &dyn SemanticModel,
) -> Option<Ty> {
    let caret = scan.caret();
    let node = site.node;
    let parent = site.depth.checked_sub(1).and_then(|d| path.node(d));

    let expected = match (site.slot, site.context) {
        (Slot::Condition, _) => Some(Ty::Primitive(PrimitiveKind::Boolean)),
        (Slot::CaseLabel, _) => {
            let selector = parent
                .filter(|p| p.kind == SyntaxKind::SwitchStatement)
                .and_then(|p| p.child(Role::Expression))?;
            known(model.type_of_snippet(&render(selector), caret))
        }
        (Slot::Expression, CompletionContext::Return) => {
            let method = model.enclosing_method(caret)?;
            match method.ret {
                Ty::Void => None,
                ref ret => known(ret.clone()),
            }
        }
        (Slot::Expression, CompletionContext::VariableFragment) => {
            let declared = parent?.child(Role::Type)?;
            known(ty_of_type(declared, model, caret))
        }
        (Slot::Expression, CompletionContext::Assignment) if node.text() == "=" => {
            let left = node.child(Role::Left)?;
            known(model.type_of_snippet(&render(left), caret))
        }
        (Slot::Expression, CompletionContext::Invocation | CompletionContext::InstanceCreation)
        | (Slot::Expression, CompletionContext::EnumConstant) => argument_type(node, scan, model),
        (Slot::Expression, CompletionContext::ArrayAccess | CompletionContext::ArrayCreation) => {
            let in_brackets = node
                .children_with(Role::Initializer)
                .all(|init| caret <= init.span.start);
            in_brackets.then_some(Ty::Primitive(PrimitiveKind::Int))
        }
        (Slot::Expression, CompletionContext::Throw) => Some(Ty::declared("java.lang.Throwable")),
        _ => None,
    };
    tracing::trace!(expected = ?expected, "expected type");
    expected
}

fn known(ty: Ty) -> Option<Ty> {
    match ty {
        Ty::Unknown => None,
        ty => Some(ty),
    }
}

/// Parameter type at the caret's argument index, when every candidate overload agrees.
fn argument_type(call: &SyntaxNode, scan: &Scan<'_>, model: &dyn SemanticModel) -> Option<Ty> {
    let caret = scan.caret();
    let anchor = call
        .child(Role::Name)
        .or_else(|| call.child(Role::Type))
        .map_or(call.span.start, |n| n.span.end);
    let open = scan.open_paren_after(anchor)?;
    let index = scan.argument_index(open.span.start);
    let count = call.children_with(Role::Argument).count().max(index + 1);

    let overloads = callables(call, caret, model);
    let exact: Vec<&MethodInfo> = overloads.iter().filter(|m| m.arity() == count).collect();
    let candidates = if exact.is_empty() {
        overloads.iter().filter(|m| m.arity() > index).collect()
    } else {
        exact
    };

    let mut types = candidates.iter().map(|m| &m.params[index].ty);
    let first = types.next()?;
    types.all(|ty| ty == first).then(|| first.clone())
}

/// Overloads the call at `call` may bind to.
fn callables(call: &SyntaxNode, caret: u32, model: &dyn SemanticModel) -> Vec<MethodInfo> {
    let enclosing = || model.enclosing_type(caret);
    match call.kind {
        SyntaxKind::MethodInvocation => {
            let Some(name) = call.name() else {
                return Vec::new();
            };
            let owner = match call.child(Role::Receiver) {
                Some(receiver) => model.type_of_snippet(&render(receiver), caret),
                None => match enclosing() {
                    Some(info) => info.as_ty(),
                    None => return Vec::new(),
                },
            };
            model
                .members_of(&owner)
                .methods
                .into_iter()
                .filter(|m| m.name == name)
                .collect()
        }
        SyntaxKind::SuperMethodInvocation => {
            let (Some(name), Some(sup)) = (call.name(), enclosing().and_then(|t| t.superclass.clone()))
            else {
                return Vec::new();
            };
            model
                .members_of(&sup)
                .methods
                .into_iter()
                .filter(|m| m.name == name)
                .collect()
        }
        SyntaxKind::ClassInstanceCreation => {
            let Some(ty) = call.child(Role::Type) else {
                return Vec::new();
            };
            match ty_of_type(ty, model, caret) {
                Ty::Declared { name, .. } => model
                    .type_named(&name)
                    .map(|info| info.constructors.clone())
                    .unwrap_or_default(),
                _ => Vec::new(),
            }
        }
        SyntaxKind::ConstructorInvocation | SyntaxKind::EnumConstantDeclaration => enclosing()
            .map(|info| info.constructors.clone())
            .unwrap_or_default(),
        SyntaxKind::SuperConstructorInvocation => enclosing()
            .and_then(|info| info.superclass.as_ref())
            .and_then(Ty::qualified_name)
            .and_then(|name| model.type_named(name))
            .map(|info| info.constructors.clone())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// The type a written type node denotes, as seen from `offset`.
fn ty_of_type(node: &SyntaxNode, model: &dyn SemanticModel, offset: u32) -> Ty {
    match node.kind {
        SyntaxKind::PrimitiveType => match node.text() {
            "void" => Ty::Void,
            text => PrimitiveKind::from_keyword(text)
                .map(Ty::Primitive)
                .unwrap_or(Ty::Unknown),
        },
        SyntaxKind::SimpleType => node
            .child(Role::Name)
            .and_then(SyntaxNode::qualified_name)
            .and_then(|name| model.resolve_type_name(&name, offset))
            .map_or(Ty::Unknown, |info| Ty::declared(info.name.clone())),
        SyntaxKind::ParameterizedType => {
            let base = node
                .child(Role::Type)
                .map_or(Ty::Unknown, |t| ty_of_type(t, model, offset));
            match base {
                Ty::Declared { name, .. } => Ty::Declared {
                    name,
                    args: node
                        .children_with(Role::TypeArgument)
                        .map(|a| match ty_of_type(a, model, offset) {
                            // Wildcards and unresolved arguments match any argument.
                            Ty::Unknown => Ty::Var("?".into()),
                            ty => ty,
                        })
                        .collect(),
                },
                other => other,
            }
        }
        SyntaxKind::ArrayType => match node.child(Role::Element) {
            Some(elem) => Ty::Array(Box::new(ty_of_type(elem, model, offset))),
            None => Ty::Unknown,
        },
        _ => Ty::Unknown,
    }
}
