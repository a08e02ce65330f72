use super::index::{Index, TypeCx};
use super::{Element, ElementKind, SemanticModel, Ty};
use crate::syntax::{Role, SyntaxKind, SyntaxNode, TreePath};

impl Index {
    /// Every value visible at `offset`, innermost declaration first. Shadowed names are
    /// reported once.
    pub(super) fn scope_at(&self, offset: u32) -> Vec<Element> {
        let path = TreePath::at(&self.unit, offset);
        let cx = self.type_cx(offset);
        let mut out: Vec<Element> = Vec::new();

        let nodes = path.nodes();
        for depth in (0..nodes.len()).rev() {
            let node = nodes[depth];
            let child_idx = path.index_in_parent(depth + 1);
            match node.kind {
                SyntaxKind::Block | SyntaxKind::SwitchStatement => {
                    let upto = child_idx.unwrap_or(node.children.len());
                    for stmt in node.children[..upto.min(node.children.len())].iter().rev() {
                        if stmt.kind == SyntaxKind::VariableDeclarationStatement
                            && stmt.span.end <= offset
                        {
                            for e in self.declared_variables(stmt, ElementKind::LocalVariable, &cx)
                                .into_iter()
                                .rev()
                            {
                                push(&mut out, e);
                            }
                        }
                    }
                }
                SyntaxKind::ForStatement => {
                    for init in node.children_with(Role::Init) {
                        if init.kind == SyntaxKind::VariableDeclarationExpression {
                            for e in self.declared_variables(init, ElementKind::LocalVariable, &cx) {
                                push(&mut out, e);
                            }
                        }
                    }
                }
                SyntaxKind::EnhancedForStatement => {
                    let in_body = child_idx
                        .and_then(|i| node.children.get(i))
                        .is_some_and(|c| c.role == Role::Body);
                    if in_body {
                        if let Some(param) = node.child(Role::Parameter) {
                            let element = self.enhanced_for_variable(node, param, &cx);
                            if let Some(e) = element {
                                push(&mut out, e);
                            }
                        }
                    }
                }
                SyntaxKind::CatchClause => {
                    if let Some(param) = node.child(Role::Parameter) {
                        if let Some(e) = self.parameter(param, ElementKind::ExceptionParameter, &cx)
                        {
                            push(&mut out, e);
                        }
                    }
                }
                SyntaxKind::TryStatement => {
                    let in_resources_or_body = child_idx
                        .and_then(|i| node.children.get(i))
                        .is_some_and(|c| matches!(c.role, Role::Body | Role::Resource));
                    if in_resources_or_body {
                        for res in node.children_with(Role::Resource) {
                            if res.kind == SyntaxKind::VariableDeclarationExpression
                                && res.span.end <= offset
                            {
                                for e in
                                    self.declared_variables(res, ElementKind::ResourceVariable, &cx)
                                {
                                    push(&mut out, e);
                                }
                            }
                        }
                    }
                }
                SyntaxKind::MethodDeclaration | SyntaxKind::LambdaExpression => {
                    for param in node.children_with(Role::Parameter) {
                        if let Some(e) = self.parameter(param, ElementKind::Parameter, &cx) {
                            push(&mut out, e);
                        }
                    }
                }
                _ => {}
            }
        }

        for source_ty in self.enclosing_type_chain(offset) {
            let members = self.members_of(&source_ty);
            for field in members.fields {
                let kind = if field.is_enum_constant {
                    ElementKind::EnumConstant
                } else {
                    ElementKind::Field
                };
                push(
                    &mut out,
                    Element {
                        name: field.name,
                        ty: field.ty,
                        kind,
                        is_static: field.is_static,
                    },
                );
            }
        }

        out
    }

    /// Enclosing types from innermost to outermost, as `Ty`s with their own type variables.
    pub(super) fn enclosing_type_chain(&self, offset: u32) -> Vec<Ty> {
        let mut chain = Vec::new();
        let mut current = self.enclosing_type(offset).cloned();
        while let Some(info) = current {
            chain.push(info.as_ty());
            current = info.outer.as_deref().and_then(|o| self.lookup(o)).cloned();
        }
        chain
    }

    fn declared_variables(&self, decl: &SyntaxNode, kind: ElementKind, cx: &TypeCx) -> Vec<Element> {
        let declared = decl
            .child(Role::Type)
            .map(|t| (is_var_keyword(t), self.ty_of_type_node(t, cx)))
            .unwrap_or((false, Ty::Unknown));
        decl.children_with(Role::Fragment)
            .filter_map(|fragment| {
                let name = fragment.name()?;
                let ty = match (&declared, fragment.child(Role::Initializer)) {
                    ((true, _), Some(init)) => self.type_of_expr(init, init.span.start),
                    ((true, _), None) => Ty::Unknown,
                    ((false, ty), _) => ty.clone(),
                };
                Some(Element {
                    name: name.to_string(),
                    ty,
                    kind,
                    is_static: false,
                })
            })
            .collect()
    }

    fn parameter(&self, param: &SyntaxNode, kind: ElementKind, cx: &TypeCx) -> Option<Element> {
        match param.kind {
            SyntaxKind::SingleVariableDeclaration => {
                let info = self.param_info(param, cx);
                if info.name.is_empty() {
                    return None;
                }
                Some(Element {
                    name: info.name,
                    ty: info.ty,
                    kind,
                    is_static: false,
                })
            }
            // Untyped lambda parameter.
            SyntaxKind::SimpleName => Some(Element {
                name: param.text().to_string(),
                ty: Ty::Unknown,
                kind,
                is_static: false,
            }),
            _ => None,
        }
    }

    fn enhanced_for_variable(
        &self,
        stmt: &SyntaxNode,
        param: &SyntaxNode,
        cx: &TypeCx,
    ) -> Option<Element> {
        let mut element = self.parameter(param, ElementKind::LocalVariable, cx)?;
        let is_var = param.child(Role::Type).is_some_and(is_var_keyword);
        if is_var {
            element.ty = stmt
                .child(Role::Expression)
                .map(|iterable| {
                    self.element_type(&self.type_of_expr(iterable, iterable.span.start))
                })
                .unwrap_or(Ty::Unknown);
        }
        Some(element)
    }

    /// Element type of an array or `Iterable`.
    pub(super) fn element_type(&self, iterable: &Ty) -> Ty {
        match iterable {
            Ty::Array(elem) => (**elem).clone(),
            Ty::Declared { .. } => self
                .members_of(iterable)
                .methods
                .into_iter()
                .find(|m| m.name == "iterator" && m.params.is_empty())
                .and_then(|m| match m.ret {
                    Ty::Declared { args, .. } => args.into_iter().next(),
                    _ => None,
                })
                .unwrap_or(Ty::Unknown),
            _ => Ty::Unknown,
        }
    }
}

fn push(out: &mut Vec<Element>, element: Element) {
    if out.iter().all(|e| e.name != element.name) {
        out.push(element);
    }
}

fn is_var_keyword(ty: &SyntaxNode) -> bool {
    ty.kind == SyntaxKind::SimpleType
        && ty.child(Role::Name).is_some_and(|n| n.kind == SyntaxKind::SimpleName && n.text() == "var")
}
