use std::collections::HashMap;

use super::{
    Element, FieldInfo, Import, Library, Members, MethodInfo, Origin, ParamInfo, Phase,
    PrimitiveKind, SemanticModel, Ty, TypeInfo, TypeKind,
};
use crate::Span;
use crate::parser::{ParseOutput, parse, parse_expression};
use crate::syntax::{Role, SyntaxKind, SyntaxNode, TreePath};

/// Where a qualified name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeRef {
    Source(usize),
    Library(usize),
}

#[derive(Debug, Clone, Copy)]
enum MethodSlot {
    Method(usize),
    Constructor(usize),
}

#[derive(Debug)]
struct SourceType {
    info: TypeInfo,
    span: Span,
    /// Child-index path of the declaration from the compilation unit.
    path: Vec<usize>,
    methods: Vec<(Span, MethodSlot)>,
}

/// Type variables and offset against which written type names are resolved.
pub(super) struct TypeCx {
    pub(super) offset: u32,
    pub(super) vars: Vec<String>,
}

/// Reference [`SemanticModel`] over one parsed compilation unit.
///
/// Built in [`Phase::Parsed`]; [`SemanticModel::resolve`] indexes the source types and
/// their members. Scopes are computed on demand from the syntax tree.
#[derive(Debug)]
pub struct Index {
    pub(super) unit: SyntaxNode,
    library: Library,
    phase: Phase,
    package: String,
    imports: Vec<Import>,
    sources: Vec<SourceType>,
    by_name: HashMap<String, TypeRef>,
}

impl Index {
    pub fn new(parse: &ParseOutput, library: Library) -> Index {
        let mut by_name = HashMap::new();
        for (i, ty) in library.types().iter().enumerate() {
            by_name.insert(ty.name.clone(), TypeRef::Library(i));
        }
        Index {
            unit: parse.unit.clone(),
            library,
            phase: Phase::Parsed,
            package: String::new(),
            imports: Vec::new(),
            sources: Vec::new(),
            by_name,
        }
    }

    /// Parses `source` and builds an unresolved index over it.
    pub fn from_source(source: &str, library: Library) -> Index {
        Index::new(&parse(source), library)
    }

    pub fn unit(&self) -> &SyntaxNode {
        &self.unit
    }

    pub(super) fn lookup(&self, qualified: &str) -> Option<&TypeInfo> {
        match self.by_name.get(qualified)? {
            TypeRef::Source(i) => Some(&self.sources[*i].info),
            TypeRef::Library(i) => self.library.types().get(*i),
        }
    }

    fn all_types(&self) -> impl Iterator<Item = &TypeInfo> {
        self.sources
            .iter()
            .map(|s| &s.info)
            .chain(self.library.types().iter().filter(|t| {
                matches!(self.by_name.get(&t.name), Some(TypeRef::Library(_)))
            }))
    }

    fn collect_header(&mut self) {
        let mut package = String::new();
        let mut imports = Vec::new();
        for child in &self.unit.children {
            match child.kind {
                SyntaxKind::PackageDeclaration => {
                    package = child
                        .child(Role::Name)
                        .and_then(SyntaxNode::qualified_name)
                        .unwrap_or_default();
                }
                SyntaxKind::ImportDeclaration => {
                    let Some(name) = child.child(Role::Name).and_then(SyntaxNode::qualified_name)
                    else {
                        continue;
                    };
                    imports.push(Import {
                        name,
                        is_static: child.has_modifier("static"),
                        on_demand: child.text() == "*",
                    });
                }
                _ => {}
            }
        }
        self.package = package;
        self.imports = imports;
    }

    /// Registers every (possibly nested) type declaration with an empty member list.
    fn collect_source_types(&mut self) {
        fn walk(
            node: &SyntaxNode,
            path: &mut Vec<usize>,
            prefix: &str,
            package: &str,
            outer: Option<&str>,
            out: &mut Vec<SourceType>,
        ) {
            for (idx, child) in node.children.iter().enumerate() {
                if child.role != Role::Member || !child.kind.is_type_declaration() {
                    continue;
                }
                let Some(simple) = child.name() else {
                    continue;
                };
                let qualified = if prefix.is_empty() {
                    simple.to_string()
                } else {
                    format!("{prefix}.{simple}")
                };
                let kind = match child.kind {
                    SyntaxKind::EnumDeclaration => TypeKind::Enum,
                    SyntaxKind::TypeDeclaration if child.text() == "class" => TypeKind::Class,
                    _ => TypeKind::Interface,
                };
                let mut info = match kind {
                    TypeKind::Class => TypeInfo::class(&qualified, Origin::Source),
                    TypeKind::Interface => TypeInfo::interface(&qualified, Origin::Source),
                    TypeKind::Enum => TypeInfo::enumeration(&qualified, Origin::Source),
                };
                info.package = package.to_string();
                info.simple_name = simple.to_string();
                info.outer = outer.map(str::to_string);
                info.type_params = child
                    .children_with(Role::TypeParameter)
                    .filter_map(|tp| tp.name().map(str::to_string))
                    .collect();

                path.push(idx);
                out.push(SourceType {
                    info,
                    span: child.span,
                    path: path.clone(),
                    methods: Vec::new(),
                });
                walk(child, path, &qualified, package, Some(&qualified), out);
                path.pop();
            }
        }

        let mut out = Vec::new();
        let package = self.package.clone();
        walk(&self.unit, &mut Vec::new(), &package, &package, None, &mut out);
        for (i, source) in out.iter().enumerate() {
            self.by_name.insert(source.info.name.clone(), TypeRef::Source(i));
        }
        self.sources = out;
    }

    /// Fills supertypes and members of the registered source types.
    fn build_source_members(&mut self) {
        let mut built = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let Some(decl) = self.unit.descendant(&source.path) else {
                built.push(None);
                continue;
            };
            built.push(Some(self.build_members(&source.info, decl)));
        }
        for (source, result) in self.sources.iter_mut().zip(built) {
            if let Some((info, methods)) = result {
                source.info = info;
                source.methods = methods;
            }
        }
    }

    fn build_members(
        &self,
        base: &TypeInfo,
        decl: &SyntaxNode,
    ) -> (TypeInfo, Vec<(Span, MethodSlot)>) {
        let mut info = base.clone();
        let mut slots = Vec::new();
        let cx = self.type_cx(decl.span.start + 1);
        let is_interface = info.kind == TypeKind::Interface;

        if let Some(sup) = decl.child(Role::SuperClass) {
            info.superclass = Some(self.ty_of_type_node(sup, &cx));
        }
        info.interfaces = decl
            .children_with(Role::SuperInterface)
            .map(|t| self.ty_of_type_node(t, &cx))
            .collect();

        let own_ty = Ty::declared(info.name.clone());
        for constant in decl.children_with(Role::EnumConstant) {
            if let Some(name) = constant.name() {
                info.fields.push(FieldInfo {
                    name: name.to_string(),
                    ty: own_ty.clone(),
                    is_static: true,
                    is_final: true,
                    is_enum_constant: true,
                    declaring: info.name.clone(),
                });
            }
        }

        for member in decl.children_with(Role::Member) {
            match member.kind {
                SyntaxKind::FieldDeclaration => {
                    let ty = member
                        .child(Role::Type)
                        .map(|t| self.ty_of_type_node(t, &cx))
                        .unwrap_or(Ty::Unknown);
                    for fragment in member.children_with(Role::Fragment) {
                        let Some(name) = fragment.name() else {
                            continue;
                        };
                        info.fields.push(FieldInfo {
                            name: name.to_string(),
                            ty: ty.clone(),
                            is_static: is_interface || member.has_modifier("static"),
                            is_final: is_interface || member.has_modifier("final"),
                            is_enum_constant: false,
                            declaring: info.name.clone(),
                        });
                    }
                }
                SyntaxKind::MethodDeclaration => {
                    let mcx = self.type_cx(member.span.start + 1);
                    let Some(name) = member.name() else {
                        continue;
                    };
                    let params = member
                        .children_with(Role::Parameter)
                        .map(|p| self.param_info(p, &mcx))
                        .collect();
                    let is_static = member.has_modifier("static");
                    match member.child(Role::ReturnType) {
                        Some(ret) => {
                            info.methods.push(MethodInfo {
                                name: name.to_string(),
                                params,
                                ret: self.ty_of_type_node(ret, &mcx),
                                is_static,
                                declaring: info.name.clone(),
                            });
                            slots.push((member.span, MethodSlot::Method(info.methods.len() - 1)));
                        }
                        None => {
                            info.constructors.push(MethodInfo {
                                name: name.to_string(),
                                params,
                                ret: Ty::Void,
                                is_static: false,
                                declaring: info.name.clone(),
                            });
                            slots.push((
                                member.span,
                                MethodSlot::Constructor(info.constructors.len() - 1),
                            ));
                        }
                    }
                }
                _ => {}
            }
        }

        if info.kind == TypeKind::Class && info.constructors.is_empty() {
            info.constructors.push(MethodInfo {
                name: info.simple_name.clone(),
                params: Vec::new(),
                ret: Ty::Void,
                is_static: false,
                declaring: info.name.clone(),
            });
        }

        (info, slots)
    }

    pub(super) fn param_info(&self, param: &SyntaxNode, cx: &TypeCx) -> ParamInfo {
        let mut ty = param
            .child(Role::Type)
            .map(|t| self.ty_of_type_node(t, cx))
            .unwrap_or(Ty::Unknown);
        if param.text() == "..." {
            ty = Ty::Array(Box::new(ty));
        }
        ParamInfo {
            name: param.name().unwrap_or_default().to_string(),
            ty,
        }
    }

    /// Type variables visible at `offset`: those of enclosing types and methods.
    pub(super) fn type_cx(&self, offset: u32) -> TypeCx {
        let path = TreePath::at(&self.unit, offset);
        let mut vars = Vec::new();
        for node in path.nodes() {
            if node.kind.is_type_declaration() || node.kind == SyntaxKind::MethodDeclaration {
                vars.extend(
                    node.children_with(Role::TypeParameter)
                        .filter_map(|tp| tp.name().map(str::to_string)),
                );
            }
        }
        TypeCx { offset, vars }
    }

    /// Converts a written type into a [`Ty`], resolving names from `cx.offset`.
    ///
    /// Names that resolve to nothing keep their written spelling.
    pub(super) fn ty_of_type_node(&self, node: &SyntaxNode, cx: &TypeCx) -> Ty {
        match node.kind {
            SyntaxKind::PrimitiveType => match node.text() {
                "void" => Ty::Void,
                text => PrimitiveKind::from_keyword(text)
                    .map(Ty::Primitive)
                    .unwrap_or(Ty::Unknown),
            },
            SyntaxKind::SimpleType => {
                let Some(name) = node.child(Role::Name).and_then(SyntaxNode::qualified_name)
                else {
                    return Ty::Unknown;
                };
                if cx.vars.iter().any(|v| *v == name) {
                    return Ty::Var(name);
                }
                match self.resolve_type_name_inner(&name, cx.offset) {
                    Some(info) => Ty::declared(info.name.clone()),
                    None => Ty::declared(name),
                }
            }
            SyntaxKind::ParameterizedType => {
                let base = node
                    .child(Role::Type)
                    .map(|t| self.ty_of_type_node(t, cx))
                    .unwrap_or(Ty::Unknown);
                let args: Vec<Ty> = node
                    .children_with(Role::TypeArgument)
                    .map(|a| self.ty_of_type_node(a, cx))
                    .collect();
                match base {
                    Ty::Declared { name, .. } => Ty::Declared { name, args },
                    other => other,
                }
            }
            SyntaxKind::QualifiedType => {
                let qualifier = node
                    .child(Role::Qualifier)
                    .map(|q| self.ty_of_type_node(q, cx))
                    .unwrap_or(Ty::Unknown);
                let (Some(outer), Some(name)) = (qualifier.qualified_name(), node.name()) else {
                    return Ty::Unknown;
                };
                Ty::declared(format!("{outer}.{name}"))
            }
            SyntaxKind::ArrayType => {
                let elem = node
                    .child(Role::Element)
                    .map(|e| self.ty_of_type_node(e, cx))
                    .unwrap_or(Ty::Unknown);
                Ty::Array(Box::new(elem))
            }
            SyntaxKind::WildcardType => match node.child(Role::Bound) {
                Some(bound) if node.text() == "extends" => self.ty_of_type_node(bound, cx),
                _ => Ty::Var("?".into()),
            },
            SyntaxKind::UnionType | SyntaxKind::IntersectionType => node
                .child(Role::Type)
                .map(|t| self.ty_of_type_node(t, cx))
                .unwrap_or(Ty::Unknown),
            _ => Ty::Unknown,
        }
    }

    fn resolve_type_name_inner(&self, name: &str, offset: u32) -> Option<&TypeInfo> {
        if let Some((head, rest)) = name.split_once('.') {
            if let Some(outer) = self.resolve_simple_type_name(head, offset) {
                if let Some(inner) = self.lookup(&format!("{}.{rest}", outer.name)) {
                    return Some(inner);
                }
            }
            return self.lookup(name);
        }
        self.resolve_simple_type_name(name, offset)
    }

    fn resolve_simple_type_name(&self, name: &str, offset: u32) -> Option<&TypeInfo> {
        // 1) Enclosing types and their member types (own or inherited).
        for source in self.enclosing_sources(offset) {
            if source.info.simple_name == name {
                return Some(&source.info);
            }
            if let Some(found) = self.member_type(&source.info, name) {
                return Some(found);
            }
        }

        // 2) Top-level types of this compilation unit and single-type imports.
        for import in self.imports.iter().filter(|i| !i.on_demand && !i.is_static) {
            if import.name.rsplit('.').next() == Some(name) {
                if let Some(found) = self.lookup(&import.name) {
                    return Some(found);
                }
            }
        }

        // 3) Same package.
        let same_package = if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.package)
        };
        if let Some(found) = self.lookup(&same_package) {
            return Some(found);
        }

        // 4) On-demand imports, then `java.lang`.
        for import in self.imports.iter().filter(|i| i.on_demand && !i.is_static) {
            if let Some(found) = self.lookup(&format!("{}.{name}", import.name)) {
                return Some(found);
            }
        }
        self.lookup(&format!("java.lang.{name}"))
    }

    /// Member type `name` declared in `owner` or one of its supertypes.
    fn member_type(&self, owner: &TypeInfo, name: &str) -> Option<&TypeInfo> {
        let mut pending = vec![owner.name.clone()];
        let mut seen = Vec::new();
        while let Some(current) = pending.pop() {
            if seen.contains(&current) {
                continue;
            }
            if let Some(found) = self.lookup(&format!("{current}.{name}")) {
                return Some(found);
            }
            if let Some(info) = self.lookup(&current) {
                for sup in info.superclass.iter().chain(&info.interfaces) {
                    if let Some(sup_name) = sup.qualified_name() {
                        pending.push(sup_name.to_string());
                    }
                }
            }
            seen.push(current);
        }
        None
    }

    /// Source types whose declaration strictly contains `offset`, innermost first.
    fn enclosing_sources(&self, offset: u32) -> Vec<&SourceType> {
        let mut found: Vec<&SourceType> = self
            .sources
            .iter()
            .filter(|s| s.span.strictly_contains(offset))
            .collect();
        found.sort_by_key(|s| s.span.len());
        found
    }

    fn collect_members(&self, name: &str, args: &[Ty], out: &mut Members, seen: &mut Vec<String>) {
        if seen.iter().any(|s| s == name) {
            return;
        }
        seen.push(name.to_string());
        let Some(info) = self.lookup(name) else {
            return;
        };
        let subst: Vec<(String, Ty)> = info
            .type_params
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect();

        for field in &info.fields {
            if out.fields.iter().all(|f| f.name != field.name) {
                let mut field = field.clone();
                field.ty = field.ty.substitute(&subst);
                out.fields.push(field);
            }
        }
        for method in &info.methods {
            let mut method = method.clone();
            for param in &mut method.params {
                param.ty = param.ty.substitute(&subst);
            }
            method.ret = method.ret.substitute(&subst);
            let overridden = out.methods.iter().any(|m| {
                m.name == method.name
                    && m.params.len() == method.params.len()
                    && m.params
                        .iter()
                        .zip(&method.params)
                        .all(|(a, b)| a.ty.same_erasure(&b.ty))
            });
            if !overridden {
                out.methods.push(method);
            }
        }

        let supers: Vec<Ty> = info
            .superclass
            .iter()
            .chain(&info.interfaces)
            .map(|t| t.substitute(&subst))
            .collect();
        let is_interface = info.kind == TypeKind::Interface;
        for sup in &supers {
            if let Ty::Declared { name, args } = sup {
                self.collect_members(name, args, out, seen);
            }
        }
        if is_interface {
            self.collect_members("java.lang.Object", &[], out, seen);
        }
    }
}

impl SemanticModel for Index {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn resolve(&mut self) {
        if self.phase == Phase::Resolved {
            return;
        }
        self.collect_header();
        self.collect_source_types();
        self.build_source_members();
        self.phase = Phase::Resolved;
        tracing::debug!(
            package = %self.package,
            imports = self.imports.len(),
            source_types = self.sources.len(),
            "semantic index resolved"
        );
    }

    fn package(&self) -> &str {
        &self.package
    }

    fn imports(&self) -> &[Import] {
        &self.imports
    }

    fn elements_in_scope(&self, offset: u32, filter: &dyn Fn(&Element) -> bool) -> Vec<Element> {
        if self.phase != Phase::Resolved {
            return Vec::new();
        }
        self.scope_at(offset)
            .into_iter()
            .filter(|e| filter(e))
            .collect()
    }

    fn type_named(&self, qualified: &str) -> Option<&TypeInfo> {
        self.lookup(qualified)
    }

    fn find_types(&self, filter: &dyn Fn(&TypeInfo) -> bool) -> Vec<&TypeInfo> {
        if self.phase != Phase::Resolved {
            return Vec::new();
        }
        self.all_types().filter(|t| filter(t)).collect()
    }

    fn resolve_type_name(&self, name: &str, offset: u32) -> Option<&TypeInfo> {
        if self.phase != Phase::Resolved {
            return None;
        }
        self.resolve_type_name_inner(name, offset)
    }

    fn members_of(&self, ty: &Ty) -> Members {
        let mut out = Members::default();
        match ty {
            Ty::Declared { name, args } => {
                self.collect_members(name, args, &mut out, &mut Vec::new());
            }
            Ty::Array(_) => {
                out.fields.push(FieldInfo {
                    name: "length".into(),
                    ty: Ty::Primitive(PrimitiveKind::Int),
                    is_static: false,
                    is_final: true,
                    is_enum_constant: false,
                    declaring: String::new(),
                });
                self.collect_members("java.lang.Object", &[], &mut out, &mut Vec::new());
            }
            Ty::Var(_) => {
                self.collect_members("java.lang.Object", &[], &mut out, &mut Vec::new());
            }
            _ => {}
        }
        out
    }

    fn is_assignable(&self, from: &Ty, to: &Ty) -> bool {
        self.assignable(from, to)
    }

    fn type_of_snippet(&self, snippet: &str, offset: u32) -> Ty {
        let parsed = parse_expression(snippet);
        if !parsed.diagnostics.is_empty() {
            return Ty::Unknown;
        }
        self.type_of_expr(&parsed.expr, offset)
    }

    fn enclosing_type(&self, offset: u32) -> Option<&TypeInfo> {
        self.enclosing_sources(offset).first().map(|s| &s.info)
    }

    fn enclosing_method(&self, offset: u32) -> Option<&MethodInfo> {
        for source in self.enclosing_sources(offset) {
            let slot = source
                .methods
                .iter()
                .filter(|(span, _)| span.strictly_contains(offset))
                .min_by_key(|(span, _)| span.len());
            if let Some((_, slot)) = slot {
                return match slot {
                    MethodSlot::Method(i) => source.info.methods.get(*i),
                    MethodSlot::Constructor(i) => source.info.constructors.get(*i),
                };
            }
        }
        None
    }
}
