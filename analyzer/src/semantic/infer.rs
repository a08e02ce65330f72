use super::index::Index;
use super::{MethodInfo, PrimitiveKind, SemanticModel, Ty};
use crate::syntax::{Role, SyntaxKind, SyntaxNode};

/// What a name-like expression denotes.
enum Denotation {
    Value(Ty),
    Type(String),
    Nothing,
}

impl Index {
    /// Static type of `expr`, with names resolved in the scope at `offset`.
    pub(super) fn type_of_expr(&self, expr: &SyntaxNode, offset: u32) -> Ty {
        use SyntaxKind::*;
        match expr.kind {
            NumberLiteral => number_literal_type(expr.text()),
            StringLiteral | TextBlock => Ty::string(),
            CharacterLiteral => Ty::Primitive(PrimitiveKind::Char),
            BooleanLiteral => Ty::Primitive(PrimitiveKind::Boolean),
            NullLiteral => Ty::Null,

            SimpleName | QualifiedName | FieldAccess => match self.denote(expr, offset) {
                Denotation::Value(ty) => ty,
                _ => Ty::Unknown,
            },
            SuperFieldAccess => {
                let Some(name) = expr.name() else {
                    return Ty::Unknown;
                };
                self.superclass_of_enclosing(offset)
                    .and_then(|sup| {
                        self.members_of(&sup)
                            .fields
                            .into_iter()
                            .find(|f| f.name == name)
                    })
                    .map(|f| f.ty)
                    .unwrap_or(Ty::Unknown)
            }
            MethodInvocation => self
                .invoked_method(expr, offset)
                .map(|m| m.ret)
                .unwrap_or(Ty::Unknown),
            SuperMethodInvocation => {
                let Some(name) = expr.name() else {
                    return Ty::Unknown;
                };
                let arity = expr.children_with(Role::Argument).count();
                self.superclass_of_enclosing(offset)
                    .and_then(|sup| pick_method(self.members_of(&sup).methods, name, arity))
                    .map(|m| m.ret)
                    .unwrap_or(Ty::Unknown)
            }

            ClassInstanceCreation => expr
                .child(Role::Type)
                .map(|t| self.ty_of_type_node(t, &self.type_cx(offset)))
                .unwrap_or(Ty::Unknown),
            ArrayCreation => {
                let Some(elem) = expr.child(Role::Type) else {
                    return Ty::Unknown;
                };
                let mut ty = self.ty_of_type_node(elem, &self.type_cx(offset));
                let dims = expr.children_with(Role::Dimension).count().max(1);
                for _ in 0..dims {
                    ty = Ty::Array(Box::new(ty));
                }
                ty
            }
            CastExpression => expr
                .child(Role::Type)
                .map(|t| self.ty_of_type_node(t, &self.type_cx(offset)))
                .unwrap_or(Ty::Unknown),
            ParenthesizedExpression => expr
                .child(Role::Expression)
                .map(|e| self.type_of_expr(e, offset))
                .unwrap_or(Ty::Unknown),
            Assignment => expr
                .child(Role::Left)
                .map(|e| self.type_of_expr(e, offset))
                .unwrap_or(Ty::Unknown),
            ConditionalExpression => {
                let then = expr
                    .child(Role::Then)
                    .map(|e| self.type_of_expr(e, offset))
                    .unwrap_or(Ty::Unknown);
                match then {
                    Ty::Null | Ty::Unknown => expr
                        .child(Role::Else)
                        .map(|e| self.type_of_expr(e, offset))
                        .unwrap_or(then),
                    _ => then,
                }
            }
            InfixExpression => self.infix_type(expr, offset),
            InstanceofExpression => Ty::Primitive(PrimitiveKind::Boolean),
            PrefixExpression => {
                let operand = expr
                    .child(Role::Operand)
                    .map(|e| self.type_of_expr(e, offset))
                    .unwrap_or(Ty::Unknown);
                match expr.text() {
                    "!" => Ty::Primitive(PrimitiveKind::Boolean),
                    "++" | "--" => operand,
                    _ => match unboxed(&operand) {
                        Some(p) if p.is_numeric() => Ty::Primitive(unary_promotion(p)),
                        _ => operand,
                    },
                }
            }
            PostfixExpression => expr
                .child(Role::Operand)
                .map(|e| self.type_of_expr(e, offset))
                .unwrap_or(Ty::Unknown),
            ThisExpression => match expr.child(Role::Qualifier) {
                Some(qualifier) => match self.denote(qualifier, offset) {
                    Denotation::Type(name) => self
                        .lookup(&name)
                        .map(|t| t.as_ty())
                        .unwrap_or(Ty::declared(name)),
                    _ => Ty::Unknown,
                },
                None => self
                    .enclosing_type(offset)
                    .map(|t| t.as_ty())
                    .unwrap_or(Ty::Unknown),
            },
            ArrayAccess => match expr.child(Role::Receiver).map(|r| self.type_of_expr(r, offset)) {
                Some(Ty::Array(elem)) => *elem,
                _ => Ty::Unknown,
            },
            TypeLiteral => {
                let arg = expr
                    .child(Role::Type)
                    .map(|t| self.ty_of_type_node(t, &self.type_cx(offset)))
                    .map(|t| match t {
                        Ty::Primitive(p) => Ty::declared(p.boxed()),
                        other => other,
                    })
                    .unwrap_or(Ty::Unknown);
                Ty::Declared {
                    name: "java.lang.Class".into(),
                    args: vec![arg],
                }
            }
            _ => Ty::Unknown,
        }
    }

    /// Resolves a name-like expression to a value, a type or nothing.
    fn denote(&self, expr: &SyntaxNode, offset: u32) -> Denotation {
        match expr.kind {
            SyntaxKind::SimpleName => {
                let name = expr.text();
                if let Some(element) = self.scope_at(offset).into_iter().find(|e| e.name == name) {
                    return Denotation::Value(element.ty);
                }
                if let Some(field) = self.static_import_field(name) {
                    return Denotation::Value(field);
                }
                match self.resolve_type_name(name, offset) {
                    Some(info) => Denotation::Type(info.name.clone()),
                    None => Denotation::Nothing,
                }
            }
            SyntaxKind::QualifiedName | SyntaxKind::FieldAccess => {
                let qualifier_role = if expr.kind == SyntaxKind::QualifiedName {
                    Role::Qualifier
                } else {
                    Role::Receiver
                };
                let (Some(qualifier), Some(name)) = (expr.child(qualifier_role), expr.name())
                else {
                    return Denotation::Nothing;
                };
                match self.denote(qualifier, offset) {
                    Denotation::Value(ty) => self
                        .field_of(&ty, name)
                        .map(Denotation::Value)
                        .unwrap_or(Denotation::Nothing),
                    Denotation::Type(owner) => {
                        if let Some(ty) = self.field_of(&Ty::declared(owner.clone()), name) {
                            return Denotation::Value(ty);
                        }
                        let nested = format!("{owner}.{name}");
                        match self.lookup(&nested) {
                            Some(info) => Denotation::Type(info.name.clone()),
                            None => Denotation::Nothing,
                        }
                    }
                    Denotation::Nothing => match expr.qualified_name() {
                        Some(dotted) => match self.lookup(&dotted) {
                            Some(info) => Denotation::Type(info.name.clone()),
                            None => Denotation::Nothing,
                        },
                        None => Denotation::Nothing,
                    },
                }
            }
            _ => Denotation::Value(self.type_of_expr(expr, offset)),
        }
    }

    fn field_of(&self, ty: &Ty, name: &str) -> Option<Ty> {
        self.members_of(ty)
            .fields
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.ty)
    }

    /// The method a `MethodInvocation` most plausibly calls, picked by name and arity.
    pub(super) fn invoked_method(&self, call: &SyntaxNode, offset: u32) -> Option<MethodInfo> {
        let name = call.name()?;
        let arity = call.children_with(Role::Argument).count();
        match call.child(Role::Receiver) {
            Some(receiver) => {
                let owner = match self.denote(receiver, offset) {
                    Denotation::Value(ty) => ty,
                    Denotation::Type(name) => Ty::declared(name),
                    Denotation::Nothing => return None,
                };
                pick_method(self.members_of(&owner).methods, name, arity)
            }
            None => {
                for ty in self.enclosing_type_chain(offset) {
                    if let Some(m) = pick_method(self.members_of(&ty).methods, name, arity) {
                        return Some(m);
                    }
                }
                self.static_import_methods(name)
                    .and_then(|methods| pick_method(methods, name, arity))
            }
        }
    }

    fn superclass_of_enclosing(&self, offset: u32) -> Option<Ty> {
        self.enclosing_type(offset)?.superclass.clone()
    }

    fn static_import_field(&self, name: &str) -> Option<Ty> {
        for import in self.imports().iter().filter(|i| i.is_static) {
            let owner = match import.name.rsplit_once('.') {
                _ if import.on_demand => import.name.as_str(),
                Some((owner, member)) if member == name => owner,
                _ => continue,
            };
            if let Some(ty) = self.field_of(&Ty::declared(owner), name) {
                return Some(ty);
            }
        }
        None
    }

    fn static_import_methods(&self, name: &str) -> Option<Vec<MethodInfo>> {
        let mut found = Vec::new();
        for import in self.imports().iter().filter(|i| i.is_static) {
            let owner = match import.name.rsplit_once('.') {
                _ if import.on_demand => import.name.as_str(),
                Some((owner, member)) if member == name => owner,
                _ => continue,
            };
            found.extend(
                self.members_of(&Ty::declared(owner))
                    .methods
                    .into_iter()
                    .filter(|m| m.is_static && m.name == name),
            );
        }
        (!found.is_empty()).then_some(found)
    }

    fn infix_type(&self, expr: &SyntaxNode, offset: u32) -> Ty {
        let left = expr
            .child(Role::Left)
            .map(|e| self.type_of_expr(e, offset))
            .unwrap_or(Ty::Unknown);
        let right = expr
            .child(Role::Right)
            .map(|e| self.type_of_expr(e, offset))
            .unwrap_or(Ty::Unknown);
        match expr.text() {
            "==" | "!=" | "<" | ">" | "<=" | ">=" | "&&" | "||" => {
                Ty::Primitive(PrimitiveKind::Boolean)
            }
            "+" if left == Ty::string() || right == Ty::string() => Ty::string(),
            "&" | "|" | "^" if left.is_boolean() && right.is_boolean() => {
                Ty::Primitive(PrimitiveKind::Boolean)
            }
            "<<" | ">>" | ">>>" => match unboxed(&left) {
                Some(p) if p.is_numeric() => Ty::Primitive(unary_promotion(p)),
                _ => Ty::Unknown,
            },
            _ => match (unboxed(&left), unboxed(&right)) {
                (Some(a), Some(b)) if a.is_numeric() && b.is_numeric() => {
                    Ty::Primitive(binary_promotion(a, b))
                }
                _ => Ty::Unknown,
            },
        }
    }
}

/// `1L` is `long`, `1f` is `float`, `1.0` and `1d` are `double`, everything else `int`.
fn number_literal_type(text: &str) -> Ty {
    let lower = text.to_ascii_lowercase();
    let hex = lower.starts_with("0x");
    let kind = if lower.ends_with('l') {
        PrimitiveKind::Long
    } else if !hex && lower.ends_with('f') {
        PrimitiveKind::Float
    } else if !hex && (lower.ends_with('d') || lower.contains('.') || lower.contains('e')) {
        PrimitiveKind::Double
    } else {
        PrimitiveKind::Int
    };
    Ty::Primitive(kind)
}

fn unboxed(ty: &Ty) -> Option<PrimitiveKind> {
    match ty {
        Ty::Primitive(p) => Some(*p),
        Ty::Declared { name, .. } => PrimitiveKind::unboxed(name),
        _ => None,
    }
}

fn unary_promotion(p: PrimitiveKind) -> PrimitiveKind {
    match p {
        PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Char => PrimitiveKind::Int,
        other => other,
    }
}

fn binary_promotion(a: PrimitiveKind, b: PrimitiveKind) -> PrimitiveKind {
    use PrimitiveKind::*;
    if a == Double || b == Double {
        Double
    } else if a == Float || b == Float {
        Float
    } else if a == Long || b == Long {
        Long
    } else {
        Int
    }
}

/// Same name and arity first, then a varargs method that accepts `arity` arguments.
fn pick_method(methods: Vec<MethodInfo>, name: &str, arity: usize) -> Option<MethodInfo> {
    let mut varargs = None;
    for m in methods.into_iter().filter(|m| m.name == name) {
        if m.arity() == arity {
            return Some(m);
        }
        let takes_rest = matches!(m.params.last(), Some(p) if matches!(p.ty, Ty::Array(_)));
        if varargs.is_none() && takes_rest && arity + 1 >= m.arity() {
            varargs = Some(m);
        }
    }
    varargs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_literal_suffixes() {
        assert_eq!(number_literal_type("1"), Ty::Primitive(PrimitiveKind::Int));
        assert_eq!(number_literal_type("10L"), Ty::Primitive(PrimitiveKind::Long));
        assert_eq!(number_literal_type("2.5"), Ty::Primitive(PrimitiveKind::Double));
        assert_eq!(number_literal_type("2f"), Ty::Primitive(PrimitiveKind::Float));
        assert_eq!(number_literal_type("0xFF"), Ty::Primitive(PrimitiveKind::Int));
        assert_eq!(number_literal_type("1e3"), Ty::Primitive(PrimitiveKind::Double));
    }

    #[test]
    fn numeric_promotion() {
        use PrimitiveKind::*;
        assert_eq!(binary_promotion(Int, Long), Long);
        assert_eq!(binary_promotion(Char, Short), Int);
        assert_eq!(binary_promotion(Float, Long), Float);
        assert_eq!(unary_promotion(Byte), Int);
    }
}
