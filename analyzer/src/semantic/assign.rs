use super::index::Index;
use super::{PrimitiveKind, Ty};

const ARRAY_SUPERTYPES: [&str; 3] = [
    "java.lang.Object",
    "java.lang.Cloneable",
    "java.io.Serializable",
];

impl Index {
    /// Assignment compatibility of a value of type `from` to a variable of type `to`.
    ///
    /// An unknown target accepts everything; an unknown source is never assignable.
    pub(super) fn assignable(&self, from: &Ty, to: &Ty) -> bool {
        match (from, to) {
            (_, Ty::Unknown) => true,
            (Ty::Unknown, _) | (Ty::Void, _) | (_, Ty::Void) => false,
            _ if from == to => true,
            (Ty::Var(_), _) | (_, Ty::Var(_)) => true,

            (Ty::Primitive(a), Ty::Primitive(b)) => widens(*a, *b),
            (Ty::Null, _) => to.is_reference(),
            (_, Ty::Null) => false,

            (Ty::Primitive(p), Ty::Declared { .. }) => {
                self.is_subtype(&Ty::declared(p.boxed()), to)
            }
            (Ty::Declared { name, .. }, Ty::Primitive(target)) => {
                PrimitiveKind::unboxed(name).is_some_and(|p| widens(p, *target))
            }

            (Ty::Declared { .. }, Ty::Declared { .. }) => self.is_subtype(from, to),
            (Ty::Array(_), Ty::Declared { name, .. }) => ARRAY_SUPERTYPES.contains(&name.as_str()),
            (Ty::Array(a), Ty::Array(b)) => match (a.as_ref(), b.as_ref()) {
                (Ty::Primitive(x), Ty::Primitive(y)) => x == y,
                (Ty::Primitive(_), _) | (_, Ty::Primitive(_)) => false,
                _ => self.assignable(a, b),
            },
            _ => false,
        }
    }

    /// Whether declared type `from` reaches `to` through its supertypes.
    fn is_subtype(&self, from: &Ty, to: &Ty) -> bool {
        let Ty::Declared { name: target, args: target_args } = to else {
            return false;
        };
        if target == "java.lang.Object" {
            return true;
        }

        let mut pending = vec![from.clone()];
        let mut seen: Vec<Ty> = Vec::new();
        while let Some(current) = pending.pop() {
            let Ty::Declared { name, args } = &current else {
                continue;
            };
            if name == target {
                if args.is_empty() || target_args.is_empty() {
                    return true;
                }
                if args.len() == target_args.len()
                    && args.iter().zip(target_args).all(|(a, b)| type_args_match(a, b))
                {
                    return true;
                }
            }
            if seen.contains(&current) {
                continue;
            }
            if let Some(info) = self.lookup(name) {
                let subst: Vec<(String, Ty)> = info
                    .type_params
                    .iter()
                    .cloned()
                    .zip(args.iter().cloned())
                    .collect();
                for sup in info.superclass.iter().chain(&info.interfaces) {
                    pending.push(sup.substitute(&subst));
                }
            }
            seen.push(current);
        }
        false
    }
}

fn type_args_match(a: &Ty, b: &Ty) -> bool {
    matches!(a, Ty::Var(_)) || matches!(b, Ty::Var(_)) || a == b
}

/// Identity or widening primitive conversion.
fn widens(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    if from == to {
        return true;
    }
    match from {
        Byte => matches!(to, Short | Int | Long | Float | Double),
        Short => matches!(to, Int | Long | Float | Double),
        Char => matches!(to, Int | Long | Float | Double),
        Int => matches!(to, Long | Float | Double),
        Long => matches!(to, Float | Double),
        Float => matches!(to, Double),
        Double | Boolean => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_widening() {
        use PrimitiveKind::*;
        assert!(widens(Int, Long));
        assert!(widens(Char, Int));
        assert!(!widens(Long, Int));
        assert!(!widens(Char, Short));
        assert!(!widens(Boolean, Int));
    }
}
