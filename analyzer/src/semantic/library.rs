use super::{FieldInfo, MethodInfo, Origin, ParamInfo, Ty, TypeInfo, TypeKind};

/// Declared types available outside the current sources (compile and boot classpath).
#[derive(Debug, Clone, Default)]
pub struct Library {
    types: Vec<TypeInfo>,
}

impl Library {
    pub fn new(types: Vec<TypeInfo>) -> Library {
        Library { types }
    }

    pub fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    pub fn with_type(mut self, ty: TypeInfo) -> Library {
        self.types.push(ty);
        self
    }

    pub fn extend(mut self, other: Library) -> Library {
        self.types.extend(other.types);
        self
    }
}

impl TypeInfo {
    fn skeleton(qualified: &str, kind: TypeKind, origin: Origin) -> TypeInfo {
        // A nested type's package is everything before the first capitalized segment.
        let segments: Vec<&str> = qualified.split('.').collect();
        let first_type = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
            .unwrap_or(segments.len().saturating_sub(1));
        let package = segments[..first_type].join(".");
        let outer = (segments.len() > first_type + 1)
            .then(|| segments[..segments.len() - 1].join("."));
        let simple_name = segments.last().copied().unwrap_or(qualified).to_string();
        let superclass = (kind != TypeKind::Interface && qualified != "java.lang.Object")
            .then(|| {
                if kind == TypeKind::Enum {
                    Ty::Declared {
                        name: "java.lang.Enum".into(),
                        args: vec![Ty::declared(qualified)],
                    }
                } else {
                    Ty::object()
                }
            });

        TypeInfo {
            name: qualified.to_string(),
            simple_name,
            package,
            outer,
            kind,
            superclass,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            origin,
        }
    }

    pub fn class(qualified: &str, origin: Origin) -> TypeInfo {
        TypeInfo::skeleton(qualified, TypeKind::Class, origin)
    }

    pub fn interface(qualified: &str, origin: Origin) -> TypeInfo {
        TypeInfo::skeleton(qualified, TypeKind::Interface, origin)
    }

    pub fn enumeration(qualified: &str, origin: Origin) -> TypeInfo {
        TypeInfo::skeleton(qualified, TypeKind::Enum, origin)
    }

    pub fn generic(mut self, params: &[&str]) -> TypeInfo {
        self.type_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn extends(mut self, superclass: Ty) -> TypeInfo {
        if self.kind == TypeKind::Interface {
            self.interfaces.push(superclass);
        } else {
            self.superclass = Some(superclass);
        }
        self
    }

    pub fn implements(mut self, interface: Ty) -> TypeInfo {
        self.interfaces.push(interface);
        self
    }

    pub fn field(mut self, name: &str, ty: Ty) -> TypeInfo {
        self.push_field(name, ty, false);
        self
    }

    pub fn constant(mut self, name: &str, ty: Ty) -> TypeInfo {
        self.push_field(name, ty, true);
        self
    }

    pub fn with_enum_constants(mut self, names: &[&str]) -> TypeInfo {
        let ty = Ty::declared(self.name.clone());
        for name in names {
            self.fields.push(FieldInfo {
                name: name.to_string(),
                ty: ty.clone(),
                is_static: true,
                is_final: true,
                is_enum_constant: true,
                declaring: self.name.clone(),
            });
        }
        self
    }

    fn push_field(&mut self, name: &str, ty: Ty, is_static: bool) {
        self.fields.push(FieldInfo {
            name: name.to_string(),
            ty,
            is_static,
            is_final: is_static,
            is_enum_constant: false,
            declaring: self.name.clone(),
        });
    }

    pub fn method(mut self, mut method: MethodInfo) -> TypeInfo {
        method.declaring = self.name.clone();
        self.methods.push(method);
        self
    }

    pub fn methods(self, methods: Vec<MethodInfo>) -> TypeInfo {
        methods.into_iter().fold(self, TypeInfo::method)
    }

    pub fn constructor(mut self, params: Vec<ParamInfo>) -> TypeInfo {
        self.constructors.push(MethodInfo {
            name: self.simple_name.clone(),
            params,
            ret: Ty::Void,
            is_static: false,
            declaring: self.name.clone(),
        });
        self
    }
}
