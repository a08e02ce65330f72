macro_rules! p {
    ($name:expr, $ty:expr $(,)?) => {
        $crate::semantic::ParamInfo {
            name: $name.into(),
            ty: $ty,
        }
    };
}

macro_rules! params {
    () => {
        Vec::<$crate::semantic::ParamInfo>::new()
    };
    ($($param:expr),+ $(,)?) => {
        vec![$($param),+]
    };
}

macro_rules! method {
    ($name:literal, $params:expr, $ret:expr $(,)?) => {
        $crate::semantic::MethodInfo {
            name: $name.into(),
            params: $params,
            ret: $ret,
            is_static: false,
            declaring: String::new(),
        }
    };
}

macro_rules! static_method {
    ($name:literal, $params:expr, $ret:expr $(,)?) => {
        $crate::semantic::MethodInfo {
            name: $name.into(),
            params: $params,
            ret: $ret,
            is_static: true,
            declaring: String::new(),
        }
    };
}
