use super::ty::*;
use crate::semantic::{Origin, TypeInfo};

const BOOT: Origin = Origin::Boot;

pub(super) fn types() -> Vec<TypeInfo> {
    vec![
        TypeInfo::interface("java.io.Closeable", BOOT)
            .extends(named("java.lang.AutoCloseable"))
            .method(method!("close", params!(), void())),
        TypeInfo::class("java.io.PrintStream", BOOT).methods(vec![
            method!("println", params!(), void()),
            method!("println", params!(p!("x", string())), void()),
            method!("println", params!(p!("x", int())), void()),
            method!("println", params!(p!("x", object())), void()),
            method!("print", params!(p!("s", string())), void()),
            method!(
                "printf",
                params!(p!("format", string()), p!("args", array(object()))),
                named("java.io.PrintStream")
            ),
            method!("flush", params!(), void()),
        ]),
        TypeInfo::class("java.io.InputStream", BOOT)
            .implements(named("java.io.Closeable"))
            .methods(vec![
                method!("read", params!(), int()),
                method!("available", params!(), int()),
                method!("close", params!(), void()),
            ]),
        TypeInfo::class("java.io.File", BOOT)
            .constructor(params!(p!("pathname", string())))
            .methods(vec![
                method!("exists", params!(), boolean()),
                method!("getName", params!(), string()),
                method!("getPath", params!(), string()),
                method!("isDirectory", params!(), boolean()),
                method!("delete", params!(), boolean()),
            ]),
        TypeInfo::class("java.io.IOException", BOOT)
            .extends(named("java.lang.Exception"))
            .constructor(params!())
            .constructor(params!(p!("message", string()))),
        TypeInfo::class("java.io.FileNotFoundException", BOOT)
            .extends(named("java.io.IOException"))
            .constructor(params!())
            .constructor(params!(p!("message", string()))),
        TypeInfo::class("java.io.UncheckedIOException", BOOT)
            .extends(named("java.lang.RuntimeException"))
            .constructor(params!(
                p!("message", string()),
                p!("cause", named("java.io.IOException"))
            )),
    ]
}
