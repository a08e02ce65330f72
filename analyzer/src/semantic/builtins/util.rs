use super::ty::*;
use crate::semantic::{Origin, TypeInfo};

const BOOT: Origin = Origin::Boot;

pub(super) fn types() -> Vec<TypeInfo> {
    let e = || var("E");
    let k = || var("K");
    let v = || var("V");

    vec![
        TypeInfo::interface("java.util.Iterator", BOOT)
            .generic(&["E"])
            .methods(vec![
                method!("hasNext", params!(), boolean()),
                method!("next", params!(), e()),
                method!("remove", params!(), void()),
            ]),
        TypeInfo::interface("java.util.Collection", BOOT)
            .generic(&["E"])
            .extends(generic("java.lang.Iterable", vec![e()]))
            .methods(vec![
                method!("size", params!(), int()),
                method!("isEmpty", params!(), boolean()),
                method!("contains", params!(p!("o", object())), boolean()),
                method!("add", params!(p!("e", e())), boolean()),
                method!("remove", params!(p!("o", object())), boolean()),
                method!(
                    "addAll",
                    params!(p!("c", generic("java.util.Collection", vec![e()]))),
                    boolean()
                ),
                method!("clear", params!(), void()),
                method!("toArray", params!(), array(object())),
            ]),
        TypeInfo::interface("java.util.List", BOOT)
            .generic(&["E"])
            .extends(generic("java.util.Collection", vec![e()]))
            .methods(vec![
                method!("get", params!(p!("index", int())), e()),
                method!("set", params!(p!("index", int()), p!("element", e())), e()),
                method!("add", params!(p!("index", int()), p!("element", e())), void()),
                method!("indexOf", params!(p!("o", object())), int()),
                method!(
                    "subList",
                    params!(p!("fromIndex", int()), p!("toIndex", int())),
                    generic("java.util.List", vec![e()])
                ),
                static_method!(
                    "of",
                    params!(p!("elements", array(e()))),
                    generic("java.util.List", vec![e()])
                ),
            ]),
        TypeInfo::class("java.util.ArrayList", BOOT)
            .generic(&["E"])
            .implements(generic("java.util.List", vec![e()]))
            .constructor(params!())
            .constructor(params!(p!("initialCapacity", int())))
            .methods(vec![
                method!("ensureCapacity", params!(p!("minCapacity", int())), void()),
                method!("trimToSize", params!(), void()),
            ]),
        TypeInfo::class("java.util.LinkedList", BOOT)
            .generic(&["E"])
            .implements(generic("java.util.List", vec![e()]))
            .constructor(params!())
            .methods(vec![
                method!("addFirst", params!(p!("e", e())), void()),
                method!("addLast", params!(p!("e", e())), void()),
                method!("getFirst", params!(), e()),
                method!("getLast", params!(), e()),
            ]),
        TypeInfo::interface("java.util.Set", BOOT)
            .generic(&["E"])
            .extends(generic("java.util.Collection", vec![e()])),
        TypeInfo::class("java.util.HashSet", BOOT)
            .generic(&["E"])
            .implements(generic("java.util.Set", vec![e()]))
            .constructor(params!()),
        TypeInfo::interface("java.util.Map", BOOT)
            .generic(&["K", "V"])
            .methods(vec![
                method!("size", params!(), int()),
                method!("isEmpty", params!(), boolean()),
                method!("get", params!(p!("key", object())), v()),
                method!("put", params!(p!("key", k()), p!("value", v())), v()),
                method!("remove", params!(p!("key", object())), v()),
                method!("containsKey", params!(p!("key", object())), boolean()),
                method!("containsValue", params!(p!("value", object())), boolean()),
                method!(
                    "getOrDefault",
                    params!(p!("key", object()), p!("defaultValue", v())),
                    v()
                ),
                method!("keySet", params!(), generic("java.util.Set", vec![k()])),
                method!("values", params!(), generic("java.util.Collection", vec![v()])),
                method!(
                    "entrySet",
                    params!(),
                    generic(
                        "java.util.Set",
                        vec![generic("java.util.Map.Entry", vec![k(), v()])]
                    )
                ),
                method!("clear", params!(), void()),
            ]),
        TypeInfo::interface("java.util.Map.Entry", BOOT)
            .generic(&["K", "V"])
            .methods(vec![
                method!("getKey", params!(), k()),
                method!("getValue", params!(), v()),
                method!("setValue", params!(p!("value", v())), v()),
            ]),
        TypeInfo::class("java.util.HashMap", BOOT)
            .generic(&["K", "V"])
            .implements(generic("java.util.Map", vec![k(), v()]))
            .constructor(params!())
            .constructor(params!(p!("initialCapacity", int()))),
        TypeInfo::class("java.util.TreeMap", BOOT)
            .generic(&["K", "V"])
            .implements(generic("java.util.Map", vec![k(), v()]))
            .constructor(params!()),
        TypeInfo::class("java.util.Optional", BOOT)
            .generic(&["T"])
            .methods(vec![
                method!("isPresent", params!(), boolean()),
                method!("get", params!(), var("T")),
                method!("orElse", params!(p!("other", var("T"))), var("T")),
                static_method!(
                    "of",
                    params!(p!("value", var("T"))),
                    generic("java.util.Optional", vec![var("T")])
                ),
                static_method!(
                    "empty",
                    params!(),
                    generic("java.util.Optional", vec![var("T")])
                ),
            ]),
        TypeInfo::class("java.util.Objects", BOOT).methods(vec![
            static_method!(
                "equals",
                params!(p!("a", object()), p!("b", object())),
                boolean()
            ),
            static_method!("hash", params!(p!("values", array(object()))), int()),
            static_method!("hashCode", params!(p!("o", object())), int()),
            static_method!("isNull", params!(p!("obj", object())), boolean()),
            static_method!("nonNull", params!(p!("obj", object())), boolean()),
            static_method!(
                "requireNonNull",
                params!(p!("obj", var("T"))),
                var("T")
            ),
            static_method!("toString", params!(p!("o", object())), string()),
        ]),
        TypeInfo::class("java.util.Arrays", BOOT).methods(vec![
            static_method!(
                "asList",
                params!(p!("a", array(var("T")))),
                generic("java.util.List", vec![var("T")])
            ),
            static_method!("sort", params!(p!("a", array(int()))), void()),
            static_method!("toString", params!(p!("a", array(object()))), string()),
            static_method!(
                "fill",
                params!(p!("a", array(int())), p!("val", int())),
                void()
            ),
        ]),
        TypeInfo::class("java.util.Collections", BOOT).methods(vec![
            static_method!(
                "emptyList",
                params!(),
                generic("java.util.List", vec![var("T")])
            ),
            static_method!(
                "sort",
                params!(p!("list", generic("java.util.List", vec![var("T")]))),
                void()
            ),
            static_method!(
                "unmodifiableList",
                params!(p!("list", generic("java.util.List", vec![var("T")]))),
                generic("java.util.List", vec![var("T")])
            ),
            static_method!(
                "reverse",
                params!(p!("list", generic("java.util.List", vec![var("T")]))),
                void()
            ),
        ]),
        TypeInfo::class("java.util.Scanner", BOOT)
            .implements(named("java.io.Closeable"))
            .constructor(params!(p!("source", named("java.io.InputStream"))))
            .methods(vec![
                method!("nextLine", params!(), string()),
                method!("nextInt", params!(), int()),
                method!("hasNext", params!(), boolean()),
                method!("close", params!(), void()),
            ]),
        TypeInfo::class("java.util.NoSuchElementException", BOOT)
            .extends(named("java.lang.RuntimeException"))
            .constructor(params!())
            .constructor(params!(p!("message", string()))),
    ]
}
