use super::ty::*;
use crate::semantic::{Origin, PrimitiveKind, TypeInfo};

const BOOT: Origin = Origin::Boot;

pub(super) fn types() -> Vec<TypeInfo> {
    let mut out = vec![
        TypeInfo::class("java.lang.Object", BOOT)
            .constructor(params!())
            .methods(vec![
                method!("equals", params!(p!("obj", object())), boolean()),
                method!("hashCode", params!(), int()),
                method!("toString", params!(), string()),
                method!("getClass", params!(), generic("java.lang.Class", vec![var("?")])),
                method!("notify", params!(), void()),
                method!("notifyAll", params!(), void()),
                method!("wait", params!(), void()),
            ]),
        TypeInfo::interface("java.lang.CharSequence", BOOT).methods(vec![
            method!("length", params!(), int()),
            method!("charAt", params!(p!("index", int())), char()),
            method!("isEmpty", params!(), boolean()),
            method!(
                "subSequence",
                params!(p!("start", int()), p!("end", int())),
                named("java.lang.CharSequence")
            ),
        ]),
        TypeInfo::interface("java.lang.Comparable", BOOT)
            .generic(&["T"])
            .method(method!("compareTo", params!(p!("o", var("T"))), int())),
        TypeInfo::interface("java.lang.Iterable", BOOT)
            .generic(&["T"])
            .method(method!(
                "iterator",
                params!(),
                generic("java.util.Iterator", vec![var("T")])
            )),
        TypeInfo::interface("java.lang.Runnable", BOOT).method(method!("run", params!(), void())),
        TypeInfo::interface("java.lang.AutoCloseable", BOOT)
            .method(method!("close", params!(), void())),
        TypeInfo::interface("java.lang.Appendable", BOOT).method(method!(
            "append",
            params!(p!("csq", named("java.lang.CharSequence"))),
            named("java.lang.Appendable")
        )),
        TypeInfo::interface("java.lang.Cloneable", BOOT),
        TypeInfo::class("java.lang.String", BOOT)
            .implements(named("java.lang.CharSequence"))
            .implements(generic("java.lang.Comparable", vec![string()]))
            .constructor(params!())
            .constructor(params!(p!("original", string())))
            .methods(vec![
                method!("length", params!(), int()),
                method!("isEmpty", params!(), boolean()),
                method!("charAt", params!(p!("index", int())), char()),
                method!("substring", params!(p!("beginIndex", int())), string()),
                method!(
                    "substring",
                    params!(p!("beginIndex", int()), p!("endIndex", int())),
                    string()
                ),
                method!("indexOf", params!(p!("str", string())), int()),
                method!(
                    "indexOf",
                    params!(p!("str", string()), p!("fromIndex", int())),
                    int()
                ),
                method!("lastIndexOf", params!(p!("str", string())), int()),
                method!("startsWith", params!(p!("prefix", string())), boolean()),
                method!("endsWith", params!(p!("suffix", string())), boolean()),
                method!(
                    "contains",
                    params!(p!("s", named("java.lang.CharSequence"))),
                    boolean()
                ),
                method!("equalsIgnoreCase", params!(p!("anotherString", string())), boolean()),
                method!("compareTo", params!(p!("anotherString", string())), int()),
                method!("toUpperCase", params!(), string()),
                method!("toLowerCase", params!(), string()),
                method!("trim", params!(), string()),
                method!("split", params!(p!("regex", string())), array(string())),
                method!(
                    "replace",
                    params!(
                        p!("target", named("java.lang.CharSequence")),
                        p!("replacement", named("java.lang.CharSequence"))
                    ),
                    string()
                ),
                method!("toCharArray", params!(), array(char())),
                method!("concat", params!(p!("str", string())), string()),
                static_method!("valueOf", params!(p!("obj", object())), string()),
                static_method!("valueOf", params!(p!("i", int())), string()),
                static_method!(
                    "format",
                    params!(p!("format", string()), p!("args", array(object()))),
                    string()
                ),
                static_method!(
                    "join",
                    params!(
                        p!("delimiter", named("java.lang.CharSequence")),
                        p!("elements", array(named("java.lang.CharSequence")))
                    ),
                    string()
                ),
            ]),
        string_builder("java.lang.StringBuilder"),
        string_builder("java.lang.StringBuffer"),
        TypeInfo::class("java.lang.Number", BOOT).methods(vec![
            method!("intValue", params!(), int()),
            method!("longValue", params!(), long()),
            method!("floatValue", params!(), float()),
            method!("doubleValue", params!(), double()),
        ]),
        TypeInfo::class("java.lang.Math", BOOT)
            .constant("PI", double())
            .constant("E", double())
            .methods(vec![
                static_method!("abs", params!(p!("a", int())), int()),
                static_method!("abs", params!(p!("a", double())), double()),
                static_method!("max", params!(p!("a", int()), p!("b", int())), int()),
                static_method!("max", params!(p!("a", double()), p!("b", double())), double()),
                static_method!("min", params!(p!("a", int()), p!("b", int())), int()),
                static_method!("min", params!(p!("a", double()), p!("b", double())), double()),
                static_method!("sqrt", params!(p!("a", double())), double()),
                static_method!("pow", params!(p!("a", double()), p!("b", double())), double()),
                static_method!("floor", params!(p!("a", double())), double()),
                static_method!("ceil", params!(p!("a", double())), double()),
                static_method!("round", params!(p!("a", double())), long()),
                static_method!("random", params!(), double()),
            ]),
        TypeInfo::class("java.lang.System", BOOT)
            .constant("out", named("java.io.PrintStream"))
            .constant("err", named("java.io.PrintStream"))
            .constant("in", named("java.io.InputStream"))
            .methods(vec![
                static_method!("currentTimeMillis", params!(), long()),
                static_method!("nanoTime", params!(), long()),
                static_method!("exit", params!(p!("status", int())), void()),
                static_method!("getProperty", params!(p!("key", string())), string()),
                static_method!("getenv", params!(p!("name", string())), string()),
                static_method!("lineSeparator", params!(), string()),
                static_method!(
                    "arraycopy",
                    params!(
                        p!("src", object()),
                        p!("srcPos", int()),
                        p!("dest", object()),
                        p!("destPos", int()),
                        p!("length", int())
                    ),
                    void()
                ),
            ]),
        TypeInfo::class("java.lang.Thread", BOOT)
            .implements(named("java.lang.Runnable"))
            .constructor(params!())
            .constructor(params!(p!("target", named("java.lang.Runnable"))))
            .methods(vec![
                method!("start", params!(), void()),
                method!("run", params!(), void()),
                method!("interrupt", params!(), void()),
                method!("join", params!(), void()),
                method!("getName", params!(), string()),
                static_method!("sleep", params!(p!("millis", long())), void()),
                static_method!("currentThread", params!(), named("java.lang.Thread")),
            ]),
        TypeInfo::class("java.lang.Class", BOOT).generic(&["T"]).methods(vec![
            method!("getName", params!(), string()),
            method!("getSimpleName", params!(), string()),
            method!("isInstance", params!(p!("obj", object())), boolean()),
        ]),
        TypeInfo::class("java.lang.Enum", BOOT)
            .generic(&["E"])
            .implements(generic("java.lang.Comparable", vec![var("E")]))
            .methods(vec![
                method!("name", params!(), string()),
                method!("ordinal", params!(), int()),
            ]),
        TypeInfo::class("java.lang.Throwable", BOOT)
            .constructor(params!())
            .constructor(params!(p!("message", string())))
            .methods(vec![
                method!("getMessage", params!(), string()),
                method!("getCause", params!(), named("java.lang.Throwable")),
                method!("printStackTrace", params!(), void()),
                method!(
                    "addSuppressed",
                    params!(p!("exception", named("java.lang.Throwable"))),
                    void()
                ),
            ]),
        throwable("java.lang.Exception", "java.lang.Throwable"),
        throwable("java.lang.Error", "java.lang.Throwable"),
        throwable("java.lang.RuntimeException", "java.lang.Exception"),
        throwable("java.lang.IllegalArgumentException", "java.lang.RuntimeException"),
        throwable("java.lang.IllegalStateException", "java.lang.RuntimeException"),
        throwable("java.lang.NullPointerException", "java.lang.RuntimeException"),
        throwable("java.lang.IndexOutOfBoundsException", "java.lang.RuntimeException"),
        throwable("java.lang.UnsupportedOperationException", "java.lang.RuntimeException"),
        throwable("java.lang.ClassCastException", "java.lang.RuntimeException"),
        throwable("java.lang.NumberFormatException", "java.lang.IllegalArgumentException"),
        throwable("java.lang.InterruptedException", "java.lang.Exception"),
        throwable("java.lang.CloneNotSupportedException", "java.lang.Exception"),
    ];

    for prim in PrimitiveKind::ALL {
        out.push(boxed(prim));
    }
    out
}

fn string_builder(name: &'static str) -> TypeInfo {
    let this = named(name);
    let append = |param: &'static str, ty| method!("append", params!(p!(param, ty)), named(name));
    TypeInfo::class(name, BOOT)
        .implements(named("java.lang.CharSequence"))
        .implements(named("java.lang.Appendable"))
        .constructor(params!())
        .constructor(params!(p!("capacity", int())))
        .constructor(params!(p!("str", string())))
        .methods(vec![
            append("str", string()),
            append("c", char()),
            append("i", int()),
            append("lng", long()),
            append("d", double()),
            append("b", boolean()),
            append("obj", object()),
            method!(
                "insert",
                params!(p!("offset", int()), p!("str", string())),
                this.clone()
            ),
            method!("reverse", params!(), this.clone()),
            method!(
                "delete",
                params!(p!("start", int()), p!("end", int())),
                this.clone()
            ),
            method!("deleteCharAt", params!(p!("index", int())), this),
            method!("length", params!(), int()),
            method!("charAt", params!(p!("index", int())), char()),
            method!("setLength", params!(p!("newLength", int())), void()),
            method!("indexOf", params!(p!("str", string())), int()),
            method!("capacity", params!(), int()),
            method!("toString", params!(), string()),
        ])
}

fn throwable(name: &str, superclass: &str) -> TypeInfo {
    TypeInfo::class(name, BOOT)
        .extends(named(superclass))
        .constructor(params!())
        .constructor(params!(p!("message", string())))
        .constructor(params!(
            p!("message", string()),
            p!("cause", named("java.lang.Throwable"))
        ))
}

fn boxed(prim: PrimitiveKind) -> TypeInfo {
    let name = prim.boxed();
    let raw = crate::semantic::Ty::Primitive(prim);
    let mut info = TypeInfo::class(name, BOOT)
        .implements(generic("java.lang.Comparable", vec![named(name)]))
        .constructor(params!(p!("value", raw.clone())))
        .methods(vec![
            static_method!("valueOf", params!(p!("value", raw.clone())), named(name)),
            static_method!("toString", params!(p!("value", raw.clone())), string()),
            method!("compareTo", params!(p!("other", named(name))), int()),
        ]);
    if prim.is_numeric() && prim != PrimitiveKind::Char {
        info = info
            .extends(named("java.lang.Number"))
            .constant("MAX_VALUE", raw.clone())
            .constant("MIN_VALUE", raw.clone());
    }
    match prim {
        PrimitiveKind::Int => info.methods(vec![
            static_method!("parseInt", params!(p!("s", string())), int()),
            static_method!("compare", params!(p!("x", int()), p!("y", int())), int()),
        ]),
        PrimitiveKind::Long => info.methods(vec![static_method!(
            "parseLong",
            params!(p!("s", string())),
            long()
        )]),
        PrimitiveKind::Double => info.methods(vec![
            static_method!("parseDouble", params!(p!("s", string())), double()),
            static_method!("isNaN", params!(p!("v", double())), boolean()),
        ]),
        PrimitiveKind::Boolean => info
            .constant("TRUE", named(name))
            .constant("FALSE", named(name))
            .methods(vec![static_method!(
                "parseBoolean",
                params!(p!("s", string())),
                boolean()
            )]),
        PrimitiveKind::Char => info.methods(vec![
            static_method!("isDigit", params!(p!("ch", char())), boolean()),
            static_method!("isLetter", params!(p!("ch", char())), boolean()),
            static_method!("isWhitespace", params!(p!("ch", char())), boolean()),
            static_method!("toUpperCase", params!(p!("ch", char())), char()),
        ]),
        PrimitiveKind::Float => info.methods(vec![static_method!(
            "parseFloat",
            params!(p!("s", string())),
            float()
        )]),
        PrimitiveKind::Byte => info.methods(vec![static_method!(
            "parseByte",
            params!(p!("s", string())),
            byte()
        )]),
        PrimitiveKind::Short => info.methods(vec![static_method!(
            "parseShort",
            params!(p!("s", string())),
            short()
        )]),
    }
}
