use crate::semantic::{Index, SemanticModel, builtin_library};

pub fn trim_indent(s: &str) -> String {
    let lines: Vec<&str> = s.lines().collect();
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        // Skip the first line (which is the empty line)
        .skip(1)
        .map(|l| {
            if l.len() >= min_indent {
                &l[min_indent..]
            } else {
                *l
            }
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Splits a `$0` caret marker out of `input`.
pub fn caret(input: &str) -> (String, u32) {
    let pos = input.find("$0").expect("missing $0 caret marker");
    let mut source = input.to_string();
    source.replace_range(pos..pos + 2, "");
    (source, pos as u32)
}

/// A resolved index over `source` with the builtin library.
pub fn index(source: &str) -> Index {
    let mut index = Index::from_source(source, builtin_library());
    index.resolve();
    index
}

#[test]
fn test_trim_indent() {
    let s = r#"
        class A {
            int x;
        }"#;
    let expected = "class A {\n    int x;\n}";
    assert_eq!(expected, trim_indent(s));
}

#[test]
fn test_caret_marker_is_removed() {
    let (source, offset) = caret("a.$0b");
    assert_eq!(source, "a.b");
    assert_eq!(offset, 2);
}
