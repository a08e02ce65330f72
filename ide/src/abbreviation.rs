//! Abbreviations: the lower-case acronym a user types instead of a full identifier.
//!
//! - camelCase and PascalCase: first letter plus the first letter of each upper-case run
//!   that follows a non-upper-case character (`StringBuilder` -> `sb`, `getURL` -> `gu`).
//! - SCREAMING_SNAKE_CASE: first letter of each segment (`MAX_VALUE` -> `mv`).

/// Derives the abbreviation of `identifier`. Total: the empty string maps to itself.
pub fn abbreviate(identifier: &str) -> String {
    if is_screaming_snake(identifier) {
        return identifier
            .split('_')
            .filter_map(|segment| segment.chars().next())
            .map(lower)
            .collect();
    }

    let mut out = String::new();
    let mut prev_upper = true;
    for (i, c) in identifier.chars().enumerate() {
        let upper = c.is_uppercase();
        if i == 0 || (upper && !prev_upper) {
            out.push(lower(c));
        }
        prev_upper = upper;
    }
    out
}

/// One char per source char, so `İ` maps to `i` without its combining dot.
fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Whether a candidate named `name` matches what the user typed.
pub fn matches(name: &str, abbreviation: &str) -> bool {
    abbreviate(name) == abbreviation
}

/// Splits an `owner.member` abbreviation. `None` for a plain abbreviation.
pub(crate) fn split_qualified(abbreviation: &str) -> Option<(&str, &str)> {
    abbreviation.split_once('.')
}

/// `UPPER(_UPPER)+`: at least two non-empty segments of upper-case letters and digits, each
/// starting with a letter.
fn is_screaming_snake(identifier: &str) -> bool {
    let mut segments = 0;
    for segment in identifier.split('_') {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => {}
            _ => return false,
        }
        if !chars.all(|c| c.is_uppercase() || c.is_ascii_digit()) {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_takes_word_starts() {
        assert_eq!(abbreviate("StringBuilder"), "sb");
        assert_eq!(abbreviate("appendPart"), "ap");
        assert_eq!(abbreviate("getURL"), "gu");
        assert_eq!(abbreviate("getURLPath"), "gu");
        assert_eq!(abbreviate("count"), "c");
        assert_eq!(abbreviate("x2Value"), "xv");
    }

    #[test]
    fn constants_take_segment_starts() {
        assert_eq!(abbreviate("MAX_VALUE"), "mv");
        assert_eq!(abbreviate("A_B_C"), "abc");
        assert_eq!(abbreviate("HTTP_OK"), "ho");
    }

    #[test]
    fn single_upper_word_is_not_a_constant() {
        assert_eq!(abbreviate("MAX"), "m");
        assert_eq!(abbreviate("URL"), "u");
    }

    #[test]
    fn malformed_snake_falls_back_to_camel_rule() {
        assert_eq!(abbreviate("A__B"), "ab");
        assert_eq!(abbreviate("_A_B"), "_ab");
        assert_eq!(abbreviate("UTF_8"), "u");
        assert_eq!(abbreviate("Max_Value"), "mv");
    }

    #[test]
    fn never_longer_than_the_identifier() {
        let identifiers = [
            "StringBuilder",
            "getURLPath",
            "x",
            "İstanbulCity",
            "İ",
            "ÀÉ_ÖÜ",
            "MAX_VALUE",
            "$schema",
            "Ⱥlpha",
        ];
        for identifier in identifiers {
            let abbreviation = abbreviate(identifier);
            assert!(
                abbreviation.chars().count() <= identifier.chars().count(),
                "{identifier} -> {abbreviation}"
            );
            assert!(matches(identifier, &abbreviation));
        }
        assert_eq!(abbreviate("İstanbulCity"), "ic");
    }

    #[test]
    fn constant_abbreviation_has_one_char_per_segment() {
        for identifier in ["MAX_VALUE", "A_B_C", "İ_Ş", "HTTP2_NOT_FOUND", "ÀÉ_ÖÜ"] {
            let segments = identifier.split('_').count();
            assert_eq!(abbreviate(identifier).chars().count(), segments, "{identifier}");
        }
    }

    #[test]
    fn empty_identifier_maps_to_empty() {
        assert_eq!(abbreviate(""), "");
        assert!(matches("", ""));
    }

    #[test]
    fn split_owner_and_member() {
        assert_eq!(split_qualified("sb.ap"), Some(("sb", "ap")));
        assert_eq!(split_qualified("sb"), None);
        assert_eq!(split_qualified("sb."), Some(("sb", "")));
    }
}
