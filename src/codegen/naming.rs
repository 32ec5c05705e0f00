//! Identifier and literal helpers shared by the generators.

/// Lowercase the first character (member and action names follow the
/// TypeScript camelCase convention).
pub fn lower_camel_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Strip a trailing `Controller` suffix, case-insensitively.
pub fn strip_controller_suffix(name: &str) -> &str {
    const SUFFIX: &str = "controller";
    if name.len() > SUFFIX.len() && name.is_char_boundary(name.len() - SUFFIX.len()) {
        let (head, tail) = name.split_at(name.len() - SUFFIX.len());
        if tail.eq_ignore_ascii_case(SUFFIX) {
            return head;
        }
    }
    name
}

/// Split a PascalCase identifier into words (`RegularUser` becomes
/// `Regular User`) for fallback display names.
pub fn insert_camel_spaces(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        out.push(c);
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    out
}

/// Escape a string for embedding in a single-quoted TypeScript literal.
/// Only quotes and line breaks are escaped; everything else passes through.
pub fn escape_ts_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// Replace every occurrence of `needle` in `haystack`, matching
/// case-insensitively (route templates are case-insensitive). Needles are
/// ASCII placeholders, so ASCII case folding is sufficient; matching walks
/// char boundaries so non-ASCII template text passes through untouched.
pub fn replace_case_insensitive(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(at) = find_ascii_case_insensitive(rest, needle) {
        out.push_str(&rest[..at]);
        out.push_str(replacement);
        rest = &rest[at + needle.len()..];
    }
    out.push_str(rest);
    out
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().find_map(|(at, _)| {
        haystack
            .get(at..at + needle.len())
            .filter(|candidate| candidate.eq_ignore_ascii_case(needle))
            .map(|_| at)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_camel_first() {
        assert_eq!(lower_camel_first("GetUsers"), "getUsers");
        assert_eq!(lower_camel_first("x"), "x");
        assert_eq!(lower_camel_first(""), "");
    }

    #[test]
    fn test_strip_controller_suffix() {
        assert_eq!(strip_controller_suffix("UserController"), "User");
        assert_eq!(strip_controller_suffix("Usercontroller"), "User");
        assert_eq!(strip_controller_suffix("Controller"), "Controller");
        assert_eq!(strip_controller_suffix("User"), "User");
    }

    #[test]
    fn test_strip_controller_suffix_non_ascii() {
        assert_eq!(strip_controller_suffix("ÜberController"), "Über");
        // Multi-byte char sitting across the would-be split point.
        assert_eq!(strip_controller_suffix("xÄontroller"), "xÄontroller");
        assert_eq!(strip_controller_suffix("İstanbul"), "İstanbul");
    }

    #[test]
    fn test_insert_camel_spaces() {
        assert_eq!(insert_camel_spaces("RegularUser"), "Regular User");
        assert_eq!(insert_camel_spaces("Admin"), "Admin");
        assert_eq!(insert_camel_spaces("HTTPServer"), "HTTPServer");
    }

    #[test]
    fn test_escape_ts_literal() {
        assert_eq!(escape_ts_literal("it's \"fine\"\n"), "it\\'s \\\"fine\\\"\\n");
        assert_eq!(escape_ts_literal("plain"), "plain");
    }

    #[test]
    fn test_replace_case_insensitive() {
        assert_eq!(
            replace_case_insensitive("/[Controller]/x/[controller]", "[controller]", "User"),
            "/User/x/User"
        );
        assert_eq!(replace_case_insensitive("/a/b", "[action]", "X"), "/a/b");
    }

    #[test]
    fn test_replace_case_insensitive_non_ascii_template() {
        // Characters whose lowercase form has a different byte length must
        // not shift the match positions.
        assert_eq!(
            replace_case_insensitive("/İş/[Controller]/ärge", "[controller]", "User"),
            "/İş/User/ärge"
        );
        assert_eq!(replace_case_insensitive("/İİİ", "[action]", "X"), "/İİİ");
    }
}
