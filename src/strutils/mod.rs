pub fn indent_lines<S: std::fmt::Display>(s: S, n: usize) -> String {
    s.to_string()
        .lines()
        .map(|l| format!("{}{}", " ".repeat(n), l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Symbol names made only of these characters can be written without quotes.
pub fn is_plain_symbol(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | '-'))
}

#[cfg(test)]
mod strutils_tests {
    use super::{indent_lines, is_plain_symbol};

    #[test]
    fn indents_every_line() {
        assert_eq!(indent_lines("a\nb", 2), "  a\n  b");
    }

    #[test]
    fn plain_symbols() {
        assert!(is_plain_symbol("addOne"));
        assert!(is_plain_symbol("i"));
        assert!(!is_plain_symbol("add(int,int)"));
        assert!(!is_plain_symbol("1abc"));
        assert!(!is_plain_symbol(""));
    }
}
