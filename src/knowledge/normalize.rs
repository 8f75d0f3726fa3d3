//! Text normalization shared by loading, learning and matching

/// Lowercase user input for matching.
///
/// Whitespace is left alone, so `"opening  hours"` (two spaces) will not
/// contain the keyword `"opening hours"`.
pub fn normalize_input(text: &str) -> String {
    text.to_lowercase()
}

/// Lowercase a keyword the caller has already trimmed
pub fn normalize_keyword(keyword: &str) -> String {
    keyword.to_lowercase()
}

/// Extract the keyword from a persisted keyword line.
///
/// Lines may carry a bracketed tag such as `[imported] hours`; only the text
/// after the last `]` counts. The result is trimmed and lowercased and may be
/// empty, in which case the caller drops the pair.
pub fn effective_keyword(line: &str) -> String {
    let candidate = match line.rfind(']') {
        Some(idx) => &line[idx + 1..],
        None => line,
    };
    normalize_keyword(candidate.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_input_keeps_whitespace() {
        assert_eq!(normalize_input("  What ARE  your Hours "), "  what are  your hours ");
        assert_eq!(normalize_input(""), "");
    }

    #[test]
    fn test_effective_keyword_plain() {
        assert_eq!(effective_keyword("  Hours\t"), "hours");
        assert_eq!(effective_keyword("Deep Cleaning\r"), "deep cleaning");
    }

    #[test]
    fn test_effective_keyword_strips_annotation() {
        assert_eq!(effective_keyword("[source1] Pricing"), "pricing");
        assert_eq!(effective_keyword("[a] [b] location "), "location");
        assert_eq!(effective_keyword("[a]b]  Hours"), "hours");
    }

    #[test]
    fn test_effective_keyword_empty_results() {
        assert_eq!(effective_keyword("   "), "");
        assert_eq!(effective_keyword("[tag]   "), "");
        assert_eq!(effective_keyword("hours ]"), "");
        assert_eq!(effective_keyword(""), "");
    }
}
