//! Delimiter Normalization
//!
//! Pure text transform that detects paired math fences embedded in raw
//! equation text and strips them, inferring display-mode intent from the
//! fence family. No UI state, no side effects.

/// Recognized fence pairs, outermost match wins.
///
/// `$$` must be probed before `$` so a display fence is never misread as
/// a pair of inline fences around `$`-prefixed content.
const FENCES: [(&str, &str, bool); 4] = [
    ("\\[", "\\]", true),
    ("$$", "$$", true),
    ("\\(", "\\)", false),
    ("$", "$", false),
];

/// Result of a delimiter scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedEquation {
    /// Equation text with any recognized fence pair removed and trimmed
    pub equation: String,
    /// Inferred display mode; None when no fence pair was recognized
    pub display: Option<bool>,
}

/// Strip one outer fence pair from raw equation text.
///
/// When a recognized pair wraps the trimmed input, the fences are removed,
/// the inner text trimmed, and the display mode inferred from the fence
/// family. Otherwise the input is returned unchanged with `display: None`.
/// Stripping is idempotent on already-stripped text.
pub fn strip_delimiters(raw: &str) -> StrippedEquation {
    let trimmed = raw.trim();

    for (open, close, display) in FENCES {
        if trimmed.len() >= open.len() + close.len()
            && trimmed.starts_with(open)
            && trimmed.ends_with(close)
        {
            let inner = &trimmed[open.len()..trimmed.len() - close.len()];
            return StrippedEquation {
                equation: inner.trim().to_string(),
                display: Some(display),
            };
        }
    }

    StrippedEquation {
        equation: raw.to_string(),
        display: None,
    }
}

/// True when the trimmed text is wrapped in a recognized fence pair
pub fn has_delimiters(raw: &str) -> bool {
    strip_delimiters(raw).display.is_some()
}

/// Wrap bare equation text in the fence pair for the given display mode.
/// Inverse of [`strip_delimiters`] up to whitespace trimming.
pub fn wrap_equation(equation: &str, display: bool) -> String {
    if display {
        format!("\\[{}\\]", equation)
    } else {
        format!("\\({}\\)", equation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fences() {
        let result = strip_delimiters("\\[x^2\\]");
        assert_eq!(result.equation, "x^2");
        assert_eq!(result.display, Some(true));

        let result = strip_delimiters("$$a+b$$");
        assert_eq!(result.equation, "a+b");
        assert_eq!(result.display, Some(true));
    }

    #[test]
    fn test_inline_fences() {
        let result = strip_delimiters("\\(e^{i\\pi}\\)");
        assert_eq!(result.equation, "e^{i\\pi}");
        assert_eq!(result.display, Some(false));

        let result = strip_delimiters("$y=mx+b$");
        assert_eq!(result.equation, "y=mx+b");
        assert_eq!(result.display, Some(false));
    }

    #[test]
    fn test_no_fences_is_pass_through() {
        let result = strip_delimiters("a+b");
        assert_eq!(result.equation, "a+b");
        assert_eq!(result.display, None);

        // Unbalanced fences are ordinary content
        let result = strip_delimiters("$$a+b");
        assert_eq!(result.equation, "$$a+b");
        assert_eq!(result.display, None);

        let result = strip_delimiters("\\[a+b\\)");
        assert_eq!(result.display, None);
    }

    #[test]
    fn test_surrounding_and_inner_whitespace_trimmed() {
        let result = strip_delimiters("  \\[  x^2  \\]  ");
        assert_eq!(result.equation, "x^2");
        assert_eq!(result.display, Some(true));
    }

    #[test]
    fn test_idempotent_on_stripped_text() {
        for raw in ["\\[x^2\\]", "$$a+b$$", "$c$", "plain", ""] {
            let once = strip_delimiters(raw);
            let twice = strip_delimiters(&once.equation);
            assert_eq!(twice.equation, once.equation, "input: {:?}", raw);
            assert_eq!(twice.display, None, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_wrap_round_trip() {
        for (equation, display) in [("x^2", true), ("  a+b  ", false), ("\\frac{1}{2}", true)] {
            let wrapped = wrap_equation(equation, display);
            let result = strip_delimiters(&wrapped);
            assert_eq!(result.equation, equation.trim());
            assert_eq!(result.display, Some(display));
        }
    }

    #[test]
    fn test_degenerate_fence_only_input() {
        // "$$" leaves no room for the display pair; it reads as an empty
        // inline equation, which the save gate rejects downstream
        let result = strip_delimiters("$$");
        assert_eq!(result.equation, "");
        assert_eq!(result.display, Some(false));

        let result = strip_delimiters("$$$$");
        assert_eq!(result.equation, "");
        assert_eq!(result.display, Some(true));
    }

    #[test]
    fn test_has_delimiters() {
        assert!(has_delimiters("\\[x\\]"));
        assert!(has_delimiters("$x$"));
        assert!(!has_delimiters("x"));
        assert!(!has_delimiters("\\[x"));
    }
}
