use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` terminal columns, appending "..."
/// when anything was cut.
///
/// Returns the input borrowed when it already fits. Widths of 3 or less get
/// a hard cut without the ellipsis.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width <= ELLIPSIS_WIDTH {
        (max_width, "")
    } else {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    };

    let mut width = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        end = idx + c.len_utf8();
    }

    let mut out = String::with_capacity(end + suffix.len());
    out.push_str(&s[..end]);
    out.push_str(suffix);
    Cow::Owned(out)
}

/// Replace control characters from remote text with spaces.
///
/// Catalog titles occasionally contain embedded newlines or carriage
/// returns; escape bytes must never reach the terminal.
pub fn sanitize_line(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_is_borrowed() {
        assert!(matches!(truncate_to_width("Emma", 10), Cow::Borrowed("Emma")));
        assert!(matches!(truncate_to_width("Emma", 4), Cow::Borrowed("Emma")));
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("The Count of Monte Cristo", 12), "The Count...");
    }

    #[test]
    fn test_narrow_width_no_ellipsis() {
        assert_eq!(truncate_to_width("Middlemarch", 3), "Mid");
        assert_eq!(truncate_to_width("Middlemarch", 0), "");
    }

    #[test]
    fn test_wide_chars_respect_columns() {
        // Each CJK character is 2 columns.
        let out = truncate_to_width("紅樓夢紅樓夢", 7);
        assert_eq!(out, "紅樓...");
        assert!(display_width(&out) <= 7);
    }

    #[test]
    fn test_sanitize_replaces_controls() {
        assert_eq!(sanitize_line("War and\r\nPeace"), "War and  Peace");
        assert_eq!(sanitize_line("a\x1b[31mred"), "a [31mred");
        assert!(matches!(sanitize_line("clean"), Cow::Borrowed("clean")));
    }
}
