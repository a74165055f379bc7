//! Per-book display rules.
//!
//! Pure functions applied at render/activation time. Nothing here is stored
//! back on the [`Book`](super::Book).

use std::borrow::Cow;
use std::collections::BTreeMap;

/// MIME keys tried when picking the link to open, highest priority first.
///
/// HTML before PDF before plain text; charset-qualified keys before bare ones.
const VIEWABLE_FORMATS: &[(&str, FormatKind)] = &[
    ("text/html; charset=utf-8", FormatKind::Html),
    ("text/html", FormatKind::Html),
    ("application/pdf", FormatKind::Pdf),
    ("text/plain; charset=utf-8", FormatKind::PlainText),
    ("text/plain", FormatKind::PlainText),
];

/// Notice shown when a book has no viewable format.
pub const NO_VIEWABLE_VERSION: &str = "No viewable version available";

/// Kind of document a viewable link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Html,
    Pdf,
    PlainText,
}

impl FormatKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::PlainText => "TXT",
        }
    }
}

/// The link that activating a book opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewableLink<'a> {
    pub kind: FormatKind,
    pub url: &'a str,
}

/// Pick the first available viewable link in priority order.
///
/// Returns `None` when the book has no HTML, PDF or plain-text format; the
/// caller shows [`NO_VIEWABLE_VERSION`] instead of navigating.
pub fn viewable_link(formats: &BTreeMap<String, String>) -> Option<ViewableLink<'_>> {
    VIEWABLE_FORMATS.iter().find_map(|(mime, kind)| {
        formats
            .get(*mime)
            .filter(|url| !url.trim().is_empty())
            .map(|url| ViewableLink {
                kind: *kind,
                url: url.as_str(),
            })
    })
}

/// Reformat a catalog author name for display.
///
/// `"Family, Given"` becomes `"Given Family"`: the string is split on the
/// first comma only, so anything after a second comma stays with the given
/// names. Names without a comma are returned unchanged.
pub fn display_author_name(raw: &str) -> Cow<'_, str> {
    match raw.split_once(',') {
        Some((family, given)) => {
            let joined = format!("{} {}", given.trim(), family.trim());
            Cow::Owned(joined.trim().to_string())
        }
        None => Cow::Borrowed(raw),
    }
}
