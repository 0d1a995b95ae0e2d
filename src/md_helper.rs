// ABOUTME: Line classifiers for markdown slide documents
// ABOUTME: Detects headings, dividers, fences, annotations, images and comments

use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<!--.*-->\s*$").expect("valid comment regex"));
static DECO_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*@\(.*?\)\s*$").expect("valid deco regex"));
static IMAGE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("valid image regex"));
static TITLE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,2}[ \t]+(.*)$").expect("valid title regex"));
static HTML_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--[\s\S]*?-->").expect("valid html comment regex"));
static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*%%.*$").expect("valid line comment regex"));

/// Marker that opens and closes a verbatim (code) region.
pub const FENCE_MARKER: &str = "```";

/// Divider classes recognised inside a document.
///
/// Each class is a trimmed line of three or more repetitions of its marker
/// character and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerKind {
    /// `---`: ends the current page.
    Section,
    /// `___`: stacks regions on top of each other inside a page.
    Vertical,
    /// `***`: places regions side by side inside a page.
    Horizontal,
}

impl DividerKind {
    pub fn marker(self) -> char {
        match self {
            DividerKind::Section => '-',
            DividerKind::Vertical => '_',
            DividerKind::Horizontal => '*',
        }
    }

    fn from_marker(c: char) -> Option<Self> {
        match c {
            '-' => Some(DividerKind::Section),
            '_' => Some(DividerKind::Vertical),
            '*' => Some(DividerKind::Horizontal),
            _ => None,
        }
    }
}

/// Determines the heading level (1-6) of a line, or 0 if it is not a heading.
///
/// A heading is one to six `#` characters at the very start of the line,
/// immediately followed by whitespace.
pub fn header_level(line: &str) -> usize {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return 0;
    }
    match line[hashes..].chars().next() {
        Some(c) if c.is_whitespace() => hashes,
        _ => 0,
    }
}

/// Text of a heading line without its `#` prefix.
pub fn header_text(line: &str) -> String {
    line.trim_start_matches('#').trim().to_string()
}

/// True if the whole line is an HTML comment.
pub fn is_comment(line: &str) -> bool {
    COMMENT_LINE.is_match(line)
}

/// True for whitespace-only lines and comment-only lines.
pub fn is_empty(line: &str) -> bool {
    line.trim().is_empty() || is_comment(line)
}

/// Determines whether a line is a divider, optionally of a given kind only.
pub fn is_divider(line: &str, kind: Option<DividerKind>) -> bool {
    match divider_kind(line) {
        Some(found) => kind.map_or(true, |wanted| wanted == found),
        None => false,
    }
}

/// Classifies a divider line.
pub fn divider_kind(line: &str) -> Option<DividerKind> {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let kind = DividerKind::from_marker(first)?;
    if trimmed.chars().count() >= 3 && chars.all(|c| c == first) {
        Some(kind)
    } else {
        None
    }
}

/// True if the line opens or closes a fenced region.
pub fn is_fence_marker(line: &str) -> bool {
    line.trim_start().starts_with(FENCE_MARKER)
}

/// True if the entire trimmed line is a single `@( ... )` directive.
pub fn contains_deco(line: &str) -> bool {
    DECO_LINE.is_match(line)
}

/// True if the line contains an inline `![alt](url)` image reference.
pub fn contains_image(line: &str) -> bool {
    IMAGE_REF.is_match(line)
}

/// Extracts the first level 1 or 2 heading from the document as its title.
pub fn extract_title(document: &str) -> Option<String> {
    TITLE_HEADING
        .captures(document)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Removes HTML block comments and `%%` line comments, then trims the result.
pub fn rm_comments(document: &str) -> String {
    let without_html = HTML_COMMENT.replace_all(document, "");
    let without_lines = LINE_COMMENT.replace_all(&without_html, "");
    without_lines.trim().to_string()
}
