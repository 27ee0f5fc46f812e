//! Public suffix rules and line classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix marking a comment line.
pub const COMMENT_PREFIX: &str = "//";

/// One parsed line of the public suffix list.
///
/// Labels are kept in the order they are written, so `co.uk` becomes
/// `["co", "uk"]`. A wildcard rule keeps its `*` as the first label; the
/// downstream matcher treats a `"*"` label as matching any single label.
///
/// # Examples
/// ```
/// use psl_gen::rule::parse_line;
///
/// let rule = parse_line("*.kawasaki.jp").unwrap();
/// assert!(rule.is_wildcard);
/// assert_eq!(rule.labels, vec!["*", "kawasaki", "jp"]);
///
/// let rule = parse_line("!city.kawasaki.jp").unwrap();
/// assert!(rule.is_exception);
/// assert_eq!(rule.labels, vec!["city", "kawasaki", "jp"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SuffixRule {
    pub is_wildcard: bool,
    pub is_exception: bool,
    pub labels: Vec<String>,
}

impl SuffixRule {
    /// Create a rule from its parts.
    pub fn new(labels: Vec<String>, is_exception: bool, is_wildcard: bool) -> Self {
        Self {
            is_wildcard,
            is_exception,
            labels,
        }
    }

    /// The suffix as written, without the exception marker.
    pub fn domain(&self) -> String {
        self.labels.join(".")
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the rule has no labels. Never true for a parsed rule.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl fmt::Display for SuffixRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("labels: [")?;
        for label in &self.labels {
            write!(f, "{}, ", label)?;
        }
        write!(
            f,
            "] is exception: {} is wildcard: {}",
            self.is_exception, self.is_wildcard
        )
    }
}

/// Classification of a single list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty after trimming
    Blank,
    /// Starts with `//` after trimming
    Comment,
    /// A rule line
    Rule(SuffixRule),
}

/// Whitespace as trimmed by the list's legacy tooling: Unicode White_Space
/// without NEL (U+0085), plus the BOM, which lists saved with one keep on
/// the first line.
fn is_trim_char(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Classify one line of the suffix list.
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim_matches(is_trim_char);
    if line.is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with(COMMENT_PREFIX) {
        return LineKind::Comment;
    }

    let mut is_wildcard = false;
    let mut is_exception = false;
    let mut body = line;
    if let Some(rest) = line.strip_prefix('!') {
        is_exception = true;
        body = rest;
    } else if line.starts_with('*') {
        is_wildcard = true;
    }

    // Anything after the first space is an annotation.
    let body = match body.find(' ') {
        Some(idx) => &body[..idx],
        None => body,
    };

    let labels = body.split('.').map(str::to_string).collect();
    LineKind::Rule(SuffixRule::new(labels, is_exception, is_wildcard))
}

/// Parse one line, returning `None` for blank and comment lines.
pub fn parse_line(line: &str) -> Option<SuffixRule> {
    match classify_line(line) {
        LineKind::Rule(rule) => Some(rule),
        LineKind::Blank | LineKind::Comment => None,
    }
}
