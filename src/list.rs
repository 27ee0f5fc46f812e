//! Public suffix list parser.

use std::io::Read;

use crate::rule::{classify_line, LineKind, SuffixRule};
use crate::Result;

/// Line counts collected while parsing a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub blank_lines: usize,
    pub comment_lines: usize,
    pub rules: usize,
    pub exception_rules: usize,
    pub wildcard_rules: usize,
}

impl ParseSummary {
    /// Total lines seen.
    pub fn total_lines(&self) -> usize {
        self.blank_lines + self.comment_lines + self.rules
    }

    fn record(&mut self, kind: &LineKind) {
        match kind {
            LineKind::Blank => self.blank_lines += 1,
            LineKind::Comment => self.comment_lines += 1,
            LineKind::Rule(rule) => {
                self.rules += 1;
                if rule.is_exception {
                    self.exception_rules += 1;
                }
                if rule.is_wildcard {
                    self.wildcard_rules += 1;
                }
            }
        }
    }
}

/// Rules of a public suffix list, in file order.
#[derive(Debug, Clone, Default)]
pub struct RuleList {
    rules: Vec<SuffixRule>,
    summary: ParseSummary,
}

impl RuleList {
    /// Parse list text. Lines are split on `\n`; a trailing `\r` is trimmed
    /// with the rest of the whitespace.
    pub fn parse(text: &str) -> Self {
        let mut list = Self::default();
        for line in text.split('\n') {
            let kind = classify_line(line);
            list.summary.record(&kind);
            if let LineKind::Rule(rule) = kind {
                list.rules.push(rule);
            }
        }
        log::debug!(
            "Parsed {} rules ({} exception, {} wildcard), skipped {} blank and {} comment lines",
            list.summary.rules,
            list.summary.exception_rules,
            list.summary.wildcard_rules,
            list.summary.blank_lines,
            list.summary.comment_lines
        );
        list
    }

    /// Parse list text from a reader.
    pub fn parse_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::parse(&text))
    }

    pub fn rules(&self) -> &[SuffixRule] {
        &self.rules
    }

    pub fn summary(&self) -> ParseSummary {
        self.summary
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_rules(self) -> Vec<SuffixRule> {
        self.rules
    }
}
