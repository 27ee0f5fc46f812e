//! Rule table code generation.
//!
//! Each rule becomes a brace initializer for the consumer's rule struct:
//!
//! ```text
//! {true, false, {"*", "ck"}}
//! ```
//!
//! and the full table is `{<rule>,\n<rule>,\n...}`, which replaces the
//! marker in the header template.

use serde::{Deserialize, Serialize};

use crate::list::RuleList;
use crate::rule::SuffixRule;
use crate::{Error, Result};

/// Default substitution marker in header templates.
pub const CONTENTS_MARKER: &str = "{contents}";

/// Separator between serialized rules.
pub const RULE_SEPARATOR: &str = ",\n";

/// What to do when the template has no marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPolicy {
    /// Fail with [`Error::MissingMarker`]
    #[default]
    Error,
    /// Return the template unchanged
    Ignore,
}

/// Serialize one rule as `{wildcard, exception, {"label", ...}}`.
///
/// Labels are quoted as JSON string literals, which C++ accepts for the
/// escapes involved.
pub fn serialize_rule(rule: &SuffixRule) -> Result<String> {
    let labels = rule
        .labels
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(format!(
        "{{{}, {}, {{{}}}}}",
        rule.is_wildcard,
        rule.is_exception,
        labels.join(", ")
    ))
}

/// Serialize all rules into one array initializer.
pub fn render_rules(rules: &[SuffixRule]) -> Result<String> {
    let entries = rules
        .iter()
        .map(serialize_rule)
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{{{}}}", entries.join(RULE_SEPARATOR)))
}

/// Replace the first occurrence of `marker` in `template` with `contents`.
pub fn substitute(
    template: &str,
    marker: &str,
    contents: &str,
    policy: MarkerPolicy,
) -> Result<String> {
    if template.contains(marker) {
        return Ok(template.replacen(marker, contents, 1));
    }

    match policy {
        MarkerPolicy::Error => Err(Error::MissingMarker(marker.to_string())),
        MarkerPolicy::Ignore => {
            log::warn!(
                "Template has no {} marker, output will not contain any rules",
                marker
            );
            Ok(template.to_string())
        }
    }
}

/// Header compiler.
#[derive(Debug, Clone)]
pub struct Compiler {
    marker: String,
    policy: MarkerPolicy,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Compiler using `{contents}` and failing on a missing marker.
    pub fn new() -> Self {
        Self {
            marker: CONTENTS_MARKER.to_string(),
            policy: MarkerPolicy::Error,
        }
    }

    /// Use a different marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Set the missing-marker policy.
    pub fn with_policy(mut self, policy: MarkerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn policy(&self) -> MarkerPolicy {
        self.policy
    }

    /// Substitute already parsed rules into the template.
    pub fn compile_rules(&self, rules: &[SuffixRule], template: &str) -> Result<String> {
        let table = render_rules(rules)?;
        substitute(template, &self.marker, &table, self.policy)
    }

    /// Parse `rule_text` and substitute the rule table into `template`.
    pub fn compile(&self, rule_text: &str, template: &str) -> Result<String> {
        let list = RuleList::parse(rule_text);
        self.compile_rules(list.rules(), template)
    }
}

/// Compile with the default marker and policy.
pub fn compile(rule_text: &str, template: &str) -> Result<String> {
    Compiler::new().compile(rule_text, template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::parse_line;

    fn rule(line: &str) -> SuffixRule {
        parse_line(line).unwrap()
    }

    #[test]
    fn test_serialize_rule() {
        assert_eq!(
            serialize_rule(&rule("co.uk")).unwrap(),
            r#"{false, false, {"co", "uk"}}"#
        );
        assert_eq!(
            serialize_rule(&rule("*.ck")).unwrap(),
            r#"{true, false, {"*", "ck"}}"#
        );
        assert_eq!(
            serialize_rule(&rule("!www.ck")).unwrap(),
            r#"{false, true, {"www", "ck"}}"#
        );
    }

    #[test]
    fn test_serialize_escapes() {
        let rule = SuffixRule::new(
            vec!["a\"b".into(), "c\\d".into(), "e\tf\u{1}".into()],
            false,
            false,
        );
        assert_eq!(
            serialize_rule(&rule).unwrap(),
            r#"{false, false, {"a\"b", "c\\d", "e\tf\u0001"}}"#
        );
    }

    #[test]
    fn test_serialize_non_ascii() {
        assert_eq!(
            serialize_rule(&rule("公司.cn")).unwrap(),
            "{false, false, {\"公司\", \"cn\"}}"
        );
    }

    #[test]
    fn test_render_rules() {
        let rules = vec![rule("com"), rule("net")];
        assert_eq!(
            render_rules(&rules).unwrap(),
            "{{false, false, {\"com\"}},\n{false, false, {\"net\"}}}"
        );
        assert_eq!(render_rules(&[]).unwrap(), "{}");
    }

    #[test]
    fn test_compile_end_to_end() {
        let text = "com\n*.example.com\n!foo.example.com";
        let output = compile(text, "PREFIX{contents}SUFFIX").unwrap();
        assert_eq!(
            output,
            concat!(
                "PREFIX{",
                "{false, false, {\"com\"}},\n",
                "{true, false, {\"*\", \"example\", \"com\"}},\n",
                "{false, true, {\"foo\", \"example\", \"com\"}}",
                "}SUFFIX"
            )
        );
    }

    #[test]
    fn test_compile_is_idempotent() {
        let text = "// comment\nac\n\n*.bd\n!www.ck extra words\n";
        let template = "static const rules[] = {contents};\n";
        let first = compile(text, template).unwrap();
        let second = compile(text, template).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_first_marker_replaced() {
        let output = compile("com", "{contents} and {contents}").unwrap();
        assert_eq!(output, "{{false, false, {\"com\"}}} and {contents}");
    }

    #[test]
    fn test_missing_marker_is_error() {
        let err = compile("com", "no marker here").unwrap_err();
        assert!(matches!(err, Error::MissingMarker(ref m) if m == CONTENTS_MARKER));
    }

    #[test]
    fn test_missing_marker_ignored() {
        let compiler = Compiler::new().with_policy(MarkerPolicy::Ignore);
        assert_eq!(compiler.compile("com", "no marker here").unwrap(), "no marker here");
    }

    #[test]
    fn test_custom_marker() {
        let compiler = Compiler::new().with_marker("@RULES@");
        assert_eq!(compiler.marker(), "@RULES@");
        assert_eq!(
            compiler.compile("com", "x = @RULES@;").unwrap(),
            "x = {{false, false, {\"com\"}}};"
        );
    }

    #[test]
    fn test_empty_list() {
        let output = compile("// nothing\n\n", "T{contents}").unwrap();
        assert_eq!(output, "T{}");
    }
}
