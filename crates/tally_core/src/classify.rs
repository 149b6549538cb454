use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::config::{BuiltinRule, RuleSpec};

/// Whether a line is template text or something the reviewer wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Form,
    Response,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("invalid classifier pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

#[derive(Debug, Clone)]
struct CompiledRule {
    spec: RuleSpec,
    regex: Regex,
}

/// Ordered rule list deciding form vs. response for single lines.
///
/// A line is [`LineKind::Form`] as soon as any rule matches it in full;
/// lines no rule matches are [`LineKind::Response`]. An empty rule list
/// therefore treats every line as response text.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CompiledRule>,
}

impl Classifier {
    /// Compiles the given rules, keeping their order.
    pub fn from_rules(specs: &[RuleSpec]) -> Result<Self, RuleError> {
        let rules = specs
            .iter()
            .map(|spec| {
                let regex = match spec {
                    RuleSpec::Builtin(rule) => builtin_regex(*rule).clone(),
                    RuleSpec::Pattern(pattern) => compile_full_line(pattern)?,
                };
                Ok(CompiledRule {
                    spec: spec.clone(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleSpec> {
        self.rules.iter().map(|rule| &rule.spec)
    }

    /// Classifies one line. `line` must not contain its terminator.
    pub fn classify(&self, line: &str) -> LineKind {
        if self.rules.iter().any(|rule| rule.regex.is_match(line)) {
            LineKind::Form
        } else {
            LineKind::Response
        }
    }

    pub fn is_form(&self, line: &str) -> bool {
        self.classify(line) == LineKind::Form
    }
}

impl Default for Classifier {
    fn default() -> Self {
        let rules = BuiltinRule::ALL
            .into_iter()
            .map(|rule| CompiledRule {
                spec: RuleSpec::Builtin(rule),
                regex: builtin_regex(rule).clone(),
            })
            .collect();
        Self { rules }
    }
}

impl PartialEq for Classifier {
    fn eq(&self, other: &Self) -> bool {
        self.rules().eq(other.rules())
    }
}

impl Eq for Classifier {}

fn compile_full_line(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|err| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

fn builtin_regex(rule: BuiltinRule) -> &'static Regex {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    static BRACKET_RE: OnceLock<Regex> = OnceLock::new();
    static PROMPT_RE: OnceLock<Regex> = OnceLock::new();
    static BLANK_RE: OnceLock<Regex> = OnceLock::new();

    let (cell, pattern) = match rule {
        // Major (`==+==`) and minor (`==-==`) markers alike.
        BuiltinRule::SectionHeader => (&HEADER_RE, r"^==[+-]==.*$"),
        BuiltinRule::BracketedNote => (&BRACKET_RE, r"^\s*\[[^\[\]]*\]\s*$"),
        BuiltinRule::PromptLine => (&PROMPT_RE, r"^(?:\S.*)?:\s*$"),
        BuiltinRule::BlankLine => (&BLANK_RE, r"^\s*$"),
    };
    cell.get_or_init(|| Regex::new(pattern).expect("built-in classifier pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_patterns_are_anchored_to_the_whole_line() {
        let classifier = Classifier::from_rules(&[RuleSpec::Pattern("Reviewer.*".into())]).unwrap();
        assert_eq!(classifier.classify("Reviewer: Alice"), LineKind::Form);
        assert_eq!(classifier.classify("The Reviewer agrees"), LineKind::Response);
    }

    #[test]
    fn invalid_pattern_names_the_offender() {
        let err = Classifier::from_rules(&[RuleSpec::Pattern("(".into())]).unwrap_err();
        let RuleError::InvalidPattern { pattern, .. } = err;
        assert_eq!(pattern, "(");
    }

    #[test]
    fn default_matches_builtin_spec_list() {
        let specs: Vec<RuleSpec> = BuiltinRule::ALL.into_iter().map(RuleSpec::Builtin).collect();
        assert_eq!(Classifier::default(), Classifier::from_rules(&specs).unwrap());
    }
}
