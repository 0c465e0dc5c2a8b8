//! Grammars
//!
//!     A grammar is an ordered list of [ParseRule]s, written one per line:
//!
//!         NP: {<DT>? <JJ>* <NN>*}  # Noun phrase
//!         P:  <IN>                 # Preposition
//!         PP: <P> <NP>
//!
//!     The label comes before the first `:`, the pattern follows it, and an optional description
//!     starts at the first unescaped `#`. Braces around the pattern are optional. Blank lines and
//!     lines starting with `#` are skipped. Order matters: rules run top to bottom and later rules
//!     see the nodes produced by earlier ones.
//!
//!     Pattern syntax is described in [label_pattern].

pub mod label_pattern;

use crate::error::{GrammarErrorKind, GrammarSyntaxError, RuleError};
use crate::parsing::parse_string::{chunk, ParseString};
use crate::tree::Tree;
use label_pattern::{compile_label_pattern, compile_whole_label_pattern};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

static RULE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// A label and the label pattern whose matches it names.
#[derive(Debug, Clone)]
pub struct ParseRule {
    label: String,
    pattern: String,
    description: Option<String>,
    regex: Regex,
    whole: Regex,
}

impl ParseRule {
    /// Build a rule. `pattern` may be wrapped in braces; they are dropped.
    pub fn new(
        label: impl Into<String>,
        pattern: &str,
        description: Option<&str>,
    ) -> Result<Self, RuleError> {
        let label = label.into();
        if !RULE_LABEL.is_match(&label) {
            return Err(RuleError::InvalidLabel(label));
        }

        let pattern = strip_chunk_braces(pattern);
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        let regex = compile_label_pattern(pattern)?;
        let whole = compile_whole_label_pattern(pattern)?;

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(Self {
            label,
            pattern: pattern.to_string(),
            description,
            regex,
            whole,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label pattern as written, without enclosing braces.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The compiled regex over `<label>` strings.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Node spans of `parse_string` chunked by this rule.
    pub(crate) fn find_spans(&self, parse_string: &ParseString) -> Vec<Range<usize>> {
        parse_string.find_spans(&self.regex, &self.whole)
    }

    /// Group every matched span of `nodes` under a new node labelled with this rule's label.
    /// Nodes outside matches are returned unchanged and in order.
    pub fn apply(&self, nodes: Vec<Tree>) -> Vec<Tree> {
        let spans = self.find_spans(&ParseString::new(&nodes));
        if spans.is_empty() {
            return nodes;
        }
        chunk(nodes, &spans, &self.label)
    }
}

impl fmt::Display for ParseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Rule: {} / {}", self.pattern, self.label)?;
        if let Some(description) = &self.description {
            write!(f, " # {description}")?;
        }
        write!(f, ">")
    }
}

fn strip_chunk_braces(pattern: &str) -> &str {
    let trimmed = pattern.trim();
    match trimmed.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// An ordered rule list.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<ParseRule>,
}

impl Grammar {
    pub fn parse(text: &str) -> Result<Self, GrammarSyntaxError> {
        parse_grammar(text).map(Self::from_rules)
    }

    pub fn from_rules(rules: Vec<ParseRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ParseRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_rules(self) -> Vec<ParseRule> {
        self.rules
    }
}

impl FromStr for Grammar {
    type Err = GrammarSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Grammar {
    type Item = &'a ParseRule;
    type IntoIter = std::slice::Iter<'a, ParseRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Renders back to grammar text, one rule per line.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "{}: {{{}}}", rule.label, rule.pattern)?;
            if let Some(description) = &rule.description {
                write!(f, " # {description}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parse grammar text into rules, in order.
pub fn parse_grammar(text: &str) -> Result<Vec<ParseRule>, GrammarSyntaxError> {
    let mut rules = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let error = |kind: GrammarErrorKind| GrammarSyntaxError {
            line_number: index + 1,
            line: raw.to_string(),
            kind,
        };

        let (label, rest) = line
            .split_once(':')
            .ok_or_else(|| error(GrammarErrorKind::MissingSeparator))?;
        let (pattern, description) = split_description(rest);
        let rule = ParseRule::new(label.trim(), pattern, description)
            .map_err(|e| error(GrammarErrorKind::Rule(e)))?;
        rules.push(rule);
    }
    Ok(rules)
}

/// Split at the first `#` not preceded by a backslash.
fn split_description(text: &str) -> (&str, Option<&str>) {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            '\\' if !escaped => {
                escaped = true;
                continue;
            }
            '#' if !escaped => return (&text[..i], Some(&text[i + 1..])),
            _ => {}
        }
        escaped = false;
    }
    (text, None)
}
