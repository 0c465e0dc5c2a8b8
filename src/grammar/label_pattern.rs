//! Label patterns
//!
//! A label pattern is a regex over a sequence of labels. The sequence is encoded as a string
//! where every label sits in angle brackets, `<DT><JJ><NN>`, and the pattern is rewritten so
//! that it can only ever match whole labels:
//!
//!     - `<` and `>` act as parentheses: `<NN>+` repeats the whole `<NN>`, and `<NN|IN>` is an
//!       alternation between two labels, not between `<NN` and `IN>`.
//!     - Whitespace is ignored: `<DT> | <NN>` is `<DT>|<NN>`.
//!     - An unescaped `.` matches one label character and never a bracket or a brace, so
//!       `<NN.*>` matches any single label starting with `NN`.
//!
//! Braces are only legal as quantifiers (`{2}`, `{2,}`, `{2,3}`); angle brackets must not nest.

use crate::error::RuleError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Shape of a rewritten pattern: label groups, plain regex text, and brace quantifiers only.
static LABEL_PATTERN_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:[^{}<>]|\{\d+,?\}|\{\d*,\d+\})+|<[^{}<>]+>)*$").unwrap()
});

/// What an unescaped `.` becomes: any character except brackets and braces.
const LABEL_CHAR: &str = "[^{}<>]";

/// Rewrite a label pattern into a regex over `<label>` strings.
pub fn label_pattern_to_regex(pattern: &str) -> Result<String, RuleError> {
    let grouped: String = pattern
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace('<', "(?:<(?:")
        .replace('>', ")>)");

    if !LABEL_PATTERN_SHAPE.is_match(&grouped) {
        return Err(RuleError::BadPattern(pattern.to_string()));
    }

    let mut regex = String::with_capacity(grouped.len());
    let mut escaped = false;
    for c in grouped.chars() {
        match c {
            '.' if !escaped => regex.push_str(LABEL_CHAR),
            '\\' if !escaped => {
                regex.push(c);
                escaped = true;
                continue;
            }
            _ => regex.push(c),
        }
        escaped = false;
    }

    Ok(regex)
}

/// Rewrite and compile a label pattern.
pub fn compile_label_pattern(pattern: &str) -> Result<Regex, RuleError> {
    compile(pattern, label_pattern_to_regex(pattern)?)
}

/// Compile a label pattern that only matches a label string as a whole.
pub(crate) fn compile_whole_label_pattern(pattern: &str) -> Result<Regex, RuleError> {
    compile(pattern, format!("^(?:{})$", label_pattern_to_regex(pattern)?))
}

fn compile(pattern: &str, source: String) -> Result<Regex, RuleError> {
    Regex::new(&source).map_err(|source| RuleError::Regex {
        pattern: pattern.to_string(),
        source,
    })
}
