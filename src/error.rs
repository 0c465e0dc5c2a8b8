//! Error types
//!
//!     Construction-time errors (bad lexer rules, bad grammar text) fail fast and carry the
//!     offending rule or line. The only runtime error is an unmatched word, and only when the
//!     lexer is configured to reject unmatched words.

use thiserror::Error;

/// A lexer rule could not be built.
#[derive(Debug, Clone, Error)]
pub enum LexConfigError {
    #[error("invalid lexer rule #{index} (label {label:?}): pattern {pattern:?} does not compile: {source}")]
    InvalidPattern {
        index: usize,
        label: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid lexer rule #{index}: label {label:?} contains a bracket or a brace")]
    InvalidLabel { index: usize, label: String },
}

/// No lexer rule matched a word and the lexer rejects unmatched words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no lexer rule matched word #{index} {value:?} at line {start_line}, pos {pos}")]
pub struct LexMatchError {
    pub index: usize,
    pub value: String,
    pub start_line: usize,
    pub pos: usize,
}

/// A single parse rule could not be built from its label and pattern.
#[derive(Debug, Clone, Error)]
pub enum RuleError {
    #[error("invalid rule label {0:?}: expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidLabel(String),
    #[error("empty pattern")]
    EmptyPattern,
    #[error("bad label pattern {0:?}")]
    BadPattern(String),
    #[error("label pattern {pattern:?} does not compile: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// What went wrong on a grammar line.
#[derive(Debug, Clone, Error)]
pub enum GrammarErrorKind {
    #[error("expected `LABEL: PATTERN`, found no `:` separator")]
    MissingSeparator,
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// A grammar line could not be decomposed into label, pattern and description.
#[derive(Debug, Clone, Error)]
#[error("grammar line {line_number}: {kind}: {line:?}")]
pub struct GrammarSyntaxError {
    /// 1-based line number in the grammar text
    pub line_number: usize,
    /// The raw, untrimmed line
    pub line: String,
    pub kind: GrammarErrorKind,
}

/// A parser could not be constructed.
#[derive(Debug, Clone, Error)]
pub enum ParseConfigError {
    #[error("cannot build parser: {0}")]
    Grammar(#[from] GrammarSyntaxError),
}

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    LexConfig(#[from] LexConfigError),
    #[error(transparent)]
    LexMatch(#[from] LexMatchError),
    #[error(transparent)]
    Grammar(#[from] GrammarSyntaxError),
    #[error(transparent)]
    ParseConfig(#[from] ParseConfigError),
    #[error("settings: {0}")]
    Settings(#[from] ::config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_error_names_line_and_text() {
        let err = GrammarSyntaxError {
            line_number: 3,
            line: "BAD RULE WITHOUT COLON".to_string(),
            kind: GrammarErrorKind::MissingSeparator,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("grammar line 3:"), "{msg}");
        assert!(msg.contains("\"BAD RULE WITHOUT COLON\""), "{msg}");
    }

    #[test]
    fn lex_config_error_names_rule() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = LexConfigError::InvalidPattern {
            index: 2,
            label: "NN".to_string(),
            pattern: "(".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("#2"));
        assert!(msg.contains("\"NN\""));
        assert!(msg.contains("\"(\""));
    }

    #[test]
    fn parse_config_wraps_grammar_error() {
        let err: Error = ParseConfigError::from(GrammarSyntaxError {
            line_number: 1,
            line: "X".to_string(),
            kind: GrammarErrorKind::MissingSeparator,
        })
        .into();
        assert!(matches!(err, Error::ParseConfig(_)));
        assert!(err.to_string().contains("grammar line 1"));
    }
}
