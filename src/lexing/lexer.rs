//! Ordered-rule lexer
//!
//! Rules are `(label, matcher)` pairs tried in declaration order; the first rule whose matcher
//! matches at the start of a word labels it. Regex patterns are compiled when the lexer is
//! built, so a bad pattern is reported before any word is seen.

use super::matcher::Matcher;
use super::words::{split_words, Word};
use crate::error::{LexConfigError, LexMatchError};
use crate::settings::LexerSettings;
use crate::token::{PositionCounter, Token};
use crate::trace::{emit, LexAttempt, TraceEvent, Tracer};
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LexRule {
    label: String,
    matcher: Matcher,
}

impl LexRule {
    pub fn new(label: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            label: label.into(),
            matcher,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

/// What to do with a word no rule matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// Keep the word under this label
    Fallback(String),
    /// Fail with [LexMatchError]
    Error,
}

impl Default for UnmatchedPolicy {
    fn default() -> Self {
        UnmatchedPolicy::Fallback(Lexer::DEFAULT_FALLBACK_LABEL.to_string())
    }
}

enum RuleSource {
    Pattern(String),
    Matcher(Matcher),
}

/// Collects rules in order; regexes are compiled by [LexerBuilder::build].
#[derive(Default)]
pub struct LexerBuilder {
    rules: Vec<(String, RuleSource)>,
    unmatched: UnmatchedPolicy,
    tracer: Option<Arc<dyn Tracer>>,
}

impl LexerBuilder {
    pub fn pattern(mut self, label: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.rules
            .push((label.into(), RuleSource::Pattern(pattern.into())));
        self
    }

    pub fn matcher(mut self, label: impl Into<String>, matcher: Matcher) -> Self {
        self.rules.push((label.into(), RuleSource::Matcher(matcher)));
        self
    }

    pub fn callable<F>(self, label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, usize) -> Option<Range<usize>> + Send + Sync + 'static,
    {
        self.matcher(label, Matcher::callable(f))
    }

    pub fn unmatched(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    pub fn tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn build(self) -> Result<Lexer, LexConfigError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        for (index, (label, source)) in self.rules.into_iter().enumerate() {
            if label.contains(['<', '>', '{', '}']) {
                return Err(LexConfigError::InvalidLabel { index, label });
            }
            let matcher = match source {
                RuleSource::Matcher(matcher) => matcher,
                RuleSource::Pattern(pattern) => match Regex::new(&pattern) {
                    Ok(regex) => Matcher::Pattern(regex),
                    Err(source) => {
                        return Err(LexConfigError::InvalidPattern {
                            index,
                            label,
                            pattern,
                            source,
                        })
                    }
                },
            };
            rules.push(LexRule::new(label, matcher));
        }
        tracing::debug!(rules = rules.len(), "lexer built");
        Ok(Lexer {
            rules,
            unmatched: self.unmatched,
            tracer: self.tracer,
        })
    }
}

#[derive(Clone)]
pub struct Lexer {
    rules: Vec<LexRule>,
    unmatched: UnmatchedPolicy,
    tracer: Option<Arc<dyn Tracer>>,
}

impl Lexer {
    pub const DEFAULT_FALLBACK_LABEL: &'static str = "UNKNOWN";

    pub fn builder() -> LexerBuilder {
        LexerBuilder::default()
    }

    /// Build a lexer from `(label, regex)` pairs.
    pub fn new<I, L, P>(rules: I) -> Result<Self, LexConfigError>
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<String>,
    {
        rules
            .into_iter()
            .fold(Lexer::builder(), |builder, (label, pattern)| {
                builder.pattern(label, pattern)
            })
            .build()
    }

    /// Build a lexer from the `[lexer]` settings table.
    pub fn from_settings(settings: &LexerSettings) -> Result<Self, LexConfigError> {
        settings
            .rules
            .iter()
            .fold(Lexer::builder(), |builder, rule| {
                builder.pattern(rule.label.as_str(), rule.pattern.as_str())
            })
            .unmatched(settings.unmatched_policy())
            .build()
    }

    /// Build a lexer from already constructed rules.
    pub fn from_rules(rules: Vec<LexRule>) -> Self {
        Self {
            rules,
            unmatched: UnmatchedPolicy::default(),
            tracer: None,
        }
    }

    pub fn with_unmatched(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    pub fn with_tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn rules(&self) -> &[LexRule] {
        &self.rules
    }

    pub fn unmatched(&self) -> &UnmatchedPolicy {
        &self.unmatched
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Label of the first rule matching `word`, if any. Does not trace.
    pub fn label_for(&self, word: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(word))
            .map(|rule| rule.label.as_str())
    }

    /// Label a sequence of words, in order.
    pub fn lex<I>(&self, words: I) -> Result<Vec<Token>, LexMatchError>
    where
        I: IntoIterator,
        I::Item: Into<Word>,
    {
        let mut counter = PositionCounter::new();
        let mut tokens = Vec::new();

        for (index, word) in words.into_iter().enumerate() {
            let word: Word = word.into();
            let (start_line, pos) = counter.next(&word.value, word.start_line, word.pos);
            let label = match self.classify(index, &word.value) {
                Some(label) => label.to_string(),
                None => match &self.unmatched {
                    UnmatchedPolicy::Fallback(label) => {
                        emit(
                            self.tracer.as_ref(),
                            TraceEvent::LexAttempt(LexAttempt {
                                word_index: index,
                                word: &word.value,
                                rule_index: None,
                                label,
                                matched: false,
                            }),
                        );
                        label.clone()
                    }
                    UnmatchedPolicy::Error => {
                        return Err(LexMatchError {
                            index,
                            value: word.value,
                            start_line,
                            pos,
                        })
                    }
                },
            };
            tokens.push(Token::with_position(word.value, label, start_line, pos));
        }

        Ok(tokens)
    }

    /// Split `text` on whitespace and label the words.
    pub fn lex_text(&self, text: &str) -> Result<Vec<Token>, LexMatchError> {
        self.lex(split_words(text))
    }

    fn classify(&self, index: usize, word: &str) -> Option<&str> {
        for (rule_index, rule) in self.rules.iter().enumerate() {
            let matched = rule.matcher.is_match(word);
            emit(
                self.tracer.as_ref(),
                TraceEvent::LexAttempt(LexAttempt {
                    word_index: index,
                    word,
                    rule_index: Some(rule_index),
                    label: &rule.label,
                    matched,
                }),
            );
            if matched {
                return Some(&rule.label);
            }
        }
        None
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("rules", &self.rules)
            .field("unmatched", &self.unmatched)
            .field("traced", &self.tracer.is_some())
            .finish()
    }
}

impl fmt::Display for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Lexer: size={}>", self.rules.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{RecordingTracer, TraceRecord};

    fn brown_lexer() -> Lexer {
        Lexer::new([
            ("CD", r"^-?[0-9]+(.[0-9]+)?$"),
            ("AT", r"(The|the|A|a|An|an)$"),
            ("JJ", r".*able$"),
            ("NN", r".*ness$"),
            ("RB", r".*ly$"),
            ("NNS", r".*s$"),
            ("VBG", r".*ing$"),
            ("VBD", r".*ed$"),
            ("NN", r".*"),
        ])
        .unwrap()
    }

    #[test]
    fn test_brown_suffix_rules() {
        let sent = "The Fulton County Grand Jury said Friday an investigation of Atlanta's \
                    recent primary election produced `` no evidence '' that any \
                    irregularities took place .";
        let tokens = brown_lexer().lex(sent.split_whitespace()).unwrap();
        let labels: Vec<_> = tokens.iter().map(|t| (t.value(), t.label())).collect();
        assert_eq!(labels[0], ("The", "AT"));
        assert_eq!(labels[1], ("Fulton", "NN"));
        assert_eq!(labels[7], ("an", "AT"));
        assert_eq!(labels[10], ("Atlanta's", "NNS"));
        assert_eq!(labels[14], ("produced", "VBD"));
        assert_eq!(labels[21], ("irregularities", "NNS"));
        assert_eq!(labels[24], (".", "NN"));
        assert_eq!(tokens.len(), 25);
    }

    #[test]
    fn test_first_match_wins() {
        let lexer = Lexer::new([("NUM", r"\d+"), ("ANY", r".*")]).unwrap();
        let tokens = lexer.lex(["123"]).unwrap();
        assert_eq!(tokens[0].label(), "NUM");
    }

    #[test]
    fn test_bad_regex_fails_at_construction() {
        let err = Lexer::new([("NN", r"^Copyright\.txt$"), ("BAD", r"^C(opyright\.txt$[(")])
            .unwrap_err();
        match err {
            LexConfigError::InvalidPattern {
                index,
                label,
                pattern,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(label, "BAD");
                assert_eq!(pattern, r"^C(opyright\.txt$[(");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_bracketed_label_fails_at_construction() {
        let err = Lexer::new([("NN", r"\w+"), ("A><B", r"\d+")]).unwrap_err();
        assert!(matches!(
            err,
            LexConfigError::InvalidLabel { index: 1, ref label } if label == "A><B"
        ));
        assert!(Lexer::builder()
            .callable("{X}", |_, _| None)
            .build()
            .is_err());
    }

    #[test]
    fn test_many_rules() {
        let rules: Vec<_> = (0..200).map(|i| ("NNP", i.to_string())).collect();
        let lexer = Lexer::new(rules).unwrap();
        assert_eq!(lexer.len(), 200);
        assert_eq!(lexer.label_for("199"), Some("NNP"));
    }

    #[test]
    fn test_fallback_label() {
        let lexer = Lexer::new([("NUM", r"\d+")]).unwrap();
        let tokens = lexer.lex(["abc"]).unwrap();
        assert_eq!(tokens[0].label(), Lexer::DEFAULT_FALLBACK_LABEL);

        let lexer = lexer.with_unmatched(UnmatchedPolicy::Fallback("WORD".to_string()));
        assert_eq!(lexer.lex(["abc"]).unwrap()[0].label(), "WORD");
    }

    #[test]
    fn test_unmatched_error_policy() {
        let lexer = Lexer::new([("NUM", r"\d+")])
            .unwrap()
            .with_unmatched(UnmatchedPolicy::Error);
        let err = lexer.lex(["1", "x"]).unwrap_err();
        assert_eq!(
            err,
            LexMatchError {
                index: 1,
                value: "x".to_string(),
                start_line: 1,
                pos: 1,
            }
        );
    }

    #[test]
    fn test_callable_rules_mix_with_patterns() {
        let lexer = Lexer::builder()
            .pattern("NN", r"^Copyright\.txt$")
            .matcher("FOO", Matcher::predicate(|w| w == "foo"))
            .callable("NEVER", |_, _| None)
            .build()
            .unwrap();
        let tokens = lexer.lex(["foo", "Copyright.txt"]).unwrap();
        assert_eq!(tokens[0].label(), "FOO");
        assert_eq!(tokens[1].label(), "NN");
    }

    #[test]
    fn test_positions_propagate() {
        let lexer = Lexer::new([("W", r".+")]).unwrap();
        let tokens = lexer.lex(vec![Word::at("a", 3, 4), Word::new("b")]).unwrap();
        assert_eq!((tokens[0].start_line(), tokens[0].pos()), (3, 4));
        assert_eq!((tokens[1].start_line(), tokens[1].pos()), (3, 1));
    }

    #[test]
    fn test_lex_text_uses_columns() {
        let lexer = Lexer::new([("W", r".+")]).unwrap();
        let tokens = lexer.lex_text("a bc\nd").unwrap();
        assert_eq!((tokens[1].start_line(), tokens[1].pos()), (1, 2));
        assert_eq!((tokens[2].start_line(), tokens[2].pos()), (2, 0));
    }

    #[test]
    fn test_trace_reports_every_attempt() {
        let recorder = Arc::new(RecordingTracer::new());
        let lexer = Lexer::new([("NUM", r"\d+"), ("WORD", r"[a-z]+")])
            .unwrap()
            .with_tracer(recorder.clone());
        lexer.lex(["abc", "!"]).unwrap();

        let records = recorder.lex_records();
        assert_eq!(records.len(), 5);
        assert!(matches!(
            &records[1],
            TraceRecord::LexAttempt { word_index: 0, rule_index: Some(1), matched: true, .. }
        ));
        assert_eq!(
            records[4],
            TraceRecord::LexAttempt {
                word_index: 1,
                word: "!".to_string(),
                rule_index: None,
                label: "UNKNOWN".to_string(),
                matched: false,
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(brown_lexer().to_string(), "<Lexer: size=9>");
    }
}
