//! External lexer adapter
//!
//!     Streams produced by another lexer arrive as `(value, type)` pairs, where the type is a
//!     dotted path such as `Token.Name.Builtin`. The adapter turns them into [Token]s whose label
//!     is the type without its leading namespace qualifier (`Name.Builtin`), so grammars can be
//!     written against the interesting part of the type.
//!
//!     Order is preserved. Positions carried by the external tokens are kept; missing ones are
//!     counted the same way the lexer counts them.

use crate::token::{PositionCounter, Token};

/// A token as produced by an external lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalToken {
    pub value: String,
    pub kind: String,
    pub start_line: Option<usize>,
    pub pos: Option<usize>,
}

impl ExternalToken {
    pub fn new(value: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: kind.into(),
            start_line: None,
            pos: None,
        }
    }

    pub fn at(mut self, start_line: usize, pos: usize) -> Self {
        self.start_line = Some(start_line);
        self.pos = Some(pos);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLexerAdapter {
    separator: String,
}

impl Default for ExternalLexerAdapter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ExternalLexerAdapter {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Drop everything up to and including the first separator.
    pub fn label_for<'a>(&self, kind: &'a str) -> &'a str {
        if self.separator.is_empty() {
            return kind;
        }
        match kind.split_once(self.separator.as_str()) {
            Some((_, rest)) => rest,
            None => kind,
        }
    }

    pub fn adapt<I>(&self, tokens: I) -> Vec<Token>
    where
        I: IntoIterator<Item = ExternalToken>,
    {
        let mut counter = PositionCounter::new();
        tokens
            .into_iter()
            .map(|token| {
                let (line, pos) = counter.next(&token.value, token.start_line, token.pos);
                let label = self.label_for(&token.kind).to_string();
                Token::with_position(token.value, label, line, pos)
            })
            .collect()
    }

    /// Adapt bare `(value, type)` pairs.
    pub fn adapt_pairs<I, V, K>(&self, pairs: I) -> Vec<Token>
    where
        I: IntoIterator<Item = (V, K)>,
        V: Into<String>,
        K: Into<String>,
    {
        self.adapt(
            pairs
                .into_iter()
                .map(|(value, kind)| ExternalToken::new(value, kind)),
        )
    }
}
