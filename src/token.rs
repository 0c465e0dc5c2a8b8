//! Tokens
//!
//!     A token is the terminal of the pipeline: a raw value, the label the lexer assigned to it
//!     and where it came from. Tokens are immutable once built. The label is set at creation and
//!     there is no way to change it afterwards; the parser only ever reads it.
//!
//!     Positions are best effort. `start_line` is 1-based when known, `pos` is either the column
//!     within the line (word splitting) or the index in the stream (everything else).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    value: String,
    label: String,
    start_line: usize,
    pos: usize,
}

impl Token {
    /// Build a token without position information.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_position(value, label, 0, 0)
    }

    pub fn with_position(
        value: impl Into<String>,
        label: impl Into<String>,
        start_line: usize,
        pos: usize,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            start_line,
            pos,
        }
    }

    /// Build tokens from `(value, label)` pairs, numbering them in stream order.
    pub fn from_value_label_pairs<I, V, L>(pairs: I) -> Vec<Token>
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        pairs
            .into_iter()
            .enumerate()
            .map(|(pos, (value, label))| Token::with_position(value, label, 1, pos))
            .collect()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.value, self.label)
    }
}

/// Best-effort position counter for streams that carry no positions.
///
/// Lines start at 1 and advance on every newline seen in a value; `pos` is the index of the
/// item in the stream.
#[derive(Debug, Clone)]
pub(crate) struct PositionCounter {
    line: usize,
    index: usize,
}

impl PositionCounter {
    pub(crate) fn new() -> Self {
        Self { line: 1, index: 0 }
    }

    /// Resolve the position of the next value, preferring explicit positions.
    pub(crate) fn next(
        &mut self,
        value: &str,
        start_line: Option<usize>,
        pos: Option<usize>,
    ) -> (usize, usize) {
        if let Some(line) = start_line {
            self.line = line;
        }
        let resolved = (self.line, pos.unwrap_or(self.index));
        self.line += value.matches('\n').count();
        self.index += 1;
        resolved
    }
}
