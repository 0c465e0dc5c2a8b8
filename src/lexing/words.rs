//! Word splitting
//!
//! The lexer works on pre-split words. This module is the optional front door that turns raw
//! text into words with positions, using a logos tokenizer: runs of non-whitespace are words,
//! newlines advance the line counter, other whitespace is skipped.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    #[token("\n")]
    Newline,

    #[regex(r"[^\s]+")]
    Word,
}

/// A word handed to the lexer, with optional source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub value: String,
    /// 1-based line, when known
    pub start_line: Option<usize>,
    /// Column (byte offset in the line) or stream index, when known
    pub pos: Option<usize>,
}

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            start_line: None,
            pos: None,
        }
    }

    pub fn at(value: impl Into<String>, start_line: usize, pos: usize) -> Self {
        Self {
            value: value.into(),
            start_line: Some(start_line),
            pos: Some(pos),
        }
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Word::new(value)
    }
}

impl From<String> for Word {
    fn from(value: String) -> Self {
        Word::new(value)
    }
}

impl From<&String> for Word {
    fn from(value: &String) -> Self {
        Word::new(value.as_str())
    }
}

/// Split text on whitespace, recording the line and column of every word.
pub fn split_words(text: &str) -> Vec<Word> {
    let mut lexer = RawToken::lexer(text);
    let mut words = Vec::new();
    let mut line = 1;
    let mut line_start = 0;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(RawToken::Newline) => {
                line += 1;
                line_start = span.end;
            }
            Ok(RawToken::Word) => {
                words.push(Word::at(lexer.slice(), line, span.start - line_start));
            }
            // Unicode whitespace outside the skip set lands here; it separates words too.
            Err(()) => {}
        }
    }

    words
}
