//! Lexing
//!
//!     The lexer assigns one label to each word of an already split sequence. It does not split
//!     text itself; [split_words] is a convenience for callers starting from raw text, and
//!     [crate::adapters] covers token streams coming from other lexers.
//!
//! Rules
//!
//!     A rule is a label and a [Matcher]. Matchers are either compiled regexes or callables; in
//!     both cases a match must begin at the start of the word (prefix semantics, anchor with `$`
//!     for a full match). Rules are tried in declaration order and the first match wins.
//!
//! Unmatched Words
//!
//!     By default an unmatched word keeps its value and gets the fallback label `UNKNOWN`. With
//!     [UnmatchedPolicy::Error] lexing stops with a [crate::error::LexMatchError] instead. Words
//!     are never dropped.

pub mod lexer;
pub mod matcher;
pub mod words;

pub use lexer::{LexRule, Lexer, LexerBuilder, UnmatchedPolicy};
pub use matcher::{MatchFn, Matcher};
pub use words::{split_words, Word};
