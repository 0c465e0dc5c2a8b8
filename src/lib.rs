//! # chunklex
//!
//! A two-stage annotation engine: an ordered-rule lexer that labels pre-split words,
//! and a chunk parser that groups the labeled sequence into a shallow tree.
//!
//! The Pipeline
//!
//!     raw words -> [lexing::Lexer] -> [token::Token]s -> leaves -> [parsing::Parser] -> [tree::Tree]
//!
//!     Lexing tries every rule in declaration order for each word, the first match assigns the
//!     label. Parsing applies every grammar rule once, in declaration order, in a single left to
//!     right pass over the current sequence of nodes. Matched runs are spliced into new nodes.
//!     Nothing recurses and nothing backtracks.
//!
//! Grammar
//!
//!     A grammar is plain text, one rule per line:
//!
//!         NP: {<DT>? <JJ>* <NN.*>+}   # noun phrase
//!         PP: <IN> <NP>               # preposition + NP
//!
//!     See [grammar] for the label pattern language.
//!
//! Tracing
//!
//!     Both stages accept an optional [trace::Tracer]. Lexing reports every rule attempt, parsing
//!     reports only the rules that matched.
//!
//! For test helpers, see the [testing module](testing).

pub mod adapters;
pub mod error;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod settings;
pub mod testing;
pub mod token;
pub mod trace;
pub mod tree;

pub use error::{Error, Result};
pub use grammar::{parse_grammar, Grammar, ParseRule};
pub use lexing::{LexRule, Lexer, Matcher, UnmatchedPolicy, Word};
pub use parsing::Parser;
pub use token::Token;
pub use tree::Tree;
