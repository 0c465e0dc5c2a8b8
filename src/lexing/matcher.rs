//! Lexer matchers
//!
//! A matcher answers one question: given a word and a start offset, does a match begin
//! exactly there, and where does it end? Compiled regexes and arbitrary callables are the two
//! capabilities; both live in the same closed enum.

use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Callable matcher: `(word, start) -> Some(match extent)` when a match begins at `start`.
pub type MatchFn = dyn Fn(&str, usize) -> Option<Range<usize>> + Send + Sync;

#[derive(Clone)]
pub enum Matcher {
    Pattern(Regex),
    Callable(Arc<MatchFn>),
}

impl Matcher {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&str, usize) -> Option<Range<usize>> + Send + Sync + 'static,
    {
        Matcher::Callable(Arc::new(f))
    }

    /// Wrap a predicate; a `true` answer counts as a match of the rest of the word.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Matcher::callable(move |word: &str, start: usize| {
            let rest = word.get(start..)?;
            f(rest).then(|| start..word.len())
        })
    }

    /// Match beginning exactly at `start`.
    pub fn match_at(&self, word: &str, start: usize) -> Option<Range<usize>> {
        match self {
            Matcher::Pattern(regex) => {
                if start > word.len() {
                    return None;
                }
                // The leftmost match starts at `start` whenever any match does.
                regex
                    .find_at(word, start)
                    .filter(|m| m.start() == start)
                    .map(|m| m.range())
            }
            Matcher::Callable(f) => f(word, start),
        }
    }

    pub fn is_match(&self, word: &str) -> bool {
        self.match_at(word, 0).is_some()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Matcher::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Pattern(regex) => f.write_str(regex.as_str()),
            Matcher::Callable(_) => f.write_str("<callable>"),
        }
    }
}
