//! Label strings
//!
//! A node sequence is matched by encoding it as a string of bracketed labels, `<DT><NN><VBD>`,
//! and running a rule's regex over it. The offset where each node starts is kept alongside the
//! string, so a regex match maps back to node indices. Matches that begin or end inside a label
//! are discarded, which keeps every chunk a contiguous run of whole nodes.
//!
//! Brackets inside a label are written as braces, which the label-local `.` never matches, so
//! a label like `A><B` cannot pass for two nodes.

use crate::tree::Tree;
use regex::Regex;
use std::ops::Range;

pub(crate) struct ParseString {
    encoded: String,
    /// Start offset of each node, followed by the encoded length
    boundaries: Vec<usize>,
}

impl ParseString {
    pub(crate) fn new(nodes: &[Tree]) -> Self {
        let mut encoded = String::new();
        let mut boundaries = Vec::with_capacity(nodes.len() + 1);
        for node in nodes {
            boundaries.push(encoded.len());
            encoded.push('<');
            encoded.extend(node.label().chars().map(|c| match c {
                '<' => '{',
                '>' => '}',
                c => c,
            }));
            encoded.push('>');
        }
        boundaries.push(encoded.len());
        Self {
            encoded,
            boundaries,
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.encoded
    }

    fn node_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Node index starting at `offset`, or the node count for the end of the string.
    fn node_at(&self, offset: usize) -> Option<usize> {
        self.boundaries.binary_search(&offset).ok()
    }

    fn next_boundary_after(&self, offset: usize) -> usize {
        let index = self.boundaries.partition_point(|&b| b <= offset);
        self.boundaries
            .get(index)
            .copied()
            .unwrap_or(self.encoded.len())
    }

    /// Non-overlapping node spans matched by `regex`, left to right.
    ///
    /// `whole` is the same pattern anchored at both ends. When `regex` only finds an empty match
    /// at a node, the longest run starting there that `whole` accepts is taken instead.
    pub(crate) fn find_spans(&self, regex: &Regex, whole: &Regex) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut at = 0;
        while at < self.encoded.len() {
            let Some(m) = regex.find_at(&self.encoded, at) else {
                break;
            };
            let span = match (self.node_at(m.start()), self.node_at(m.end())) {
                (Some(start), Some(end)) if end > start => Some(start..end),
                (Some(start), Some(_)) => self.longest_run_at(start, whole),
                _ => None,
            };
            match span {
                Some(span) => {
                    at = self.boundaries[span.end];
                    spans.push(span);
                }
                None => at = self.next_boundary_after(m.start()),
            }
        }
        spans
    }

    /// Longest non-empty run of nodes from `start` whose labels `whole` matches.
    fn longest_run_at(&self, start: usize, whole: &Regex) -> Option<Range<usize>> {
        let from = self.boundaries[start];
        (start + 1..=self.node_count())
            .rev()
            .find(|&end| whole.is_match(&self.encoded[from..self.boundaries[end]]))
            .map(|end| start..end)
    }

    /// The label string with each span wrapped in braces, e.g. `{<DT><NN>}<VBD>`.
    pub(crate) fn bracketed(&self, spans: &[Range<usize>]) -> String {
        let mut out = String::with_capacity(self.encoded.len() + 2 * spans.len());
        let mut spans = spans.iter().peekable();
        for i in 0..self.node_count() {
            let opens = spans.peek().is_some_and(|s| s.start == i);
            if opens {
                out.push('{');
            }
            out.push_str(&self.encoded[self.boundaries[i]..self.boundaries[i + 1]]);
            if spans.peek().is_some_and(|s| s.end == i + 1) {
                out.push('}');
                spans.next();
            }
        }
        out
    }
}

/// Replace each span of `nodes` with a node labelled `label` holding the span's nodes.
/// `spans` must be sorted and non-overlapping.
pub(crate) fn chunk(nodes: Vec<Tree>, spans: &[Range<usize>], label: &str) -> Vec<Tree> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut spans = spans.iter().peekable();
    let mut pending = Vec::new();
    let mut chunk_end = None;

    for (i, node) in nodes.into_iter().enumerate() {
        if chunk_end.is_none() && spans.peek().is_some_and(|s| s.start == i) {
            chunk_end = spans.next().map(|s| s.end);
        }
        match chunk_end {
            Some(end) => {
                pending.push(node);
                if i + 1 == end {
                    out.push(Tree::node(label, std::mem::take(&mut pending)));
                    chunk_end = None;
                }
            }
            None => out.push(node),
        }
    }
    out
}

/// Readable form of a label string: tags separated by two spaces, chunks kept tight.
///
///     <T0><T1>{<T2><T3>}   =>   " <T0>  <T1> {<T2>  <T3>}"
pub fn spaced(label_string: &str) -> String {
    let mut padded = String::with_capacity(label_string.len() * 2);
    let mut chars = label_string.chars().peekable();
    while let Some(c) = chars.next() {
        padded.push(c);
        if c == '>' && chars.peek() != Some(&'}') {
            padded.push(' ');
        }
    }

    let mut out = String::with_capacity(padded.len() * 2);
    let mut previous = None;
    for c in padded.chars() {
        if c == '<' && previous.is_some_and(|p| p != '{') {
            out.push(' ');
        }
        out.push(c);
        previous = Some(c);
    }

    if out.starts_with('<') {
        out.insert(0, ' ');
    }
    out.truncate(out.trim_end().len());
    out
}
