//! Tracing hooks
//!
//!     Lexers and parsers accept an optional [Tracer]. It observes the pipeline and never steers
//!     it: a tracer that panics or fails to write does not abort lexing or parsing.
//!
//!     There are two event kinds:
//!         - [LexAttempt]: one per rule tried on a word, plus one for the fallback when no rule
//!           matched. This is the fine grained, attempt-by-attempt log.
//!         - [RuleApplied]: one per grammar rule that matched at least once. Rules that did not
//!           match are not reported, so parse traces stay short.
//!
//!     Sinks provided here:
//!         - [LogTracer] forwards events to the `tracing` crate.
//!         - [WriterTracer] renders a human readable trace to any `io::Write`.
//!         - [RecordingTracer] keeps owned copies of events, mostly for tests.

use crate::grammar::ParseRule;
use crate::parsing::parse_string::spaced;
use std::io::Write;
use std::ops::Range;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

/// One rule tried against one word.
#[derive(Debug, Clone, Copy)]
pub struct LexAttempt<'a> {
    pub word_index: usize,
    pub word: &'a str,
    /// `None` when no rule matched and the fallback label was used
    pub rule_index: Option<usize>,
    pub label: &'a str,
    pub matched: bool,
}

/// A grammar rule that chunked part of the sequence.
#[derive(Debug, Clone, Copy)]
pub struct RuleApplied<'a> {
    pub rule_index: usize,
    pub rule: &'a ParseRule,
    /// Label string before the rule ran, e.g. `<DT><NN><VBD>`
    pub input: &'a str,
    /// Same string with braces around each chunk, e.g. `{<DT><NN>}<VBD>`
    pub output: &'a str,
    /// Node index ranges (in the input sequence) that were chunked
    pub spans: &'a [Range<usize>],
}

#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    LexAttempt(LexAttempt<'a>),
    RuleApplied(RuleApplied<'a>),
}

pub trait Tracer: Send + Sync {
    fn trace(&self, event: &TraceEvent<'_>);
}

/// Deliver an event, isolating the pipeline from tracer failures.
pub(crate) fn emit(tracer: Option<&Arc<dyn Tracer>>, event: TraceEvent<'_>) {
    if let Some(tracer) = tracer {
        if catch_unwind(AssertUnwindSafe(|| tracer.trace(&event))).is_err() {
            tracing::warn!("tracer panicked; event dropped");
        }
    }
}

/// Forwards events to `tracing`: lex attempts at TRACE, rule applications at DEBUG.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&self, event: &TraceEvent<'_>) {
        match event {
            TraceEvent::LexAttempt(a) => tracing::trace!(
                target: "chunklex::lex",
                word_index = a.word_index,
                word = a.word,
                rule_index = ?a.rule_index,
                label = a.label,
                matched = a.matched,
                "lex attempt"
            ),
            TraceEvent::RuleApplied(r) => tracing::debug!(
                target: "chunklex::parse",
                rule_index = r.rule_index,
                label = r.rule.label(),
                chunks = r.spans.len(),
                output = r.output,
                "rule applied"
            ),
        }
    }
}

/// Writes a readable trace. Write errors are ignored.
pub struct WriterTracer<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterTracer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer, e.g. to inspect a `Vec<u8>` buffer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn render(event: &TraceEvent<'_>) -> String {
        match event {
            TraceEvent::LexAttempt(a) => match a.rule_index {
                Some(index) => format!(
                    "# lex [{}] {:?}: rule {} {} -> {}\n",
                    a.word_index,
                    a.word,
                    index,
                    a.label,
                    if a.matched { "match" } else { "no match" }
                ),
                None => format!(
                    "# lex [{}] {:?}: no rule matched, fallback {}\n",
                    a.word_index, a.word, a.label
                ),
            },
            TraceEvent::RuleApplied(r) => {
                let header = r.rule.description().unwrap_or(r.rule.label());
                format!(
                    "# Input:\n{}\n# {}:\n{}\n",
                    spaced(r.input),
                    header,
                    spaced(r.output)
                )
            }
        }
    }
}

impl<W: Write + Send> Tracer for WriterTracer<W> {
    fn trace(&self, event: &TraceEvent<'_>) {
        let text = Self::render(event);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.write_all(text.as_bytes());
    }
}

/// Owned copy of a [TraceEvent].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceRecord {
    LexAttempt {
        word_index: usize,
        word: String,
        rule_index: Option<usize>,
        label: String,
        matched: bool,
    },
    RuleApplied {
        rule_index: usize,
        label: String,
        output: String,
        spans: Vec<Range<usize>>,
    },
}

/// Collects every event it sees.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    records: Mutex<Vec<TraceRecord>>,
}

impl RecordingTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TraceRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn rule_records(&self) -> Vec<TraceRecord> {
        self.records()
            .into_iter()
            .filter(|r| matches!(r, TraceRecord::RuleApplied { .. }))
            .collect()
    }

    pub fn lex_records(&self) -> Vec<TraceRecord> {
        self.records()
            .into_iter()
            .filter(|r| matches!(r, TraceRecord::LexAttempt { .. }))
            .collect()
    }
}

impl Tracer for RecordingTracer {
    fn trace(&self, event: &TraceEvent<'_>) {
        let record = match event {
            TraceEvent::LexAttempt(a) => TraceRecord::LexAttempt {
                word_index: a.word_index,
                word: a.word.to_string(),
                rule_index: a.rule_index,
                label: a.label.to_string(),
                matched: a.matched,
            },
            TraceEvent::RuleApplied(r) => TraceRecord::RuleApplied {
                rule_index: r.rule_index,
                label: r.rule.label().to_string(),
                output: r.output.to_string(),
                spans: r.spans.to_vec(),
            },
        };
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}
