//! Chunk parsing
//!
//!     The parser turns a labelled token sequence into a shallow tree:
//!
//!         1. Every token becomes a leaf; the leaves are the working sequence.
//!         2. Each grammar rule, in order, scans the current sequence left to right. Every
//!            leftmost, longest, non-overlapping match is replaced by a node labelled with the
//!            rule's label whose children are the matched nodes.
//!         3. The final sequence is wrapped in a root node (`ROOT` by default).
//!
//!     Later rules see the nodes built by earlier ones, so a rule like `PP: <P> <NP>` can group
//!     nodes produced by the `P` and `NP` rules above it. A rule never sees its own output: each
//!     rule runs once, there is no fixpoint iteration. [ParserBuilder::passes] repeats the whole
//!     grammar when a caller does want that.
//!
//!     Parsing cannot fail. Nodes that no rule matches stay at the top level, and every input
//!     token ends up as exactly one leaf of the result.

pub mod parse_string;

use crate::error::ParseConfigError;
use crate::grammar::{Grammar, ParseRule};
use crate::settings::ParserSettings;
use crate::token::Token;
use crate::trace::{emit, RuleApplied, TraceEvent, Tracer};
use crate::tree::Tree;
use parse_string::{chunk, ParseString};
use std::fmt;
use std::sync::Arc;

pub struct ParserBuilder {
    grammar: Grammar,
    root_label: String,
    passes: usize,
    tracer: Option<Arc<dyn Tracer>>,
}

impl ParserBuilder {
    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Run the whole grammar `passes` times. Zero is treated as one.
    pub fn passes(mut self, passes: usize) -> Self {
        self.passes = passes.max(1);
        self
    }

    pub fn tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn build(self) -> Parser {
        tracing::debug!(
            rules = self.grammar.len(),
            root = %self.root_label,
            passes = self.passes,
            "parser built"
        );
        Parser {
            grammar: self.grammar,
            root_label: self.root_label,
            passes: self.passes,
            tracer: self.tracer,
        }
    }
}

pub struct Parser {
    grammar: Grammar,
    root_label: String,
    passes: usize,
    tracer: Option<Arc<dyn Tracer>>,
}

impl Parser {
    pub const DEFAULT_ROOT_LABEL: &'static str = "ROOT";

    /// Build a parser from grammar text.
    pub fn new(grammar: &str) -> Result<Self, ParseConfigError> {
        Ok(Self::from_grammar(Grammar::parse(grammar)?))
    }

    pub fn from_grammar(grammar: Grammar) -> Self {
        Self::builder(grammar).build()
    }

    pub fn builder(grammar: Grammar) -> ParserBuilder {
        ParserBuilder {
            grammar,
            root_label: Self::DEFAULT_ROOT_LABEL.to_string(),
            passes: 1,
            tracer: None,
        }
    }

    /// Build a parser from grammar text, taking root label and passes from settings.
    pub fn from_settings(
        grammar: &str,
        settings: &ParserSettings,
    ) -> Result<Self, ParseConfigError> {
        Ok(Self::builder(Grammar::parse(grammar)?)
            .root_label(settings.root_label.clone())
            .passes(settings.passes)
            .build())
    }

    pub fn with_tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn rules(&self) -> &[ParseRule] {
        self.grammar.rules()
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Chunk a token sequence into a tree rooted at the root label.
    pub fn parse<I>(&self, tokens: I) -> Tree
    where
        I: IntoIterator<Item = Token>,
    {
        let nodes: Vec<Tree> = tokens.into_iter().map(Tree::Leaf).collect();
        if nodes.is_empty() {
            tracing::warn!("parsing an empty token sequence");
            return Tree::node(self.root_label.clone(), Vec::new());
        }
        Tree::node(self.root_label.clone(), self.parse_nodes(nodes))
    }

    /// Keep chunking the top-level children of an existing tree. The root label is kept; a
    /// bare leaf is treated as a one-token sequence.
    pub fn parse_tree(&self, tree: Tree) -> Tree {
        match tree {
            Tree::Node { label, children } => Tree::node(label, self.parse_nodes(children)),
            leaf @ Tree::Leaf(_) => {
                Tree::node(self.root_label.clone(), self.parse_nodes(vec![leaf]))
            }
        }
    }

    /// Run the grammar over a node sequence and return the resulting sequence.
    pub fn parse_nodes(&self, mut nodes: Vec<Tree>) -> Vec<Tree> {
        for _ in 0..self.passes {
            for (rule_index, rule) in self.grammar.iter().enumerate() {
                nodes = self.apply_rule(rule_index, rule, nodes);
            }
        }
        nodes
    }

    fn apply_rule(&self, rule_index: usize, rule: &ParseRule, nodes: Vec<Tree>) -> Vec<Tree> {
        let parse_string = ParseString::new(&nodes);
        let spans = rule.find_spans(&parse_string);
        if spans.is_empty() {
            return nodes;
        }

        if self.tracer.is_some() {
            let output = parse_string.bracketed(&spans);
            emit(
                self.tracer.as_ref(),
                TraceEvent::RuleApplied(RuleApplied {
                    rule_index,
                    rule,
                    input: parse_string.as_str(),
                    output: &output,
                    spans: &spans,
                }),
            );
        }

        chunk(nodes, &spans, rule.label())
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("rules", &self.grammar.len())
            .field("root_label", &self.root_label)
            .field("passes", &self.passes)
            .field("traced", &self.tracer.is_some())
            .finish()
    }
}

impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parser with {} rules:", self.grammar.len())?;
        for rule in &self.grammar {
            write!(f, "\n    {rule}")?;
        }
        Ok(())
    }
}
