//! Grammar text parsing

use chunklex::error::{GrammarErrorKind, ParseConfigError, RuleError};
use chunklex::grammar::label_pattern::label_pattern_to_regex;
use chunklex::{parse_grammar, Grammar, Parser};
use rstest::rstest;

#[test]
fn test_line_without_colon_is_rejected() {
    let grammar = "
        NP: {<DT>?<NN>}
        BAD RULE WITHOUT COLON
    ";
    let err = parse_grammar(grammar).unwrap_err();
    assert_eq!(err.line_number, 3);
    assert_eq!(err.line.trim(), "BAD RULE WITHOUT COLON");
    assert!(matches!(err.kind, GrammarErrorKind::MissingSeparator));
}

#[test]
fn test_adjacent_chunk_braces_are_rejected() {
    let err = Parser::new("X: {<foo>} {<bar>}").unwrap_err();
    let ParseConfigError::Grammar(err) = err;
    assert!(matches!(
        err.kind,
        GrammarErrorKind::Rule(RuleError::BadPattern(_))
    ));
}

#[rstest]
#[case::bad_label("NOUN PHRASE: <NN>")]
#[case::digit_first("1NP: <NN>")]
#[case::empty_pattern("NP: {}")]
#[case::blank_pattern("NP:   # nothing")]
#[case::unbalanced("NP: <NN")]
#[case::nested("NP: <<NN>>")]
#[case::regex("NP: <NN>(")]
fn test_invalid_rules(#[case] line: &str) {
    let err = parse_grammar(line).unwrap_err();
    assert_eq!(err.line_number, 1);
    assert_eq!(err.line, line);
    assert!(matches!(err.kind, GrammarErrorKind::Rule(_)), "{err}");
}

#[test]
fn test_comments_and_blank_lines_are_skipped() {
    let grammar = "
        # noun phrases first

        NP: <DT>?<NN>
           # then prepositions
        P: <IN>
    ";
    let rules = parse_grammar(grammar).unwrap();
    let labels: Vec<_> = rules.iter().map(|r| r.label()).collect();
    assert_eq!(labels, vec!["NP", "P"]);
}

#[test]
fn test_descriptions() {
    let rules = parse_grammar(
        "NP: <DT>?<NN>   #  noun phrase  \nP: <IN>\nHASH: <A\\#B> # escaped hash",
    )
    .unwrap();
    assert_eq!(rules[0].description(), Some("noun phrase"));
    assert_eq!(rules[1].description(), None);
    assert_eq!(rules[2].pattern(), "<A\\#B>");
    assert_eq!(rules[2].description(), Some("escaped hash"));
}

#[test]
fn test_braces_are_optional() {
    let braced = Grammar::parse("AG: {<A>+}").unwrap();
    let bare = Grammar::parse("AG: <A>+").unwrap();
    assert_eq!(braced.rules()[0].pattern(), bare.rules()[0].pattern());
    assert_eq!(
        braced.rules()[0].regex().as_str(),
        bare.rules()[0].regex().as_str()
    );
}

#[test]
fn test_label_pattern_translation() {
    assert_eq!(
        label_pattern_to_regex("<DT>? <JJ>* <NN.*>").unwrap(),
        "(?:<(?:DT)>)?(?:<(?:JJ)>)*(?:<(?:NN[^{}<>]*)>)"
    );
    assert_eq!(
        label_pattern_to_regex("<V> <NP|PP>*").unwrap(),
        "(?:<(?:V)>)(?:<(?:NP|PP)>)*"
    );
}

#[test]
fn test_grammar_renders_as_text() {
    let grammar: Grammar = "NP: <DT>? <NN> # noun phrase\nP: {<IN>}".parse().unwrap();
    assert_eq!(grammar.to_string(), "NP: {<DT>? <NN>} # noun phrase\nP: {<IN>}\n");
    assert_eq!(grammar.len(), 2);
    assert!(!grammar.is_empty());
    assert!(Grammar::parse("\n# only comments\n").unwrap().is_empty());
}
