//! Property-based tests for the unparser
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use unparser::ast::{Child, Node, NodeType};
use unparser::emitter::{EmitConfig, emit_with_config};
use unparser::equivalence::{RubyParser, Verifier};
use unparser::{parser, preprocess, transquote};

// =============================================================================
// Quote transcoding
// =============================================================================

/// One unit of a literal body: a character as written, or a backslash escape.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(char),
    Escape(char),
}

/// Decode a body written between `delimiter`s into what it matches.
///
/// An escaped punctuation character matches itself, whichever delimiter was in use; other escapes (`\d`, `\n`)
/// keep their meaning and are compared as escapes.
fn decode(content: &str, delimiter: char) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let escaped = chars.next().expect("generated content has no dangling escape");
            if escaped.is_ascii_punctuation() {
                pieces.push(Piece::Literal(escaped));
            } else {
                pieces.push(Piece::Escape(escaped));
            }
        } else {
            assert_ne!(c, delimiter, "bare delimiter in {content:?}");
            pieces.push(Piece::Literal(c));
        }
    }
    pieces
}

const DELIMITERS: &[char] = &['/', '}', ')', ']', '>', '|', '!', '#', '"', '`'];

fn delimiter() -> impl Strategy<Value = char> {
    proptest::sample::select(DELIMITERS)
}

/// A body that is well-formed between `delimiter`s: no bare delimiter, no dangling escape.
fn body_for(delimiter: char) -> impl Strategy<Value = String> {
    let unit = prop_oneof![
        3 => proptest::char::ranges(vec!['a'..='z', '0'..='9'].into()).prop_map(|c| c.to_string()),
        2 => proptest::sample::select(vec!['/', '}', '{', ')', ']', '>', '|', '!', '#', '"', '`', '.', '*', ' '])
            .prop_map(|c| c.to_string()),
        2 => proptest::sample::select(vec!['d', 'n', 's', '/', '}', ')', '|', '\\', '.', '#'])
            .prop_map(|c| format!("\\{c}")),
    ];
    proptest::collection::vec(unit, 0..24)
        .prop_map(move |units| units.into_iter().filter(|u| u != &delimiter.to_string()).collect::<String>())
}

fn delimiters_and_body() -> impl Strategy<Value = (char, char, String)> {
    (delimiter(), delimiter()).prop_flat_map(|(from, to)| (Just(from), Just(to), body_for(from)))
}

proptest! {
    /// Property: re-quoting keeps the meaning of the body
    #[test]
    fn transquote_preserves_meaning((from, to, body) in delimiters_and_body()) {
        let requoted = transquote(&body, from, to).unwrap();
        prop_assert_eq!(decode(&body, from), decode(&requoted, to));
    }

    /// Property: re-quoting to the same delimiter is the identity
    #[test]
    fn transquote_to_same_delimiter_is_identity((from, _to, body) in delimiters_and_body()) {
        prop_assert_eq!(transquote(&body, from, from).unwrap(), body);
    }
}

// =============================================================================
// Literal fidelity
// =============================================================================

fn emit_canonical(node: &Node) -> String {
    emit_with_config(node, &EmitConfig::canonical()).expect("emit failed")
}

fn reparse(source: &str) -> Node {
    parser::parse(source)
        .unwrap_or_else(|errs| panic!("{source:?} does not parse: {errs:?}"))
        .expect("no statements")
}

fn literal(kind: NodeType, payload: Child) -> Node {
    Node::new(kind, vec![payload])
}

#[test]
fn literal_fidelity_examples() {
    let cases = [
        literal(NodeType::Int, Child::Int(42)),
        literal(NodeType::Str, Child::str("He said \"hi\"\\")),
        literal(NodeType::Float, Child::Float(0.1)),
    ];
    for node in cases {
        assert_eq!(reparse(&emit_canonical(&node)), node);
    }
    let Child::Float(value) = reparse(&emit_canonical(&literal(NodeType::Float, Child::Float(0.1)))).children()[0]
    else {
        panic!("expected a float payload");
    };
    assert_eq!(value.to_bits(), 0.1f64.to_bits());
}

proptest! {
    /// Property: every i64 survives emit and re-parse
    #[test]
    fn integers_round_trip(value in any::<i64>()) {
        let node = literal(NodeType::Int, Child::Int(value));
        prop_assert_eq!(reparse(&emit_canonical(&node)), node);
    }

    /// Property: every finite f64 survives emit and re-parse bit for bit
    #[test]
    fn floats_round_trip(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let node = literal(NodeType::Float, Child::Float(value));
        let reparsed = reparse(&emit_canonical(&node));
        let Child::Float(back) = reparsed.children()[0] else {
            panic!("expected a float payload, got {reparsed}");
        };
        // `-0.0` and `0.0` compare equal, but must not swap.
        prop_assert_eq!(back.to_bits(), value.to_bits());
    }

    /// Property: every string survives emit and re-parse
    #[test]
    fn strings_round_trip(value in any::<String>()) {
        let node = literal(NodeType::Str, Child::str(value));
        prop_assert_eq!(reparse(&emit_canonical(&node)), node);
    }

    /// Property: symbols survive emit and re-parse
    #[test]
    fn symbols_round_trip(name in "[a-z_][a-zA-Z0-9_ ]{0,12}") {
        let node = literal(NodeType::Sym, Child::sym(name));
        prop_assert_eq!(reparse(&emit_canonical(&node)), node);
    }
}

// =============================================================================
// Normalization
// =============================================================================

fn segment() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-c]{0,3}".prop_map(|s| literal(NodeType::Str, Child::str(s))),
        "@[a-c]".prop_map(|name| Node::new(
            NodeType::Begin,
            vec![Child::Node(literal(NodeType::Ivar, Child::sym(name)))]
        )),
    ]
}

fn dstr() -> impl Strategy<Value = Node> {
    proptest::collection::vec(segment(), 0..8)
        .prop_map(|segments| Node::new(NodeType::Dstr, segments.into_iter().map(Child::Node).collect()))
}

proptest! {
    /// Property: normalizing twice is the same as normalizing once
    #[test]
    fn preprocess_is_idempotent(node in dstr()) {
        let once = preprocess(&node).unwrap();
        prop_assert_eq!(preprocess(&once).unwrap(), once);
    }

    /// Property: a dynamic string of plain segments collapses to one `str`
    #[test]
    fn all_string_dstr_collapses(parts in proptest::collection::vec("[a-z]{0,4}", 0..6)) {
        let node = Node::new(
            NodeType::Dstr,
            parts.iter().map(|p| Child::Node(literal(NodeType::Str, Child::str(p.as_str())))).collect(),
        );
        prop_assert_eq!(preprocess(&node).unwrap(), literal(NodeType::Str, Child::str(parts.concat())));
    }

    /// Property: normalized dynamic strings emit to source that normalizes back to the same tree
    #[test]
    fn normalized_dstr_round_trips(node in dstr()) {
        let normalized = preprocess(&node).unwrap();
        let reparsed = preprocess(&reparse(&emit_canonical(&normalized))).unwrap();
        prop_assert_eq!(reparsed, normalized);
    }

    /// Property: a dynamic string emitted as generated re-parses to a tree that normalizes the same way
    #[test]
    fn dstr_round_trips_as_generated(node in dstr()) {
        let reparsed = reparse(&emit_canonical(&node));
        prop_assert_eq!(preprocess(&reparsed).unwrap(), preprocess(&node).unwrap());
    }
}

// =============================================================================
// Round trips from source
// =============================================================================

/// `%r` opening delimiters with their closing character; the brackets nest.
const PERCENT_R_DELIMITERS: &[(char, char)] = &[('|', '|'), ('!', '!'), ('~', '~'), ('/', '/'), ('{', '}'), ('(', ')')];

/// `%r` source whose body escapes its closing delimiter and may contain slashes and other escapes.
fn percent_r_source() -> impl Strategy<Value = String> {
    (proptest::sample::select(PERCENT_R_DELIMITERS), any::<bool>()).prop_flat_map(|((open, close), ignore_case)| {
        let unit = prop_oneof![
            3 => proptest::char::ranges(vec!['a'..='z'].into()).prop_map(|c| c.to_string()),
            2 => proptest::sample::select(vec!["/", ".", "*", "+", "-", "|", "!", "~"]).prop_map(str::to_string),
            2 => proptest::sample::select(vec![r"\d", r"\.", r"\/", r"\\"]).prop_map(str::to_string),
            2 => Just(format!("\\{close}")),
        ];
        proptest::collection::vec(unit, 1..12).prop_map(move |units| {
            let body: String = units.into_iter().filter(|u| u != &close.to_string()).collect();
            let options = if ignore_case { "i" } else { "" };
            format!("%r{open}{body}{close}{options}")
        })
    })
}

proptest! {
    /// Property: every `%r` pattern passes the round-trip check with the source `emit` writes for it
    #[test]
    fn percent_r_sources_round_trip(source in percent_r_source()) {
        let verifier = Verifier::new(RubyParser, EmitConfig::canonical());
        let tree = reparse(&source);
        let verdict = verifier.verify_node(Some(&tree)).unwrap();
        prop_assert!(verdict.is_equivalent(), "{}: {:?}", source, verdict);
        prop_assert_eq!(verdict.generated(), emit_canonical(&tree));
    }
}
