use std::collections::HashMap;

use unparser_core::lang::{keywords, node_types, operators, punctuation};
use unparser_core::strings;

#[test]
fn node_type_tags_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, node_types::NodeType> = HashMap::new();

    for info in node_types::NODE_TYPES {
        assert_eq!(
            node_types::from_str(info.tag),
            Some(info.id),
            "node type tag not resolvable: {}",
            info.tag
        );
        assert_eq!(
            node_types::as_str(info.id),
            info.tag,
            "node type as_str mismatch for {:?}",
            info.id
        );
        if let Some(prev) = seen.insert(info.tag, info.id) {
            panic!("duplicate node type tag {:?}: {:?} and {:?}", info.tag, prev, info.id);
        }
    }
}

#[test]
fn node_type_examples_mention_their_tag() {
    for info in node_types::NODE_TYPES {
        let needle = format!("({}", info.tag);
        assert!(
            info.example.sexp.contains(&needle),
            "example for {:?} does not contain a `{}` node: {}",
            info.id,
            info.tag,
            info.example.sexp
        );
        assert!(!info.example.source.is_empty(), "empty example for {:?}", info.id);
    }
}

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            keywords::as_str(info.id),
            info.canonical,
            "keyword as_str mismatch for {:?}",
            info.id
        );
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, punctuation::PunctuationId> = HashMap::new();

    for info in punctuation::PUNCTUATION {
        assert_eq!(
            punctuation::from_str(info.canonical),
            Some(info.id),
            "punctuation spelling not resolvable: {}",
            info.canonical
        );
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate punctuation spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn operator_methods_unique_and_symbol_safe() {
    let mut seen = HashMap::new();
    for info in operators::OPERATOR_METHODS {
        if seen.insert(info.spelling, info.arity).is_some() {
            panic!("duplicate operator method {:?}", info.spelling);
        }
        assert!(
            strings::is_simple_symbol(info.spelling),
            "operator {:?} must be writable as a bare symbol",
            info.spelling
        );
        assert_eq!(operators::longest_prefix(info.spelling), Some(info.spelling));
    }
}

#[test]
fn keywords_are_never_local_names() {
    for info in keywords::KEYWORDS {
        assert!(
            !strings::is_local_name(info.canonical),
            "keyword {:?} would lex as a local variable",
            info.canonical
        );
    }
}
