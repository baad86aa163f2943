//! Rendering helpers for indexed sentence strings.

use std::sync::LazyLock;

use regex::Regex;

static LEAF_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d+\b").expect("leaf index pattern is valid"));

const BRACKET_ESCAPES: [(&str, &str); 6] = [
    ("-LRB-", "("),
    ("-RRB-", ")"),
    ("-LSB-", "["),
    ("-RSB-", "]"),
    ("-LCB-", "{"),
    ("-RCB-", "}"),
];

/// Remove every `-N` leaf index suffix from `text`.
pub fn strip_indices(text: &str) -> String {
    LEAF_INDEX.replace_all(text, "").into_owned()
}

/// Replace bracket escapes with the brackets they stand for.
pub fn restore_brackets(text: &str) -> String {
    BRACKET_ESCAPES
        .iter()
        .fold(text.to_string(), |acc, (escape, bracket)| acc.replace(escape, bracket))
}

/// The escaped spelling of a bracket word, or the word itself.
pub fn escape_bracket(word: &str) -> &str {
    BRACKET_ESCAPES
        .iter()
        .find(|(_, bracket)| *bracket == word)
        .map(|(escape, _)| *escape)
        .unwrap_or(word)
}
