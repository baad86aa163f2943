//! Turning tree words back into readable text.

use qgen_tree::restore_brackets;

/// Tokens written without a space before them.
fn attaches_left(word: &str) -> bool {
    matches!(word, "." | "," | ":" | ";" | "!" | "?" | ")" | "]" | "}" | "%" | "''" | "n't")
        || (word.starts_with('\'') && word.len() > 1 && word != "''")
}

/// Tokens written without a space after them.
fn attaches_right(word: &str) -> bool {
    matches!(word, "(" | "[" | "{" | "$" | "``" | "#")
}

/// Join words the way they are written: `John 's car .` becomes
/// `John's car.`, and bracket escapes become brackets again.
pub fn detokenize<S: AsRef<str>>(words: &[S]) -> String {
    let mut text = String::new();
    let mut glue = true;
    for word in words {
        let word = restore_brackets(word.as_ref());
        if word.is_empty() {
            continue;
        }
        if !glue && !attaches_left(&word) {
            text.push(' ');
        }
        glue = attaches_right(&word);
        text.push_str(&word);
    }
    text
}

/// Uppercase the first letter, skipping leading punctuation. Text that
/// starts with a digit is left alone.
pub fn capitalize(text: &str) -> String {
    match text.char_indices().find(|(_, c)| c.is_alphanumeric()) {
        Some((at, first)) if first.is_alphabetic() => {
            let rest = &text[at + first.len_utf8()..];
            format!("{}{}{rest}", &text[..at], first.to_uppercase())
        }
        _ => text.to_string(),
    }
}

/// A standalone sentence: detokenized, capitalized and ending in
/// sentence punctuation.
pub fn sentence<S: AsRef<str>>(words: &[S]) -> String {
    let mut text = capitalize(&detokenize(words));
    if !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}
