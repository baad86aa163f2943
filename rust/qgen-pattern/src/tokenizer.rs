//! Tokenizer for the textual pattern syntax.
//!
//! Token types:
//! - **Word**: a category, a word, or a name (`NP`, `PRP$`, `n't`, `unmv`)
//! - **Regex**: a slash-delimited expression (`/^VB/`)
//! - **Relation**: an operator such as `<`, `>>`, `$..`, `<2`
//! - **Not** / **Maybe**: `!` and `?` before a relation
//! - **Equals**: `=` before a name
//! - **Bar**: `|` between label alternatives or constraint groups
//! - **Open** / **Close**: `(` and `)`
//! - **BeginGroup** / **EndGroup**: `[` and `]`

use std::fmt;

use crate::error::PatternError;
use crate::pattern::RelationKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Word(String),
    Regex(String),
    Relation(RelationKind),
    Not,
    Maybe,
    Equals,
    Bar,
    Open,
    Close,
    BeginGroup,
    EndGroup,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "{word}"),
            Token::Regex(regex) => write!(f, "/{regex}/"),
            Token::Relation(kind) => write!(f, "{kind}"),
            Token::Not => f.write_str("!"),
            Token::Maybe => f.write_str("?"),
            Token::Equals => f.write_str("="),
            Token::Bar => f.write_str("|"),
            Token::Open => f.write_str("("),
            Token::Close => f.write_str(")"),
            Token::BeginGroup => f.write_str("["),
            Token::EndGroup => f.write_str("]"),
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '_' | '\'' | '*' | ':' | '`')
}

/// Read a relation operator starting at `chars[i]`. Returns the operator
/// and the number of characters it spans.
fn relation(chars: &[char], i: usize) -> Option<(RelationKind, usize)> {
    let at = |offset: usize| chars.get(i + offset).copied();
    let digits = |from: usize| -> Option<(i32, usize)> {
        let mut end = from;
        while at(end).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
        }
        let text: String = chars.get(i + from..i + end)?.iter().collect();
        text.parse().ok().map(|n| (n, end))
    };

    Some(match (at(0)?, at(1), at(2)) {
        ('<', Some('<'), _) => (RelationKind::Dominates, 2),
        ('>', Some('>'), _) => (RelationKind::DominatedBy, 2),
        ('<', Some(','), _) => (RelationKind::HasNthChild(1), 2),
        ('<', Some('-'), _) => (RelationKind::HasNthChild(-1), 2),
        ('<', Some(':'), _) => (RelationKind::HasOnlyChild, 2),
        ('>', Some(','), _) => (RelationKind::NthChildOf(1), 2),
        ('>', Some('-'), _) => (RelationKind::NthChildOf(-1), 2),
        ('<', Some(d), _) if d.is_ascii_digit() => {
            let (n, len) = digits(1)?;
            (RelationKind::HasNthChild(n), len)
        }
        ('>', Some(d), _) if d.is_ascii_digit() => {
            let (n, len) = digits(1)?;
            (RelationKind::NthChildOf(n), len)
        }
        ('<', _, _) => (RelationKind::ParentOf, 1),
        ('>', _, _) => (RelationKind::ChildOf, 1),
        ('$', Some('+'), Some('+')) | ('$', Some('.'), Some('.')) => (RelationKind::LeftSisterOf, 3),
        ('$', Some('-'), Some('-')) | ('$', Some(','), Some(',')) => (RelationKind::RightSisterOf, 3),
        ('$', Some('+'), _) | ('$', Some('.'), _) => (RelationKind::ImmediateLeftSisterOf, 2),
        ('$', Some('-'), _) | ('$', Some(','), _) => (RelationKind::ImmediateRightSisterOf, 2),
        ('$', _, _) => (RelationKind::SisterOf, 1),
        ('.', Some('.'), _) => (RelationKind::Precedes, 2),
        ('.', _, _) => (RelationKind::ImmediatelyPrecedes, 1),
        (',', Some(','), _) => (RelationKind::Follows, 2),
        (',', _, _) => (RelationKind::ImmediatelyFollows, 1),
        _ => return None,
    })
}

/// Tokenize one pattern. Each token is paired with its character offset.
pub fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, PatternError> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < len {
        let ch = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        let single = match ch {
            '!' => Some(Token::Not),
            '?' => Some(Token::Maybe),
            '=' => Some(Token::Equals),
            '|' => Some(Token::Bar),
            '(' => Some(Token::Open),
            ')' => Some(Token::Close),
            '[' => Some(Token::BeginGroup),
            ']' => Some(Token::EndGroup),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push((token, i));
            i += 1;
            continue;
        }

        // `/regex/`, with `\/` for a literal slash
        if ch == '/' {
            let start = i;
            i += 1;
            let mut body = String::new();
            loop {
                match chars.get(i) {
                    None => return Err(PatternError::UnterminatedRegex { offset: start }),
                    Some('/') => break,
                    Some('\\') if chars.get(i + 1) == Some(&'/') => {
                        body.push('/');
                        i += 2;
                    }
                    Some(c) => {
                        body.push(*c);
                        i += 1;
                    }
                }
            }
            i += 1;
            tokens.push((Token::Regex(body), start));
            continue;
        }

        if is_word_char(ch) {
            let start = i;
            while i < len && (is_word_char(chars[i]) || (chars[i] == '$' && i > start)) {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            tokens.push((Token::Word(word), start));
            continue;
        }

        if let Some((kind, width)) = relation(&chars, i) {
            tokens.push((Token::Relation(kind), i));
            i += width;
            continue;
        }

        return Err(PatternError::UnexpectedChar { ch, offset: i });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|(token, _)| token).collect()
    }

    #[test]
    fn words_names_and_relations() {
        assert_eq!(
            kinds("NP=noun !>> PP ?< DT=det"),
            vec![
                Token::Word("NP".into()),
                Token::Equals,
                Token::Word("noun".into()),
                Token::Not,
                Token::Relation(RelationKind::DominatedBy),
                Token::Word("PP".into()),
                Token::Maybe,
                Token::Relation(RelationKind::ParentOf),
                Token::Word("DT".into()),
                Token::Equals,
                Token::Word("det".into()),
            ]
        );
    }

    #[test]
    fn sister_and_precedence_operators() {
        assert_eq!(
            kinds("__ $.. A $,, B $. C $, D $++ E $-- F .. G , H <2 I >- J"),
            vec![
                Token::Word("__".into()),
                Token::Relation(RelationKind::LeftSisterOf),
                Token::Word("A".into()),
                Token::Relation(RelationKind::RightSisterOf),
                Token::Word("B".into()),
                Token::Relation(RelationKind::ImmediateLeftSisterOf),
                Token::Word("C".into()),
                Token::Relation(RelationKind::ImmediateRightSisterOf),
                Token::Word("D".into()),
                Token::Relation(RelationKind::LeftSisterOf),
                Token::Word("E".into()),
                Token::Relation(RelationKind::RightSisterOf),
                Token::Word("F".into()),
                Token::Relation(RelationKind::Precedes),
                Token::Word("G".into()),
                Token::Relation(RelationKind::ImmediatelyFollows),
                Token::Word("H".into()),
                Token::Relation(RelationKind::HasNthChild(2)),
                Token::Word("I".into()),
                Token::Relation(RelationKind::NthChildOf(-1)),
                Token::Word("J".into()),
            ]
        );
    }

    #[test]
    fn regexes_and_dollar_words() {
        assert_eq!(
            kinds(r"/^WH.*P$/ < PRP$ < /a\/b/"),
            vec![
                Token::Regex("^WH.*P$".into()),
                Token::Relation(RelationKind::ParentOf),
                Token::Word("PRP$".into()),
                Token::Relation(RelationKind::ParentOf),
                Token::Regex("a/b".into()),
            ]
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(tokenize("NP < /VB"), Err(PatternError::UnterminatedRegex { offset: 5 }));
        assert_eq!(tokenize("NP ; VP"), Err(PatternError::UnexpectedChar { ch: ';', offset: 3 }));
    }
}
