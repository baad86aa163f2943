//! Leaves and node labels.

use std::fmt;

/// A leaf of a constituency tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The word as written, with parentheses escaped as `-LRB-`/`-RRB-`.
    pub text: String,
    /// Position assigned when the sentence was parsed. Leaves introduced by
    /// a transformation have none.
    pub index: Option<usize>,
}

impl Token {
    pub fn indexed(text: impl Into<String>, index: usize) -> Self {
        Token {
            text: text.into(),
            index: Some(index),
        }
    }

    pub fn synthetic(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            index: None,
        }
    }

    /// Split a `word-N` leaf into its text and index. Leaves without a
    /// numeric suffix become synthetic tokens.
    pub fn from_indexed(raw: &str) -> Self {
        if let Some((text, suffix)) = raw.rsplit_once('-') {
            if !text.is_empty() && !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(index) = suffix.parse() {
                    return Token::indexed(text, index);
                }
            }
        }
        Token::synthetic(raw)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}-{index}", self.text),
            None => write!(f, "{}", self.text),
        }
    }
}

/// A structural tag carried by a phrase label in addition to its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    /// The constituent may not be fronted as a question focus.
    Unmovable,
    /// The verb acts as the clause's auxiliary.
    Auxiliary,
}

impl Mark {
    pub const ALL: [Mark; 2] = [Mark::Unmovable, Mark::Auxiliary];

    /// The prefix used when the label is written out.
    pub fn prefix(self) -> &'static str {
        match self {
            Mark::Unmovable => "UNMV-",
            Mark::Auxiliary => "AUX-",
        }
    }
}

/// The label of a phrase node: a syntactic category plus marks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    pub category: String,
    /// Marks in the order they were applied. The most recent is written
    /// outermost.
    marks: Vec<Mark>,
}

impl Label {
    pub fn new(category: impl Into<String>) -> Self {
        Label {
            category: category.into(),
            marks: Vec::new(),
        }
    }

    /// Read a written label, peeling off mark prefixes.
    ///
    /// `UNMV-NP` becomes category `NP` with [`Mark::Unmovable`]. Labels such
    /// as `-LRB-` or `Q-AUX` are left whole.
    pub fn parse(raw: &str) -> Self {
        let mut rest = raw;
        let mut marks = Vec::new();
        'peel: loop {
            for mark in Mark::ALL {
                if let Some(stripped) = rest.strip_prefix(mark.prefix()) {
                    if !stripped.is_empty() {
                        marks.push(mark);
                        rest = stripped;
                        continue 'peel;
                    }
                }
            }
            break;
        }
        marks.reverse();
        Label {
            category: rest.to_string(),
            marks,
        }
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        self.marks.contains(&mark)
    }

    /// A copy of this label with `mark` applied. Applying a mark twice has
    /// no further effect.
    pub fn with_mark(&self, mark: Mark) -> Self {
        let mut label = self.clone();
        if !label.marks.contains(&mark) {
            label.marks.push(mark);
        }
        label
    }

    pub fn with_category(&self, category: impl Into<String>) -> Self {
        Label {
            category: category.into(),
            marks: self.marks.clone(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.marks.iter().rev() {
            f.write_str(mark.prefix())?;
        }
        f.write_str(&self.category)
    }
}
