//! The collaborators the pipeline depends on but does not implement.
//!
//! Sentence splitting and constituency parsing come from a [`Parser`],
//! named entities from a [`Tagger`], and verb lemmas from a [`Lexicon`].
//! All three are shared read-only between batch workers, hence the
//! `Send + Sync` bounds.

use std::fmt;

use indexmap::IndexMap;
use qgen_tree::Tree;
use serde::{Deserialize, Serialize};

use crate::error::QgenResult;

/// Splits text into sentences and parses each into a constituency tree.
pub trait Parser: Send + Sync {
    /// Sentence boundaries of a paragraph.
    fn split(&self, text: &str) -> Vec<String>;

    /// A tree whose leaves are indexed 1..n left to right.
    fn parse(&self, sentence: &str) -> QgenResult<Tree>;

    /// The inverse of [`Parser::parse`]: the words of a tree as text.
    fn render_surface(&self, tree: &Tree) -> String {
        tree.render()
    }
}

/// Finds named entities in a tokenized sentence.
pub trait Tagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> QgenResult<EntityMap>;
}

/// Lexical lookup.
pub trait Lexicon: Send + Sync {
    /// The base form of `word` read as `pos`, if the lexicon knows it.
    fn lemma(&self, word: &str, pos: PartOfSpeech) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

/// A named-entity type such as `person` or `location`.
///
/// Taggers commonly prefix their types with `NE` (`NElocation`); the prefix
/// is dropped so both spellings name the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        let name = match name.strip_prefix("NE") {
            Some(rest) if !rest.is_empty() => rest,
            _ => name,
        };
        EntityType(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type given to noun phrases that no tagger recognized.
    pub fn generic() -> Self {
        EntityType("np".to_string())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        EntityType::new(name)
    }
}

/// A half-open range of token positions, counted from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, position: usize) -> bool {
        (self.start..self.end).contains(&position)
    }
}

/// Entity spans grouped by type, in the order the tagger reported them.
pub type EntityMap = IndexMap<EntityType, Vec<Span>>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn entity_types_drop_the_ne_prefix() {
        assert_eq!(EntityType::new("NElocation"), EntityType::new("location"));
        assert_eq!(EntityType::new("NE").as_str(), "NE");
        assert_eq!(EntityType::from(" person ").to_string(), "person");
    }

    #[test]
    fn spans_are_half_open() {
        let span = Span::new(2, 4);
        assert_eq!(span.len(), 2);
        assert!(span.contains(3));
        assert!(!span.contains(4));
        assert!(Span::new(3, 3).is_empty());
    }
}
