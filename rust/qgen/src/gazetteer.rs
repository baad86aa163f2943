//! A list-based entity tagger.

use crate::capability::{EntityMap, EntityType, Span, Tagger};
use crate::error::QgenResult;

/// Tags token sequences found in its lists.
///
/// Matching is case-sensitive and prefers the longest entry starting at a
/// position. An entry listed under several types is tagged with each.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: Vec<(Vec<String>, EntityType)>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Gazetteer::default()
    }

    /// Add a whitespace-separated phrase under `entity`.
    pub fn register(&mut self, phrase: &str, entity: impl Into<EntityType>) {
        let words: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();
        if !words.is_empty() {
            self.entries.push((words, entity.into()));
        }
    }

    pub fn with(mut self, phrase: &str, entity: impl Into<EntityType>) -> Self {
        self.register(phrase, entity);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Tagger for Gazetteer {
    fn tag(&self, tokens: &[String]) -> QgenResult<EntityMap> {
        let mut map = EntityMap::new();
        let mut position = 0;
        while position < tokens.len() {
            let rest = &tokens[position..];
            let matching: Vec<&(Vec<String>, EntityType)> = self
                .entries
                .iter()
                .filter(|(words, _)| rest.starts_with(words))
                .collect();
            let Some(longest) = matching.iter().map(|(words, _)| words.len()).max() else {
                position += 1;
                continue;
            };
            let span = Span::new(position, position + longest);
            for (_, entity) in matching.iter().filter(|(words, _)| words.len() == longest) {
                let spans = map.entry(entity.clone()).or_default();
                if !spans.contains(&span) {
                    spans.push(span);
                }
            }
            position += longest;
        }
        Ok(map)
    }
}
