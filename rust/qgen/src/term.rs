//! Terms: token spans carrying named-entity types.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::capability::{EntityMap, EntityType, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// Tagged with at least one entity type.
    Entity,
    /// A single untagged token.
    Function,
}

/// A contiguous run of tokens and the entity types it was tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub span: Span,
    pub words: Vec<String>,
    pub entities: Vec<EntityType>,
}

impl Term {
    pub fn kind(&self) -> TermKind {
        if self.entities.is_empty() {
            TermKind::Function
        } else {
            TermKind::Entity
        }
    }

    pub fn is_entity(&self) -> bool {
        self.kind() == TermKind::Entity
    }

    /// The words separated by spaces: `Al Gore`.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// The words run together: `AlGore`. Trees and taggers tokenize
    /// differently, so terms are compared with tree text this way.
    pub fn tight(&self) -> String {
        self.words.concat()
    }

    /// Whether the term covers the token at `position` (0-based).
    pub fn covers(&self, position: usize) -> bool {
        self.span.contains(position)
    }
}

/// Turns tagger output into terms anchored to the sentence's tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermExtractor;

impl TermExtractor {
    pub fn new() -> Self {
        TermExtractor
    }

    /// One entity term per distinct tagged span, carrying every type it was
    /// tagged with, plus one function term per token no entity covers.
    /// Terms come out ordered by span.
    pub fn extract(&self, tokens: &[String], entities: &EntityMap) -> Vec<Term> {
        let mut tagged: BTreeMap<Span, Vec<EntityType>> = BTreeMap::new();
        for (entity, spans) in entities {
            for span in spans {
                if span.is_empty() || span.end > tokens.len() {
                    warn!(%entity, ?span, tokens = tokens.len(), "entity span outside sentence");
                    continue;
                }
                let types = tagged.entry(*span).or_default();
                if !types.contains(entity) {
                    types.push(entity.clone());
                }
            }
        }

        let covered = |position: usize| tagged.keys().any(|span| span.contains(position));
        let function = (0..tokens.len())
            .filter(|position| !covered(*position))
            .map(|position| (Span::new(position, position + 1), Vec::new()))
            .collect::<Vec<_>>();

        let mut terms: Vec<Term> = tagged
            .into_iter()
            .chain(function)
            .map(|(span, entities)| Term {
                span,
                words: tokens[span.start..span.end].to_vec(),
                entities,
            })
            .collect();
        terms.sort_by_key(|term| term.span);
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn entity_and_function_terms() {
        let tokens = tokens("Al Gore was born in Washington .");
        let mut entities = EntityMap::new();
        entities.insert(EntityType::new("NEperson"), vec![Span::new(0, 2), Span::new(5, 6)]);
        entities.insert(EntityType::new("location"), vec![Span::new(5, 6)]);

        let terms = TermExtractor::new().extract(&tokens, &entities);
        let summary: Vec<(String, Vec<&str>)> = terms
            .iter()
            .map(|term| (term.text(), term.entities.iter().map(EntityType::as_str).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Al Gore".to_string(), vec!["person"]),
                ("was".to_string(), vec![]),
                ("born".to_string(), vec![]),
                ("in".to_string(), vec![]),
                ("Washington".to_string(), vec!["person", "location"]),
                (".".to_string(), vec![]),
            ]
        );
        assert_eq!(terms[0].tight(), "AlGore");
        assert!(terms[0].covers(1));
    }

    #[test]
    fn spans_past_the_sentence_are_ignored() {
        let tokens = tokens("John went");
        let mut entities = EntityMap::new();
        entities.insert(EntityType::new("person"), vec![Span::new(1, 5)]);
        let terms = TermExtractor::new().extract(&tokens, &entities);
        assert_eq!(terms.len(), 2);
        assert!(terms.iter().all(|term| !term.is_entity()));
    }
}
