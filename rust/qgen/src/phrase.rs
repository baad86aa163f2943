//! Answer phrase extraction.
//!
//! Candidate answers are found in three passes over the unmovable-marked
//! tree:
//!
//! 1. noun phrases outside any prepositional phrase whose text, or whose
//!    head's text, is an entity term (a leading determiner may be ignored);
//! 2. the remaining outermost noun phrases, asked about with a generic
//!    `what`;
//! 3. prepositional phrases whose object is an entity term, asked about
//!    both with and without the preposition.
//!
//! Each sentence also gets one yes/no candidate. Anything marked unmovable,
//! inside something marked unmovable, or containing a pronoun is skipped.

use std::collections::HashSet;

use qgen_pattern::Pattern;
use qgen_tree::{HeadFinder, Mark, NodeId, Tree};
use tracing::debug;

use crate::answer::{QaPhrasePair, TreeAnswer};
use crate::capability::{EntityType, Span};
use crate::config::UnmappedEntities;
use crate::error::QgenResult;
use crate::question::{self, QuestionType};
use crate::term::Term;

const NOUN_PHRASE: &str = "NP=np !>> PP ?< DT=det";
const OUTER_NOUN_PHRASE: &str = "NP=np !>> NP";
const PREPOSITIONAL_PHRASE: &str = "PP=pp < IN|TO=in < (NP=np ?< DT=det)";
const NEGATED_VERB: &str = r"ROOT < (S < (VP < /^(VB.?|MD)$/ < (RB < not|n't)))";
const SUBJECT: &str = "ROOT < (S < (NP=subject $.. VP))";

pub struct AnswerPhraseExtractor {
    unmapped: UnmappedEntities,
    noun_phrase: Pattern,
    outer_noun_phrase: Pattern,
    prepositional_phrase: Pattern,
    negated_verb: Pattern,
    subject: Pattern,
    heads: HeadFinder,
}

impl AnswerPhraseExtractor {
    pub fn new(unmapped: UnmappedEntities) -> QgenResult<Self> {
        Ok(AnswerPhraseExtractor {
            unmapped,
            noun_phrase: Pattern::parse(NOUN_PHRASE)?,
            outer_noun_phrase: Pattern::parse(OUTER_NOUN_PHRASE)?,
            prepositional_phrase: Pattern::parse(PREPOSITIONAL_PHRASE)?,
            negated_verb: Pattern::parse(NEGATED_VERB)?,
            subject: Pattern::parse(SUBJECT)?,
            heads: HeadFinder::new(),
        })
    }

    /// All candidates for one sentence, duplicates removed, the yes/no
    /// candidate last.
    pub fn extract(&self, answer: &TreeAnswer) -> Vec<QaPhrasePair> {
        let Some(tree) = answer.unmovable_tree.as_ref().or(answer.tree.as_ref()) else {
            return Vec::new();
        };
        let entities: Vec<&Term> = answer.terms.iter().filter(|term| term.is_entity()).collect();

        let mut found = Vec::new();
        let mut used = HashSet::new();

        for hit in self.noun_phrase.matches(tree) {
            let Some(np) = hit.get("np") else { continue };
            if blocked(tree, np) {
                continue;
            }
            for term in self.aligned(tree, np, hit.get("det"), &entities) {
                used.insert(np);
                let text = tree.indexed_text(np);
                self.classify(term, |entity, question_type, phrase| {
                    found.push(QaPhrasePair {
                        question_type,
                        question_phrase: phrase.to_string(),
                        answer: text.clone(),
                        preposition: None,
                        answer_tree: Some(tree.subtree(np)),
                        term: Some(narrowed(term, entity)),
                        question: None,
                    });
                });
            }
        }

        for hit in self.outer_noun_phrase.matches(tree) {
            let Some(np) = hit.get("np") else { continue };
            let words = tree.tight_text(np);
            if used.contains(&np)
                || blocked(tree, np)
                || entities.iter().any(|term| term.tight() == words)
            {
                continue;
            }
            let term = generic_term(tree, np);
            let text = tree.indexed_text(np);
            self.classify(&term, |entity, question_type, phrase| {
                found.push(QaPhrasePair {
                    question_type,
                    question_phrase: phrase.to_string(),
                    answer: text.clone(),
                    preposition: None,
                    answer_tree: Some(tree.subtree(np)),
                    term: Some(narrowed(&term, entity)),
                    question: None,
                });
            });
        }

        for hit in self.prepositional_phrase.matches(tree) {
            let (Some(pp), Some(preposition), Some(np)) = (hit.get("pp"), hit.get("in"), hit.get("np")) else {
                continue;
            };
            if blocked(tree, pp) {
                continue;
            }
            let word = tree.plain_text(preposition);
            let text = format!("{} {}", tree.indexed_text(preposition), tree.indexed_text(np));
            for term in self.aligned(tree, np, hit.get("det"), &entities) {
                self.classify(term, |entity, question_type, phrase| {
                    for phrase in [phrase.to_string(), question::with_preposition(&word, phrase)] {
                        found.push(QaPhrasePair {
                            question_type,
                            question_phrase: phrase,
                            answer: text.clone(),
                            preposition: Some(word.clone()),
                            answer_tree: Some(tree.subtree(pp)),
                            term: Some(narrowed(term, entity)),
                            question: None,
                        });
                    }
                });
            }
        }

        if let Some(base) = answer.tree.as_ref() {
            let reply = if self.negated_verb.is_match(base) { "no" } else { "yes" };
            found.push(QaPhrasePair::yes_no(reply));
        }

        let mut candidates: Vec<QaPhrasePair> = Vec::with_capacity(found.len());
        for pair in found {
            if !candidates.iter().any(|kept| kept.same_candidate(&pair)) {
                candidates.push(pair);
            }
        }
        debug!(sentence = %answer.sentence, count = candidates.len(), "answer candidates");
        candidates
    }

    /// The indexed head word of the main clause's subject: `Gore-2`.
    pub fn subject(&self, tree: &Tree) -> Option<String> {
        let subject = self.subject.find(tree)?.get("subject")?;
        let head = self.heads.head_terminal(tree, subject)?;
        Some(tree.indexed_text(head))
    }

    /// Entity terms spelled like `np`, `np` without its determiner, or the
    /// head of `np`.
    fn aligned<'t>(&self, tree: &Tree, np: NodeId, det: Option<NodeId>, entities: &[&'t Term]) -> Vec<&'t Term> {
        let words = tree.tight_text(np);
        let det = det.map(|det| tree.tight_text(det)).unwrap_or_default();
        let head = self.heads.head_child(tree, np).unwrap_or(np);
        let head_words = tree.tight_text(head);

        entities
            .iter()
            .copied()
            .filter(|term| {
                let tight = term.tight();
                let with_det = format!("{det}{tight}");
                tight == words || with_det == words || tight == head_words || with_det == head_words
            })
            .collect()
    }

    /// Calls `emit` once per entity type of `term` that yields a question.
    fn classify(&self, term: &Term, mut emit: impl FnMut(&EntityType, QuestionType, &str)) {
        for entity in &term.entities {
            match question::classify(entity) {
                Some((question_type, phrase)) => emit(entity, question_type, phrase),
                None => match self.unmapped {
                    UnmappedEntities::Drop => {
                        debug!(%entity, term = %term.text(), "no question for entity type");
                    }
                    UnmappedEntities::Generic => emit(entity, QuestionType::What, "what"),
                },
            }
        }
    }
}

/// Whether `node` may not serve as an answer.
fn blocked(tree: &Tree, node: NodeId) -> bool {
    tree.has_mark_within(node, Mark::Unmovable)
        || tree
            .ancestors(node)
            .any(|ancestor| tree.label(ancestor).is_some_and(|label| label.has_mark(Mark::Unmovable)))
        || tree.has_category_within(node, "PRP")
}

fn narrowed(term: &Term, entity: &EntityType) -> Term {
    Term {
        entities: vec![entity.clone()],
        ..term.clone()
    }
}

/// A term for a noun phrase no tagger recognized.
fn generic_term(tree: &Tree, np: NodeId) -> Term {
    let tokens = tree.tokens(np);
    let indices: Vec<usize> = tokens.iter().filter_map(|token| token.index).collect();
    let span = match (indices.iter().min(), indices.iter().max()) {
        (Some(first), Some(last)) => Span::new(first - 1, *last),
        _ => Span::new(0, 0),
    };
    Term {
        span,
        words: tokens.iter().map(|token| token.text.clone()).collect(),
        entities: vec![EntityType::generic()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::EntityMap;
    use crate::term::TermExtractor;
    use pretty_assertions::assert_eq;

    const GORE: &str = "(ROOT (S (NP (NNP Al) (NNP Gore)) (VP (VBD was) (VP (VBN born) (PP (IN in) (NP (NNP Washington))))) (. .)))";

    fn answer(penn: &str, entities: &[(&str, Span)]) -> TreeAnswer {
        let tree = Tree::from_penn(penn).unwrap();
        let tokens: Vec<String> = tree.tokens(tree.root()).iter().map(|token| token.text.clone()).collect();
        let mut map = EntityMap::new();
        for (entity, span) in entities {
            map.entry(EntityType::new(entity)).or_default().push(*span);
        }
        let terms = TermExtractor::new().extract(&tokens, &map);
        TreeAnswer::new(tree.render(), terms, tree)
    }

    fn summary(candidates: &[QaPhrasePair]) -> Vec<(String, String, String)> {
        candidates
            .iter()
            .map(|pair| {
                (
                    pair.question_type.to_string(),
                    pair.question_phrase.clone(),
                    pair.answer.clone(),
                )
            })
            .collect()
    }

    fn owned(rows: &[(&str, &str, &str)]) -> Vec<(String, String, String)> {
        rows.iter()
            .map(|(a, b, c)| (a.to_string(), b.to_string(), c.to_string()))
            .collect()
    }

    #[test]
    fn entities_in_noun_and_prepositional_phrases() {
        let answer = answer(GORE, &[("NEperson", Span::new(0, 2)), ("NElocation", Span::new(5, 6))]);
        let extractor = AnswerPhraseExtractor::new(UnmappedEntities::Drop).unwrap();
        let candidates = extractor.extract(&answer);
        assert_eq!(
            summary(&candidates),
            owned(&[
                ("WHO", "who", "Al-1 Gore-2"),
                ("WHERE", "where", "in-5 Washington-6"),
                ("WHERE", "in which location", "in-5 Washington-6"),
                ("Y/N", "", "yes"),
            ])
        );
        assert_eq!(candidates[1].preposition.as_deref(), Some("in"));
        assert_eq!(candidates[0].term.as_ref().map(Term::text).as_deref(), Some("Al Gore"));
    }

    #[test]
    fn untagged_noun_phrases_ask_what() {
        let answer = answer("(ROOT (S (NP (NNP John)) (VP (VBD saw) (NP (DT the) (NN car))) (. .)))", &[]);
        let extractor = AnswerPhraseExtractor::new(UnmappedEntities::Drop).unwrap();
        let candidates = extractor.extract(&answer);
        assert_eq!(
            summary(&candidates),
            owned(&[
                ("WHAT", "what", "John-1"),
                ("WHAT", "what", "the-3 car-4"),
                ("Y/N", "", "yes"),
            ])
        );
        let term = candidates[1].term.as_ref().unwrap();
        assert_eq!(term.span, Span::new(2, 4));
        assert_eq!(term.entities, vec![EntityType::generic()]);
    }

    #[test]
    fn determiners_and_heads_align_with_terms() {
        let answer = answer(
            "(ROOT (S (NP (DT the) (NNP Beatles)) (VP (VBD played) (PP (IN in) (NP (NNP Hamburg)))) (. .)))",
            &[("NEmusicType", Span::new(1, 2)), ("NElocation", Span::new(4, 5))],
        );
        let extractor = AnswerPhraseExtractor::new(UnmappedEntities::Drop).unwrap();
        let candidates = extractor.extract(&answer);
        assert_eq!(
            summary(&candidates),
            owned(&[
                ("WHAT", "what music type", "the-1 Beatles-2"),
                ("WHERE", "where", "in-4 Hamburg-5"),
                ("WHERE", "in which location", "in-4 Hamburg-5"),
                ("Y/N", "", "yes"),
            ])
        );
    }

    #[test]
    fn unmovable_and_pronoun_phrases_are_skipped() {
        let mut answer = answer(
            "(ROOT (S (NP (PRP He)) (VP (VBD met) (NP (NP (DT the) (NN man)) (SBAR (WHNP (WP who)) (S (VP (VBD saw) (NP (NNP Mary))))))) (. .)))",
            &[("NEperson", Span::new(6, 7))],
        );
        answer.unmovable_tree = Some(
            Tree::from_indexed_penn(
                "(ROOT (S (NP (PRP He-1)) (VP (VBD met-2) (NP (NP (DT the-3) (NN man-4)) (SBAR (WHNP (WP who-5)) (S (VP (VBD saw-6) (UNMV-NP (NNP Mary-7))))))) (. .-8)))",
            )
            .unwrap(),
        );
        let extractor = AnswerPhraseExtractor::new(UnmappedEntities::Drop).unwrap();
        let candidates = extractor.extract(&answer);
        assert_eq!(summary(&candidates), owned(&[("Y/N", "", "yes")]));
    }

    #[test]
    fn unmapped_entity_types_follow_the_policy() {
        let penn = "(ROOT (S (NP (NNP Ohio)) (VP (VBZ is) (ADJP (JJ large))) (. .)))";
        let answer = answer(penn, &[("NEstate", Span::new(0, 1))]);

        let dropping = AnswerPhraseExtractor::new(UnmappedEntities::Drop).unwrap();
        assert_eq!(summary(&dropping.extract(&answer)), owned(&[("Y/N", "", "yes")]));

        let generic = AnswerPhraseExtractor::new(UnmappedEntities::Generic).unwrap();
        assert_eq!(
            summary(&generic.extract(&answer)),
            owned(&[("WHAT", "what", "Ohio-1"), ("Y/N", "", "yes")])
        );
    }

    #[test]
    fn negation_answers_no() {
        let extractor = AnswerPhraseExtractor::new(UnmappedEntities::Drop).unwrap();
        let negated = answer("(ROOT (S (NP (NNP John)) (VP (VBD did) (RB not) (VP (VB go))) (. .)))", &[]);
        let plain = answer("(ROOT (S (NP (NNP John)) (VP (VBD went)) (. .)))", &[]);
        assert_eq!(extractor.extract(&negated).last().map(|pair| pair.answer.as_str()), Some("no"));
        assert_eq!(extractor.extract(&plain).last().map(|pair| pair.answer.as_str()), Some("yes"));
    }

    #[test]
    fn subject_is_the_indexed_head() {
        let extractor = AnswerPhraseExtractor::new(UnmappedEntities::Drop).unwrap();
        assert_eq!(
            extractor.subject(&Tree::from_penn(GORE).unwrap()).as_deref(),
            Some("Gore-2")
        );
        assert_eq!(
            extractor.subject(&Tree::from_penn("(ROOT (FRAG (NP (NN car)) (. .)))").unwrap()),
            None
        );
    }
}
