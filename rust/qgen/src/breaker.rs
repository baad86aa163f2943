//! Sentence breaking: deriving simpler sentences from a complex one.
//!
//! Each derivation looks for one construction in the parse tree and
//! writes a new standalone sentence from it:
//!
//! | construction            | example input                       | derived sentence        |
//! |-------------------------|-------------------------------------|-------------------------|
//! | appositive              | Gore, the candidate, spoke.         | Gore is the candidate.  |
//! | verbal modifier         | the car bought by John              | The car is bought by John. |
//! | embedded finite clause  | John said Mary left.                | Mary left.              |
//! | relative clause object  | I saw the man whom John met.        | John met the man.       |
//! | relative clause subject | the man who met Mary                | The man met Mary.       |
//! | coordinated verb phrase | John is tall and plays basketball.  | John is tall. / John plays basketball. |
//!
//! Derived sentences follow the sentence they came from, in the order of
//! the table. A sentence already present in the output is not repeated.

use std::sync::Arc;

use itertools::Itertools;
use qgen_pattern::{NodePattern, Pattern, RelationKind::*};
use qgen_tree::{HeadFinder, NodeId, Position, Tree};
use tracing::{debug, warn};

use crate::capability::Parser;
use crate::error::QgenResult;
use crate::surface::sentence;

struct Patterns {
    appositive: Pattern,
    modifier: Pattern,
    finite: Pattern,
    relative_object: Pattern,
    relative_subject: Pattern,
    coordination: Pattern,
}

impl Patterns {
    fn new() -> QgenResult<Self> {
        let comma = || NodePattern::regex(",");
        let no_adverbial_wh = |sbar: NodePattern| {
            sbar.without(ParentOf, NodePattern::literal("WHADVP"))
                .without(ParentOf, NodePattern::literal("WHADJP"))
        };

        // NP !< CC !< CONJP < (NP=noun $.. (/,/ $.. (NP=app .. /,/)))
        let appositive = NodePattern::literal("NP")
            .without(ParentOf, NodePattern::literal("CC"))
            .without(ParentOf, NodePattern::literal("CONJP"))
            .with(
                ParentOf,
                NodePattern::literal("NP").named("noun").with(
                    LeftSisterOf,
                    comma()?.with(
                        LeftSisterOf,
                        NodePattern::literal("NP")
                            .named("app")
                            .with(Precedes, comma()?),
                    ),
                ),
            );

        // NP=noun > NP $.. VP=modifier
        let modifier = NodePattern::literal("NP")
            .named("noun")
            .with(ChildOf, NodePattern::literal("NP"))
            .with(LeftSisterOf, NodePattern::literal("VP").named("modifier"));

        // S=finite !> ROOT !>> NP|PP < NP < (VP < VBP|VB|VBZ|VBD|MD)
        let finite = NodePattern::literal("S")
            .named("finite")
            .without(ChildOf, NodePattern::literal("ROOT"))
            .without(DominatedBy, NodePattern::literal("NP|PP"))
            .with(ParentOf, NodePattern::literal("NP"))
            .with(
                ParentOf,
                NodePattern::literal("VP").with(ParentOf, NodePattern::literal("VBP|VB|VBZ|VBD|MD")),
            );

        // NP=object > NP $.. (SBAR < (S=rel <, NP < (VP < (/^VB/=verb !. /^VB/ !$. NP)))
        //                    !< WHADVP !< WHADJP)
        let relative_object = NodePattern::literal("NP")
            .named("object")
            .with(ChildOf, NodePattern::literal("NP"))
            .with(
                LeftSisterOf,
                no_adverbial_wh(NodePattern::literal("SBAR").with(
                    ParentOf,
                    NodePattern::literal("S")
                        .named("rel")
                        .with(HasNthChild(1), NodePattern::literal("NP"))
                        .with(
                            ParentOf,
                            NodePattern::literal("VP").with(
                                ParentOf,
                                NodePattern::regex("^VB")?
                                    .named("verb")
                                    .without(ImmediatelyPrecedes, NodePattern::regex("^VB")?)
                                    .without(ImmediateLeftSisterOf, NodePattern::literal("NP")),
                            ),
                        ),
                )),
            );

        // NP=subject > NP $.. (SBAR < (S=rel < (VP !, NP)) !< WHADVP !< WHADJP)
        let relative_subject = NodePattern::literal("NP")
            .named("subject")
            .with(ChildOf, NodePattern::literal("NP"))
            .with(
                LeftSisterOf,
                no_adverbial_wh(NodePattern::literal("SBAR").with(
                    ParentOf,
                    NodePattern::literal("S").named("rel").with(
                        ParentOf,
                        NodePattern::literal("VP").without(ImmediatelyFollows, NodePattern::literal("NP")),
                    ),
                )),
            );

        // VP < (CC=cc ,, VP=vp1 .. VP=vp2) > (S > ROOT)
        let coordination = NodePattern::literal("VP")
            .with(
                ParentOf,
                NodePattern::literal("CC")
                    .named("cc")
                    .with(Follows, NodePattern::literal("VP").named("vp1"))
                    .with(Precedes, NodePattern::literal("VP").named("vp2")),
            )
            .with(
                ChildOf,
                NodePattern::literal("S").with(ChildOf, NodePattern::literal("ROOT")),
            );

        Ok(Patterns {
            appositive: Pattern::new(appositive),
            modifier: Pattern::new(modifier),
            finite: Pattern::new(finite),
            relative_object: Pattern::new(relative_object),
            relative_subject: Pattern::new(relative_subject),
            coordination: Pattern::new(coordination),
        })
    }
}

/// Expands text into itself plus the simpler sentences derivable from it.
pub struct SentenceBreaker {
    parser: Arc<dyn Parser>,
    patterns: Patterns,
    heads: HeadFinder,
}

impl SentenceBreaker {
    pub fn new(parser: Arc<dyn Parser>) -> QgenResult<Self> {
        Ok(SentenceBreaker {
            parser,
            patterns: Patterns::new()?,
            heads: HeadFinder::new(),
        })
    }

    /// Every sentence of `text`, each followed by the sentences derived
    /// from it, joined with single spaces.
    pub fn break_text(&self, text: &str) -> String {
        let mut output: Vec<String> = Vec::new();
        for original in self.parser.split(text) {
            let derived = match self.parser.parse(&original).and_then(|tree| self.derive(&tree)) {
                Ok(derived) => derived,
                Err(err) => {
                    warn!(sentence = %original, error = %err, "cannot break sentence");
                    Vec::new()
                }
            };
            if !output.contains(&original) {
                output.push(original);
            }
            for sentence in derived {
                if !output.contains(&sentence) {
                    debug!(%sentence, "derived sentence");
                    output.push(sentence);
                }
            }
        }
        output.join(" ")
    }

    /// The sentences derivable from one parsed sentence.
    pub fn derive(&self, tree: &Tree) -> QgenResult<Vec<String>> {
        let mut derived = Vec::new();
        derived.extend(self.appositives(tree));
        derived.extend(self.modifiers(tree));
        derived.extend(self.finite_clauses(tree));
        derived.extend(self.relative_objects(tree)?);
        derived.extend(self.relative_subjects(tree));
        derived.extend(self.coordinated_verb_phrases(tree));
        Ok(derived.into_iter().unique().collect())
    }

    fn words(tree: &Tree, node: NodeId) -> Vec<String> {
        tree.tokens(node).into_iter().map(|token| token.text.clone()).collect()
    }

    /// `is` or `are`, agreeing with the head noun of `noun`.
    fn copula(&self, tree: &Tree, noun: NodeId) -> &'static str {
        let plural = self
            .heads
            .head_terminal(tree, noun)
            .and_then(|head| tree.category(head))
            .is_some_and(|tag| matches!(tag, "NNS" | "NNPS"));
        if plural { "are" } else { "is" }
    }

    /// `noun COPULA predicate.` for each match binding `noun` and `predicate`.
    fn predications(&self, tree: &Tree, pattern: &Pattern, noun: &str, predicate: &str) -> Vec<String> {
        pattern
            .matches(tree)
            .into_iter()
            .filter_map(|found| {
                let (noun, predicate) = (found.get(noun)?, found.get(predicate)?);
                let mut words = Self::words(tree, noun);
                words.push(self.copula(tree, noun).to_string());
                words.extend(Self::words(tree, predicate));
                Some(sentence(&words))
            })
            .collect()
    }

    fn appositives(&self, tree: &Tree) -> Vec<String> {
        self.predications(tree, &self.patterns.appositive, "noun", "app")
    }

    fn modifiers(&self, tree: &Tree) -> Vec<String> {
        self.predications(tree, &self.patterns.modifier, "noun", "modifier")
    }

    fn finite_clauses(&self, tree: &Tree) -> Vec<String> {
        self.patterns
            .finite
            .matches(tree)
            .into_iter()
            .filter_map(|found| found.get("finite"))
            .map(|clause| sentence(&Self::words(tree, clause)))
            .collect()
    }

    /// The relative clause with the modified noun restored as the object
    /// of its final verb.
    fn relative_objects(&self, tree: &Tree) -> QgenResult<Vec<String>> {
        let mut sentences = Vec::new();
        for found in self.patterns.relative_object.matches(tree) {
            let (Some(object), Some(clause), Some(verb)) =
                (found.get("object"), found.get("rel"), found.get("verb"))
            else {
                continue;
            };
            let mut edit = tree.edit();
            edit.insert(&tree.subtree(object), Position::After(verb))?;
            let restored = edit.finish();
            sentences.push(sentence(&Self::words(&restored, clause)));
        }
        Ok(sentences)
    }

    /// The modified noun followed by the relative clause that lacks a
    /// subject.
    fn relative_subjects(&self, tree: &Tree) -> Vec<String> {
        self.patterns
            .relative_subject
            .matches(tree)
            .into_iter()
            .filter_map(|found| {
                let mut words = Self::words(tree, found.get("subject")?);
                words.extend(Self::words(tree, found.get("rel")?));
                Some(sentence(&words))
            })
            .collect()
    }

    /// For every coordinator joining verb phrases of the main clause, the
    /// sentence once without `vp1 cc` and once without `cc vp2`. Only verb
    /// phrases right next to the coordinator are removed.
    fn coordinated_verb_phrases(&self, tree: &Tree) -> Vec<String> {
        let without = |removed: [NodeId; 2]| {
            let gone: Vec<NodeId> = removed.iter().flat_map(|node| tree.leaves(*node)).collect();
            let words: Vec<String> = tree
                .leaves(tree.root())
                .into_iter()
                .filter(|leaf| !gone.contains(leaf))
                .filter_map(|leaf| tree.token(leaf).map(|token| token.text.clone()))
                .collect();
            sentence(&words)
        };
        let mut sentences = Vec::new();
        for found in self.patterns.coordination.matches(tree) {
            let (Some(cc), Some(first), Some(second)) = (found.get("cc"), found.get("vp1"), found.get("vp2"))
            else {
                continue;
            };
            if tree.next_sibling(first) == Some(cc) {
                sentences.push(without([first, cc]));
            }
            if tree.next_sibling(cc) == Some(second) {
                sentences.push(without([cc, second]));
            }
        }
        sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::FixtureParser;
    use pretty_assertions::assert_eq;

    fn derive(penn: &str) -> Vec<String> {
        let breaker = SentenceBreaker::new(Arc::new(FixtureParser::new())).unwrap();
        breaker.derive(&Tree::from_penn(penn).unwrap()).unwrap()
    }

    #[test]
    fn appositives_agree_in_number() {
        assert_eq!(
            derive("(ROOT (S (NP (NP (NNP Gore)) (, ,) (NP (DT the) (NN candidate)) (, ,)) (VP (VBD spoke)) (. .)))"),
            vec!["Gore is the candidate."]
        );
        assert_eq!(
            derive("(ROOT (S (NP (NP (NNS cats)) (, ,) (NP (DT the) (NNS pets)) (, ,)) (VP (VBD slept)) (. .)))"),
            vec!["Cats are the pets."]
        );
    }

    #[test]
    fn verbal_modifiers() {
        assert_eq!(
            derive("(ROOT (S (NP (DT This)) (VP (VBZ is) (NP (NP (DT the) (NN car)) (VP (VBN bought) (PP (IN by) (NP (NNP John)))))) (. .)))"),
            vec!["The car is bought by John."]
        );
    }

    #[test]
    fn embedded_finite_clauses() {
        assert_eq!(
            derive("(ROOT (S (NP (NNP John)) (VP (VBD said) (SBAR (S (NP (NNP Mary)) (VP (VBD left))))) (. .)))"),
            vec!["Mary left."]
        );
    }

    #[test]
    fn relative_clause_arguments() {
        assert_eq!(
            derive("(ROOT (S (NP (PRP I)) (VP (VBD saw) (NP (NP (DT the) (NN man)) (SBAR (WHNP (WP whom)) (S (NP (NNP John)) (VP (VBD met)))))) (. .)))"),
            vec!["John met the man."]
        );
        assert_eq!(
            derive("(ROOT (S (NP (NP (DT the) (NN man)) (SBAR (WHNP (WP who)) (S (VP (VBD met) (NP (NNP Mary)))))) (VP (VBD left)) (. .)))"),
            vec!["The man met Mary."]
        );
    }

    #[test]
    fn coordinated_verb_phrases() {
        assert_eq!(
            derive("(ROOT (S (NP (NNP John)) (VP (VP (VBZ is) (ADJP (JJ tall))) (CC and) (VP (VBZ plays) (NP (NN basketball)))) (. .)))"),
            vec!["John plays basketball.", "John is tall."]
        );
    }

    #[test]
    fn every_coordinator_is_broken() {
        let mut derived = derive(
            "(ROOT (S (NP (NNP John)) (VP (VP (VBZ sings)) (CC and) (VP (VBZ dances)) (CC and) (VP (VBZ plays) (NP (NN chess)))) (. .)))",
        );
        derived.sort();
        assert_eq!(
            derived,
            vec!["John dances and plays chess.", "John sings and dances.", "John sings and plays chess."]
        );
    }

    #[test]
    fn break_text_appends_derived_sentences_once() {
        let parser = FixtureParser::with_trees([
            "(ROOT (S (NP (NNP John)) (VP (VP (VBZ is) (ADJP (JJ tall))) (CC and) (VP (VBZ plays) (NP (NN basketball)))) (. .)))",
            "(ROOT (S (NP (NNP John)) (VP (VBZ is) (ADJP (JJ tall))) (. .)))",
        ])
        .unwrap();
        let breaker = SentenceBreaker::new(Arc::new(parser)).unwrap();
        assert_eq!(
            breaker.break_text("John is tall and plays basketball. John is tall. Unparsed words here."),
            "John is tall and plays basketball. John plays basketball. John is tall. Unparsed words here."
        );
    }
}
