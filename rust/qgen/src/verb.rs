//! Verb decomposition: do-support and subject-auxiliary inversion.
//!
//! The main clause's verb group is in one of three states:
//!
//! ```text
//! A  auxiliary + verb     John was born       → was is the auxiliary
//! B  single "be"          John is tall        → is is the auxiliary
//! C  single other verb    John saw Mary       → did see (do-support)
//! ```
//!
//! The auxiliary is wrapped together with a question placeholder in a
//! `Q-AUX` node, giving the auxiliary tree. Moving `Q-AUX` to the front
//! of the clause and relabeling the clause `SQ` gives the inverted tree:
//!
//! ```text
//! (S (NP John) (VP (Q-AUX (Q <focus>) (AUX-VBD did)) (VB see) (NP Mary)))
//! (SQ (Q-AUX (Q <focus>) (AUX-VBD did)) (NP John) (VP (VB see) (NP Mary)))
//! ```

use std::sync::Arc;

use qgen_pattern::Pattern;
use qgen_tree::{Auxiliary, Label, Mark, NodeId, Position, Token, Tree};
use tracing::{debug, warn};

use crate::answer::TreeAnswer;
use crate::capability::{Lexicon, PartOfSpeech};
use crate::error::{QgenError, QgenResult};

/// The leaf that a question phrase later replaces.
pub const FOCUS: &str = "<focus>";

const MULTI_VERB: &str = r"ROOT < (S=clause < (VP=mainvp < /^(AUX-.*|MD|VB.?)$/=vb1 < (VP < /^VB/=vb2)))";
const SINGLE_VERB: &str = r"ROOT < (S=clause < (VP=mainvp < /^(AUX-.*|VB.?)$/=vb1 !< (VP < /^VB/)))";
const QUESTION_AUX: &str = "ROOT < (S=clause << Q-AUX=qaux)";
const FRONTED_ADJUNCT: &str = "ROOT < (SQ=clause <1 Q-AUX=qaux <2 (/^PP/ $. /,/=comma))";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbState {
    /// An auxiliary or modal followed by a verb phrase.
    MultiVerb,
    /// A single form of "be".
    Copula,
    /// A single verb other than "be"; needs do-support.
    DoSupport,
}

#[derive(Debug, Clone)]
pub struct Decomposition {
    pub state: VerbState,
    pub auxiliary: Tree,
    pub inverted: Tree,
}

/// Text of a decomposed tree without indices or the focus placeholder.
pub fn plain_words(tree: &Tree) -> String {
    tree.tokens(tree.root())
        .into_iter()
        .filter(|token| token.text != FOCUS)
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct VerbDecomposer {
    lexicon: Arc<dyn Lexicon>,
    multi_verb: Pattern,
    single_verb: Pattern,
    question_aux: Pattern,
    fronted_adjunct: Pattern,
}

impl VerbDecomposer {
    pub fn new(lexicon: Arc<dyn Lexicon>) -> QgenResult<Self> {
        Ok(VerbDecomposer {
            lexicon,
            multi_verb: Pattern::parse(MULTI_VERB)?,
            single_verb: Pattern::parse(SINGLE_VERB)?,
            question_aux: Pattern::parse(QUESTION_AUX)?,
            fronted_adjunct: Pattern::parse(FRONTED_ADJUNCT)?,
        })
    }

    /// Fill in the auxiliary and inverted trees of `answer`.
    pub fn decompose(&self, answer: &mut TreeAnswer) -> QgenResult<()> {
        let tree = answer.tree.as_ref().ok_or(QgenError::NoVerbFound)?;
        let decomposition = self.decompose_tree(tree)?;
        answer.auxiliary_sentence = Some(decomposition.auxiliary.surface());
        answer.inverted_sentence = Some(decomposition.inverted.surface());
        answer.auxiliary_tree = Some(decomposition.auxiliary);
        answer.inverted_tree = Some(decomposition.inverted);
        Ok(())
    }

    pub fn decompose_tree(&self, tree: &Tree) -> QgenResult<Decomposition> {
        let (state, auxiliary) = self.auxiliarize(tree)?;
        debug!(?state, tree = %auxiliary, "auxiliarized");
        let inverted = self.invert(&auxiliary)?;
        debug!(tree = %inverted, "inverted");
        Ok(Decomposition {
            state,
            auxiliary,
            inverted,
        })
    }

    fn auxiliarize(&self, tree: &Tree) -> QgenResult<(VerbState, Tree)> {
        if let Some(found) = self.multi_verb.find(tree) {
            let verb = found.get("vb1").ok_or(QgenError::NoVerbFound)?;
            return Ok((VerbState::MultiVerb, self.promote(tree, verb)?));
        }

        let found = self.single_verb.find(tree).ok_or(QgenError::NoVerbFound)?;
        let verb = found.get("vb1").ok_or(QgenError::NoVerbFound)?;
        let tag = tree.category(verb).unwrap_or_default().to_string();
        let word = tree
            .tokens(verb)
            .first()
            .map(|token| token.text.clone())
            .ok_or(QgenError::NoVerbFound)?;
        // Present tense other than the third person is already the base form.
        let lemma = match self.lexicon.lemma(&word, PartOfSpeech::Verb) {
            Some(lemma) => lemma,
            None if matches!(tag.as_str(), "VBP" | "VB") => word.to_lowercase(),
            None => return Err(QgenError::NoLemma { word, tag }),
        };

        if lemma == "be" {
            return Ok((VerbState::Copula, self.promote(tree, verb)?));
        }
        Ok((VerbState::DoSupport, self.do_support(tree, verb, &tag, &lemma)?))
    }

    /// Mark `verb` as the auxiliary and wrap it with the placeholder.
    fn promote(&self, tree: &Tree, verb: NodeId) -> QgenResult<Tree> {
        let mut edit = tree.edit();
        edit.mark(verb, Mark::Auxiliary)?;
        edit.adjoin(verb, &question_wrapper())?;
        Ok(edit.finish())
    }

    /// Insert `do`, `does` or `did` before `verb` and reduce the verb to
    /// its lemma.
    fn do_support(&self, tree: &Tree, verb: NodeId, tag: &str, lemma: &str) -> QgenResult<Tree> {
        let (aux_tag, aux_word) = match tag {
            "VBZ" => ("VBZ", "does"),
            "VBD" => ("VBD", "did"),
            "VBP" => ("VB", "do"),
            "VB" => {
                warn!(tag, lemma, "base form found as the main verb");
                ("VB", "do")
            }
            "VBG" => {
                warn!(tag, lemma, "gerund found as the main verb");
                ("VBZ", "does")
            }
            other => {
                warn!(tag = other, lemma, "unexpected main verb tag");
                ("VBD", "did")
            }
        };
        let auxiliary = Tree::preterminal(
            Label::new(aux_tag).with_mark(Mark::Auxiliary),
            Token::synthetic(aux_word),
        );

        let mut edit = tree.edit();
        let inserted = edit.insert(&auxiliary, Position::Before(verb))?;
        edit.adjoin(inserted, &question_wrapper())?;
        edit.relabel(verb, Label::new("VB"))?;
        edit.set_word(verb, lemma)?;
        Ok(edit.finish())
    }

    fn invert(&self, auxiliary: &Tree) -> QgenResult<Tree> {
        let found = self.question_aux.find(auxiliary).ok_or(QgenError::NoVerbFound)?;
        let (Some(clause), Some(qaux)) = (found.get("clause"), found.get("qaux")) else {
            return Err(QgenError::NoVerbFound);
        };
        let mut edit = auxiliary.edit();
        edit.move_node(qaux, Position::FirstChild(clause))?;
        edit.relabel(clause, Label::new("SQ"))?;
        let inverted = edit.finish();

        let Some(adjunct) = self.fronted_adjunct.find(&inverted) else {
            return Ok(inverted);
        };
        match (adjunct.get("qaux"), adjunct.get("comma")) {
            (Some(qaux), Some(comma)) => {
                debug!("moving auxiliary after sentence-initial adjunct");
                let mut edit = inverted.edit();
                edit.move_node(qaux, Position::After(comma))?;
                Ok(edit.finish())
            }
            _ => Ok(inverted),
        }
    }
}

/// `(Q-AUX (Q <focus>) FOOT)`, adjoined at the auxiliary.
fn question_wrapper() -> Auxiliary {
    let tree = Tree::phrase(
        Label::new("Q-AUX"),
        vec![
            Tree::preterminal(Label::new("Q"), Token::synthetic(FOCUS)),
            Tree::phrase(Label::new("FOOT"), Vec::new()),
        ],
    );
    let foot = tree.children(tree.root())[1];
    Auxiliary { tree, foot }
}
