//! Per-sentence state threaded through the pipeline.

use qgen_tree::Tree;
use serde::Serialize;

use crate::question::QuestionType;
use crate::term::Term;

/// One candidate question: what it asks for and, once assembled, the
/// question itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaPhrasePair {
    pub question_type: QuestionType,
    /// The words replacing the answer: `who`, `in which location`.
    pub question_phrase: String,
    /// The answer words with their indices: `in-5 Washington-6`. Yes/no
    /// candidates answer `yes` or `no`.
    pub answer: String,
    /// The preposition of a prepositional-phrase answer.
    pub preposition: Option<String>,
    /// A copy of the subtree the answer was found at.
    #[serde(skip)]
    pub answer_tree: Option<Tree>,
    /// The term the answer was aligned with, narrowed to the entity type
    /// that produced this candidate.
    pub term: Option<Term>,
    pub question: Option<String>,
}

impl QaPhrasePair {
    pub fn yes_no(answer: &str) -> Self {
        QaPhrasePair {
            question_type: QuestionType::YesNo,
            question_phrase: String::new(),
            answer: answer.to_string(),
            preposition: None,
            answer_tree: None,
            term: None,
            question: None,
        }
    }

    pub fn is_yes_no(&self) -> bool {
        self.question_type == QuestionType::YesNo
    }

    /// Candidates asking the same thing the same way.
    pub fn same_candidate(&self, other: &QaPhrasePair) -> bool {
        self.question_type == other.question_type
            && self.question_phrase == other.question_phrase
            && self.preposition == other.preposition
            && self.answer == other.answer
    }
}

/// Everything known about one sentence.
#[derive(Debug, Clone, Default)]
pub struct TreeAnswer {
    pub sentence: String,
    pub terms: Vec<Term>,
    /// The parse, after compression when that is enabled.
    pub tree: Option<Tree>,
    pub unmovable_tree: Option<Tree>,
    pub auxiliary_tree: Option<Tree>,
    /// Indexed words of the auxiliary tree, placeholder included.
    pub auxiliary_sentence: Option<String>,
    pub inverted_tree: Option<Tree>,
    /// Indexed words of the inverted tree, placeholder included.
    pub inverted_sentence: Option<String>,
    /// Indexed head word of the subject: `Gore-2`.
    pub subject: Option<String>,
    pub candidates: Vec<QaPhrasePair>,
}

impl TreeAnswer {
    pub fn new(sentence: impl Into<String>, terms: Vec<Term>, tree: Tree) -> Self {
        TreeAnswer {
            sentence: sentence.into(),
            terms,
            tree: Some(tree),
            ..TreeAnswer::default()
        }
    }

    /// The indexed words of the base tree.
    pub fn indexed_sentence(&self) -> Option<String> {
        self.tree.as_ref().map(Tree::surface)
    }

    /// Questions assembled so far, with their candidates.
    pub fn questions(&self) -> impl Iterator<Item = (&str, &QaPhrasePair)> {
        self.candidates
            .iter()
            .filter_map(|pair| pair.question.as_deref().map(|question| (question, pair)))
    }
}
