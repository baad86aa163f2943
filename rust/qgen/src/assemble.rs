//! Question assembly: turning candidates into question strings.

use qgen_tree::strip_indices;
use tracing::debug;

use crate::answer::{QaPhrasePair, TreeAnswer};
use crate::surface::{capitalize, detokenize};
use crate::verb::FOCUS;

/// Builds the question for every candidate of a sentence.
///
/// A subject is asked about in place (`Al Gore was born` → `who was
/// born`). Anything else is removed from the inverted sentence and its
/// question phrase takes the placeholder's position (`<focus> was Al Gore
/// born in Washington` → `where was Al Gore born`).
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionAssembler;

impl QuestionAssembler {
    pub fn new() -> Self {
        QuestionAssembler
    }

    /// Fill in the question of every candidate that can be asked. The
    /// others keep `None`.
    pub fn assemble(&self, answer: &mut TreeAnswer) {
        let questions: Vec<Option<String>> = answer
            .candidates
            .iter()
            .map(|pair| self.question(answer, pair))
            .collect();
        for (pair, question) in answer.candidates.iter_mut().zip(questions) {
            pair.question = question;
        }
    }

    pub fn question(&self, answer: &TreeAnswer, pair: &QaPhrasePair) -> Option<String> {
        let inverted = answer.inverted_sentence.as_deref()?;
        let inverted: Vec<&str> = inverted.split_whitespace().collect();

        if pair.is_yes_no() {
            let words: Vec<&str> = inverted.into_iter().filter(|word| *word != FOCUS).collect();
            return Some(finish(&words.join(" ")));
        }

        let target: Vec<&str> = pair.answer.split_whitespace().collect();
        let asks_subject = answer
            .subject
            .as_deref()
            .is_some_and(|subject| target.contains(&subject));

        let words = if asks_subject {
            let base = answer.indexed_sentence()?;
            let base: Vec<&str> = base.split_whitespace().collect();
            let at = find_run(&base, &target)?;
            let mut words: Vec<String> = base[..at].iter().map(|word| word.to_string()).collect();
            words.push(pair.question_phrase.clone());
            words.extend(base[at + target.len()..].iter().map(|word| word.to_string()));
            words
        } else {
            let Some(at) = find_run(&inverted, &target) else {
                debug!(answer = %pair.answer, "answer not found in inverted sentence");
                return None;
            };
            let mut rest = &inverted[at + target.len()..];
            // A fronted adjunct leaves its comma behind.
            if at == 0 && rest.first().is_some_and(|word| strip_indices(word) == ",") {
                rest = &rest[1..];
            }
            inverted[..at]
                .iter()
                .chain(rest)
                .map(|word| {
                    if *word == FOCUS {
                        pair.question_phrase.clone()
                    } else {
                        word.to_string()
                    }
                })
                .collect()
        };
        Some(finish(&words.join(" ")))
    }
}

/// Start of the first run of `needle` in `haystack`.
fn find_run(haystack: &[&str], needle: &[&str]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn finish(indexed: &str) -> String {
    let stripped = strip_indices(indexed);
    let words: Vec<&str> = stripped.split_whitespace().collect();
    let text = detokenize(&words);
    let mut question = text
        .trim_start_matches([',', ';', ':', ' '])
        .trim_end_matches(['.', '?', '!', ' '])
        .to_string();
    question.push('?');
    capitalize(&question)
}
