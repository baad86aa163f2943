//! Reports over generated paragraphs.

use std::fmt;

use indexmap::IndexMap;
use qgen_tree::strip_indices;
use serde::Serialize;

use crate::generator::Paragraph;

/// A numbered listing of sentences and their questions:
///
/// ```text
/// 1. Al Gore was born in Washington.
///    WHO      Who was born in Washington? => Al Gore
///    WHERE    Where was Al Gore born? => in Washington
/// ```
pub struct Listing<'a> {
    paragraphs: &'a [Paragraph],
}

impl<'a> Listing<'a> {
    pub fn new(paragraphs: &'a [Paragraph]) -> Self {
        Listing { paragraphs }
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let answers = self.paragraphs.iter().flat_map(|paragraph| &paragraph.answers);
        for (number, answer) in answers.enumerate() {
            writeln!(f, "{}. {}", number + 1, answer.sentence)?;
            for (question, pair) in answer.questions() {
                writeln!(
                    f,
                    "   {:<8} {} => {}",
                    pair.question_type.as_str(),
                    question,
                    strip_indices(&pair.answer)
                )?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub paragraphs: usize,
    pub original_sentences: usize,
    pub generated_sentences: usize,
    /// Words in the input paragraphs.
    pub words: usize,
    pub questions: usize,
}

impl Summary {
    pub fn of(paragraphs: &[Paragraph]) -> Self {
        paragraphs.iter().fold(Summary::default(), |summary, paragraph| Summary {
            paragraphs: summary.paragraphs + 1,
            original_sentences: summary.original_sentences + paragraph.originals,
            generated_sentences: summary.generated_sentences + paragraph.generated(),
            words: summary.words + paragraph.text.split_whitespace().count(),
            questions: summary.questions
                + paragraph
                    .answers
                    .iter()
                    .map(|answer| answer.questions().count())
                    .sum::<usize>(),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} paragraphs, {} sentences ({} generated), {} words, {} questions",
            self.paragraphs,
            self.original_sentences + self.generated_sentences,
            self.generated_sentences,
            self.words,
            self.questions
        )
    }
}

/// One export row: a question with either its sentence (`S` ids) or its
/// answer phrase (`P` ids).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub question: String,
    pub text: String,
    pub id: String,
}

/// Question rows for a corpus. Every wh-question yields a sentence row
/// and a phrase row. A sentence or answer phrase seen again reuses its
/// id.
#[derive(Debug, Clone, Default)]
pub struct Export {
    sentences: IndexMap<String, usize>,
    phrases: IndexMap<String, usize>,
    rows: Vec<ExportRow>,
}

impl Export {
    pub fn new() -> Self {
        Export::default()
    }

    pub fn add(&mut self, paragraphs: &[Paragraph]) {
        for answer in paragraphs.iter().flat_map(|paragraph| &paragraph.answers) {
            let questions: Vec<_> = answer.questions().filter(|(_, pair)| !pair.is_yes_no()).collect();
            if questions.is_empty() {
                continue;
            }
            let sentence_id = id_for(&mut self.sentences, &answer.sentence);
            for (question, pair) in questions {
                let phrase = strip_indices(&pair.answer);
                let phrase_id = id_for(&mut self.phrases, &phrase);
                self.rows.push(ExportRow {
                    question: question.to_string(),
                    text: answer.sentence.clone(),
                    id: format!("S{sentence_id}"),
                });
                self.rows.push(ExportRow {
                    question: question.to_string(),
                    text: phrase,
                    id: format!("P{phrase_id}"),
                });
            }
        }
    }

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.rows)
    }
}

fn id_for(ids: &mut IndexMap<String, usize>, text: &str) -> usize {
    let next = ids.len() + 1;
    *ids.entry(text.to_string()).or_insert(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::{QaPhrasePair, TreeAnswer};
    use crate::question::QuestionType;
    use pretty_assertions::assert_eq;

    fn asked(question_type: QuestionType, question: &str, answer: &str) -> QaPhrasePair {
        QaPhrasePair {
            question: Some(question.into()),
            question_type,
            ..QaPhrasePair::yes_no(answer)
        }
    }

    fn gore() -> TreeAnswer {
        TreeAnswer {
            sentence: "Al Gore was born in Washington.".into(),
            candidates: vec![
                asked(QuestionType::Who, "Who was born in Washington?", "Al-1 Gore-2"),
                asked(QuestionType::Where, "Where was Al Gore born?", "in-5 Washington-6"),
                asked(QuestionType::YesNo, "Was Al Gore born in Washington?", "yes"),
            ],
            ..TreeAnswer::default()
        }
    }

    fn corpus() -> Vec<Paragraph> {
        let only_yes_no = TreeAnswer {
            sentence: "It rained.".into(),
            candidates: vec![asked(QuestionType::YesNo, "Did it rain?", "yes")],
            ..TreeAnswer::default()
        };
        vec![
            Paragraph {
                text: "Al Gore was born in Washington. It rained.".into(),
                originals: 2,
                sentences: vec!["Al Gore was born in Washington.".into(), "It rained.".into()],
                answers: vec![gore(), only_yes_no],
            },
            Paragraph {
                text: "Al Gore was born in Washington.".into(),
                originals: 1,
                sentences: vec!["Al Gore was born in Washington.".into()],
                answers: vec![gore()],
            },
        ]
    }

    #[test]
    fn listing_numbers_sentences() {
        let corpus = corpus();
        let listing = Listing::new(&corpus[..1]).to_string();
        assert_eq!(
            listing,
            "1. Al Gore was born in Washington.\n\
             \x20  WHO      Who was born in Washington? => Al Gore\n\
             \x20  WHERE    Where was Al Gore born? => in Washington\n\
             \x20  Y/N      Was Al Gore born in Washington? => yes\n\
             2. It rained.\n\
             \x20  Y/N      Did it rain? => yes\n"
        );
    }

    #[test]
    fn summary_counts_the_corpus() {
        let summary = Summary::of(&corpus());
        assert_eq!(
            summary,
            Summary {
                paragraphs: 2,
                original_sentences: 3,
                generated_sentences: 0,
                words: 14,
                questions: 7,
            }
        );
    }

    #[test]
    fn export_reuses_ids_and_skips_yes_no() {
        let mut export = Export::new();
        export.add(&corpus());
        let ids: Vec<&str> = export.rows().iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "P1", "S1", "P2", "S1", "P1", "S1", "P2"]);
        assert_eq!(export.rows()[3].text, "in Washington");
        assert!(export.rows().iter().all(|row| !row.question.starts_with("Was")));
        assert!(export.to_json().unwrap().contains("\"id\": \"P2\""));
    }
}
