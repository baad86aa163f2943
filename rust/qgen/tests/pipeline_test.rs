use std::sync::Arc;

use pretty_assertions::assert_eq;
use qgen::helpers::FixtureParser;
use qgen::{Gazetteer, Generator, GeneratorConfig, Paragraph, QuestionType, VerbTable};

const TREES: &[&str] = &[
    "(ROOT (S (NP (NNP Al) (NNP Gore)) (VP (VBD was) (VP (VBN born) (PP (IN in) (NP (NNP Washington))))) (. .)))",
    "(ROOT (S (NP (NNP John)) (VP (VP (VBZ is) (ADJP (JJ tall))) (CC and) (VP (VBZ plays) (NP (NN basketball)))) (. .)))",
    "(ROOT (S (NP (NNP John)) (VP (VBZ plays) (NP (NN basketball))) (. .)))",
    "(ROOT (S (NP (NNP John)) (VP (VBZ is) (ADJP (JJ tall))) (. .)))",
    "(ROOT (S (NP (NNP John)) (VP (VBD did) (RB not) (VP (VB go))) (. .)))",
    "(ROOT (S (NP (NNP John)) (VP (VBD went)) (. .)))",
    "(ROOT (S (NP (NNP John)) (VP (VBD saw) (NP (NNP Mary))) (. .)))",
    "(ROOT (S (CC But) (NP (NNP John)) (VP (VBD left)) (. .)))",
    "(ROOT (FRAG (NP (DT No) (NN verb)) (. .)))",
    "(ROOT (S (PP (IN In) (NP (CD 2009))) (, ,) (NP (NNP Jackson)) (VP (VBD died)) (. .)))",
    "(ROOT (S (NP (NP (NNP John) (POS 's)) (NN dog)) (VP (VBD bit) (NP (NNP Mary))) (. .)))",
    "(ROOT (S (NP (NNP John)) (VP (VBD smote) (NP (NNP Mary))) (. .)))",
];

fn generator(config: GeneratorConfig) -> Generator {
    let parser = FixtureParser::with_trees(TREES.iter().copied()).unwrap();
    let tagger = Gazetteer::new()
        .with("Al Gore", "NEperson")
        .with("John", "NEperson")
        .with("Mary", "NEperson")
        .with("Washington", "NElocation")
        .with("Jackson", "NEperson")
        .with("2009", "NEdate");
    Generator::new(Arc::new(parser), Arc::new(tagger), Arc::new(VerbTable::new()), config).unwrap()
}

fn questions(paragraph: &Paragraph) -> Vec<Vec<&str>> {
    paragraph
        .answers
        .iter()
        .map(|answer| answer.questions().map(|(question, _)| question).collect())
        .collect()
}

#[test_log::test]
fn questions_about_a_birthplace() {
    let paragraph = generator(GeneratorConfig::default())
        .generate("Al Gore was born in Washington.")
        .unwrap()
        .unwrap();

    assert_eq!(
        questions(&paragraph),
        vec![vec![
            "Who was born in Washington?",
            "Where was Al Gore born?",
            "In which location was Al Gore born?",
            "Was Al Gore born in Washington?",
        ]]
    );

    let answer = &paragraph.answers[0];
    assert_eq!(answer.subject.as_deref(), Some("Gore-2"));
    let where_ = answer
        .candidates
        .iter()
        .find(|pair| pair.question_type == QuestionType::Where)
        .unwrap();
    assert_eq!(where_.answer, "in-5 Washington-6");
    assert_eq!(where_.preposition.as_deref(), Some("in"));
}

#[test_log::test]
fn coordinated_verb_phrases_become_sentences() {
    let paragraph = generator(GeneratorConfig::default())
        .generate("John is tall and plays basketball.")
        .unwrap()
        .unwrap();

    assert_eq!(
        paragraph.sentences,
        vec![
            "John is tall and plays basketball.",
            "John plays basketball.",
            "John is tall.",
        ]
    );
    assert_eq!(paragraph.originals, 1);
    assert_eq!(paragraph.generated(), 2);
    // The coordinated sentence has no single main verb and yields nothing.
    assert_eq!(
        questions(&paragraph),
        vec![
            vec!["Who plays basketball?", "What does John play?", "Does John play basketball?"],
            vec!["Who is tall?", "Is John tall?"],
        ]
    );
}

#[test_log::test]
fn negation_decides_the_yes_no_answer() {
    let generator = generator(GeneratorConfig::default());
    let yes_no = |text: &str| {
        let paragraph = generator.generate(text).unwrap().unwrap();
        let answer = &paragraph.answers[0];
        answer
            .candidates
            .iter()
            .find(|pair| pair.is_yes_no())
            .map(|pair| (pair.answer.clone(), pair.question.clone()))
            .unwrap()
    };

    assert_eq!(
        yes_no("John did not go."),
        ("no".to_string(), Some("Did John not go?".to_string()))
    );
    assert_eq!(
        yes_no("John went."),
        ("yes".to_string(), Some("Did John go?".to_string()))
    );
}

#[test_log::test]
fn do_support_for_a_single_verb() {
    let paragraph = generator(GeneratorConfig::default())
        .generate("John saw Mary.")
        .unwrap()
        .unwrap();
    let answer = &paragraph.answers[0];

    assert_eq!(
        answer.auxiliary_sentence.as_deref(),
        Some("John-1 <focus> did see-2 Mary-3 .-4")
    );
    assert_eq!(
        answer.inverted_sentence.as_deref(),
        Some("<focus> did John-1 see-2 Mary-3 .-4")
    );
    assert_eq!(
        questions(&paragraph),
        vec![vec!["Who saw Mary?", "Who did John see?", "Did John see Mary?"]]
    );
}

#[test_log::test]
fn compression_drops_a_leading_conjunction() {
    let compressed = generator(GeneratorConfig::default())
        .generate("But John left.")
        .unwrap()
        .unwrap();
    assert_eq!(
        questions(&compressed),
        vec![vec!["Who left?", "Did John leave?"]]
    );

    let kept = generator(GeneratorConfig {
        compress: false,
        ..GeneratorConfig::default()
    })
    .generate("But John left.")
    .unwrap()
    .unwrap();
    assert_eq!(kept.answers[0].tree.as_ref().map(|tree| tree.surface()).as_deref(), Some("but-1 John-2 left-3 .-4"));
}

#[test_log::test]
fn unusable_sentences_are_skipped() {
    let generator = generator(GeneratorConfig::default());

    assert!(generator.generate("   ").unwrap().is_none());
    assert!(generator.generate("// John went.").unwrap().is_none());

    let paragraph = generator.generate("No verb. Nobody parsed this. John went.").unwrap().unwrap();
    assert_eq!(paragraph.originals, 3);
    assert_eq!(paragraph.answers.len(), 1);
    assert_eq!(paragraph.answers[0].sentence, "John went.");
}

#[test_log::test]
fn fronted_adjunct_as_the_answer() {
    let paragraph = generator(GeneratorConfig::default())
        .generate("In 2009, Jackson died.")
        .unwrap()
        .unwrap();
    let answer = &paragraph.answers[0];

    assert_eq!(
        answer.inverted_sentence.as_deref(),
        Some("in-1 2009-2 ,-3 <focus> did Jackson-4 die-5 .-6")
    );
    assert_eq!(
        questions(&paragraph),
        vec![vec![
            "In 2009, who died?",
            "When did Jackson die?",
            "In which day did Jackson die?",
            "In 2009, did Jackson die?",
        ]]
    );
}

#[test_log::test]
fn irregular_past_tense_is_reduced_to_its_lemma() {
    let paragraph = generator(GeneratorConfig::default())
        .generate("John's dog bit Mary.")
        .unwrap()
        .unwrap();

    assert_eq!(
        questions(&paragraph),
        vec![vec!["Who did John's dog bite?", "What bit Mary?", "Did John's dog bite Mary?"]]
    );
}

#[test_log::test]
fn verbs_without_a_lemma_are_skipped() {
    let paragraph = generator(GeneratorConfig::default())
        .generate("John smote Mary. John went.")
        .unwrap()
        .unwrap();

    assert_eq!(paragraph.originals, 2);
    assert_eq!(paragraph.answers.len(), 1);
    assert_eq!(paragraph.answers[0].sentence, "John went.");
}
