use std::sync::Arc;

use pretty_assertions::assert_eq;
use qgen::helpers::FixtureParser;
use qgen::{Export, Gazetteer, Generator, GeneratorConfig, Listing, Summary, VerbTable};

fn generator(workers: usize) -> Arc<Generator> {
    let parser = FixtureParser::with_trees([
        "(ROOT (S (NP (NNP John)) (VP (VBD went)) (. .)))",
        "(ROOT (S (NP (NNP Mary)) (VP (VBD left)) (. .)))",
        "(ROOT (S (NP (NNP Al) (NNP Gore)) (VP (VBD was) (VP (VBN born) (PP (IN in) (NP (NNP Washington))))) (. .)))",
    ])
    .unwrap();
    let tagger = Gazetteer::new()
        .with("John", "NEperson")
        .with("Mary", "NEperson")
        .with("Al Gore", "NEperson")
        .with("Washington", "NElocation");
    let config = GeneratorConfig {
        workers,
        ..GeneratorConfig::default()
    };
    Arc::new(Generator::new(Arc::new(parser), Arc::new(tagger), Arc::new(VerbTable::new()), config).unwrap())
}

fn corpus() -> Vec<String> {
    [
        "John went.",
        "",
        "Al Gore was born in Washington.",
        "// skipped",
        "Mary left. John went.",
        "Al Gore was born in Washington.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn batches_keep_input_order() -> testresult::TestResult {
    let paragraphs = generator(2).generate_batch(corpus()).await?;
    let texts: Vec<&str> = paragraphs.iter().map(|paragraph| paragraph.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "John went.",
            "Al Gore was born in Washington.",
            "Mary left. John went.",
            "Al Gore was born in Washington.",
        ]
    );

    let sequential: Vec<String> = corpus()
        .iter()
        .filter_map(|text| generator(1).generate(text).unwrap())
        .map(|paragraph| Listing::new(&[paragraph]).to_string())
        .collect();
    assert_eq!(Listing::new(&paragraphs).to_string().lines().count(), sequential.concat().lines().count());
    Ok(())
}

#[test_log::test(tokio::test)]
async fn reports_over_a_batch() -> testresult::TestResult {
    let paragraphs = generator(0).generate_batch(corpus()).await?;

    assert_eq!(
        Summary::of(&paragraphs),
        Summary {
            paragraphs: 4,
            original_sentences: 5,
            generated_sentences: 0,
            words: 18,
            questions: 14,
        }
    );

    let mut export = Export::new();
    export.add(&paragraphs);
    let ids: Vec<&str> = export.rows().iter().map(|row| row.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "S1", "P1", // Who went?
            "S2", "P2", // Who was born in Washington?
            "S2", "P3", // Where was Al Gore born?
            "S2", "P3", // In which location was Al Gore born?
            "S3", "P4", // Who left?
            "S1", "P1", // Who went?
            "S2", "P2",
            "S2", "P3",
            "S2", "P3",
        ]
    );
    assert_eq!(export.rows()[8].question, "Who left?");
    assert_eq!(export.rows()[9].text, "Mary");
    Ok(())
}
