//! The whole pipeline, from paragraphs to questions.

use std::sync::Arc;

use qgen_tree::Tree;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::answer::TreeAnswer;
use crate::assemble::QuestionAssembler;
use crate::breaker::SentenceBreaker;
use crate::capability::{Lexicon, Parser, Tagger};
use crate::compress::TreeCompressor;
use crate::config::GeneratorConfig;
use crate::error::{QgenError, QgenResult};
use crate::phrase::AnswerPhraseExtractor;
use crate::rules::RuleSet;
use crate::term::{Term, TermExtractor};
use crate::unmovable::UnmovableMarker;
use crate::verb::VerbDecomposer;

/// One input paragraph after generation.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub text: String,
    /// Sentences of the paragraph as written.
    pub originals: usize,
    /// Every sentence after breaking, originals included.
    pub sentences: Vec<String>,
    /// The sentences questions could be generated for.
    pub answers: Vec<TreeAnswer>,
}

impl Paragraph {
    /// Sentences added by breaking.
    pub fn generated(&self) -> usize {
        self.sentences.len().saturating_sub(self.originals)
    }
}

/// Generates questions with a parser, a tagger and a lexicon.
///
/// Rules and patterns are compiled once when the generator is built.
/// Generating only reads shared state, so one generator can serve a whole
/// batch.
pub struct Generator {
    parser: Arc<dyn Parser>,
    tagger: Arc<dyn Tagger>,
    config: GeneratorConfig,
    rules: RuleSet,
    breaker: SentenceBreaker,
    compressor: TreeCompressor,
    decomposer: VerbDecomposer,
    terms: TermExtractor,
    extractor: AnswerPhraseExtractor,
    assembler: QuestionAssembler,
}

impl Generator {
    pub fn new(
        parser: Arc<dyn Parser>,
        tagger: Arc<dyn Tagger>,
        lexicon: Arc<dyn Lexicon>,
        config: GeneratorConfig,
    ) -> QgenResult<Self> {
        let rules = match &config.rules {
            Some(path) => RuleSet::load(path)?,
            None => RuleSet::unmovable_default()?,
        };
        info!(rules = rules.len(), dropped = rules.dropped().len(), "loaded unmovable rules");
        Ok(Generator {
            breaker: SentenceBreaker::new(Arc::clone(&parser))?,
            parser,
            tagger,
            rules,
            compressor: TreeCompressor::new()?,
            decomposer: VerbDecomposer::new(lexicon)?,
            terms: TermExtractor::new(),
            extractor: AnswerPhraseExtractor::new(config.unmapped_entities)?,
            assembler: QuestionAssembler::new(),
            config,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Questions for one paragraph. Blank paragraphs and paragraphs
    /// starting with `//` are skipped.
    pub fn generate(&self, text: &str) -> QgenResult<Option<Paragraph>> {
        let text = text.trim();
        if text.is_empty() || text.starts_with("//") {
            return Ok(None);
        }

        let originals = self.parser.split(text).len();
        let sentences = self.parser.split(&self.breaker.break_text(text));
        let mut answers = Vec::new();
        for sentence in &sentences {
            match self.answer(sentence) {
                Ok(answer) => answers.push(answer),
                Err(err @ (QgenError::NoVerbFound | QgenError::NoLemma { .. })) => {
                    debug!(%sentence, error = %err, "no questions for sentence");
                }
                Err(err) => warn!(%sentence, error = %err, "skipping sentence"),
            }
        }

        Ok(Some(Paragraph {
            text: text.to_string(),
            originals,
            sentences,
            answers,
        }))
    }

    /// Every stage for one sentence.
    pub fn answer(&self, sentence: &str) -> QgenResult<TreeAnswer> {
        let tree = self.parser.parse(sentence)?;
        let tokens: Vec<String> = tree
            .tokens(tree.root())
            .into_iter()
            .map(|token| token.text.clone())
            .collect();
        let entities = self.tagger.tag(&tokens)?;
        let terms = self.terms.extract(&tokens, &entities);

        let tree = if self.config.normalize_first_word {
            normalize_first_word(&tree, &terms)?
        } else {
            tree
        };
        let tree = if self.config.compress {
            self.compressor.compress(&tree)?
        } else {
            tree
        };

        let mut answer = TreeAnswer::new(sentence, terms, tree);
        if let Some(tree) = answer.tree.as_ref() {
            answer.unmovable_tree = Some(UnmovableMarker::new(&self.rules).mark(tree)?);
            answer.subject = self.extractor.subject(tree);
        }
        self.decomposer.decompose(&mut answer)?;
        answer.candidates = self.extractor.extract(&answer);
        self.assembler.assemble(&mut answer);
        debug!(%sentence, questions = answer.questions().count(), "generated");
        Ok(answer)
    }

    /// Questions for many paragraphs, at most `workers` at a time. Results
    /// come back in input order, skipped paragraphs left out.
    pub async fn generate_batch(self: &Arc<Self>, paragraphs: Vec<String>) -> QgenResult<Vec<Paragraph>> {
        let semaphore = Arc::new(Semaphore::new(self.config.effective_workers().max(1)));
        let mut set = JoinSet::new();

        for (position, text) in paragraphs.into_iter().enumerate() {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|err| QgenError::Worker {
                    reason: err.to_string(),
                })?;
            let generator = Arc::clone(self);
            set.spawn_blocking(move || {
                let _permit = permit;
                (position, generator.generate(&text))
            });
        }

        let mut done = Vec::new();
        while let Some(joined) = set.join_next().await {
            let (position, generated) = joined.map_err(|err| QgenError::Worker {
                reason: err.to_string(),
            })?;
            done.push((position, generated?));
        }
        done.sort_by_key(|(position, _)| *position);
        Ok(done.into_iter().filter_map(|(_, paragraph)| paragraph).collect())
    }
}

/// Lowercase the sentence's first word unless an entity starts there or
/// the word is written in capitals.
fn normalize_first_word(tree: &Tree, terms: &[Term]) -> QgenResult<Tree> {
    let Some(&first) = tree.leaves(tree.root()).first() else {
        return Ok(tree.clone());
    };
    let Some(word) = tree.token(first).map(|token| token.text.clone()) else {
        return Ok(tree.clone());
    };
    let in_entity = terms.iter().any(|term| term.is_entity() && term.covers(0));
    let lowered = word.to_lowercase();
    if in_entity || word.to_uppercase() == word || lowered == word {
        return Ok(tree.clone());
    }
    let mut edit = tree.edit();
    edit.set_word(first, lowered)?;
    Ok(edit.finish())
}
