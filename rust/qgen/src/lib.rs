//! # qgen
//!
//! Rule-driven question generation. Declarative sentences are parsed into
//! constituency trees, rewritten step by step, and turned into the
//! questions they answer:
//!
//! ```text
//! paragraph
//!   │  SentenceBreaker        appositives, relative clauses, coordination
//!   ▼
//! sentences ── Parser ──► Tree ── Tagger ──► terms
//!   │  TreeCompressor         leading conjunctions, appositives
//!   │  UnmovableMarker        UNMV- on phrases that cannot be asked about
//!   │  VerbDecomposer         auxiliary tree, inverted tree
//!   │  AnswerPhraseExtractor  answer candidates with question phrases
//!   ▼  QuestionAssembler
//! "Where was Al Gore born?"
//! ```
//!
//! Parsing, tagging and lemmatization are supplied through the
//! [`Parser`], [`Tagger`] and [`Lexicon`] traits. A list-based
//! [`Gazetteer`] and a table-based [`VerbTable`] are bundled.
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "helpers")]
//! # fn main() -> Result<(), qgen::QgenError> {
//! use std::sync::Arc;
//!
//! use qgen::helpers::FixtureParser;
//! use qgen::{Gazetteer, Generator, GeneratorConfig, VerbTable};
//!
//! let parser = FixtureParser::with_trees([
//!     "(ROOT (S (NP (NNP Al) (NNP Gore)) (VP (VBD was) (VP (VBN born) (PP (IN in) (NP (NNP Washington))))) (. .)))",
//! ])?;
//! let tagger = Gazetteer::new()
//!     .with("Al Gore", "NEperson")
//!     .with("Washington", "NElocation");
//! let generator = Generator::new(
//!     Arc::new(parser),
//!     Arc::new(tagger),
//!     Arc::new(VerbTable::new()),
//!     GeneratorConfig::default(),
//! )?;
//!
//! let paragraph = generator.generate("Al Gore was born in Washington.")?.unwrap();
//! let questions: Vec<&str> = paragraph.answers[0].questions().map(|(question, _)| question).collect();
//! assert!(questions.contains(&"Where was Al Gore born?"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "helpers"))]
//! # fn main() {}
//! ```

pub mod answer;
pub mod assemble;
pub mod breaker;
pub mod capability;
pub mod compress;
pub mod config;
pub mod error;
pub mod gazetteer;
pub mod generator;
pub mod lexicon;
pub mod phrase;
pub mod question;
pub mod report;
pub mod rules;
pub mod surface;
pub mod term;
pub mod unmovable;
pub mod verb;

#[cfg(feature = "helpers")]
pub mod helpers;

pub use answer::{QaPhrasePair, TreeAnswer};
pub use assemble::QuestionAssembler;
pub use breaker::SentenceBreaker;
pub use capability::{EntityMap, EntityType, Lexicon, Parser, PartOfSpeech, Span, Tagger};
pub use compress::TreeCompressor;
pub use config::{GeneratorConfig, UnmappedEntities};
pub use error::{QgenError, QgenResult};
pub use gazetteer::Gazetteer;
pub use generator::{Generator, Paragraph};
pub use lexicon::VerbTable;
pub use phrase::AnswerPhraseExtractor;
pub use question::QuestionType;
pub use report::{Export, ExportRow, Listing, Summary};
pub use rules::{Rule, RuleAction, RuleSet};
pub use term::{Term, TermExtractor, TermKind};
pub use unmovable::UnmovableMarker;
pub use verb::{VerbDecomposer, VerbState};
