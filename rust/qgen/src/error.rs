//! Error types for question generation.

use qgen_pattern::PatternError;
use qgen_tree::TreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QgenError {
    /// The rule set or configuration cannot be used. Fatal for a run.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// One rule failed to compile and was left out of its rule set.
    #[error("rule on line {line} does not compile: {source}")]
    PatternSyntax {
        line: usize,
        #[source]
        source: PatternError,
    },

    /// A rule names a node its pattern never binds.
    #[error("rule `{rule}` does not bind a node named `{name}`")]
    UnboundName { rule: String, name: String },

    #[error("no main verb found in clause")]
    NoVerbFound,

    #[error("no lemma for verb '{word}' ({tag})")]
    NoLemma { word: String, tag: String },

    #[error("could not parse sentence {sentence:?}: {reason}")]
    Parse { sentence: String, reason: String },

    #[error("could not tag sentence: {reason}")]
    Tag { reason: String },

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),

    #[error("worker failed: {reason}")]
    Worker { reason: String },
}

impl QgenError {
    /// Whether the error stops a whole run rather than one sentence.
    pub fn is_fatal(&self) -> bool {
        matches!(self, QgenError::Config { .. } | QgenError::Worker { .. })
    }
}

impl From<serde_json::Error> for QgenError {
    fn from(err: serde_json::Error) -> Self {
        QgenError::Config {
            reason: err.to_string(),
        }
    }
}

pub type QgenResult<T> = Result<T, QgenError>;
