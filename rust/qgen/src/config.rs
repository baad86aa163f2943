//! Generator configuration, read from JSON.

use std::path::{Path, PathBuf};
use std::thread;

use serde::{Deserialize, Serialize};

use crate::error::{QgenError, QgenResult};

/// What happens to an answer tagged with an entity type the question
/// table has no entry for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedEntities {
    /// No candidate is produced for that type.
    #[default]
    Drop,
    /// The candidate asks a plain `what` question.
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub unmapped_entities: UnmappedEntities,
    /// Drop sentence-initial conjunctions and appositives before marking.
    pub compress: bool,
    /// Lowercase the first word of a sentence unless it is part of an
    /// entity or written in capitals.
    pub normalize_first_word: bool,
    /// Sentences processed at once by a batch. `0` uses the available
    /// parallelism.
    pub workers: usize,
    /// Unmovable rule file. The embedded rules are used when absent.
    pub rules: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            unmapped_entities: UnmappedEntities::Drop,
            compress: true,
            normalize_first_word: true,
            workers: 0,
            rules: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> QgenResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> QgenResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| QgenError::Config {
            reason: format!("reading {}: {err}", path.display()),
        })?;
        Self::from_json(&json)
    }

    /// The number of batch workers, with `0` resolved.
    pub fn effective_workers(&self) -> usize {
        match self.workers {
            0 => thread::available_parallelism().map_or(1, |count| count.get()),
            count => count,
        }
    }
}
