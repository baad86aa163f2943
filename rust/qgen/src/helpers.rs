//! Testing utilities: a [`Parser`] backed by hand-written trees.
//!
//! ```
//! use qgen::capability::Parser;
//! use qgen::helpers::FixtureParser;
//!
//! let mut parser = FixtureParser::new();
//! parser
//!     .register("(ROOT (S (NP (NNP John)) (VP (VBD went)) (. .)))")
//!     .unwrap();
//! let tree = parser.parse("John went.").unwrap();
//! assert_eq!(tree.surface(), "John-1 went-2 .-3");
//! ```

use std::collections::HashMap;

use qgen_tree::Tree;

use crate::capability::Parser;
use crate::error::{QgenError, QgenResult};

/// Looks sentences up among registered trees.
///
/// A sentence finds its tree when its characters, ignoring whitespace,
/// equal the tree's words. `John saw Mary.` finds the tree whose words
/// are `John saw Mary .`.
#[derive(Debug, Clone, Default)]
pub struct FixtureParser {
    trees: HashMap<String, Tree>,
}

fn key(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

impl FixtureParser {
    pub fn new() -> Self {
        FixtureParser::default()
    }

    /// Register a bracketed tree under the text of its words.
    pub fn register(&mut self, penn: &str) -> QgenResult<&mut Self> {
        let tree = Tree::from_penn(penn)?;
        self.trees.insert(key(&tree.render()), tree);
        Ok(self)
    }

    /// Register several bracketed trees.
    pub fn with_trees<'a>(trees: impl IntoIterator<Item = &'a str>) -> QgenResult<Self> {
        let mut parser = FixtureParser::new();
        for penn in trees {
            parser.register(penn)?;
        }
        Ok(parser)
    }
}

impl Parser for FixtureParser {
    /// Splits after `.`, `?` or `!` when whitespace follows.
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            current.push(ch);
            let boundary = matches!(ch, '.' | '?' | '!')
                && chars.peek().is_none_or(|next| next.is_whitespace());
            if boundary {
                let sentence = current.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                current.clear();
            }
        }
        let rest = current.trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences
    }

    fn parse(&self, sentence: &str) -> QgenResult<Tree> {
        self.trees
            .get(&key(sentence))
            .cloned()
            .ok_or_else(|| QgenError::Parse {
                sentence: sentence.to_string(),
                reason: "no fixture tree registered".into(),
            })
    }
}
