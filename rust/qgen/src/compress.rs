//! Sentence compression.
//!
//! Two deletions, in order: a coordinating conjunction opening the root
//! clause, then appositives (a phrase between two commas with no
//! coordinator among its sisters). The pair is repeated until neither
//! changes the tree, so compressing twice changes nothing.

use qgen_pattern::Pattern;
use qgen_tree::Tree;
use tracing::debug;

use crate::error::QgenResult;
use crate::rules::{Rule, RuleSet};

const LEADING_CONJUNCTION: &str = "ROOT < (S <, CC=conj)";
const APPOSITIVE: &str = "SBAR|VP|NP=app $, /,/=lead $. /,/=trail !$ CC !$ CONJP";

#[derive(Debug, Clone)]
pub struct TreeCompressor {
    rules: RuleSet,
}

impl TreeCompressor {
    pub fn new() -> QgenResult<Self> {
        let rules = vec![
            Rule::delete(Pattern::parse(LEADING_CONJUNCTION)?, &["conj"])?,
            Rule::delete(Pattern::parse(APPOSITIVE)?, &["lead", "app", "trail"])?,
        ];
        Ok(TreeCompressor {
            rules: RuleSet::new(rules)?,
        })
    }

    /// A compressed copy of `tree`.
    pub fn compress(&self, tree: &Tree) -> QgenResult<Tree> {
        let mut current = tree.clone();
        loop {
            let next = self.rules.apply(&current)?;
            if next == current {
                return Ok(current);
            }
            debug!(before = %current, after = %next, "compressed");
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compress(penn: &str) -> Tree {
        TreeCompressor::new()
            .unwrap()
            .compress(&Tree::from_penn(penn).unwrap())
            .unwrap()
    }

    #[test]
    fn drops_a_leading_conjunction() {
        let tree = compress("(ROOT (S (CC But) (NP (NNP John)) (VP (VBD left)) (. .)))");
        assert_eq!(tree.to_string(), "(ROOT (S (NP (NNP John-2)) (VP (VBD left-3)) (. .-4)))");
    }

    #[test]
    fn drops_appositives() {
        let tree = compress(
            "(ROOT (S (NP (NP (NNP Gore)) (, ,) (NP (DT the) (NN candidate)) (, ,)) (VP (VBD spoke)) (. .)))",
        );
        assert_eq!(tree.render(), "Gore spoke .");
        assert_eq!(tree.leaf_indices(), vec![1, 6, 7]);
    }

    #[test]
    fn keeps_coordinated_lists() {
        let penn = "(ROOT (S (NP (NP (NNP Al)) (, ,) (NP (NNP Bo)) (, ,) (CC and) (NP (NNP Cy))) (VP (VBD met)) (. .)))";
        assert_eq!(compress(penn), Tree::from_penn(penn).unwrap());
    }

    #[test]
    fn compressing_twice_changes_nothing() {
        let once = compress("(ROOT (S (CC And) (NP (NNP Al) (, ,) (NP (NN chief)) (, ,)) (VP (VBD won))))");
        let compressor = TreeCompressor::new().unwrap();
        assert_eq!(compressor.compress(&once).unwrap(), once);
    }
}
