//! Tree-rewriting rules and rule sets.
//!
//! A [`Rule`] pairs a [`Pattern`] with a [`RuleAction`] performed on the
//! nodes the pattern names. Applying a rule rewrites the first match that
//! still changes the tree, then matches again against the result, until
//! no match is left. A [`RuleSet`] is an ordered list of rules, loaded
//! once and shared read-only by every sentence.
//!
//! ## Rule files
//!
//! Rule files hold one pattern per line. Blank lines and lines starting
//! with `#` are ignored. Each pattern must name the node to mark `unmv`:
//!
//! ```text
//! # Prepositional phrases nested in prepositional phrases.
//! PP << PP=unmv
//! ```
//!
//! A line that does not compile is dropped with a warning. The rest of the
//! file still loads.

use std::fmt;
use std::path::Path;

use qgen_pattern::{Match, Pattern};
use qgen_tree::{Label, Mark, Tree};
use tracing::{debug, warn};

use crate::error::{QgenError, QgenResult};

/// The name rule files use for the node to mark.
pub const MARK_TARGET: &str = "unmv";

const DEFAULT_UNMOVABLE: &str = include_str!("../rules/unmovable.rules");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Add `mark` to the label of the node bound to `name`.
    Mark { name: String, mark: Mark },
    /// Remove the named nodes and everything beneath them.
    Delete(Vec<String>),
    /// Change the category of the node bound to `name`, keeping its marks.
    Relabel { name: String, category: String },
}

impl RuleAction {
    fn names(&self) -> Vec<&str> {
        match self {
            RuleAction::Mark { name, .. } | RuleAction::Relabel { name, .. } => vec![name.as_str()],
            RuleAction::Delete(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Pattern,
    action: RuleAction,
}

impl Rule {
    /// A rule whose action only names nodes the pattern binds.
    pub fn new(pattern: Pattern, action: RuleAction) -> QgenResult<Self> {
        let bound = pattern.names();
        if let Some(missing) = action.names().into_iter().find(|name| !bound.contains(name)) {
            return Err(QgenError::UnboundName {
                rule: pattern.to_string(),
                name: missing.to_string(),
            });
        }
        Ok(Rule { pattern, action })
    }

    pub fn mark(pattern: Pattern, name: &str, mark: Mark) -> QgenResult<Self> {
        Rule::new(
            pattern,
            RuleAction::Mark {
                name: name.to_string(),
                mark,
            },
        )
    }

    pub fn delete(pattern: Pattern, names: &[&str]) -> QgenResult<Self> {
        Rule::new(
            pattern,
            RuleAction::Delete(names.iter().map(|name| name.to_string()).collect()),
        )
    }

    pub fn relabel(pattern: Pattern, name: &str, category: &str) -> QgenResult<Self> {
        Rule::new(
            pattern,
            RuleAction::Relabel {
                name: name.to_string(),
                category: category.to_string(),
            },
        )
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn action(&self) -> &RuleAction {
        &self.action
    }

    /// Whether rewriting `found` would change `tree`.
    fn changes(&self, tree: &Tree, found: &Match) -> bool {
        let bound = |name: &str| found.get(name).filter(|node| tree.is_attached(*node));
        match &self.action {
            RuleAction::Mark { name, mark } => bound(name)
                .and_then(|node| tree.label(node))
                .is_some_and(|label| !label.has_mark(*mark)),
            RuleAction::Delete(names) => names.iter().any(|name| bound(name).is_some()),
            RuleAction::Relabel { name, category } => bound(name)
                .and_then(|node| tree.category(node))
                .is_some_and(|current| current != category),
        }
    }

    fn rewrite(&self, tree: &Tree, found: &Match) -> QgenResult<Tree> {
        let mut edit = tree.edit();
        match &self.action {
            RuleAction::Mark { name, mark } => {
                if let Some(node) = found.get(name) {
                    edit.mark(node, *mark)?;
                }
            }
            RuleAction::Delete(names) => {
                let nodes: Vec<_> = names.iter().filter_map(|name| found.get(name)).collect();
                edit.delete(&nodes)?;
            }
            RuleAction::Relabel { name, category } => {
                if let Some(node) = found.get(name) {
                    let label = tree
                        .label(node)
                        .map(|label| label.with_category(category.as_str()))
                        .unwrap_or_else(|| Label::new(category.as_str()));
                    edit.relabel(node, label)?;
                }
            }
        }
        Ok(edit.finish())
    }

    /// Rewrite `tree` until the pattern no longer finds anything to change.
    pub fn apply(&self, tree: &Tree) -> QgenResult<Tree> {
        let mut current = tree.clone();
        // Every rewrite marks, removes or relabels a node, so the number of
        // nodes bounds the number of useful rewrites.
        let limit = tree.nodes().len() + 1;
        for _ in 0..limit {
            let found = self
                .pattern
                .matches(&current)
                .into_iter()
                .find(|found| self.changes(&current, found));
            let Some(found) = found else {
                return Ok(current);
            };
            debug!(rule = %self, "rewriting");
            current = self.rewrite(&current, &found)?;
        }
        warn!(rule = %self, limit, "rule still matching after rewrite limit");
        Ok(current)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// A rule line that did not compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRule {
    pub line: usize,
    pub text: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    dropped: Vec<DroppedRule>,
}

impl RuleSet {
    /// A rule set from rules built in code. An empty set is a
    /// configuration error.
    pub fn new(rules: Vec<Rule>) -> QgenResult<Self> {
        if rules.is_empty() {
            return Err(QgenError::Config {
                reason: "rule set contains no rules".into(),
            });
        }
        Ok(RuleSet {
            rules,
            dropped: Vec::new(),
        })
    }

    /// Read mark-unmovable rules from rule file text.
    pub fn parse(text: &str) -> QgenResult<Self> {
        let mut rules = Vec::new();
        let mut dropped = Vec::new();

        for (offset, line) in text.lines().enumerate() {
            let line_number = offset + 1;
            let source = line.trim();
            if source.is_empty() || source.starts_with('#') {
                continue;
            }
            let rule = Pattern::parse(source)
                .map_err(|source| QgenError::PatternSyntax {
                    line: line_number,
                    source,
                })
                .and_then(|pattern| Rule::mark(pattern, MARK_TARGET, Mark::Unmovable));
            match rule {
                Ok(rule) => rules.push(rule),
                Err(err) => {
                    warn!(line = line_number, rule = source, error = %err, "dropping rule");
                    dropped.push(DroppedRule {
                        line: line_number,
                        text: source.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        if rules.is_empty() {
            return Err(QgenError::Config {
                reason: format!("no usable rules ({} dropped)", dropped.len()),
            });
        }
        debug!(rules = rules.len(), dropped = dropped.len(), "loaded rule set");
        Ok(RuleSet { rules, dropped })
    }

    /// Read a rule file.
    pub fn load(path: impl AsRef<Path>) -> QgenResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| QgenError::Config {
            reason: format!("cannot read rule file {}: {err}", path.display()),
        })?;
        RuleSet::parse(&text)
    }

    /// The unmovable rules bundled with the crate.
    pub fn unmovable_default() -> QgenResult<Self> {
        RuleSet::parse(DEFAULT_UNMOVABLE)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Lines that were dropped while loading.
    pub fn dropped(&self) -> &[DroppedRule] {
        &self.dropped
    }

    /// Apply every rule in order.
    pub fn apply(&self, tree: &Tree) -> QgenResult<Tree> {
        self.rules
            .iter()
            .try_fold(tree.clone(), |current, rule| rule.apply(&current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn tree(penn: &str) -> Tree {
        Tree::from_penn(penn).unwrap()
    }

    #[test]
    fn default_rules_all_compile() {
        let rules = RuleSet::unmovable_default().unwrap();
        assert!(rules.dropped().is_empty());
        assert_eq!(rules.len(), 10);
    }

    #[test]
    fn bad_lines_are_dropped_and_reported() {
        let rules = RuleSet::parse("# comment\n\nPP << PP=unmv\nNP < (\nNP < DT\n").unwrap();
        assert_eq!(rules.len(), 1);
        let lines: Vec<usize> = rules.dropped().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![4, 5]);
        assert!(rules.dropped()[1].reason.contains("unmv"));
    }

    #[test]
    fn empty_rule_sets_are_configuration_errors() {
        assert!(matches!(RuleSet::parse("# nothing\n"), Err(QgenError::Config { .. })));
        assert!(matches!(RuleSet::parse("NP < (\n"), Err(QgenError::Config { .. })));
        assert!(matches!(RuleSet::new(Vec::new()), Err(QgenError::Config { .. })));
    }

    #[test]
    fn marking_repeats_until_nothing_is_left() {
        let rules = RuleSet::parse("PP << PP=unmv").unwrap();
        let marked = rules
            .apply(&tree(
                "(ROOT (PP (IN in) (NP (NP (NN house)) (PP (IN of) (NP (NP (NN man)) (PP (IN in) (NP (NN town))))))))",
            ))
            .unwrap();
        assert_eq!(
            marked.to_string(),
            "(ROOT (PP (IN in-1) (NP (NP (NN house-2)) (UNMV-PP (IN of-3) (NP (NP (NN man-4)) (UNMV-PP (IN in-5) (NP (NN town-6))))))))"
        );
    }

    #[test]
    fn delete_and_relabel_actions() {
        let source = tree("(ROOT (S (CC And) (NP (NNP John)) (VP (VBD left))))");
        let delete = Rule::delete(Pattern::parse("S < CC=conj").unwrap(), &["conj"]).unwrap();
        assert_eq!(delete.apply(&source).unwrap().render(), "John left");

        let relabel = Rule::relabel(Pattern::parse("ROOT < S=clause").unwrap(), "clause", "SQ").unwrap();
        let relabeled = relabel.apply(&source).unwrap();
        assert!(relabeled.to_string().starts_with("(ROOT (SQ "));
    }

    #[test]
    fn actions_must_name_bound_nodes() {
        let pattern = Pattern::parse("NP !< DT=det").unwrap();
        assert!(matches!(
            Rule::delete(pattern, &["det"]),
            Err(QgenError::UnboundName { .. })
        ));
    }

    #[test]
    fn loads_rule_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NP=unmv < EX").unwrap();
        let rules = RuleSet::load(file.path()).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(matches!(
            RuleSet::load(file.path().with_extension("missing")),
            Err(QgenError::Config { .. })
        ));
    }
}
