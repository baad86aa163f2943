//! The unifying matcher.
//!
//! Matching tries the root pattern at every node of the tree in preorder.
//! At a node, each constraint in turn narrows a list of partial binding
//! sets; a relation tries every node standing in that relation to the
//! current one. A name that is already bound must bind the same node
//! again, which lets one pattern refer back to a node it named earlier.

use std::collections::{BTreeMap, HashMap};

use qgen_tree::{NodeId, Tree};

use crate::pattern::{Constraint, NodePattern, Pattern, Relation, RelationKind};

type Bindings = BTreeMap<String, NodeId>;

/// One way a pattern matched a tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    root: NodeId,
    bindings: Bindings,
}

impl Match {
    /// The node the pattern's root matched.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node bound to `name`, if the match bound it.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.bindings.get(name).copied()
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.bindings.iter().map(|(name, node)| (name.as_str(), *node))
    }
}

struct Matcher<'t> {
    tree: &'t Tree,
    /// First and last word position under each node that has words.
    spans: HashMap<NodeId, (usize, usize)>,
}

impl<'t> Matcher<'t> {
    fn new(tree: &'t Tree) -> Self {
        let positions: HashMap<NodeId, usize> = tree
            .leaves(tree.root())
            .into_iter()
            .enumerate()
            .map(|(position, leaf)| (leaf, position))
            .collect();
        let spans = tree
            .nodes()
            .into_iter()
            .filter_map(|node| {
                let leaves = tree.leaves(node);
                let first = positions.get(leaves.first()?)?;
                let last = positions.get(leaves.last()?)?;
                Some((node, (*first, *last)))
            })
            .collect();
        Matcher { tree, spans }
    }

    fn sisters(&self, node: NodeId) -> (&'t [NodeId], usize) {
        let tree = self.tree;
        match (tree.parent(node), tree.child_position(node)) {
            (Some(parent), Some(position)) => (tree.children(parent), position),
            _ => (&[], 0),
        }
    }

    fn by_span(&self, keep: impl Fn((usize, usize)) -> bool) -> Vec<NodeId> {
        self.tree
            .nodes()
            .into_iter()
            .filter(|node| self.spans.get(node).is_some_and(|span| keep(*span)))
            .collect()
    }

    /// Every node standing in `kind` to `node`.
    fn related(&self, kind: RelationKind, node: NodeId) -> Vec<NodeId> {
        let tree = self.tree;
        match kind {
            RelationKind::ParentOf => tree.children(node).to_vec(),
            RelationKind::ChildOf => tree.parent(node).into_iter().collect(),
            RelationKind::Dominates => tree.preorder(node).into_iter().skip(1).collect(),
            RelationKind::DominatedBy => tree.ancestors(node).collect(),
            RelationKind::HasNthChild(n) => nth(tree.children(node), n).into_iter().collect(),
            RelationKind::NthChildOf(n) => tree
                .parent(node)
                .filter(|parent| nth(tree.children(*parent), n) == Some(node))
                .into_iter()
                .collect(),
            RelationKind::HasOnlyChild => match tree.children(node) {
                [only] => vec![*only],
                _ => Vec::new(),
            },
            RelationKind::SisterOf => {
                let (sisters, _) = self.sisters(node);
                sisters.iter().copied().filter(|s| *s != node).collect()
            }
            RelationKind::LeftSisterOf => {
                let (sisters, position) = self.sisters(node);
                sisters.iter().skip(position + 1).copied().collect()
            }
            RelationKind::RightSisterOf => {
                let (sisters, position) = self.sisters(node);
                sisters.iter().take(position).copied().collect()
            }
            RelationKind::ImmediateLeftSisterOf => {
                let (sisters, position) = self.sisters(node);
                sisters.get(position + 1).copied().into_iter().collect()
            }
            RelationKind::ImmediateRightSisterOf => {
                let (sisters, position) = self.sisters(node);
                position
                    .checked_sub(1)
                    .and_then(|previous| sisters.get(previous).copied())
                    .into_iter()
                    .collect()
            }
            RelationKind::Precedes
            | RelationKind::ImmediatelyPrecedes
            | RelationKind::Follows
            | RelationKind::ImmediatelyFollows => {
                let Some(&(first, last)) = self.spans.get(&node) else {
                    return Vec::new();
                };
                match kind {
                    RelationKind::Precedes => self.by_span(|(start, _)| start > last),
                    RelationKind::ImmediatelyPrecedes => self.by_span(|(start, _)| start == last + 1),
                    RelationKind::Follows => self.by_span(|(_, end)| end < first),
                    _ => self.by_span(|(_, end)| end + 1 == first),
                }
            }
        }
    }

    fn match_node(&self, pattern: &NodePattern, node: NodeId, bindings: &Bindings) -> Vec<Bindings> {
        if !pattern.label.accepts(&self.tree.value(node)) {
            return Vec::new();
        }
        let mut start = bindings.clone();
        if let Some(name) = &pattern.name {
            match start.get(name) {
                Some(bound) if *bound != node => return Vec::new(),
                Some(_) => {}
                None => {
                    start.insert(name.clone(), node);
                }
            }
        }
        self.satisfy_all(&pattern.constraints, node, vec![start])
    }

    fn satisfy_all(&self, constraints: &[Constraint], node: NodeId, mut states: Vec<Bindings>) -> Vec<Bindings> {
        for constraint in constraints {
            states = states
                .iter()
                .flat_map(|bindings| self.satisfy(constraint, node, bindings))
                .collect();
            if states.is_empty() {
                break;
            }
        }
        states
    }

    fn satisfy(&self, constraint: &Constraint, node: NodeId, bindings: &Bindings) -> Vec<Bindings> {
        match constraint {
            Constraint::Relation(relation) => self.satisfy_relation(relation, node, bindings),
            Constraint::AnyOf(groups) => groups
                .iter()
                .flat_map(|group| self.satisfy_all(group, node, vec![bindings.clone()]))
                .collect(),
        }
    }

    fn satisfy_relation(&self, relation: &Relation, node: NodeId, bindings: &Bindings) -> Vec<Bindings> {
        let mut found = Vec::new();
        for candidate in self.related(relation.kind, node) {
            found.extend(self.match_node(&relation.target, candidate, bindings));
            if relation.negated && !found.is_empty() {
                return Vec::new();
            }
        }
        if relation.negated || (relation.optional && found.is_empty()) {
            vec![bindings.clone()]
        } else {
            found
        }
    }
}

fn nth(children: &[NodeId], n: i32) -> Option<NodeId> {
    let len = children.len() as i64;
    let position = match n {
        n if n > 0 => i64::from(n) - 1,
        n if n < 0 => len + i64::from(n),
        _ => return None,
    };
    usize::try_from(position).ok().and_then(|p| children.get(p).copied())
}

impl Pattern {
    /// Every distinct match, ordered by the preorder position of the root
    /// node and then by bindings.
    pub fn matches(&self, tree: &Tree) -> Vec<Match> {
        let matcher = Matcher::new(tree);
        let mut matches = Vec::new();
        for node in tree.nodes() {
            let mut here: Vec<Match> = matcher
                .match_node(self.root(), node, &Bindings::new())
                .into_iter()
                .map(|bindings| Match { root: node, bindings })
                .collect();
            here.sort();
            here.dedup();
            matches.extend(here);
        }
        matches
    }

    /// The first match in preorder.
    pub fn find(&self, tree: &Tree) -> Option<Match> {
        let matcher = Matcher::new(tree);
        tree.nodes().into_iter().find_map(|node| {
            matcher
                .match_node(self.root(), node, &Bindings::new())
                .into_iter()
                .next()
                .map(|bindings| Match { root: node, bindings })
        })
    }

    pub fn is_match(&self, tree: &Tree) -> bool {
        self.find(tree).is_some()
    }
}
