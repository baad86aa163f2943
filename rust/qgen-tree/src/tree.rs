//! The constituency tree value.
//!
//! A [`Tree`] is an arena of nodes addressed by [`NodeId`]. Cloning a tree
//! copies the arena, so an id obtained from one tree addresses the same
//! node in every copy of it. Edits (see [`crate::edit`]) always work on such
//! a copy; a tree handed to another stage is never changed in place.
//!
//! Nodes detached by an edit stay in the arena but are no longer reachable
//! from the root. Every traversal, rendering and comparison starts at the
//! root, so detached nodes are invisible.

use std::fmt;

use crate::text::{restore_brackets, strip_indices};
use crate::{Label, Mark, Token};

/// Address of a node inside a [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An internal node: a phrase or a part-of-speech tag.
    Phrase(Label),
    /// A word.
    Leaf(Token),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A rooted, ordered, labeled tree whose leaves are indexed tokens.
#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl Tree {
    /// A tree consisting of a single leaf.
    pub fn leaf(token: Token) -> Self {
        Tree {
            nodes: vec![Node {
                kind: NodeKind::Leaf(token),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// A phrase node over the given subtrees.
    pub fn phrase(label: Label, children: Vec<Tree>) -> Self {
        let mut tree = Tree {
            nodes: vec![Node {
                kind: NodeKind::Phrase(label),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        };
        for child in &children {
            let id = tree.graft(child);
            tree.nodes[id.0].parent = Some(tree.root);
            tree.nodes[tree.root.0].children.push(id);
        }
        tree
    }

    /// A part-of-speech node over one word, e.g. `(VBZ does)`.
    pub fn preterminal(label: Label, token: Token) -> Self {
        Tree::phrase(label, vec![Tree::leaf(token)])
    }

    pub(crate) fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Copy the subtree of `other` rooted at `from` into this arena. The
    /// copy is detached; its new root id is returned together with a map
    /// from `other`'s ids to the new ones.
    pub(crate) fn graft_mapped(&mut self, other: &Tree, from: NodeId) -> (NodeId, Vec<Option<NodeId>>) {
        let mut mapping = vec![None; other.nodes.len()];
        let root = self.push(other.kind(from).clone());
        mapping[from.0] = Some(root);
        for old in other.preorder(from).into_iter().skip(1) {
            let new = self.push(other.kind(old).clone());
            mapping[old.0] = Some(new);
            if let Some(parent) = other.parent(old).and_then(|p| mapping[p.0]) {
                self.nodes[new.0].parent = Some(parent);
                self.nodes[parent.0].children.push(new);
            }
        }
        (root, mapping)
    }

    pub(crate) fn graft(&mut self, other: &Tree) -> NodeId {
        self.graft_mapped(other, other.root).0
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether `id` was allocated by this tree's arena.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// The contents of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this tree or one of its copies.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn label(&self, id: NodeId) -> Option<&Label> {
        match self.kind(id) {
            NodeKind::Phrase(label) => Some(label),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn token(&self, id: NodeId) -> Option<&Token> {
        match self.kind(id) {
            NodeKind::Leaf(token) => Some(token),
            NodeKind::Phrase(_) => None,
        }
    }

    /// The syntactic category of a phrase node.
    pub fn category(&self, id: NodeId) -> Option<&str> {
        self.label(id).map(|label| label.category.as_str())
    }

    /// The string patterns are matched against: the written label of a
    /// phrase, or the bare word of a leaf.
    pub fn value(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Phrase(label) => label.to_string(),
            NodeKind::Leaf(token) => token.text.clone(),
        }
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Leaf(_))
    }

    /// A tag node directly above a single word.
    pub fn is_preterminal(&self, id: NodeId) -> bool {
        let children = self.children(id);
        !self.is_leaf(id) && children.len() == 1 && self.is_leaf(children[0])
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Position of `id` among its parent's children.
    pub fn child_position(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    /// The sister immediately to the right of `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let position = self.child_position(id)?;
        self.children(parent).get(position + 1).copied()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// `id` and every node beneath it, in preorder.
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        order
    }

    /// Every node reachable from the root, in preorder.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.preorder(self.root)
    }

    /// Whether `ancestor` properly dominates `node`.
    pub fn dominates(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.dominates(self.root, id)
    }

    /// The leaf nodes under `id`, left to right.
    pub fn leaves(&self, id: NodeId) -> Vec<NodeId> {
        self.preorder(id)
            .into_iter()
            .filter(|node| self.is_leaf(*node))
            .collect()
    }

    pub fn tokens(&self, id: NodeId) -> Vec<&Token> {
        self.leaves(id)
            .into_iter()
            .filter_map(|leaf| self.token(leaf))
            .collect()
    }

    /// Indices of every parsed leaf in the tree, left to right.
    pub fn leaf_indices(&self) -> Vec<usize> {
        self.tokens(self.root)
            .into_iter()
            .filter_map(|token| token.index)
            .collect()
    }

    /// Words under `id` with their indices: `Al-1 Gore-2`.
    pub fn indexed_text(&self, id: NodeId) -> String {
        self.tokens(id)
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Words under `id` without indices: `Al Gore`.
    pub fn plain_text(&self, id: NodeId) -> String {
        self.tokens(id)
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Words under `id` without indices or spaces: `AlGore`.
    pub fn tight_text(&self, id: NodeId) -> String {
        self.tokens(id)
            .iter()
            .map(|token| token.text.as_str())
            .collect()
    }

    /// The indexed words of the whole tree.
    pub fn surface(&self) -> String {
        self.indexed_text(self.root)
    }

    /// The words of the whole tree as they would be read: indices removed
    /// and bracket escapes restored.
    pub fn render(&self) -> String {
        restore_brackets(&strip_indices(&self.surface()))
    }

    /// Whether `id` or anything beneath it carries `mark`.
    pub fn has_mark_within(&self, id: NodeId, mark: Mark) -> bool {
        self.preorder(id)
            .into_iter()
            .any(|node| self.label(node).is_some_and(|label| label.has_mark(mark)))
    }

    /// Whether `id` or anything beneath it has a category containing `needle`.
    pub fn has_category_within(&self, id: NodeId, needle: &str) -> bool {
        self.preorder(id)
            .into_iter()
            .any(|node| self.category(node).is_some_and(|category| category.contains(needle)))
    }

    /// A standalone copy of the subtree rooted at `id`.
    pub fn subtree(&self, id: NodeId) -> Tree {
        let mut copy = Tree {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        copy.root = copy.graft_mapped(self, id).0;
        copy
    }

    fn write_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind(id) {
            NodeKind::Leaf(token) => write!(f, "{token}"),
            NodeKind::Phrase(label) => {
                write!(f, "({label}")?;
                for child in self.children(id) {
                    f.write_str(" ")?;
                    self.write_node(*child, f)?;
                }
                f.write_str(")")
            }
        }
    }

    fn same_structure(&self, id: NodeId, other: &Tree, other_id: NodeId) -> bool {
        let (mine, theirs) = (self.children(id), other.children(other_id));
        self.kind(id) == other.kind(other_id)
            && mine.len() == theirs.len()
            && mine
                .iter()
                .zip(theirs)
                .all(|(a, b)| self.same_structure(*a, other, *b))
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.same_structure(self.root, other, other.root)
    }
}

impl Eq for Tree {}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(self.root, f)
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
