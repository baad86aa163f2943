//! Structural edits over a private copy of a tree.
//!
//! [`Tree::edit`] clones the tree into an [`Edit`]; every operation then
//! changes only that copy, and [`Edit::finish`] hands back the result. Node
//! ids from the source tree stay valid throughout, so matches found on the
//! source can drive the edit.

use crate::error::TreeError;
use crate::tree::{NodeId, NodeKind, Tree};
use crate::{Label, Mark};

/// Where a node lands when moved or inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    FirstChild(NodeId),
    LastChild(NodeId),
    /// Immediately left of the given node.
    Before(NodeId),
    /// Immediately right of the given node.
    After(NodeId),
}

/// An auxiliary tree for adjunction: the node at `foot` is replaced by the
/// adjunction site.
#[derive(Debug, Clone)]
pub struct Auxiliary {
    pub tree: Tree,
    pub foot: NodeId,
}

pub struct Edit {
    tree: Tree,
}

impl Tree {
    /// Start editing a copy of this tree.
    pub fn edit(&self) -> Edit {
        Edit { tree: self.clone() }
    }
}

impl Edit {
    /// The tree as edited so far.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn finish(self) -> Tree {
        self.tree
    }

    fn check(&self, node: NodeId) -> Result<(), TreeError> {
        if self.tree.contains(node) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(node))
        }
    }

    fn phrase_label(&mut self, node: NodeId) -> Result<&mut Label, TreeError> {
        self.check(node)?;
        match &mut self.tree.nodes[node.0].kind {
            NodeKind::Phrase(label) => Ok(label),
            NodeKind::Leaf(token) => Err(TreeError::Expected {
                expected: "phrase node".into(),
                found: format!("leaf {token}"),
                offset: node.0,
            }),
        }
    }

    /// Replace the label of a phrase node.
    pub fn relabel(&mut self, node: NodeId, label: Label) -> Result<(), TreeError> {
        *self.phrase_label(node)? = label;
        Ok(())
    }

    /// Add a mark to a phrase node's label.
    pub fn mark(&mut self, node: NodeId, mark: Mark) -> Result<(), TreeError> {
        let label = self.phrase_label(node)?;
        *label = label.with_mark(mark);
        Ok(())
    }

    /// Change the word of a leaf, or of the single leaf under a
    /// preterminal. The leaf keeps its index.
    pub fn set_word(&mut self, node: NodeId, text: impl Into<String>) -> Result<(), TreeError> {
        self.check(node)?;
        let leaf = if self.tree.is_preterminal(node) {
            self.tree.children(node)[0]
        } else {
            node
        };
        match &mut self.tree.nodes[leaf.0].kind {
            NodeKind::Leaf(token) => {
                token.text = text.into();
                Ok(())
            }
            NodeKind::Phrase(label) => Err(TreeError::Expected {
                expected: "leaf or preterminal".into(),
                found: label.to_string(),
                offset: node.0,
            }),
        }
    }

    fn detach(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.check(node)?;
        let parent = self.tree.parent(node).ok_or(TreeError::RootEdit {
            operation: "detach",
        })?;
        self.tree.nodes[parent.0].children.retain(|child| *child != node);
        self.tree.nodes[node.0].parent = None;
        Ok(())
    }

    /// Resolve a position to a parent and an insertion offset.
    fn resolve(&self, at: Position) -> Result<(NodeId, usize), TreeError> {
        let sibling_slot = |sibling: NodeId, after: usize| -> Result<(NodeId, usize), TreeError> {
            self.check(sibling)?;
            let parent = self.tree.parent(sibling).ok_or(TreeError::RootEdit {
                operation: "add a sister to",
            })?;
            let position = self.tree.child_position(sibling).unwrap_or(0);
            Ok((parent, position + after))
        };
        let (parent, offset) = match at {
            Position::FirstChild(parent) => (parent, 0),
            Position::LastChild(parent) => {
                self.check(parent)?;
                (parent, self.tree.children(parent).len())
            }
            Position::Before(sibling) => sibling_slot(sibling, 0)?,
            Position::After(sibling) => sibling_slot(sibling, 1)?,
        };
        self.check(parent)?;
        if self.tree.is_leaf(parent) {
            return Err(TreeError::Expected {
                expected: "phrase node".into(),
                found: self.tree.value(parent),
                offset: parent.0,
            });
        }
        Ok((parent, offset))
    }

    fn attach(&mut self, node: NodeId, at: Position) -> Result<(), TreeError> {
        let (parent, offset) = self.resolve(at)?;
        self.tree.nodes[parent.0].children.insert(offset, node);
        self.tree.nodes[node.0].parent = Some(parent);
        Ok(())
    }

    /// Remove nodes (and everything beneath them) from the tree.
    pub fn delete(&mut self, nodes: &[NodeId]) -> Result<(), TreeError> {
        for node in nodes {
            self.check(*node)?;
            if self.tree.is_attached(*node) {
                self.detach(*node)?;
            }
        }
        Ok(())
    }

    /// Move a node to a new position.
    pub fn move_node(&mut self, node: NodeId, to: Position) -> Result<(), TreeError> {
        self.check(node)?;
        let anchor = match to {
            Position::FirstChild(id) | Position::LastChild(id) | Position::Before(id) | Position::After(id) => id,
        };
        if anchor == node {
            return Ok(());
        }
        if self.tree.dominates(node, anchor) {
            return Err(TreeError::Cycle { node });
        }
        self.detach(node)?;
        self.attach(node, to)
    }

    /// Insert a copy of `subtree` and return the id of its root.
    pub fn insert(&mut self, subtree: &Tree, at: Position) -> Result<NodeId, TreeError> {
        self.resolve(at)?;
        let node = self.tree.graft(subtree);
        self.attach(node, at)?;
        Ok(node)
    }

    /// Adjoin `auxiliary` at `node`: the auxiliary tree takes the node's
    /// place and the node moves to the auxiliary tree's foot. Returns the
    /// id of the auxiliary tree's root.
    pub fn adjoin(&mut self, node: NodeId, auxiliary: &Auxiliary) -> Result<NodeId, TreeError> {
        self.check(node)?;
        let parent = self.tree.parent(node).ok_or(TreeError::RootEdit {
            operation: "adjoin at",
        })?;
        if auxiliary.foot == auxiliary.tree.root() || !auxiliary.tree.is_attached(auxiliary.foot) {
            return Err(TreeError::MissingFoot);
        }

        let (root, mapping) = self.tree.graft_mapped(&auxiliary.tree, auxiliary.tree.root());
        let foot = mapping
            .get(auxiliary.foot.0)
            .copied()
            .flatten()
            .ok_or(TreeError::MissingFoot)?;

        let slot = self.tree.child_position(node).unwrap_or(0);
        self.tree.nodes[parent.0].children[slot] = root;
        self.tree.nodes[root.0].parent = Some(parent);

        let foot_parent = self.tree.parent(foot).ok_or(TreeError::MissingFoot)?;
        let foot_slot = self.tree.child_position(foot).unwrap_or(0);
        self.tree.nodes[foot_parent.0].children[foot_slot] = node;
        self.tree.nodes[node.0].parent = Some(foot_parent);
        self.tree.nodes[foot.0].parent = None;
        Ok(root)
    }
}
