//! # qgen-tree
//!
//! Constituency trees for question generation.
//!
//! A parsed sentence arrives as a bracketed tree whose leaves are numbered
//! in reading order. Those numbers travel with the words through every
//! derived tree, so the text of any derived tree can be lined up against
//! the original sentence and stripped of its numbers only at the very end.
//!
//! ```text
//! (ROOT (S (NP (NNP Al-1) (NNP Gore-2)) (VP (VBD was-3) ...)))
//!   │
//!   ├─ Tree::from_penn / Tree::from_indexed_penn   read
//!   ├─ indexed_text / plain_text / tight_text      render
//!   ├─ HeadFinder                                  lexical heads
//!   └─ Tree::edit → Edit → finish                  derive a new tree
//! ```
//!
//! ## Example
//!
//! ```
//! use qgen_tree::{Label, Position, Tree};
//!
//! let tree = Tree::from_penn("(ROOT (S (NP (NNP John)) (VP (VBD left)) (. .)))").unwrap();
//! let clause = tree.children(tree.root())[0];
//! let verb = tree.children(tree.children(clause)[1])[0];
//!
//! let mut edit = tree.edit();
//! edit.move_node(verb, Position::FirstChild(clause)).unwrap();
//! edit.relabel(clause, Label::new("SQ")).unwrap();
//! let question = edit.finish();
//!
//! assert_eq!(question.surface(), "left-2 John-1 .-3");
//! assert_eq!(tree.surface(), "John-1 left-2 .-3");
//! ```

pub mod edit;
pub mod error;
pub mod head;
pub mod penn;
pub mod text;
pub mod token;
pub mod tree;

pub use edit::{Auxiliary, Edit, Position};
pub use error::TreeError;
pub use head::HeadFinder;
pub use text::{escape_bracket, restore_brackets, strip_indices};
pub use token::{Label, Mark, Token};
pub use tree::{NodeId, NodeKind, Tree};
