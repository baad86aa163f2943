//! # qgen-pattern
//!
//! Tree patterns over indexed constituency trees, and a matcher that finds
//! every way a pattern fits a tree.
//!
//! A pattern constrains a node by its label and relates it to other nodes:
//! its children, ancestors, sisters, or the words before and after it.
//! Nodes can be named, and a match reports which tree node each name bound.
//!
//! ## Syntax
//!
//! The textual form reads like the relations it encodes:
//!
//! | Relation  | Meaning                                  |
//! |-----------|------------------------------------------|
//! | `A < B`   | B is a child of A                        |
//! | `A > B`   | A is a child of B                        |
//! | `A << B`  | A dominates B                            |
//! | `A >> B`  | A is dominated by B                      |
//! | `A <n B`  | B is A's nth child (`<,` first, `<-` last) |
//! | `A >n B`  | A is B's nth child (`>,` first, `>-` last) |
//! | `A <: B`  | B is A's only child                      |
//! | `A $ B`   | A and B are sisters                      |
//! | `A $.. B` | A is a sister left of B (`$++`)          |
//! | `A $,, B` | A is a sister right of B (`$--`)         |
//! | `A $. B`  | A is the sister just left of B (`$+`)    |
//! | `A $, B`  | A is the sister just right of B (`$-`)   |
//! | `A .. B`  | A precedes B                             |
//! | `A . B`   | A immediately precedes B                 |
//! | `A ,, B`  | A follows B                              |
//! | `A , B`   | A immediately follows B                  |
//!
//! `!` negates a relation and `?` makes it optional. `=name` names a node.
//! `[ ... | ... ]` holds alternative groups of constraints. Labels are
//! literal (`NP`, `NP|PP`), a regular expression (`/^VB/`), or `__` for any
//! node. A phrase is matched by its written label, marks included
//! (`UNMV-NP`), and a leaf by its word without the index.
//!
//! ## Example
//!
//! ```
//! use qgen_pattern::Pattern;
//! use qgen_tree::Tree;
//!
//! let tree = Tree::from_penn("(ROOT (S (NP (NNP John)) (VP (VBD saw) (NP (NNP Mary)))))").unwrap();
//! let pattern = Pattern::parse("VP < /^VB/=verb < NP=object").unwrap();
//! let found = pattern.find(&tree).unwrap();
//! assert_eq!(tree.indexed_text(found.get("object").unwrap()), "Mary-3");
//! ```

pub mod error;
pub mod matcher;
pub mod parser;
pub mod pattern;
pub mod tokenizer;

pub use error::PatternError;
pub use matcher::Match;
pub use pattern::{Constraint, LabelMatcher, NodePattern, Pattern, Relation, RelationKind};
