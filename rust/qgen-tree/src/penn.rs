//! Reading and writing Penn Treebank bracketed trees.
//!
//! ```text
//! tree   = '(' label? child* ')'
//! child  = tree | word
//! label  = atom
//! word   = atom
//! ```
//!
//! An unlabeled outermost bracket, as produced by many parsers, is read as
//! `ROOT`. Writing goes through [`Tree`]'s `Display` impl, which prints
//! leaves with their indices.

use crate::error::TreeError;
use crate::text::escape_bracket;
use crate::tree::{NodeId, NodeKind, Tree};
use crate::{Label, Token};

#[derive(Debug, Clone, PartialEq)]
enum PennToken {
    Open,
    Close,
    Atom(String),
}

/// How leaf words acquire their indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Indexing {
    /// Number leaves 1..n from left to right.
    Assign,
    /// Leaves already carry a `-N` suffix.
    Existing,
}

fn tokenize(input: &str) -> Vec<(PennToken, usize)> {
    let mut tokens = Vec::new();
    let mut atom = String::new();
    let mut atom_start = 0;

    let flush_atom = |atom: &mut String, start: usize, tokens: &mut Vec<(PennToken, usize)>| {
        if !atom.is_empty() {
            tokens.push((PennToken::Atom(std::mem::take(atom)), start));
        }
    };

    for (offset, ch) in input.char_indices() {
        match ch {
            '(' => {
                flush_atom(&mut atom, atom_start, &mut tokens);
                tokens.push((PennToken::Open, offset));
            }
            ')' => {
                flush_atom(&mut atom, atom_start, &mut tokens);
                tokens.push((PennToken::Close, offset));
            }
            ch if ch.is_whitespace() => flush_atom(&mut atom, atom_start, &mut tokens),
            ch => {
                if atom.is_empty() {
                    atom_start = offset;
                }
                atom.push(ch);
            }
        }
    }
    flush_atom(&mut atom, atom_start, &mut tokens);
    tokens
}

struct Reader {
    tokens: Vec<(PennToken, usize)>,
    pos: usize,
    indexing: Indexing,
    next_index: usize,
    end: usize,
    tree: Tree,
}

impl Reader {
    fn peek(&self) -> Option<&PennToken> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, offset)| *offset)
            .unwrap_or(self.end)
    }

    fn advance(&mut self) -> Option<PennToken> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expected(&self, expected: &str) -> TreeError {
        TreeError::Expected {
            expected: expected.into(),
            found: match self.peek() {
                Some(PennToken::Open) => "'('".into(),
                Some(PennToken::Close) => "')'".into(),
                Some(PennToken::Atom(atom)) => format!("{atom:?}"),
                None => "end of input".into(),
            },
            offset: self.offset(),
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.tree.nodes[child.0].parent = Some(parent);
        self.tree.nodes[parent.0].children.push(child);
    }

    fn read_leaf(&mut self, word: &str) -> NodeId {
        let token = match self.indexing {
            Indexing::Assign => {
                self.next_index += 1;
                Token::indexed(escape_bracket(word), self.next_index)
            }
            Indexing::Existing => {
                let token = Token::from_indexed(word);
                Token {
                    text: escape_bracket(&token.text).to_string(),
                    index: token.index,
                }
            }
        };
        self.tree.push(NodeKind::Leaf(token))
    }

    /// Reads a bracketed node; the opening bracket is the current token.
    fn read_tree(&mut self, outermost: bool) -> Result<NodeId, TreeError> {
        let open_offset = self.offset();
        if self.advance() != Some(PennToken::Open) {
            return Err(self.expected("'('"));
        }

        let label = match self.peek() {
            Some(PennToken::Atom(_)) => match self.advance() {
                Some(PennToken::Atom(atom)) => Label::parse(&atom),
                _ => return Err(self.expected("label")),
            },
            Some(PennToken::Open) if outermost => Label::new("ROOT"),
            _ => return Err(self.expected("label")),
        };
        let node = self.tree.push(NodeKind::Phrase(label));

        loop {
            match self.peek() {
                Some(PennToken::Close) => {
                    self.advance();
                    return Ok(node);
                }
                Some(PennToken::Open) => {
                    let child = self.read_tree(false)?;
                    self.attach(node, child);
                }
                Some(PennToken::Atom(word)) => {
                    let word = word.clone();
                    self.advance();
                    let child = self.read_leaf(&word);
                    self.attach(node, child);
                }
                None => return Err(TreeError::Unbalanced { offset: open_offset }),
            }
        }
    }
}

fn read(input: &str, indexing: Indexing) -> Result<Tree, TreeError> {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Err(TreeError::Empty);
    }
    let mut reader = Reader {
        tokens,
        pos: 0,
        indexing,
        next_index: 0,
        end: input.len(),
        tree: Tree {
            nodes: Vec::new(),
            root: NodeId(0),
        },
    };
    let root = reader.read_tree(true)?;
    if let Some((token, offset)) = reader.tokens.get(reader.pos) {
        return Err(match token {
            PennToken::Close => TreeError::Unbalanced { offset: *offset },
            _ => reader.expected("end of input"),
        });
    }
    reader.tree.root = root;
    Ok(reader.tree)
}

impl Tree {
    /// Read a bracketed tree, numbering its leaves 1..n left to right.
    pub fn from_penn(input: &str) -> Result<Tree, TreeError> {
        read(input, Indexing::Assign)
    }

    /// Read a bracketed tree whose leaves already carry `-N` indices, as
    /// written by this type's `Display` impl.
    pub fn from_indexed_penn(input: &str) -> Result<Tree, TreeError> {
        read(input, Indexing::Existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_and_indexes_leaves() {
        let tree = Tree::from_penn("(ROOT (S (NP (NNP John)) (VP (VBD saw) (NP (NNP Mary))) (. .)))")
            .unwrap();
        assert_eq!(
            tree.to_string(),
            "(ROOT (S (NP (NNP John-1)) (VP (VBD saw-2) (NP (NNP Mary-3))) (. .-4)))"
        );
    }

    #[test]
    fn unlabeled_outer_bracket_is_root() {
        let tree = Tree::from_penn("( (S (NP (PRP it)) (VP (VBZ works))))").unwrap();
        assert_eq!(tree.category(tree.root()), Some("ROOT"));
        assert_eq!(tree.render(), "it works");
    }

    #[test]
    fn indexed_round_trip() {
        let text = "(ROOT (S (UNMV-NP (NNP Al-1)) (VP (AUX-VBD was-2) (VP (VBN born-3)))))";
        let tree = Tree::from_indexed_penn(text).unwrap();
        assert_eq!(tree.to_string(), text);
        assert_eq!(Tree::from_indexed_penn(&tree.to_string()).unwrap(), tree);
    }

    #[test]
    fn reports_unbalanced_input() {
        assert_eq!(
            Tree::from_penn("(S (NP (NN dog))"),
            Err(TreeError::Unbalanced { offset: 0 })
        );
        assert!(matches!(
            Tree::from_penn("(S (NN dog)))"),
            Err(TreeError::Unbalanced { .. })
        ));
        assert_eq!(Tree::from_penn("   "), Err(TreeError::Empty));
    }
}
