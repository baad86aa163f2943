//! Head finding with Collins' head rules.
//!
//! Each phrase category names an ordered list of child categories and a
//! search direction. The first category in the list that occurs among the
//! children (searched in that direction) picks the head child. Noun phrases
//! use Collins' special procedure instead.

use crate::tree::{NodeId, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    LeftToRight,
    RightToLeft,
}

use Direction::{LeftToRight, RightToLeft};

fn rule(category: &str) -> Option<(Direction, &'static [&'static str])> {
    let rule: (Direction, &'static [&'static str]) = match category {
        "ADJP" => (
            LeftToRight,
            &[
                "NNS", "QP", "NN", "$", "ADVP", "JJ", "VBN", "VBG", "ADJP", "JJR", "NP", "JJS", "DT",
                "FW", "RBR", "RBS", "SBAR", "RB",
            ],
        ),
        "ADVP" => (
            RightToLeft,
            &[
                "RB", "RBR", "RBS", "FW", "ADVP", "TO", "CD", "JJR", "JJ", "IN", "NP", "JJS", "NN",
            ],
        ),
        "CONJP" => (RightToLeft, &["CC", "RB", "IN"]),
        "FRAG" | "UCP" | "X" => (RightToLeft, &[]),
        "INTJ" | "PRN" | "ROOT" | "TOP" | "NX" => (LeftToRight, &[]),
        "LST" => (RightToLeft, &["LS", ":"]),
        "NAC" => (
            LeftToRight,
            &[
                "NN", "NNS", "NNP", "NNPS", "NP", "NAC", "EX", "$", "CD", "QP", "PRP", "VBG", "JJ",
                "JJS", "JJR", "ADJP", "FW",
            ],
        ),
        "PP" => (RightToLeft, &["IN", "TO", "VBG", "VBN", "RP", "FW"]),
        "PRT" => (RightToLeft, &["RP"]),
        "QP" => (
            LeftToRight,
            &[
                "$", "IN", "NNS", "NN", "JJ", "RB", "DT", "CD", "NCD", "QP", "JJR", "JJS",
            ],
        ),
        "RRC" => (RightToLeft, &["VP", "NP", "ADVP", "ADJP", "PP"]),
        "S" => (
            LeftToRight,
            &["TO", "IN", "VP", "S", "SBAR", "ADJP", "UCP", "NP"],
        ),
        "SBAR" => (
            LeftToRight,
            &[
                "WHNP", "WHPP", "WHADVP", "WHADJP", "IN", "DT", "S", "SQ", "SINV", "SBAR", "FRAG",
            ],
        ),
        "SBARQ" => (LeftToRight, &["SQ", "S", "SINV", "SBARQ", "FRAG"]),
        "SINV" => (
            LeftToRight,
            &[
                "VBZ", "VBD", "VBP", "VB", "MD", "VP", "S", "SINV", "ADJP", "NP",
            ],
        ),
        "SQ" => (
            LeftToRight,
            &["VBZ", "VBD", "VBP", "VB", "MD", "VP", "SQ"],
        ),
        "VP" => (
            LeftToRight,
            &[
                "TO", "VBD", "VBN", "MD", "VBZ", "VB", "VBG", "VBP", "VP", "ADJP", "NN", "NNS", "NP",
            ],
        ),
        "WHADJP" => (LeftToRight, &["CC", "WRB", "JJ", "ADJP"]),
        "WHADVP" => (RightToLeft, &["CC", "WRB"]),
        "WHNP" => (
            LeftToRight,
            &["WDT", "WP", "WP$", "WHADJP", "WHPP", "WHNP"],
        ),
        "WHPP" => (RightToLeft, &["IN", "TO", "FW"]),
        _ => return None,
    };
    Some(rule)
}

/// Finds lexical heads of phrases.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadFinder;

impl HeadFinder {
    pub fn new() -> Self {
        HeadFinder
    }

    /// The head child of `node`. Leaves and preterminals have none.
    pub fn head_child(&self, tree: &Tree, node: NodeId) -> Option<NodeId> {
        if tree.is_leaf(node) || tree.is_preterminal(node) {
            return None;
        }
        let children = tree.children(node);
        let categories: Vec<String> = children
            .iter()
            .map(|child| basic_category(tree, *child))
            .collect();

        let category = basic_category(tree, node);
        if category == "NP" {
            return noun_phrase_head(children, &categories);
        }

        let (direction, priorities) = rule(&category).unwrap_or((RightToLeft, &[]));
        for wanted in priorities {
            if let Some(position) = search(&categories, direction, |c| c == *wanted) {
                return Some(children[position]);
            }
        }
        match direction {
            LeftToRight => children.first().copied(),
            RightToLeft => children.last().copied(),
        }
    }

    /// The preterminal reached by following head children down from `node`.
    pub fn head_terminal(&self, tree: &Tree, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        loop {
            if tree.is_preterminal(current) {
                return Some(current);
            }
            current = self.head_child(tree, current)?;
        }
    }
}

/// Category with function tags removed: `NP-SBJ` becomes `NP`.
fn basic_category(tree: &Tree, node: NodeId) -> String {
    let Some(category) = tree.category(node) else {
        return String::new();
    };
    if category.starts_with('-') {
        return category.to_string();
    }
    match category.split_once(['-', '=']) {
        Some((base, _)) if !base.is_empty() => base.to_string(),
        _ => category.to_string(),
    }
}

fn search(categories: &[String], direction: Direction, wanted: impl Fn(&str) -> bool) -> Option<usize> {
    match direction {
        LeftToRight => categories.iter().position(|c| wanted(c.as_str())),
        RightToLeft => categories.iter().rposition(|c| wanted(c.as_str())),
    }
}

fn noun_phrase_head(children: &[NodeId], categories: &[String]) -> Option<NodeId> {
    if categories.last().is_some_and(|c| c == "POS") {
        return children.last().copied();
    }
    let steps: [(Direction, &[&str]); 5] = [
        (RightToLeft, &["NN", "NNP", "NNPS", "NNS", "NX", "POS", "JJR"]),
        (LeftToRight, &["NP"]),
        (RightToLeft, &["$", "ADJP", "PRN"]),
        (RightToLeft, &["CD"]),
        (RightToLeft, &["JJ", "JJS", "RB", "QP"]),
    ];
    for (direction, wanted) in steps {
        if let Some(position) = search(categories, direction, |c| wanted.contains(&c)) {
            return Some(children[position]);
        }
    }
    children.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn head_text(penn: &str) -> String {
        let tree = Tree::from_penn(penn).unwrap();
        let head = HeadFinder::new().head_child(&tree, tree.root()).unwrap();
        tree.plain_text(head)
    }

    #[test]
    fn noun_phrase_takes_rightmost_noun() {
        assert_eq!(head_text("(NP (NNP Al) (NNP Gore))"), "Gore");
        assert_eq!(head_text("(NP (DT the) (JJ tall) (NN man))"), "man");
        assert_eq!(head_text("(NP (NP (NNP John) (POS 's)))"), "John 's");
    }

    #[test]
    fn noun_phrase_falls_back_to_inner_noun_phrase() {
        assert_eq!(
            head_text("(NP (NP (DT the) (NN man)) (PP (IN in) (NP (NNP Paris))))"),
            "the man"
        );
    }

    #[test]
    fn clause_and_verb_phrase_rules() {
        assert_eq!(head_text("(S (NP (NNP John)) (VP (VBD left)))"), "left");
        assert_eq!(head_text("(PP (IN in) (NP (NNP Washington)))"), "in");
        assert_eq!(head_text("(VP (VBD was) (VP (VBN born)))"), "was");
    }

    #[test]
    fn terminal_head_descends() {
        let tree = Tree::from_penn("(NP (NP (DT the) (NNS dogs)) (PP (IN of) (NP (NNP Rome))))").unwrap();
        let head = HeadFinder::new().head_terminal(&tree, tree.root()).unwrap();
        assert_eq!(tree.category(head), Some("NNS"));
    }
}
