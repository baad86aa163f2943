use pretty_assertions::assert_eq;
use proptest::prelude::*;
use qgen_tree::{HeadFinder, Mark, Tree};

fn penn_tree() -> impl Strategy<Value = String> {
    let leaf = (
        prop::sample::select(vec!["NN", "NNS", "NNP", "VBD", "IN", "CC", ",", "DT"]),
        "[a-z]{1,6}",
    )
        .prop_map(|(tag, word)| format!("({tag} {word})"));
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop::sample::select(vec!["S", "NP", "VP", "PP", "SBAR", "UNMV-NP"]),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(category, children)| format!("({category} {})", children.join(" ")))
    })
    .prop_map(|body| format!("(ROOT {body})"))
}

proptest! {
    #[test]
    fn written_trees_read_back_identically(penn in penn_tree()) {
        let tree = Tree::from_penn(&penn).unwrap();
        let reread = Tree::from_indexed_penn(&tree.to_string()).unwrap();
        prop_assert_eq!(&reread, &tree);
    }

    #[test]
    fn rendered_text_retokenizes_to_the_leaves(penn in penn_tree()) {
        let tree = Tree::from_penn(&penn).unwrap();
        let words: Vec<String> = tree
            .tokens(tree.root())
            .iter()
            .map(|token| token.text.clone())
            .collect();
        let rendered: Vec<String> = tree.render().split_whitespace().map(str::to_string).collect();
        prop_assert_eq!(rendered, words);
    }

    #[test]
    fn leaf_indices_are_sequential(penn in penn_tree()) {
        let tree = Tree::from_penn(&penn).unwrap();
        let expected: Vec<usize> = (1..=tree.leaves(tree.root()).len()).collect();
        prop_assert_eq!(tree.leaf_indices(), expected);
    }
}

#[test]
fn marks_survive_a_round_trip() {
    let tree = Tree::from_penn("(ROOT (S (UNMV-NP (PRP it)) (VP (AUX-VBZ is))))").unwrap();
    let np = tree.children(tree.children(tree.root())[0])[0];
    assert!(tree.has_mark_within(np, Mark::Unmovable));
    assert!(tree.has_mark_within(tree.root(), Mark::Auxiliary));
    assert_eq!(tree.category(np), Some("NP"));
    assert_eq!(tree.to_string(), "(ROOT (S (UNMV-NP (PRP it-1)) (VP (AUX-VBZ is-2))))");
}

#[test]
fn head_of_subject_noun_phrase() {
    let tree = Tree::from_penn(
        "(ROOT (S (NP (DT The) (NNP New) (NNP York) (NNP Times)) (VP (VBD wrote) (NP (DT that))) (. .)))",
    )
    .unwrap();
    let subject = tree.children(tree.children(tree.root())[0])[0];
    let head = HeadFinder::new().head_terminal(&tree, subject).unwrap();
    assert_eq!(tree.indexed_text(head), "Times-4");
}
