//! Marking constituents that cannot be questioned.

use qgen_tree::{Mark, Tree};
use tracing::debug;

use crate::error::QgenResult;
use crate::rules::RuleSet;

/// Marks unmovable constituents with a loaded [`RuleSet`].
#[derive(Debug, Clone, Copy)]
pub struct UnmovableMarker<'a> {
    rules: &'a RuleSet,
}

impl<'a> UnmovableMarker<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        UnmovableMarker { rules }
    }

    /// A copy of `tree` in which every constituent some rule reaches
    /// carries [`Mark::Unmovable`].
    pub fn mark(&self, tree: &Tree) -> QgenResult<Tree> {
        let marked = self.rules.apply(tree)?;
        let count = marked
            .nodes()
            .into_iter()
            .filter(|node| marked.label(*node).is_some_and(|label| label.has_mark(Mark::Unmovable)))
            .count();
        debug!(count, "marked unmovable constituents");
        Ok(marked)
    }
}
