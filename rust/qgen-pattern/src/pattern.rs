//! The pattern object model.
//!
//! A [`Pattern`] is a tree of [`NodePattern`]s. Each node pattern constrains
//! one tree node by its label and, through [`Constraint`]s, relates it to
//! other nodes. Patterns can be assembled in code with the builder methods
//! or read from text with [`Pattern::parse`].
//!
//! ```
//! use qgen_pattern::{NodePattern, Pattern, RelationKind::*};
//!
//! // A noun phrase with a determiner child, not inside a prepositional phrase.
//! let built = Pattern::new(
//!     NodePattern::literal("NP")
//!         .without(DominatedBy, NodePattern::literal("PP"))
//!         .maybe(ParentOf, NodePattern::literal("DT").named("det")),
//! );
//! let parsed = Pattern::parse("NP !>> PP ?< DT=det").unwrap();
//! assert_eq!(built, parsed);
//! assert_eq!(parsed.to_string(), "NP !>> PP ?< DT=det");
//! ```

use std::fmt;

use regex::Regex;

use crate::error::PatternError;

/// How a node's label is tested.
#[derive(Debug, Clone)]
pub enum LabelMatcher {
    /// Any node (`__`).
    Any,
    /// The value equals one of the alternatives (`NP|PP`).
    Literal(Vec<String>),
    /// The value contains a match of the expression (`/^VB/`).
    Regex(Regex),
}

impl LabelMatcher {
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        Regex::new(pattern)
            .map(LabelMatcher::Regex)
            .map_err(|err| PatternError::InvalidRegex {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })
    }

    /// Test a node value: the written label of a phrase, or the bare word
    /// of a leaf.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            LabelMatcher::Any => true,
            LabelMatcher::Literal(alternatives) => alternatives.iter().any(|a| a == value),
            LabelMatcher::Regex(regex) => regex.is_match(value),
        }
    }
}

impl PartialEq for LabelMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LabelMatcher::Any, LabelMatcher::Any) => true,
            (LabelMatcher::Literal(a), LabelMatcher::Literal(b)) => a == b,
            (LabelMatcher::Regex(a), LabelMatcher::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for LabelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelMatcher::Any => f.write_str("__"),
            LabelMatcher::Literal(alternatives) => f.write_str(&alternatives.join("|")),
            LabelMatcher::Regex(regex) => write!(f, "/{}/", regex.as_str().replace('/', "\\/")),
        }
    }
}

/// How the node under test (A) relates to the target node (B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// `A < B`: B is a child of A.
    ParentOf,
    /// `A > B`: A is a child of B.
    ChildOf,
    /// `A << B`
    Dominates,
    /// `A >> B`
    DominatedBy,
    /// `A <n B`: B is A's nth child. Negative positions count from the end,
    /// so `<,` is `<1` and `<-` is `<-1`.
    HasNthChild(i32),
    /// `A >n B`: A is B's nth child.
    NthChildOf(i32),
    /// `A <: B`: B is A's only child.
    HasOnlyChild,
    /// `A $ B`
    SisterOf,
    /// `A $.. B`: A is a sister somewhere left of B.
    LeftSisterOf,
    /// `A $,, B`: A is a sister somewhere right of B.
    RightSisterOf,
    /// `A $. B`: B immediately follows A among the sisters.
    ImmediateLeftSisterOf,
    /// `A $, B`: B immediately precedes A among the sisters.
    ImmediateRightSisterOf,
    /// `A .. B`: A's words all come before B's.
    Precedes,
    /// `A . B`: B's first word directly follows A's last.
    ImmediatelyPrecedes,
    /// `A ,, B`
    Follows,
    /// `A , B`
    ImmediatelyFollows,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::ParentOf => f.write_str("<"),
            RelationKind::ChildOf => f.write_str(">"),
            RelationKind::Dominates => f.write_str("<<"),
            RelationKind::DominatedBy => f.write_str(">>"),
            RelationKind::HasNthChild(1) => f.write_str("<,"),
            RelationKind::HasNthChild(-1) => f.write_str("<-"),
            RelationKind::HasNthChild(n) => write!(f, "<{n}"),
            RelationKind::NthChildOf(1) => f.write_str(">,"),
            RelationKind::NthChildOf(-1) => f.write_str(">-"),
            RelationKind::NthChildOf(n) => write!(f, ">{n}"),
            RelationKind::HasOnlyChild => f.write_str("<:"),
            RelationKind::SisterOf => f.write_str("$"),
            RelationKind::LeftSisterOf => f.write_str("$.."),
            RelationKind::RightSisterOf => f.write_str("$,,"),
            RelationKind::ImmediateLeftSisterOf => f.write_str("$."),
            RelationKind::ImmediateRightSisterOf => f.write_str("$,"),
            RelationKind::Precedes => f.write_str(".."),
            RelationKind::ImmediatelyPrecedes => f.write_str("."),
            RelationKind::Follows => f.write_str(",,"),
            RelationKind::ImmediatelyFollows => f.write_str(","),
        }
    }
}

/// A relation from the node under test to a target pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    pub target: NodePattern,
    /// Satisfied only when no node satisfies the target. Names inside a
    /// negated relation never bind.
    pub negated: bool,
    /// Always satisfied; binds the target's names when a node matches.
    pub optional: bool,
}

/// A condition on the node under test.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Relation(Relation),
    /// Satisfied when every constraint of at least one group is.
    AnyOf(Vec<Vec<Constraint>>),
}

/// Constraints on one tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePattern {
    pub label: LabelMatcher,
    /// Name under which the matched node is reported.
    pub name: Option<String>,
    pub constraints: Vec<Constraint>,
}

impl NodePattern {
    pub fn new(label: LabelMatcher) -> Self {
        NodePattern {
            label,
            name: None,
            constraints: Vec::new(),
        }
    }

    /// Matches any node.
    pub fn any() -> Self {
        NodePattern::new(LabelMatcher::Any)
    }

    /// Matches nodes whose value is one of the `|`-separated alternatives.
    pub fn literal(alternatives: &str) -> Self {
        NodePattern::new(LabelMatcher::Literal(
            alternatives.split('|').map(str::to_string).collect(),
        ))
    }

    /// Matches nodes whose value contains a match of `pattern`.
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        Ok(NodePattern::new(LabelMatcher::regex(pattern)?))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn relate(mut self, kind: RelationKind, target: NodePattern, negated: bool, optional: bool) -> Self {
        self.constraints.push(Constraint::Relation(Relation {
            kind,
            target,
            negated,
            optional,
        }));
        self
    }

    /// Require a node related by `kind` that matches `target`.
    pub fn with(self, kind: RelationKind, target: NodePattern) -> Self {
        self.relate(kind, target, false, false)
    }

    /// Require that no node related by `kind` matches `target`.
    pub fn without(self, kind: RelationKind, target: NodePattern) -> Self {
        self.relate(kind, target, true, false)
    }

    /// Bind `target`'s names if a node related by `kind` matches it.
    pub fn maybe(self, kind: RelationKind, target: NodePattern) -> Self {
        self.relate(kind, target, false, true)
    }

    pub fn any_of(mut self, groups: Vec<Vec<Constraint>>) -> Self {
        self.constraints.push(Constraint::AnyOf(groups));
        self
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        if let Some(name) = &self.name {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        for constraint in &self.constraints {
            constraint.collect_names(names);
        }
    }

    fn write_atom(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if let Some(name) = &self.name {
            write!(f, "={name}")?;
        }
        Ok(())
    }
}

impl Constraint {
    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Constraint::Relation(relation) if !relation.negated => relation.target.collect_names(names),
            Constraint::Relation(_) => {}
            Constraint::AnyOf(groups) => {
                for constraint in groups.iter().flatten() {
                    constraint.collect_names(names);
                }
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Relation(relation) => {
                if relation.negated {
                    f.write_str("!")?;
                } else if relation.optional {
                    f.write_str("?")?;
                }
                write!(f, "{} ", relation.kind)?;
                if relation.target.constraints.is_empty() {
                    relation.target.write_atom(f)
                } else {
                    write!(f, "({})", relation.target)
                }
            }
            Constraint::AnyOf(groups) => {
                f.write_str("[")?;
                for (i, group) in groups.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" |")?;
                    }
                    for constraint in group {
                        write!(f, " {constraint}")?;
                    }
                }
                f.write_str(" ]")
            }
        }
    }
}

impl fmt::Display for NodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_atom(f)?;
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

/// A compiled tree pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    root: NodePattern,
}

impl Pattern {
    pub fn new(root: NodePattern) -> Self {
        Pattern { root }
    }

    pub fn root(&self) -> &NodePattern {
        &self.root
    }

    /// Names that a successful match may bind, in order of appearance.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.root.collect_names(&mut names);
        names
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
