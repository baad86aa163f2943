//! Parser for the textual pattern syntax.
//!
//! Converts a token stream (from [`crate::tokenizer`]) into a [`Pattern`].
//!
//! ```text
//! pattern    = node
//! node       = atom constraint*
//! atom       = label ('=' Word)?
//! label      = '__' | Regex | Word ('|' Word)*
//! constraint = ('!' | '?')? Relation target
//!            | '[' constraint+ ('|' constraint+)* ']'
//! target     = '(' node ')' | atom
//! ```
//!
//! Constraints written after a bare target belong to the node before it,
//! so `S < NP < VP` requires both children of the same `S`. Parentheses
//! attach constraints to the target instead: `S < (NP < DT)`.

use std::str::FromStr;

use crate::error::PatternError;
use crate::pattern::{Constraint, LabelMatcher, NodePattern, Pattern, Relation};
use crate::tokenizer::{tokenize, Token};

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn peek_at(&self, ahead: usize) -> Option<&Token> {
        self.tokens.get(self.pos + ahead).map(|(token, _)| token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expected(&self, expected: &str) -> PatternError {
        let (found, offset) = match self.tokens.get(self.pos) {
            Some((token, offset)) => (format!("'{token}'"), *offset),
            None => ("end of pattern".to_string(), self.end),
        };
        PatternError::Expected {
            expected: expected.into(),
            found,
            offset,
        }
    }

    fn parse_label(&mut self) -> Result<LabelMatcher, PatternError> {
        match self.peek() {
            Some(Token::Word(word)) if word == "__" => {
                self.advance();
                Ok(LabelMatcher::Any)
            }
            Some(Token::Regex(_)) => match self.advance() {
                Some(Token::Regex(body)) => LabelMatcher::regex(&body),
                _ => Err(self.expected("regular expression")),
            },
            Some(Token::Word(_)) => {
                let mut alternatives = Vec::new();
                while let Some(Token::Word(word)) = self.peek() {
                    alternatives.push(word.clone());
                    self.advance();
                    // `|` continues the label only when another word follows
                    if self.peek() == Some(&Token::Bar) && matches!(self.peek_at(1), Some(Token::Word(_))) {
                        self.advance();
                    } else {
                        break;
                    }
                }
                Ok(LabelMatcher::Literal(alternatives))
            }
            _ => Err(self.expected("node label")),
        }
    }

    fn parse_atom(&mut self) -> Result<NodePattern, PatternError> {
        let mut node = NodePattern::new(self.parse_label()?);
        if self.peek() == Some(&Token::Equals) {
            self.advance();
            match self.peek() {
                Some(Token::Word(name)) => {
                    node.name = Some(name.clone());
                    self.advance();
                }
                _ => return Err(self.expected("node name")),
            }
        }
        Ok(node)
    }

    fn parse_node(&mut self) -> Result<NodePattern, PatternError> {
        let mut node = self.parse_atom()?;
        while self.starts_constraint() {
            node.constraints.push(self.parse_constraint()?);
        }
        Ok(node)
    }

    fn starts_constraint(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Relation(_) | Token::Not | Token::Maybe | Token::BeginGroup)
        )
    }

    fn parse_target(&mut self) -> Result<NodePattern, PatternError> {
        if self.peek() == Some(&Token::Open) {
            self.advance();
            let node = self.parse_node()?;
            if self.peek() != Some(&Token::Close) {
                return Err(self.expected("')'"));
            }
            self.advance();
            Ok(node)
        } else {
            self.parse_atom()
        }
    }

    fn parse_constraint(&mut self) -> Result<Constraint, PatternError> {
        if self.peek() == Some(&Token::BeginGroup) {
            self.advance();
            let mut groups = vec![Vec::new()];
            loop {
                match self.peek() {
                    Some(Token::EndGroup) => {
                        self.advance();
                        break;
                    }
                    Some(Token::Bar) => {
                        self.advance();
                        groups.push(Vec::new());
                    }
                    _ if self.starts_constraint() => {
                        let constraint = self.parse_constraint()?;
                        if let Some(group) = groups.last_mut() {
                            group.push(constraint);
                        }
                    }
                    _ => return Err(self.expected("constraint, '|' or ']'")),
                }
            }
            if groups.iter().any(Vec::is_empty) {
                return Err(self.expected("constraint group"));
            }
            return Ok(Constraint::AnyOf(groups));
        }

        let (negated, optional) = match self.peek() {
            Some(Token::Not) => {
                self.advance();
                (true, false)
            }
            Some(Token::Maybe) => {
                self.advance();
                (false, true)
            }
            _ => (false, false),
        };
        let kind = match self.peek() {
            Some(Token::Relation(kind)) => *kind,
            _ => return Err(self.expected("relation")),
        };
        self.advance();
        let target = self.parse_target()?;
        Ok(Constraint::Relation(Relation {
            kind,
            target,
            negated,
            optional,
        }))
    }
}

impl Pattern {
    /// Parse a pattern from its textual form.
    pub fn parse(input: &str) -> Result<Pattern, PatternError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(PatternError::Empty);
        }
        let mut parser = Parser {
            tokens,
            pos: 0,
            end: input.chars().count(),
        };
        let root = parser.parse_node()?;
        if parser.peek().is_some() {
            return Err(parser.expected("end of pattern"));
        }
        Ok(Pattern::new(root))
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}
