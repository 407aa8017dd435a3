// premise → consequence, the edge type of the 2-SAT implication graph.

use std::fmt;

use crate::formula::{Clause, Literal};

pub const IMPLIES: &str = "\u{2192}";

#[derive(Debug, PartialEq, Clone, Hash, Eq, PartialOrd, Ord)]
pub struct Implication {
    premise: Literal,
    consequence: Literal,
}

impl Implication {
    pub fn new(premise: Literal, consequence: Literal) -> Implication {
        Implication {
            premise,
            consequence,
        }
    }

    pub fn premise(&self) -> &Literal {
        &self.premise
    }

    pub fn consequence(&self) -> &Literal {
        &self.consequence
    }

    /// The contrapositive: ¬consequence → ¬premise.
    pub fn reverse(&self) -> Implication {
        Implication::new(self.consequence.negated(), self.premise.negated())
    }

    pub fn to_clause(&self) -> Clause {
        Clause::new(vec![self.premise.negated(), self.consequence.clone()])
    }
}

impl fmt::Display for Implication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.premise, IMPLIES, self.consequence)
    }
}
