// Formula data model: literals, clauses, CNFs and the closed `Formula` union
// consumed by the checkers.  NNF, QCNF and implications live in their own files.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use crate::error::{FormulaError, FormulaResult};
use crate::implication::Implication;
use crate::nnf::Nnf;

pub const NOT: &str = "\u{00AC}";
// Rendering of the empty clause and the empty CNF.
pub const BOTTOM: &str = "\u{22A5}";

// We use a BTreeMap here so that assignments iterate (and print) ordered by variable.
pub type Valuation = BTreeMap<String, bool>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Connective {
    And,
    #[default]
    Or,
}

impl Connective {
    pub fn symbol(&self) -> &'static str {
        match self {
            Connective::And => "\u{2227}",
            Connective::Or => "\u{2228}",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ### Literal ###

/// A propositional variable or its negation.
///
/// Ordering is by variable name first, then by the negation flag.
#[derive(Debug, PartialEq, Clone, Hash, Eq, PartialOrd, Ord)]
pub struct Literal {
    variable: String,
    negated: bool,
}

impl Literal {
    pub fn new(variable: &str, negated: bool) -> FormulaResult<Literal> {
        if variable.is_empty() {
            return Err(FormulaError::EmptyVariable);
        }
        Ok(Literal {
            variable: variable.to_string(),
            negated,
        })
    }

    pub fn positive(variable: &str) -> FormulaResult<Literal> {
        Literal::new(variable, false)
    }

    pub fn negative(variable: &str) -> FormulaResult<Literal> {
        Literal::new(variable, true)
    }

    // Callers guarantee a non-empty name (eg. names derived from existing literals).
    pub(crate) fn from_parts(variable: String, negated: bool) -> Literal {
        debug_assert!(!variable.is_empty());
        Literal { variable, negated }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// A new literal with the flag flipped.  `self` is unchanged.
    pub fn negated(&self) -> Literal {
        Literal {
            variable: self.variable.clone(),
            negated: !self.negated,
        }
    }

    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.variable == other.variable && self.negated != other.negated
    }

    pub fn is_sat_for_truth_assignment(&self, valuation: &Valuation) -> bool {
        // Closed world: a variable missing from the valuation never satisfies.
        valuation
            .get(&self.variable)
            .map_or(false, |value| *value != self.negated)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}{}", NOT, self.variable)
        } else {
            f.write_str(&self.variable)
        }
    }
}

// ### Clause ###

/// Literals joined by a single connective (disjunctive unless stated otherwise).
#[derive(Debug, PartialEq, Clone, Hash, Eq, PartialOrd, Ord)]
pub struct Clause {
    literals: Vec<Literal>,
    connective: Connective,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Clause {
        Clause::with_connective(literals, Connective::Or)
    }

    pub fn with_connective(literals: Vec<Literal>, connective: Connective) -> Clause {
        Clause {
            literals,
            connective,
        }
    }

    pub fn empty() -> Clause {
        Clause::new(Vec::new())
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn connective(&self) -> Connective {
        self.connective
    }

    pub fn is_disjunctive(&self) -> bool {
        self.connective == Connective::Or
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn is_positive_unit(&self) -> bool {
        self.is_unit() && !self.literals[0].is_negated()
    }

    /// Disjunctive with at most one non-negated literal.  Conjunctive clauses are never Horn.
    pub fn is_horn(&self) -> bool {
        self.is_disjunctive() && self.literals.iter().filter(|lit| !lit.is_negated()).count() <= 1
    }

    /// Whether the clause holds a literal together with its negation.
    pub fn has_complementary_literals(&self) -> bool {
        self.literals
            .iter()
            .any(|lit| self.literals.iter().any(|other| lit.is_complement_of(other)))
    }

    pub fn variable_set(&self) -> BTreeSet<String> {
        self.literals
            .iter()
            .map(|lit| lit.variable().to_string())
            .collect()
    }

    pub fn num_variables(&self) -> usize {
        self.variable_set().len()
    }

    pub fn is_sat_for_truth_assignment(&self, valuation: &Valuation) -> bool {
        match self.connective {
            Connective::Or => self
                .literals
                .iter()
                .any(|lit| lit.is_sat_for_truth_assignment(valuation)),
            Connective::And => self
                .literals
                .iter()
                .all(|lit| lit.is_sat_for_truth_assignment(valuation)),
        }
    }

    /// De Morgan.  A disjunctive clause negates to a CNF of unit clauses, a conjunctive
    /// clause to a disjunctive clause.
    pub fn negated(&self) -> Formula {
        let negations = self.literals.iter().map(Literal::negated);
        match self.connective {
            Connective::Or => Formula::Cnf(Cnf::from_disjunctive(
                negations.map(|lit| Clause::new(vec![lit])).collect(),
            )),
            Connective::And => Formula::Clause(Clause::new(negations.collect())),
        }
    }

    /// (l) becomes ¬l → l and (l1 ∨ l2) becomes ¬l1 → l2.
    pub fn to_implication(&self) -> FormulaResult<Implication> {
        let not_an_implication = |reason| FormulaError::NotAnImplication {
            clause: self.to_string(),
            reason,
        };
        if !self.is_disjunctive() {
            return Err(not_an_implication("the clause is conjunctive"));
        }
        match self.literals.as_slice() {
            [single] => Ok(Implication::new(single.negated(), single.clone())),
            [left, consequence] => Ok(Implication::new(left.negated(), consequence.clone())),
            [] => Err(not_an_implication("the clause is empty")),
            _ => Err(not_an_implication("only clauses of at most two literals are supported")),
        }
    }

    pub fn to_nnf(&self) -> FormulaResult<Nnf> {
        Nnf::from_literals(self.literals.clone(), Some(self.connective))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(BOTTOM);
        }
        let separator = format!(" {} ", self.connective);
        let body = self
            .literals
            .iter()
            .map(|lit| lit.to_string())
            .collect::<Vec<_>>()
            .join(&separator);
        write!(f, "({})", body)
    }
}

// ### CNF ###

/// A conjunction of disjunctive clauses, deduplicated and without empty clauses.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(clauses: Vec<Clause>) -> FormulaResult<Cnf> {
        let mut disjunctive = Vec::with_capacity(clauses.len());
        for clause in clauses {
            if clause.is_disjunctive() || clause.is_empty() {
                disjunctive.push(clause);
            } else if clause.is_unit() {
                // The connective of a single literal is immaterial.
                disjunctive.push(Clause::new(clause.literals));
            } else {
                return Err(FormulaError::ConjunctiveClauseInCnf(clause.to_string()));
            }
        }
        Ok(Cnf::from_disjunctive(disjunctive))
    }

    /// The canonical empty CNF.
    pub fn empty() -> Cnf {
        Cnf {
            clauses: Vec::new(),
        }
    }

    // Callers guarantee every clause is disjunctive.
    pub(crate) fn from_disjunctive(clauses: Vec<Clause>) -> Cnf {
        let mut seen = HashSet::new();
        let clauses = clauses
            .into_iter()
            .filter(|clause| !clause.is_empty())
            .filter(|clause| seen.insert(clause.to_string()))
            .collect();
        Cnf { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn variable_set(&self) -> BTreeSet<String> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals().iter().map(|lit| lit.variable().to_string()))
            .collect()
    }

    pub fn num_variables(&self) -> usize {
        self.variable_set().len()
    }

    pub fn is_horn(&self) -> bool {
        self.clauses.iter().all(Clause::is_horn)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn is_sat_for_truth_assignment(&self, valuation: &Valuation) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.is_sat_for_truth_assignment(valuation))
    }

    pub fn union(&self, other: &Cnf) -> Cnf {
        let clauses = self.clauses.iter().chain(other.clauses.iter()).cloned().collect();
        Cnf::from_disjunctive(clauses)
    }

    pub fn with_clause(&self, clause: Clause) -> FormulaResult<Cnf> {
        Ok(self.union(&Cnf::new(vec![clause])?))
    }

    /// Same CNF without the clause at `index`.
    pub fn without_clause(&self, index: usize) -> Cnf {
        let clauses = self
            .clauses
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != index)
            .map(|(_, clause)| clause.clone())
            .collect();
        Cnf { clauses }
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(BOTTOM);
        }
        let separator = format!(" {} ", Connective::And);
        let body = self
            .clauses
            .iter()
            .map(|clause| clause.to_string())
            .collect::<Vec<_>>()
            .join(&separator);
        f.write_str(&body)
    }
}

// ### Formula ###

/// Every shape a checker may receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Literal(Literal),
    Clause(Clause),
    Cnf(Cnf),
    Nnf(Nnf),
}

impl Formula {
    pub fn is_literal(&self) -> bool {
        matches!(self, Formula::Literal(_))
    }

    pub fn is_clause(&self) -> bool {
        matches!(self, Formula::Clause(_))
    }

    pub fn is_cnf(&self) -> bool {
        matches!(self, Formula::Cnf(_))
    }

    pub fn is_nnf(&self) -> bool {
        matches!(self, Formula::Nnf(_))
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Formula::Literal(_) => "a literal",
            Formula::Clause(clause) if clause.is_disjunctive() => "a disjunctive clause",
            Formula::Clause(_) => "a conjunctive clause",
            Formula::Cnf(_) => "a CNF",
            Formula::Nnf(_) => "an NNF",
        }
    }

    pub fn variable_set(&self) -> BTreeSet<String> {
        match self {
            Formula::Literal(lit) => BTreeSet::from([lit.variable().to_string()]),
            Formula::Clause(clause) => clause.variable_set(),
            Formula::Cnf(cnf) => cnf.variable_set(),
            Formula::Nnf(nnf) => nnf.variable_set(),
        }
    }

    pub fn is_sat_for_truth_assignment(&self, valuation: &Valuation) -> bool {
        match self {
            Formula::Literal(lit) => lit.is_sat_for_truth_assignment(valuation),
            Formula::Clause(clause) => clause.is_sat_for_truth_assignment(valuation),
            Formula::Cnf(cnf) => cnf.is_sat_for_truth_assignment(valuation),
            Formula::Nnf(nnf) => nnf.is_sat_for_truth_assignment(valuation),
        }
    }
}

impl From<Literal> for Formula {
    fn from(lit: Literal) -> Self {
        Formula::Literal(lit)
    }
}

impl From<Clause> for Formula {
    fn from(clause: Clause) -> Self {
        Formula::Clause(clause)
    }
}

impl From<Cnf> for Formula {
    fn from(cnf: Cnf) -> Self {
        Formula::Cnf(cnf)
    }
}

impl From<Nnf> for Formula {
    fn from(nnf: Nnf) -> Self {
        Formula::Nnf(nnf)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Literal(lit) => lit.fmt(f),
            Formula::Clause(clause) => clause.fmt(f),
            Formula::Cnf(cnf) => cnf.fmt(f),
            Formula::Nnf(nnf) => nnf.fmt(f),
        }
    }
}




#[cfg(test)]
mod cnf_tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_cnf_rejects_conjunctive_clauses() {
        let conjunctive = Clause::with_connective(vec![lit("x"), lit("y")], Connective::And);
        assert!(matches!(
            Cnf::new(vec![conjunctive]),
            Err(FormulaError::ConjunctiveClauseInCnf(_))
        ));
        // A single literal is fine whatever its connective.
        let unit = Clause::with_connective(vec![lit("x")], Connective::And);
        assert_eq!(Cnf::new(vec![unit]).unwrap(), cnf(&[&[lit("x")]]));
    }

    #[test]
    fn test_cnf_deduplicates_and_drops_empty_clauses() {
        let formula = Cnf::new(vec![
            clause(&[lit("x"), lit("y")]),
            Clause::empty(),
            clause(&[lit("x"), lit("y")]),
            clause(&[nlit("z")]),
        ])
        .unwrap();
        assert_eq!(formula.clauses().len(), 2);
        assert_eq!(formula.num_variables(), 3);

        let all_empty = Cnf::new(vec![Clause::empty(), Clause::empty()]).unwrap();
        assert!(all_empty.is_empty());
        assert_eq!(all_empty, Cnf::empty());
        assert_eq!(all_empty.to_string(), BOTTOM);
    }

    #[test]
    fn test_cnf_is_horn() {
        assert!(cnf(&[&[lit("x"), nlit("y")], &[nlit("x")]]).is_horn());
        assert!(!cnf(&[&[lit("x"), lit("y")], &[nlit("x")]]).is_horn());
    }

    #[test]
    fn test_union() {
        let left = cnf(&[&[lit("x")], &[nlit("x"), lit("y")]]);
        let right = cnf(&[&[nlit("x"), lit("y")], &[nlit("y")]]);
        let union = left.union(&right);
        assert_eq!(union.clauses().len(), 3);
        assert_eq!(union.to_string(), format!("{} \u{2227} (\u{00AC}y)", left));
    }

    #[test]
    fn test_with_clause() {
        let formula = cnf(&[&[lit("x")], &[nlit("x"), lit("y")]]);
        let same = formula.with_clause(clause(&[nlit("x"), lit("y")])).unwrap();
        assert_eq!(same, formula);

        let extended = formula.with_clause(clause(&[nlit("y")])).unwrap();
        assert_eq!(extended.clauses().len(), 3);
        assert_eq!(extended.clauses()[2], clause(&[nlit("y")]));
        assert_eq!(formula.clauses().len(), 2);

        let conjunctive = Clause::with_connective(vec![lit("x"), lit("z")], Connective::And);
        assert!(matches!(
            formula.with_clause(conjunctive),
            Err(FormulaError::ConjunctiveClauseInCnf(_))
        ));
    }

    #[test]
    fn test_without_clause() {
        let formula = cnf(&[&[lit("x")], &[nlit("x"), lit("y")], &[nlit("y")]]);
        assert_eq!(
            formula.without_clause(1),
            cnf(&[&[lit("x")], &[nlit("y")]])
        );
    }

    #[test]
    fn test_cnf_display() {
        let formula = cnf(&[&[lit("x"), lit("y")], &[nlit("z")]]);
        assert_eq!(formula.to_string(), "(x \u{2228} y) \u{2227} (\u{00AC}z)");
    }
}
