// Negation normal form.
//
// An NNF is either a literal or a homogeneous group of literals and nested NNFs
// joined by one connective.  Negation only ever appears on literals.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{FormulaError, FormulaResult};
use crate::formula::{Connective, Literal, Valuation};

#[derive(Debug, PartialEq, Clone, Hash, Eq)]
pub enum NnfItem {
    Literal(Literal),
    Nnf(Nnf),
}

impl NnfItem {
    fn variables_into(&self, acc: &mut BTreeSet<String>) {
        match self {
            NnfItem::Literal(lit) => {
                acc.insert(lit.variable().to_string());
            }
            NnfItem::Nnf(nnf) => nnf.group.iter().for_each(|item| item.variables_into(acc)),
        }
    }

    pub fn is_sat_for_truth_assignment(&self, valuation: &Valuation) -> bool {
        match self {
            NnfItem::Literal(lit) => lit.is_sat_for_truth_assignment(valuation),
            NnfItem::Nnf(nnf) => nnf.is_sat_for_truth_assignment(valuation),
        }
    }
}

impl From<Literal> for NnfItem {
    fn from(lit: Literal) -> Self {
        NnfItem::Literal(lit)
    }
}

impl From<Nnf> for NnfItem {
    fn from(nnf: Nnf) -> Self {
        NnfItem::Nnf(nnf)
    }
}

impl fmt::Display for NnfItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnfItem::Literal(lit) => lit.fmt(f),
            NnfItem::Nnf(nnf) => nnf.fmt(f),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Hash, Eq)]
pub struct Nnf {
    group: Vec<NnfItem>,
    connective: Option<Connective>,
}

impl Nnf {
    /// A group with more than one member must declare its connective.
    pub fn new(group: Vec<NnfItem>, connective: Option<Connective>) -> FormulaResult<Nnf> {
        match group.len() {
            0 => Err(FormulaError::EmptyGroup),
            n if n > 1 && connective.is_none() => Err(FormulaError::MissingConnective(n)),
            _ => Ok(Nnf { group, connective }),
        }
    }

    pub fn and(group: Vec<NnfItem>) -> FormulaResult<Nnf> {
        Nnf::new(group, Some(Connective::And))
    }

    pub fn or(group: Vec<NnfItem>) -> FormulaResult<Nnf> {
        Nnf::new(group, Some(Connective::Or))
    }

    pub fn from_literals(literals: Vec<Literal>, connective: Option<Connective>) -> FormulaResult<Nnf> {
        Nnf::new(literals.into_iter().map(NnfItem::from).collect(), connective)
    }

    pub fn group(&self) -> &[NnfItem] {
        &self.group
    }

    pub fn connective(&self) -> Option<Connective> {
        self.connective
    }

    /// The literal wrapped by a single-member group, if that member is a literal.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self.group.as_slice() {
            [NnfItem::Literal(lit)] => Some(lit),
            _ => None,
        }
    }

    pub fn variable_set(&self) -> BTreeSet<String> {
        let mut acc = BTreeSet::new();
        self.group.iter().for_each(|item| item.variables_into(&mut acc));
        acc
    }

    pub fn is_sat_for_truth_assignment(&self, valuation: &Valuation) -> bool {
        match (self.group.as_slice(), self.connective) {
            ([single], _) => single.is_sat_for_truth_assignment(valuation),
            (group, Some(Connective::Or)) => group
                .iter()
                .any(|item| item.is_sat_for_truth_assignment(valuation)),
            // Construction guarantees a connective for larger groups.
            (group, _) => group
                .iter()
                .all(|item| item.is_sat_for_truth_assignment(valuation)),
        }
    }
}

impl From<Literal> for Nnf {
    fn from(lit: Literal) -> Self {
        Nnf {
            group: vec![NnfItem::Literal(lit)],
            connective: None,
        }
    }
}

impl fmt::Display for Nnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match self.connective {
            Some(connective) => format!(" {} ", connective),
            None => " ".to_string(),
        };
        let body = self
            .group
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(&separator);
        write!(f, "({})", body)
    }
}

#[cfg(test)]
mod nnf_tests {
    use super::*;
    use crate::formula::test_support::*;
    use crate::formula::Clause;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn x_and_y_and_a_or_b(outer: Connective) -> Nnf {
        let x_and_y = Nnf::and(vec![lit("x").into(), lit("y").into()]).unwrap();
        let a_or_b = Nnf::or(vec![lit("a").into(), lit("b").into()]).unwrap();
        Nnf::new(vec![x_and_y.into(), a_or_b.into()], Some(outer)).unwrap()
    }

    #[test]
    fn test_group_without_connective() {
        init();
        assert_eq!(
            Nnf::new(vec![lit("x").into(), lit("y").into()], None),
            Err(FormulaError::MissingConnective(2))
        );
        assert_eq!(Nnf::new(vec![], Some(Connective::And)), Err(FormulaError::EmptyGroup));
        let single = Nnf::new(vec![nlit("x").into()], None).unwrap();
        assert_eq!(single.variable_set().len(), 1);
        assert_eq!(single.as_literal(), Some(&nlit("x")));
    }

    #[test]
    fn test_variable_set() {
        let nnf = Nnf::or(vec![lit("x").into(), nlit("x").into()]).unwrap();
        assert_eq!(nnf.variable_set().len(), 1);
        assert_eq!(x_and_y_and_a_or_b(Connective::And).variable_set().len(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(Nnf::from(lit("x")).to_string(), "(x)");
        assert_eq!(Nnf::from(nlit("x")).to_string(), "(\u{00AC}x)");
        assert_eq!(
            x_and_y_and_a_or_b(Connective::And).to_string(),
            "((x \u{2227} y) \u{2227} (a \u{2228} b))"
        );
    }

    #[test]
    fn test_is_sat_for_truth_assignment() {
        let nnf1 = x_and_y_and_a_or_b(Connective::And);
        let nnf2 = x_and_y_and_a_or_b(Connective::Or);
        let val = |x, y, a, b| valuation(&[("x", x), ("y", y), ("a", a), ("b", b)]);

        assert!(nnf1.is_sat_for_truth_assignment(&val(true, true, true, false)));
        assert!(nnf1.is_sat_for_truth_assignment(&val(true, true, false, true)));
        assert!(!nnf1.is_sat_for_truth_assignment(&val(false, true, true, false)));
        assert!(!nnf1.is_sat_for_truth_assignment(&val(true, true, false, false)));
        assert!(nnf2.is_sat_for_truth_assignment(&val(false, true, true, false)));

        let not_x = Nnf::from(nlit("x"));
        assert!(not_x.is_sat_for_truth_assignment(&valuation(&[("x", false)])));
        assert!(!not_x.is_sat_for_truth_assignment(&valuation(&[("x", true)])));
    }

    #[test]
    fn test_clause_to_nnf() {
        let nnf = clause(&[lit("x"), nlit("y")]).to_nnf().unwrap();
        assert_eq!(nnf.connective(), Some(Connective::Or));
        assert_eq!(nnf.to_string(), "(x \u{2228} \u{00AC}y)");
        assert!(Clause::empty().to_nnf().is_err());
    }
}
