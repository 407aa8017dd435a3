// Satisfiability by inclusion-exclusion over independent sets of clauses.
//
// A set of clauses can be falsified at once iff no two of its literals are
// complementary, and then exactly 2^(n - v) of the 2^n assignments falsify it,
// v being the number of variables the set mentions.  Summing these counts with
// alternating signs over all such sets counts the assignments falsifying at least
// one clause; the CNF is satisfiable iff that count falls short of 2^n.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::checker::SatChecker;
use crate::error::{CheckError, CheckResult, IndSetError};
use crate::formula::{Clause, Cnf, Literal};
use crate::utils::all_pairs;

/// The largest number of variables the exact count fits in an `i128` for.
pub const MAX_EXACT_VARIABLES: usize = 126;

fn power_of_two(exponent: usize, total_vars: usize) -> CheckResult<i128> {
    if exponent > MAX_EXACT_VARIABLES {
        return Err(CheckError::TooManyVariables {
            max: MAX_EXACT_VARIABLES,
            found: total_vars,
        });
    }
    Ok(1i128 << exponent)
}

/// Clauses without a complementary pair of literals among them.
#[derive(Debug, PartialEq, Clone, Hash, Eq, PartialOrd, Ord)]
pub struct IndSet {
    clauses: BTreeSet<Clause>,
}

impl IndSet {
    pub fn new(clauses: BTreeSet<Clause>) -> Result<IndSet, IndSetError> {
        let mut seen: BTreeMap<Literal, &Clause> = BTreeMap::new();
        for clause in &clauses {
            for lit in clause.literals() {
                if let Some(other) = seen.get(&lit.negated()) {
                    return Err(IndSetError::ComplementaryLiterals(
                        other.to_string(),
                        clause.to_string(),
                    ));
                }
                seen.insert(lit.clone(), clause);
            }
        }
        Ok(IndSet { clauses })
    }

    pub fn clauses(&self) -> &BTreeSet<Clause> {
        &self.clauses
    }

    /// The number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn num_variables(&self) -> usize {
        self.clauses
            .iter()
            .flat_map(|clause| clause.variable_set())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// The number of assignments over `total_vars` variables falsifying every clause.
    pub fn size(&self, total_vars: usize) -> CheckResult<i128> {
        let free = total_vars.saturating_sub(self.num_variables());
        power_of_two(free, total_vars)
    }

    /// None when the two sets together hold a complementary pair.
    pub fn union(&self, other: &IndSet) -> Option<IndSet> {
        IndSet::new(&self.clauses | &other.clauses).ok()
    }
}

/// IND(i): the independent sets of exactly `i` clauses.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Ind {
    i: usize,
    independent_sets: BTreeSet<IndSet>,
}

impl Ind {
    pub fn new(i: usize, independent_sets: BTreeSet<IndSet>) -> Result<Ind, IndSetError> {
        if let Some(wrong) = independent_sets.iter().find(|set| set.len() != i) {
            return Err(IndSetError::SizeMismatch {
                expected: i,
                found: wrong.len(),
            });
        }
        Ok(Ind {
            i,
            independent_sets,
        })
    }

    pub fn i(&self) -> usize {
        self.i
    }

    pub fn independent_sets(&self) -> &BTreeSet<IndSet> {
        &self.independent_sets
    }

    /// (-1)^(i-1) times the summed sizes of the member sets.
    pub fn size(&self, total_vars: usize) -> CheckResult<i128> {
        let mut sum: i128 = 0;
        for set in &self.independent_sets {
            sum = sum
                .checked_add(set.size(total_vars)?)
                .ok_or(CheckError::CountOverflow)?;
        }
        if self.i % 2 == 0 {
            sum = -sum;
        }
        Ok(sum)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IndependentSet;

impl IndependentSet {
    /// IND(1), IND(2), ... up to the last non-empty level.
    ///
    /// A level can not hold more clauses than the CNF, so there are at most as many
    /// levels as clauses.  Clauses with complementary literals are never falsified
    /// and are left out of IND(1).
    pub fn construct_inds(cnf: &Cnf) -> CheckResult<Vec<Ind>> {
        let first_level = cnf
            .clauses()
            .iter()
            .filter(|clause| !clause.has_complementary_literals())
            .map(|clause| IndSet::new(BTreeSet::from([clause.clone()])))
            .collect::<Result<BTreeSet<_>, _>>()?;
        debug!("independent sets: IND(1) has {} sets", first_level.len());
        let mut inds = vec![Ind::new(1, first_level)?];

        for i in 2..=cnf.clauses().len() {
            let previous: Vec<&IndSet> = inds[i - 2].independent_sets().iter().collect();
            let level = if i == 2 {
                all_pairs(&previous)
                    .into_iter()
                    .filter_map(|(left, right)| left.union(right))
                    .collect::<BTreeSet<_>>()
            } else {
                IndependentSet::join(&previous, i)
            };
            debug!("independent sets: IND({}) has {} sets", i, level.len());
            if level.is_empty() {
                break;
            }
            inds.push(Ind::new(i, level)?);
        }
        Ok(inds)
    }

    // Sets of i clauses from sorted sets of i - 1 clauses agreeing on all but their
    // last clause.  Every independent set of i clauses arises this way exactly once.
    fn join(previous: &[&IndSet], i: usize) -> BTreeSet<IndSet> {
        let prefix = |set: &IndSet| set.clauses().iter().take(i - 2).cloned().collect::<Vec<_>>();
        let mut level = BTreeSet::new();
        for (index, left) in previous.iter().enumerate() {
            let left_prefix = prefix(*left);
            for right in &previous[index + 1..] {
                // Sets sharing a prefix are adjacent in sorted order.
                if prefix(*right) != left_prefix {
                    break;
                }
                if let Some(union) = left.union(right) {
                    level.insert(union);
                }
            }
        }
        level
    }
}

impl SatChecker for IndependentSet {
    fn name(&self) -> &'static str {
        "independent sets"
    }

    fn is_sat(&self, cnf: &Cnf) -> CheckResult<bool> {
        let num_variables = cnf.num_variables();
        let all_assignments = power_of_two(num_variables, num_variables)?;
        let mut falsifying: i128 = 0;
        for ind in IndependentSet::construct_inds(cnf)? {
            falsifying = falsifying
                .checked_add(ind.size(num_variables)?)
                .ok_or(CheckError::CountOverflow)?;
        }
        debug!(
            "independent sets: {} of {} assignments falsify some clause",
            falsifying, all_assignments
        );
        Ok(falsifying != all_assignments)
    }
}

#[cfg(test)]
mod independent_set_tests {
    use super::*;
    use crate::formula::test_support::*;
    use crate::formula::Formula;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn set_of(clauses: &[Clause]) -> BTreeSet<Clause> {
        clauses.iter().cloned().collect()
    }

    #[test]
    fn test_ind_set_rejects_complementary_literals() {
        let result = IndSet::new(set_of(&[
            clause(&[lit("x"), lit("y")]),
            clause(&[nlit("x"), lit("z")]),
        ]));
        assert!(matches!(result, Err(IndSetError::ComplementaryLiterals(_, _))));
        // Also inside a single clause.
        assert!(IndSet::new(set_of(&[clause(&[lit("x"), nlit("x")])])).is_err());
    }

    #[test]
    fn test_ind_set_size() {
        let set = IndSet::new(set_of(&[
            clause(&[lit("x"), lit("y")]),
            clause(&[lit("x"), nlit("z")]),
        ]))
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.num_variables(), 3);
        assert_eq!(set.size(3).unwrap(), 1);
        assert_eq!(set.size(4).unwrap(), 2);
        assert_eq!(
            set.size(200),
            Err(CheckError::TooManyVariables {
                max: MAX_EXACT_VARIABLES,
                found: 200
            })
        );
    }

    #[test]
    fn test_ind_set_union() {
        let xy = IndSet::new(set_of(&[clause(&[lit("x"), lit("y")])])).unwrap();
        let xz = IndSet::new(set_of(&[clause(&[lit("x"), lit("z")])])).unwrap();
        let not_x = IndSet::new(set_of(&[clause(&[nlit("x")])])).unwrap();
        assert_eq!(xy.union(&xz).unwrap().len(), 2);
        assert_eq!(xy.union(&not_x), None);
    }

    #[test]
    fn test_ind_rejects_mismatched_sizes() {
        let pair = IndSet::new(set_of(&[
            clause(&[lit("x"), lit("y")]),
            clause(&[lit("x"), nlit("z")]),
        ]))
        .unwrap();
        let triple = IndSet::new(set_of(&[
            clause(&[lit("x"), lit("y")]),
            clause(&[lit("x"), lit("z")]),
            clause(&[nlit("w"), lit("z")]),
        ]))
        .unwrap();
        let result = Ind::new(2, BTreeSet::from([pair.clone(), triple]));
        assert_eq!(
            result,
            Err(IndSetError::SizeMismatch {
                expected: 2,
                found: 3
            })
        );
        let ind = Ind::new(2, BTreeSet::from([pair])).unwrap();
        // Sign of an even level is negative.
        assert_eq!(ind.size(3).unwrap(), -1);
    }

    #[test]
    fn test_construct_inds() {
        init();
        let contradiction = cnf(&[&[lit("x")], &[nlit("x")]]);
        assert_eq!(IndependentSet::construct_inds(&contradiction).unwrap().len(), 1);

        let shared = cnf(&[&[lit("x"), lit("y")], &[lit("x"), lit("z")]]);
        assert_eq!(IndependentSet::construct_inds(&shared).unwrap().len(), 2);

        let chain = cnf(&[&[lit("x")], &[nlit("x"), lit("y")], &[nlit("y")], &[lit("a"), lit("z")]]);
        let inds = IndependentSet::construct_inds(&chain).unwrap();
        let level_sizes: Vec<usize> = inds.iter().map(|ind| ind.independent_sets().len()).collect();
        assert_eq!(level_sizes, vec![4, 4, 1]);
        assert_eq!(inds[2].i(), 3);
    }

    #[test]
    fn test_construct_inds_skips_tautologies() {
        let formula = cnf(&[&[lit("x"), nlit("x")], &[lit("y")]]);
        let inds = IndependentSet::construct_inds(&formula).unwrap();
        assert_eq!(inds.len(), 1);
        assert_eq!(inds[0].independent_sets().len(), 1);
        assert!(IndependentSet.is_sat(&formula).unwrap());

        let only_tautologies = cnf(&[&[lit("x"), nlit("x")], &[nlit("y"), lit("y"), lit("z")]]);
        let inds = IndependentSet::construct_inds(&only_tautologies).unwrap();
        assert!(inds[0].independent_sets().is_empty());
        assert!(IndependentSet.is_sat(&only_tautologies).unwrap());
    }

    #[test]
    fn test_levels_beyond_the_variable_count() {
        // Two variables, but the falsifying count needs IND(3): {x}, {y}, {x ∨ y}.
        let formula = cnf(&[&[lit("x")], &[lit("y")], &[lit("x"), lit("y")], &[nlit("x"), nlit("y")]]);
        let inds = IndependentSet::construct_inds(&formula).unwrap();
        assert_eq!(inds.len(), 3);
        assert!(!IndependentSet.is_sat(&formula).unwrap());
    }

    #[test]
    fn test_is_sat() {
        init();
        let cases = vec![
            (cnf(&[&[lit("x")], &[nlit("x")]]), false),
            (cnf(&[&[lit("x"), lit("y")], &[nlit("x"), nlit("y")]]), true),
            (cnf(&[&[lit("x")], &[nlit("x"), lit("y")], &[nlit("y")]]), false),
            (
                cnf(&[&[lit("x")], &[nlit("x"), lit("y")], &[nlit("y")], &[lit("a"), lit("z")]]),
                false,
            ),
            (
                cnf(&[
                    &[lit("a"), nlit("b"), nlit("c")],
                    &[nlit("a"), nlit("b")],
                    &[lit("b")],
                    &[lit("c")],
                ]),
                false,
            ),
            (
                cnf(&[
                    &[lit("y"), lit("z"), lit("u")],
                    &[nlit("y"), nlit("z"), lit("w")],
                    &[lit("y"), lit("z")],
                    &[nlit("w")],
                ]),
                true,
            ),
            (Cnf::empty(), true),
        ];
        for (formula, expected) in cases {
            assert_eq!(IndependentSet.is_sat(&formula).unwrap(), expected, "{}", formula);
        }
    }

    #[test]
    fn test_entails() {
        let x: Formula = Cnf::parse("x").unwrap().into();
        assert!(IndependentSet.entails(&x, &Cnf::parse("x").unwrap().into()).unwrap());
        assert!(!IndependentSet.entails(&x, &lit("y").into()).unwrap());
        assert!(!IndependentSet.entails(&x, &nlit("x").into()).unwrap());
        assert!(IndependentSet
            .entails(&x, &Clause::parse("x OR y").unwrap().into())
            .unwrap());
        assert!(!IndependentSet
            .entails(&x, &Cnf::parse("x AND y").unwrap().into())
            .unwrap());
        let err = IndependentSet
            .entails(&x, &Cnf::parse("(x or y) and z").unwrap().into())
            .unwrap_err();
        assert!(err.to_string().contains("CNF"));
    }
}
