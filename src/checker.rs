// The satisfiability checker abstraction shared by every strategy.

use log::debug;

use crate::error::{CheckError, CheckResult};
use crate::formula::{Clause, Cnf, Formula};
use crate::two_sat::TwoSat;

pub trait SatChecker {
    fn name(&self) -> &'static str;

    fn is_sat(&self, cnf: &Cnf) -> CheckResult<bool>;

    /// Whether every model of `alpha` is a model of `beta`.
    ///
    /// The default reduces entailment to unsatisfiability of alpha ∧ ¬beta, which
    /// requires `alpha` to be a CNF and ¬beta to be expressible as a CNF, ie. beta
    /// is a literal, a disjunctive clause, or a CNF made only of unit clauses.
    ///
    /// An empty beta CNF is true under every assignment, so it is entailed by any
    /// alpha, satisfiable or not.  It is answered directly and never reduced to a
    /// satisfiability check of alpha alone.
    fn entails(&self, alpha: &Formula, beta: &Formula) -> CheckResult<bool> {
        let alpha = match alpha {
            Formula::Cnf(cnf) => cnf,
            other => return Err(CheckError::AlphaNotCnf(other.shape())),
        };
        let negated_beta = match negate_to_cnf(beta)? {
            Some(negated_beta) => negated_beta,
            // beta is the empty CNF, which every alpha entails.
            None => return Ok(true),
        };
        let combined = alpha.union(&negated_beta);
        debug!(
            "{}: entailment reduced to unsatisfiability of {}",
            self.name(),
            combined
        );
        Ok(!self.is_sat(&combined)?)
    }
}

/// The checker used when a caller does not choose one.
pub fn default_checker() -> &'static dyn SatChecker {
    &TwoSat
}

// ¬beta as a CNF, or None when beta is trivially true.
fn negate_to_cnf(beta: &Formula) -> CheckResult<Option<Cnf>> {
    match beta {
        Formula::Literal(lit) => Ok(Some(Cnf::from_disjunctive(vec![Clause::new(vec![
            lit.negated(),
        ])]))),
        Formula::Clause(clause) => match clause.negated() {
            Formula::Cnf(cnf) => Ok(Some(cnf)),
            _ => Err(CheckError::ConjunctiveBeta),
        },
        Formula::Cnf(cnf) if cnf.is_empty() => Ok(None),
        Formula::Cnf(cnf) => {
            if !cnf.clauses().iter().all(Clause::is_unit) {
                return Err(CheckError::NonUnitCnfBeta);
            }
            let negations = cnf
                .clauses()
                .iter()
                .flat_map(|clause| clause.literals().iter().map(|lit| lit.negated()))
                .collect();
            Ok(Some(Cnf::from_disjunctive(vec![Clause::new(negations)])))
        }
        Formula::Nnf(_) => Err(CheckError::NnfBeta),
    }
}

impl Cnf {
    pub fn is_sat(&self, checker: &dyn SatChecker) -> CheckResult<bool> {
        checker.is_sat(self)
    }
}
