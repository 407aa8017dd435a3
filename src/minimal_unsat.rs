// Minimal unsatisfiability: unsatisfiable, but satisfiable once any one clause is dropped.

use log::debug;

use crate::checker::{default_checker, SatChecker};
use crate::error::CheckResult;
use crate::formula::Cnf;

/// Falls back to the default checker when `checker` is None.
pub fn is_minimally_unsatisfiable(cnf: &Cnf, checker: Option<&dyn SatChecker>) -> CheckResult<bool> {
    let checker = checker.unwrap_or(default_checker());

    // A minimally unsatisfiable CNF has more clauses than variables, exactly one
    // more when it is Horn.
    let deficiency = cnf.clauses().len() as isize - cnf.num_variables() as isize;
    if deficiency < 1 || (cnf.is_horn() && deficiency != 1) {
        debug!("minimal unsat: rejected {} on deficiency {}", cnf, deficiency);
        return Ok(false);
    }

    if checker.is_sat(cnf)? {
        return Ok(false);
    }
    for index in 0..cnf.clauses().len() {
        if !checker.is_sat(&cnf.without_clause(index))? {
            debug!(
                "minimal unsat: {} stays unsatisfiable without {}",
                cnf,
                cnf.clauses()[index]
            );
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod minimal_unsat_tests {
    use super::*;
    use crate::brute_force::BruteForce;
    use crate::independent_set::IndependentSet;
    use crate::two_sat::TwoSat;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn check(input: &str, checker: Option<&dyn SatChecker>) -> bool {
        is_minimally_unsatisfiable(&Cnf::parse(input).unwrap(), checker).unwrap()
    }

    #[test]
    fn test_default_checker() {
        init();
        assert!(!check("x", None));
        assert!(!check("(x OR y) AND (NOTx OR y) AND (x OR NOTy)", None));
        assert!(!check("(x) AND (NOTx) AND (y)", None));
        assert!(check("(x OR NOTy) AND (NOTx OR NOTy) AND (y)", None));
        assert!(!check(
            "(NOTa OR b) AND (NOTa OR NOTb or c) AND (NOTc OR NOTa) AND (a) AND (b)",
            None
        ));
        assert!(!check("(x OR y) AND (a OR NOTb) AND (a OR NOTy)", None));
    }

    #[test]
    fn test_other_checkers_agree() {
        init();
        let cases = [
            ("x", false),
            ("(x) AND (NOTx) AND (y)", false),
            ("(x OR NOTy) AND (NOTx OR NOTy) AND (y)", true),
            (
                "(NOTa OR b) AND (NOTa OR NOTb or c) AND (NOTc OR NOTa) AND (a) AND (b)",
                false,
            ),
            ("(x OR y) AND (a OR NOTb) AND (a OR NOTy)", false),
            ("(x OR y) AND (NOTx OR y) AND (x OR NOTy) AND (NOTx OR NOTy)", true),
        ];
        for checker in [&BruteForce as &dyn SatChecker, &IndependentSet, &TwoSat] {
            for (input, expected) in cases {
                assert_eq!(check(input, Some(checker)), expected, "{} with {}", input, checker.name());
            }
        }
    }
}
