// Satisfiability, entailment and equivalence by enumerating every truth assignment.
//
// WARNING: running time is Theta(2^n) in the number of variables.

use std::cmp;
use std::collections::BTreeSet;
use std::io::{self, Write};

use log::debug;

use crate::checker::SatChecker;
use crate::error::CheckResult;
use crate::formula::{Cnf, Formula, Valuation};
use crate::utils::write;

/// The lazy sequence of all 2^n assignments over a fixed, sorted set of variables.
///
/// Position i of the internal counter selects the value of the i-th variable.  The
/// first variable changes fastest and the sequence starts from all-true.  With no variables the
/// sequence holds exactly one (empty) assignment.
#[derive(Debug, Clone)]
pub struct Assignments {
    variables: Vec<String>,
    counter: Vec<bool>,
    exhausted: bool,
}

impl Assignments {
    pub fn new(variables: &BTreeSet<String>) -> Assignments {
        let variables: Vec<String> = variables.iter().cloned().collect();
        let counter = vec![false; variables.len()];
        Assignments {
            variables,
            counter,
            exhausted: false,
        }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Start again from the first assignment.
    pub fn restart(&mut self) {
        self.counter.iter_mut().for_each(|bit| *bit = false);
        self.exhausted = false;
    }

    fn current(&self) -> Valuation {
        self.variables
            .iter()
            .zip(&self.counter)
            .map(|(variable, bit)| (variable.clone(), !bit))
            .collect()
    }

    // Binary increment; returns false on overflow.
    fn advance(&mut self) -> bool {
        for bit in self.counter.iter_mut() {
            if *bit {
                *bit = false;
            } else {
                *bit = true;
                return true;
            }
        }
        false
    }
}

impl Iterator for Assignments {
    type Item = Valuation;

    fn next(&mut self) -> Option<Valuation> {
        if self.exhausted {
            return None;
        }
        let valuation = self.current();
        self.exhausted = !self.advance();
        Some(valuation)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl BruteForce {
    /// Every satisfying assignment, in enumeration order.
    pub fn get_model(&self, cnf: &Cnf) -> Vec<Valuation> {
        let model: Vec<Valuation> = Assignments::new(&cnf.variable_set())
            .filter(|valuation| cnf.is_sat_for_truth_assignment(valuation))
            .collect();
        debug!("brute force: {} has {} models", cnf, model.len());
        model
    }

    /// Whether both formulas agree on every assignment over their joint variables.
    pub fn is_equivalent(&self, alpha: &Formula, beta: &Formula) -> bool {
        let variables = &alpha.variable_set() | &beta.variable_set();
        Assignments::new(&variables).all(|valuation| {
            alpha.is_sat_for_truth_assignment(&valuation)
                == beta.is_sat_for_truth_assignment(&valuation)
        })
    }

    pub fn print_truth_table(&self, formula: &Formula, dest: &mut impl Write) -> io::Result<()> {
        let variables = formula.variable_set();
        let column_width = 1 + cmp::max(5, variables.iter().map(|x| x.len()).max().unwrap_or(0));
        // Pad String `s` with enough spaces to be `column_width`.
        let pad = |s: String| format!("{:width$}", s, width = column_width);
        let make_row = |val: &Valuation| {
            let input_string = String::from_iter(
                variables
                    .iter()
                    .map(|x| val[x])
                    .map(|value| value.to_string())
                    .map(pad),
            );
            let output_string = formula.is_sat_for_truth_assignment(val).to_string();
            format!("{}| {}\n", input_string, output_string)
        };
        let body = String::from_iter(Assignments::new(&variables).map(|val| make_row(&val)));

        let header_lhs = String::from_iter(variables.iter().cloned().map(pad));
        let header = format!("{}| formula", header_lhs);
        let separator = String::from_iter(vec!['-'; header.chars().count()]);
        let result = format!("{}\n{}\n{}{}\n", header, separator, body, separator);
        write(dest, &result)
    }
}

impl SatChecker for BruteForce {
    fn name(&self) -> &'static str {
        "brute force"
    }

    fn is_sat(&self, cnf: &Cnf) -> CheckResult<bool> {
        let variables = cnf.variable_set();
        debug!(
            "brute force: {} clauses over {} variables",
            cnf.clauses().len(),
            variables.len()
        );
        // Stops at the first satisfying assignment.
        let sat = Assignments::new(&variables)
            .any(|valuation| cnf.is_sat_for_truth_assignment(&valuation));
        debug!("brute force: satisfiable = {sat}");
        Ok(sat)
    }

    /// Works for any pair of formula shapes.
    fn entails(&self, alpha: &Formula, beta: &Formula) -> CheckResult<bool> {
        let variables = &alpha.variable_set() | &beta.variable_set();
        Ok(Assignments::new(&variables).all(|valuation| {
            !alpha.is_sat_for_truth_assignment(&valuation)
                || beta.is_sat_for_truth_assignment(&valuation)
        }))
    }
}
