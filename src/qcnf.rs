// Quantified CNF: a CNF together with a quantifier prefix over auxiliary variables.

use std::fmt;

use crate::error::{FormulaError, FormulaResult};
use crate::formula::Cnf;

pub const EXISTS: &str = "\u{2203}";
pub const FORALL: &str = "\u{2200}";

#[derive(Debug, PartialEq, Clone, Hash, Eq, PartialOrd, Ord)]
pub struct QuantifiedVariable {
    variable: String,
    universal: bool,
}

impl QuantifiedVariable {
    pub fn new(variable: &str, universal: bool) -> FormulaResult<QuantifiedVariable> {
        if variable.is_empty() {
            return Err(FormulaError::EmptyVariable);
        }
        Ok(QuantifiedVariable {
            variable: variable.to_string(),
            universal,
        })
    }

    pub fn existential(variable: &str) -> FormulaResult<QuantifiedVariable> {
        QuantifiedVariable::new(variable, false)
    }

    pub fn universal(variable: &str) -> FormulaResult<QuantifiedVariable> {
        QuantifiedVariable::new(variable, true)
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn is_universal(&self) -> bool {
        self.universal
    }
}

impl fmt::Display for QuantifiedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quantifier = if self.universal { FORALL } else { EXISTS };
        write!(f, "{}{}", quantifier, self.variable)
    }
}

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Qcnf {
    cnf: Cnf,
    quantified_variables: Vec<QuantifiedVariable>,
}

impl Qcnf {
    pub fn new(cnf: Cnf, quantified_variables: Vec<QuantifiedVariable>) -> Qcnf {
        Qcnf {
            cnf,
            quantified_variables,
        }
    }

    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    pub fn quantified_variables(&self) -> &[QuantifiedVariable] {
        &self.quantified_variables
    }
}

impl From<Cnf> for Qcnf {
    fn from(cnf: Cnf) -> Self {
        Qcnf::new(cnf, Vec::new())
    }
}

impl fmt::Display for Qcnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.quantified_variables.is_empty() {
            let prefix = self
                .quantified_variables
                .iter()
                .map(|var| var.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "{}: ", prefix)?;
        }
        self.cnf.fmt(f)
    }
}
