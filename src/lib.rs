pub mod brute_force;
pub mod checker;
pub mod error;
pub mod formula;
pub mod implication;
pub mod independent_set;
pub mod minimal_unsat;
pub mod nnf;
mod parse;
pub mod ps_graph;
pub mod qcnf;
mod token;
pub mod two_sat;
pub mod utils;

pub use checker::{default_checker, SatChecker};
pub use formula::{Clause, Cnf, Connective, Formula, Literal, Valuation};
pub use nnf::{Nnf, NnfItem};
pub use qcnf::{Qcnf, QuantifiedVariable};
