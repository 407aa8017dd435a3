// Error types shared across the crate.

use thiserror::Error;

pub type FormulaResult<T> = std::result::Result<T, FormulaError>;
pub type ParseResult<T> = std::result::Result<T, ParseError>;
pub type CheckResult<T> = std::result::Result<T, CheckError>;
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

/// Violations of the structural invariants of the formula data model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("invalid variable name: a variable needs at least one character")]
    EmptyVariable,

    #[error("a CNF only holds disjunctive clauses, received the conjunctive clause {0}")]
    ConjunctiveClauseInCnf(String),

    #[error("an NNF group with {0} members needs a connective")]
    MissingConnective(usize),

    #[error("an NNF group needs at least one member")]
    EmptyGroup,

    #[error("{clause} can not be converted to an implication: {reason}")]
    NotAnImplication {
        clause: String,
        reason: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{0}' is not a literal")]
    NotALiteral(String),

    #[error("'{0}' is not a clause")]
    NotAClause(String),

    #[error("'{0}' mixes conjunction and disjunction without parentheses")]
    MixedConnectives(String),

    #[error("unrecognized character '{0}'")]
    UnrecognizedCharacter(char),

    #[error("unrecognized token '{0}'")]
    UnrecognizedToken(String),

    #[error("empty input")]
    EmptyInput,

    #[error(transparent)]
    Formula(#[from] FormulaError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndSetError {
    #[error("clauses {0} and {1} contain a complementary pair of literals")]
    ComplementaryLiterals(String, String),

    #[error("IND({expected}) received an independent set of {found} clauses")]
    SizeMismatch { expected: usize, found: usize },
}

/// Failures of the satisfiability and entailment checkers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("alpha needs to be a CNF to determine entailment, received {0}")]
    AlphaNotCnf(&'static str),

    #[error("beta is a conjunctive clause; pass it as a CNF of unit clauses instead")]
    ConjunctiveBeta,

    #[error("beta is an NNF; consider using a different entailment checker")]
    NnfBeta,

    #[error("beta is a CNF with a non-unit clause, so it can't be negated to a disjunctive clause; consider using a different entailment checker")]
    NonUnitCnfBeta,

    #[error("exact counting supports at most {max} variables, the CNF has {found}")]
    TooManyVariables { max: usize, found: usize },

    #[error("the inclusion-exclusion count overflowed")]
    CountOverflow,

    #[error(transparent)]
    IndSet(#[from] IndSetError),

    #[error(transparent)]
    Formula(#[from] FormulaError),
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("the prefix '{prefix}' for internal nodes collides with the variable '{variable}'")]
    PrefixCollision { prefix: String, variable: String },

    #[error("invalid internal variable prefix: {0}")]
    InvalidPrefix(#[from] regex::Error),

    #[error(transparent)]
    Formula(#[from] FormulaError),
}
