// Parsing of literals, clauses and CNFs from text.
//
// Accepted spellings: `and`/`&&`/∧, `or`/`||`/∨, `not`/`!`/¬ (words are
// case-insensitive).  The word `not` may also be glued to a variable name, in any
// case, as in `NOTx` or `notx`.  A name that starts with those letters is therefore
// read as a negation: `nothing` parses as ¬hing.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::error::{ParseError, ParseResult};
use crate::formula::{Clause, Cnf, Connective, Literal};
use crate::token::{lex, Token};

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<not>(?i:not))?(?P<name>[a-zA-Z]+[0-9]*)$").expect("name pattern is valid")
    })
}

fn literal_from_tokens(tokens: &[Token], source: &str) -> ParseResult<Literal> {
    let not_a_literal = || ParseError::NotALiteral(source.trim().to_string());
    let (negated, word) = match tokens {
        [Token::Name(word)] => (false, word),
        [Token::Not, Token::Name(word)] => (true, word),
        _ => return Err(not_a_literal()),
    };
    let captures = name_pattern().captures(word).ok_or_else(not_a_literal)?;
    let glued_not = captures.name("not").is_some();
    if negated && glued_not {
        // Double negation is not a literal.
        return Err(not_a_literal());
    }
    let name = captures.name("name").ok_or_else(not_a_literal)?.as_str();
    Ok(Literal::new(name, negated || glued_not)?)
}

fn strip_parens<'a>(tokens: &'a [Token], source: &str) -> ParseResult<&'a [Token]> {
    let inner = match tokens {
        [Token::Open, inner @ .., Token::Close] => inner,
        _ => tokens,
    };
    if inner.contains(&Token::Open) || inner.contains(&Token::Close) {
        return Err(ParseError::NotAClause(source.trim().to_string()));
    }
    Ok(inner)
}

fn clause_from_tokens(tokens: &[Token], source: &str, default: Connective) -> ParseResult<Clause> {
    let inner = strip_parens(tokens, source)?;
    match inner {
        [] => return Err(ParseError::NotAClause(source.trim().to_string())),
        [Token::Bottom] => return Ok(Clause::empty()),
        _ => {}
    }
    let has_and = inner.contains(&Token::And);
    let has_or = inner.contains(&Token::Or);
    let connective = match (has_and, has_or) {
        (true, true) => return Err(ParseError::MixedConnectives(source.trim().to_string())),
        (true, false) => Connective::And,
        (false, true) => Connective::Or,
        (false, false) => default,
    };
    let separator = match connective {
        Connective::And => Token::And,
        Connective::Or => Token::Or,
    };
    let literals = inner
        .split(|token| *token == separator)
        .map(|chunk| literal_from_tokens(chunk, source))
        .collect::<ParseResult<Vec<Literal>>>()?;
    Ok(Clause::with_connective(literals, connective))
}

fn split_top_level_conjunction(tokens: &[Token], source: &str) -> ParseResult<Vec<Vec<Token>>> {
    let mut chunks = vec![Vec::new()];
    let mut depth = 0usize;
    for token in tokens {
        match token {
            Token::Open => depth += 1,
            Token::Close => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::NotAClause(source.trim().to_string()))?
            }
            Token::And if depth == 0 => {
                chunks.push(Vec::new());
                continue;
            }
            _ => {}
        }
        if let Some(chunk) = chunks.last_mut() {
            chunk.push(token.clone());
        }
    }
    Ok(chunks)
}

impl Literal {
    pub fn parse(input: &str) -> ParseResult<Literal> {
        let tokens = lex(input)?;
        debug!("Literal::parse tokens {tokens:?}");
        literal_from_tokens(&tokens, input)
    }
}

impl Clause {
    pub fn parse(input: &str) -> ParseResult<Clause> {
        Clause::parse_with_default(input, true)
    }

    /// `disjunctive_by_default` decides the connective of a clause with a single literal.
    pub fn parse_with_default(input: &str, disjunctive_by_default: bool) -> ParseResult<Clause> {
        let tokens = lex(input)?;
        debug!("Clause::parse tokens {tokens:?}");
        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let default = if disjunctive_by_default {
            Connective::Or
        } else {
            Connective::And
        };
        clause_from_tokens(&tokens, input, default)
    }
}

impl Cnf {
    pub fn parse(input: &str) -> ParseResult<Cnf> {
        let tokens = lex(input)?;
        debug!("Cnf::parse tokens {tokens:?}");
        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let clauses = split_top_level_conjunction(&tokens, input)?
            .iter()
            .map(|chunk| clause_from_tokens(chunk, input, Connective::Or))
            .collect::<ParseResult<Vec<Clause>>>()?;
        Ok(Cnf::new(clauses)?)
    }
}
