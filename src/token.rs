// ### Token constants and lexing library. ###

use crate::error::{ParseError, ParseResult};

#[derive(Debug, PartialEq, Clone, Eq)]
pub enum Token {
    Open,
    Close,
    And,
    Or,
    Not,
    Bottom,
    Name(String),
}

// Characters that combine into multi-character connectives ("&&", "||").
const SYMBOLIC: [char; 2] = ['&', '|'];

fn single_char_token(c: char) -> Option<Token> {
    match c {
        '(' => Some(Token::Open),
        ')' => Some(Token::Close),
        '\u{2227}' => Some(Token::And),
        '\u{2228}' => Some(Token::Or),
        '\u{00AC}' | '!' => Some(Token::Not),
        '\u{22A5}' => Some(Token::Bottom),
        _ => None,
    }
}

fn lexwhile(accept: impl Fn(char) -> bool, input_chars: &[char]) -> usize {
    // Increment an index until the character is no longer accepted.
    let mut bound = 0;
    for c in input_chars {
        if accept(*c) {
            bound += 1
        } else {
            break;
        }
    }
    bound
}

fn word_token(word: String) -> Token {
    // Connective words are case-insensitive.
    match word.to_lowercase().as_str() {
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        _ => Token::Name(word),
    }
}

fn symbolic_token(symbol: String) -> ParseResult<Token> {
    match symbol.as_str() {
        "&&" => Ok(Token::And),
        "||" => Ok(Token::Or),
        _ => Err(ParseError::UnrecognizedToken(symbol)),
    }
}

fn lex_inner(all_input_chars: &[char]) -> ParseResult<Vec<Token>> {
    // Read one token at a time off the front of the remaining input.
    let mut tokens = Vec::new();
    let mut input_chars = all_input_chars;
    loop {
        let space_bound = lexwhile(char::is_whitespace, input_chars);
        input_chars = &input_chars[space_bound..];
        let head = match input_chars.first() {
            Some(head) => *head,
            None => return Ok(tokens),
        };

        let bound = if let Some(token) = single_char_token(head) {
            tokens.push(token);
            1
        } else if head.is_ascii_alphanumeric() {
            let bound = lexwhile(|c| c.is_ascii_alphanumeric(), input_chars);
            tokens.push(word_token(input_chars[..bound].iter().collect()));
            bound
        } else if SYMBOLIC.contains(&head) {
            let bound = lexwhile(|c| SYMBOLIC.contains(&c), input_chars);
            tokens.push(symbolic_token(input_chars[..bound].iter().collect())?);
            bound
        } else {
            return Err(ParseError::UnrecognizedCharacter(head));
        };
        input_chars = &input_chars[bound..];
    }
}

fn explode(input: &str) -> Vec<char> {
    input.chars().collect()
}

pub fn lex(input: &str) -> ParseResult<Vec<Token>> {
    lex_inner(&explode(input)[..])
}
