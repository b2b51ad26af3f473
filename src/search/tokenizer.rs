//! Romanized query tokenizer
//!
//! Supports:
//! - Lower-casing (Bengali has no case, so only Latin is affected)
//! - Whitespace runs collapsed into a single flexible gap
//! - Digraph-first maximal munch: a recognized pair is never split again

use super::table;

/// One unit of a preprocessed query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Two source characters forming one sound, e.g. `sh`
    Digraph(char, char),
    /// Any other single character, classified or not
    Char(char),
    /// A whitespace run; matches zero or more characters
    Gap,
}

/// Lower-case and collapse whitespace into gap markers
///
/// Leading and trailing whitespace also become gaps, a gap at either end of
/// an unanchored pattern matches the same texts as no gap at all.
pub fn preprocess(query: &str) -> Vec<Token> {
    let mut units = Vec::with_capacity(query.len());
    let mut in_gap = false;

    for c in query.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_gap {
                units.push(Token::Gap);
                in_gap = true;
            }
            continue;
        }
        in_gap = false;
        units.push(Token::Char(c));
    }

    units
}

/// Tokenize a query, digraphs taking priority over single letters
pub fn tokenize(query: &str) -> Vec<Token> {
    let units = preprocess(query);
    let mut tokens = Vec::with_capacity(units.len());
    let mut i = 0;

    while i < units.len() {
        if let (Token::Char(first), Some(Token::Char(second))) = (units[i], units.get(i + 1)) {
            if table::is_digraph(first, *second) {
                tokens.push(Token::Digraph(first, *second));
                i += 2;
                continue;
            }
        }
        tokens.push(units[i]);
        i += 1;
    }

    tokens
}
