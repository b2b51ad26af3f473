//! Phonetic pattern compiler
//!
//! Turns a romanized query into a matcher accepting the plausible Bengali
//! spellings of it. "aranyak" becomes
//! `(?:অ|আ|া)?(?:র|ড়|...)(?:অ|আ|া)?(?:ন|ণ|...)(?:য়|য|্য)(?:অ|আ|া)?(?:ক|খ)`
//! which matches "আরণ্যক", "আরন্যক" and "অরণ্যক" alike.
//!
//! Compilation is total:
//! - unclassified characters become escaped literals, so the assembled
//!   program is well formed by construction
//! - if the engine still refuses it (program size), the pattern degrades to
//!   a literal matcher over the original query

use std::fmt::Write;

use super::literal::Matcher;
use super::schema::MatchOptions;
use super::table;
use super::tokenizer::{tokenize, Token};

/// One position of a phonetic pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Any one of these script tokens; `""` makes the position optional
    Group(&'static [&'static str]),
    /// A character with no table entry, matched as itself
    Literal(char),
    /// Zero or more arbitrary characters
    Gap,
}

/// Compiled phonetic pattern
#[derive(Debug, Clone)]
pub struct PhoneticPattern {
    elements: Vec<Element>,
    matcher: Matcher,
    fallback: bool,
}

impl PhoneticPattern {
    /// Compile a romanized query
    pub fn compile(query: &str, options: &MatchOptions) -> Self {
        let elements = elements(query);
        let source = render(&elements);

        match Matcher::build(&source, options) {
            Ok(matcher) => Self { elements, matcher, fallback: false },
            Err(e) => {
                tracing::debug!("Phonetic pattern refused for {:?}: {}; falling back to literal", query, e);
                Self {
                    elements,
                    matcher: Matcher::literal(query, options),
                    fallback: true,
                }
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Position-ordered groups
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Whether the literal fallback is in use
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Regex source, for logging
    pub fn as_str(&self) -> &str {
        self.matcher.as_str()
    }
}

/// Map tokens to pattern elements in source order
pub fn elements(query: &str) -> Vec<Element> {
    tokenize(query)
        .into_iter()
        .map(|token| match token {
            Token::Digraph(first, second) => {
                let pair: String = [first, second].iter().collect();
                table::digraph(&pair)
                    .map(Element::Group)
                    // tokenizer only emits digraphs present in the table
                    .unwrap_or(Element::Literal(first))
            }
            Token::Char(c) => table::letter(c)
                .map(Element::Group)
                .unwrap_or(Element::Literal(c)),
            Token::Gap => Element::Gap,
        })
        .collect()
}

/// Assemble elements into a regex source
pub fn render(elements: &[Element]) -> String {
    let mut source = String::new();

    for element in elements {
        match element {
            Element::Group(variants) => {
                let optional = variants.iter().any(|v| v.is_empty());
                let alternatives: Vec<String> = variants
                    .iter()
                    .filter(|v| !v.is_empty())
                    .map(|v| regex::escape(v))
                    .collect();
                let _ = write!(source, "(?:{})", alternatives.join("|"));
                if optional {
                    source.push('?');
                }
            }
            Element::Literal(c) => {
                let mut buf = [0u8; 4];
                source.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            }
            Element::Gap => source.push_str(".*"),
        }
    }

    source
}
