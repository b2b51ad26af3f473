//! Literal pattern - case-insensitive substring matcher over the raw query
//!
//! Metacharacters in the query are always escaped: the query is searched as
//! text, never run as a user-supplied regular expression.

use regex::{Regex, RegexBuilder};

use super::schema::MatchOptions;

/// Compiled matcher backing both literal and fallback patterns
#[derive(Debug, Clone)]
pub enum Matcher {
    Regex(Regex),
    /// Used only when the engine refuses even the escaped program
    Substring { needle: String, case_insensitive: bool },
}

impl Matcher {
    /// Build a regex matcher from a pattern source
    pub fn build(source: &str, options: &MatchOptions) -> Result<Self, regex::Error> {
        RegexBuilder::new(source)
            .case_insensitive(options.case_insensitive)
            .size_limit(options.size_limit)
            .build()
            .map(Matcher::Regex)
    }

    /// Escaped literal matcher; never fails
    pub fn literal(text: &str, options: &MatchOptions) -> Self {
        Self::build(&regex::escape(text), options).unwrap_or_else(|e| {
            tracing::debug!("Literal regex refused ({}), using plain substring", e);
            Matcher::Substring {
                needle: if options.case_insensitive { text.to_lowercase() } else { text.to_string() },
                case_insensitive: options.case_insensitive,
            }
        })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Matcher::Regex(re) => re.is_match(haystack),
            Matcher::Substring { needle, case_insensitive: true } => {
                haystack.to_lowercase().contains(needle.as_str())
            }
            Matcher::Substring { needle, case_insensitive: false } => {
                haystack.contains(needle.as_str())
            }
        }
    }

    /// Pattern source, for logging
    pub fn as_str(&self) -> &str {
        match self {
            Matcher::Regex(re) => re.as_str(),
            Matcher::Substring { needle, .. } => needle,
        }
    }
}

/// Literal pattern for Latin-script matches (titles and authors already in Latin)
#[derive(Debug, Clone)]
pub struct LiteralPattern {
    matcher: Matcher,
}

impl LiteralPattern {
    /// Compile the raw query; total over all inputs
    pub fn compile(query: &str, options: &MatchOptions) -> Self {
        Self { matcher: Matcher::literal(query, options) }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        self.matcher.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        let p = LiteralPattern::compile("hobbit", &MatchOptions::default());
        assert!(p.is_match("The Hobbit"));
        assert!(p.is_match("THE HOBBIT"));
        assert!(!p.is_match("The Hobit"));
    }

    #[test]
    fn test_metacharacters_are_escaped() {
        let p = LiteralPattern::compile("c++ (3rd ed.)", &MatchOptions::default());
        assert!(p.is_match("Learning C++ (3rd ed.)"));
        assert!(!p.is_match("Learning c (3rd edX)"));

        // would be an invalid regex if passed through
        let p = LiteralPattern::compile("[unclosed", &MatchOptions::default());
        assert!(p.is_match("an [unclosed bracket"));

        let p = LiteralPattern::compile(".*", &MatchOptions::default());
        assert!(!p.is_match("anything"));
        assert!(p.is_match("glob .* here"));
    }

    #[test]
    fn test_substring_fallback_when_engine_refuses() {
        let options = MatchOptions::default().with_size_limit(16);
        assert!(Matcher::build("(?:a|b)+c{100}", &options).is_err());

        let p = LiteralPattern::compile("Pather Panchali", &options);
        assert!(p.is_match("pather panchali, 1929"));
        assert!(!p.is_match("aparajito"));

        let m = Matcher::Substring { needle: "panchali".to_string(), case_insensitive: true };
        assert!(m.is_match("Pather PANCHALI"));
        assert_eq!(m.as_str(), "panchali");
    }

    #[test]
    fn test_case_sensitive_option() {
        let options = MatchOptions { case_insensitive: false, ..MatchOptions::default() };
        let p = LiteralPattern::compile("Tagore", &options);
        assert!(p.is_match("Rabindranath Tagore"));
        assert!(!p.is_match("rabindranath tagore"));
    }
}
