//! Search schema: which fields are searched and how patterns are built

use serde::{Deserialize, Serialize};

/// Maximum number of records a search returns
pub const RESULT_CAP: usize = 20;

/// Searchable text attributes of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Primary name
    Title,
    /// Secondary name
    Author,
}

impl SearchField {
    /// Default field set, primary name first
    pub const DEFAULT: [SearchField; 2] = [SearchField::Title, SearchField::Author];
}

/// A record the evaluator can test
pub trait Searchable {
    /// Opaque identity used for deduplication
    fn search_id(&self) -> &str;

    /// Text of one searchable field
    fn search_text(&self, field: SearchField) -> &str;
}

/// Matching-engine configuration, passed explicitly to every pattern builder
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Case-insensitive matching end to end
    pub case_insensitive: bool,
    /// Upper bound on the compiled program size in bytes
    pub size_limit: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            size_limit: 10 * (1 << 20),
        }
    }
}

impl MatchOptions {
    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }
}
