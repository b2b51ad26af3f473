//! Search module - only provides matching capabilities (primitives)
//!
//! Architecture principles:
//! - Search only exposes primitives: compile a query, evaluate it over records
//! - The store supplies the corpus; search never filters inside the store
//! - Call direction: API → SearchEngine → RecordStore (unidirectional)
//!
//! Matching features:
//! - Romanized Latin queries match Bengali script through a phonetic table
//! - Every query is also matched literally, case-insensitive, metacharacters escaped
//! - Results are deduplicated and capped at `RESULT_CAP`

pub mod engine;
pub mod literal;
pub mod phonetic;
pub mod schema;
pub mod table;
pub mod tokenizer;

pub use engine::{search, CompiledQuery, MatchResultSet, SearchEngine, SearchError};
pub use literal::LiteralPattern;
pub use phonetic::PhoneticPattern;
pub use schema::{MatchOptions, SearchField, Searchable, RESULT_CAP};
