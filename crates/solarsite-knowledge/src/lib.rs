//! solarsite-knowledge
//!
//! Keyword-scored retrieval over the knowledge corpus and the regex heuristics
//! that pull contact details out of chat messages. See `search` for the
//! scoring rules and `extract` for the customer-info patterns.

pub mod context;
pub mod extract;
pub mod query;
pub mod retriever;
pub mod search;

pub use context::build_context;
pub use extract::CustomerInfoExtractor;
pub use query::Query;
pub use retriever::KeywordRetriever;
pub use search::{
    search, search_in_category, search_scored, search_scored_in_category, CHAT_CONTEXT_LIMIT, DEFAULT_SEARCH_LIMIT,
};
