use crate::types::{ChatMessage, ScoredChunk};

/// Ranks a corpus it holds for a free-text query.
pub trait Retriever: Send + Sync {
    fn search(&self, query: &str, k: usize) -> Vec<ScoredChunk<'_>>;
}

/// Everything a response generator needs for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub history: Vec<ChatMessage>,
    pub user: String,
}

/// Produces a natural-language answer, typically by calling out to an LLM.
pub trait ResponseGenerator: Send + Sync {
    fn generate(&self, prompt: &Prompt) -> anyhow::Result<String>;
}
