use tracing::debug;

use solarsite_core::types::{KnowledgeChunk, ScoredChunk};

use crate::query::Query;

/// Chunks handed to the response generator per chat turn.
pub const CHAT_CONTEXT_LIMIT: usize = 3;
/// Results for a plain search box.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Score every chunk, drop the zeros and keep the best `limit`.
///
/// Equal scores keep corpus order.
pub fn search_scored<'a>(query: &str, corpus: &'a [KnowledgeChunk], limit: usize) -> Vec<ScoredChunk<'a>> {
    rank(&Query::parse(query), corpus.iter(), limit)
}

pub fn search<'a>(query: &str, corpus: &'a [KnowledgeChunk], limit: usize) -> Vec<&'a KnowledgeChunk> {
    search_scored(query, corpus, limit).into_iter().map(|hit| hit.chunk).collect()
}

/// Like `search_scored`, restricted to chunks whose category matches (case-insensitive).
pub fn search_scored_in_category<'a>(
    query: &str,
    corpus: &'a [KnowledgeChunk],
    category: &str,
    limit: usize,
) -> Vec<ScoredChunk<'a>> {
    let in_category = corpus.iter().filter(|c| c.category.eq_ignore_ascii_case(category));
    rank(&Query::parse(query), in_category, limit)
}

pub fn search_in_category<'a>(
    query: &str,
    corpus: &'a [KnowledgeChunk],
    category: &str,
    limit: usize,
) -> Vec<&'a KnowledgeChunk> {
    search_scored_in_category(query, corpus, category, limit).into_iter().map(|hit| hit.chunk).collect()
}

pub(crate) fn rank<'a, I>(query: &Query, chunks: I, limit: usize) -> Vec<ScoredChunk<'a>>
where
    I: Iterator<Item = &'a KnowledgeChunk>,
{
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }
    let mut hits: Vec<ScoredChunk<'a>> = chunks
        .map(|chunk| ScoredChunk { chunk, score: query.score(chunk) })
        .filter(|hit| hit.score > 0)
        .collect();
    // stable: ties stay in corpus order
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    let matched = hits.len();
    hits.truncate(limit);
    debug!(query = query.phrase(), matched, returned = hits.len(), "knowledge search");
    hits
}
