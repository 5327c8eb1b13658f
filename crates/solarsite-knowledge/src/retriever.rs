use std::path::Path;

use solarsite_core::corpus::{self, CorpusLoader};
use solarsite_core::error::Result;
use solarsite_core::traits::Retriever;
use solarsite_core::types::{KnowledgeChunk, ScoredChunk};

use crate::query::Query;
use crate::search::rank;

/// Owns a corpus and ranks it by keyword score.
///
/// The corpus is fixed for the life of the value; loading a new one means
/// building a new retriever.
#[derive(Debug, Clone)]
pub struct KeywordRetriever {
    chunks: Vec<KnowledgeChunk>,
}

impl KeywordRetriever {
    pub fn new(chunks: Vec<KnowledgeChunk>) -> Result<Self> {
        corpus::validate(&chunks)?;
        Ok(Self { chunks })
    }

    /// The corpus compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Ok(Self { chunks: corpus::builtin()? })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self { chunks: CorpusLoader::new().load(path)? })
    }

    pub fn chunks(&self) -> &[KnowledgeChunk] {
        &self.chunks
    }
}

impl Retriever for KeywordRetriever {
    fn search(&self, query: &str, k: usize) -> Vec<ScoredChunk<'_>> {
        rank(&Query::parse(query), self.chunks.iter(), k)
    }
}
