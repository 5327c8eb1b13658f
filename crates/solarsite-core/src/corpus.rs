//! Loading and validating the knowledge corpus.
//!
//! The hand-authored corpus ships inside the binary as JSON. A replacement
//! corpus can be read from a single `.json` file or from a directory of them;
//! each file holds an array of chunks and files are merged in sorted path
//! order. A load always produces a whole new corpus, never a partial update.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::KnowledgeChunk;

const BUILTIN_CORPUS: &str = include_str!("../data/knowledge.json");

/// Parse the corpus compiled into the binary.
pub fn builtin() -> Result<Vec<KnowledgeChunk>> {
    let chunks: Vec<KnowledgeChunk> = serde_json::from_str(BUILTIN_CORPUS)
        .map_err(|source| Error::Parse { path: "<builtin>".to_string(), source })?;
    validate(&chunks)?;
    Ok(chunks)
}

#[derive(Debug, Default)]
pub struct CorpusLoader;

impl CorpusLoader {
    pub fn new() -> Self { Self }

    /// Load every chunk under `path`, which may be a file or a directory.
    pub fn load(&self, path: &Path) -> Result<Vec<KnowledgeChunk>> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let files = if path.is_dir() { self.list_json_files(path) } else { vec![path.to_path_buf()] };
        if files.is_empty() {
            info!(dir = %path.display(), "no .json corpus files found");
            return Ok(vec![]);
        }
        let mut all_chunks = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            debug!(file = %file_path.display(), "loading corpus file {}/{}", file_index + 1, files.len());
            all_chunks.extend(self.read_chunks(file_path)?);
        }
        validate(&all_chunks)?;
        info!(files = files.len(), chunks = all_chunks.len(), "corpus loaded");
        Ok(all_chunks)
    }

    fn read_chunks(&self, file_path: &Path) -> Result<Vec<KnowledgeChunk>> {
        let raw = fs::read_to_string(file_path)?;
        serde_json::from_str(&raw).map_err(|source| Error::Parse { path: file_path.display().to_string(), source })
    }

    fn list_json_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") { json_files.push(path.to_path_buf()); }
        }
        json_files.sort();
        json_files
    }
}

/// Reject corpora with blank ids or titles, or with an id used twice.
pub fn validate(chunks: &[KnowledgeChunk]) -> Result<()> {
    let mut seen = HashSet::with_capacity(chunks.len());
    for chunk in chunks {
        if chunk.id.trim().is_empty() {
            return Err(Error::InvalidCorpus("chunk with empty id".to_string()));
        }
        if chunk.title.trim().is_empty() {
            return Err(Error::InvalidCorpus(format!("chunk '{}' has an empty title", chunk.id)));
        }
        if !seen.insert(chunk.id.as_str()) {
            return Err(Error::InvalidCorpus(format!("duplicate chunk id '{}'", chunk.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, title: &str) -> KnowledgeChunk {
        KnowledgeChunk {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            category: "misc".to_string(),
            keywords: vec![],
            url: None,
        }
    }

    #[test]
    fn builtin_corpus_parses_and_is_valid() {
        let chunks = builtin().expect("builtin corpus");
        assert!(chunks.len() >= 10);
        assert!(chunks.iter().any(|c| c.keywords.iter().any(|k| k == "battery")));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = validate(&[chunk("a", "A"), chunk("a", "B")]).unwrap_err();
        assert!(matches!(err, Error::InvalidCorpus(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(validate(&[chunk("a", "  ")]).is_err());
    }
}
