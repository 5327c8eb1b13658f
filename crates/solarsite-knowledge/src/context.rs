use solarsite_core::types::KnowledgeChunk;

/// Render retrieved chunks as the context block of a prompt.
///
/// Returns an empty string when nothing was retrieved so callers can tell
/// "no context" apart from a short one.
pub fn build_context(chunks: &[&KnowledgeChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| match &chunk.url {
            Some(url) => format!("## {}\n{}\nMore: {}", chunk.title, chunk.content.trim(), url),
            None => format!("## {}\n{}", chunk.title, chunk.content.trim()),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
