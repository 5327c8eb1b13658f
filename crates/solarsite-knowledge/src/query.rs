use solarsite_core::types::KnowledgeChunk;

/// Tokens this short or shorter carry no signal ("a", "is", "my").
const MIN_TOKEN_CHARS: usize = 3;

pub const PHRASE_IN_TITLE: u32 = 10;
pub const PHRASE_IN_CONTENT: u32 = 5;
pub const TOKEN_IN_KEYWORDS: u32 = 5;
pub const TOKEN_IN_TITLE: u32 = 3;
pub const TOKEN_IN_CONTENT: u32 = 1;

/// A lowercased query split into the phrase and its scoring tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    phrase: String,
    tokens: Vec<String>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split_whitespace()
            .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect();
        Self { phrase: lowered, tokens }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The empty query; it scores 0 against every chunk.
    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty()
    }

    pub fn score(&self, chunk: &KnowledgeChunk) -> u32 {
        if self.is_empty() {
            return 0;
        }
        let title = chunk.title.to_lowercase();
        let content = chunk.content.to_lowercase();
        let keywords = chunk.keywords.iter().map(|k| k.to_lowercase()).collect::<Vec<_>>().join(" ");

        let mut score = 0;
        if title.contains(&self.phrase) {
            score += PHRASE_IN_TITLE;
        }
        if content.contains(&self.phrase) {
            score += PHRASE_IN_CONTENT;
        }
        for token in &self.tokens {
            if keywords.contains(token.as_str()) {
                score += TOKEN_IN_KEYWORDS;
            }
            if title.contains(token.as_str()) {
                score += TOKEN_IN_TITLE;
            }
            if content.contains(token.as_str()) {
                score += TOKEN_IN_CONTENT;
            }
        }
        score
    }
}
