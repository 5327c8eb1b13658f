//! solarsite-chat
//!
//! One chat turn: pull contact details out of the message, retrieve knowledge
//! context, and ask a `ResponseGenerator` for the answer. Without a generator,
//! or when it fails, the best matching chunk is returned as-is.

pub mod prompt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use solarsite_core::config::ChatSettings;
use solarsite_core::traits::{ResponseGenerator, Retriever};
use solarsite_core::types::{ChatMessage, CustomerInfo, KnowledgeChunk};
use solarsite_knowledge::{build_context, CustomerInfoExtractor, CHAT_CONTEXT_LIMIT};

pub use prompt::build_prompt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
    #[serde(default)]
    pub customer_info: CustomerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
    pub customer_info: CustomerInfo,
}

pub struct ChatService<R> where R: Retriever {
    retriever: R,
    extractor: CustomerInfoExtractor,
    generator: Option<Box<dyn ResponseGenerator>>,
    settings: ChatSettings,
    context_limit: usize,
}

impl<R> ChatService<R> where R: Retriever {
    pub fn new(retriever: R, extractor: CustomerInfoExtractor, settings: ChatSettings) -> Self {
        Self { retriever, extractor, generator: None, settings, context_limit: CHAT_CONTEXT_LIMIT }
    }

    pub fn with_generator(mut self, generator: Box<dyn ResponseGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_context_limit(mut self, limit: usize) -> Self {
        self.context_limit = limit;
        self
    }

    pub fn respond(&self, request: &ChatRequest) -> ChatResponse {
        let customer_info = self.extractor.extract(&request.message, &request.customer_info);
        let response = self.answer(request, &customer_info);
        ChatResponse { response, timestamp: Utc::now(), customer_info }
    }

    fn answer(&self, request: &ChatRequest, customer_info: &CustomerInfo) -> String {
        let message = request.message.trim();
        if message.is_empty() {
            return self.settings.fallback_message.clone();
        }
        let hits = self.retriever.search(message, self.context_limit);
        let chunks: Vec<&KnowledgeChunk> = hits.iter().map(|hit| hit.chunk).collect();
        debug!(hits = chunks.len(), "chat context retrieved");

        let Some(generator) = &self.generator else {
            return self.knowledge_answer(chunks.first().copied());
        };
        let context = build_context(&chunks);
        let prompt = build_prompt(&self.settings, &context, customer_info, &request.conversation_history, message);
        match generator.generate(&prompt) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("response generator returned an empty answer; using knowledge base");
                self.knowledge_answer(chunks.first().copied())
            }
            Err(e) => {
                warn!(error = %e, "response generator failed; using knowledge base");
                self.knowledge_answer(chunks.first().copied())
            }
        }
    }

    fn knowledge_answer(&self, best: Option<&KnowledgeChunk>) -> String {
        match best {
            Some(chunk) => match &chunk.url {
                Some(url) => format!("{} More: {}", chunk.content.trim(), url),
                None => chunk.content.trim().to_string(),
            },
            None => self.settings.fallback_message.clone(),
        }
    }
}
