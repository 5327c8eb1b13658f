//! Domain types shared by the knowledge, rebate and chat crates.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type ChunkId = String;

/// One self-contained unit of business text used as retrievable context.
///
/// - `id`: unique across the corpus
/// - `title`/`content`: the text that is scored and rendered
/// - `category`: free-form grouping such as "solar", "battery" or "company"
/// - `keywords`: hand-picked terms that weigh more than body text
/// - `url`: optional page on the site the chunk was written for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    pub id: ChunkId,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A chunk paired with the relevance score it earned for one query.
///
/// Higher is better. Produced per query and dropped afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a KnowledgeChunk,
    pub score: u32,
}

/// What a customer says they are interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceInterest {
    Solar,
    Battery,
    EvCharger,
    SolarAndBattery,
}

impl fmt::Display for ServiceInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceInterest::Solar => "solar",
            ServiceInterest::Battery => "battery",
            ServiceInterest::EvCharger => "ev-charger",
            ServiceInterest::SolarAndBattery => "solar-and-battery",
        };
        f.write_str(label)
    }
}

/// Contact details accumulated across a chat conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceInterest>,
}

impl CustomerInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.service.is_none()
    }

    /// Enough to call the customer back.
    pub fn is_contactable(&self) -> bool {
        self.name.is_some() && (self.email.is_some() || self.phone.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}
