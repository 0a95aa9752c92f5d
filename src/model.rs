use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Local,
    Server,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,

    #[serde(rename = "serverId", default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<QuoteSource>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub resolved: bool,
}

impl Quote {
    pub fn local(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
            server_id: None,
            source: Some(QuoteSource::Local),
            resolved: false,
        }
    }

    pub fn is_server_origin(&self) -> bool {
        self.source == Some(QuoteSource::Server)
    }

    /// Approximate identity: equal text, or equal server ids when both carry one.
    pub fn matches(&self, other: &Quote) -> bool {
        if self.text == other.text {
            return true;
        }
        match (self.server_id, other.server_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSyncRecord {
    pub quote: Quote,
    pub timestamp: String,
    pub attempt: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardConfig {
    pub version: u32,

    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            version: 1,
            remote: None,
            sync_interval_secs: default_sync_interval_secs(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,

    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
}

pub fn default_sync_interval_secs() -> u64 {
    60
}

pub fn default_page_limit() -> usize {
    10
}

/// Built-in board contents used when no persisted sequence exists yet.
pub fn seed_quotes() -> Vec<Quote> {
    [
        (
            "The greatest glory in living lies not in never falling, but in rising every time we fall.",
            "Inspiration",
        ),
        (
            "The future belongs to those who believe in the beauty of their dreams.",
            "Inspiration",
        ),
        (
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        (
            "The only way to do great work is to love what you do.",
            "Work",
        ),
        ("What we think, we become.", "Mindfulness"),
    ]
    .into_iter()
    .map(|(text, category)| Quote {
        text: text.to_string(),
        category: category.to_string(),
        server_id: None,
        source: None,
        resolved: false,
    })
    .collect()
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
