use serde::{Deserialize, Serialize};

use crate::model::{Quote, QuoteSource};

/// A generic post from the remote collection. Extra fields are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct RemotePost {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl RemotePost {
    /// Maps a post into candidate quote shape: the first 100 characters of
    /// the body with a trailing ellipsis, filed under the "Server" category.
    pub fn into_quote(self) -> Quote {
        let mut text: String = self.body.chars().take(100).collect();
        text.push_str("...");
        Quote {
            text,
            category: "Server".to_string(),
            server_id: Some(self.id),
            source: Some(QuoteSource::Server),
            resolved: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PushQuoteRequest {
    pub title: String,
    pub body: String,
    pub local_id: String,
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
