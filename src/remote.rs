use anyhow::{Context, Result};

use crate::model::{Quote, RemoteConfig};

mod types;
pub use self::types::*;

pub struct RemoteClient {
    remote: RemoteConfig,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(remote: RemoteConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("quip")
            .build()
            .context("build reqwest client")?;
        Ok(Self { remote, client })
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.remote.base_url, path)
    }

    fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    /// One bounded read of the remote collection.
    pub fn fetch_posts(&self, limit: usize) -> Result<Vec<RemotePost>> {
        let resp = self
            .client
            .get(self.url("/posts"))
            .query(&[("_limit", limit.to_string())])
            .send()
            .context("list posts")?;
        let posts: Vec<RemotePost> = self
            .ensure_ok(resp, "list posts")?
            .json()
            .context("parse posts")?;
        Ok(posts)
    }

    /// One outbound write carrying the quote's fields plus a caller-supplied
    /// correlation id. Any non-success status is a failure; the caller
    /// decides whether to queue a retry.
    pub fn push_quote(&self, quote: &Quote, correlation_id: u128) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/posts"))
            .json(&PushQuoteRequest {
                title: quote.category.clone(),
                body: quote.text.clone(),
                local_id: correlation_id.to_string(),
            })
            .send()
            .context("push quote")?;
        self.ensure_ok(resp, "push quote")?;
        Ok(())
    }
}
