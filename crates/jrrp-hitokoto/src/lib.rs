//! Hitokoto adapter (remote quotes).
//!
//! One `GET` per luck reply that draws the remote candidate; no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use jrrp_core::{
    errors::Error,
    ports::RemoteQuoteSource,
    quotes::types::RemoteQuote,
    Result,
};

pub const PROVIDER: &str = "hitokoto";

/// Expected response body. Anything else fails closed.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HitokotoPayload {
    pub hitokoto: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub from_who: Option<String>,
}

impl HitokotoPayload {
    pub fn into_quote(self) -> Result<RemoteQuote> {
        let text = self.hitokoto.trim().to_string();
        if text.is_empty() {
            return Err(Error::RemoteUnavailable(
                "hitokoto returned empty text".to_string(),
            ));
        }
        Ok(RemoteQuote {
            source: attribution(self.from_who.as_deref(), self.from.as_deref()),
            text,
            provider: PROVIDER.to_string(),
        })
    }
}

/// `author《work》`, `《work》`, `author`, or the provider name.
pub fn attribution(author: Option<&str>, work: Option<&str>) -> String {
    let author = author.map(str::trim).filter(|s| !s.is_empty());
    let work = work.map(str::trim).filter(|s| !s.is_empty());
    match (author, work) {
        (Some(a), Some(w)) => format!("{a}《{w}》"),
        (None, Some(w)) => format!("《{w}》"),
        (Some(a), None) => a.to_string(),
        (None, None) => PROVIDER.to_string(),
    }
}

pub fn parse_payload(body: &str) -> Result<RemoteQuote> {
    let payload: HitokotoPayload = serde_json::from_str(body)
        .map_err(|e| Error::RemoteUnavailable(format!("hitokoto json error: {e}")))?;
    payload.into_quote()
}

#[derive(Clone, Debug)]
pub struct HitokotoClient {
    pub url: String,
    http: reqwest::Client,
}

impl HitokotoClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("hitokoto client build failed: {e}")))?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }
}

#[async_trait]
impl RemoteQuoteSource for HitokotoClient {
    async fn fetch(&self) -> Result<RemoteQuote> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("hitokoto request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(Error::RemoteUnavailable(format!(
                "hitokoto request failed: {status}"
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("hitokoto body error: {e}")))?;

        let quote = parse_payload(&body)?;
        tracing::debug!(source = %quote.source, "fetched remote quote");
        Ok(quote)
    }
}
