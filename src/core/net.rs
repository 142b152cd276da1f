// src/core/net.rs
// Page download. The pipeline only ever sees the `Fetch` trait so tests and
// offline runs can swap the network out.

use std::time::Duration;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

pub trait Fetch: Send + Sync {
    /// Full body of `url` as text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP(S) GET with a timeout and a fixed user agent.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Fetch { url: s!("<client>"), reason: e.to_string() })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let fail = |e: reqwest::Error| Error::Fetch { url: s!(url), reason: e.to_string() };

        let resp = self.client.get(url).send().map_err(fail)?;
        let resp = resp.error_for_status().map_err(fail)?;
        let body = resp.text().map_err(fail)?;

        if body.is_empty() {
            return Err(Error::Fetch { url: s!(url), reason: s!("empty body") });
        }
        Ok(body)
    }
}

/// Serves pages from memory; anything not registered fails like a 404.
/// Used by offline runs and by the scheduler tests.
#[derive(Default)]
pub struct StaticFetcher {
    pages: std::collections::HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self { Self::default() }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }
}

impl Fetch for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Fetch { url: s!(url), reason: s!("404 Not Found") })
    }
}
