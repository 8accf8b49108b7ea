// src/core/net.rs
// Page retrieval: one blocking GET per call, no retries.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

/// Anything that can turn a URL into a page body.
/// The catalog builder only ever sees this trait, so tests and caches slot in freely.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// HTTPS fetcher over `reqwest::blocking`.
///
/// The TLS stack is negotiated once, here, when the client is built: rustls offers every
/// protocol version it supports and the server picks.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Request { url: s!("<client>"), source })?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t = Instant::now();
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            loge!("GET {url} -> {status}");
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }
        let body = resp
            .text()
            .map_err(|source| FetchError::Request { url: s!(url), source })?;
        logd!("GET {url} -> {status}, {} bytes in {:?}", body.len(), t.elapsed());
        Ok(body)
    }
}
