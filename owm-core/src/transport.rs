use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};

use crate::error::TransportError;

/// Status code and full body of one HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `"404 Not Found"`, or just the number for unregistered codes.
    pub fn status_text(&self) -> String {
        match reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
        {
            Some(reason) => format!("{} {}", self.status, reason),
            None => self.status.to_string(),
        }
    }
}

/// Performs a single GET and hands back whatever the server answered.
///
/// Non-2xx statuses are not errors at this level.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::Request(Box::new(e)))?;

        let status = res.status().as_u16();
        let body = res
            .bytes()
            .await
            .map_err(|e| TransportError::Body(Box::new(e)))?;

        Ok(RawResponse { status, body })
    }
}
