//! Wraps any [`HttpClient`] in a uniform response-size cap, regardless of
//! which concrete backend the caller wired in. Applied once, lazily, the
//! first time [`crate::engine::engine::Engine::setup`] runs.

use async_trait::async_trait;
use http_client::{Body, Error, HttpClient, Request, Response};

/// Upper bound on a single response body.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

#[derive(Debug)]
pub struct CappedHttpClient {
    inner: std::sync::Arc<dyn HttpClient>,
    limit: usize,
}

impl CappedHttpClient {
    pub fn new(inner: std::sync::Arc<dyn HttpClient>) -> Self {
        Self::with_limit(inner, MAX_RESPONSE_BYTES)
    }

    pub fn with_limit(inner: std::sync::Arc<dyn HttpClient>, limit: usize) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl HttpClient for CappedHttpClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        let mut resp = self.inner.send(req).await?;
        let status = resp.status();
        let content_type = resp.content_type();
        let bytes = resp.body_bytes().await?;
        if bytes.len() > self.limit {
            return Err(Error::from_str(
                status,
                format!(
                    "response body of {} bytes exceeds the {} byte cap",
                    bytes.len(),
                    self.limit
                ),
            ));
        }
        let mut body = Body::from_bytes(bytes);
        if let Some(mime) = content_type {
            body.set_mime(mime);
        }
        resp.set_body(body);
        Ok(resp)
    }
}
