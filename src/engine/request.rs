//! The caller-supplied hooks a single logical request is built from.
//!
//! One async trait stands in for three raw callbacks plus an opaque baton:
//! `Self` plays the role of the baton, and Rust's ownership rules replace the
//! need for a `void*`. The three-stage shape is `init` runs before signing,
//! then decoding tries a structured JSON tier before a raw one. The executor
//! invokes the JWS envelope builder uniformly for every signed method rather
//! than leaving that to each caller.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AcmeResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
}

/// Snapshot of the response headers the executor cares about, taken before
/// the body is decoded.
#[derive(Clone, Debug, Default)]
pub struct ResponseHeaders {
    pub replay_nonce: Option<String>,
    pub location: Option<String>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait RequestHandler<T>: Send + Sync {
    /// Produces the unsigned payload for a signed (POST) request. Returning
    /// `Ok(None)` sends an empty payload (used for POST-as-GET requests).
    /// Not called for `GET`/`HEAD`.
    fn init(&self) -> AcmeResult<Option<Value>> {
        Ok(None)
    }

    /// First decode tier: attempt to interpret a successful response body as
    /// JSON. Returning `Ok(None)` means "not consumed", falling through to
    /// [`decode_raw`]. The default never consumes, so handlers that only deal
    /// in raw bodies (such as certificate chain downloads) don't need to
    /// override it.
    async fn decode_json(&self, headers: &ResponseHeaders, json: Value) -> AcmeResult<Option<T>> {
        let _ = (headers, json);
        Ok(None)
    }

    /// Second decode tier: consumes whatever `decode_json` didn't.
    async fn decode_raw(&self, headers: &ResponseHeaders, body: String) -> AcmeResult<T>;
}

/// A `RequestHandler` that parses every successful body as JSON and clones it
/// straight through. Backs [`crate::engine::engine::Engine::get_json`].
pub(crate) struct JsonPassthrough;

#[async_trait]
impl RequestHandler<Value> for JsonPassthrough {
    async fn decode_json(
        &self,
        _headers: &ResponseHeaders,
        json: Value,
    ) -> AcmeResult<Option<Value>> {
        Ok(Some(json))
    }

    async fn decode_raw(&self, _headers: &ResponseHeaders, body: String) -> AcmeResult<Value> {
        Ok(Value::String(body))
    }
}
