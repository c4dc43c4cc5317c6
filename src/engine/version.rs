//! Protocol-version dispatch, as a tagged variant: the executor matches on
//! `Version` instead of calling through separately-stored selector fields, so
//! there is no way to hold endpoints for one version while strategies point
//! at another.

use serde_json::Value;

use crate::error::{AcmeError, AcmeResult};

#[derive(Clone, Debug)]
pub enum Version {
    Unknown,
    V1(EndpointsV1),
    V2(EndpointsV2),
}

impl Default for Version {
    fn default() -> Self {
        Version::Unknown
    }
}

impl Version {
    pub fn terms_of_service(&self) -> Option<&str> {
        match self {
            Version::Unknown => None,
            Version::V1(e) => e.terms_of_service.as_deref(),
            Version::V2(e) => e.terms_of_service.as_deref(),
        }
    }

    /// The endpoint to `HEAD` when the nonce reservoir needs a refill.
    pub fn new_nonce_endpoint(&self) -> AcmeResult<&str> {
        match self {
            Version::Unknown => Err(AcmeError::InvalidState(
                "cannot fetch a nonce before directory setup".into(),
            )),
            Version::V1(e) => Ok(&e.new_reg),
            Version::V2(e) => Ok(&e.new_nonce),
        }
    }

    pub fn new_account_endpoint(&self) -> AcmeResult<&str> {
        match self {
            Version::Unknown => Err(AcmeError::InvalidState(
                "cannot register an account before directory setup".into(),
            )),
            Version::V1(e) => Ok(&e.new_reg),
            Version::V2(e) => Ok(&e.new_account),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EndpointsV1 {
    pub new_authz: String,
    pub new_cert: String,
    pub new_reg: String,
    pub revoke_cert: String,
    pub terms_of_service: Option<String>,
}

#[derive(Clone, Debug)]
pub struct EndpointsV2 {
    pub new_account: String,
    pub new_order: String,
    pub revoke_cert: String,
    pub key_change: String,
    pub new_nonce: String,
    pub terms_of_service: Option<String>,
}

fn str_field(doc: &Value, key: &str) -> Option<String> {
    doc.get(key)?.as_str().map(str::to_owned)
}

/// Detects the protocol version from a parsed directory document and builds its
/// endpoint table. Commits a version only when every endpoint the version
/// requires was actually present; a directory with `new-authz` but a missing V1
/// endpoint is rejected rather than partially adopted.
pub fn detect(doc: &Value) -> AcmeResult<Version> {
    if doc.get("new-authz").is_some() {
        let terms_of_service = doc
            .get("meta")
            .and_then(|m| str_field(m, "terms-of-service"));
        let endpoints = EndpointsV1 {
            new_authz: str_field(doc, "new-authz")
                .ok_or(AcmeError::MissingExpectedField("new-authz"))?,
            new_cert: str_field(doc, "new-cert")
                .ok_or(AcmeError::MissingExpectedField("new-cert"))?,
            new_reg: str_field(doc, "new-reg")
                .ok_or(AcmeError::MissingExpectedField("new-reg"))?,
            revoke_cert: str_field(doc, "revoke-cert")
                .ok_or(AcmeError::MissingExpectedField("revoke-cert"))?,
            terms_of_service,
        };
        return Ok(Version::V1(endpoints));
    }

    if doc.get("newAccount").is_some() {
        let terms_of_service = doc
            .get("meta")
            .and_then(|m| str_field(m, "termsOfService"));
        let endpoints = EndpointsV2 {
            new_account: str_field(doc, "newAccount")
                .ok_or(AcmeError::MissingExpectedField("newAccount"))?,
            new_order: str_field(doc, "newOrder")
                .ok_or(AcmeError::MissingExpectedField("newOrder"))?,
            revoke_cert: str_field(doc, "revokeCert")
                .ok_or(AcmeError::MissingExpectedField("revokeCert"))?,
            key_change: str_field(doc, "keyChange")
                .ok_or(AcmeError::MissingExpectedField("keyChange"))?,
            new_nonce: str_field(doc, "newNonce")
                .ok_or(AcmeError::MissingExpectedField("newNonce"))?,
            terms_of_service,
        };
        return Ok(Version::V2(endpoints));
    }

    Err(AcmeError::bad_request(
        "unable to understand ACME server response: directory has neither new-authz nor newAccount",
    ))
}
