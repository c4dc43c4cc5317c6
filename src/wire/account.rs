use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{is_false, LocationResource, ResourceStatus};
use crate::engine::request::{RequestHandler, ResponseHeaders};
use crate::error::AcmeResult;

/// The account object the server hands back from `newAccount` or an
/// account-fetch POST-as-GET (RFC 8555 §7.1.2).
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountResource {
    pub status: AccountStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service_agreed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_account_binding: Option<Value>,

    /// Orders list URL. RFC 8555 requires it; not every CA serves it (Let's
    /// Encrypt's Boulder doesn't), so callers must treat it as optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<String>,

    /// Carried out of band in the response's `Location` header, not the body.
    #[serde(skip)]
    pub location: Option<String>,
}

impl LocationResource for AccountResource {
    fn location_mut(&mut self) -> &mut Option<String> {
        &mut self.location
    }
}

/// The body sent to `newAccount` (RFC 8555 §7.3).
#[derive(Serialize, Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewAccountResource {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub terms_of_service_agreed: bool,

    /// `true` means "look up the existing account for this key, don't create
    /// one" — how a caller recovers an account URL from just the key.
    #[serde(default, skip_serializing_if = "is_false")]
    pub only_return_existing: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_account_binding: Option<Value>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Valid,
    /// Client-initiated deactivation.
    Deactivated,
    /// Server-initiated deactivation.
    Revoked,
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self::Valid
    }
}

impl ResourceStatus for AccountStatus {
    fn is_failure(&self) -> bool {
        !matches!(self, Self::Valid)
    }
}

/// Decodes a successful `newAccount`/account-fetch response body into an
/// [`AccountResource`], recording the account's URL from the snapshotted
/// `Location` header.
pub struct DecodeAccountResource;

#[async_trait]
impl RequestHandler<AccountResource> for DecodeAccountResource {
    async fn decode_json(
        &self,
        headers: &ResponseHeaders,
        json: Value,
    ) -> AcmeResult<Option<AccountResource>> {
        let mut account: AccountResource = serde_json::from_value(json)?;
        account.status.as_result()?;
        *account.location_mut() = headers.location.clone();
        Ok(Some(account))
    }

    async fn decode_raw(&self, _headers: &ResponseHeaders, body: String) -> AcmeResult<AccountResource> {
        Err(crate::error::AcmeError::bad_request(format!(
            "expected a JSON account resource, got: {body}"
        )))
    }
}
