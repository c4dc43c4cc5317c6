//! RFC 7807 problem documents and the classifier that maps a problem `type`
//! URN to an [`ErrorKind`].

use serde::{Deserialize, Serialize};

use crate::error::{AcmeError, ErrorKind};

pub const CONTENT_TYPE: &str = "application/problem+json";

/// A parsed RFC 7807 problem document.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AcmeProblem {
    #[serde(rename = "type", default)]
    pub type_: Option<String>,

    #[serde(default)]
    pub detail: Option<String>,
}

/// Maps a problem `type` URN to an abstract error kind.
///
/// Strips a recognized prefix (`urn:ietf:params:` first, then bare `urn:`) and compares
/// the remainder case-insensitively against the ACME error-type table. Unknown types,
/// including unprefixed or malformed ones, classify as [`ErrorKind::Generic`].
pub fn classify(type_urn: &str) -> ErrorKind {
    let stripped = type_urn
        .strip_prefix("urn:ietf:params:")
        .or_else(|| type_urn.strip_prefix("urn:"))
        .unwrap_or(type_urn);

    match stripped.to_ascii_lowercase().as_str() {
        "acme:error:badnonce" => ErrorKind::BadNonce,
        "acme:error:useractionrequired" => ErrorKind::UserActionRequired,
        "acme:error:badcsr"
        | "acme:error:malformed"
        | "acme:error:badsignaturealgorithm"
        | "acme:error:badrevocationreason" => ErrorKind::BadRequest,
        "acme:error:unauthorized" => ErrorKind::Forbidden,
        "acme:error:ratelimited" => ErrorKind::RateLimited,
        "acme:error:rejectedidentifier"
        | "acme:error:unsupportedidentifier"
        | "acme:error:invalidcontact" => ErrorKind::BadRequest,
        "acme:error:serverinternal"
        | "acme:error:caa"
        | "acme:error:dns"
        | "acme:error:connection"
        | "acme:error:tls"
        | "acme:error:incorrectresponse"
        | "acme:error:unsupportedcontact" => ErrorKind::Generic,
        _ => ErrorKind::Generic,
    }
}

/// Classifies a non-2xx response into an [`AcmeError`], logging it at the level
/// appropriate to whether the result is recoverable.
///
/// `log_prefix` is the engine's short-host identifier, included so concurrent
/// engines against different hosts can be told apart in shared log output.
pub(crate) async fn inspect(
    resp: &mut http_client::Response,
    log_prefix: &str,
) -> AcmeError {
    let status: u16 = resp.status().into();

    let is_problem = resp
        .content_type()
        .map(|ct| ct.essence() == CONTENT_TYPE)
        .unwrap_or(false);

    if is_problem {
        if let Ok(problem) = resp.body_json::<AcmeProblem>().await {
            let kind = problem
                .type_
                .as_deref()
                .map(classify)
                .unwrap_or(ErrorKind::Generic);
            let detail = problem.detail.as_deref().unwrap_or("");
            let type_ = problem.type_.as_deref().unwrap_or("<untyped>");
            if kind.is_recoverable() {
                log::debug!("[{log_prefix}] acme reports {type_}: {detail}");
            } else {
                log::warn!("[{log_prefix}] acme problem {type_}: {detail}");
            }
            return AcmeError::Problem { kind, problem };
        }
    }

    let kind = match status {
        400 => ErrorKind::BadRequest,
        403 => ErrorKind::Forbidden,
        404 => ErrorKind::NotFound,
        _ => {
            log::warn!("[{log_prefix}] acme problem unknown: http status {status}");
            ErrorKind::Generic
        }
    };
    AcmeError::Status { kind, status }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_recoverable_kinds() {
        assert_eq!(classify("acme:error:badNonce"), ErrorKind::BadNonce);
        assert_eq!(
            classify("urn:ietf:params:acme:error:badNonce"),
            ErrorKind::BadNonce
        );
        assert_eq!(
            classify("urn:acme:error:userActionRequired"),
            ErrorKind::UserActionRequired
        );
        assert!(ErrorKind::BadNonce.is_recoverable());
        assert!(ErrorKind::UserActionRequired.is_recoverable());
    }

    #[test]
    fn classifies_non_retryable_kinds() {
        for urn in [
            "urn:ietf:params:acme:error:badCSR",
            "urn:ietf:params:acme:error:malformed",
            "urn:ietf:params:acme:error:badSignatureAlgorithm",
            "urn:ietf:params:acme:error:badRevocationReason",
            "acme:error:rejectedIdentifier",
            "acme:error:unsupportedIdentifier",
            "acme:error:invalidContact",
        ] {
            assert_eq!(classify(urn), ErrorKind::BadRequest, "urn={urn}");
        }
        assert_eq!(classify("acme:error:unauthorized"), ErrorKind::Forbidden);
        assert_eq!(classify("acme:error:rateLimited"), ErrorKind::RateLimited);
        assert!(!ErrorKind::RateLimited.is_recoverable());
        for urn in [
            "acme:error:serverInternal",
            "acme:error:caa",
            "acme:error:dns",
            "acme:error:connection",
            "acme:error:tls",
            "acme:error:incorrectResponse",
            "acme:error:unsupportedContact",
            "acme:error:somethingNeverSeenBefore",
        ] {
            assert_eq!(classify(urn), ErrorKind::Generic, "urn={urn}");
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        // Only the remainder after a recognized prefix is compared
        // case-insensitively; the prefix itself is matched literally.
        assert_eq!(classify("URN:IETF:PARAMS:ACME:ERROR:BADNONCE"), ErrorKind::Generic);
        assert_eq!(classify("urn:ietf:params:ACME:ERROR:BadNonce"), ErrorKind::BadNonce);
        assert_eq!(classify("acme:ERROR:RateLimited"), ErrorKind::RateLimited);
    }
}
