//! Version-aware construction of the signed JWS request body.
//!
//! V1 embeds the account's public JWK directly in the protected header and
//! omits `url`; V2 identifies the account by `kid` (its account URL) and
//! includes `url` set to the request's target. Both variants require a nonce,
//! supplied by the executor after it has consumed one from the reservoir.

use serde_json::Value;

use super::version::Version;
use crate::crypto::jws::{jws_flattened, Jws, JwsHeader, JwsSigner};
use crate::error::{AcmeError, AcmeResult};

/// How the signer identifies itself to the server on this request.
pub enum Identity<'a> {
    /// Embed the public JWK. Used for the account-creating request, where no
    /// key id has been assigned yet.
    Jwk(Value),
    /// Reference the bound account by its URL.
    Kid(&'a str),
}

pub fn build_envelope(
    version: &Version,
    signer: &dyn JwsSigner,
    identity: Identity<'_>,
    url: &str,
    nonce: &str,
    payload: &[u8],
) -> AcmeResult<Jws> {
    let (jwk, kid) = match identity {
        Identity::Jwk(jwk) => (Some(jwk), None),
        Identity::Kid(kid) => (None, Some(kid)),
    };

    let url = match version {
        Version::V1(_) => None,
        Version::V2(_) | Version::Unknown => Some(url),
    };

    let header = JwsHeader {
        alg: signer.jws_alg(),
        nonce,
        url,
        jwk,
        kid,
    };

    jws_flattened(signer, &header, payload).map_err(AcmeError::Crypto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::es256;
    use crate::engine::version::{EndpointsV1, EndpointsV2};

    fn v1() -> Version {
        Version::V1(EndpointsV1 {
            new_authz: "Z".into(),
            new_cert: "C".into(),
            new_reg: "G".into(),
            revoke_cert: "V".into(),
            terms_of_service: None,
        })
    }

    fn v2() -> Version {
        Version::V2(EndpointsV2 {
            new_account: "A".into(),
            new_order: "O".into(),
            revoke_cert: "R".into(),
            key_change: "K".into(),
            new_nonce: "N".into(),
            terms_of_service: None,
        })
    }

    #[test]
    fn v2_envelope_has_kid_and_url_no_jwk() {
        let key = es256::from_jwk(es256::tests::JWK).unwrap();
        let jws = build_envelope(
            &v2(),
            &key,
            Identity::Kid("https://ca/acct/7"),
            "https://ca/order",
            "n0",
            b"{}",
        )
        .unwrap();
        let header: serde_json::Value =
            serde_json::from_slice(&crate::base64url::decode(&jws.protected).unwrap()).unwrap();
        assert_eq!(header["kid"], "https://ca/acct/7");
        assert_eq!(header["url"], "https://ca/order");
        assert_eq!(header["nonce"], "n0");
        assert!(header.get("jwk").is_none());
    }

    #[test]
    fn v1_envelope_has_jwk_no_url() {
        let key = es256::from_jwk(es256::tests::JWK).unwrap();
        let jwk = serde_json::json!({"kty": "EC"});
        let jws = build_envelope(
            &v1(),
            &key,
            Identity::Jwk(jwk),
            "https://ca/new-reg",
            "n0",
            b"{}",
        )
        .unwrap();
        let header: serde_json::Value =
            serde_json::from_slice(&crate::base64url::decode(&jws.protected).unwrap()).unwrap();
        assert!(header.get("jwk").is_some());
        assert!(header.get("url").is_none());
    }
}
