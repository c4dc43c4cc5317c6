pub mod crypto;
pub mod engine;
pub mod error;
pub mod problem;
pub mod store;
pub mod transport;
pub mod wire;

pub(crate) mod base64url;

pub use crypto::account_key::AccountKey;
pub use crypto::{account_key_from_jwk, generate_account_key};
pub use engine::request::RequestHandler;
pub use engine::Engine;
pub use error::{AcmeError, AcmeResult, ErrorKind};
pub use store::{AccountRecord, AccountStore, InMemoryAccountStore};

pub static LETS_ENCRYPT_DIRECTORY_URL: &str = "https://acme-v02.api.letsencrypt.org/directory";
pub static LETS_ENCRYPT_STAGING_DIRECTORY_URL: &str =
    "https://acme-staging-v02.api.letsencrypt.org/directory";
