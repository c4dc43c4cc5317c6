use thiserror::Error;

use crate::problem::AcmeProblem;

pub type AcmeResult<T> = Result<T, AcmeError>;

/// Abstract error kind a problem `type` URN (or a bare HTTP status) classifies to.
///
/// `BadNonce` and `UserActionRequired` are the only recoverable kinds; the executor's
/// retry loop is driven entirely by [`ErrorKind::is_recoverable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    BadNonce,
    Forbidden,
    NotFound,
    RateLimited,
    UserActionRequired,
    Generic,
}

impl ErrorKind {
    pub fn is_recoverable(self) -> bool {
        matches!(self, ErrorKind::BadNonce | ErrorKind::UserActionRequired)
    }
}

#[derive(Error, Debug)]
pub enum AcmeError {
    #[error("acme reports {kind:?}: {}", .problem.detail.as_deref().unwrap_or(""))]
    Problem { kind: ErrorKind, problem: AcmeProblem },

    #[error("acme problem ({kind:?}): http status {status}")]
    Status { kind: ErrorKind, status: u16 },

    #[error("{1}")]
    Rejected(ErrorKind, String),

    #[error(transparent)]
    Crypto(anyhow::Error),

    #[error("http: {0}")]
    Http(http_client::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing expected field {0}")]
    MissingExpectedField(&'static str),

    #[error("missing expected header {0}")]
    MissingExpectedHeader(&'static str),

    #[error("account key missing key id")]
    NoKeyId,

    #[error("{0}")]
    InvalidState(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("method not implemented: {0}")]
    NotImplemented(String),
}

impl AcmeError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Problem { kind, .. } | Self::Status { kind, .. } | Self::Rejected(kind, _) => {
                Some(*kind)
            }
            _ => None,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind().map(ErrorKind::is_recoverable).unwrap_or(false)
    }

    pub fn problem(&self) -> Option<&AcmeProblem> {
        match self {
            Self::Problem { problem, .. } => Some(problem),
            _ => None,
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::Rejected(ErrorKind::BadRequest, message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::Rejected(ErrorKind::NotFound, message.into())
    }
}

impl From<http_client::Error> for AcmeError {
    fn from(err: http_client::Error) -> Self {
        AcmeError::Http(err)
    }
}
