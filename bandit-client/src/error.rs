use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong when talking to the Time Bandit backend.
///
/// The variants stay distinguishable all the way to the caller: a rejected
/// session is not the same thing as an unreachable backend.
#[derive(Error, Debug)]
pub enum BanditError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("NetworkFailure: {0}")]
    NetworkFailure(String),
    #[error("MalformedResponse: {0}")]
    MalformedResponse(String),
    #[error("UnexpectedStatus: {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("Login succeeded but no session cookie was set")]
    MissingSessionCookie,
    #[error("InvalidBaseUrl: {0}")]
    InvalidBaseUrl(String),
}

impl BanditError {
    /// True when the backend rejected the session itself.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// True for a non-2xx answer with the given status.
    pub fn is_status(&self, expected: StatusCode) -> bool {
        matches!(self, Self::UnexpectedStatus { status, .. } if *status == expected)
    }
}

impl From<reqwest::Error> for BanditError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::NetworkFailure(err.to_string())
        }
    }
}
