use axum::http::StatusCode;
use bandit_client::{domain::UserId, BanditError, SessionToken};

/// A request's session after the backend vouched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub token: SessionToken,
}

/// Outcome of checking a request's session against the backend.
#[derive(Debug)]
pub enum AuthStatus {
    Authenticated(AuthSession),
    /// No cookie, or the backend refused it.
    Unauthenticated,
    /// The backend could not answer. Not the same as a refused session.
    Error(BanditError),
}

/// Gateway answers come from a proxy in front of a backend that is down.
const GATEWAY_FAILURES: [StatusCode; 3] = [
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Whether `err` means the backend refused the session.
///
/// The backend answers unknown sessions with an error status instead of 401,
/// so any non-2xx counts, except gateway failures.
pub fn refuses_session(err: &BanditError) -> bool {
    match err {
        BanditError::Unauthorized => true,
        BanditError::UnexpectedStatus { status, .. } => !GATEWAY_FAILURES.contains(status),
        _ => false,
    }
}
