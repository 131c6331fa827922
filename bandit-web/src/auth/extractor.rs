use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{domain::AuthSession, routes::PageError};

/// Pulls the [`AuthSession`] the session guard stored on the request.
///
/// Only routes behind [`super::require_session`] can extract it. Anywhere
/// else the request is sent to the login page.
#[async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .cloned()
            .ok_or_else(|| PageError::login_required(Some(parts.uri.path())))
    }
}
