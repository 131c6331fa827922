use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use bandit_client::SessionToken;

use crate::{app_state::AppState, domain::AuthStatus, routes::PageError};

/// Session guard for every protected route.
///
/// Checks the session cookie with the backend once per request. A valid
/// session is stored on the request for the [`crate::domain::AuthSession`]
/// extractor, a refused one is sent to the login page, and a backend that
/// cannot answer gets an error page.
pub async fn require_session(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = SessionToken::try_from(&jar).ok();
    let had_cookie = token.is_some();

    match app_state.tracking.authenticate(token).await {
        AuthStatus::Authenticated(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        AuthStatus::Unauthenticated => {
            // Only GET pages are worth coming back to after login.
            let back_to = (request.method() == Method::GET)
                .then(|| request.uri().path_and_query())
                .flatten()
                .map(|path| path.as_str().to_string());
            let redirect = PageError::login_required(back_to.as_deref());

            if had_cookie {
                (jar.remove(SessionToken::removal_cookie()), redirect).into_response()
            } else {
                redirect.into_response()
            }
        }
        AuthStatus::Error(err) => {
            tracing::error!("session check failed: {}", err);
            PageError::bad_gateway("The time tracking backend is unavailable").into_response()
        }
    }
}
