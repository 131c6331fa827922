use std::fmt;

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use thiserror::Error;

/// Name of the session cookie issued by the backend on login.
pub const SESSION_COOKIE: &str = "time_bandit_auth_token_v1";

/// Opaque session token. The backend owns its meaning; we only forward it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

#[derive(Error, Debug, PartialEq)]
pub enum IntoSessionError {
    #[error("Missing session cookie")]
    MissingSessionCookie,
    #[error("Empty session cookie")]
    EmptySessionCookie,
}

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an explicit `Cookie` request header.
    pub fn as_cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.0)
    }

    /// The cookie handed to the browser after a successful login.
    pub fn browser_cookie(&self, secure: bool) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, self.0.clone()))
            .same_site(SameSite::Lax)
            .path("/")
            .secure(secure)
            .http_only(true)
            .build()
    }

    /// A cookie that only carries name and path, used to remove the session.
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, "")).path("/").build()
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

impl TryFrom<&CookieJar> for SessionToken {
    type Error = IntoSessionError;

    fn try_from(jar: &CookieJar) -> Result<SessionToken, Self::Error> {
        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or(IntoSessionError::MissingSessionCookie)?;

        let value = cookie.value().trim();
        if value.is_empty() {
            return Err(IntoSessionError::EmptySessionCookie);
        }

        Ok(SessionToken(value.to_string()))
    }
}
