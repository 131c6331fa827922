use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Body of `POST /users/login` and `POST /users/register`.
#[derive(Clone, Serialize)]
pub struct LoginDetails {
    pub email: String,
    pub password: String,
}

impl LoginDetails {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDetails")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// What `GET /auth` answers for a valid session: the owner of the cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionInfo {
    pub user_id: UserId,
}
