use std::fmt;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use bandit_client::BanditError;

use crate::domain::{TimerError, TrackingError};

/// Error type for every page and JSON handler.
///
/// Most errors render a small error page with their status. A missing
/// session redirects to the login page instead.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    message: String,
    redirect: Option<String>,
}

impl PageError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            redirect: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    /// Send the browser to the login page, coming back to `next` afterwards.
    pub fn login_required(next: Option<&str>) -> Self {
        let location = match next {
            Some(next) => format!("/login?next={}", encode(next)),
            None => "/login".to_string(),
        };

        Self {
            status: StatusCode::SEE_OTHER,
            message: "Not authenticated".to_string(),
            redirect: Some(location),
        }
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if let Some(location) = self.redirect {
            return Redirect::to(&location).into_response();
        }

        let reason = self.status.canonical_reason().unwrap_or("Error");
        let body = format!(
            "<!doctype html>\n<html><head><title>{code} {reason}</title></head>\
             <body><h1>{code} {reason}</h1><p>{message}</p><p><a href=\"/dashboard\">Back to the dashboard</a></p></body></html>",
            code = self.status.as_u16(),
            reason = reason,
            message = tera::escape_html(&self.message),
        );

        (self.status, Html(body)).into_response()
    }
}

impl From<BanditError> for PageError {
    fn from(err: BanditError) -> Self {
        match err {
            BanditError::Unauthorized => Self::login_required(None),
            BanditError::UnexpectedStatus { status, .. } if status == StatusCode::NOT_FOUND => {
                Self::not_found("No such task")
            }
            _ => {
                tracing::error!("Backend error: {:?}", err);
                Self::bad_gateway("The time tracking backend is unavailable")
            }
        }
    }
}

impl From<TimerError> for PageError {
    fn from(err: TimerError) -> Self {
        match err {
            TimerError::TimerAlreadyRunning => Self::conflict(err.to_string()),
            TimerError::NoTimerRunning => Self::not_found(err.to_string()),
        }
    }
}

impl From<TrackingError> for PageError {
    fn from(err: TrackingError) -> Self {
        match err {
            TrackingError::Backend(err) => err.into(),
            TrackingError::Timer(err) => err.into(),
            TrackingError::InvalidInput(message) => Self::bad_request(message),
        }
    }
}

impl From<tera::Error> for PageError {
    fn from(err: tera::Error) -> Self {
        tracing::error!("Template error: {:?}", err);
        Self::internal("Failed to render page")
    }
}
