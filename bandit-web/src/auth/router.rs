use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::CookieJar;
use bandit_client::{domain::LoginDetails, BanditError, SessionToken};
use serde::Deserialize;
use tera::Context;
use tracing::instrument;

use crate::{app_state::AppState, domain::TrackingError, routes::PageError};

const DEFAULT_NEXT: &str = "/dashboard";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(self::get::login).post(self::post::login))
        .route(
            "/register",
            get(self::get::register).post(self::post::register),
        )
        .route("/logout", post(self::post::logout))
}

#[derive(Debug, Deserialize)]
struct LoginQuery {
    next: Option<String>,
    registered: Option<String>,
}

#[derive(Deserialize)]
struct LoginForm {
    email: String,
    password: String,
    next: Option<String>,
}

#[derive(Deserialize)]
struct RegisterForm {
    email: String,
    password: String,
}

/// Where to go after login. Anything but a local absolute path falls back
/// to the dashboard.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") && !next.contains('\\') => {
            next
        }
        _ => DEFAULT_NEXT,
    }
}

fn login_page(
    app_state: &AppState,
    email: &str,
    next: &str,
    error: Option<&str>,
    notice: Option<&str>,
) -> Result<Html<String>, PageError> {
    let mut context = Context::new();
    context.insert("email", email);
    context.insert("next", next);
    context.insert("error", &error);
    context.insert("notice", &notice);
    context.insert("timer", &None::<()>);

    Ok(app_state.templates.render("login.html", &context)?)
}

fn register_page(
    app_state: &AppState,
    email: &str,
    error: Option<&str>,
) -> Result<Html<String>, PageError> {
    let mut context = Context::new();
    context.insert("email", email);
    context.insert("error", &error);
    context.insert("timer", &None::<()>);

    Ok(app_state.templates.render("register.html", &context)?)
}

mod get {
    use super::*;

    #[instrument(name = "login_page", skip(app_state))]
    pub async fn login(
        State(app_state): State<AppState>,
        Query(query): Query<LoginQuery>,
    ) -> Result<Html<String>, PageError> {
        let notice = query
            .registered
            .is_some()
            .then_some("Account created, you can log in now.");

        login_page(
            &app_state,
            "",
            safe_next(query.next.as_deref()),
            None,
            notice,
        )
    }

    #[instrument(name = "register_page", skip(app_state))]
    pub async fn register(State(app_state): State<AppState>) -> Result<Html<String>, PageError> {
        register_page(&app_state, "", None)
    }
}

mod post {
    use super::*;

    #[instrument(name = "login", skip(app_state, jar, form))]
    pub async fn login(
        State(app_state): State<AppState>,
        jar: CookieJar,
        Form(form): Form<LoginForm>,
    ) -> Result<Response, PageError> {
        let next = safe_next(form.next.as_deref()).to_string();
        let details = LoginDetails::new(form.email, form.password);

        match app_state.tracking.login(&details).await {
            Ok(token) => {
                tracing::debug!("logged in {}", details.email);
                let jar = jar.add(token.browser_cookie(app_state.secure_cookies));
                Ok((jar, Redirect::to(&next)).into_response())
            }
            Err(TrackingError::Backend(BanditError::Unauthorized)) => {
                tracing::debug!("login refused for {}", details.email);
                let page = login_page(
                    &app_state,
                    &details.email,
                    &next,
                    Some("Invalid email or password."),
                    None,
                )?;
                Ok((StatusCode::UNAUTHORIZED, page).into_response())
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(name = "register", skip(app_state, form))]
    pub async fn register(
        State(app_state): State<AppState>,
        Form(form): Form<RegisterForm>,
    ) -> Result<Response, PageError> {
        let details = LoginDetails::new(form.email, form.password);

        let error = match app_state.tracking.register(&details).await {
            Ok(()) => return Ok(Redirect::to("/login?registered=1").into_response()),
            Err(TrackingError::InvalidInput(message)) => message,
            Err(TrackingError::Backend(BanditError::UnexpectedStatus { status, .. })) => {
                tracing::debug!("registration refused with {}", status);
                "Registration failed. The email may already be taken.".to_string()
            }
            Err(err) => return Err(err.into()),
        };

        let page = register_page(&app_state, &details.email, Some(&error))?;
        Ok((StatusCode::BAD_REQUEST, page).into_response())
    }

    #[instrument(name = "logout", skip(app_state, jar))]
    pub async fn logout(
        State(app_state): State<AppState>,
        jar: CookieJar,
    ) -> (CookieJar, Redirect) {
        if let Ok(token) = SessionToken::try_from(&jar) {
            app_state.tracking.logout(&token).await;
        }

        (jar.remove(SessionToken::removal_cookie()), Redirect::to("/login"))
    }
}
