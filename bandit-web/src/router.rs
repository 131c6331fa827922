use axum::{middleware, response::Redirect, routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::{app_state::AppState, auth, routes};

pub fn create(app_state: AppState) -> Router<()> {
    let protected = Router::new()
        .route("/dashboard", get(routes::dashboard::dashboard))
        .nest("/tasks", routes::tasks::router())
        .nest("/timer", routes::timer::router())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::require_session,
        ));

    protected
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/health", get(|| async { "Time Bandit is running" }))
        .merge(auth::router())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
