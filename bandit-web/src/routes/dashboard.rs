use axum::{extract::State, response::Html};
use tera::Context;
use tracing::instrument;

use super::{
    view::{TaskRow, TimerBanner},
    PageError,
};
use crate::{
    app_state::AppState,
    domain::{refuses_session, AuthSession, TrackingError},
};

#[instrument(name = "dashboard", skip(app_state, session), fields(user_id = %session.user_id))]
pub async fn dashboard(
    session: AuthSession,
    State(app_state): State<AppState>,
) -> Result<Html<String>, PageError> {
    // A refused task listing means the session is gone, even after the guard
    // accepted it.
    let dashboard = match app_state.tracking.dashboard(&session).await {
        Ok(dashboard) => dashboard,
        Err(TrackingError::Backend(err)) if refuses_session(&err) => {
            tracing::debug!("task listing refused the session: {}", err);
            return Err(PageError::login_required(Some("/dashboard")));
        }
        Err(err) => return Err(err.into()),
    };

    let rows: Vec<TaskRow> = dashboard
        .summaries
        .iter()
        .map(|summary| TaskRow::new(summary, app_state.offset))
        .collect();

    let mut context = Context::new();
    context.insert("tasks", &rows);
    context.insert("timer", &dashboard.timer.as_ref().map(TimerBanner::from));

    Ok(app_state.templates.render("dashboard.html", &context)?)
}
