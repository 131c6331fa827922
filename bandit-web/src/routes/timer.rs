use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Redirect,
    },
    routing::get,
    Form, Json, Router,
};
use bandit_client::domain::{format_hms, TaskId};
use futures::{stream, Stream};
use serde::Deserialize;
use tracing::instrument;

use super::{tasks::task_location, PageError};
use crate::{
    app_state::AppState,
    domain::{AuthSession, TimerSnapshot},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_timer))
        .route("/ticks", get(timer_ticks))
}

#[derive(Debug, Deserialize)]
pub struct TimerForm {
    notes: Option<String>,
}

// ============================================================================
// Start / Stop / Cancel
// ============================================================================

#[instrument(name = "start_timer", skip(app_state, session))]
pub async fn start_timer(
    session: AuthSession,
    State(app_state): State<AppState>,
    Path(task_id): Path<TaskId>,
    Form(form): Form<TimerForm>,
) -> Result<Redirect, PageError> {
    app_state
        .tracking
        .start_timer(&session, task_id, form.notes)
        .await?;

    Ok(Redirect::to(&task_location(task_id)))
}

#[instrument(name = "stop_timer", skip(app_state, session))]
pub async fn stop_timer(
    session: AuthSession,
    State(app_state): State<AppState>,
    Path(task_id): Path<TaskId>,
    Form(form): Form<TimerForm>,
) -> Result<Redirect, PageError> {
    let event = app_state
        .tracking
        .stop_timer(&session, task_id, form.notes)
        .await?;
    tracing::debug!("recorded {}s on task {}", event.duration, task_id);

    Ok(Redirect::to(&task_location(task_id)))
}

#[instrument(name = "cancel_timer", skip(app_state, session))]
pub async fn cancel_timer(
    session: AuthSession,
    State(app_state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> Result<Redirect, PageError> {
    app_state.tracking.cancel_timer(&session, task_id).await?;
    Ok(Redirect::to(&task_location(task_id)))
}

// ============================================================================
// Observe
// ============================================================================

#[instrument(name = "current_timer", skip(app_state, session))]
pub async fn current_timer(
    session: AuthSession,
    State(app_state): State<AppState>,
) -> Json<Option<TimerSnapshot>> {
    Json(app_state.tracking.current_timer(&session).await)
}

/// One `tick` event per timer tick carrying the elapsed time as `H:MM:SS`.
/// The stream ends when the timer is stopped or discarded.
#[instrument(name = "timer_ticks", skip(app_state, session))]
pub async fn timer_ticks(
    session: AuthSession,
    State(app_state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, PageError> {
    let ticks = app_state
        .tracking
        .timer_ticks(&session)
        .await
        .ok_or_else(|| PageError::not_found("no timer running"))?;

    let events = stream::unfold(ticks, |mut ticks| async move {
        ticks.changed().await.ok()?;
        let elapsed = *ticks.borrow_and_update();
        Some((Ok(Event::default().event("tick").data(format_hms(elapsed))), ticks))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
