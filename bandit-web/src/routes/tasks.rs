use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use bandit_client::domain::{DailyTotal, TaskId};
use serde::Deserialize;
use tera::Context;
use tracing::instrument;

use super::{
    timer,
    view::{day_bars, EventRow, TaskHeader, TimerBanner},
    PageError,
};
use crate::{app_state::AppState, domain::AuthSession};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_task))
        .route("/:task_id", get(task_page))
        .route("/:task_id/description", post(update_description))
        .route("/:task_id/daily", get(daily_totals))
        .route("/:task_id/timer/start", post(timer::start_timer))
        .route("/:task_id/timer/stop", post(timer::stop_timer))
        .route("/:task_id/timer/cancel", post(timer::cancel_timer))
}

#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionForm {
    #[serde(default)]
    description: String,
}

pub(super) fn task_location(task_id: TaskId) -> String {
    format!("/tasks/{}", task_id)
}

#[instrument(name = "create_task", skip(app_state, session))]
pub async fn create_task(
    session: AuthSession,
    State(app_state): State<AppState>,
    Form(form): Form<NewTaskForm>,
) -> Result<Redirect, PageError> {
    let task = app_state
        .tracking
        .create_task(&session, &form.name, &form.description)
        .await?;

    Ok(Redirect::to(&task_location(task.id)))
}

#[instrument(name = "task_page", skip(app_state, session))]
pub async fn task_page(
    session: AuthSession,
    State(app_state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> Result<Html<String>, PageError> {
    let page = app_state.tracking.task_page(&session, task_id).await?;
    let offset = app_state.offset;

    let events: Vec<EventRow> = page
        .events
        .iter()
        .map(|event| EventRow::new(event, offset))
        .collect();

    let mut context = Context::new();
    context.insert("task", &TaskHeader::new(&page.task, offset));
    context.insert("total", &page.total.to_string());
    context.insert("events", &events);
    context.insert("days", &day_bars(&page.daily));
    context.insert("timer", &page.timer.as_ref().map(TimerBanner::from));
    context.insert("timer_runs_here", &page.timer_runs_here());

    Ok(app_state.templates.render("task.html", &context)?)
}

#[instrument(name = "update_description", skip(app_state, session))]
pub async fn update_description(
    session: AuthSession,
    State(app_state): State<AppState>,
    Path(task_id): Path<TaskId>,
    Form(form): Form<DescriptionForm>,
) -> Result<Redirect, PageError> {
    app_state
        .tracking
        .update_description(&session, task_id, &form.description)
        .await?;

    Ok(Redirect::to(&task_location(task_id)))
}

#[instrument(name = "daily_totals", skip(app_state, session))]
pub async fn daily_totals(
    session: AuthSession,
    State(app_state): State<AppState>,
    Path(task_id): Path<TaskId>,
) -> Result<Json<Vec<DailyTotal>>, PageError> {
    let daily = app_state.tracking.daily_totals(&session, task_id).await?;
    Ok(Json(daily))
}
