use std::sync::Arc;

use async_trait::async_trait;
use bandit_client::{
    domain::{
        daily_totals, summarize, total_duration, DailyTotal, DescriptionUpdate, Event,
        HoursMinutesSeconds, LoginDetails, NewEvent, NewTask, Task, TaskId,
    },
    BanditError, SessionToken,
};
use time::UtcOffset;
use tokio::sync::watch;

use crate::domain::{
    ports::{inbound::TrackingService, outbound::BanditBackend},
    refuses_session, AuthSession, AuthStatus, Dashboard, TaskPage, TimerRegistry, TimerSnapshot,
    TrackingError,
};

/// Implementation of the TrackingService inbound port.
///
/// Talks to the backend through the BanditBackend outbound port and keeps
/// the running timers itself. `offset` decides which calendar day an event
/// belongs to.
pub struct TrackingServiceImpl<B> {
    backend: Arc<B>,
    timers: TimerRegistry,
    offset: UtcOffset,
}

impl<B: BanditBackend> TrackingServiceImpl<B> {
    pub fn new(backend: Arc<B>, timers: TimerRegistry, offset: UtcOffset) -> Self {
        Self {
            backend,
            timers,
            offset,
        }
    }
}

#[async_trait]
impl<B: BanditBackend> TrackingService for TrackingServiceImpl<B> {
    async fn login(&self, details: &LoginDetails) -> Result<SessionToken, TrackingError> {
        Ok(self.backend.login(details).await?)
    }

    async fn register(&self, details: &LoginDetails) -> Result<(), TrackingError> {
        if details.email.is_empty() || details.password.is_empty() {
            return Err(TrackingError::invalid_input(
                "email and password are required",
            ));
        }

        Ok(self.backend.register(details).await?)
    }

    async fn logout(&self, token: &SessionToken) {
        self.timers.end_session(token).await;
    }

    async fn authenticate(&self, token: Option<SessionToken>) -> AuthStatus {
        let Some(token) = token else {
            return AuthStatus::Unauthenticated;
        };

        match self.backend.session(&token).await {
            Ok(info) => AuthStatus::Authenticated(AuthSession {
                user_id: info.user_id,
                token,
            }),
            Err(err) if refuses_session(&err) => {
                self.timers.end_session(&token).await;
                AuthStatus::Unauthenticated
            }
            Err(err) => AuthStatus::Error(err),
        }
    }

    async fn dashboard(&self, session: &AuthSession) -> Result<Dashboard, TrackingError> {
        let tasks = self.backend.tasks(&session.token).await?;

        Ok(Dashboard {
            summaries: summarize(&tasks),
            timer: self.timers.snapshot(&session.token).await,
        })
    }

    async fn task_page(
        &self,
        session: &AuthSession,
        task_id: TaskId,
    ) -> Result<TaskPage, TrackingError> {
        let detail = self.backend.task(&session.token, task_id).await?;

        let mut events = detail.events;
        events.sort_by(|a, b| b.date_began.cmp(&a.date_began));

        Ok(TaskPage {
            total: HoursMinutesSeconds(total_duration(&events)),
            daily: daily_totals(&events, self.offset),
            task: detail.task,
            events,
            timer: self.timers.snapshot(&session.token).await,
        })
    }

    async fn daily_totals(
        &self,
        session: &AuthSession,
        task_id: TaskId,
    ) -> Result<Vec<DailyTotal>, TrackingError> {
        let detail = self.backend.task(&session.token, task_id).await?;
        Ok(daily_totals(&detail.events, self.offset))
    }

    async fn create_task(
        &self,
        session: &AuthSession,
        name: &str,
        description: &str,
    ) -> Result<Task, TrackingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackingError::invalid_input("task name must not be empty"));
        }

        let new_task = NewTask::new(session.user_id, name).with_description(description.trim());
        Ok(self.backend.add_task(&session.token, &new_task).await?)
    }

    async fn update_description(
        &self,
        session: &AuthSession,
        task_id: TaskId,
        description: &str,
    ) -> Result<Task, TrackingError> {
        let detail = self.backend.task(&session.token, task_id).await?;
        let update = DescriptionUpdate::for_task(&detail.task, description.trim());

        Ok(self
            .backend
            .update_task(&session.token, task_id, &update)
            .await?)
    }

    async fn start_timer(
        &self,
        session: &AuthSession,
        task_id: TaskId,
        notes: Option<String>,
    ) -> Result<TimerSnapshot, TrackingError> {
        // Make sure the task exists and belongs to the session before ticking.
        self.backend.task(&session.token, task_id).await?;

        let notes = notes.filter(|notes| !notes.trim().is_empty());
        Ok(self.timers.start(&session.token, task_id, notes).await?)
    }

    async fn stop_timer(
        &self,
        session: &AuthSession,
        task_id: TaskId,
        notes: Option<String>,
    ) -> Result<Event, TrackingError> {
        let timer = self.timers.take(&session.token, task_id).await?;
        let stopped = timer.stopped();

        let notes = notes
            .filter(|notes| !notes.trim().is_empty())
            .or(stopped.notes);
        let mut new_event =
            NewEvent::new(session.user_id, task_id, stopped.started_at, stopped.elapsed);
        if let Some(notes) = notes {
            new_event = new_event.with_notes(notes);
        }

        match self.backend.add_event(&session.token, &new_event).await {
            Ok(event) => Ok(event),
            Err(err @ BanditError::NetworkFailure(_)) => {
                tracing::warn!(
                    "recording {}s on task {} failed, keeping the timer: {}",
                    stopped.elapsed,
                    task_id,
                    err
                );
                if let Err(restore_err) = self.timers.restore(&session.token, timer).await {
                    tracing::error!(
                        "lost {}s on task {}: {}",
                        stopped.elapsed,
                        task_id,
                        restore_err
                    );
                }
                Err(err.into())
            }
            Err(err) => {
                tracing::error!(
                    "lost {}s on task {}: recording the event failed: {}",
                    stopped.elapsed,
                    task_id,
                    err
                );
                Err(err.into())
            }
        }
    }

    async fn cancel_timer(
        &self,
        session: &AuthSession,
        task_id: TaskId,
    ) -> Result<(), TrackingError> {
        Ok(self.timers.discard(&session.token, task_id).await?)
    }

    async fn current_timer(&self, session: &AuthSession) -> Option<TimerSnapshot> {
        self.timers.snapshot(&session.token).await
    }

    async fn timer_ticks(&self, session: &AuthSession) -> Option<watch::Receiver<u64>> {
        self.timers.subscribe(&session.token).await
    }
}
