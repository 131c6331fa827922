use async_trait::async_trait;
use bandit_client::{
    domain::{DailyTotal, Event, LoginDetails, Task, TaskId},
    SessionToken,
};
use tokio::sync::watch;

use crate::domain::{AuthSession, AuthStatus, Dashboard, TaskPage, TimerSnapshot, TrackingError};

/// Inbound port for everything the pages can ask for.
///
/// HTTP handlers only talk to this trait. It orchestrates the backend port
/// and the per-session timers.
#[async_trait]
pub trait TrackingService: Send + Sync + 'static {
    // ========================================================================
    // Session
    // ========================================================================

    async fn login(&self, details: &LoginDetails) -> Result<SessionToken, TrackingError>;

    async fn register(&self, details: &LoginDetails) -> Result<(), TrackingError>;

    /// Forget everything held for the session, including a running timer.
    async fn logout(&self, token: &SessionToken);

    /// Decide whether a request's session is usable.
    async fn authenticate(&self, token: Option<SessionToken>) -> AuthStatus;

    // ========================================================================
    // Tasks
    // ========================================================================

    async fn dashboard(&self, session: &AuthSession) -> Result<Dashboard, TrackingError>;

    async fn task_page(
        &self,
        session: &AuthSession,
        task_id: TaskId,
    ) -> Result<TaskPage, TrackingError>;

    /// Chronological per-day totals for the task's chart.
    async fn daily_totals(
        &self,
        session: &AuthSession,
        task_id: TaskId,
    ) -> Result<Vec<DailyTotal>, TrackingError>;

    async fn create_task(
        &self,
        session: &AuthSession,
        name: &str,
        description: &str,
    ) -> Result<Task, TrackingError>;

    async fn update_description(
        &self,
        session: &AuthSession,
        task_id: TaskId,
        description: &str,
    ) -> Result<Task, TrackingError>;

    // ========================================================================
    // Timer
    // ========================================================================

    async fn start_timer(
        &self,
        session: &AuthSession,
        task_id: TaskId,
        notes: Option<String>,
    ) -> Result<TimerSnapshot, TrackingError>;

    /// Stop the running timer and record it as an event on the task.
    ///
    /// `notes` replace the notes given at start when not blank.
    async fn stop_timer(
        &self,
        session: &AuthSession,
        task_id: TaskId,
        notes: Option<String>,
    ) -> Result<Event, TrackingError>;

    async fn cancel_timer(&self, session: &AuthSession, task_id: TaskId)
        -> Result<(), TrackingError>;

    async fn current_timer(&self, session: &AuthSession) -> Option<TimerSnapshot>;

    async fn timer_ticks(&self, session: &AuthSession) -> Option<watch::Receiver<u64>>;
}
