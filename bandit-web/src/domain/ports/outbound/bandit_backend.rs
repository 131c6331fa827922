use async_trait::async_trait;
use bandit_client::{
    domain::{
        DescriptionUpdate, Event, LoginDetails, NewEvent, NewTask, SessionInfo, Task, TaskDetail,
        TaskId, TaskWithEvents,
    },
    BanditError, SessionToken,
};

/// Outbound port for the Time Bandit backend.
///
/// Every call that needs a session takes the caller's token; implementations
/// hold no per-user state.
#[async_trait]
pub trait BanditBackend: Send + Sync + 'static {
    /// Exchange credentials for a session token.
    async fn login(&self, details: &LoginDetails) -> Result<SessionToken, BanditError>;

    async fn register(&self, details: &LoginDetails) -> Result<(), BanditError>;

    /// Resolve the owner of a session.
    async fn session(&self, token: &SessionToken) -> Result<SessionInfo, BanditError>;

    async fn tasks(&self, token: &SessionToken) -> Result<Vec<TaskWithEvents>, BanditError>;

    async fn task(&self, token: &SessionToken, task_id: TaskId)
        -> Result<TaskDetail, BanditError>;

    async fn add_task(&self, token: &SessionToken, new_task: &NewTask)
        -> Result<Task, BanditError>;

    async fn update_task(
        &self,
        token: &SessionToken,
        task_id: TaskId,
        update: &DescriptionUpdate,
    ) -> Result<Task, BanditError>;

    async fn add_event(&self, token: &SessionToken, new_event: &NewEvent)
        -> Result<Event, BanditError>;
}
