use async_trait::async_trait;
use bandit_client::{
    domain::{
        DescriptionUpdate, Event, LoginDetails, NewEvent, NewTask, SessionInfo, Task, TaskDetail,
        TaskId, TaskWithEvents,
    },
    BanditClient, BanditError, SessionToken,
};

use crate::domain::ports::outbound::BanditBackend;

/// Adapter that wraps the Time Bandit HTTP client to implement the
/// BanditBackend port.
pub struct BanditAdapter {
    client: BanditClient,
}

impl BanditAdapter {
    pub fn new(client: BanditClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BanditBackend for BanditAdapter {
    async fn login(&self, details: &LoginDetails) -> Result<SessionToken, BanditError> {
        self.client.login(details).await
    }

    async fn register(&self, details: &LoginDetails) -> Result<(), BanditError> {
        self.client.register(details).await
    }

    async fn session(&self, token: &SessionToken) -> Result<SessionInfo, BanditError> {
        self.client.session(token).await
    }

    async fn tasks(&self, token: &SessionToken) -> Result<Vec<TaskWithEvents>, BanditError> {
        self.client.tasks(token).await
    }

    async fn task(
        &self,
        token: &SessionToken,
        task_id: TaskId,
    ) -> Result<TaskDetail, BanditError> {
        self.client.task(token, task_id).await
    }

    async fn add_task(
        &self,
        token: &SessionToken,
        new_task: &NewTask,
    ) -> Result<Task, BanditError> {
        self.client.add_task(token, new_task).await
    }

    async fn update_task(
        &self,
        token: &SessionToken,
        task_id: TaskId,
        update: &DescriptionUpdate,
    ) -> Result<Task, BanditError> {
        self.client.update_task(token, task_id, update).await
    }

    async fn add_event(
        &self,
        token: &SessionToken,
        new_event: &NewEvent,
    ) -> Result<Event, BanditError> {
        self.client.add_event(token, new_event).await
    }
}
