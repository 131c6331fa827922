//! In-memory backend for tests.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, RwLock,
};

use async_trait::async_trait;
use axum::http::StatusCode;
use bandit_client::{
    domain::{
        DescriptionUpdate, Event, EventId, LoginDetails, NewEvent, NewTask, SessionInfo, Task,
        TaskDetail, TaskId, TaskWithEvents, UserId,
    },
    BanditError, SessionToken,
};
use time::{macros::datetime, OffsetDateTime};

use super::BanditBackend;

pub const MOCK_EMAIL: &str = "ada@example.com";
pub const MOCK_PASSWORD: &str = "hunter2";
pub const MOCK_TOKEN: &str = "mock-session";
pub const MOCK_USER: i32 = 6;

/// Backend that keeps tasks and events in memory and knows one account.
///
/// `go_offline` makes every call fail the way an unreachable backend does.
/// The `answer_*` and `fail_*` switches break single calls; `recover` clears
/// them all.
#[derive(Clone, Default)]
pub struct MockBanditBackend {
    tasks: Arc<RwLock<Vec<Task>>>,
    events: Arc<RwLock<Vec<Event>>>,
    offline: Arc<AtomicBool>,
    session_status: Arc<RwLock<Option<StatusCode>>>,
    tasks_status: Arc<RwLock<Option<StatusCode>>>,
    events_offline: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockBanditBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(self, id: i32, name: &str) -> Self {
        self.tasks.write().unwrap().push(Task {
            id: TaskId::new(id),
            uuid: format!("task-{}", id),
            user_id: UserId::new(MOCK_USER),
            name: name.to_string(),
            description: None,
            created_on: datetime!(2024-01-01 09:00 UTC),
        });
        self
    }

    pub fn with_event(self, task_id: i32, date_began: OffsetDateTime, duration: u64) -> Self {
        {
            let mut events = self.events.write().unwrap();
            let id = events.len() as i32 + 1;
            events.push(Event {
                id: EventId::new(id),
                uuid: format!("event-{}", id),
                user_id: UserId::new(MOCK_USER),
                task_id: TaskId::new(task_id),
                date_began,
                duration,
                notes: None,
            });
        }
        self
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn answer_session_with(&self, status: StatusCode) {
        *self.session_status.write().unwrap() = Some(status);
    }

    pub fn answer_tasks_with(&self, status: StatusCode) {
        *self.tasks_status.write().unwrap() = Some(status);
    }

    pub fn fail_event_recording(&self) {
        self.events_offline.store(true, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.offline.store(false, Ordering::SeqCst);
        self.events_offline.store(false, Ordering::SeqCst);
        self.session_status.write().unwrap().take();
        self.tasks_status.write().unwrap().take();
    }

    /// Every recorded event (for test assertions).
    pub fn all_events(&self) -> Vec<Event> {
        self.events.read().unwrap().clone()
    }

    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.read().unwrap().clone()
    }

    fn check(&self, token: &SessionToken) -> Result<(), BanditError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BanditError::NetworkFailure("connection refused".to_string()));
        }
        if token.as_str() != MOCK_TOKEN {
            return Err(BanditError::Unauthorized);
        }
        Ok(())
    }

    fn injected(status: &RwLock<Option<StatusCode>>) -> Result<(), BanditError> {
        match *status.read().unwrap() {
            Some(status) => Err(BanditError::UnexpectedStatus {
                status,
                body: "injected".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn find_task(&self, task_id: TaskId) -> Result<Task, BanditError> {
        self.tasks
            .read()
            .unwrap()
            .iter()
            .find(|task| task.id == task_id)
            .cloned()
            .ok_or_else(|| BanditError::UnexpectedStatus {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            })
    }

    fn events_of(&self, task_id: TaskId) -> Vec<Event> {
        self.events
            .read()
            .unwrap()
            .iter()
            .filter(|event| event.task_id == task_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BanditBackend for MockBanditBackend {
    async fn login(&self, details: &LoginDetails) -> Result<SessionToken, BanditError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BanditError::NetworkFailure("connection refused".to_string()));
        }
        if details.email == MOCK_EMAIL && details.password == MOCK_PASSWORD {
            Ok(SessionToken::new(MOCK_TOKEN))
        } else {
            Err(BanditError::Unauthorized)
        }
    }

    async fn register(&self, details: &LoginDetails) -> Result<(), BanditError> {
        if details.email == MOCK_EMAIL {
            return Err(BanditError::UnexpectedStatus {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "duplicate key".to_string(),
            });
        }
        Ok(())
    }

    async fn session(&self, token: &SessionToken) -> Result<SessionInfo, BanditError> {
        self.check(token)?;
        Self::injected(&self.session_status)?;
        Ok(SessionInfo {
            user_id: UserId::new(MOCK_USER),
        })
    }

    async fn tasks(&self, token: &SessionToken) -> Result<Vec<TaskWithEvents>, BanditError> {
        self.check(token)?;
        Self::injected(&self.tasks_status)?;
        Ok(self
            .all_tasks()
            .into_iter()
            .map(|task| TaskWithEvents {
                events: self.events_of(task.id),
                task,
                updated_on: None,
            })
            .collect())
    }

    async fn task(
        &self,
        token: &SessionToken,
        task_id: TaskId,
    ) -> Result<TaskDetail, BanditError> {
        self.check(token)?;
        Ok(TaskDetail {
            task: self.find_task(task_id)?,
            events: self.events_of(task_id),
        })
    }

    async fn add_task(
        &self,
        token: &SessionToken,
        new_task: &NewTask,
    ) -> Result<Task, BanditError> {
        self.check(token)?;
        let mut tasks = self.tasks.write().unwrap();
        let id = tasks.len() as i32 + 1;
        let task = Task {
            id: TaskId::new(id),
            uuid: format!("task-{}", id),
            user_id: new_task.user_id,
            name: new_task.name.clone(),
            description: new_task.description.clone(),
            created_on: datetime!(2024-02-01 09:00 UTC),
        };
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        token: &SessionToken,
        task_id: TaskId,
        update: &DescriptionUpdate,
    ) -> Result<Task, BanditError> {
        self.check(token)?;
        let mut tasks = self.tasks.write().unwrap();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| BanditError::UnexpectedStatus {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            })?;
        task.description = update.description.clone();
        Ok(task.clone())
    }

    async fn add_event(
        &self,
        token: &SessionToken,
        new_event: &NewEvent,
    ) -> Result<Event, BanditError> {
        self.check(token)?;
        if self.events_offline.load(Ordering::SeqCst) {
            return Err(BanditError::NetworkFailure("connection reset".to_string()));
        }
        let mut events = self.events.write().unwrap();
        let id = events.len() as i32 + 1;
        let event = Event {
            id: EventId::new(id),
            uuid: format!("event-{}", id),
            user_id: new_event.user_id,
            task_id: new_event.task_id,
            date_began: new_event.date_began,
            duration: new_event.duration,
            notes: new_event.notes.clone(),
        };
        events.push(event.clone());
        Ok(event)
    }
}
