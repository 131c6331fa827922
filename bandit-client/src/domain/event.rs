use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{EventId, TaskId, UserId};

/// One recorded time-tracking session against a task.
///
/// `duration` is in seconds. It is unsigned, so a negative value from the
/// backend fails deserialization instead of leaking into the aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub uuid: String,
    pub user_id: UserId,
    pub task_id: TaskId,
    #[serde(with = "time::serde::rfc3339")]
    pub date_began: OffsetDateTime,
    pub duration: u64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /events/add_event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEvent {
    pub user_id: UserId,
    pub task_id: TaskId,
    #[serde(with = "time::serde::rfc3339")]
    pub date_began: OffsetDateTime,
    pub duration: u64,
    pub notes: Option<String>,
}

impl NewEvent {
    pub fn new(
        user_id: UserId,
        task_id: TaskId,
        date_began: OffsetDateTime,
        duration: u64,
    ) -> Self {
        Self {
            user_id,
            task_id,
            date_began,
            duration,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }
}

/// `{ task, events }` as answered by `GET /tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskDetail {
    pub task: super::Task,
    #[serde(default)]
    pub events: Vec<Event>,
}
