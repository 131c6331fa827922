use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Event, TaskId, UserId};

/// A unit of trackable work owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub uuid: String,
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
}

impl Task {
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /tasks/add_task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
}

impl NewTask {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }
}

/// Body of `PUT /tasks/{id}`. The backend expects the full new-task shape
/// even though only the description changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionUpdate {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
}

impl DescriptionUpdate {
    pub fn for_task(task: &Task, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            user_id: task.user_id,
            name: task.name.clone(),
            description: Some(description).filter(|d| !d.trim().is_empty()),
        }
    }
}

/// A task together with every event recorded against it.
///
/// Derived at fetch time, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskWithEvents {
    pub task: Task,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_on: Option<OffsetDateTime>,
}

impl From<Task> for TaskWithEvents {
    fn from(task: Task) -> Self {
        Self {
            task,
            events: Vec::new(),
            updated_on: None,
        }
    }
}

/// One element of the `GET /tasks` answer.
///
/// Depending on the backend version the list holds bare tasks or tasks with
/// their events.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskListing {
    WithEvents(TaskWithEvents),
    Bare(Task),
}

impl From<TaskListing> for TaskWithEvents {
    fn from(listing: TaskListing) -> Self {
        match listing {
            TaskListing::WithEvents(task) => task,
            TaskListing::Bare(task) => task.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{
        "id": 3,
        "uuid": "0b7e9a63-3f0a-4d2c-9a8e-3c1f1b0f0e11",
        "user_id": 6,
        "name": "Write report",
        "description": "quarterly",
        "created_on": "2024-01-01T09:30:00Z"
    }"#;

    #[test]
    fn listing_accepts_bare_tasks() {
        let listing: Vec<TaskListing> = serde_json::from_str(&format!("[{}]", BARE)).unwrap();
        let tasks: Vec<TaskWithEvents> = listing.into_iter().map(Into::into).collect();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task.name, "Write report");
        assert!(tasks[0].events.is_empty());
        assert_eq!(tasks[0].updated_on, None);
    }

    #[test]
    fn listing_accepts_tasks_with_events() {
        let json = format!(
            r#"[{{
                "task": {},
                "events": [{{
                    "id": 1,
                    "uuid": "e1",
                    "user_id": 6,
                    "task_id": 3,
                    "date_began": "2024-01-01T10:00:00Z",
                    "duration": 90,
                    "notes": null
                }}],
                "updated_on": "2024-01-02T08:00:00Z"
            }}]"#,
            BARE
        );
        let listing: Vec<TaskListing> = serde_json::from_str(&json).unwrap();
        let tasks: Vec<TaskWithEvents> = listing.into_iter().map(Into::into).collect();

        assert_eq!(tasks[0].events.len(), 1);
        assert_eq!(tasks[0].events[0].duration, 90);
        assert!(tasks[0].updated_on.is_some());
    }

    #[test]
    fn null_description_is_accepted() {
        let json = BARE.replace(r#""quarterly""#, "null");
        let task: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task.description, None);
        assert_eq!(task.description_or_empty(), "");
    }

    #[test]
    fn description_update_keeps_name_and_owner() {
        let task: Task = serde_json::from_str(BARE).unwrap();
        let update = DescriptionUpdate::for_task(&task, "annual");

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "user_id": 6, "name": "Write report", "description": "annual" })
        );
        assert_eq!(DescriptionUpdate::for_task(&task, "").description, None);
    }

    #[test]
    fn blank_description_is_not_sent() {
        let new_task = NewTask::new(UserId::new(6), "Write report").with_description("   ");
        assert_eq!(new_task.description, None);
    }
}
