use time::OffsetDateTime;

use super::{Event, HoursMinutesSeconds, Task, TaskWithEvents};

/// Total seconds recorded across `events`.
pub fn total_duration<'a, I>(events: I) -> u64
where
    I: IntoIterator<Item = &'a Event>,
{
    events.into_iter().map(|event| event.duration).sum()
}

/// One dashboard row: a task and how much time went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    pub task: Task,
    pub total: HoursMinutesSeconds,
    pub event_count: usize,
    pub last_worked: Option<OffsetDateTime>,
}

impl From<&TaskWithEvents> for TaskSummary {
    fn from(entry: &TaskWithEvents) -> Self {
        Self {
            task: entry.task.clone(),
            total: HoursMinutesSeconds(total_duration(&entry.events)),
            event_count: entry.events.len(),
            last_worked: entry.events.iter().map(|event| event.date_began).max(),
        }
    }
}

/// Build dashboard rows, most recently created task first.
pub fn summarize(tasks: &[TaskWithEvents]) -> Vec<TaskSummary> {
    let mut summaries: Vec<TaskSummary> = tasks.iter().map(TaskSummary::from).collect();
    summaries.sort_by(|a, b| {
        b.task
            .created_on
            .cmp(&a.task.created_on)
            .then_with(|| a.task.id.cmp(&b.task.id))
    });
    summaries
}
