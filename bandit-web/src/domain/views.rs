use bandit_client::domain::{DailyTotal, Event, HoursMinutesSeconds, Task, TaskSummary};

use super::TimerSnapshot;

/// Everything the dashboard page shows.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub summaries: Vec<TaskSummary>,
    pub timer: Option<TimerSnapshot>,
}

/// Everything the task page shows. `events` are newest first, `daily` is
/// chronological.
#[derive(Debug, Clone)]
pub struct TaskPage {
    pub task: Task,
    pub events: Vec<Event>,
    pub total: HoursMinutesSeconds,
    pub daily: Vec<DailyTotal>,
    pub timer: Option<TimerSnapshot>,
}

impl TaskPage {
    /// True when the session's timer runs for this very task.
    pub fn timer_runs_here(&self) -> bool {
        self.timer
            .as_ref()
            .is_some_and(|timer| timer.task_id == self.task.id)
    }
}
