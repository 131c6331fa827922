//! Serializable rows handed to the page templates.

use bandit_client::domain::{format_hms, us_date, DailyTotal, Event, Task, TaskSummary};
use serde::Serialize;
use time::{OffsetDateTime, UtcOffset};

use crate::domain::TimerSnapshot;

pub(crate) fn display_date(at: OffsetDateTime, offset: UtcOffset) -> String {
    us_date(at.to_offset(offset).date())
}

pub(crate) fn display_date_time(at: OffsetDateTime, offset: UtcOffset) -> String {
    let local = at.to_offset(offset);
    format!(
        "{} {:02}:{:02}",
        us_date(local.date()),
        local.hour(),
        local.minute()
    )
}

#[derive(Debug, Serialize)]
pub(crate) struct TaskRow {
    id: i32,
    name: String,
    description: String,
    created: String,
    total: String,
    events: usize,
    last_worked: Option<String>,
}

impl TaskRow {
    pub(crate) fn new(summary: &TaskSummary, offset: UtcOffset) -> Self {
        Self {
            id: summary.task.id.as_i32(),
            name: summary.task.name.clone(),
            description: summary.task.description_or_empty().to_string(),
            created: display_date(summary.task.created_on, offset),
            total: summary.total.to_string(),
            events: summary.event_count,
            last_worked: summary
                .last_worked
                .map(|at| display_date_time(at, offset)),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TaskHeader {
    id: i32,
    name: String,
    description: String,
    created: String,
}

impl TaskHeader {
    pub(crate) fn new(task: &Task, offset: UtcOffset) -> Self {
        Self {
            id: task.id.as_i32(),
            name: task.name.clone(),
            description: task.description_or_empty().to_string(),
            created: display_date(task.created_on, offset),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EventRow {
    began: String,
    duration: String,
    notes: String,
}

impl EventRow {
    pub(crate) fn new(event: &Event, offset: UtcOffset) -> Self {
        Self {
            began: display_date_time(event.date_began, offset),
            duration: format_hms(event.duration),
            notes: event.notes.clone().unwrap_or_default(),
        }
    }
}

/// One bar of the daily chart. `percent` is relative to the busiest day.
#[derive(Debug, Serialize)]
pub(crate) struct DayBar {
    label: String,
    duration: String,
    percent: u64,
}

pub(crate) fn day_bars(daily: &[DailyTotal]) -> Vec<DayBar> {
    let busiest = daily.iter().map(|day| day.duration).max().unwrap_or(0);

    daily
        .iter()
        .map(|day| DayBar {
            label: day.label(),
            duration: format_hms(day.duration),
            percent: if busiest == 0 {
                0
            } else {
                day.duration * 100 / busiest
            },
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub(crate) struct TimerBanner {
    task_id: i32,
    formatted: String,
}

impl From<&TimerSnapshot> for TimerBanner {
    fn from(snapshot: &TimerSnapshot) -> Self {
        Self {
            task_id: snapshot.task_id.as_i32(),
            formatted: snapshot.formatted.clone(),
        }
    }
}
