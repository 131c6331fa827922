use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use time::{Date, UtcOffset};

use super::Event;

/// Summed duration of all events that began on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    #[serde(serialize_with = "serialize_us_date")]
    pub date: Date,
    pub duration: u64,
}

impl DailyTotal {
    /// The day as `M/D/YYYY`, e.g. `1/1/2024`.
    pub fn label(&self) -> String {
        us_date(self.date)
    }
}

/// US-style `M/D/YYYY` without zero padding.
pub fn us_date(date: Date) -> String {
    format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year())
}

fn serialize_us_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&us_date(*date))
}

/// Group events by the calendar day of `date_began` in `offset` and sum
/// their durations.
///
/// The series is ordered chronologically, oldest day first, whatever the
/// order of `events`. Zero-length events still produce a day entry.
pub fn daily_totals<'a, I>(events: I, offset: UtcOffset) -> Vec<DailyTotal>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut by_day: BTreeMap<Date, u64> = BTreeMap::new();

    for event in events {
        let day = event.date_began.to_offset(offset).date();
        *by_day.entry(day).or_insert(0) += event.duration;
    }

    by_day
        .into_iter()
        .map(|(date, duration)| DailyTotal { date, duration })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventId, TaskId, UserId};
    use time::macros::{date, datetime, offset};
    use time::OffsetDateTime;

    fn event(date_began: OffsetDateTime, duration: u64) -> Event {
        Event {
            id: EventId::new(1),
            uuid: "e".to_string(),
            user_id: UserId::new(6),
            task_id: TaskId::new(3),
            date_began,
            duration,
            notes: None,
        }
    }

    #[test]
    fn same_day_events_are_summed() {
        let events = vec![
            event(datetime!(2024-01-01 09:00 UTC), 30),
            event(datetime!(2024-01-01 17:45 UTC), 15),
        ];

        let totals = daily_totals(&events, UtcOffset::UTC);

        assert_eq!(
            totals,
            vec![DailyTotal {
                date: date!(2024 - 01 - 01),
                duration: 45
            }]
        );
        assert_eq!(totals[0].label(), "1/1/2024");
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(daily_totals(&Vec::<Event>::new(), UtcOffset::UTC).is_empty());
    }

    #[test]
    fn series_is_chronological_regardless_of_input_order() {
        let events = vec![
            event(datetime!(2024-03-02 10:00 UTC), 10),
            event(datetime!(2023-12-31 10:00 UTC), 20),
            event(datetime!(2024-03-01 10:00 UTC), 30),
            event(datetime!(2023-12-31 11:00 UTC), 5),
        ];

        let labels: Vec<(String, u64)> = daily_totals(&events, UtcOffset::UTC)
            .iter()
            .map(|total| (total.label(), total.duration))
            .collect();

        assert_eq!(
            labels,
            vec![
                ("12/31/2023".to_string(), 25),
                ("3/1/2024".to_string(), 30),
                ("3/2/2024".to_string(), 10),
            ]
        );
    }

    #[test]
    fn day_boundary_follows_display_offset() {
        // 23:30 UTC on Jan 1st is already Jan 2nd in UTC+2.
        let events = vec![event(datetime!(2024-01-01 23:30 UTC), 60)];

        let utc = daily_totals(&events, UtcOffset::UTC);
        let plus_two = daily_totals(&events, offset!(+2));

        assert_eq!(utc[0].date, date!(2024 - 01 - 01));
        assert_eq!(plus_two[0].date, date!(2024 - 01 - 02));
    }

    #[test]
    fn zero_duration_events_are_kept() {
        let events = vec![event(datetime!(2024-01-05 08:00 UTC), 0)];
        assert_eq!(daily_totals(&events, UtcOffset::UTC)[0].duration, 0);
    }

    #[test]
    fn serializes_with_us_date_label() {
        let total = DailyTotal {
            date: date!(2024 - 01 - 01),
            duration: 45,
        };
        assert_eq!(
            serde_json::to_value(total).unwrap(),
            serde_json::json!({ "date": "1/1/2024", "duration": 45 })
        );
    }
}
