use crate::models::{DayRow, DayView, ProgressRecord, ProgressSummary, TimelineResponse, WeekSummary};
use crate::plan::{PlanIndex, date_key};
use crate::progress::ProgressStore;
use crate::storage::KeyValueStore;
use chrono::NaiveDate;

pub fn day_view(plan: &PlanIndex, record: &ProgressRecord, day: u32, today: NaiveDate) -> Option<DayView> {
    let date = plan.date_for_day_number(day)?;
    let key = date_key(date);
    Some(DayView {
        day_number: day,
        done: record.is_done(&key),
        is_today: date == today,
        date_key: key,
        day_label: plan.day_label(day).unwrap_or_default(),
        formatted_date: plan.formatted_date(day).unwrap_or_default(),
        reading: plan.reading_for_day_number(day).to_string(),
        previous_day: plan.previous_day(day),
        next_day: plan.next_day(day),
    })
}

pub fn build_timeline(plan: &PlanIndex, record: &ProgressRecord, today: NaiveDate) -> TimelineResponse {
    let weeks = plan
        .weeks_view()
        .into_iter()
        .map(|week| {
            let days: Vec<DayRow> = week
                .days
                .into_iter()
                .map(|day| {
                    let key = date_key(day.date);
                    DayRow {
                        day_number: day.day_number,
                        done: record.is_done(&key),
                        is_today: day.date == today,
                        date_key: key,
                        formatted_date: plan.formatted_date(day.day_number).unwrap_or_default(),
                        day_label: day.day_label,
                        reading: day.reading,
                    }
                })
                .collect();

            let total_days = days.len() as u32;
            let completed_days = days.iter().filter(|day| day.done).count() as u32;
            WeekSummary {
                id: week_id(week.week_number),
                number: week.week_number,
                start_day: days.first().map(|day| day.day_number).unwrap_or_default(),
                end_day: days.last().map(|day| day.day_number).unwrap_or_default(),
                completed_days,
                total_days,
                completion_percentage: f64::from(completed_days) / f64::from(total_days.max(1)) * 100.0,
                days,
            }
        })
        .collect();

    let current_week = if plan.contains_date(today) {
        (plan.day_number_for_date(today) - 1) / 7 + 1
    } else {
        1
    };

    TimelineResponse {
        current_week_id: week_id(current_week),
        weeks,
    }
}

pub fn progress_summary<S: KeyValueStore>(plan: &PlanIndex, store: &ProgressStore<S>) -> ProgressSummary {
    let percentage = store.completion_percentage(i64::from(plan.total_days()));
    ProgressSummary {
        completed_count: store.completed_count(),
        total_days: plan.total_days(),
        percentage,
        rounded_percentage: percentage.round() as u32,
        record: store.record().clone(),
    }
}

fn week_id(number: u32) -> String {
    format!("week-{number}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleEntry;
    use crate::storage::MemoryStore;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn plan(days: u32) -> PlanIndex {
        let entries = (1..=days)
            .map(|day| ScheduleEntry {
                day,
                reading: format!("Reading {day}"),
            })
            .collect();
        PlanIndex::new(ymd(2025, 7, 5), entries).unwrap()
    }

    fn record(keys: &[&str]) -> ProgressRecord {
        let mut record = ProgressRecord::default();
        for key in keys {
            record.0.insert(key.to_string(), true);
        }
        record
    }

    #[test]
    fn day_view_describes_the_card() {
        let plan = plan(3);
        let view = day_view(&plan, &record(&["2025-07-06"]), 2, ymd(2025, 7, 6)).unwrap();
        assert_eq!(view.date_key, "2025-07-06");
        assert_eq!(view.day_label, "Sunday");
        assert_eq!(view.formatted_date, "July 6, 2025");
        assert_eq!(view.reading, "Reading 2");
        assert!(view.done);
        assert!(view.is_today);
        assert_eq!(view.previous_day, Some(1));
        assert_eq!(view.next_day, Some(3));

        assert!(day_view(&plan, &ProgressRecord::default(), 4, ymd(2025, 7, 6)).is_none());
    }

    #[test]
    fn weeks_carry_completion() {
        let plan = plan(10);
        let done = record(&["2025-07-05", "2025-07-06", "2025-07-13"]);
        let timeline = build_timeline(&plan, &done, ymd(2025, 7, 13));

        assert_eq!(timeline.weeks.len(), 2);
        let first = &timeline.weeks[0];
        assert_eq!(first.id, "week-1");
        assert_eq!((first.start_day, first.end_day), (1, 7));
        assert_eq!(first.completed_days, 2);
        assert!((first.completion_percentage - 200.0 / 7.0).abs() < 1e-9);

        let second = &timeline.weeks[1];
        assert_eq!((second.start_day, second.end_day), (8, 10));
        assert_eq!(second.total_days, 3);
        assert_eq!(second.completed_days, 1);
        assert!(second.days[1].is_today);
        assert_eq!(timeline.current_week_id, "week-2");
    }

    #[test]
    fn current_week_defaults_to_first_outside_window() {
        let plan = plan(10);
        let timeline = build_timeline(&plan, &ProgressRecord::default(), ymd(2030, 1, 1));
        assert_eq!(timeline.current_week_id, "week-1");
        assert!(timeline.weeks.iter().all(|week| week.days.iter().all(|day| !day.is_today)));
    }

    #[tokio::test]
    async fn summary_rounds_percentage() {
        let plan = plan(3);
        let mut store = ProgressStore::load(MemoryStore::default()).await;
        store.toggle_done("2025-07-05").await;

        let summary = progress_summary(&plan, &store);
        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.total_days, 3);
        assert_eq!(summary.rounded_percentage, 33);
        assert!(summary.record.is_done("2025-07-05"));
    }
}
