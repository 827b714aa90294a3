use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: u32,
    pub reading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord(pub BTreeMap<String, bool>);

impl ProgressRecord {
    pub fn is_done(&self, date_key: &str) -> bool {
        self.0.get(date_key).copied() == Some(true)
    }

    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressChange {
    pub key: String,
    pub new_value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayView {
    pub day_number: u32,
    pub date_key: String,
    pub day_label: String,
    pub formatted_date: String,
    pub reading: String,
    pub done: bool,
    pub is_today: bool,
    pub previous_day: Option<u32>,
    pub next_day: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayRow {
    pub day_number: u32,
    pub date_key: String,
    pub day_label: String,
    pub formatted_date: String,
    pub reading: String,
    pub done: bool,
    pub is_today: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekSummary {
    pub id: String,
    pub number: u32,
    pub start_day: u32,
    pub end_day: u32,
    pub completed_days: u32,
    pub total_days: u32,
    pub completion_percentage: f64,
    pub days: Vec<DayRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub current_week_id: String,
    pub weeks: Vec<WeekSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Completed,
    Today,
    Pending,
    Outside,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date_key: String,
    pub day_of_month: u32,
    pub status: DayStatus,
    pub day_number: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed_count: usize,
    pub total_days: u32,
    pub percentage: f64,
    pub rounded_percentage: u32,
    pub record: ProgressRecord,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountdownResponse {
    pub target: String,
    #[serde(flatten)]
    pub remaining: Countdown,
}
