use crate::clock::Clock;
use crate::errors::PlanError;
use crate::models::ScheduleEntry;
use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

pub const BUNDLED_PLAN: &str = include_str!("../assets/plan.json");

const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlanFile {
    Canonical {
        start_date: String,
        days: Vec<ScheduleEntry>,
    },
    DayList(Vec<ScheduleEntry>),
    DateKeyed(BTreeMap<String, Readings>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Readings {
    One(String),
    Many(Vec<String>),
}

impl Readings {
    fn into_label(self) -> String {
        match self {
            Readings::One(reading) => reading,
            Readings::Many(readings) => readings.join("; "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    pub day_number: u32,
    pub date: NaiveDate,
    pub reading: String,
    pub day_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub week_number: u32,
    pub days: Vec<WeekDay>,
}

#[derive(Debug, Clone)]
pub struct PlanIndex {
    start_date: NaiveDate,
    entries: Vec<ScheduleEntry>,
}

impl PlanIndex {
    pub fn new(start_date: NaiveDate, mut entries: Vec<ScheduleEntry>) -> Result<Self, PlanError> {
        if entries.is_empty() {
            return Err(PlanError::Empty);
        }

        entries.sort_by_key(|entry| entry.day);
        for (idx, entry) in entries.iter().enumerate() {
            let expected = idx as u32 + 1;
            if entry.day == expected {
                continue;
            }
            if idx > 0 && entries[idx - 1].day == entry.day {
                return Err(PlanError::DuplicateDay(entry.day));
            }
            return Err(PlanError::MissingDay {
                expected,
                found: entry.day,
            });
        }

        Ok(Self {
            start_date,
            entries,
        })
    }

    fn from_date_keyed(map: BTreeMap<String, Readings>) -> Result<Self, PlanError> {
        let mut dated = Vec::with_capacity(map.len());
        for (key, readings) in map {
            let date = parse_date_key(&key).ok_or_else(|| PlanError::InvalidDateKey(key.clone()))?;
            dated.push((date, readings.into_label()));
        }
        dated.sort_by_key(|(date, _)| *date);

        let Some(&(start_date, _)) = dated.first() else {
            return Err(PlanError::Empty);
        };

        for pair in dated.windows(2) {
            if pair[1].0 - pair[0].0 != Duration::days(1) {
                return Err(PlanError::NonContiguousDates {
                    previous: date_key(pair[0].0),
                    next: date_key(pair[1].0),
                });
            }
        }

        let entries = dated
            .into_iter()
            .enumerate()
            .map(|(idx, (_, reading))| ScheduleEntry {
                day: idx as u32 + 1,
                reading,
            })
            .collect();

        Self::new(start_date, entries)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(i64::from(self.total_days()) - 1)
    }

    pub fn total_days(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date()
    }

    /// Day number covering `date`, clamped into the plan window.
    pub fn day_number_for_date(&self, date: NaiveDate) -> u32 {
        let offset = (date - self.start_date).num_days();
        offset
            .saturating_add(1)
            .clamp(1, i64::from(self.total_days())) as u32
    }

    pub fn day_number_for_instant<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> u32 {
        self.day_number_for_date(instant.date_naive())
    }

    /// Exact lookup; `None` for malformed keys and dates outside the window.
    pub fn day_number_for_date_key(&self, key: &str) -> Option<u32> {
        let date = parse_date_key(key)?;
        self.contains_date(date)
            .then(|| self.day_number_for_date(date))
    }

    pub fn date_for_day_number(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.total_days() {
            return None;
        }
        Some(self.start_date + Duration::days(i64::from(day) - 1))
    }

    pub fn date_key_for_day_number(&self, day: u32) -> Option<String> {
        self.date_for_day_number(day).map(date_key)
    }

    pub fn reading_for_day_number(&self, day: u32) -> &str {
        day.checked_sub(1)
            .and_then(|idx| self.entries.get(idx as usize))
            .map(|entry| entry.reading.as_str())
            .unwrap_or("")
    }

    pub fn day_label(&self, day: u32) -> Option<String> {
        self.date_for_day_number(day).map(weekday_name)
    }

    pub fn formatted_date(&self, day: u32) -> Option<String> {
        self.date_for_day_number(day).map(long_date)
    }

    pub fn previous_day(&self, day: u32) -> Option<u32> {
        (day > 1 && day <= self.total_days()).then(|| day - 1)
    }

    pub fn next_day(&self, day: u32) -> Option<u32> {
        (day >= 1 && day < self.total_days()).then(|| day + 1)
    }

    pub fn weeks_view(&self) -> Vec<Week> {
        self.entries
            .chunks(DAYS_PER_WEEK)
            .enumerate()
            .map(|(idx, chunk)| Week {
                week_number: idx as u32 + 1,
                days: chunk
                    .iter()
                    .map(|entry| {
                        let date = self.start_date + Duration::days(i64::from(entry.day) - 1);
                        WeekDay {
                            day_number: entry.day,
                            date,
                            reading: entry.reading.clone(),
                            day_label: weekday_name(date),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn today_day_number(&self, clock: &Clock) -> u32 {
        self.day_number_for_date(clock.today())
    }

    pub fn today_date_key(&self, clock: &Clock) -> String {
        date_key(clock.today())
    }
}

pub fn parse_plan(json: &str, start_override: Option<NaiveDate>) -> Result<PlanIndex, PlanError> {
    match serde_json::from_str::<PlanFile>(json)? {
        PlanFile::Canonical { start_date, days } => {
            let start = match start_override {
                Some(start) => start,
                None => parse_date_key(&start_date).ok_or(PlanError::InvalidDateKey(start_date))?,
            };
            PlanIndex::new(start, days)
        }
        PlanFile::DayList(days) => {
            let start = start_override.ok_or(PlanError::MissingStartDate)?;
            PlanIndex::new(start, days)
        }
        PlanFile::DateKeyed(map) => {
            if start_override.is_some() {
                debug!("ignoring start date override for date-keyed schedule");
            }
            PlanIndex::from_date_keyed(map)
        }
    }
}

pub async fn load_plan(path: Option<&Path>, start_override: Option<NaiveDate>) -> Result<PlanIndex, PlanError> {
    let plan = match path {
        Some(path) => {
            let json = fs::read_to_string(path).await?;
            parse_plan(&json, start_override)?
        }
        None => parse_plan(BUNDLED_PLAN, start_override)?,
    };

    info!(
        "loaded {} day plan running {} to {}",
        plan.total_days(),
        plan.start_date(),
        plan.end_date()
    );
    Ok(plan)
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()?;
    (date_key(date) == key).then_some(date)
}

fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
