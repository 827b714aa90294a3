use crate::models::{CalendarDay, CalendarMonth, DayStatus, ProgressRecord};
use crate::plan::{PlanIndex, date_key};
use chrono::{Datelike, Duration, NaiveDate};

pub fn build_calendar(plan: &PlanIndex, record: &ProgressRecord, today: NaiveDate) -> Vec<CalendarMonth> {
    let mut months = Vec::new();
    let mut first = month_start(plan.start_date());
    let last = month_start(plan.end_date());

    while first <= last {
        months.push(build_month(plan, record, today, first));
        first = next_month(first);
    }

    months
}

fn build_month(plan: &PlanIndex, record: &ProgressRecord, today: NaiveDate, first: NaiveDate) -> CalendarMonth {
    let mut days = Vec::with_capacity(31);
    let mut date = first;
    while date.month() == first.month() {
        let key = date_key(date);
        let day_number = plan.day_number_for_date_key(&key);
        let status = match day_number {
            None => DayStatus::Outside,
            Some(_) if record.is_done(&key) => DayStatus::Completed,
            Some(_) if date == today => DayStatus::Today,
            Some(_) => DayStatus::Pending,
        };
        days.push(CalendarDay {
            date_key: key,
            day_of_month: date.day(),
            status,
            day_number,
        });
        date += Duration::days(1);
    }

    CalendarMonth {
        label: first.format("%B %Y").to_string(),
        year: first.year(),
        month: first.month(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn next_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
}
