use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("schedule is empty")]
    Empty,
    #[error("day {0} appears more than once")]
    DuplicateDay(u32),
    #[error("expected day {expected}, found day {found}")]
    MissingDay { expected: u32, found: u32 },
    #[error("invalid date key '{0}', expected YYYY-MM-DD")]
    InvalidDateKey(String),
    #[error("dates are not contiguous: {previous} is followed by {next}")]
    NonContiguousDates { previous: String, next: String },
    #[error("day-list schedules need a start date (set APP_PLAN_START)")]
    MissingStartDate,
    #[error("schedule is not valid JSON in any supported shape: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read schedule file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a date in YYYY-MM-DD form, got '{value}'")]
    InvalidDate { name: &'static str, value: String },
    #[error("{name} must be an RFC 3339 timestamp, got '{value}'")]
    InvalidTimestamp { name: &'static str, value: String },
    #[error("{name} must be a non-negative integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}
