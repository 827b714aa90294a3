use crate::clock::Clock;
use crate::errors::ConfigError;
use crate::plan::parse_date_key;
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_POLL_SECS: u64 = 2;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub plan_path: Option<PathBuf>,
    pub plan_start: Option<NaiveDate>,
    pub countdown_target: Option<DateTime<FixedOffset>>,
    pub today: Option<NaiveDate>,
    pub storage_poll: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = var("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let poll_secs = match var("APP_STORAGE_POLL_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "APP_STORAGE_POLL_SECS",
                    value,
                })?,
            None => DEFAULT_POLL_SECS,
        };

        Ok(Self {
            port,
            data_dir,
            plan_path: var("APP_PLAN_PATH").map(PathBuf::from),
            plan_start: date_var("APP_PLAN_START", var("APP_PLAN_START"))?,
            countdown_target: var("APP_COUNTDOWN_TARGET")
                .map(|value| {
                    DateTime::parse_from_rfc3339(value.trim()).map_err(|_| ConfigError::InvalidTimestamp {
                        name: "APP_COUNTDOWN_TARGET",
                        value,
                    })
                })
                .transpose()?,
            today: date_var("APP_TODAY", var("APP_TODAY"))?,
            storage_poll: (poll_secs > 0).then(|| Duration::from_secs(poll_secs)),
        })
    }

    pub fn clock(&self) -> Clock {
        match self.today {
            Some(date) => Clock::Fixed(date),
            None => Clock::System,
        }
    }
}

fn date_var(name: &'static str, value: Option<String>) -> Result<Option<NaiveDate>, ConfigError> {
    value
        .map(|value| parse_date_key(value.trim()).ok_or(ConfigError::InvalidDate { name, value }))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.plan_path.is_none());
        assert!(config.countdown_target.is_none());
        assert_eq!(config.storage_poll, Some(Duration::from_secs(2)));
        assert!(matches!(config.clock(), Clock::System));
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PORT", "9000"),
            ("APP_DATA_PATH", "/tmp/progress"),
            ("APP_PLAN_START", "2026-01-01"),
            ("APP_COUNTDOWN_TARGET", "2025-10-19T00:00:00-04:00"),
            ("APP_TODAY", "2025-07-07"),
            ("APP_STORAGE_POLL_SECS", "0"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/progress"));
        assert_eq!(config.plan_start, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(config.countdown_target.unwrap().to_rfc3339(), "2025-10-19T00:00:00-04:00");
        assert_eq!(config.storage_poll, None);
        assert_eq!(config.clock().today(), NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
    }

    #[test]
    fn bad_port_falls_back_but_bad_dates_fail() {
        assert_eq!(config(&[("PORT", "nope")]).unwrap().port, 8080);
        assert!(matches!(
            config(&[("APP_TODAY", "07/07/2025")]),
            Err(ConfigError::InvalidDate { name: "APP_TODAY", .. })
        ));
        assert!(matches!(
            config(&[("APP_COUNTDOWN_TARGET", "tomorrow")]),
            Err(ConfigError::InvalidTimestamp { .. })
        ));
    }
}
