use crate::clock::{Clock, local_midnight};
use crate::models::Countdown;
use crate::plan::PlanIndex;
use crate::schedule::ScheduledTask;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use tokio::sync::watch;

const TICK: std::time::Duration = std::time::Duration::from_secs(1);

impl Countdown {
    pub fn between<A: TimeZone, B: TimeZone>(now: &DateTime<A>, target: &DateTime<B>) -> Self {
        let remaining = target.with_timezone(&Utc) - now.with_timezone(&Utc);
        if remaining <= Duration::zero() {
            return Self::default();
        }

        let total = remaining.num_seconds();
        Self {
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
        }
    }
}

pub fn default_target(plan: &PlanIndex) -> DateTime<FixedOffset> {
    local_midnight(plan.end_date() + Duration::days(1)).fixed_offset()
}

#[derive(Debug)]
pub struct CountdownTimer {
    target: DateTime<FixedOffset>,
    latest: watch::Receiver<Countdown>,
    _task: ScheduledTask,
}

impl CountdownTimer {
    pub fn start(target: DateTime<FixedOffset>, clock: Clock) -> Self {
        let (tx, latest) = watch::channel(Countdown::between(&clock.now(), &target));
        let task = ScheduledTask::every(TICK, move || {
            let next = Countdown::between(&clock.now(), &target);
            tx.send_replace(next);
            async {}
        });

        Self {
            target,
            latest,
            _task: task,
        }
    }

    pub fn target(&self) -> DateTime<FixedOffset> {
        self.target
    }

    pub fn latest(&self) -> Countdown {
        *self.latest.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(text: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(text).unwrap()
    }

    #[test]
    fn splits_remaining_time_into_units() {
        let now = at("2025-10-17T21:56:56-04:00");
        let target = at("2025-10-19T00:00:00-04:00");
        assert_eq!(
            Countdown::between(&now, &target),
            Countdown {
                days: 1,
                hours: 2,
                minutes: 3,
                seconds: 4
            }
        );
    }

    #[test]
    fn compares_instants_across_offsets() {
        let now = at("2025-10-19T03:59:00+00:00");
        let target = at("2025-10-19T00:00:00-04:00");
        let left = Countdown::between(&now, &target);
        assert_eq!(left.minutes, 1);
        assert_eq!(left.days, 0);
    }

    #[test]
    fn past_targets_are_zero() {
        let now = at("2025-10-20T00:00:00-04:00");
        let target = at("2025-10-19T00:00:00-04:00");
        let left = Countdown::between(&now, &target);
        assert_eq!(left, Countdown::default());
        assert_eq!(Countdown::between(&target, &target), Countdown::default());
    }

    #[tokio::test]
    async fn timer_publishes_current_value() {
        let clock = Clock::Fixed(NaiveDate::from_ymd_opt(2025, 10, 17).unwrap());
        let target = (clock.now() + Duration::days(2)).fixed_offset();
        let timer = CountdownTimer::start(target, clock);
        assert_eq!(timer.target(), target);
        assert_eq!(timer.latest().days, 2);
        assert_eq!(timer.latest().hours, 0);
    }
}
