//! Weekly job scheduling
//!
//! Each job holds its next trigger instant in local wall-clock terms.
//! The daemon loop polls `is_due` and calls `advance` after running the
//! callback, which moves the trigger exactly one week forward, so a job
//! never fires twice for the same instant.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};

/// A weekly (weekday, time-of-day) trigger
#[derive(Debug)]
pub struct WeeklyJob {
    name: &'static str,
    next_run: NaiveDateTime,
}

impl WeeklyJob {
    /// Create a job whose first trigger is the next occurrence of
    /// `weekday` at `at`, strictly after `now`
    pub fn new(name: &'static str, weekday: Weekday, at: NaiveTime, now: NaiveDateTime) -> Self {
        Self {
            name,
            next_run: next_occurrence(now, weekday, at),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn next_run(&self) -> NaiveDateTime {
        self.next_run
    }

    /// Whether the trigger instant has been crossed
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        now >= self.next_run
    }

    /// Move the trigger exactly one week forward. Called once per firing.
    pub fn advance(&mut self) {
        self.next_run += Duration::weeks(1);
    }
}

/// Next `weekday` at `at` strictly after `now`
fn next_occurrence(now: NaiveDateTime, weekday: Weekday, at: NaiveTime) -> NaiveDateTime {
    let days_ahead = (weekday.num_days_from_monday() + 7 - now.weekday().num_days_from_monday()) % 7;
    let mut candidate = (now.date() + Duration::days(i64::from(days_ahead))).and_time(at);
    if candidate <= now {
        candidate += Duration::weeks(1);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    // 2024-01-01 is a Monday
    fn monday_at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn at(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn test_trigger_later_same_day() {
        let now = monday_at(1, 30);
        let job = WeeklyJob::new("cleanup", Weekday::Mon, at(3), now);

        assert_eq!(job.next_run(), monday_at(3, 0));
        assert!(job.next_run() > now);
        assert!(!job.is_due(now));
        assert!(job.is_due(monday_at(3, 0)));
    }

    #[test]
    fn test_trigger_at_exact_instant_moves_to_next_week() {
        let now = monday_at(3, 0);
        let job = WeeklyJob::new("cleanup", Weekday::Mon, at(3), now);

        assert!(job.next_run() > now);
        assert_eq!(job.next_run(), monday_at(3, 0) + Duration::weeks(1));
    }

    #[test]
    fn test_trigger_on_earlier_weekday_wraps_to_next_week() {
        // Wednesday noon, target Monday 04:00
        let now = NaiveDate::from_ymd_opt(2024, 1, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let job = WeeklyJob::new("restart", Weekday::Mon, at(4), now);

        let expected = NaiveDate::from_ymd_opt(2024, 1, 8)
            .unwrap()
            .and_hms_opt(4, 0, 0)
            .unwrap();
        assert_eq!(job.next_run(), expected);
    }

    #[test]
    fn test_advance_moves_exactly_one_week() {
        let now = monday_at(1, 0);
        let mut job = WeeklyJob::new("cleanup", Weekday::Mon, at(3), now);

        let first = job.next_run();
        job.advance();

        assert_eq!(job.next_run() - first, Duration::weeks(1));
        assert!(job.next_run() > first);
    }

    #[test]
    fn test_next_run_stays_in_future_across_many_cycles() {
        let now = monday_at(2, 59);
        let mut job = WeeklyJob::new("cleanup", Weekday::Mon, at(3), now);

        for _ in 0..10 {
            let fire_at = job.next_run();
            assert!(job.is_due(fire_at));
            job.advance();
            assert!(job.next_run() > fire_at);
        }
    }
}
