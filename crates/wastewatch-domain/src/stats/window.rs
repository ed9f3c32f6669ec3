use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::badge::Timeframe;

/// Half-open `[start, end)` range; `start = None` means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn all_time(now: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: far_end(now),
        }
    }

    /// Window for a timeframe, anchored on the local calendar.
    ///
    /// Daily starts at local midnight, weekly on local Monday midnight,
    /// monthly on the first of the local month.
    pub fn for_timeframe(timeframe: Timeframe, now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let today = local_date(now, offset);
        let start_date = match timeframe {
            Timeframe::AllTime => return Self::all_time(now),
            Timeframe::Daily => today,
            Timeframe::Weekly => {
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
            Timeframe::Monthly => today - Duration::days(i64::from(today.day0())),
        };

        Self {
            start: Some(local_midnight_utc(start_date, offset)),
            end: far_end(now),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| at >= s) && at < self.end
    }

    pub fn is_all_time(&self) -> bool {
        self.start.is_none()
    }
}

/// Calendar date at `now` in the given offset
pub fn local_date(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// UTC instant of the next local midnight after `now`
pub fn next_local_midnight(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    local_midnight_utc(local_date(now, offset) + Duration::days(1), offset)
}

fn local_midnight_utc(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local: NaiveDateTime = date.and_time(NaiveTime::MIN);
    (local - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

// Windows close one second past `now` so rows stamped at `now` are included.
fn far_end(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::seconds(1)
}
