//! Date buckets used by the event list filters

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Duration, Months, TimeZone, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateBucket {
    #[default]
    Any,
    Upcoming,
    Past,
    Today,
    ThisWeek,
    ThisMonth,
}

impl DateBucket {
    pub const ALL: [DateBucket; 6] = [
        DateBucket::Any,
        DateBucket::Upcoming,
        DateBucket::Past,
        DateBucket::Today,
        DateBucket::ThisWeek,
        DateBucket::ThisMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateBucket::Any => "any",
            DateBucket::Upcoming => "upcoming",
            DateBucket::Past => "past",
            DateBucket::Today => "today",
            DateBucket::ThisWeek => "this-week",
            DateBucket::ThisMonth => "this-month",
        }
    }

    /// Whether `instant` falls in this bucket as seen at `now`.
    ///
    /// "Today" is the calendar day of `now` in `now`'s own time zone, so the
    /// caller decides which zone counts as local.
    pub fn matches<Tz: TimeZone>(&self, instant: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        let now_utc = now.with_timezone(&Utc);
        match self {
            DateBucket::Any => true,
            DateBucket::Upcoming => instant >= now_utc,
            DateBucket::Past => instant < now_utc,
            DateBucket::Today => instant.with_timezone(&now.timezone()).date_naive() == now.date_naive(),
            DateBucket::ThisWeek => instant >= now_utc && instant <= now_utc + Duration::days(7),
            DateBucket::ThisMonth => match now.clone().checked_add_months(Months::new(1)) {
                Some(end) => instant >= now_utc && instant <= end.with_timezone(&Utc),
                None => instant >= now_utc,
            },
        }
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "any" => Ok(DateBucket::Any),
            "upcoming" => Ok(DateBucket::Upcoming),
            "past" => Ok(DateBucket::Past),
            "today" => Ok(DateBucket::Today),
            "week" | "this-week" | "this_week" => Ok(DateBucket::ThisWeek),
            "month" | "this-month" | "this_month" => Ok(DateBucket::ThisMonth),
            other => Err(format!("unknown date filter: {}", other)),
        }
    }
}
