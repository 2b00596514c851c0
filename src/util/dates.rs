//! Date parsing, formatting, and the dashboard's quick range filters.
//!
//! Range math works on calendar dates in a caller-supplied time zone so the
//! browser can pass `Local` while tests pin a fixed offset.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Quick filters on the teacher dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Today,
    ThisWeek,
    Month,
}

impl DateFilter {
    pub const ALL: [DateFilter; 3] = [DateFilter::Today, DateFilter::ThisWeek, DateFilter::Month];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DateFilter::Today => "Today",
            DateFilter::ThisWeek => "This Week",
            DateFilter::Month => "Month",
        }
    }

    /// First and last calendar day covered by the filter. Weeks start on Monday.
    #[must_use]
    pub fn days(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            DateFilter::Today => (today, today),
            DateFilter::ThisWeek => {
                let offset = u64::from(today.weekday().num_days_from_monday());
                let monday = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
                let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(today);
                (monday, sunday)
            }
            DateFilter::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                (first, last)
            }
        }
    }

    /// The filter's span as UTC instants, from local midnight to local 23:59:59.999.
    #[must_use]
    pub fn range<Tz: TimeZone>(self, tz: &Tz, today: NaiveDate) -> DateRange {
        let (first, last) = self.days(today);
        DateRange::from_days(tz, first, last)
    }
}

impl std::str::FromStr for DateFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DateFilter::Today),
            "week" | "thisweek" | "this-week" => Ok(DateFilter::ThisWeek),
            "month" => Ok(DateFilter::Month),
            other => Err(format!("unknown date filter: {other}")),
        }
    }
}

/// Inclusive span of instants used for `GET /assignments/range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// From the start of `first` to the last millisecond of `last`, in `tz`.
    #[must_use]
    pub fn from_days<Tz: TimeZone>(tz: &Tz, first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: local_instant(tz, first.and_time(NaiveTime::MIN)),
            end: local_instant(tz, last.and_time(end_of_day())),
        }
    }

    /// Everything up to the end of `today`: the teacher dashboard's opening view.
    #[must_use]
    pub fn through_end_of<Tz: TimeZone>(tz: &Tz, today: NaiveDate) -> Self {
        Self {
            start: DateTime::UNIX_EPOCH,
            end: local_instant(tz, today.and_time(end_of_day())),
        }
    }

    #[must_use]
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant <= self.end
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| Utc.from_utc_datetime(&naive), |dt| dt.with_timezone(&Utc))
}

// =============================================================================
// FORMATTING
// =============================================================================

/// `YYYY-MM-DD`, the form used in tables and `<input type="date">`.
#[must_use]
pub fn format_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format("%Y-%m-%d").to_string()
}

/// Wall-clock time like `3:07:09 PM`.
#[must_use]
pub fn format_clock<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format("%-I:%M:%S %p").to_string()
}

/// Parse the value of a date input. Empty or malformed input yields `None`.
#[must_use]
pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC), or
/// a bare date (midnight UTC).
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    parse_date_input(raw).map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Serde adapter for backend timestamps in any of the forms [`parse_datetime`] accepts.
pub mod flexible {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp: {raw}")))
    }
}
