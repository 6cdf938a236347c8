//! Service-day time handling.
//!
//! Timetables give times as minutes past midnight of the service day, written
//! "HH:MM" with hours up to 47 for trips running past midnight. The router
//! works in those raw minutes; [`RailTime`] turns them back into a date-aware
//! clock time for riders.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing or building an invalid time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Latest hour accepted by [`parse_day_minutes`].
const MAX_SERVICE_HOUR: u32 = 47;

/// A date-aware clock time.
///
/// Two times at "01:30" might be on different dates, so the date is kept
/// alongside the time of day and takes part in ordering.
///
/// # Examples
///
/// ```
/// use profile_router::domain::RailTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let time = RailTime::from_day_minutes(date, 14 * 60 + 30).unwrap();
/// assert_eq!(time.to_string(), "14:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RailTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl RailTime {
    /// Create a new RailTime from date and time components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Build the time `minutes` past midnight of the service day `date`.
    ///
    /// Negative offsets land on the previous day, offsets of 24 hours or more
    /// on the following days.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_router::domain::RailTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// let late = RailTime::from_day_minutes(date, 25 * 60 + 10).unwrap();
    /// assert_eq!(late.to_string(), "01:10");
    /// assert_eq!(late.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    ///
    /// let early = RailTime::from_day_minutes(date, -30).unwrap();
    /// assert_eq!(early.to_string(), "23:30");
    /// assert_eq!(early.date(), NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
    /// ```
    pub fn from_day_minutes(date: NaiveDate, minutes: i32) -> Result<Self, TimeError> {
        Self::new(date, NaiveTime::MIN)
            .checked_add(Duration::minutes(i64::from(minutes)))
            .ok_or_else(|| TimeError::new("date overflow"))
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the time component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Converts to a NaiveDateTime.
    pub fn to_datetime(&self) -> chrono::NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Add a duration to this time, advancing the date past midnight.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let dt = self.to_datetime().checked_add_signed(duration)?;
        Some(Self {
            date: dt.date(),
            time: dt.time(),
        })
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.to_datetime()
            .signed_duration_since(other.to_datetime())
    }
}

impl Ord for RailTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_datetime().cmp(&other.to_datetime())
    }
}

impl PartialOrd for RailTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for RailTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RailTime({} {:02}:{:02})",
            self.date,
            self.hour(),
            self.minute()
        )
    }
}

impl fmt::Display for RailTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse a service-day time "HH:MM" into minutes past midnight.
///
/// Hours run up to 47 so that trips continuing past midnight keep
/// increasing times.
///
/// # Examples
///
/// ```
/// use profile_router::domain::parse_day_minutes;
///
/// assert_eq!(parse_day_minutes("08:05").unwrap(), 485);
/// assert_eq!(parse_day_minutes("25:10").unwrap(), 1510);
/// assert!(parse_day_minutes("48:00").is_err());
/// ```
pub fn parse_day_minutes(s: &str) -> Result<i32, TimeError> {
    let (hour, minute) = split_hhmm(s)?;
    if hour > MAX_SERVICE_HOUR {
        return Err(TimeError::new("hour must be 0-47"));
    }
    Ok((hour * 60 + minute) as i32)
}

/// Split "HH:MM" into hour and minute, checking only the minute range.
fn split_hhmm(s: &str) -> Result<(u32, u32), TimeError> {
    // Must be exactly 5 characters: HH:MM
    if s.len() != 5 {
        return Err(TimeError::new("expected HH:MM format"));
    }

    let bytes = s.as_bytes();

    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    Ok((hour, minute))
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// "HH:MM" on the service day `d`.
    fn at(d: NaiveDate, s: &str) -> RailTime {
        RailTime::from_day_minutes(d, parse_day_minutes(s).unwrap()).unwrap()
    }

    #[test]
    fn components() {
        let d = date(2024, 3, 15);

        let t = at(d, "00:00");
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 0);

        let t = at(d, "23:59");
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);
        assert_eq!(t.date(), d);
    }

    #[test]
    fn day_minutes_invalid_format() {
        assert!(parse_day_minutes("").is_err());
        assert!(parse_day_minutes("14-30").is_err());
        assert!(parse_day_minutes("1a:30").is_err());
        assert!(parse_day_minutes("14:30:00").is_err());
        assert!(parse_day_minutes("12:60").is_err());
    }

    #[test]
    fn day_minutes() {
        assert_eq!(parse_day_minutes("00:00").unwrap(), 0);
        assert_eq!(parse_day_minutes("10:20").unwrap(), 620);
        assert_eq!(parse_day_minutes("47:59").unwrap(), 47 * 60 + 59);
        assert_eq!(
            parse_day_minutes("48:00"),
            Err(TimeError::new("hour must be 0-47"))
        );
        assert!(parse_day_minutes("10:75").is_err());
        assert!(parse_day_minutes("1020").is_err());
    }

    #[test]
    fn from_day_minutes_same_day() {
        let d = date(2024, 3, 15);
        let t = RailTime::from_day_minutes(d, 620).unwrap();
        assert_eq!(t.to_string(), "10:20");
        assert_eq!(t.date(), d);
        assert_eq!(t, RailTime::new(d, NaiveTime::from_hms_opt(10, 20, 0).unwrap()));
    }

    #[test]
    fn from_day_minutes_rolls_over() {
        let d = date(2024, 12, 31);
        let t = RailTime::from_day_minutes(d, 24 * 60 + 5).unwrap();
        assert_eq!(t.date(), date(2025, 1, 1));
        assert_eq!(t.to_string(), "00:05");

        let t = RailTime::from_day_minutes(d, -240).unwrap();
        assert_eq!(t.date(), date(2024, 12, 30));
        assert_eq!(t.to_string(), "20:00");
    }

    #[test]
    fn display_format() {
        let d = date(2024, 3, 15);
        assert_eq!(at(d, "09:05").to_string(), "09:05");
        assert_eq!(
            format!("{:?}", at(d, "09:05")),
            "RailTime(2024-03-15 09:05)"
        );
    }

    #[test]
    fn ordering() {
        let d1 = date(2024, 3, 15);
        let d2 = date(2024, 3, 16);

        let late = at(d1, "23:00");
        let early_next = at(d2, "01:00");
        assert!(late < early_next);
    }

    #[test]
    fn add_duration_crosses_midnight() {
        let d = date(2024, 3, 15);
        let t = at(d, "23:30");
        let later = t.checked_add(Duration::hours(1)).unwrap();
        assert_eq!(later.to_string(), "00:30");
        assert_eq!(later.date(), date(2024, 3, 16));
        assert_eq!(later, at(d, "24:30"));
    }

    #[test]
    fn duration_between() {
        let d = date(2024, 3, 15);
        let a = at(d, "10:00");
        let b = at(d, "11:30");
        assert_eq!(b.signed_duration_since(a), Duration::minutes(90));
        assert_eq!(a.signed_duration_since(b), Duration::minutes(-90));
    }
}
