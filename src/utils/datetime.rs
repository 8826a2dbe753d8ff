//! Date and time utility functions
//!
//! Two jobs live here: building the ISO-8601 timestamp of a scheduled action
//! from the date, time and timezone the operator picked, and rendering server
//! timestamps and costs for tables ("today at 14:30", "$1,234.56").

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// Date format accepted by the schedule dialog
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time formats accepted by the schedule dialog, tried in order
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleTimeError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),

    #[error("invalid time '{0}', expected HH:MM")]
    Time(String),

    #[error("unknown timezone '{0}'")]
    Timezone(String),

    #[error("local time {0} does not exist or is ambiguous in that timezone")]
    Nonexistent(String),
}

/// Largest UTC offset in use, in hours.
const MAX_OFFSET_HOURS: u32 = 14;

/// A timezone choice in the schedule dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneChoice {
    Local,
    Fixed(FixedOffset),
    /// IANA zone; the offset depends on the date being scheduled.
    Named(Tz),
}

/// Parse a timezone picker value: `UTC`, `Z`, `Local`, `Europe/Madrid`,
/// `+02:00`, `-0530`, `UTC+1`.
pub fn parse_timezone(raw: &str) -> Result<ZoneChoice, ScheduleTimeError> {
    let value = raw.trim();
    let upper = value.to_ascii_uppercase();
    let err = || ScheduleTimeError::Timezone(raw.to_string());

    match upper.as_str() {
        "" | "LOCAL" => return Ok(ZoneChoice::Local),
        "UTC" | "Z" | "GMT" => return Ok(ZoneChoice::Fixed(FixedOffset::east_opt(0).ok_or_else(err)?)),
        _ => {}
    }

    if let Ok(tz) = value.parse::<Tz>() {
        return Ok(ZoneChoice::Named(tz));
    }

    let offset = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);

    let (sign, rest) = match offset.chars().next() {
        Some('+') => (1, &offset[1..]),
        Some('-') => (-1, &offset[1..]),
        _ => return Err(err()),
    };

    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return Err(err());
    }
    // ASCII only from here on, so byte offsets are char boundaries.
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let is_number = |s: &str| !s.is_empty() && s.len() <= 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !is_number(hours) || !is_number(minutes) {
        return Err(err());
    }
    let hours: u32 = hours.parse().map_err(|_| err())?;
    let minutes: u32 = minutes.parse().map_err(|_| err())?;
    if hours > MAX_OFFSET_HOURS || minutes > 59 {
        return Err(err());
    }

    let seconds = sign * (hours * 3600 + minutes * 60) as i32;
    FixedOffset::east_opt(seconds).map(ZoneChoice::Fixed).ok_or_else(err)
}

fn parse_time(raw: &str) -> Result<NaiveTime, ScheduleTimeError> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| ScheduleTimeError::Time(raw.to_string()))
}

/// Combine a picked date, time and timezone into a timestamp with offset.
pub fn compose_schedule_time(date: &str, time: &str, timezone: &str) -> Result<DateTime<FixedOffset>, ScheduleTimeError> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| ScheduleTimeError::Date(date.to_string()))?;
    let time = parse_time(time)?;
    let naive = NaiveDateTime::new(date, time);

    let resolved = match parse_timezone(timezone)? {
        ZoneChoice::Local => Local.from_local_datetime(&naive).single().map(|dt| dt.fixed_offset()),
        ZoneChoice::Fixed(offset) => offset.from_local_datetime(&naive).single(),
        ZoneChoice::Named(tz) => tz.from_local_datetime(&naive).single().map(|dt| dt.fixed_offset()),
    };
    resolved.ok_or_else(|| ScheduleTimeError::Nonexistent(naive.to_string()))
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Format current local date to YYYY-MM-DD string
pub fn format_today() -> String {
    format_ymd(Local::now().date_naive())
}

/// Human readable date relative to `today`: "yesterday", "today", "next Friday", "Jan 15".
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days_diff = (date - today).num_days();

    match days_diff {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if diff > 1 && diff <= 7 => format!("next {}", weekday_name(date.weekday())),
        diff if (-7..-1).contains(&diff) => format!("last {}", weekday_name(date.weekday())),
        diff if (-30..-7).contains(&diff) => format!("{} days ago", -diff),
        _ => {
            if date.year() == today.year() {
                date.format("%b %d").to_string()
            } else {
                date.format("%b %d, %Y").to_string()
            }
        }
    }
}

/// Server timestamp shown in the operator's local time.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => {
            let local = ts.with_timezone(&Local);
            let date = format_relative_date(local.date_naive(), Local::now().date_naive());
            format!("{} at {}", date, local.format("%H:%M"))
        }
        None => "never".to_string(),
    }
}

/// Dollar amount with thousands separators: `1234.5` -> `$1,234.50`.
pub fn format_cost(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Get a human-readable weekday name
fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
