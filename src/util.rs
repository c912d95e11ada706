use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc};

use crate::constants::{
    DAY_NAMES, DAY_TOKENS, PRESET_DAY_CODES, RANGE_SEPARATOR, TOKEN_PRECEDENCE,
};
use crate::types::{self, BoardError, DayNum, TimeType};

/// Parses the days of the week from a day code string.
///
/// The preset codes `MWF`, `TuTh`, and `MW` are matched exactly. Anything else is treated
/// as a custom combination of the tokens `M`, `Tu`, `W`, `Th`, `F`, `Sa`, and `Su`. Any
/// part of the string that isn't a known token is ignored.
///
/// # Parameters
/// - `day_code_str`: The day code string.
///
/// # Returns
/// The weekday numbers (where `0` is Sunday), sorted and without duplicates.
///
/// # Example
/// An input of `FTu` would return `[2, 5]`.
pub fn parse_day_code(day_code_str: &str) -> Vec<DayNum> {
    if let Some((_, days)) = PRESET_DAY_CODES
        .iter()
        .find(|(code, _)| *code == day_code_str)
    {
        return days.to_vec();
    }

    let mut days = scan_tokens(day_code_str)
        .into_iter()
        .map(|(_, day)| day)
        .collect::<Vec<_>>();
    days.sort_unstable();
    days.dedup();
    days
}

/// Gets the weekday tokens in a day code string, in the order that they are matched.
///
/// # Parameters
/// - `day_code_str`: The day code string.
///
/// # Returns
/// The tokens. For example, `TuTh` gives `["Th", "Tu"]`.
pub fn day_tokens(day_code_str: &str) -> Vec<&'static str> {
    scan_tokens(day_code_str)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Scans the tokens in precedence order, removing each token that is found from the
/// remaining string.
fn scan_tokens(day_code_str: &str) -> Vec<(&'static str, DayNum)> {
    let mut remaining = day_code_str.to_owned();
    let mut found = vec![];
    for (token, day) in TOKEN_PRECEDENCE {
        if remaining.contains(token) {
            found.push((token, day));
            remaining = remaining.replacen(token, "", 1);
        }
    }

    found
}

/// Gets the token for a weekday number.
///
/// # Parameters
/// - `day`: The weekday, where `0` is Sunday.
///
/// # Returns
/// The token (e.g. `Tu`), or `None` if the number is not a weekday.
pub fn day_token(day: DayNum) -> Option<&'static str> {
    DAY_TOKENS.get(usize::from(day)).copied()
}

/// Gets the weekday number for a token.
///
/// # Parameters
/// - `token`: A single token, like `Th`.
///
/// # Returns
/// The weekday number, or `None` if the token isn't known.
pub fn token_to_day(token: &str) -> Option<DayNum> {
    DAY_TOKENS
        .iter()
        .position(|t| *t == token)
        .map(|idx| idx as DayNum)
}

/// Gets the weekday number of a timestamp, where `0` is Sunday.
#[inline]
pub fn weekday_num(now: &NaiveDateTime) -> DayNum {
    now.weekday().num_days_from_sunday() as DayNum
}

/// Gets the number of minutes since midnight of a timestamp.
#[inline]
pub fn minute_of_day(now: &NaiveDateTime) -> TimeType {
    now.hour() * 60 + now.minute()
}

/// Splits a `HH:MM` string into its hour and minute, checking that both are in range.
fn parse_hour_minute(time_str: &str) -> types::Result<(TimeType, TimeType)> {
    let parts = time_str.trim().split(':').collect::<Vec<_>>();
    if parts.len() != 2 {
        return Err(BoardError::FormatError(time_str.to_owned()));
    }

    let hour = parts[0]
        .trim()
        .parse::<TimeType>()
        .map_err(|_| BoardError::FormatError(time_str.to_owned()))?;
    let minute = parts[1]
        .trim()
        .parse::<TimeType>()
        .map_err(|_| BoardError::FormatError(time_str.to_owned()))?;

    if hour >= 24 || minute >= 60 {
        return Err(BoardError::FormatError(time_str.to_owned()));
    }

    Ok((hour, minute))
}

/// Converts a `HH:MM` string to the number of minutes since midnight.
///
/// # Parameters
/// - `time_str`: The time string, e.g. `09:05`.
///
/// # Returns
/// The number of minutes (e.g. `545`), or a `FormatError` if the string isn't a time.
pub fn to_minutes(time_str: &str) -> types::Result<TimeType> {
    let (hour, minute) = parse_hour_minute(time_str)?;
    Ok(hour * 60 + minute)
}

/// Normalizes a 24-hour time string so that both the hour and minute have two digits.
/// Already-normalized strings are returned as-is.
///
/// # Parameters
/// - `time_str`: The time string, e.g. `9:5` or `09:05`.
///
/// # Returns
/// The normalized string, e.g. `09:05`.
pub fn to_24_hour(time_str: &str) -> types::Result<String> {
    let (hour, minute) = parse_hour_minute(time_str)?;
    Ok(format!("{hour:02}:{minute:02}"))
}

/// Converts minutes since midnight to a 12-hour time string.
///
/// # Parameters
/// - `minutes`: The number of minutes since midnight.
///
/// # Returns
/// The time, like `1:00 PM`. Midnight is `12:00 AM` and noon is `12:00 PM`.
pub fn minutes_to_12_hour(minutes: TimeType) -> String {
    let hour = (minutes / 60) % 24;
    let minute = minutes % 60;
    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour_12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };

    format!("{hour_12}:{minute:02} {period}")
}

/// Converts a `HH:MM` string to a 12-hour time string.
///
/// # Parameters
/// - `time_str`: The 24-hour time, e.g. `13:00`.
///
/// # Returns
/// The 12-hour time, e.g. `1:00 PM`.
pub fn to_12_hour(time_str: &str) -> types::Result<String> {
    to_minutes(time_str).map(minutes_to_12_hour)
}

/// Splits a stored time range into its start and end. The separator must be an en-dash.
///
/// # Parameters
/// - `range`: The time range, e.g. `08:00–09:00`.
///
/// # Returns
/// The start and end strings, trimmed.
pub fn split_range(range: &str) -> types::Result<(&str, &str)> {
    let parts = range.split(RANGE_SEPARATOR).collect::<Vec<_>>();
    if parts.len() != 2 {
        return Err(BoardError::FormatError(range.to_owned()));
    }

    Ok((parts[0].trim(), parts[1].trim()))
}

/// Parses a stored time range into start and end minutes.
///
/// # Parameters
/// - `range`: The time range, e.g. `08:00–09:00`.
///
/// # Returns
/// The start and end, in minutes since midnight.
pub fn parse_range(range: &str) -> types::Result<(TimeType, TimeType)> {
    let (start, end) = split_range(range)?;
    Ok((to_minutes(start)?, to_minutes(end)?))
}

/// Builds the stored form of a time range from its two ends.
///
/// # Parameters
/// - `start`: The start time, e.g. `8:00`.
/// - `end`: The end time, e.g. `9:15`.
///
/// # Returns
/// The time range, e.g. `08:00–09:15`.
pub fn join_range(start: &str, end: &str) -> types::Result<String> {
    Ok(format!(
        "{}{RANGE_SEPARATOR}{}",
        to_24_hour(start)?,
        to_24_hour(end)?
    ))
}

/// Formats a stored time range for display.
///
/// # Parameters
/// - `range`: The time range, e.g. `08:00–13:30`.
///
/// # Returns
/// The formatted range, e.g. `8:00 AM - 1:30 PM`.
pub fn format_range(range: &str) -> types::Result<String> {
    let (start, end) = split_range(range)?;
    Ok(format!("{} - {}", to_12_hour(start)?, to_12_hour(end)?))
}

/// Formats a time for the digital clock.
///
/// # Parameters
/// - `time`: The time.
/// - `is_24_hour`: Whether to use the 24-hour format.
///
/// # Returns
/// Either `HH:MM:SS` or `HH:MM:SS AM` (the hour is always zero-padded).
pub fn format_clock(time: &NaiveTime, is_24_hour: bool) -> String {
    let minute = time.minute();
    let second = time.second();
    if is_24_hour {
        return format!("{:02}:{minute:02}:{second:02}", time.hour());
    }

    let (is_pm, hour_12) = time.hour12();
    let period = if is_pm { "PM" } else { "AM" };
    format!("{hour_12:02}:{minute:02}:{second:02} {period}")
}

/// Formats a date the long way, like `Friday, October 17, 2025`.
pub fn format_long_date(date: &NaiveDate) -> String {
    format!(
        "{}, {}",
        DAY_NAMES[date.weekday().num_days_from_sunday() as usize],
        date.format("%B %-d, %Y")
    )
}

/// Gets the current time as an ISO-8601 string with millisecond precision, which is the
/// format used for `createdAt`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

