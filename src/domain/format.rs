//! Display conversions for backend scalars.
//!
//! The backend stores dates as epoch seconds and money as loosely formatted
//! strings. Everything here is total: unusable input turns into `None` or
//! `0.0`, never an error.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use serde_json::Value;

/// Brisbane (UTC+10, no daylight saving), where the field teams operate.
pub const DEFAULT_REFERENCE_OFFSET_MINUTES: i32 = 600;

const INTERMEDIATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
const DISPLAY_FORMAT: &str = "%-d %B %Y";

/// Builds the reference offset, falling back to UTC for out-of-range input.
pub fn reference_offset(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Reads epoch seconds from a number or a numeric string. Zero means unset.
pub fn epoch_seconds(value: &Value) -> Option<i64> {
    let seconds = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }?;
    (seconds != 0).then_some(seconds)
}

/// Formats epoch seconds as `DD-MM-YYYY HH:MM:SS` in the reference offset.
pub fn intermediate_timestamp(seconds: i64, offset: FixedOffset) -> Option<String> {
    let moment = DateTime::from_timestamp(seconds, 0)?.with_timezone(&offset);
    Some(moment.format(INTERMEDIATE_FORMAT).to_string())
}

/// Turns a `DD-MM-YYYY HH:MM:SS` string into `D MonthName YYYY`.
pub fn display_date(intermediate: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(intermediate.trim(), INTERMEDIATE_FORMAT).ok()?;
    Some(parsed.format(DISPLAY_FORMAT).to_string())
}

/// Full epoch-seconds to display-date conversion.
pub fn timestamp_display(value: &Value, offset: FixedOffset) -> Option<String> {
    let seconds = epoch_seconds(value)?;
    let intermediate = intermediate_timestamp(seconds, offset)?;
    display_date(&intermediate)
}

/// Parses a number or a formatted amount such as `"$1,200.50"`.
pub fn parse_amount(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| !matches!(c, '$' | ',' | ' '))
                .collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Coerces a money-like value to a finite number, `0.0` when unusable.
pub fn currency_value(value: &Value) -> f64 {
    parse_amount(value).unwrap_or(0.0)
}

/// Which end of a calendar day a date filter resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayBound {
    Start,
    End,
}

fn parse_day(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .ok()
}

/// Resolves a date string to epoch seconds at the start or end of that day.
pub fn day_bound(input: &str, bound: DayBound, offset: FixedOffset) -> Option<i64> {
    let day = parse_day(input)?;
    let time = match bound {
        DayBound::Start => day.and_hms_opt(0, 0, 0)?,
        DayBound::End => day.and_hms_opt(23, 59, 59)?,
    };
    Some(time.and_local_timezone(offset).single()?.timestamp())
}
