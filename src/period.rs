//! Requested date range and the free-form date expressions resolving into it.

use std::fmt::{Display, Formatter};

use chrono::{
    DateTime,
    Days,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    SecondsFormat,
    TimeDelta,
    TimeZone,
    Utc,
};
use chrono_tz::Tz;

use crate::error::ConfigError;

/// Closed date range of a run.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Constructor)]
pub struct Period {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Period {
    /// Resolve the date expressions relative to `now` in the time zone.
    pub fn resolve(
        from: &str,
        to: &str,
        time_zone: Tz,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        let now = now.with_timezone(&time_zone);
        let from = parse_date_expression(from, now)?.with_timezone(&Utc);
        let to = parse_date_expression(to, now)?.with_timezone(&Utc);
        if from > to {
            return Err(ConfigError::InvertedPeriod { from, to });
        }
        Ok(Self { from, to })
    }

    /// `period_from` and `period_to` query values.
    pub fn to_query(self) -> (String, String) {
        (
            self.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.to.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (from, to) = self.to_query();
        write!(f, "{from}..{to}")
    }
}

/// Parse an absolute or a relative date expression.
///
/// Supported forms:
///
/// - RFC 3339 timestamps;
/// - `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` and `YYYY-MM-DD HH:MM:SS` in the local time zone;
/// - `now`, `midnight`, `noon`;
/// - `today`, `yesterday` and `tomorrow`, optionally followed by `midnight` or `noon`;
/// - `<duration> ago` and `in <duration>`, for example, `2days ago` or `in 6h`.
pub fn parse_date_expression(
    expression: &str,
    now: DateTime<Tz>,
) -> Result<DateTime<Tz>, ConfigError> {
    let invalid = || ConfigError::InvalidDate(expression.to_string());
    let expression = expression.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(expression) {
        return Ok(timestamp.with_timezone(&now.timezone()));
    }
    if let Some(local) = parse_naive(expression) {
        return from_local(now.timezone(), local);
    }

    let normalized = expression.to_lowercase();
    if let Some(duration) = normalized.strip_suffix(" ago") {
        return Ok(now - parse_duration(duration).ok_or_else(invalid)?);
    }
    if let Some(duration) = normalized.strip_prefix("in ") {
        return Ok(now + parse_duration(duration).ok_or_else(invalid)?);
    }

    let words: Vec<&str> = normalized.split_whitespace().collect();
    let (day, time) = match words.as_slice() {
        ["now"] => return Ok(now),
        [time @ ("midnight" | "noon")] => ("today", *time),
        [day] => (*day, "midnight"),
        [day, time] => (*day, *time),
        _ => return Err(invalid()),
    };
    let today = now.date_naive();
    let date = match day {
        "today" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        _ => None,
    }
    .ok_or_else(invalid)?;
    let time = match time {
        "midnight" => NaiveTime::MIN,
        "noon" => NaiveTime::from_hms_opt(12, 0, 0).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    from_local(now.timezone(), date.and_time(time))
}

fn parse_naive(expression: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] =
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(expression, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(expression, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn parse_duration(duration: &str) -> Option<TimeDelta> {
    humantime::parse_duration(duration.trim())
        .ok()
        .and_then(|duration| TimeDelta::from_std(duration).ok())
}

/// The earliest instant for ambiguous local times.
fn from_local(time_zone: Tz, local: NaiveDateTime) -> Result<DateTime<Tz>, ConfigError> {
    time_zone.from_local_datetime(&local).earliest().ok_or(ConfigError::NonExistentLocalTime(local))
}
