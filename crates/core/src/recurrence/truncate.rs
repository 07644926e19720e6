use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::event::{EventError, Result};

/// Prefix of the one line that carries the repetition pattern.
const RULE_PREFIX: &str = "RRULE:";

/// Frequencies whose occurrences can fall on the same day.
const SUB_DAILY_FREQUENCIES: [&str; 3] = ["HOURLY", "MINUTELY", "SECONDLY"];

/// Rule parts that pin occurrences to times within a day.
const TIME_OF_DAY_PARTS: [&str; 3] = ["BYHOUR", "BYMINUTE", "BYSECOND"];

/// Where a series is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cutoff {
    /// All-day series; the rule bound is a bare date.
    Date(NaiveDate),
    /// Timed series; the rule bound is a UTC timestamp.
    Instant(DateTime<Utc>),
}

impl Cutoff {
    fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Cutoff::Date(date));
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|instant| Cutoff::Instant(instant.with_timezone(&Utc)))
            .map_err(|_| {
                EventError::validation(format!(
                    "invalid cut-off {raw:?} (use YYYY-MM-DD or RFC3339)"
                ))
            })
    }

    /// The last value that still belongs to the truncated series.
    ///
    /// Day-or-longer patterns stop at the end of the previous UTC day.
    /// Patterns that repeat within a day stop one second before the cut.
    fn until(&self, sub_daily: bool) -> Result<String> {
        let out_of_range = || EventError::validation("cut-off is out of range");
        match self {
            Cutoff::Date(date) => {
                let last = date.pred_opt().ok_or_else(out_of_range)?;
                Ok(last.format("%Y%m%d").to_string())
            }
            Cutoff::Instant(instant) => {
                let split = if sub_daily {
                    *instant
                } else {
                    instant
                        .date_naive()
                        .and_hms_opt(0, 0, 0)
                        .ok_or_else(out_of_range)?
                        .and_utc()
                };
                let last = split
                    .checked_sub_signed(TimeDelta::seconds(1))
                    .ok_or_else(out_of_range)?;
                Ok(last.format("%Y%m%dT%H%M%SZ").to_string())
            }
        }
    }
}

/// Ends a recurrence strictly before `cutoff`.
///
/// Exactly one `RRULE:` line must be present. Its `COUNT`/`UNTIL` bound is
/// replaced with an `UNTIL` that excludes the occurrence at `cutoff` and
/// every later one. A date cut-off (`YYYY-MM-DD`) gives a bare-date bound,
/// an RFC 3339 cut-off gives a UTC timestamp bound. All other lines are
/// returned unchanged and in order.
pub fn truncate_recurrence(rules: &[String], cutoff: &str) -> Result<Vec<String>> {
    let pattern_lines: Vec<usize> = rules
        .iter()
        .enumerate()
        .filter(|(_, line)| is_pattern_line(line))
        .map(|(idx, _)| idx)
        .collect();

    let idx = match pattern_lines.as_slice() {
        [idx] => *idx,
        [] => return Err(EventError::validation("recurrence has no RRULE line")),
        _ => {
            return Err(EventError::validation(format!(
                "recurrence has {} RRULE lines; expected exactly one",
                pattern_lines.len()
            )))
        }
    };

    let cutoff = Cutoff::parse(cutoff)?;
    let mut truncated = rules.to_vec();
    truncated[idx] = rewrite_until(&rules[idx], cutoff)?;
    Ok(truncated)
}

fn is_pattern_line(line: &str) -> bool {
    line.trim_start()
        .get(..RULE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(RULE_PREFIX))
}

fn rewrite_until(line: &str, cutoff: Cutoff) -> Result<String> {
    let line = line.trim();
    let (name, body) = line.split_at(RULE_PREFIX.len());

    let mut parts: Vec<&str> = body
        .split(';')
        .filter(|part| !part.is_empty())
        .filter(|part| !matches!(part_key(part).as_str(), "COUNT" | "UNTIL"))
        .collect();

    let sub_daily = parts.iter().any(|part| {
        let key = part_key(part);
        TIME_OF_DAY_PARTS.contains(&key.as_str())
            || (key == "FREQ" && SUB_DAILY_FREQUENCIES.contains(&part_value(part).as_str()))
    });

    let until = format!("UNTIL={}", cutoff.until(sub_daily)?);
    parts.push(&until);
    Ok(format!("{name}{}", parts.join(";")))
}

fn part_key(part: &str) -> String {
    part.split('=').next().unwrap_or_default().trim().to_uppercase()
}

fn part_value(part: &str) -> String {
    part.split_once('=')
        .map(|(_, value)| value.trim().to_uppercase())
        .unwrap_or_default()
}
