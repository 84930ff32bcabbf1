//! Timestamp patterns written with the familiar `yyyy-MM-dd HH:mm:ss` letter tokens.
//!
//! A pattern is parsed once into segments and rendered for every file line, the same
//! parse-once/render-many split used for line templates. Parsing is also the validation
//! step: a pattern that cannot render a date is rejected here, before any line is written.

use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike, Utc};
use std::fmt::Write as _;

/// Pattern used when the caller does not supply one.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// Pattern used to stamp backup file names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "yyyyMMddHHmmss";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Maximum digits a fraction token may ask for.
const MAX_FRACTION_DIGITS: usize = 7;

/// One parsed piece of a timestamp pattern. The `usize` is the token's repeat count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSegment {
    Literal(String),
    Year(usize),
    Month(usize),
    Day(usize),
    Hour24(usize),
    Hour12(usize),
    Minute(usize),
    Second(usize),
    /// `f`: always `n` digits.
    Fraction(usize),
    /// `F`: up to `n` digits, trailing zeros removed.
    FractionTrimmed(usize),
    AmPm(usize),
    Offset(usize),
    /// `K`: `Z` for UTC, `+hh:mm` otherwise.
    Zone,
    Era,
}

/// A validated, pre-parsed timestamp pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    source: String,
    segments: Vec<TimeSegment>,
    /// `r`/`R` always render in UTC regardless of the configured clock.
    force_utc: bool,
}

impl TimestampFormat {
    /// Parses a pattern.
    ///
    /// # Errors
    /// Returns [`crate::Error::TimestampFormat`] for an empty pattern, an unknown
    /// single-letter standard pattern, an unterminated quote, a dangling `\` or `%`,
    /// or a fraction token longer than seven digits.
    pub fn parse(pattern: &str) -> Result<Self, crate::Error> {
        let mut chars = pattern.chars();
        let (Some(only), None) = (chars.next(), chars.next()) else {
            if pattern.is_empty() {
                return Err(crate::Error::TimestampFormat("empty format".to_string()));
            }
            return Ok(Self {
                source: pattern.to_string(),
                segments: parse_custom(pattern)?,
                force_utc: false,
            });
        };

        let expanded = standard_pattern(only).ok_or_else(|| {
            crate::Error::TimestampFormat(format!("unknown standard format '{only}'"))
        })?;

        Ok(Self {
            source: pattern.to_string(),
            segments: parse_custom(expanded)?,
            force_utc: matches!(only, 'r' | 'R'),
        })
    }

    /// The pattern as the caller wrote it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[TimeSegment] {
        &self.segments
    }

    /// Renders the current time from the UTC or local clock.
    #[must_use]
    pub fn render_now(&self, utc: bool) -> String {
        if utc || self.force_utc {
            self.render(&Utc::now().fixed_offset(), true)
        } else {
            self.render(&Local::now().fixed_offset(), false)
        }
    }

    /// Renders a given instant. `utc` decides how `K` is written.
    #[must_use]
    pub fn render(&self, time: &DateTime<FixedOffset>, utc: bool) -> String {
        let utc_time;
        let time = if self.force_utc && !utc {
            utc_time = time.with_timezone(&Utc).fixed_offset();
            &utc_time
        } else {
            time
        };
        let utc = utc || self.force_utc;

        let mut out = String::new();
        for segment in &self.segments {
            render_segment(&mut out, segment, time, utc);
        }
        out
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            source: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            segments: vec![
                TimeSegment::Year(4),
                TimeSegment::Literal("-".to_string()),
                TimeSegment::Month(2),
                TimeSegment::Literal("-".to_string()),
                TimeSegment::Day(2),
                TimeSegment::Literal(" ".to_string()),
                TimeSegment::Hour24(2),
                TimeSegment::Literal(":".to_string()),
                TimeSegment::Minute(2),
                TimeSegment::Literal(":".to_string()),
                TimeSegment::Second(2),
            ],
            force_utc: false,
        }
    }
}

/// Single-letter patterns stand for fixed invariant-culture layouts.
const fn standard_pattern(c: char) -> Option<&'static str> {
    Some(match c {
        'd' => "MM/dd/yyyy",
        'D' => "dddd, dd MMMM yyyy",
        't' => "HH:mm",
        'T' => "HH:mm:ss",
        'f' => "dddd, dd MMMM yyyy HH:mm",
        'F' => "dddd, dd MMMM yyyy HH:mm:ss",
        'g' => "MM/dd/yyyy HH:mm",
        'G' => "MM/dd/yyyy HH:mm:ss",
        'M' | 'm' => "MMMM dd",
        'Y' | 'y' => "yyyy MMMM",
        's' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        'u' => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        'o' | 'O' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffK",
        'r' | 'R' => "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'",
        _ => return None,
    })
}

fn parse_custom(pattern: &str) -> Result<Vec<TimeSegment>, crate::Error> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                let Some(len) = chars[i + 1..].iter().position(|&q| q == c) else {
                    return Err(crate::Error::TimestampFormat(format!(
                        "unterminated quote in '{pattern}'"
                    )));
                };
                literal.extend(&chars[i + 1..i + 1 + len]);
                i += len + 2;
            }
            '\\' => {
                let Some(&escaped) = chars.get(i + 1) else {
                    return Err(crate::Error::TimestampFormat(format!(
                        "dangling escape in '{pattern}'"
                    )));
                };
                literal.push(escaped);
                i += 2;
            }
            '%' => {
                if chars.get(i + 1).is_none_or(|&next| next == '%') {
                    return Err(crate::Error::TimestampFormat(format!(
                        "dangling '%' in '{pattern}'"
                    )));
                }
                i += 1;
            }
            'y' | 'M' | 'd' | 'H' | 'h' | 'm' | 's' | 'f' | 'F' | 't' | 'z' | 'K' | 'g' => {
                let run = chars[i..].iter().take_while(|&&r| r == c).count();
                if !literal.is_empty() {
                    segments.push(TimeSegment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(token(c, run, pattern)?);
                i += run;
            }
            _ => {
                literal.push(c);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        segments.push(TimeSegment::Literal(literal));
    }
    Ok(segments)
}

fn token(c: char, run: usize, pattern: &str) -> Result<TimeSegment, crate::Error> {
    Ok(match c {
        'y' => TimeSegment::Year(run),
        'M' => TimeSegment::Month(run),
        'd' => TimeSegment::Day(run),
        'H' => TimeSegment::Hour24(run),
        'h' => TimeSegment::Hour12(run),
        'm' => TimeSegment::Minute(run),
        's' => TimeSegment::Second(run),
        'f' | 'F' if run > MAX_FRACTION_DIGITS => {
            return Err(crate::Error::TimestampFormat(format!(
                "fraction wider than {MAX_FRACTION_DIGITS} digits in '{pattern}'"
            )));
        }
        'f' => TimeSegment::Fraction(run),
        'F' => TimeSegment::FractionTrimmed(run),
        't' => TimeSegment::AmPm(run),
        'z' => TimeSegment::Offset(run),
        'K' => TimeSegment::Zone,
        _ => TimeSegment::Era,
    })
}

/// `n` digits of the sub-second part, truncated.
fn fraction_digits(time: &DateTime<FixedOffset>, n: usize) -> String {
    let nanos = time.nanosecond() % 1_000_000_000;
    #[allow(clippy::cast_possible_truncation)]
    let scaled = nanos / 10u32.pow(9 - n as u32);
    format!("{scaled:0n$}")
}

fn offset_parts(time: &DateTime<FixedOffset>) -> (char, i32, i32) {
    let secs = time.offset().local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    (sign, secs / 3600, (secs % 3600) / 60)
}

fn render_segment(
    out: &mut String,
    segment: &TimeSegment,
    time: &DateTime<FixedOffset>,
    utc: bool,
) {
    // Writing into a String cannot fail.
    let _ = match segment {
        TimeSegment::Literal(s) => {
            out.push_str(s);
            Ok(())
        }
        TimeSegment::Year(1) => write!(out, "{}", time.year() % 100),
        TimeSegment::Year(2) => write!(out, "{:02}", time.year() % 100),
        TimeSegment::Year(n) => write!(out, "{:0width$}", time.year(), width = *n),
        TimeSegment::Month(1) => write!(out, "{}", time.month()),
        TimeSegment::Month(2) => write!(out, "{:02}", time.month()),
        TimeSegment::Month(n) => {
            let name = MONTHS[time.month0() as usize];
            out.push_str(if *n == 3 { &name[..3] } else { name });
            Ok(())
        }
        TimeSegment::Day(1) => write!(out, "{}", time.day()),
        TimeSegment::Day(2) => write!(out, "{:02}", time.day()),
        TimeSegment::Day(n) => {
            let name = WEEKDAYS[time.weekday().num_days_from_monday() as usize];
            out.push_str(if *n == 3 { &name[..3] } else { name });
            Ok(())
        }
        TimeSegment::Hour24(1) => write!(out, "{}", time.hour()),
        TimeSegment::Hour24(_) => write!(out, "{:02}", time.hour()),
        TimeSegment::Hour12(n) => {
            let hour = match time.hour() % 12 {
                0 => 12,
                h => h,
            };
            if *n == 1 {
                write!(out, "{hour}")
            } else {
                write!(out, "{hour:02}")
            }
        }
        TimeSegment::Minute(1) => write!(out, "{}", time.minute()),
        TimeSegment::Minute(_) => write!(out, "{:02}", time.minute()),
        TimeSegment::Second(1) => write!(out, "{}", time.second()),
        TimeSegment::Second(_) => write!(out, "{:02}", time.second()),
        TimeSegment::Fraction(n) => {
            out.push_str(&fraction_digits(time, *n));
            Ok(())
        }
        TimeSegment::FractionTrimmed(n) => {
            out.push_str(fraction_digits(time, *n).trim_end_matches('0'));
            Ok(())
        }
        TimeSegment::AmPm(n) => {
            let marker = if time.hour() < 12 { "AM" } else { "PM" };
            out.push_str(if *n == 1 { &marker[..1] } else { marker });
            Ok(())
        }
        TimeSegment::Offset(n) => {
            let (sign, hours, minutes) = offset_parts(time);
            match n {
                1 => write!(out, "{sign}{hours}"),
                2 => write!(out, "{sign}{hours:02}"),
                _ => write!(out, "{sign}{hours:02}:{minutes:02}"),
            }
        }
        TimeSegment::Zone => {
            if utc {
                out.push('Z');
                Ok(())
            } else {
                let (sign, hours, minutes) = offset_parts(time);
                write!(out, "{sign}{hours:02}:{minutes:02}")
            }
        }
        TimeSegment::Era => {
            out.push_str("A.D.");
            Ok(())
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 7, 15, 4, 9)
            .unwrap()
    }

    #[test]
    fn default_pattern_matches_parsed_default() {
        let parsed = TimestampFormat::parse(DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(parsed, TimestampFormat::default());
    }

    #[test]
    fn renders_common_tokens() {
        let fmt = TimestampFormat::parse("yyyy-MM-dd HH:mm:ss").unwrap();
        assert_eq!(fmt.render(&sample(), false), "2024-03-07 15:04:09");
    }

    #[test]
    fn renders_backup_stamp() {
        let fmt = TimestampFormat::parse(BACKUP_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(fmt.render(&sample(), false), "20240307150409");
    }

    #[test]
    fn renders_names_and_twelve_hour_clock() {
        let fmt = TimestampFormat::parse("ddd dd MMM h:mm tt").unwrap();
        assert_eq!(fmt.render(&sample(), false), "Thu 07 Mar 3:04 PM");
    }

    #[test]
    fn quoted_text_is_literal() {
        let fmt = TimestampFormat::parse("yyyy'y'MM\\M").unwrap();
        assert_eq!(fmt.render(&sample(), false), "2024y03M");
    }

    #[test]
    fn zone_token_depends_on_clock() {
        let fmt = TimestampFormat::parse("HHK").unwrap();
        assert_eq!(fmt.render(&sample(), false), "15+02:00");
        assert_eq!(fmt.render(&sample(), true), "15Z");
    }

    #[test]
    fn single_letter_is_a_standard_pattern() {
        let fmt = TimestampFormat::parse("s").unwrap();
        assert_eq!(fmt.render(&sample(), false), "2024-03-07T15:04:09");
    }

    #[test]
    fn percent_allows_single_custom_token() {
        let fmt = TimestampFormat::parse("%d").unwrap();
        assert_eq!(fmt.render(&sample(), false), "7");
    }

    #[test]
    fn rejects_unrenderable_patterns() {
        for bad in ["", "Q", "yyyy'", "HH\\", "%", "ffffffff"] {
            assert!(
                matches!(
                    TimestampFormat::parse(bad),
                    Err(crate::Error::TimestampFormat(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }
}
