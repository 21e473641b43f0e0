use crate::error::{Result, TicketError};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, Utc};
use regex::Regex;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use std::sync::LazyLock;

/// Date and time of a ticket leg joined by a single space, e.g. `01.02.24 9:05`.
pub const DATE_TIME_FORMAT: &str = "%d.%m.%y %H:%M";

// chrono accepts single digits for every numeric field, the widths are pinned here
static DATE_TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{2} \d{1,2}:\d{2}$").unwrap());

/// Whole minutes of elapsed flight time. Signed, since nothing stops a data
/// error from putting the arrival before the departure.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Default)]
pub struct Minutes(pub i64);

impl Minutes {
    pub fn between(from: &DateTime<FixedOffset>, to: &DateTime<FixedOffset>) -> Minutes {
        Minutes((*to - *from).num_minutes())
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 60;
        let mins = self.0 % 60;
        write!(f, "{:02} hours {:02} minutes", hours, mins)
    }
}

impl Add<Minutes> for Minutes {
    type Output = Self;

    fn add(self, rhs: Minutes) -> Self::Output {
        Minutes(self.0 + rhs.0)
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Minutes>>(iter: I) -> Self {
        iter.fold(Minutes(0), |acc, m| acc + m)
    }
}

/// A constant offset from UTC. Never consults a zone database, so results do not
/// depend on the host's timezone data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset(FixedOffset);

impl UtcOffset {
    pub fn utc() -> UtcOffset {
        UtcOffset(Utc.fix())
    }

    pub fn hours(hours: i32) -> Option<UtcOffset> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(UtcOffset)
    }

    pub fn seconds(&self) -> i32 {
        self.0.local_minus_utc()
    }

    /// Pins a wall-clock reading to this offset.
    pub fn anchor(&self, local: NaiveDateTime) -> DateTime<FixedOffset> {
        DateTime::from_naive_utc_and_offset(local - self.0, self.0)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.seconds();
        if secs == 0 {
            return write!(f, "UTC");
        }
        let sign = if secs < 0 { '-' } else { '+' };
        let hours = secs.abs() / 3600;
        let mins = secs.abs() % 3600 / 60;
        if mins == 0 {
            write!(f, "UTC{}{}", sign, hours)
        } else {
            write!(f, "UTC{}{:02}:{:02}", sign, hours, mins)
        }
    }
}

impl FromStr for UtcOffset {
    type Err = TicketError;

    /// Accepts `UTC+10`, `GMT-3`, `+05:30`, `-3`, `UTC` and `Z`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || TicketError::InvalidOffset(s.to_string());
        let text = s.trim();
        let text = text
            .strip_prefix("UTC")
            .or_else(|| text.strip_prefix("GMT"))
            .unwrap_or(text);
        if text.is_empty() || text == "Z" {
            return Ok(UtcOffset::utc());
        }

        let (sign, text) = match (text.strip_prefix('+'), text.strip_prefix('-')) {
            (Some(rest), _) => (1, rest),
            (_, Some(rest)) => (-1, rest),
            _ => (1, text),
        };
        let (hours, mins) = text.split_once(':').unwrap_or((text, "00"));
        let is_number = |part: &str| !part.is_empty() && part.len() <= 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !is_number(hours) || !is_number(mins) {
            return Err(invalid());
        }

        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let mins: i32 = mins.parse().map_err(|_| invalid())?;
        if mins >= 60 {
            return Err(invalid());
        }
        FixedOffset::east_opt(sign * (hours * 3600 + mins * 60))
            .map(UtcOffset)
            .ok_or_else(invalid)
    }
}

/// Parses a `dd.MM.yy` date and an `H:mm` time as a wall-clock reading at `offset`.
///
/// Two-digit years always land in 2000..=2099.
pub fn parse_local(date: &str, time: &str, offset: UtcOffset) -> Result<DateTime<FixedOffset>> {
    let input = format!("{} {}", date, time);
    if !DATE_TIME_SHAPE.is_match(&input) {
        return Err(TicketError::InvalidFormat { input, source: None });
    }
    let naive = NaiveDateTime::parse_from_str(&input, DATE_TIME_FORMAT).map_err(|source| {
        TicketError::InvalidFormat {
            input: input.clone(),
            source: Some(source),
        }
    })?;

    // chrono pivots %y at 70, tickets never predate 2000
    let naive = if naive.year() < 2000 {
        naive.with_year(naive.year() + 100).unwrap_or(naive)
    } else {
        naive
    };
    Ok(offset.anchor(naive))
}
