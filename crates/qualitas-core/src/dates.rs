//! Calendar dates exchanged as `dd/MM/yyyy` strings.
//!
//! Due-date arithmetic works on civil dates only; no time zone or time of
//! day is involved once a date has been parsed. The only place the system
//! clock is consulted is [`CalendarDate::today`].

use std::{fmt, str::FromStr};

use jiff::{civil::Date, Span, Zoned};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TrackerError};

/// `strftime`/`strptime` pattern for the `dd/MM/yyyy` wire format.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A calendar day, displayed and parsed as `dd/MM/yyyy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Wraps an existing civil date.
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// Parses `input` as `dd/MM/yyyy`, attributing failures to `field`.
    ///
    /// Impossible dates such as `31/02/2024` are rejected rather than
    /// clamped, and so is anything that is not exactly two day digits, two
    /// month digits and four year digits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use qualitas_core::dates::CalendarDate;
    ///
    /// let date = CalendarDate::parse("creation_date", "05/03/2024").unwrap();
    /// assert_eq!(date.to_string(), "05/03/2024");
    /// assert!(CalendarDate::parse("creation_date", "2024-03-05").is_err());
    /// assert!(CalendarDate::parse("creation_date", "05/03/24").is_err());
    /// ```
    pub fn parse(field: &str, input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::validation(field).with_reason("date is empty"));
        }
        if !has_date_shape(trimmed) {
            return Err(TrackerError::validation(field)
                .with_reason(format!("'{trimmed}' is not in dd/MM/yyyy format")));
        }

        Date::strptime(DATE_FORMAT, trimmed)
            .map(Self)
            .map_err(|e| {
                TrackerError::validation(field)
                    .with_reason(format!("'{trimmed}' is not a valid dd/MM/yyyy date: {e}"))
            })
    }

    /// Today's date in the system time zone.
    pub fn today() -> Self {
        Self(Zoned::now().date())
    }

    /// The date `days` days later.
    pub fn plus_days(self, days: i32) -> Result<Self> {
        self.0
            .checked_add(Span::new().days(days))
            .map(Self)
            .map_err(|e| {
                TrackerError::validation("due_date")
                    .with_reason(format!("{self} + {days} days is out of range: {e}"))
            })
    }

    /// The date `days` days earlier.
    pub fn minus_days(self, days: i32) -> Result<Self> {
        self.plus_days(-days)
    }

    /// The underlying civil date.
    pub fn as_date(&self) -> Date {
        self.0
    }
}

/// `dd/MM/yyyy` with ASCII digits only; `%Y` alone would accept signed or
/// short years.
fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime(DATE_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse("date", s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
