//! The source of "now" for new transactions and export filenames.

use time::{Date, OffsetDateTime, Time, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Supplies the current instant.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;

    /// The current calendar date.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Reads the system clock and reports it in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// A clock reporting UTC.
    pub fn utc() -> Self {
        Self::with_offset(UtcOffset::UTC)
    }

    /// A clock reporting the given offset.
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// A clock in the canonical timezone `timezone`, e.g. "Africa/Lagos".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `timezone` is not a known
    /// canonical timezone.
    pub fn from_timezone(timezone: &str) -> Result<Self, Error> {
        get_local_offset(timezone)
            .map(Self::with_offset)
            .ok_or_else(|| Error::InvalidTimezoneError(timezone.to_owned()))
    }

    /// A clock in the operating system's local offset, falling back to UTC if
    /// the offset cannot be determined.
    pub fn local() -> Self {
        match UtcOffset::current_local_offset() {
            Ok(offset) => Self::with_offset(offset),
            Err(error) => {
                tracing::warn!("Could not determine the local UTC offset, using UTC: {error}");
                Self::utc()
            }
        }
    }

    /// The offset this clock reports in.
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// A clock stopped at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub OffsetDateTime);

impl FixedClock {
    /// A clock stopped at midnight UTC on `date`.
    pub fn at_date(date: Date) -> Self {
        Self(date.with_time(Time::MIDNIGHT).assume_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Get the current UTC offset of the canonical timezone `canonical_timezone`.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

#[cfg(test)]
mod tests {
    use time::{UtcOffset, macros::date};

    use crate::{
        Error,
        clock::{Clock, FixedClock, SystemClock},
    };

    #[test]
    fn fixed_clock_reports_its_date() {
        let clock = FixedClock::at_date(date!(2023 - 01 - 01));

        assert_eq!(clock.today(), date!(2023 - 01 - 01));
        assert_eq!(clock.now().offset(), UtcOffset::UTC);
    }

    #[test]
    fn timezone_clock_uses_zone_offset() {
        let clock = SystemClock::from_timezone("Etc/UTC").unwrap();

        assert_eq!(clock.offset(), UtcOffset::UTC);
        assert_eq!(clock.now().offset(), UtcOffset::UTC);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        assert_eq!(
            SystemClock::from_timezone("Mars/Olympus_Mons"),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }
}
