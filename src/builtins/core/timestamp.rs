//! This module implements `Timestamp`, PostgreSQL's `timestamp without time zone`.

use crate::{
    builtins::core::{Date, Interval, TimeOfDay, ZoneOffset, ZonedTimestamp},
    error::ErrorMessage,
    instant::Instant,
    parsers::{parse_timestamp, FormattableDateTime},
    ValueError, ValueResult, TICKS_PER_DAY, TICKS_PER_SECOND,
};
use core::str::FromStr;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

/// A date and time of day without a zone, or one of the two infinities.
///
/// Timestamps order with `-infinity` before every finite value and
/// `infinity` after. Arithmetic on an infinity returns it unchanged.
///
/// ```rust
/// use pgvalue_rs::{Interval, Timestamp};
/// use core::str::FromStr;
///
/// let ts = Timestamp::from_str("2024-02-29 12:00:00").unwrap();
/// let year_later = ts.add(&Interval::from_months(12)).unwrap();
/// assert_eq!(year_later.to_string(), "2025-02-28 12:00:00");
///
/// let infinity = Timestamp::PositiveInfinity;
/// assert_eq!(infinity.add(&Interval::from_days(-1)).unwrap(), infinity);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timestamp {
    /// `-infinity`, earlier than every finite timestamp.
    NegativeInfinity,
    /// A date and a time of day. [`Timestamp::new`] never produces a
    /// `24:00:00` time.
    Finite(Date, TimeOfDay),
    /// `infinity`, later than every finite timestamp.
    PositiveInfinity,
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::Finite(Date::ERA, TimeOfDay::ALL_BALLS)
    }
}

/// Adds an interval to a date and time: months first, then days, then ticks
/// with any carry moving the date.
pub(crate) fn add_to_date_time(
    date: Date,
    time: TimeOfDay,
    interval: &Interval,
) -> ValueResult<(Date, TimeOfDay)> {
    let date = date
        .add_months(interval.months())?
        .add_days(interval.days())?;
    let (time, carry) = time.add_ticks_with_carry(interval.ticks());
    Ok((date.add_days(carry)?, time))
}

/// Moves a date and time from one offset to another.
pub(crate) fn rebase_date_time(
    date: Date,
    time: TimeOfDay,
    from: ZoneOffset,
    to: ZoneOffset,
) -> ValueResult<(Date, TimeOfDay)> {
    let shift = i64::from(to.seconds() - from.seconds()) * TICKS_PER_SECOND;
    let (time, carry) = time.add_ticks_with_carry(shift);
    Ok((date.add_days(carry)?, time))
}

/// Returns the ticks of a date and time since 0001-01-01T00:00:00.
pub(crate) fn local_ticks(date: Date, time: TimeOfDay) -> i128 {
    i128::from(date.days()) * i128::from(TICKS_PER_DAY) + i128::from(time.ticks())
}

impl Timestamp {
    /// Creates a finite `Timestamp`, moving `24:00:00` to midnight of the
    /// following day.
    pub fn new(date: Date, time: TimeOfDay) -> ValueResult<Self> {
        if time.is_end_of_day() {
            return Ok(Self::Finite(date.add_days(1)?, TimeOfDay::ALL_BALLS));
        }
        Ok(Self::Finite(date, time))
    }

    /// Creates a `Timestamp` from a UTC instant. The two ends of the instant
    /// window become the infinities.
    #[must_use]
    pub fn from_instant(instant: Instant) -> Self {
        if instant == Instant::MIN {
            return Self::NegativeInfinity;
        }
        if instant == Instant::MAX {
            return Self::PositiveInfinity;
        }
        let (days, ticks) = instant.day_and_ticks();
        Self::Finite(
            Date::from_days_unchecked(days),
            TimeOfDay::from_ticks(ticks),
        )
    }

    /// Converts this timestamp, read as UTC, into an `Instant`.
    ///
    /// The infinities map to [`Instant::MIN`] and [`Instant::MAX`]; finite
    /// values outside of the instant window are a range error.
    pub fn to_instant(&self) -> ValueResult<Instant> {
        match self {
            Self::NegativeInfinity => Ok(Instant::MIN),
            Self::PositiveInfinity => Ok(Instant::MAX),
            Self::Finite(date, time) => Instant::try_from_i128(local_ticks(*date, *time)),
        }
    }

    #[inline]
    #[must_use]
    pub fn date(&self) -> Option<Date> {
        match self {
            Self::Finite(date, _) => Some(*date),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> Option<TimeOfDay> {
        match self {
            Self::Finite(_, time) => Some(*time),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(..))
    }

    /// Adds an interval. Month arithmetic clamps the day of month, and the
    /// tick component carries into the date.
    pub fn add(&self, interval: &Interval) -> ValueResult<Self> {
        let Self::Finite(date, time) = self else {
            return Ok(*self);
        };
        let (date, time) = add_to_date_time(*date, *time, interval)?;
        Ok(Self::Finite(date, time))
    }

    pub fn subtract_interval(&self, interval: &Interval) -> ValueResult<Self> {
        self.add(&interval.negate()?)
    }

    /// Returns the interval from `other` to `self` as a day difference and
    /// a tick difference.
    ///
    /// ```rust
    /// use pgvalue_rs::Timestamp;
    /// use core::str::FromStr;
    ///
    /// let a = Timestamp::from_str("2024-03-01 06:00:00").unwrap();
    /// let b = Timestamp::from_str("2024-02-28 18:00:00").unwrap();
    /// assert_eq!(a.subtract(&b).unwrap().to_string(), "2 days -12:00:00");
    /// assert!(a.subtract(&Timestamp::NegativeInfinity).is_err());
    /// ```
    pub fn subtract(&self, other: &Self) -> ValueResult<Interval> {
        match (self, other) {
            (Self::Finite(date, time), Self::Finite(other_date, other_time)) => {
                Ok(Interval::new(
                    0,
                    date.subtract(other_date).days(),
                    time.ticks() - other_time.ticks(),
                ))
            }
            _ => Err(ValueError::infinite_operand().with_enum(ErrorMessage::InfiniteSubtraction)),
        }
    }

    /// Rebases the time from one offset to another, carrying into the date.
    pub fn at_zone(&self, from: ZoneOffset, to: ZoneOffset) -> ValueResult<Self> {
        let Self::Finite(date, time) = self else {
            return Ok(*self);
        };
        let (date, time) = rebase_date_time(*date, *time, from, to)?;
        Ok(Self::Finite(date, time))
    }

    /// Attaches an offset without moving the local date and time.
    #[must_use]
    pub fn with_zone(&self, offset: ZoneOffset) -> ZonedTimestamp {
        match self {
            Self::NegativeInfinity => ZonedTimestamp::NegativeInfinity,
            Self::PositiveInfinity => ZonedTimestamp::PositiveInfinity,
            Self::Finite(date, time) => ZonedTimestamp::Finite(*date, *time, offset),
        }
    }

    /// Parses a timestamp, returning `None` on failure.
    pub fn try_parse(source: &str) -> Option<Self> {
        parse_timestamp(source).ok()
    }

    /// Parses optional text, failing with a null input error when absent.
    pub fn parse_nullable(source: Option<&str>) -> ValueResult<Self> {
        let source = source.ok_or_else(|| {
            ValueError::null_input().with_message("timestamp text must not be NULL")
        })?;
        parse_timestamp(source)
    }
}

impl Writeable for Timestamp {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self {
            Self::NegativeInfinity => sink.write_str("-infinity"),
            Self::PositiveInfinity => sink.write_str("infinity"),
            Self::Finite(date, time) => {
                let (date, bc) = date.formattable();
                FormattableDateTime {
                    date,
                    time: time.formattable(),
                    offset: None,
                    bc,
                }
                .write_to(sink)
            }
        }
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self {
            Self::NegativeInfinity => LengthHint::exact(9),
            Self::PositiveInfinity => LengthHint::exact(8),
            Self::Finite(date, time) => {
                date.writeable_length_hint()
                    + LengthHint::exact(1)
                    + time.writeable_length_hint()
            }
        }
    }
}

impl_display_with_writeable!(Timestamp);

impl FromStr for Timestamp {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_timestamp(s)
    }
}
