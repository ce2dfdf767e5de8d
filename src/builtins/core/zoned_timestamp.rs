//! This module implements `ZonedTimestamp`, PostgreSQL's `timestamp with time zone`.

use crate::{
    builtins::core::{
        timestamp::{add_to_date_time, local_ticks, rebase_date_time},
        Date, Interval, TimeOfDay, Timestamp, ZoneOffset,
    },
    error::ErrorMessage,
    instant::Instant,
    parsers::{parse_zoned_timestamp, FormattableDateTime},
    ValueError, ValueResult, TICKS_PER_SECOND,
};
use core::{cmp::Ordering, str::FromStr};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

/// A local date and time with the fixed offset it was observed at, or one
/// of the two infinities.
///
/// Equality is exact: `12:00:00+01` and `11:00:00+00` are the same instant
/// but different values. [`ZonedTimestamp::compare`] orders by instant.
///
/// ```rust
/// use pgvalue_rs::ZonedTimestamp;
/// use core::cmp::Ordering;
/// use core::str::FromStr;
///
/// let a = ZonedTimestamp::from_str("2024-01-01 12:00:00+01").unwrap();
/// let b = ZonedTimestamp::from_str("2024-01-01 11:00:00Z").unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a.compare(&b), Ordering::Equal);
/// assert_eq!(a.to_utc().unwrap(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZonedTimestamp {
    /// `-infinity`, earlier than every finite timestamp.
    NegativeInfinity,
    /// A local date, a local time of day and the offset from UTC.
    Finite(Date, TimeOfDay, ZoneOffset),
    /// `infinity`, later than every finite timestamp.
    PositiveInfinity,
}

impl Default for ZonedTimestamp {
    fn default() -> Self {
        Self::Finite(Date::ERA, TimeOfDay::ALL_BALLS, ZoneOffset::UTC)
    }
}

fn utc_ticks(date: Date, time: TimeOfDay, offset: ZoneOffset) -> i128 {
    local_ticks(date, time) - i128::from(offset.seconds()) * i128::from(TICKS_PER_SECOND)
}

impl ZonedTimestamp {
    /// Creates a finite `ZonedTimestamp`, moving `24:00:00` to midnight of
    /// the following day.
    pub fn new(date: Date, time: TimeOfDay, offset: ZoneOffset) -> ValueResult<Self> {
        Ok(Timestamp::new(date, time)?.with_zone(offset))
    }

    /// Creates a UTC `ZonedTimestamp` from an instant. The two ends of the
    /// instant window become the infinities.
    #[must_use]
    pub fn from_instant(instant: Instant) -> Self {
        Timestamp::from_instant(instant).with_zone(ZoneOffset::UTC)
    }

    /// Returns the ticks since 0001-01-01T00:00:00Z, unbounded by the
    /// instant window.
    fn utc_ticks(&self) -> Option<i128> {
        match self {
            Self::Finite(date, time, offset) => Some(utc_ticks(*date, *time, *offset)),
            _ => None,
        }
    }

    /// Converts this timestamp into an `Instant`.
    ///
    /// The infinities map to [`Instant::MIN`] and [`Instant::MAX`]; finite
    /// values outside of the instant window are a range error.
    pub fn to_instant(&self) -> ValueResult<Instant> {
        match self {
            Self::NegativeInfinity => Ok(Instant::MIN),
            Self::PositiveInfinity => Ok(Instant::MAX),
            Self::Finite(date, time, offset) => {
                Instant::try_from_i128(utc_ticks(*date, *time, *offset))
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn date(&self) -> Option<Date> {
        match self {
            Self::Finite(date, ..) => Some(*date),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> Option<TimeOfDay> {
        match self {
            Self::Finite(_, time, _) => Some(*time),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> Option<ZoneOffset> {
        match self {
            Self::Finite(.., offset) => Some(*offset),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(..))
    }

    /// Drops the offset, keeping the local date and time.
    #[must_use]
    pub fn to_local(&self) -> Timestamp {
        match self {
            Self::NegativeInfinity => Timestamp::NegativeInfinity,
            Self::PositiveInfinity => Timestamp::PositiveInfinity,
            Self::Finite(date, time, _) => Timestamp::Finite(*date, *time),
        }
    }

    /// Rebases the local date and time onto another offset.
    pub fn at_zone(&self, to: ZoneOffset) -> ValueResult<Self> {
        let Self::Finite(date, time, offset) = self else {
            return Ok(*self);
        };
        let (date, time) = rebase_date_time(*date, *time, *offset, to)?;
        Ok(Self::Finite(date, time, to))
    }

    #[inline]
    pub fn to_utc(&self) -> ValueResult<Self> {
        self.at_zone(ZoneOffset::UTC)
    }

    /// Adds an interval to the local date and time, keeping the offset.
    pub fn add(&self, interval: &Interval) -> ValueResult<Self> {
        let Self::Finite(date, time, offset) = self else {
            return Ok(*self);
        };
        let (date, time) = add_to_date_time(*date, *time, interval)?;
        Ok(Self::Finite(date, time, *offset))
    }

    pub fn subtract_interval(&self, interval: &Interval) -> ValueResult<Self> {
        self.add(&interval.negate()?)
    }

    /// Returns the interval from `other` to `self`, computed after moving
    /// both operands to UTC.
    pub fn subtract(&self, other: &Self) -> ValueResult<Interval> {
        if !self.is_finite() || !other.is_finite() {
            return Err(ValueError::infinite_operand().with_enum(ErrorMessage::InfiniteSubtraction));
        }
        self.to_utc()?.to_local().subtract(&other.to_utc()?.to_local())
    }

    /// Compares two timestamps by the instant they denote.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::NegativeInfinity, Self::NegativeInfinity)
            | (Self::PositiveInfinity, Self::PositiveInfinity) => Ordering::Equal,
            (Self::NegativeInfinity, _) | (_, Self::PositiveInfinity) => Ordering::Less,
            (_, Self::NegativeInfinity) | (Self::PositiveInfinity, _) => Ordering::Greater,
            _ => self.utc_ticks().cmp(&other.utc_ticks()),
        }
    }

    /// Parses a zoned timestamp, returning `None` on failure.
    pub fn try_parse(source: &str) -> Option<Self> {
        parse_zoned_timestamp(source).ok()
    }

    /// Parses optional text, failing with a null input error when absent.
    pub fn parse_nullable(source: Option<&str>) -> ValueResult<Self> {
        let source = source.ok_or_else(|| {
            ValueError::null_input().with_message("timestamptz text must not be NULL")
        })?;
        parse_zoned_timestamp(source)
    }
}

impl Writeable for ZonedTimestamp {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self {
            Self::NegativeInfinity => sink.write_str("-infinity"),
            Self::PositiveInfinity => sink.write_str("infinity"),
            Self::Finite(date, time, offset) => {
                let (date, bc) = date.formattable();
                FormattableDateTime {
                    date,
                    time: time.formattable(),
                    offset: Some(offset.formattable()),
                    bc,
                }
                .write_to(sink)
            }
        }
    }

    fn writeable_length_hint(&self) -> LengthHint {
        match self {
            Self::Finite(_, _, offset) => {
                self.to_local().writeable_length_hint() + offset.writeable_length_hint()
            }
            _ => self.to_local().writeable_length_hint(),
        }
    }
}

impl_display_with_writeable!(ZonedTimestamp);

impl FromStr for ZonedTimestamp {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_zoned_timestamp(s)
    }
}
