//! This module implements `ZoneOffset`, a fixed offset from UTC.

use crate::{
    builtins::core::Interval,
    parsers::{parse_zone_offset, FormattableOffset},
    Sign, ValueError, ValueResult, SECONDS_PER_DAY, TICKS_PER_SECOND,
};
use core::{cmp::Ordering, str::FromStr};
use num_traits::ToPrimitive;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

/// A fixed UTC offset in whole seconds, positive east of Greenwich.
///
/// Offsets order the way PostgreSQL orders zones: the comparison is the
/// reverse of the numeric one, so `+05` sorts before `+00`, which sorts
/// before `-03`.
///
/// ```rust
/// use pgvalue_rs::ZoneOffset;
/// use core::str::FromStr;
///
/// let east = ZoneOffset::from_str("+05:30").unwrap();
/// let west = ZoneOffset::from_str("-03").unwrap();
/// assert!(east < west);
/// assert_eq!(east.seconds(), 19_800);
/// ```
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneOffset {
    seconds: i32,
}

impl ZoneOffset {
    /// The zero offset, `+00`.
    pub const UTC: Self = Self { seconds: 0 };

    /// Creates a `ZoneOffset` from signed seconds, which must be less than a
    /// day in magnitude.
    pub fn from_seconds(seconds: i32) -> ValueResult<Self> {
        if seconds.unsigned_abs() >= SECONDS_PER_DAY as u32 {
            return Err(ValueError::range().with_message("zone offset must be less than a day"));
        }
        Ok(Self { seconds })
    }

    /// Creates a `ZoneOffset` from a sign and clock fields.
    ///
    /// ```rust
    /// use pgvalue_rs::{Sign, ZoneOffset};
    ///
    /// let offset = ZoneOffset::try_new(Sign::Negative, 0, 30, 0).unwrap();
    /// assert_eq!(offset.to_string(), "-00:30");
    /// ```
    pub fn try_new(sign: Sign, hour: u8, minute: u8, second: u8) -> ValueResult<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(ValueError::range().with_message("zone offset field out of range"));
        }
        let seconds = i32::from(hour) * 3_600 + i32::from(minute) * 60 + i32::from(second);
        Self::from_seconds(seconds * i32::from(sign.as_sign_multiplier()))
    }

    /// Creates a `ZoneOffset` from the unjustified total of an interval.
    ///
    /// Sub-second precision is truncated.
    pub fn from_interval(interval: &Interval) -> ValueResult<Self> {
        let seconds = (interval.total_ticks() / i128::from(TICKS_PER_SECOND))
            .to_i32()
            .ok_or_else(|| ValueError::range().with_message("zone offset must be less than a day"))?;
        Self::from_seconds(seconds)
    }

    /// Returns the offset in seconds, positive east of Greenwich.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i32 {
        self.seconds
    }

    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::from(i64::from(self.seconds))
    }

    #[inline]
    #[must_use]
    pub fn to_interval(&self) -> Interval {
        Interval::from_ticks(i64::from(self.seconds) * TICKS_PER_SECOND)
    }

    /// Compares two offsets with PostgreSQL's inverted zone order.
    #[inline]
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        other.seconds.cmp(&self.seconds)
    }

    /// Parses an offset, returning `None` on failure.
    pub fn try_parse(source: &str) -> Option<Self> {
        parse_zone_offset(source).ok()
    }

    pub(crate) fn formattable(&self) -> FormattableOffset {
        let abs = self.seconds.unsigned_abs();
        FormattableOffset {
            sign: if self.seconds < 0 {
                Sign::Negative
            } else {
                Sign::Positive
            },
            hour: (abs / 3_600) as u8,
            minute: (abs % 3_600 / 60) as u8,
            second: (abs % 60) as u8,
        }
    }
}

impl PartialOrd for ZoneOffset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZoneOffset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Writeable for ZoneOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.formattable().write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.formattable().writeable_length_hint()
    }
}

impl_display_with_writeable!(ZoneOffset);

impl FromStr for ZoneOffset {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_zone_offset(s)
    }
}
